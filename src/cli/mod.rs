//! Command-line interface.

mod commands;

use clap::{Parser, Subcommand};

/// Court case lookup service
#[derive(Parser)]
#[command(name = "courtcase")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the web server (default)
    #[command(alias = "web")]
    Serve,

    /// Run one search and print the case record
    #[command(alias = "l")]
    Lookup {
        /// Case type, e.g. CRL
        case_type: String,
        /// Numeric case number
        case_number: String,
        /// Four digit filing year
        filing_year: String,
    },

    /// Show the most recent search attempts
    #[command(alias = "h")]
    History {
        /// Number of entries to show
        #[arg(long, short, default_value = "10")]
        limit: u64,
    },

    /// Create default config file
    #[command(alias = "--init")]
    Init,
}

pub use commands::*;
