mod history;
mod lookup;

pub use history::cmd_history;
pub use lookup::cmd_lookup;
