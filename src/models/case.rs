use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifies a case on the portal. The triple is the natural key of a case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CaseQuery {
    pub case_type: String,

    pub case_number: String,

    pub filing_year: String,
}

impl CaseQuery {
    /// Builds a query without validating it. Use
    /// [`crate::services::validation::validate_case_query`] for untrusted input.
    #[must_use]
    pub fn new(
        case_type: impl Into<String>,
        case_number: impl Into<String>,
        filing_year: impl Into<String>,
    ) -> Self {
        Self {
            case_type: case_type.into(),
            case_number: case_number.into(),
            filing_year: filing_year.into(),
        }
    }
}

impl fmt::Display for CaseQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            self.case_type, self.case_number, self.filing_year
        )
    }
}

/// Case data as returned by a provider, without the identifying fields.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseDetails {
    pub parties_names: String,

    pub filing_date: String,

    pub next_hearing_date: String,

    pub latest_order_link: String,

    pub case_status: String,

    pub last_order_date: String,

    pub court_name: String,

    pub judge_name: String,
}

/// Provider output: the upstream payload as received plus the parsed details.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseDataResult {
    pub raw_response: String,

    pub details: CaseDetails,
}

/// A provider result merged with the query that produced it.
///
/// Serializes as one flat object, which is both the `data` payload of a
/// search response and the `parsed_data` kept in the query log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CaseRecord {
    #[serde(flatten)]
    pub query: CaseQuery,

    #[serde(flatten)]
    pub details: CaseDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QueryStatus {
    Success,
    Error,
}

impl QueryStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for QueryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryStatus {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "success" => Ok(Self::Success),
            "error" => Ok(Self::Error),
            other => anyhow::bail!("Unknown query status: {other}"),
        }
    }
}

/// Row of the recent-queries listing.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct QuerySummary {
    pub id: i64,

    pub case_type: String,

    pub case_number: String,

    pub filing_year: String,

    pub query_timestamp: String,

    pub status: QueryStatus,
}

/// Latest known state of a case.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct CaseSnapshot {
    pub id: i64,

    pub case_type: String,

    pub case_number: String,

    pub filing_year: String,

    pub parties_names: Option<String>,

    pub filing_date: Option<String>,

    pub next_hearing_date: Option<String>,

    pub latest_order_link: Option<String>,

    pub last_updated: String,
}
