//! The seam between the search flow and wherever case data comes from.
//!
//! [`CaseService`](super::CaseService) only sees this trait, so a portal
//! scraper can replace the synthetic [`ECourtsClient`](crate::clients::ecourts::ECourtsClient)
//! without touching callers.

use thiserror::Error;

use crate::models::case::{CaseDataResult, CaseQuery};

/// Any failure to produce case data. The message is shown to the caller
/// and kept in the query log.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Failed to fetch case data: {0}")]
pub struct ProviderError(pub String);

impl ProviderError {
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        Self(err.to_string())
    }
}

#[async_trait::async_trait]
pub trait CaseDataProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Fetches the current data for a validated case query.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the upstream cannot be reached or its
    /// response cannot be parsed. No retries are attempted.
    async fn fetch_case(&self, query: &CaseQuery) -> Result<CaseDataResult, ProviderError>;

    /// Downloads an order document. Relative links are resolved against the
    /// provider's base origin.
    ///
    /// Returns `None` on any failure; callers treat that as "unavailable".
    async fn download_document(&self, link: &str) -> Option<Vec<u8>>;
}
