//! Domain service for case searches and the stores behind them.
//!
//! This module provides the [`CaseService`] trait: the search flow that ties
//! validation, the case data provider, the query log and the snapshot store
//! together, plus the read operations used by the listing endpoints.

use thiserror::Error;

use super::validation::ValidationError;
use crate::models::case::{CaseRecord, CaseSnapshot, QuerySummary};

/// Errors specific to case operations.
#[derive(Debug, Error)]
pub enum CaseError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Provider failure. Carries the message shown to the caller.
    #[error("{0}")]
    Provider(String),

    #[error("Case {0} not found")]
    NotFound(String),

    #[error("Document unavailable: {0}")]
    DocumentUnavailable(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl From<sea_orm::DbErr> for CaseError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl From<anyhow::Error> for CaseError {
    fn from(err: anyhow::Error) -> Self {
        Self::Database(format!("{err:#}"))
    }
}

impl From<serde_json::Error> for CaseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Database(format!("Failed to serialize case data: {err}"))
    }
}

/// Domain service trait for case searches.
#[async_trait::async_trait]
pub trait CaseService: Send + Sync {
    /// Runs one search: validate, fetch, log, upsert the snapshot.
    ///
    /// Validation failures are returned before anything is written or fetched.
    /// Provider failures are recorded in the query log with status `error`.
    ///
    /// # Errors
    ///
    /// - [`CaseError::Validation`] for malformed input
    /// - [`CaseError::Provider`] when the provider fails
    /// - [`CaseError::Database`] when the store is unavailable
    async fn search(
        &self,
        case_type: &str,
        case_number: &str,
        filing_year: &str,
    ) -> Result<CaseRecord, CaseError>;

    /// Most recent query log entries, newest first, at most `limit`.
    async fn recent_queries(&self, limit: u64) -> Result<Vec<QuerySummary>, CaseError>;

    /// Latest stored data for a case.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::NotFound`] if the case was never fetched successfully.
    async fn get_snapshot(
        &self,
        case_type: &str,
        case_number: &str,
        filing_year: &str,
    ) -> Result<CaseSnapshot, CaseError>;

    /// Snapshots ordered by last update, newest first.
    async fn list_snapshots(&self, limit: u64) -> Result<Vec<CaseSnapshot>, CaseError>;

    /// Downloads an order document through the provider.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::DocumentUnavailable`] if the provider could not
    /// retrieve it. Such failures are not written to the query log.
    async fn fetch_document(&self, link: &str) -> Result<Vec<u8>, CaseError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_conversions_work() {
        let db_err = sea_orm::DbErr::Custom("test".to_string());
        let case_err: CaseError = db_err.into();
        assert!(matches!(case_err, CaseError::Database(_)));

        let case_err: CaseError = ValidationError::MissingFields.into();
        assert_eq!(case_err.to_string(), "All fields are required");
    }

    #[test]
    fn provider_message_is_passed_through() {
        let err = CaseError::Provider("Failed to fetch case data: timeout".to_string());
        assert_eq!(err.to_string(), "Failed to fetch case data: timeout");
    }
}
