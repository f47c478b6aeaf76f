use axum::{
    Json,
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::fmt;

use super::ApiResponse;
use crate::services::CaseError;

#[derive(Debug)]
pub enum ApiError {
    NotFound(String),

    DatabaseError(String),

    /// Upstream failure whose message is safe to show the caller.
    UpstreamError(String),

    ValidationError(String),

    InternalError(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::DatabaseError(msg) => write!(f, "Database error: {}", msg),
            ApiError::UpstreamError(msg) => write!(f, "Upstream error: {}", msg),
            ApiError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::DatabaseError(msg) => {
                tracing::error!("Database error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "A database error occurred".to_string(),
                )
            }
            ApiError::UpstreamError(msg) => {
                tracing::warn!("Upstream error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
            ApiError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ApiResponse::<()>::error(error_message);
        (status, Json(body)).into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError::InternalError(err.to_string())
    }
}

impl From<CaseError> for ApiError {
    fn from(err: CaseError) -> Self {
        match err {
            CaseError::Validation(e) => Self::validation(e.to_string()),
            CaseError::Provider(msg) => Self::UpstreamError(msg),
            CaseError::NotFound(case) => Self::not_found("Case", case),
            CaseError::DocumentUnavailable(link) => {
                tracing::debug!(link = %link, "Document unavailable");
                Self::UpstreamError("Failed to download PDF".to_string())
            }
            CaseError::Database(msg) => Self::DatabaseError(msg),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::validation(rejection.body_text())
    }
}

impl ApiError {
    pub fn not_found(resource: &str, id: impl fmt::Display) -> Self {
        ApiError::NotFound(format!("{} {} not found", resource, id))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        ApiError::ValidationError(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::InternalError(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ValidationError;

    #[test]
    fn test_case_error_status_mapping() {
        let cases = [
            (
                CaseError::Validation(ValidationError::NonNumericCaseNumber),
                StatusCode::BAD_REQUEST,
            ),
            (
                CaseError::Provider("boom".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CaseError::NotFound("CRL/1/2023".to_string()),
                StatusCode::NOT_FOUND,
            ),
            (
                CaseError::DocumentUnavailable("/x.pdf".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                CaseError::Database("locked".to_string()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            let response = ApiError::from(err).into_response();
            assert_eq!(response.status(), expected);
        }
    }

    #[test]
    fn test_database_error_keeps_detail_for_logs() {
        match ApiError::from(CaseError::Database("no such table: queries".to_string())) {
            ApiError::DatabaseError(msg) => assert!(msg.contains("no such table")),
            other => panic!("unexpected mapping: {other:?}"),
        }
    }
}
