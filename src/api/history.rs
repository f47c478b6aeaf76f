//! Read-only listings over the query log and the case snapshots.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
};
use std::sync::Arc;

use super::validation::validate_limit;
use super::{ApiError, ApiResponse, AppState, LimitParams};
use crate::models::case::{CaseSnapshot, QuerySummary};

/// `GET /api/queries?limit=N`
pub async fn list_queries(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<QuerySummary>>>, ApiError> {
    let Query(params) = params?;
    let limit = validate_limit(
        params
            .limit
            .unwrap_or(state.config().general.recent_queries_limit),
    )?;

    let queries = state.case_service().recent_queries(limit).await?;
    Ok(Json(ApiResponse::success(queries)))
}

/// `GET /api/cases?limit=N`
pub async fn list_cases(
    State(state): State<Arc<AppState>>,
    params: Result<Query<LimitParams>, QueryRejection>,
) -> Result<Json<ApiResponse<Vec<CaseSnapshot>>>, ApiError> {
    let Query(params) = params?;
    let limit = validate_limit(
        params
            .limit
            .unwrap_or(state.config().general.recent_queries_limit),
    )?;

    let cases = state.case_service().list_snapshots(limit).await?;
    Ok(Json(ApiResponse::success(cases)))
}

/// `GET /api/cases/{case_type}/{case_number}/{filing_year}`
pub async fn get_case(
    State(state): State<Arc<AppState>>,
    path: Result<Path<(String, String, String)>, PathRejection>,
) -> Result<Json<ApiResponse<CaseSnapshot>>, ApiError> {
    let Path((case_type, case_number, filing_year)) = path?;
    let snapshot = state
        .case_service()
        .get_snapshot(&case_type, &case_number, &filing_year)
        .await?;

    Ok(Json(ApiResponse::success(snapshot)))
}
