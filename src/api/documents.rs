use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use std::sync::Arc;

use super::validation::validate_document_link;
use super::{ApiError, AppState, DownloadParams, DownloadResponse};

/// `GET /download_pdf?link=...`
///
/// Checks that the order document can be retrieved from the portal. The
/// document itself is not streamed back.
pub async fn download_pdf(
    State(state): State<Arc<AppState>>,
    params: Result<Query<DownloadParams>, QueryRejection>,
) -> Result<Json<DownloadResponse>, ApiError> {
    let Query(params) = params?;
    let link = validate_document_link(params.link.as_deref())?;

    let document = state.case_service().fetch_document(link).await?;

    Ok(Json(DownloadResponse {
        success: true,
        message: "PDF download would start here".to_string(),
        link: link.to_string(),
        size_bytes: document.len(),
    }))
}
