use axum::{
    Form, Json,
    extract::{FromRequest, Multipart, Request, State},
    http::header,
};
use std::sync::Arc;
use tower_sessions::Session;
use tracing::{debug, warn};

use super::{ApiError, ApiResponse, AppState, SearchForm};
use crate::constants::session::LAST_SEARCH_KEY;
use crate::models::case::CaseRecord;
use crate::services::ValidationError;

/// `POST /search`
///
/// Runs the search flow for the posted form and remembers the query in the
/// session so the index page can prefill it. Accepts urlencoded and
/// multipart bodies.
pub async fn search_case(
    State(state): State<Arc<AppState>>,
    session: Session,
    request: Request,
) -> Result<Json<ApiResponse<CaseRecord>>, ApiError> {
    let form = read_search_form(request).await?;

    let record = state
        .case_service()
        .search(&form.case_type, &form.case_number, &form.filing_year)
        .await?;

    if let Err(e) = session.insert(LAST_SEARCH_KEY, &record.query).await {
        warn!(error = %e, "Failed to store last search in session");
    }

    Ok(Json(ApiResponse::success(record)))
}

/// A body that cannot be read as a form is reported like one with no fields.
fn unreadable_form(reason: impl std::fmt::Display) -> ApiError {
    debug!(reason = %reason, "Unreadable search form");
    ApiError::validation(ValidationError::MissingFields.to_string())
}

async fn read_search_form(request: Request) -> Result<SearchForm, ApiError> {
    let is_multipart = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.starts_with("multipart/form-data"));

    if !is_multipart {
        return Form::<SearchForm>::from_request(request, &())
            .await
            .map(|Form(form)| form)
            .map_err(|e| unreadable_form(e.body_text()));
    }

    let mut multipart = Multipart::from_request(request, &())
        .await
        .map_err(|e| unreadable_form(e.body_text()))?;

    let mut form = SearchForm::default();
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| unreadable_form(e.body_text()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        let value = field
            .text()
            .await
            .map_err(|e| unreadable_form(e.body_text()))?;

        match name.as_str() {
            "case_type" => form.case_type = value,
            "case_number" => form.case_number = value,
            "filing_year" => form.filing_year = value,
            _ => {}
        }
    }

    Ok(form)
}
