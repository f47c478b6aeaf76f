//! Server-rendered index page.

use axum::{extract::State, response::Html};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write;
use std::sync::Arc;
use tower_sessions::Session;
use tracing::warn;

use super::assets::Asset;
use super::{ApiError, AppState};
use crate::constants::session::LAST_SEARCH_KEY;
use crate::models::case::{CaseQuery, QuerySummary};

/// `GET /`
///
/// Search form, prefilled with the session's last successful search, and the
/// recent query list.
pub async fn index(
    State(state): State<Arc<AppState>>,
    session: Session,
) -> Result<Html<String>, ApiError> {
    let limit = state.config().general.recent_queries_limit;
    let recent = state.case_service().recent_queries(limit).await?;

    let last_search = session
        .get::<CaseQuery>(LAST_SEARCH_KEY)
        .await
        .unwrap_or_else(|e| {
            warn!(error = %e, "Failed to read last search from session");
            None
        });

    let template = Asset::get("index.html")
        .ok_or_else(|| ApiError::internal("Index template is missing"))?;
    let template = std::str::from_utf8(&template.data)
        .map_err(|e| ApiError::internal(format!("Index template is not UTF-8: {e}")))?;

    Ok(Html(render_index(template, &recent, last_search.as_ref())))
}

fn render_index(template: &str, recent: &[QuerySummary], last_search: Option<&CaseQuery>) -> String {
    let (case_type, case_number, filing_year) = last_search.map_or(("", "", ""), |q| {
        (
            q.case_type.as_str(),
            q.case_number.as_str(),
            q.filing_year.as_str(),
        )
    });

    template
        .replace("{{case_type}}", &encode_double_quoted_attribute(case_type))
        .replace("{{case_number}}", &encode_double_quoted_attribute(case_number))
        .replace("{{filing_year}}", &encode_double_quoted_attribute(filing_year))
        .replace("{{recent_rows}}", &render_rows(recent))
}

fn render_rows(recent: &[QuerySummary]) -> String {
    if recent.is_empty() {
        return r#"<tr><td colspan="3" class="empty">No queries yet</td></tr>"#.to_string();
    }

    let mut rows = String::new();
    for q in recent {
        let case = format!("{}/{}/{}", q.case_type, q.case_number, q.filing_year);
        let _ = writeln!(
            rows,
            r#"<tr class="status-{status}"><td>{case}</td><td>{ts}</td><td>{status}</td></tr>"#,
            status = q.status,
            case = encode_text(&case),
            ts = encode_text(&q.query_timestamp),
        );
    }
    rows
}
