use super::ApiError;
use crate::constants::limits::MAX_LIST_LIMIT;

pub fn validate_limit(limit: u64) -> Result<u64, ApiError> {
    const MIN_LIMIT: u64 = 1;

    if !(MIN_LIMIT..=MAX_LIST_LIMIT).contains(&limit) {
        return Err(ApiError::validation(format!(
            "Invalid limit: {}. Limit must be between {} and {}",
            limit, MIN_LIMIT, MAX_LIST_LIMIT
        )));
    }
    Ok(limit)
}

pub fn validate_document_link(link: Option<&str>) -> Result<&str, ApiError> {
    match link.map(str::trim) {
        Some(link) if !link.is_empty() => Ok(link),
        _ => Err(ApiError::validation("PDF link is required")),
    }
}
