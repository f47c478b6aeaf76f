//! Structural checks for case queries coming from untrusted input.

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::models::case::CaseQuery;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingFields,

    #[error("Case number must be numeric")]
    NonNumericCaseNumber,

    #[error("Filing year must be a valid 4-digit year")]
    InvalidFilingYear,
}

fn case_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[0-9]+$").expect("Invalid regex"))
}

fn filing_year_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^20[0-9]{2}$").expect("Invalid regex"))
}

/// Validates the raw form fields and builds a [`CaseQuery`].
///
/// Checks run in order: presence of all three fields, numeric case number,
/// then a filing year between 2000 and 2099.
pub fn validate_case_query(
    case_type: &str,
    case_number: &str,
    filing_year: &str,
) -> Result<CaseQuery, ValidationError> {
    if case_type.is_empty() || case_number.is_empty() || filing_year.is_empty() {
        return Err(ValidationError::MissingFields);
    }

    if !case_number_regex().is_match(case_number) {
        return Err(ValidationError::NonNumericCaseNumber);
    }

    if !filing_year_regex().is_match(filing_year) {
        return Err(ValidationError::InvalidFilingYear);
    }

    Ok(CaseQuery::new(case_type, case_number, filing_year))
}
