pub mod validation;
pub use validation::{ValidationError, validate_case_query};

pub mod provider;
pub use provider::{CaseDataProvider, ProviderError};

pub mod case_service;
pub mod case_service_impl;
pub use case_service::{CaseError, CaseService};
pub use case_service_impl::SeaOrmCaseService;
