pub use super::case_data::Entity as CaseData;
pub use super::queries::Entity as Queries;
