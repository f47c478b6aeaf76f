pub mod prelude;

pub mod case_data;
pub mod queries;
