pub mod case_snapshot;
pub mod query_log;
