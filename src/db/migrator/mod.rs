use sea_orm_migration::prelude::*;

mod m20250801_initial;
mod m20250815_case_data_unique_key;
mod m20250901_sessions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_initial::Migration),
            Box::new(m20250815_case_data_unique_key::Migration),
            Box::new(m20250901_sessions::Migration),
        ]
    }
}
