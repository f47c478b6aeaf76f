use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // Keep the newest row per case before enforcing the key.
        conn.execute_unprepared(
            "DELETE FROM case_data WHERE rowid NOT IN (SELECT MAX(rowid) FROM case_data GROUP BY case_type, case_number, filing_year)",
        )
        .await?;

        conn.execute_unprepared(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_case_data_case_key ON case_data(case_type, case_number, filing_year)",
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared("DROP INDEX IF EXISTS idx_case_data_case_key")
            .await?;

        Ok(())
    }
}
