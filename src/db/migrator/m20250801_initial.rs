use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

// Same DDL the first version of the tool shipped with, so an existing
// `court_data.db` is adopted without changes.
const CREATE_QUERIES: &str = r"
CREATE TABLE IF NOT EXISTS queries (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    case_type TEXT NOT NULL,
    case_number TEXT NOT NULL,
    filing_year TEXT NOT NULL,
    query_timestamp DATETIME DEFAULT CURRENT_TIMESTAMP,
    raw_response TEXT,
    parsed_data TEXT,
    status TEXT DEFAULT 'success'
)";

const CREATE_CASE_DATA: &str = r"
CREATE TABLE IF NOT EXISTS case_data (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    case_type TEXT NOT NULL,
    case_number TEXT NOT NULL,
    filing_year TEXT NOT NULL,
    parties_names TEXT,
    filing_date TEXT,
    next_hearing_date TEXT,
    latest_order_link TEXT,
    last_updated DATETIME DEFAULT CURRENT_TIMESTAMP
)";

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        conn.execute_unprepared(CREATE_QUERIES).await?;
        conn.execute_unprepared(CREATE_CASE_DATA).await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_queries_query_timestamp")
                    .table(Queries::Table)
                    .col(Queries::QueryTimestamp)
                    .if_not_exists()
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(CaseData::Table).to_owned())
            .await?;

        manager
            .drop_table(Table::drop().table(Queries::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Queries {
    Table,
    QueryTimestamp,
}

#[derive(DeriveIden)]
enum CaseData {
    Table,
}
