use crate::constants::store::TIMESTAMP_FORMAT;
use crate::models::case::{CaseQuery, CaseRecord, CaseSnapshot, QueryStatus, QuerySummary};
use anyhow::Result;
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::info;

pub mod migrator;
pub mod repositories;

pub use crate::entities::queries::Model as QueryLogEntry;

/// Current UTC time in the text form SQLite uses for `CURRENT_TIMESTAMP`.
#[must_use]
pub fn sqlite_now() -> String {
    chrono::Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

#[derive(Clone)]
pub struct Store {
    pub conn: DatabaseConnection,
}

impl Store {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = db_url.contains(":memory:");

        if !in_memory {
            let path_str = db_url.trim_start_matches("sqlite:");
            if let Some(parent) = Path::new(path_str).parent() {
                tokio::fs::create_dir_all(parent).await.ok();
            }
            if !Path::new(path_str).exists() {
                std::fs::File::create(path_str)?;
            }
        }

        // Pooled connections opened before the schema changes do not see the
        // new indexes, so file databases are migrated on their own connection
        // first. Each in-memory connection is a separate database.
        if !in_memory {
            let mut migrate_opt = ConnectOptions::new(db_url.to_string());
            migrate_opt
                .max_connections(1)
                .min_connections(1)
                .connect_timeout(Duration::from_secs(10))
                .sqlx_logging(false);

            let migrate_conn = Database::connect(migrate_opt).await?;
            migrator::Migrator::up(&migrate_conn, None).await?;
            migrate_conn.close().await?;
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.max_connections(max_connections)
            .min_connections(min_connections)
            .connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .idle_timeout(Duration::from_secs(300))
            .max_lifetime(Duration::from_secs(600))
            .sqlx_logging(false);

        let conn = Database::connect(opt).await?;

        if in_memory {
            migrator::Migrator::up(&conn, None).await?;
        }

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn query_log_repo(&self) -> repositories::query_log::QueryLogRepository {
        repositories::query_log::QueryLogRepository::new(self.conn.clone())
    }

    fn case_snapshot_repo(&self) -> repositories::case_snapshot::CaseSnapshotRepository {
        repositories::case_snapshot::CaseSnapshotRepository::new(self.conn.clone())
    }

    pub async fn record_query(
        &self,
        query: &CaseQuery,
        raw_response: &str,
        parsed_data: &str,
        status: QueryStatus,
    ) -> Result<i64> {
        self.query_log_repo()
            .record(query, raw_response, parsed_data, status)
            .await
    }

    pub async fn recent_queries(&self, limit: u64) -> Result<Vec<QuerySummary>> {
        self.query_log_repo().recent(limit).await
    }

    pub async fn get_query(&self, id: i64) -> Result<Option<QueryLogEntry>> {
        self.query_log_repo().get(id).await
    }

    pub async fn query_count(&self) -> Result<u64> {
        self.query_log_repo().count().await
    }

    pub async fn upsert_case_snapshot(&self, record: &CaseRecord) -> Result<()> {
        self.case_snapshot_repo().upsert(record).await
    }

    pub async fn get_case_snapshot(&self, query: &CaseQuery) -> Result<Option<CaseSnapshot>> {
        self.case_snapshot_repo().get(query).await
    }

    pub async fn list_case_snapshots(&self, limit: u64) -> Result<Vec<CaseSnapshot>> {
        self.case_snapshot_repo().list(limit).await
    }

    pub async fn case_snapshot_count(&self, query: &CaseQuery) -> Result<u64> {
        self.case_snapshot_repo().count_for(query).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::case::CaseDetails;

    async fn temp_store() -> Store {
        let path =
            std::env::temp_dir().join(format!("courtcase-store-test-{}.db", uuid::Uuid::new_v4()));
        Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap()
    }

    fn record(query: &CaseQuery, parties: &str) -> CaseRecord {
        CaseRecord {
            query: query.clone(),
            details: CaseDetails {
                parties_names: parties.to_string(),
                filing_date: format!("15-01-{}", query.filing_year),
                next_hearing_date: "25-08-2025".to_string(),
                latest_order_link: "/orders/latest.pdf".to_string(),
                case_status: "Active".to_string(),
                last_order_date: "15-07-2025".to_string(),
                court_name: "Delhi District Court".to_string(),
                judge_name: "Judge".to_string(),
            },
        }
    }

    #[test]
    fn test_sqlite_now_format() {
        let now = sqlite_now();
        assert_eq!(now.len(), 19);
        assert!(chrono::NaiveDateTime::parse_from_str(&now, TIMESTAMP_FORMAT).is_ok());
    }

    #[tokio::test]
    async fn test_recent_queries_newest_first_and_bounded() {
        let store = temp_store().await;

        for n in 1..=5 {
            let query = CaseQuery::new("CRL", n.to_string(), "2023");
            store
                .record_query(&query, "Mock response", "{}", QueryStatus::Success)
                .await
                .unwrap();
        }

        let recent = store.recent_queries(3).await.unwrap();
        assert_eq!(recent.len(), 3);

        let numbers: Vec<&str> = recent.iter().map(|q| q.case_number.as_str()).collect();
        assert_eq!(numbers, vec!["5", "4", "3"]);

        let all = store.recent_queries(50).await.unwrap();
        assert_eq!(all.len(), 5);
        assert_eq!(store.query_count().await.unwrap(), 5);
    }

    #[tokio::test]
    async fn test_record_query_keeps_payloads() {
        let store = temp_store().await;
        let query = CaseQuery::new("CS", "42", "2021");

        let id = store
            .record_query(&query, "Error: upstream down", "{}", QueryStatus::Error)
            .await
            .unwrap();

        let entry = store.get_query(id).await.unwrap().unwrap();
        assert_eq!(entry.raw_response.as_deref(), Some("Error: upstream down"));
        assert_eq!(entry.parsed_data.as_deref(), Some("{}"));
        assert_eq!(entry.status, "error");

        let recent = store.recent_queries(1).await.unwrap();
        assert_eq!(recent[0].status, QueryStatus::Error);
    }

    #[tokio::test]
    async fn test_upsert_replaces_existing_snapshot() {
        let store = temp_store().await;
        let query = CaseQuery::new("CRL", "12345", "2023");

        store
            .upsert_case_snapshot(&record(&query, "First vs Second"))
            .await
            .unwrap();
        let first = store.get_case_snapshot(&query).await.unwrap().unwrap();

        store
            .upsert_case_snapshot(&record(&query, "Third vs Fourth"))
            .await
            .unwrap();
        let second = store.get_case_snapshot(&query).await.unwrap().unwrap();

        assert_eq!(store.case_snapshot_count(&query).await.unwrap(), 1);
        assert_eq!(first.id, second.id);
        assert_eq!(second.parties_names.as_deref(), Some("Third vs Fourth"));
    }

    #[tokio::test]
    async fn test_upsert_as_first_statement_on_every_pooled_connection() {
        let store = temp_store().await;
        let queries: Vec<CaseQuery> = (1..=5)
            .map(|n| CaseQuery::new("CRL", n.to_string(), "2023"))
            .collect();

        let upserts = queries.iter().map(|q| {
            let store = store.clone();
            let record = record(q, "Concurrent");
            async move { store.upsert_case_snapshot(&record).await }
        });

        for result in spawn_all(upserts).await {
            result.unwrap();
        }

        assert_eq!(store.list_case_snapshots(10).await.unwrap().len(), 5);
    }

    async fn spawn_all<F, T>(futures: impl IntoIterator<Item = F>) -> Vec<T>
    where
        F: std::future::Future<Output = T> + Send + 'static,
        T: Send + 'static,
    {
        let handles: Vec<_> = futures.into_iter().map(tokio::spawn).collect();
        let mut results = Vec::with_capacity(handles.len());
        for handle in handles {
            results.push(handle.await.unwrap());
        }
        results
    }

    #[tokio::test]
    async fn test_snapshots_are_keyed_on_full_triple() {
        let store = temp_store().await;
        let a = CaseQuery::new("CRL", "1", "2023");
        let b = CaseQuery::new("CRL", "1", "2024");

        store.upsert_case_snapshot(&record(&a, "A")).await.unwrap();
        store.upsert_case_snapshot(&record(&b, "B")).await.unwrap();

        assert_eq!(store.list_case_snapshots(10).await.unwrap().len(), 2);
        assert!(
            store
                .get_case_snapshot(&CaseQuery::new("CS", "1", "2023"))
                .await
                .unwrap()
                .is_none()
        );
    }
}
