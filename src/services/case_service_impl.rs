//! `SeaORM` implementation of the `CaseService` trait.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::constants::store::EMPTY_PARSED_DATA;
use crate::db::Store;
use crate::models::case::{CaseRecord, CaseSnapshot, QueryStatus, QuerySummary};
use crate::services::case_service::{CaseError, CaseService};
use crate::services::provider::CaseDataProvider;
use crate::services::validation::validate_case_query;

pub struct SeaOrmCaseService {
    store: Store,
    provider: Arc<dyn CaseDataProvider>,
}

impl SeaOrmCaseService {
    #[must_use]
    pub fn new(store: Store, provider: Arc<dyn CaseDataProvider>) -> Self {
        Self { store, provider }
    }
}

#[async_trait]
impl CaseService for SeaOrmCaseService {
    async fn search(
        &self,
        case_type: &str,
        case_number: &str,
        filing_year: &str,
    ) -> Result<CaseRecord, CaseError> {
        // Rejected input never reaches the query log.
        let query = validate_case_query(case_type, case_number, filing_year).inspect_err(|e| {
            debug!(error = %e, "Rejected case query");
        })?;

        let result = match self.provider.fetch_case(&query).await {
            Ok(result) => result,
            Err(e) => {
                let message = e.to_string();
                warn!(
                    provider = self.provider.name(),
                    case = %query,
                    error = %message,
                    "Case data fetch failed"
                );
                self.store
                    .record_query(
                        &query,
                        &format!("Error: {message}"),
                        EMPTY_PARSED_DATA,
                        QueryStatus::Error,
                    )
                    .await?;
                return Err(CaseError::Provider(message));
            }
        };

        let record = CaseRecord {
            query,
            details: result.details,
        };
        let parsed_data = serde_json::to_string(&record)?;

        self.store
            .record_query(
                &record.query,
                &result.raw_response,
                &parsed_data,
                QueryStatus::Success,
            )
            .await?;
        self.store.upsert_case_snapshot(&record).await?;

        info!(
            provider = self.provider.name(),
            case = %record.query,
            "Case search completed"
        );

        Ok(record)
    }

    async fn recent_queries(&self, limit: u64) -> Result<Vec<QuerySummary>, CaseError> {
        Ok(self.store.recent_queries(limit).await?)
    }

    async fn get_snapshot(
        &self,
        case_type: &str,
        case_number: &str,
        filing_year: &str,
    ) -> Result<CaseSnapshot, CaseError> {
        let query = validate_case_query(case_type, case_number, filing_year)?;

        self.store
            .get_case_snapshot(&query)
            .await?
            .ok_or_else(|| CaseError::NotFound(query.to_string()))
    }

    async fn list_snapshots(&self, limit: u64) -> Result<Vec<CaseSnapshot>, CaseError> {
        Ok(self.store.list_case_snapshots(limit).await?)
    }

    async fn fetch_document(&self, link: &str) -> Result<Vec<u8>, CaseError> {
        self.provider
            .download_document(link)
            .await
            .ok_or_else(|| CaseError::DocumentUnavailable(link.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::case::{CaseDataResult, CaseDetails, CaseQuery};
    use crate::services::provider::ProviderError;

    struct FailingProvider;

    #[async_trait]
    impl CaseDataProvider for FailingProvider {
        fn name(&self) -> &str {
            "failing"
        }

        async fn fetch_case(&self, _query: &CaseQuery) -> Result<CaseDataResult, ProviderError> {
            Err(ProviderError::new("portal unreachable"))
        }

        async fn download_document(&self, _link: &str) -> Option<Vec<u8>> {
            None
        }
    }

    struct FixedProvider;

    #[async_trait]
    impl CaseDataProvider for FixedProvider {
        fn name(&self) -> &str {
            "fixed"
        }

        async fn fetch_case(&self, query: &CaseQuery) -> Result<CaseDataResult, ProviderError> {
            Ok(CaseDataResult {
                raw_response: "<html>raw</html>".to_string(),
                details: CaseDetails {
                    parties_names: format!("X vs Y ({query})"),
                    filing_date: "01-02-2020".to_string(),
                    next_hearing_date: "03-04-2025".to_string(),
                    latest_order_link: "/orders/o.pdf".to_string(),
                    case_status: "Disposed".to_string(),
                    last_order_date: "05-06-2024".to_string(),
                    court_name: "Test Court".to_string(),
                    judge_name: "Judge".to_string(),
                },
            })
        }

        async fn download_document(&self, _link: &str) -> Option<Vec<u8>> {
            Some(b"%PDF-1.4".to_vec())
        }
    }

    async fn service(provider: Arc<dyn CaseDataProvider>) -> (SeaOrmCaseService, Store) {
        let path = std::env::temp_dir().join(format!(
            "courtcase-service-test-{}.db",
            uuid::Uuid::new_v4()
        ));
        let store = Store::new(&format!("sqlite:{}", path.display()))
            .await
            .unwrap();
        (SeaOrmCaseService::new(store.clone(), provider), store)
    }

    #[tokio::test]
    async fn search_logs_success_and_upserts_snapshot() {
        let (service, store) = service(Arc::new(FixedProvider)).await;

        let record = service.search("CRL", "7", "2020").await.unwrap();
        assert_eq!(record.query, CaseQuery::new("CRL", "7", "2020"));

        let recent = store.recent_queries(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].status, QueryStatus::Success);

        let entry = store.get_query(recent[0].id).await.unwrap().unwrap();
        assert_eq!(entry.raw_response.as_deref(), Some("<html>raw</html>"));
        let parsed: serde_json::Value =
            serde_json::from_str(entry.parsed_data.as_deref().unwrap()).unwrap();
        assert_eq!(parsed["case_number"], "7");
        assert_eq!(parsed["case_status"], "Disposed");

        let snapshot = service.get_snapshot("CRL", "7", "2020").await.unwrap();
        assert_eq!(snapshot.filing_date.as_deref(), Some("01-02-2020"));
    }

    #[tokio::test]
    async fn search_provider_failure_is_logged_as_error() {
        let (service, store) = service(Arc::new(FailingProvider)).await;

        let err = service.search("CRL", "7", "2020").await.unwrap_err();
        assert!(matches!(err, CaseError::Provider(ref msg) if msg.contains("portal unreachable")));

        let recent = store.recent_queries(10).await.unwrap();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].status, QueryStatus::Error);

        let entry = store.get_query(recent[0].id).await.unwrap().unwrap();
        assert!(entry.raw_response.unwrap().starts_with("Error: "));
        assert_eq!(entry.parsed_data.as_deref(), Some("{}"));

        assert!(matches!(
            service.get_snapshot("CRL", "7", "2020").await,
            Err(CaseError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn search_validation_failure_writes_nothing() {
        let (service, store) = service(Arc::new(FixedProvider)).await;

        let err = service.search("CRL", "abc", "2020").await.unwrap_err();
        assert!(matches!(err, CaseError::Validation(_)));
        assert_eq!(store.query_count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn fetch_document_maps_absent_to_unavailable() {
        let (failing, _) = service(Arc::new(FailingProvider)).await;
        assert!(matches!(
            failing.fetch_document("/orders/o.pdf").await,
            Err(CaseError::DocumentUnavailable(_))
        ));

        let (fixed, _) = service(Arc::new(FixedProvider)).await;
        assert_eq!(
            fixed.fetch_document("/orders/o.pdf").await.unwrap(),
            b"%PDF-1.4".to_vec()
        );
    }
}
