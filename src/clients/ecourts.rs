use anyhow::{Context, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::config::ProviderConfig;
use crate::constants::provider::SEARCH_PATH;
use crate::constants::store::MOCK_RAW_RESPONSE;
use crate::models::case::{CaseDataResult, CaseDetails, CaseQuery};
use crate::services::provider::{CaseDataProvider, ProviderError};

/// Client for the district courts portal.
///
/// The portal's case search sits behind view-state tokens and a CAPTCHA, so
/// case data is synthesized from the query for now. Order documents are
/// fetched over HTTP for real.
#[derive(Clone)]
pub struct ECourtsClient {
    client: Client,
    base_url: Url,
    court_code: String,
    court_name: String,
    timeout: Duration,
}

impl ECourtsClient {
    /// Creates a client with its own connection pool.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(config: &ProviderConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .user_agent(config.user_agent.as_str())
            .cookie_store(true)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to build HTTP client: {e}"))?;

        Self::with_shared_client(client, config)
    }

    /// Creates a client that reuses an existing `reqwest::Client`.
    ///
    /// # Errors
    /// Returns an error if the configured base URL cannot be parsed.
    pub fn with_shared_client(client: Client, config: &ProviderConfig) -> Result<Self> {
        let base_url = Url::parse(&config.base_url)
            .with_context(|| format!("Invalid provider base URL: {}", config.base_url))?;

        Ok(Self {
            client,
            base_url,
            court_code: config.court_code.clone(),
            court_name: config.court_name.clone(),
            timeout: Duration::from_secs(config.request_timeout_seconds),
        })
    }

    /// The form submission the portal's case status search expects.
    pub fn search_request(&self, query: &CaseQuery) -> Result<(Url, Vec<(&'static str, String)>)> {
        let url = self
            .base_url
            .join(SEARCH_PATH)
            .map_err(|e| anyhow::anyhow!("Failed to build search URL: {e}"))?;

        let form = vec![
            ("case_type", query.case_type.clone()),
            ("case_no", query.case_number.clone()),
            ("case_year", query.filing_year.clone()),
            ("court_code", self.court_code.clone()),
        ];

        Ok((url, form))
    }

    /// Resolves a document link against the base origin. Absolute links are
    /// kept as they are; only http(s) targets are accepted.
    pub fn resolve_link(&self, link: &str) -> Result<Url> {
        let url = self
            .base_url
            .join(link.trim())
            .with_context(|| format!("Invalid document link: {link}"))?;

        match url.scheme() {
            "http" | "https" => Ok(url),
            other => anyhow::bail!("Unsupported document link scheme: {other}"),
        }
    }

    fn synthesize(&self, query: &CaseQuery) -> CaseDetails {
        let CaseQuery {
            case_type,
            case_number,
            filing_year,
        } = query;

        CaseDetails {
            parties_names: format!(
                "Petitioner Name vs Respondent Name (Case: {case_type}/{case_number}/{filing_year})"
            ),
            filing_date: format!("15-01-{filing_year}"),
            next_hearing_date: "25-08-2025".to_string(),
            latest_order_link: format!(
                "/orders/{case_type}_{case_number}_{filing_year}_latest.pdf"
            ),
            case_status: "Active".to_string(),
            last_order_date: "15-07-2025".to_string(),
            court_name: self.court_name.clone(),
            judge_name: "Hon'ble Justice Sample Name".to_string(),
        }
    }

    async fn fetch_document(&self, link: &str) -> Result<Vec<u8>> {
        let url = self.resolve_link(link)?;

        debug!(url = %url, "Downloading document");

        let response = self
            .client
            .get(url)
            .timeout(self.timeout)
            .send()
            .await?
            .error_for_status()?;

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[async_trait::async_trait]
impl CaseDataProvider for ECourtsClient {
    fn name(&self) -> &str {
        "ecourts"
    }

    async fn fetch_case(&self, query: &CaseQuery) -> Result<CaseDataResult, ProviderError> {
        let (url, form) = self
            .search_request(query)
            .map_err(|e| ProviderError::new(e.to_string()))?;

        debug!(
            url = %url,
            court_code = %self.court_code,
            fields = form.len(),
            "Synthesizing case data in place of portal search"
        );

        Ok(CaseDataResult {
            raw_response: MOCK_RAW_RESPONSE.to_string(),
            details: self.synthesize(query),
        })
    }

    async fn download_document(&self, link: &str) -> Option<Vec<u8>> {
        match self.fetch_document(link).await {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!(link = %link, error = %e, "Error downloading document");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> ECourtsClient {
        ECourtsClient::new(&ProviderConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn test_fetch_case_is_deterministic() {
        let client = client();
        let query = CaseQuery::new("CRL", "12345", "2023");

        let first = client.fetch_case(&query).await.unwrap();
        let second = client.fetch_case(&query).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first.raw_response, "Mock response");
        assert_eq!(first.details.filing_date, "15-01-2023");
        assert!(first.details.parties_names.contains("CRL/12345/2023"));
        assert_eq!(
            first.details.latest_order_link,
            "/orders/CRL_12345_2023_latest.pdf"
        );
        assert_eq!(first.details.court_name, "Delhi District Court");
    }

    #[test]
    fn test_search_request() {
        let client = client();
        let (url, form) = client
            .search_request(&CaseQuery::new("CS", "9", "2020"))
            .unwrap();

        assert_eq!(
            url.as_str(),
            "https://districts.ecourts.gov.in/services/ecourts_services/ecourtindia_v6/"
        );
        assert!(form.contains(&("case_no", "9".to_string())));
        assert!(form.contains(&("court_code", "DL01".to_string())));
    }

    #[test]
    fn test_resolve_link() {
        let client = client();

        let relative = client.resolve_link("/orders/a.pdf").unwrap();
        assert_eq!(
            relative.as_str(),
            "https://districts.ecourts.gov.in/orders/a.pdf"
        );

        let absolute = client
            .resolve_link("https://example.org/files/b.pdf")
            .unwrap();
        assert_eq!(absolute.as_str(), "https://example.org/files/b.pdf");

        assert!(client.resolve_link("file:///etc/passwd").is_err());
    }

    #[tokio::test]
    async fn test_download_rejected_scheme_is_unavailable() {
        let client = client();
        assert!(client.download_document("ftp://example.org/a.pdf").await.is_none());
    }
}
