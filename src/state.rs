use std::sync::Arc;
use std::time::Duration;

use crate::clients::ecourts::ECourtsClient;
use crate::config::Config;
use crate::db::Store;
use crate::services::{CaseDataProvider, CaseService, SeaOrmCaseService};

/// Build the HTTP client shared by everything that talks to the portal, so
/// connections are pooled instead of opened per request.
fn build_shared_http_client(config: &Config) -> anyhow::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider.request_timeout_seconds))
        .user_agent(config.provider.user_agent.as_str())
        .cookie_store(true)
        .pool_max_idle_per_host(10)
        .build()
        .map_err(|e| anyhow::anyhow!("Failed to build shared HTTP client: {e}"))
}

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub case_service: Arc<dyn CaseService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = build_shared_http_client(&config)?;
        let provider = Arc::new(ECourtsClient::with_shared_client(
            http_client,
            &config.provider,
        )?) as Arc<dyn CaseDataProvider>;

        Self::with_provider(config, provider).await
    }

    /// Builds the state around a caller-supplied provider.
    pub async fn with_provider(
        config: Config,
        provider: Arc<dyn CaseDataProvider>,
    ) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        let case_service = Arc::new(SeaOrmCaseService::new(store.clone(), provider))
            as Arc<dyn CaseService>;

        Ok(Self {
            config: Arc::new(config),
            store,
            case_service,
        })
    }
}
