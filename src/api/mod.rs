use axum::{
    Router,
    http::HeaderValue,
    middleware,
    routing::{get, post},
};
use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tower_sessions::cookie::Key;
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::Config;
use crate::constants::session::INACTIVITY_MINUTES;
use crate::services::{CaseDataProvider, CaseService};
use crate::state::SharedState;

mod assets;
mod documents;
mod error;
mod history;
mod observability;
mod pages;
mod search;
mod session;
mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use session::{
    purge_expired_sessions, session_store, signing_key, spawn_session_cleanup,
};
pub use types::*;

#[derive(Clone)]
pub struct AppState {
    pub shared: Arc<SharedState>,

    pub session_key: Key,

    pub session_store: SqliteStore,

    pub prometheus_handle: Option<PrometheusHandle>,
}

impl AppState {
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.shared.config
    }

    #[must_use]
    pub fn store(&self) -> &crate::db::Store {
        &self.shared.store
    }

    #[must_use]
    pub fn case_service(&self) -> &Arc<dyn CaseService> {
        &self.shared.case_service
    }
}

pub fn create_app_state(
    shared: Arc<SharedState>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let session_key = signing_key(&shared.config.server.secret_key)?;
    let session_store = session_store(&shared.store);

    Ok(Arc::new(AppState {
        shared,
        session_key,
        session_store,
        prometheus_handle,
    }))
}

pub async fn create_app_state_from_config(
    config: Config,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::new(config).await?);
    create_app_state(shared, prometheus_handle)
}

/// Same as [`create_app_state_from_config`] but with a caller-supplied case
/// data provider.
pub async fn create_app_state_with_provider(
    config: Config,
    provider: Arc<dyn CaseDataProvider>,
    prometheus_handle: Option<PrometheusHandle>,
) -> anyhow::Result<Arc<AppState>> {
    let shared = Arc::new(SharedState::with_provider(config, provider).await?);
    create_app_state(shared, prometheus_handle)
}

pub fn router(state: Arc<AppState>) -> Router {
    let server = &state.config().server;

    let session_layer = SessionManagerLayer::new(state.session_store.clone())
        .with_secure(server.secure_cookies)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_expiry(Expiry::OnInactivity(time::Duration::minutes(
            INACTIVITY_MINUTES,
        )))
        .with_signed(state.session_key.clone());

    let cors_layer = if server.cors_allowed_origins.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins: Vec<HeaderValue> = server
            .cors_allowed_origins
            .iter()
            .filter_map(|s| s.parse().ok())
            .collect();
        CorsLayer::new().allow_origin(origins)
    };

    let api_router = Router::new()
        .route("/queries", get(history::list_queries))
        .route("/cases", get(history::list_cases))
        .route(
            "/cases/{case_type}/{case_number}/{filing_year}",
            get(history::get_case),
        );

    Router::new()
        .route("/", get(pages::index))
        .route("/search", post(search::search_case))
        .route("/download_pdf", get(documents::download_pdf))
        .route("/health", get(system::health))
        .route("/health/ready", get(system::health_ready))
        .route("/metrics", get(observability::get_metrics))
        .route("/static/{*path}", get(assets::serve_static))
        .nest("/api", api_router)
        .layer(session_layer)
        .with_state(state)
        .layer(cors_layer.allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(observability::security_headers_middleware))
        .layer(middleware::from_fn(observability::logging_middleware))
}
