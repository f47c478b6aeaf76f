//! Smoke tests for the browser-facing flows.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use courtcase::config::Config;
use http_body_util::BodyExt;
use sea_orm::{ConnectionTrait, Statement};
use std::sync::Arc;
use tower::ServiceExt;

async fn spawn_app() -> (Arc<courtcase::api::AppState>, Router) {
    let db_path =
        std::env::temp_dir().join(format!("courtcase-smoke-test-{}.db", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.general.database_path = format!("sqlite:{}", db_path.display());

    let state = courtcase::api::create_app_state_from_config(config, None)
        .await
        .expect("failed to create app state");

    let router = courtcase::api::router(state.clone());
    (state, router)
}

async fn body_text(response: axum::response::Response) -> String {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(body.to_vec()).unwrap()
}

fn search(body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri("/search")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn index_page_renders_empty_history() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));

    let html = body_text(response).await;
    assert!(html.contains("<form"));
    assert!(html.contains("No queries yet"));
    assert!(!html.contains("{{"));
}

#[tokio::test]
async fn index_page_lists_recent_queries_escaped() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(search(
            "case_type=%3Cb%3EX%3C%2Fb%3E&case_number=9&filing_year=2024",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_text(response).await;

    assert!(html.contains("&lt;b&gt;X&lt;/b&gt;/9/2024"));
    assert!(!html.contains("<b>X</b>"));
    assert!(html.contains("status-success"));
}

#[tokio::test]
async fn session_prefills_last_search() {
    let (state, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(search(
            "case_type=CRL&case_number=12345&filing_year=2023",
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let cookie = response
        .headers()
        .get(header::SET_COOKIE)
        .expect("session cookie")
        .to_str()
        .unwrap()
        .split(';')
        .next()
        .unwrap()
        .to_string();

    let backend = state.store().conn.get_database_backend();
    let stored = state
        .store()
        .conn
        .query_one(Statement::from_string(
            backend,
            "SELECT COUNT(*) AS n FROM tower_sessions".to_string(),
        ))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.try_get::<i64>("", "n").unwrap(), 1);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(html.contains(r#"value="12345""#));
    assert!(html.contains(r#"value="2023""#));

    let response = app
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let html = body_text(response).await;
    assert!(!html.contains(r#"value="12345""#));
}

#[tokio::test]
async fn health_reports_healthy() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["status"], "healthy");
    assert!(chrono::DateTime::parse_from_rfc3339(json["timestamp"].as_str().unwrap()).is_ok());
}

#[tokio::test]
async fn readiness_checks_database() {
    let (_, app) = spawn_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json: serde_json::Value = serde_json::from_str(&body_text(response).await).unwrap();
    assert_eq!(json["ready"], true);
    assert_eq!(json["checks"]["database"], true);
}

#[tokio::test]
async fn static_assets_are_served() {
    let (_, app) = spawn_app().await;

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/static/app.js")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.contains("javascript"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/static/missing.css")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
