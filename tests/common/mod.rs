#![allow(dead_code)]

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use ld_api::config::Config;
use tower::ServiceExt;

/// Config pointing at a fresh SQLite file under the temp dir.
pub fn test_config() -> Config {
    let dir = std::env::temp_dir().join(format!("ld-api-test-{}", uuid::Uuid::new_v4()));

    let mut config = Config::default();
    config.database.url = Some(format!("sqlite:{}", dir.display()));
    config.database.name = Some("appdb".to_string());
    config.observability.metrics_enabled = false;
    config
}

pub fn spawn_app(config: Config) -> Router {
    let state = ld_api::api::create_app_state_from_config(config, None)
        .expect("Failed to create app state");
    ld_api::api::router(state)
}

pub async fn get(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    into_json(response).await
}

pub async fn post_json(app: &Router, uri: &str, body: &str) -> (StatusCode, serde_json::Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("Content-Type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    into_json(response).await
}

async fn into_json(response: axum::response::Response) -> (StatusCode, serde_json::Value) {
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn enquiry_body(name: &str) -> String {
    serde_json::json!({
        "name": name,
        "email": "lead@example.com",
        "company": "Acme Health",
        "service": "Leadership & Management",
        "message": "We would like to talk about a programme.",
        "consent": true,
        "source": "contact-page"
    })
    .to_string()
}
