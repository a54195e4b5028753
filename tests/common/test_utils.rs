use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use svg_forge::{
    config::LlmConfig,
    server::{AppState, router},
};
use tower::ServiceExt; // for `oneshot`

use super::mocks::MockLlmClient;

/// 1x1 transparent PNG.
pub const PNG_DATA_URL: &str = "data:image/png;base64,iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAQAAAC1HAwCAAAAC0lEQVR42mNkYAAAAAYAAjCB0C8AAAAASUVORK5CYII=";

pub const CLEAN_SVG: &str = concat!(
    r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 10 10">"#,
    r#"<circle r="5"/></svg>"#,
);

/// Create a test LLM configuration with sensible defaults
pub fn create_test_llm_config() -> LlmConfig {
    LlmConfig {
        api_key: Some("test-api-key".to_string()),
        timeout_secs: 5,
        ..LlmConfig::default()
    }
}

/// Router backed by `mock`.
pub fn create_test_app(mock: &MockLlmClient) -> Router {
    create_test_app_with_config(mock, create_test_llm_config())
}

pub fn create_test_app_with_config(mock: &MockLlmClient, config: LlmConfig) -> Router {
    let state = AppState::new(Some(Arc::new(mock.clone())), config);
    router(state)
}

/// Router with no model client, as when no credential is configured.
pub fn create_unconfigured_app() -> Router {
    router(AppState::new(None, LlmConfig::default()))
}

/// POSTs a JSON body and returns the status and decoded JSON response.
pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    post_raw(app, uri, body.to_string()).await
}

pub async fn post_raw(app: Router, uri: &str, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}
