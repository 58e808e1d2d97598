//! Shared helpers for router-level tests

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use prizedesk::config::AppConfig;
use prizedesk::gate::handlers::AppState;
use prizedesk::gate::server::app;
use serde_json::Value;
use tower::ServiceExt;

/// Build the router over the given configuration
pub fn router(config: AppConfig) -> Router {
    app(AppState::new(config))
}

/// Configuration pointing the completion endpoint at a mock server
pub fn llm_config(mock_base: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.llm.api_base = mock_base.to_string();
    config.llm.api_key = Some("test-key".to_string());
    config
}

/// Configuration pointing the record store at a mock server
pub fn store_config(mock_base: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.store.api_base = mock_base.to_string();
    config.store.api_key = Some("test-key".to_string());
    config.store.base_id = Some("appTEST".to_string());
    config
}

/// Build a JSON request
pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Dispatch a request through the router and decode the JSON response
pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}
