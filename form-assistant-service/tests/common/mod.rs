//! Shared helpers for form-assistant-service integration tests.

#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, HeaderMap, Request, StatusCode},
    Router,
};
use form_assistant_service::config::FormAssistantConfig;
use form_assistant_service::services::providers::mock::MockChatProvider;
use form_assistant_service::{build_router, AppState};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use metrics_exporter_prometheus::PrometheusHandle;
use serde_json::json;
use service_core::config::Config;
use std::collections::HashMap;
use std::sync::Arc;
use tower::util::ServiceExt;

pub const TEST_SECRET: &str = "form-assistant-integration-secret";

pub fn test_config(base_uri: &str) -> FormAssistantConfig {
    let vars = HashMap::from([
        ("IAG_INFERENCE_MODEL".to_string(), "gpt-4o-mini".to_string()),
        ("IAG_INFERENCE_URI".to_string(), base_uri.to_string()),
        ("IAG_INFERENCE_API_KEY".to_string(), "sk-test".to_string()),
        ("JWT_SECRET".to_string(), TEST_SECRET.to_string()),
    ]);

    let common = Config {
        port: 0,
        log_level: "error".to_string(),
    };

    FormAssistantConfig::from_lookup(common, |key| vars.get(key).cloned())
        .expect("Failed to build test config")
}

/// Sign an HS256 token whose `exp` is `expires_in` seconds from now.
pub fn sign_token_with(secret: &str, expires_in: i64) -> String {
    let now = chrono::Utc::now().timestamp();
    encode(
        &Header::new(Algorithm::HS256),
        &json!({ "sub": "user-123", "iat": now, "exp": now + expires_in }),
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("Failed to sign test token")
}

pub fn valid_token() -> String {
    sign_token_with(TEST_SECRET, 3600)
}

pub fn expired_token() -> String {
    sign_token_with(TEST_SECRET, -3600)
}

pub fn app_with(provider: Arc<MockChatProvider>) -> Router {
    let state = AppState::new(test_config("http://llm.invalid/v1"), provider, None);
    build_router(state)
}

pub fn app_with_metrics(provider: Arc<MockChatProvider>, handle: PrometheusHandle) -> Router {
    let state = AppState::new(test_config("http://llm.invalid/v1"), provider, Some(handle));
    build_router(state)
}

pub fn post_form(path: &str, token: Option<&str>, body: &str) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json");

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    builder
        .body(Body::from(body.to_string()))
        .expect("Failed to build request")
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: String,
}

pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.expect("Router failed");
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");

    TestResponse {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8"),
    }
}
