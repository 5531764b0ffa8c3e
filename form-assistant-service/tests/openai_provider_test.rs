//! Tests for the OpenAI-compatible provider against a local mock server.

mod common;

use axum::http::StatusCode;
use common::{post_form, send, test_config, valid_token};
use form_assistant_service::services::providers::openai::{OpenAiChatProvider, OpenAiConfig};
use form_assistant_service::services::providers::{
    ChatMessage, ChatProvider, FinishReason, GenerationParams, ProviderError,
};
use form_assistant_service::{build_router, AppState};
use secrecy::Secret;
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn provider_for(server: &MockServer) -> OpenAiChatProvider {
    OpenAiChatProvider::new(OpenAiConfig {
        base_uri: format!("{}/v1", server.uri()),
        api_key: Secret::new("sk-test".to_string()),
        model: "gpt-4o-mini".to_string(),
    })
    .expect("Failed to build provider")
}

fn completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-1",
        "object": "chat.completion",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 120, "completion_tokens": 30, "total_tokens": 150 }
    })
}

fn params() -> GenerationParams {
    GenerationParams {
        temperature: Some(0.5),
        max_tokens: Some(512),
    }
}

#[tokio::test]
async fn sends_chat_completion_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 512,
            "temperature": 0.5,
            "messages": [
                { "role": "system", "content": "sys" },
                { "role": "user", "content": "Description to form: x" }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("[]")))
        .expect(1)
        .mount(&server)
        .await;

    let messages = vec![
        ChatMessage::system("sys"),
        ChatMessage::user("Description to form: x"),
    ];
    let response = provider_for(&server)
        .complete(&messages, &params())
        .await
        .expect("completion failed");

    assert_eq!(response.text, "[]");
    assert_eq!(response.input_tokens, 120);
    assert_eq!(response.output_tokens, 30);
    assert_eq!(response.finish_reason, FinishReason::Complete);
}

#[tokio::test]
async fn maps_429_to_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429).set_body_string("slow down"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("hi")], &params())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::RateLimited));
}

#[tokio::test]
async fn maps_server_error_to_api_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503).set_body_string("overloaded"))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("hi")], &params())
        .await
        .unwrap_err();

    match err {
        ProviderError::ApiError(message) => assert!(message.contains("overloaded")),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn empty_choices_is_empty_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .complete(&[ChatMessage::user("hi")], &params())
        .await
        .unwrap_err();

    assert!(matches!(err, ProviderError::EmptyResponse));
}

#[tokio::test]
async fn truncated_reply_reports_length() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{
                "message": { "role": "assistant", "content": "[{\"id\":" },
                "finish_reason": "length"
            }]
        })))
        .mount(&server)
        .await;

    let response = provider_for(&server)
        .complete(&[ChatMessage::user("hi")], &params())
        .await
        .expect("completion failed");

    assert_eq!(response.finish_reason, FinishReason::Length);
    assert_eq!(response.input_tokens, 0);
}

#[test]
fn rejects_empty_api_key() {
    let result = OpenAiChatProvider::new(OpenAiConfig {
        base_uri: "http://localhost/v1".to_string(),
        api_key: Secret::new(String::new()),
        model: "gpt-4o-mini".to_string(),
    });

    assert!(matches!(result, Err(ProviderError::NotConfigured(_))));
}

#[tokio::test]
async fn end_to_end_through_router() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(
            "```json\n[{\"id\":\"1\",\"label\":\"Name\",\"type\":\"text\"}]\n```",
        )))
        .mount(&server)
        .await;

    let config = test_config(&format!("{}/v1", server.uri()));
    let state = AppState::new(config, Arc::new(provider_for(&server)), None);

    let response = send(
        build_router(state),
        post_form(
            "/assistant/form",
            Some(&valid_token()),
            r#"{"description":"Nome"}"#,
        ),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, r#"[{"id":"1","label":"Name","type":"text"}]"#);
}
