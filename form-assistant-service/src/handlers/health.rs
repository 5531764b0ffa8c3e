use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::startup::AppState;

/// Liveness probe kept for the existing frontend; always answers pong.
pub async fn ping() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "response": "pong" })))
}

pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "service": "form-assistant-service",
            "version": env!("CARGO_PKG_VERSION"),
            "model": state.config.llm.model,
        })),
    )
}
