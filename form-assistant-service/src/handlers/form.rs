use axum::{body::Bytes, extract::State, Json};
use serde_json::Value;

use crate::error::FormAssistantError;
use crate::prompts::FormPrompt;
use crate::services::form_schema::FormSchema;
use crate::services::metrics;
use crate::startup::AppState;

/// POST /assistant/form
pub async fn form_assistant(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FormSchema>, FormAssistantError> {
    run(&state, FormPrompt::DefineFormType, &body).await
}

/// POST /assistant/form/fields
pub async fn field_assistant(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<FormSchema>, FormAssistantError> {
    run(&state, FormPrompt::AddFields, &body).await
}

async fn run(
    state: &AppState,
    prompt: FormPrompt,
    body: &[u8],
) -> Result<Json<FormSchema>, FormAssistantError> {
    tracing::info!(prompt = prompt.as_str(), "Form assistant request received");

    let result = match extract_description(body) {
        Ok(description) => state.assistant.generate(prompt, &description).await,
        Err(e) => Err(e),
    };

    let outcome = match &result {
        Ok(_) => "ok",
        Err(e) if e.status().is_client_error() => "rejected",
        Err(_) => "failed",
    };
    metrics::record_request(prompt.as_str(), outcome);

    result.map(Json)
}

/// Pull a non-empty `description` string out of the raw request body.
///
/// Bodies that are empty, not JSON, not an object, or an empty object count
/// as a missing payload. A whitespace-only description is passed through.
pub fn extract_description(body: &[u8]) -> Result<String, FormAssistantError> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|_| FormAssistantError::MissingPayload)?;

    let object = match payload {
        Value::Object(map) if !map.is_empty() => map,
        _ => return Err(FormAssistantError::MissingPayload),
    };

    match object.get("description") {
        Some(Value::String(description)) if !description.is_empty() => {
            Ok(description.clone())
        }
        _ => Err(FormAssistantError::MissingDescription),
    }
}
