use axum::extract::State;
use service_core::error::AppError;

use crate::startup::AppState;

/// Render the Prometheus exposition text.
pub async fn metrics(State(state): State<AppState>) -> Result<String, AppError> {
    state
        .metrics
        .as_ref()
        .map(|handle| handle.render())
        .ok_or_else(|| AppError::ServiceUnavailable("metrics recorder not installed".to_string()))
}
