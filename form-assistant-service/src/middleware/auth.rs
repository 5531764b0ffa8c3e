use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::error::FormAssistantError;
use crate::startup::AppState;

/// Extract the token from `Authorization: Bearer <token>`.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

/// Middleware to require a valid HS256 bearer token.
///
/// Runs before the body is read, so an unauthenticated request is rejected
/// with 401 whatever its payload.
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, FormAssistantError> {
    let token = bearer_token(req.headers()).ok_or_else(|| {
        FormAssistantError::InvalidToken("missing or malformed Authorization header".to_string())
    })?;

    let claims = state.tokens.validate(token)?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}
