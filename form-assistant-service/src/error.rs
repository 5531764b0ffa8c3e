use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::services::form_schema::SchemaError;
use crate::services::jwt::TokenError;
use crate::services::providers::ProviderError;

pub const MISSING_PAYLOAD_MESSAGE: &str = "Please pass a JSON payload";
pub const MISSING_DESCRIPTION_MESSAGE: &str = "Please pass a prompt in the payload";
pub const TOKEN_EXPIRED_MESSAGE: &str = "Token expirado.";
pub const TOKEN_INVALID_MESSAGE: &str = "Token inválido.";
pub const GENERIC_FAILURE_MESSAGE: &str = "An error occurred";

/// Every failure the assistant routes can answer with.
#[derive(Debug, Error)]
pub enum FormAssistantError {
    #[error("missing or unparseable JSON payload")]
    MissingPayload,

    #[error("payload has no description")]
    MissingDescription,

    #[error("expired token")]
    TokenExpired,

    #[error("invalid token: {0}")]
    InvalidToken(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

impl From<TokenError> for FormAssistantError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => FormAssistantError::TokenExpired,
            TokenError::Invalid(reason) => FormAssistantError::InvalidToken(reason),
        }
    }
}

impl FormAssistantError {
    pub fn status(&self) -> StatusCode {
        match self {
            FormAssistantError::MissingPayload | FormAssistantError::MissingDescription => {
                StatusCode::BAD_REQUEST
            }
            FormAssistantError::TokenExpired | FormAssistantError::InvalidToken(_) => {
                StatusCode::UNAUTHORIZED
            }
            FormAssistantError::Provider(_) | FormAssistantError::Schema(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            FormAssistantError::MissingPayload => MISSING_PAYLOAD_MESSAGE,
            FormAssistantError::MissingDescription => MISSING_DESCRIPTION_MESSAGE,
            FormAssistantError::TokenExpired => TOKEN_EXPIRED_MESSAGE,
            FormAssistantError::InvalidToken(_) => TOKEN_INVALID_MESSAGE,
            FormAssistantError::Provider(_) | FormAssistantError::Schema(_) => {
                GENERIC_FAILURE_MESSAGE
            }
        }
    }

    /// Upstream failures whose text mentions cost accounting.
    ///
    /// These are logged as a warning rather than an error; the caller still
    /// receives the generic 500.
    pub fn is_cost_warning(&self) -> bool {
        matches!(
            self,
            FormAssistantError::Provider(_) | FormAssistantError::Schema(_)
        ) && self.to_string().contains("cost")
    }

    fn log(&self) {
        match self {
            FormAssistantError::MissingPayload | FormAssistantError::MissingDescription => {
                tracing::info!(reason = %self, "Rejected form assistant request");
            }
            FormAssistantError::TokenExpired => tracing::error!("Expired token."),
            FormAssistantError::InvalidToken(reason) => {
                tracing::error!(reason = %reason, "Invalid token.")
            }
            _ if self.is_cost_warning() => {
                tracing::warn!(error = %self, "Cost calculation error ignored.")
            }
            _ => tracing::error!(error = %self, "An unexpected error occurred"),
        }
    }
}

impl IntoResponse for FormAssistantError {
    fn into_response(self) -> Response {
        self.log();
        (self.status(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_client_errors_to_400() {
        assert_eq!(
            FormAssistantError::MissingPayload.status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            FormAssistantError::MissingDescription.message(),
            "Please pass a prompt in the payload"
        );
    }

    #[test]
    fn distinguishes_expired_from_invalid() {
        let expired = FormAssistantError::from(TokenError::Expired);
        let invalid = FormAssistantError::from(TokenError::Invalid("bad signature".into()));

        assert_eq!(expired.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(invalid.status(), StatusCode::UNAUTHORIZED);
        assert_ne!(expired.message(), invalid.message());
    }

    #[test]
    fn cost_errors_still_fail_generically() {
        let err = FormAssistantError::from(ProviderError::ApiError(
            "Failed to compute cost for model".into(),
        ));

        assert!(err.is_cost_warning());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.message(), GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn auth_errors_are_never_cost_warnings() {
        assert!(!FormAssistantError::InvalidToken("cost".into()).is_cost_warning());
    }
}
