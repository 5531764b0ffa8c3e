use jsonwebtoken::{
    decode, errors::ErrorKind, get_current_timestamp, Algorithm, DecodingKey, Validation,
};
use secrecy::{ExposeSecret, Secret};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum TokenError {
    #[error("token has expired")]
    Expired,

    #[error("token is invalid: {0}")]
    Invalid(String),
}

/// Claims are not interpreted; handlers may read them from request extensions.
#[derive(Debug, Clone)]
pub struct TokenClaims(pub Map<String, Value>);

/// HS256 bearer-token validator sharing the issuer's secret.
#[derive(Clone)]
pub struct TokenValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenValidator {
    pub fn new(secret: &Secret<String>) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens without `exp` are accepted; an `exp` that is present is enforced exactly.
        validation.required_spec_claims.clear();
        validation.validate_nbf = true;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.expose_secret().as_bytes()),
            validation,
        }
    }

    pub fn validate(&self, token: &str) -> Result<TokenClaims, TokenError> {
        let claims = decode::<Map<String, Value>>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenError::Expired,
                _ => TokenError::Invalid(e.to_string()),
            })?;

        check_time_claims(&claims)?;
        Ok(TokenClaims(claims))
    }
}

/// `exp`, `nbf` and `iat` must be numeric when present.
///
/// jsonwebtoken skips optional time claims it cannot read as integers, so
/// non-numeric values are rejected here and fractional `exp`/`nbf` are
/// enforced here as well.
fn check_time_claims(claims: &Map<String, Value>) -> Result<(), TokenError> {
    let now = get_current_timestamp() as f64;

    for name in ["exp", "nbf", "iat"] {
        let Some(value) = claims.get(name) else {
            continue;
        };
        let at = value
            .as_f64()
            .ok_or_else(|| TokenError::Invalid(format!("{} claim must be a number", name)))?;

        match name {
            "exp" if at <= now => return Err(TokenError::Expired),
            "nbf" if at > now => {
                return Err(TokenError::Invalid("token is not yet valid".to_string()))
            }
            _ => {}
        }
    }

    Ok(())
}
