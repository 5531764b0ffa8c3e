use secrecy::Secret;
use service_core::config::{self as core_config, require_env};
use service_core::error::AppError;
use std::env;

/// Output cap sent with every completion request.
pub const DEFAULT_MAX_TOKENS: u32 = 512;

/// Sampling temperature sent with every completion request.
pub const DEFAULT_TEMPERATURE: f32 = 0.5;

#[derive(Debug, Clone)]
pub struct FormAssistantConfig {
    pub common: core_config::Config,
    pub llm: LlmConfig,
    pub jwt: JwtConfig,
}

#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Model identifier passed through to the completion API.
    pub model: String,
    /// Base URI of an OpenAI-compatible API (without `/chat/completions`).
    pub base_uri: String,
    pub api_key: Secret<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HS256 shared secret.
    pub secret: Secret<String>,
}

impl FormAssistantConfig {
    /// Load from `APP__*` settings and the process environment.
    pub fn load() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;
        Self::from_lookup(common, |key| env::var(key).ok())
    }

    /// Build the service configuration from an arbitrary key lookup.
    ///
    /// Every inference and JWT setting is mandatory; the first missing one
    /// aborts start-up with its name in the error.
    pub fn from_lookup<F>(common: core_config::Config, lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(FormAssistantConfig {
            common,
            llm: LlmConfig {
                model: require_env(&lookup, "IAG_INFERENCE_MODEL")?,
                base_uri: require_env(&lookup, "IAG_INFERENCE_URI")?
                    .trim_end_matches('/')
                    .to_string(),
                api_key: Secret::new(require_env(&lookup, "IAG_INFERENCE_API_KEY")?),
                max_tokens: DEFAULT_MAX_TOKENS,
                temperature: DEFAULT_TEMPERATURE,
            },
            jwt: JwtConfig {
                secret: Secret::new(require_env(&lookup, "JWT_SECRET")?),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn full_env() -> HashMap<&'static str, &'static str> {
        HashMap::from([
            ("IAG_INFERENCE_MODEL", "gpt-4o-mini"),
            ("IAG_INFERENCE_URI", "https://llm.example.com/v1/"),
            ("IAG_INFERENCE_API_KEY", "sk-test"),
            ("JWT_SECRET", "shared-secret"),
        ])
    }

    fn load(vars: &HashMap<&'static str, &'static str>) -> Result<FormAssistantConfig, AppError> {
        FormAssistantConfig::from_lookup(core_config::Config::default(), |key| {
            vars.get(key).map(|v| v.to_string())
        })
    }

    #[test]
    fn loads_all_required_values() {
        let config = load(&full_env()).unwrap();

        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.base_uri, "https://llm.example.com/v1");
        assert_eq!(config.llm.api_key.expose_secret(), "sk-test");
        assert_eq!(config.jwt.secret.expose_secret(), "shared-secret");
        assert_eq!(config.llm.max_tokens, 512);
        assert_eq!(config.llm.temperature, 0.5);
    }

    #[test]
    fn each_missing_value_is_fatal() {
        for key in [
            "IAG_INFERENCE_MODEL",
            "IAG_INFERENCE_URI",
            "IAG_INFERENCE_API_KEY",
            "JWT_SECRET",
        ] {
            let mut vars = full_env();
            vars.remove(key);

            let err = load(&vars).unwrap_err();
            assert!(
                err.to_string().contains(key),
                "error for {} should name it: {}",
                key,
                err
            );
        }
    }

    #[test]
    fn debug_output_hides_secrets() {
        let config = load(&full_env()).unwrap();
        let rendered = format!("{:?}", config);

        assert!(!rendered.contains("sk-test"));
        assert!(!rendered.contains("shared-secret"));
    }
}
