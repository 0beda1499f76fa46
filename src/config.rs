//! Configuration management for Architect AI.
//!
//! Configuration can be set via environment variables:
//! - `HUGGINGFACEHUB_API_TOKEN` - Required. Credential for the LLM provider.
//! - `HOST` - Optional. Server host. Defaults to `127.0.0.1`.
//! - `PORT` - Optional. Server port. Defaults to `8000`.
//! - `CORS_ALLOWED_ORIGINS` - Optional. Comma-separated list of dashboard origins.
//!   Defaults to `http://localhost:3000`.
//! - `LLM_BASE_URL` - Optional. Overrides the provider's chat-completions base URL.
//! - `LLM_TIMEOUT_SECS` - Optional. Upper bound for a single provider call.
//!   Unset means the call may take as long as the provider does.
//! - `LLM_MAX_TOKENS` - Optional. Completion token cap sent with each request.
//!
//! The model itself is fixed per deployment, see [`DEFAULT_MODEL`].

use std::time::Duration;
use thiserror::Error;

/// Model used for every roadmap (`<provider>/<model-name>`).
pub const DEFAULT_MODEL: &str = "huggingface/meta-llama/Meta-Llama-3-8B-Instruct";

/// Environment variable holding the provider credential.
pub const CREDENTIAL_ENV_VAR: &str = "HUGGINGFACEHUB_API_TOKEN";

const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),

    #[error("Provider credential is empty")]
    MissingCredential,

    #[error("Unrecognized model identifier '{0}' (expected '<provider>/<model-name>')")]
    UnknownModel(String),
}

/// Service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider credential (API key / access token)
    pub api_key: String,

    /// Provider-qualified model identifier
    pub model: String,

    /// Server host
    pub host: String,

    /// Server port
    pub port: u16,

    /// Origins allowed to call the API from a browser
    pub cors_origins: Vec<String>,

    /// Override for the provider's base URL
    pub llm_base_url: Option<String>,

    /// Optional bound on a single provider call
    pub llm_timeout: Option<Duration>,

    /// Optional completion token cap
    pub llm_max_tokens: Option<u64>,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `HUGGINGFACEHUB_API_TOKEN` is not set,
    /// and `ConfigError::InvalidValue` for unparsable numeric settings.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var(CREDENTIAL_ENV_VAR)
            .map_err(|_| ConfigError::MissingEnvVar(CREDENTIAL_ENV_VAR.to_string()))?;

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        let port = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("PORT".to_string(), format!("{}", e)))?;

        let cors_origins = parse_origins(std::env::var("CORS_ALLOWED_ORIGINS").ok().as_deref())?;

        let llm_base_url = std::env::var("LLM_BASE_URL")
            .ok()
            .map(|s| s.trim().trim_end_matches('/').to_string())
            .filter(|s| !s.is_empty());

        let llm_timeout = parse_timeout_secs(std::env::var("LLM_TIMEOUT_SECS").ok().as_deref())?;

        let llm_max_tokens = match std::env::var("LLM_MAX_TOKENS").ok() {
            Some(raw) => Some(raw.trim().parse().map_err(|e| {
                ConfigError::InvalidValue("LLM_MAX_TOKENS".to_string(), format!("{}", e))
            })?),
            None => None,
        };

        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            host,
            port,
            cors_origins,
            llm_base_url,
            llm_timeout,
            llm_max_tokens,
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String) -> Self {
        Self {
            api_key,
            model,
            host: "127.0.0.1".to_string(),
            port: 8000,
            cors_origins: vec![DEFAULT_CORS_ORIGIN.to_string()],
            llm_base_url: None,
            llm_timeout: None,
            llm_max_tokens: None,
        }
    }
}

/// Split a comma-separated origin list, falling back to the local dashboard.
///
/// `*` is rejected: CORS responses carry credentials, which browsers refuse
/// to combine with a wildcard origin.
fn parse_origins(raw: Option<&str>) -> Result<Vec<String>, ConfigError> {
    let origins: Vec<String> = raw
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect();

    if origins.iter().any(|o| o == "*") {
        return Err(ConfigError::InvalidValue(
            "CORS_ALLOWED_ORIGINS".to_string(),
            "wildcard '*' cannot be combined with credentials; list explicit origins".to_string(),
        ));
    }

    if origins.is_empty() {
        Ok(vec![DEFAULT_CORS_ORIGIN.to_string()])
    } else {
        Ok(origins)
    }
}

/// `None`, empty and `0` all mean "no timeout".
fn parse_timeout_secs(raw: Option<&str>) -> Result<Option<Duration>, ConfigError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };
    let secs: u64 = raw
        .parse()
        .map_err(|e| ConfigError::InvalidValue("LLM_TIMEOUT_SECS".to_string(), format!("{}", e)))?;
    Ok((secs > 0).then(|| Duration::from_secs(secs)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_default_to_local_dashboard() {
        assert_eq!(parse_origins(None).unwrap(), vec!["http://localhost:3000"]);
        assert_eq!(parse_origins(Some(" , ")).unwrap(), vec!["http://localhost:3000"]);
    }

    #[test]
    fn test_origins_are_split_and_trimmed() {
        let origins = parse_origins(Some("https://app.example.com/, http://localhost:5173")).unwrap();
        assert_eq!(
            origins,
            vec!["https://app.example.com", "http://localhost:5173"]
        );
    }

    #[test]
    fn test_wildcard_origin_is_rejected() {
        for raw in ["*", "http://localhost:3000, *"] {
            let err = parse_origins(Some(raw)).unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue(ref name, _) if name == "CORS_ALLOWED_ORIGINS"),
                "{raw}"
            );
        }
    }

    #[test]
    fn test_timeout_is_opt_in() {
        assert_eq!(parse_timeout_secs(None).unwrap(), None);
        assert_eq!(parse_timeout_secs(Some("")).unwrap(), None);
        assert_eq!(parse_timeout_secs(Some("0")).unwrap(), None);
        assert_eq!(
            parse_timeout_secs(Some("45")).unwrap(),
            Some(Duration::from_secs(45))
        );
    }

    #[test]
    fn test_invalid_timeout_is_rejected() {
        let err = parse_timeout_secs(Some("soon")).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "LLM_TIMEOUT_SECS"));
    }

    #[test]
    fn test_config_uses_no_timeout() {
        let config = Config::new("hf_test".to_string(), DEFAULT_MODEL.to_string());
        assert!(config.llm_timeout.is_none());
        assert_eq!(config.port, 8000);
    }
}
