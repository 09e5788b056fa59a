//! Configuration for the provider client and the HTTP server.
//!
//! Everything is read once at startup from environment variables. Loading goes
//! through a lookup function so the same parsing runs against a plain map in tests.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use serde::{Serialize, Serializer};
use thiserror::Error;
use url::Url;

/// Provider credential (required).
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Model identifier.
pub const MODEL_ENV: &str = "OPENAI_MODEL";
/// OpenAI-compatible base URL of the provider.
pub const LLM_URL_ENV: &str = "TRAVEL_PLANNER_LLM_URL";
/// Whole-request timeout for the provider call, in seconds.
pub const LLM_TIMEOUT_ENV: &str = "TRAVEL_PLANNER_LLM_TIMEOUT_SECS";
/// HTTP listen port.
pub const PORT_ENV: &str = "TRAVEL_PLANNER_PORT";
/// Directory served for the web UI.
pub const STATIC_DIR_ENV: &str = "TRAVEL_PLANNER_STATIC_DIR";

/// Model used when `OPENAI_MODEL` is not set.
pub const DEFAULT_MODEL: &str = "qwen/qwen3-32b";
/// Groq's OpenAI-compatible endpoint.
pub const DEFAULT_LLM_URL: &str = "https://api.groq.com/openai/v1";
/// Default server port.
pub const DEFAULT_PORT: u16 = 8000;
/// Default static asset directory.
pub const DEFAULT_STATIC_DIR: &str = "static";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Errors raised while loading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The provider credential is missing or blank.
    #[error("GROQ_API_KEY must be set to a non-empty value")]
    MissingApiKey,
    /// A numeric setting could not be parsed.
    #[error("invalid value for {name}: {value:?}")]
    InvalidNumber {
        /// Variable name.
        name: &'static str,
        /// Raw value found.
        value: String,
    },
    /// The provider URL is not a valid absolute URL.
    #[error("invalid provider url {value:?}: {reason}")]
    InvalidUrl {
        /// Raw value found.
        value: String,
        /// Parser message.
        reason: String,
    },
}

/// Top-level application configuration.
#[derive(Clone, Debug, Serialize)]
pub struct AppConfig {
    /// Provider client settings.
    pub llm: LlmConfig,
    /// HTTP server settings.
    pub server: ServerConfig,
}

impl AppConfig {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a value cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// Blank values are treated as unset.
    ///
    /// # Errors
    /// Returns an error if the API key is missing or a value cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let api_key = var(API_KEY_ENV).ok_or(ConfigError::MissingApiKey)?;

        let mut llm = LlmConfig::new(api_key);
        if let Some(model) = var(MODEL_ENV) {
            llm = llm.with_model(model);
        }
        if let Some(base_url) = var(LLM_URL_ENV) {
            llm = llm.with_base_url(parse_base_url(&base_url)?);
        }
        if let Some(raw) = var(LLM_TIMEOUT_ENV) {
            let secs: u64 = parse_number(LLM_TIMEOUT_ENV, &raw)?;
            llm = llm.with_timeout(Duration::from_secs(secs));
        }

        let mut server = ServerConfig::default();
        if let Some(raw) = var(PORT_ENV) {
            server = server.with_port(parse_number(PORT_ENV, &raw)?);
        }
        if let Some(dir) = var(STATIC_DIR_ENV) {
            server = server.with_static_dir(dir);
        }

        Ok(Self { llm, server })
    }
}

/// Settings for the remote text-generation provider.
#[derive(Clone, Serialize)]
pub struct LlmConfig {
    /// Bearer credential. Never serialized or printed.
    #[serde(skip_serializing)]
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Base URL without the `/chat/completions` suffix.
    pub base_url: String,
    /// Whole-request timeout.
    #[serde(serialize_with = "serialize_secs")]
    pub timeout: Duration,
    /// Connection establishment timeout.
    #[serde(serialize_with = "serialize_secs")]
    pub connect_timeout: Duration,
}

impl LlmConfig {
    /// Create provider settings with defaults for everything but the key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_LLM_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    /// Set the model identifier.
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the provider base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the whole-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl fmt::Debug for LlmConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmConfig")
            .field("api_key", &"<redacted>")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .field("connect_timeout", &self.connect_timeout)
            .finish()
    }
}

/// HTTP server settings.
#[derive(Clone, Debug, Serialize)]
pub struct ServerConfig {
    /// Listen port on all interfaces.
    pub port: u16,
    /// Directory served for unmatched routes.
    pub static_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            static_dir: PathBuf::from(DEFAULT_STATIC_DIR),
        }
    }
}

impl ServerConfig {
    /// Set the listen port.
    #[must_use]
    pub const fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the static asset directory.
    #[must_use]
    pub fn with_static_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.static_dir = dir.into();
        self
    }
}

fn parse_number<T: std::str::FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.parse().map_err(|_| ConfigError::InvalidNumber {
        name,
        value: raw.to_string(),
    })
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidUrl {
        value: raw.to_string(),
        reason: e.to_string(),
    })?;
    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn serialize_secs<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    duration.as_secs().serialize(serializer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_only_api_key() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "gsk-test")])).unwrap();
        assert_eq!(config.llm.api_key, "gsk-test");
        assert_eq!(config.llm.model, DEFAULT_MODEL);
        assert_eq!(config.llm.base_url, DEFAULT_LLM_URL);
        assert_eq!(config.llm.timeout, Duration::from_secs(120));
        assert_eq!(config.server.port, DEFAULT_PORT);
        assert_eq!(config.server.static_dir, PathBuf::from("static"));
    }

    #[test]
    fn test_missing_or_blank_api_key() {
        assert_eq!(
            AppConfig::from_lookup(lookup(&[])).unwrap_err(),
            ConfigError::MissingApiKey
        );
        assert_eq!(
            AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "   ")])).unwrap_err(),
            ConfigError::MissingApiKey
        );
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            (API_KEY_ENV, "key"),
            (MODEL_ENV, "llama-3.3-70b-versatile"),
            (LLM_URL_ENV, "http://127.0.0.1:9000/v1/"),
            (LLM_TIMEOUT_ENV, "30"),
            (PORT_ENV, "3001"),
            (STATIC_DIR_ENV, "/srv/ui"),
        ]))
        .unwrap();

        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert_eq!(config.llm.base_url, "http://127.0.0.1:9000/v1");
        assert_eq!(config.llm.timeout, Duration::from_secs(30));
        assert_eq!(config.server.port, 3001);
        assert_eq!(config.server.static_dir, PathBuf::from("/srv/ui"));
    }

    #[test]
    fn test_blank_model_falls_back_to_default() {
        let config =
            AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "key"), (MODEL_ENV, "  ")])).unwrap();
        assert_eq!(config.llm.model, DEFAULT_MODEL);
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "key"), (PORT_ENV, "eighty")]))
            .unwrap_err();
        assert_eq!(
            err,
            ConfigError::InvalidNumber {
                name: PORT_ENV,
                value: "eighty".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_url_is_an_error() {
        let err = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "key"), (LLM_URL_ENV, "not a url")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn test_api_key_never_printed() {
        let config = AppConfig::from_lookup(lookup(&[(API_KEY_ENV, "gsk-secret")])).unwrap();

        let debug = format!("{config:?}");
        assert!(!debug.contains("gsk-secret"));
        assert!(debug.contains("<redacted>"));

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("gsk-secret"));
        assert!(json.contains("\"timeout\":120"));
    }
}
