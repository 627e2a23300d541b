//! Engine configuration
//!
//! Immutable settings fixed at startup: where the API lives, how many times
//! idempotent requests are retried and how long the transport may take.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Environment variable overriding [`EngineConfig::base_url`].
pub const ENV_BASE_URL: &str = "GIGBOARD_API_BASE_URL";
/// Environment variable overriding [`EngineConfig::max_retries`].
pub const ENV_MAX_RETRIES: &str = "GIGBOARD_MAX_RETRIES";
/// Environment variable overriding [`EngineConfig::connect_timeout`], in seconds.
pub const ENV_CONNECT_TIMEOUT: &str = "GIGBOARD_CONNECT_TIMEOUT_SECS";
/// Environment variable overriding [`EngineConfig::request_timeout`], in seconds.
pub const ENV_REQUEST_TIMEOUT: &str = "GIGBOARD_REQUEST_TIMEOUT_SECS";

/// Configuration errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The base URL is not an absolute http(s) URL.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// An override could not be parsed.
    #[error("invalid value '{value}' for {key}")]
    InvalidValue {
        /// Variable name.
        key: String,
        /// The rejected value.
        value: String,
    },
}

/// Request engine settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// API root every endpoint path is appended to.
    pub base_url: String,
    /// Retries after the first attempt, for idempotent requests only.
    pub max_retries: u32,
    /// Delay before the first retry; doubles for each further retry.
    #[serde(rename = "backoff_base_ms", with = "duration_millis")]
    pub backoff_base: Duration,
    /// Time allowed to establish a connection.
    #[serde(rename = "connect_timeout_ms", with = "duration_millis")]
    pub connect_timeout: Duration,
    /// Time allowed for a whole exchange, body included.
    #[serde(rename = "request_timeout_ms", with = "duration_millis")]
    pub request_timeout: Duration,
    /// `User-Agent` sent with every request.
    pub user_agent: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.gigboard.app/v1".to_string(),
            max_retries: 2,
            backoff_base: Duration::from_secs(1),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
            user_agent: concat!("Gigboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl EngineConfig {
    /// Builds the configuration from defaults plus process environment
    /// overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the resulting
    /// base URL is invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from defaults plus overrides returned by
    /// `lookup`.
    ///
    /// # Errors
    ///
    /// Returns an error if an override cannot be parsed or the resulting
    /// base URL is invalid.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(ENV_BASE_URL) {
            config.base_url = url;
        }
        if let Some(value) = lookup(ENV_MAX_RETRIES) {
            config.max_retries = parse_value(ENV_MAX_RETRIES, &value)?;
        }
        if let Some(value) = lookup(ENV_CONNECT_TIMEOUT) {
            config.connect_timeout = Duration::from_secs(parse_value(ENV_CONNECT_TIMEOUT, &value)?);
        }
        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT) {
            config.request_timeout = Duration::from_secs(parse_value(ENV_REQUEST_TIMEOUT, &value)?);
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks that the base URL is an absolute http(s) URL without query or
    /// fragment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] describing the problem.
    pub fn validate(&self) -> Result<Url, ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidBaseUrl {
            url: self.base_url.clone(),
            reason,
        };

        let url = Url::parse(&self.base_url).map_err(|e| invalid(e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
        }
        if url.host_str().is_none() {
            return Err(invalid("missing host".to_string()));
        }
        if url.query().is_some() || url.fragment().is_some() {
            return Err(invalid("query and fragment are not allowed".to_string()));
        }
        Ok(url)
    }

    /// Returns the delay to wait before retry number `retry` (1-based):
    /// `backoff_base * 2^(retry - 1)`, so 1s then 2s with the defaults.
    #[must_use]
    pub fn backoff_delay(&self, retry: u32) -> Duration {
        let shift = retry.saturating_sub(1).min(16);
        self.backoff_base.saturating_mul(1u32 << shift)
    }
}

fn parse_value<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

mod duration_millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::cast_possible_truncation)]
    pub fn serialize<S: Serializer>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(duration.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}
