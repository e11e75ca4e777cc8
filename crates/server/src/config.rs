//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `VENDORA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//!
//! ## Optional
//! - `VENDORA_HOST` - Bind address (default: 127.0.0.1)
//! - `VENDORA_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)
//!
//! ## Optional (AI copywriter - enables the `/ai` routes)
//! - `COPYWRITER_API_KEY` - API key for the chat completions endpoint
//! - `COPYWRITER_BASE_URL` - API base URL (default: <https://api.openai.com/v1>)
//! - `COPYWRITER_MODEL` - Model ID (default: gpt-4o-mini)

use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

const DEFAULT_COPYWRITER_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_COPYWRITER_MODEL: &str = "gpt-4o-mini";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Server application configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// AI copywriter configuration (optional - enables the `/ai` routes)
    pub copywriter: Option<CopywriterConfig>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

/// Chat completions API configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct CopywriterConfig {
    /// API key for the chat completions endpoint
    pub api_key: SecretString,
    /// API base URL (any OpenAI-compatible endpoint)
    pub base_url: String,
    /// Model ID
    pub model: String,
}

impl std::fmt::Debug for CopywriterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CopywriterConfig")
            .field("api_key", &"[REDACTED]")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .finish()
    }
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("VENDORA_DATABASE_URL")?;
        let host = get_env_or_default("VENDORA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("VENDORA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("VENDORA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("VENDORA_PORT".to_string(), e.to_string()))?;

        let copywriter = CopywriterConfig::from_env();
        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_url,
            host,
            port,
            copywriter,
            sentry_dsn,
            sentry_environment,
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Returns a reference to the copywriter configuration, if available.
    ///
    /// Returns `None` if `COPYWRITER_API_KEY` was not set, which disables
    /// the AI routes.
    #[must_use]
    pub const fn copywriter(&self) -> Option<&CopywriterConfig> {
        self.copywriter.as_ref()
    }
}

impl CopywriterConfig {
    /// Load copywriter configuration from environment.
    ///
    /// Returns `None` if `COPYWRITER_API_KEY` is not set (AI routes disabled).
    fn from_env() -> Option<Self> {
        get_optional_env("COPYWRITER_API_KEY").map(|key| Self {
            api_key: SecretString::from(key),
            base_url: get_env_or_default("COPYWRITER_BASE_URL", DEFAULT_COPYWRITER_BASE_URL),
            model: get_env_or_default("COPYWRITER_MODEL", DEFAULT_COPYWRITER_MODEL),
        })
    }
}

/// Get database URL with fallback to generic `DATABASE_URL`.
fn get_database_url(primary_key: &str) -> Result<SecretString, ConfigError> {
    if let Ok(value) = std::env::var(primary_key) {
        return Ok(SecretString::from(value));
    }
    if let Ok(value) = std::env::var("DATABASE_URL") {
        return Ok(SecretString::from(value));
    }
    Err(ConfigError::MissingEnvVar(primary_key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copywriter_config_debug_redacts_key() {
        let config = CopywriterConfig {
            api_key: SecretString::from("sk-very-secret"),
            base_url: DEFAULT_COPYWRITER_BASE_URL.to_string(),
            model: DEFAULT_COPYWRITER_MODEL.to_string(),
        };

        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("sk-very-secret"));
    }
}
