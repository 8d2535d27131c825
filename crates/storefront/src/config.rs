//! Client configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Optional
//! - `BUY01_API_URL` - Backend base URL (default: `https://localhost:8443`)
//! - `BUY01_SESSION_FILE` - Session storage file (default: `$HOME/.buy01/session.json`)
//! - `BUY01_REQUEST_TIMEOUT_SECS` - Per-request timeout (default: 30)
//! - `BUY01_UPLOAD_DELAY_MS` - Delay between sequential image requests (default: 100)
//! - `BUY01_ACCEPT_INVALID_CERTS` - Accept self-signed TLS certificates (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_API_URL: &str = "https://localhost:8443";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_UPLOAD_DELAY_MS: u64 = 100;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront client configuration.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Backend base URL; every endpoint is resolved against it
    pub api_url: Url,
    /// File backing the persistent session storage
    pub session_file: PathBuf,
    /// Timeout applied to each HTTP request
    pub request_timeout: Duration,
    /// Pause between sequential image upload/delete requests
    pub upload_delay: Duration,
    /// Accept self-signed certificates (local backend)
    pub accept_invalid_certs: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_url", &self.api_url.as_str())
            .field("session_file", &self.session_file)
            .field("request_timeout", &self.request_timeout)
            .field("upload_delay", &self.upload_delay)
            .field("accept_invalid_certs", &self.accept_invalid_certs)
            .field("sentry_dsn", &self.sentry_dsn.as_ref().map(|_| "[REDACTED]"))
            .field("sentry_environment", &self.sentry_environment)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_url = parse_api_url(&get_env_or_default("BUY01_API_URL", DEFAULT_API_URL))?;
        let session_file = get_optional_env("BUY01_SESSION_FILE")
            .map_or_else(default_session_file, PathBuf::from);
        let request_timeout = Duration::from_secs(get_parsed_or_default(
            "BUY01_REQUEST_TIMEOUT_SECS",
            DEFAULT_TIMEOUT_SECS,
        )?);
        let upload_delay = Duration::from_millis(get_parsed_or_default(
            "BUY01_UPLOAD_DELAY_MS",
            DEFAULT_UPLOAD_DELAY_MS,
        )?);
        let accept_invalid_certs = get_parsed_or_default("BUY01_ACCEPT_INVALID_CERTS", false)?;

        Ok(Self {
            api_url,
            session_file,
            request_timeout,
            upload_delay,
            accept_invalid_certs,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Configuration pointing at `api_url` with every other setting at its default.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `api_url` is not an http(s) URL.
    pub fn for_api_url(api_url: &str) -> Result<Self, ConfigError> {
        Ok(Self {
            api_url: parse_api_url(api_url)?,
            session_file: default_session_file(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            upload_delay: Duration::from_millis(DEFAULT_UPLOAD_DELAY_MS),
            accept_invalid_certs: false,
            sentry_dsn: None,
            sentry_environment: None,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse an environment variable, falling back to `default` when unset.
fn get_parsed_or_default<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Validate the backend base URL.
fn parse_api_url(raw: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw.trim())
        .map_err(|e| ConfigError::InvalidEnvVar("BUY01_API_URL".to_string(), e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidEnvVar(
            "BUY01_API_URL".to_string(),
            format!("unsupported scheme '{}'", url.scheme()),
        ));
    }
    Ok(url)
}

/// `$HOME/.buy01/session.json`, or a file in the working directory without `HOME`.
fn default_session_file() -> PathBuf {
    std::env::var_os("HOME").map_or_else(
        || PathBuf::from(".buy01-session.json"),
        |home| PathBuf::from(home).join(".buy01").join("session.json"),
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_api_url_accepts_http_and_https() {
        assert!(parse_api_url("http://127.0.0.1:8080").is_ok());
        assert!(parse_api_url("https://localhost:8443").is_ok());
    }

    #[test]
    fn test_parse_api_url_rejects_other_schemes() {
        let err = parse_api_url("ftp://example.com").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(_, _)));
    }

    #[test]
    fn test_parse_api_url_rejects_garbage() {
        assert!(parse_api_url("not a url").is_err());
    }

    #[test]
    fn test_for_api_url_uses_defaults() {
        let config = StorefrontConfig::for_api_url("http://localhost:8090").unwrap();
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.upload_delay, Duration::from_millis(100));
        assert!(!config.accept_invalid_certs);
        assert!(config.sentry_dsn.is_none());
    }

    #[test]
    fn test_debug_redacts_sentry_dsn() {
        let mut config = StorefrontConfig::for_api_url("http://localhost:8090").unwrap();
        config.sentry_dsn = Some("https://public@sentry.example/1".to_string());

        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("public@sentry.example"));
        assert!(debug_output.contains("localhost:8090"));
    }
}
