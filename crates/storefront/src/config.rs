//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; defaults suit local development.
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL for the storefront (default: http://localhost:3000)
//! - `STOREFRONT_DATA_DIR` - Directory for the newsletter list files (default: data)
//! - `STOREFRONT_CHECKOUT_DELAY_MS` - Simulated checkout processing time (default: 2000)
//! - `STOREFRONT_NEWSLETTER_DELAY_MS` - Simulated signup processing time (default: 1000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: &str = "3000";
const DEFAULT_BASE_URL: &str = "http://localhost:3000";
const DEFAULT_DATA_DIR: &str = "data";
const DEFAULT_CHECKOUT_DELAY_MS: &str = "2000";
const DEFAULT_NEWSLETTER_DELAY_MS: &str = "1000";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Where the JSON list store keeps its files
    pub data_dir: PathBuf,
    /// How long the simulated checkout takes
    pub checkout_delay: Duration,
    /// How long the simulated newsletter signup takes
    pub newsletter_delay: Duration,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment tag
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            checkout_delay: Duration::from_millis(2000),
            newsletter_delay: Duration::from_millis(1000),
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_value::<IpAddr>(
            "STOREFRONT_HOST",
            &get_env_or_default("STOREFRONT_HOST", DEFAULT_HOST),
        )?;
        let port = parse_value::<u16>(
            "STOREFRONT_PORT",
            &get_env_or_default("STOREFRONT_PORT", DEFAULT_PORT),
        )?;
        let base_url = validate_base_url(&get_env_or_default(
            "STOREFRONT_BASE_URL",
            DEFAULT_BASE_URL,
        ))?;
        let data_dir = PathBuf::from(get_env_or_default("STOREFRONT_DATA_DIR", DEFAULT_DATA_DIR));
        let checkout_delay = parse_millis(
            "STOREFRONT_CHECKOUT_DELAY_MS",
            &get_env_or_default("STOREFRONT_CHECKOUT_DELAY_MS", DEFAULT_CHECKOUT_DELAY_MS),
        )?;
        let newsletter_delay = parse_millis(
            "STOREFRONT_NEWSLETTER_DELAY_MS",
            &get_env_or_default(
                "STOREFRONT_NEWSLETTER_DELAY_MS",
                DEFAULT_NEWSLETTER_DELAY_MS,
            ),
        )?;

        let sentry_sample_rate = parse_rate(
            "SENTRY_SAMPLE_RATE",
            &get_env_or_default("SENTRY_SAMPLE_RATE", "1.0"),
        )?;
        let sentry_traces_sample_rate = parse_rate(
            "SENTRY_TRACES_SAMPLE_RATE",
            &get_env_or_default("SENTRY_TRACES_SAMPLE_RATE", "0.0"),
        )?;

        Ok(Self {
            host,
            port,
            base_url,
            data_dir,
            checkout_delay,
            newsletter_delay,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate,
            sentry_traces_sample_rate,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the site is served over HTTPS (controls secure cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Parse a raw value, naming the variable in the error.
fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Parse a whole number of milliseconds.
fn parse_millis(key: &str, raw: &str) -> Result<Duration, ConfigError> {
    parse_value::<u64>(key, raw).map(Duration::from_millis)
}

/// Parse a sample rate in `[0, 1]`.
fn parse_rate(key: &str, raw: &str) -> Result<f32, ConfigError> {
    let rate = parse_value::<f32>(key, raw)?;
    if (0.0..=1.0).contains(&rate) {
        Ok(rate)
    } else {
        Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ))
    }
}

/// Require an absolute http(s) URL with a host; strips a trailing slash.
fn validate_base_url(raw: &str) -> Result<String, ConfigError> {
    let invalid =
        |reason: String| ConfigError::InvalidEnvVar("STOREFRONT_BASE_URL".to_string(), reason);

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.host_str().is_none() {
        return Err(invalid("missing host".to_string()));
    }

    Ok(url.as_str().trim_end_matches('/').to_string())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_port() {
        assert_eq!(parse_value::<u16>("STOREFRONT_PORT", " 8080 ").unwrap(), 8080);
        let err = parse_value::<u16>("STOREFRONT_PORT", "eighty").unwrap_err();
        assert!(err.to_string().contains("STOREFRONT_PORT"));
    }

    #[test]
    fn test_parse_millis() {
        assert_eq!(
            parse_millis("X", "250").unwrap(),
            Duration::from_millis(250)
        );
        assert!(parse_millis("X", "-1").is_err());
    }

    #[test]
    fn test_parse_rate_bounds() {
        assert!((parse_rate("X", "0.25").unwrap() - 0.25).abs() < f32::EPSILON);
        assert!(parse_rate("X", "1.5").is_err());
        assert!(parse_rate("X", "-0.1").is_err());
    }

    #[test]
    fn test_validate_base_url() {
        assert_eq!(
            validate_base_url("https://shop.example.com/").unwrap(),
            "https://shop.example.com"
        );
        assert!(validate_base_url("ftp://shop.example.com").is_err());
        assert!(validate_base_url("not a url").is_err());
    }

    #[test]
    fn test_socket_addr() {
        let config = StorefrontConfig::default();
        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn test_is_secure() {
        let mut config = StorefrontConfig::default();
        assert!(!config.is_secure());
        config.base_url = "https://cafe.example.com".to_string();
        assert!(config.is_secure());
    }
}
