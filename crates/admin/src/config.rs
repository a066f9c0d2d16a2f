//! Dashboard configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional; the defaults describe a local development run.
//!
//! - `CRM_HOST` - Bind address (default: 127.0.0.1)
//! - `CRM_PORT` - Listen port (default: 3001)
//! - `CRM_BASE_URL` - Public URL (default: `http://localhost:3001`). An
//!   `https://` URL turns on `Secure` session cookies.
//! - `CRM_CREDENTIALS_FILE` - YAML file replacing the built-in demo credentials
//! - `CRM_SESSION_EXPIRY_MINUTES` - Session inactivity expiry (default: 1440)
//! - `CRM_LOGIN_DELAY_MS` - Simulated authentication latency (default: 800)
//! - `CRM_LINK_DELAY_MS` - Simulated affiliate link generation latency (default: 1500)
//! - `CRM_SAVE_DELAY_MS` - Simulated order save latency (default: 1000)
//! - `CRM_LOG_JSON` - Emit JSON logs when set to `1` or `true`
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Sentry error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Sentry traces sample rate (default: 1.0)

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use thiserror::Error;

const DEFAULT_PORT: u16 = 3001;
const DEFAULT_BASE_URL: &str = "http://localhost:3001";
const DEFAULT_SESSION_EXPIRY_MINUTES: u64 = 24 * 60;
const DEFAULT_LOGIN_DELAY_MS: u64 = 800;
const DEFAULT_LINK_DELAY_MS: u64 = 1500;
const DEFAULT_SAVE_DELAY_MS: u64 = 1000;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Simulated latencies standing in for a future remote backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LatencyConfig {
    /// Delay before an authentication attempt resolves.
    pub login: Duration,
    /// Delay before an affiliate link is generated.
    pub affiliate_link: Duration,
    /// Delay before a new order is saved.
    pub save_order: Duration,
}

impl LatencyConfig {
    /// No simulated latency at all.
    #[must_use]
    pub const fn none() -> Self {
        Self {
            login: Duration::ZERO,
            affiliate_link: Duration::ZERO,
            save_order: Duration::ZERO,
        }
    }
}

impl Default for LatencyConfig {
    fn default() -> Self {
        Self {
            login: Duration::from_millis(DEFAULT_LOGIN_DELAY_MS),
            affiliate_link: Duration::from_millis(DEFAULT_LINK_DELAY_MS),
            save_order: Duration::from_millis(DEFAULT_SAVE_DELAY_MS),
        }
    }
}

/// Dashboard application configuration.
#[derive(Debug, Clone)]
pub struct AdminConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the dashboard
    pub base_url: String,
    /// Optional YAML credentials file (demo credentials when absent)
    pub credentials_file: Option<PathBuf>,
    /// Session inactivity expiry
    pub session_expiry: Duration,
    /// Simulated backend latencies
    pub latency: LatencyConfig,
    /// Emit JSON-formatted logs
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g., "development", "staging", "production")
    pub sentry_environment: Option<String>,
    /// Sentry error sample rate (0.0 to 1.0)
    pub sentry_sample_rate: f32,
    /// Sentry traces sample rate for performance monitoring (0.0 to 1.0)
    pub sentry_traces_sample_rate: f32,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: DEFAULT_PORT,
            base_url: DEFAULT_BASE_URL.to_string(),
            credentials_file: None,
            session_expiry: Duration::from_secs(DEFAULT_SESSION_EXPIRY_MINUTES * 60),
            latency: LatencyConfig::default(),
            log_json: false,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 1.0,
        }
    }
}

impl AdminConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = parse_env("CRM_HOST", IpAddr::V4(Ipv4Addr::LOCALHOST))?;
        let port = parse_env("CRM_PORT", DEFAULT_PORT)?;
        let base_url = get_env_or_default("CRM_BASE_URL", DEFAULT_BASE_URL);
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "CRM_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }

        let credentials_file = get_optional_env("CRM_CREDENTIALS_FILE").map(PathBuf::from);
        let session_expiry = session_expiry(parse_env(
            "CRM_SESSION_EXPIRY_MINUTES",
            DEFAULT_SESSION_EXPIRY_MINUTES,
        )?)?;

        let latency = LatencyConfig {
            login: Duration::from_millis(parse_env("CRM_LOGIN_DELAY_MS", DEFAULT_LOGIN_DELAY_MS)?),
            affiliate_link: Duration::from_millis(parse_env(
                "CRM_LINK_DELAY_MS",
                DEFAULT_LINK_DELAY_MS,
            )?),
            save_order: Duration::from_millis(parse_env("CRM_SAVE_DELAY_MS", DEFAULT_SAVE_DELAY_MS)?),
        };

        let log_json = get_optional_env("CRM_LOG_JSON")
            .is_some_and(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"));

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = get_optional_env("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = get_optional_env("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            host,
            port,
            base_url,
            credentials_file,
            session_expiry,
            latency,
            log_json,
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

    /// Whether the dashboard is served over HTTPS (enables `Secure` cookies).
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, falling back to `default` when unset.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| parse_value(key, &raw))
}

fn parse_value<T>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim()
        .parse::<T>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
}

/// Session inactivity timeout from a minute count; zero and overflow are rejected.
fn session_expiry(minutes: u64) -> Result<Duration, ConfigError> {
    let invalid = |reason: &str| {
        ConfigError::InvalidEnvVar("CRM_SESSION_EXPIRY_MINUTES".to_string(), reason.to_string())
    };
    if minutes == 0 {
        return Err(invalid("must be greater than zero"));
    }
    minutes
        .checked_mul(60)
        .map(Duration::from_secs)
        .ok_or_else(|| invalid("value is too large"))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_session_expiry_bounds() {
        assert_eq!(session_expiry(30).unwrap(), Duration::from_secs(1800));
        assert!(matches!(
            session_expiry(0),
            Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "CRM_SESSION_EXPIRY_MINUTES"
        ));
        assert!(matches!(
            session_expiry(u64::MAX),
            Err(ConfigError::InvalidEnvVar(ref key, _)) if key == "CRM_SESSION_EXPIRY_MINUTES"
        ));
    }

    #[test]
    fn test_default_config() {
        let config = AdminConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3001");
        assert!(!config.is_secure());
        assert_eq!(config.latency.login, Duration::from_millis(800));
        assert_eq!(config.session_expiry, Duration::from_secs(86_400));
    }

    #[test]
    fn test_is_secure() {
        let config = AdminConfig {
            base_url: "https://crm.example.com".to_string(),
            ..AdminConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_parse_value() {
        let port: u16 = parse_value("CRM_PORT", " 8080 ").unwrap();
        assert_eq!(port, 8080);

        let err = parse_value::<u16>("CRM_PORT", "eighty").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidEnvVar(ref key, _) if key == "CRM_PORT"));

        let host: IpAddr = parse_value("CRM_HOST", "0.0.0.0").unwrap();
        assert!(host.is_unspecified());
    }

    #[test]
    fn test_latency_none() {
        let latency = LatencyConfig::none();
        assert!(latency.login.is_zero());
        assert!(latency.affiliate_link.is_zero());
        assert!(latency.save_order.is_zero());
    }
}
