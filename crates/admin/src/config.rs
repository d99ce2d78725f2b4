//! Application configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `IMS_DATABASE_PATH` - SQLite database file (default: ims.db)
//! - `IMS_HOST` - Bind address (default: 127.0.0.1)
//! - `IMS_PORT` - Listen port (default: 5000)
//! - `IMS_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: `http://127.0.0.1:5000`)
//! - `IMS_STATIC_DIR` - Directory served under `/static` (default: crates/admin/static)
//! - `IMS_SEED_SAMPLE_DATA` - Load the bundled sample data when the database
//!   file is first created (default: true)
//! - `IMS_LOG_JSON` - Emit JSON logs instead of text (default: false)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 1.0)

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use thiserror::Error;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Inventory web application configuration.
#[derive(Debug, Clone)]
pub struct ImsConfig {
    /// Path of the SQLite database file
    pub database_path: PathBuf,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the application
    pub base_url: String,
    /// Directory containing stylesheets and other static assets
    pub static_dir: PathBuf,
    /// Whether to load the bundled sample data into a freshly created database
    pub seed_sample_data: bool,
    /// Whether logs are written as JSON
    pub log_json: bool,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment (e.g. "production", "staging")
    pub sentry_environment: Option<String>,
    /// Fraction of error events sent to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of transactions sent to Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ImsConfig {
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

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but cannot be parsed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let database_path = PathBuf::from(env.get_or_default("IMS_DATABASE_PATH", "ims.db"));
        let host = env
            .get_or_default("IMS_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("IMS_HOST".to_string(), e.to_string()))?;
        let port = env
            .get_or_default("IMS_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("IMS_PORT".to_string(), e.to_string()))?;
        let base_url = env
            .get("IMS_BASE_URL")
            .unwrap_or_else(|| format!("http://{}", SocketAddr::new(host, port)));
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::InvalidEnvVar(
                "IMS_BASE_URL".to_string(),
                "must start with http:// or https://".to_string(),
            ));
        }
        let static_dir = PathBuf::from(env.get_or_default("IMS_STATIC_DIR", "crates/admin/static"));
        let seed_sample_data = env.get_bool("IMS_SEED_SAMPLE_DATA", true)?;
        let log_json = env.get_bool("IMS_LOG_JSON", false)?;

        let sentry_dsn = env.get("SENTRY_DSN").filter(|dsn| !dsn.is_empty());
        let sentry_environment = env.get("SENTRY_ENVIRONMENT");
        let sentry_sample_rate = env
            .get("SENTRY_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);
        let sentry_traces_sample_rate = env
            .get("SENTRY_TRACES_SAMPLE_RATE")
            .and_then(|s| s.parse().ok())
            .unwrap_or(1.0);

        Ok(Self {
            database_path,
            host,
            port,
            base_url,
            static_dir,
            seed_sample_data,
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

    /// Whether cookies should carry the `Secure` attribute.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Get an optional variable.
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key)
    }

    /// Get a variable with a default value.
    fn get_or_default(&self, key: &str, default: &str) -> String {
        self.get(key).unwrap_or_else(|| default.to_string())
    }

    /// Get a boolean flag (`1/0`, `true/false`, `yes/no`).
    fn get_bool(&self, key: &str, default: bool) -> Result<bool, ConfigError> {
        let Some(value) = self.get(key) else {
            return Ok(default);
        };
        match value.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            other => Err(ConfigError::InvalidEnvVar(
                key.to_string(),
                format!("expected a boolean, got '{other}'"),
            )),
        }
    }
}
