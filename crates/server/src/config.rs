//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `HARBORVIEW_HOST` - Bind address (default: 127.0.0.1)
//! - `HARBORVIEW_PORT` - Listen port (default: 5000)
//! - `CORS_ORIGIN` - Allowed browser origin(s), comma separated, or `*`
//!   (default: `http://localhost:3000`)
//! - `DATA_FILE` - Path of the JSON data file (default: `data/db.json`)
//! - `STATIC_DIR` - Directory served under `/public` (default: `public`)
//! - `ADMIN_KEY` - Shared secret for the `x-admin-key` header. When unset the
//!   admin routes are open, which is only acceptable for local development.
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Transaction sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use axum::http::HeaderValue;
use secrecy::SecretString;
use thiserror::Error;

const MIN_ADMIN_KEY_LENGTH: usize = 16;
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Which browser origins may call the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigin {
    /// Any origin (`*`). Credentials are not allowed in this mode.
    Any,
    /// An explicit list of origins.
    List(Vec<HeaderValue>),
}

/// Server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Allowed CORS origins
    pub cors_origin: CorsOrigin,
    /// Path of the JSON data file
    pub data_file: PathBuf,
    /// Directory served under `/public`
    pub static_dir: PathBuf,
    /// Shared admin key; `None` disables the admin guard
    pub admin_key: Option<SecretString>,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Fraction of errors reported to Sentry
    pub sentry_sample_rate: f32,
    /// Fraction of requests traced in Sentry
    pub sentry_traces_sample_rate: f32,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is malformed or if `ADMIN_KEY`
    /// fails validation (length, placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("HARBORVIEW_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("HARBORVIEW_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("HARBORVIEW_PORT", "5000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("HARBORVIEW_PORT".to_string(), e.to_string())
            })?;
        let cors_origin = parse_cors_origin(&get_env_or_default(
            "CORS_ORIGIN",
            "http://localhost:3000",
        ))?;
        let data_file = PathBuf::from(get_env_or_default("DATA_FILE", "data/db.json"));
        let static_dir = PathBuf::from(get_env_or_default("STATIC_DIR", "public"));

        let admin_key = match get_optional_env("ADMIN_KEY") {
            Some(value) => Some(validate_admin_key(value, "ADMIN_KEY")?),
            None => None,
        };

        Ok(Self {
            host,
            port,
            cors_origin,
            data_file,
            static_dir,
            admin_key,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: get_rate("SENTRY_SAMPLE_RATE", 1.0)?,
            sentry_traces_sample_rate: get_rate("SENTRY_TRACES_SAMPLE_RATE", 0.0)?,
        })
    }

    /// Configuration for local runs and tests: loopback, open admin routes.
    #[must_use]
    pub fn local(data_file: impl Into<PathBuf>) -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 5000,
            cors_origin: CorsOrigin::List(vec![HeaderValue::from_static(
                "http://localhost:3000",
            )]),
            data_file: data_file.into(),
            static_dir: PathBuf::from("public"),
            admin_key: None,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}

/// Get a sampling rate in `0.0..=1.0`.
fn get_rate(key: &str, default: f32) -> Result<f32, ConfigError> {
    let Some(raw) = get_optional_env(key) else {
        return Ok(default);
    };
    let rate = raw
        .parse::<f32>()
        .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))?;
    if !(0.0..=1.0).contains(&rate) {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            format!("must be between 0.0 and 1.0 (got {rate})"),
        ));
    }
    Ok(rate)
}

/// Parse `CORS_ORIGIN` into a wildcard or a list of header values.
fn parse_cors_origin(raw: &str) -> Result<CorsOrigin, ConfigError> {
    if raw.trim() == "*" {
        return Ok(CorsOrigin::Any);
    }

    let origins = raw
        .split(',')
        .map(str::trim)
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| {
                ConfigError::InvalidEnvVar("CORS_ORIGIN".to_string(), e.to_string())
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    if origins.is_empty() {
        return Err(ConfigError::InvalidEnvVar(
            "CORS_ORIGIN".to_string(),
            "no origins given".to_string(),
        ));
    }
    Ok(CorsOrigin::List(origins))
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is long enough, not a placeholder, and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    if secret.len() < MIN_ADMIN_KEY_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_KEY_LENGTH,
                secret.len()
            ),
        ));
    }

    let lower = secret.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated key."
            ),
        ));
    }

    Ok(())
}

/// Validate the admin key and wrap it as a secret.
fn validate_admin_key(value: String, var_name: &str) -> Result<SecretString, ConfigError> {
    validate_secret_strength(&value, var_name)?;
    Ok(SecretString::from(value))
}
