//! Server configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TURNERA_DATABASE_URL` - `PostgreSQL` connection string (falls back to
//!   `DATABASE_URL`)
//! - `TURNERA_ADMIN_TOKEN` - Shared token for the `/admin` routes (min 16
//!   chars, must not be a placeholder)
//!
//! ## Optional
//! - `TURNERA_HOST` - Bind address (default: 127.0.0.1)
//! - `TURNERA_PORT` - Listen port (default: 3000)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;

const MIN_ADMIN_TOKEN_LENGTH: usize = 16;

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
    "insert",
    "enter-",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Booking server configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// `PostgreSQL` database connection URL (contains password)
    pub database_url: SecretString,
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shared token required by the `/admin` routes
    pub admin_token: SecretString,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if the admin token fails validation.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let database_url = get_database_url("TURNERA_DATABASE_URL")?;
        let host = get_env_or_default("TURNERA_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar("TURNERA_HOST".to_string(), e.to_string()))?;
        let port = get_env_or_default("TURNERA_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| ConfigError::InvalidEnvVar("TURNERA_PORT".to_string(), e.to_string()))?;

        let admin_token = get_required_env("TURNERA_ADMIN_TOKEN").map(SecretString::from)?;
        validate_admin_token(&admin_token, "TURNERA_ADMIN_TOKEN")?;

        let sentry_dsn = get_optional_env("SENTRY_DSN");
        let sentry_environment = get_optional_env("SENTRY_ENVIRONMENT");

        Ok(Self {
            database_url,
            host,
            port,
            admin_token,
            sentry_dsn,
            sentry_environment,
        })
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

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
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

/// Validate that the admin token is long enough and not a placeholder.
fn validate_admin_token(token: &SecretString, var_name: &str) -> Result<(), ConfigError> {
    let value = token.expose_secret();

    if value.len() < MIN_ADMIN_TOKEN_LENGTH {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "must be at least {} characters (got {})",
                MIN_ADMIN_TOKEN_LENGTH,
                value.len()
            ),
        ));
    }

    let lower = value.to_lowercase();
    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_admin_token_too_short() {
        let token = SecretString::from("short");
        assert!(matches!(
            validate_admin_token(&token, "TEST_VAR"),
            Err(ConfigError::InsecureSecret(_, _))
        ));
    }

    #[test]
    fn test_validate_admin_token_placeholder() {
        let token = SecretString::from("changeme-changeme-changeme");
        assert!(validate_admin_token(&token, "TEST_VAR").is_err());

        let token = SecretString::from("your-admin-token-here");
        assert!(validate_admin_token(&token, "TEST_VAR").is_err());
    }

    #[test]
    fn test_validate_admin_token_valid() {
        let token = SecretString::from("kK2mN9pQ4rT7vW1xZ5cB8dF3gH6jL0");
        assert!(validate_admin_token(&token, "TEST_VAR").is_ok());
    }

    #[test]
    fn test_socket_addr() {
        let config = ServerConfig {
            database_url: SecretString::from("postgres://localhost/test"),
            host: "127.0.0.1".parse().unwrap(),
            port: 3000,
            admin_token: SecretString::from("kK2mN9pQ4rT7vW1xZ5cB8d"),
            sentry_dsn: None,
            sentry_environment: None,
        };

        let addr = config.socket_addr();
        assert_eq!(addr.ip().to_string(), "127.0.0.1");
        assert_eq!(addr.port(), 3000);
    }
}
