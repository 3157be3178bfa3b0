//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use tracing::Level;

/// Upper bound for `TOKEN_TTL_SECS`: one year.
const MAX_TOKEN_TTL_SECS: u64 = 365 * 24 * 60 * 60;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing the environment variable {0}")]
    MissingVar(String),
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    pub log_level: Level,
    /// The single process-wide secret used to sign session tokens.
    pub token_secret: String,
    pub token_ttl: chrono::Duration,
    pub cors_origin: String,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Only load from .env in non-test mode to avoid contamination.
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        // --- Load Server Settings ---
        let bind_address_str =
            lookup("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:3000".to_string());
        let bind_address = bind_address_str.parse::<SocketAddr>().map_err(|e| {
            ConfigError::InvalidValue("BIND_ADDRESS".to_string(), e.to_string())
        })?;

        let log_level_str = lookup("RUST_LOG").unwrap_or_else(|| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let cors_origin =
            lookup("CORS_ORIGIN").unwrap_or_else(|| "http://localhost:3000".to_string());

        // --- Load Token Settings ---
        let token_secret = lookup("TOKEN_SECRET")
            .ok_or_else(|| ConfigError::MissingVar("TOKEN_SECRET".to_string()))?;
        if token_secret.is_empty() {
            return Err(ConfigError::InvalidValue(
                "TOKEN_SECRET".to_string(),
                "the secret must not be empty".to_string(),
            ));
        }

        let token_ttl_secs = parse_number(&lookup, "TOKEN_TTL_SECS", 3600)?;
        if token_ttl_secs == 0 || token_ttl_secs > MAX_TOKEN_TTL_SECS {
            return Err(ConfigError::InvalidValue(
                "TOKEN_TTL_SECS".to_string(),
                format!("the token lifetime must be between 1 and {} seconds", MAX_TOKEN_TTL_SECS),
            ));
        }
        let token_ttl = chrono::Duration::try_seconds(token_ttl_secs as i64).ok_or_else(|| {
            ConfigError::InvalidValue(
                "TOKEN_TTL_SECS".to_string(),
                "the token lifetime is out of range".to_string(),
            )
        })?;

        Ok(Self {
            bind_address,
            log_level,
            token_secret,
            token_ttl,
            cors_origin,
        })
    }
}

fn parse_number<F>(lookup: &F, key: &str, default: u64) -> Result<u64, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .parse::<u64>()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), e.to_string())),
    }
}
