//! Application configuration loaded from the environment.
//!
//! A `.env` file is honoured when present. Every variable has a default
//! except `DATABASE_URL`, which is required only for the Postgres backend.

use std::env;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_POOL_SIZE: u32 = 8;

/// Errors raised while loading configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A required environment variable is not set.
    #[error("missing environment variable: {0}")]
    MissingEnvVar(String),

    /// An environment variable has an invalid value.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// The name of the environment variable.
        key: String,
        /// Why the value was rejected.
        message: String,
    },
}

/// Storage backend selected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process-local store; contents are lost on exit.
    Memory,
    /// `PostgreSQL` through a pooled diesel connection.
    Postgres {
        /// Connection URL.
        database_url: String,
        /// Maximum pool size.
        pool_size: u32,
    },
}

/// Runtime configuration for the task service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// HTTP bind host.
    pub app_host: String,
    /// HTTP bind port.
    pub app_port: u16,
    /// Selected storage backend.
    pub storage: StorageBackend,
    /// Whether to seed sample tasks into an empty store.
    pub seed_sample_tasks: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            app_host: DEFAULT_HOST.to_owned(),
            app_port: DEFAULT_PORT,
            storage: StorageBackend::Memory,
            seed_sample_tasks: false,
        }
    }
}

impl AppConfig {
    /// Loads configuration from `.env` and the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when a value cannot be parsed or
    /// `DATABASE_URL` is missing for the Postgres backend.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(err) = dotenvy::dotenv() {
            if !err.not_found() {
                tracing::warn!(error = %err, "ignoring unreadable .env file");
            }
        }
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let app_host = lookup("APP_HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let app_port = parse_or("APP_PORT", lookup("APP_PORT"), DEFAULT_PORT)?;
        let seed_sample_tasks = parse_flag("SEED_SAMPLE_TASKS", lookup("SEED_SAMPLE_TASKS"))?;

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "memory".to_owned());
        let storage = match backend.trim().to_ascii_lowercase().as_str() {
            "memory" => StorageBackend::Memory,
            "postgres" => StorageBackend::Postgres {
                database_url: lookup("DATABASE_URL")
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| ConfigError::MissingEnvVar("DATABASE_URL".to_owned()))?,
                pool_size: parse_pool_size(lookup("DB_POOL_SIZE"))?,
            },
            other => {
                return Err(ConfigError::InvalidValue {
                    key: "STORAGE_BACKEND".to_owned(),
                    message: format!("expected 'memory' or 'postgres', got '{other}'"),
                });
            }
        };

        Ok(Self {
            app_host,
            app_port,
            storage,
            seed_sample_tasks,
        })
    }

    /// Returns the `host:port` address to bind.
    #[must_use]
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.app_host, self.app_port)
    }
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    raw.map_or(Ok(default), |value| {
        value.trim().parse().map_err(|err: T::Err| ConfigError::InvalidValue {
            key: key.to_owned(),
            message: err.to_string(),
        })
    })
}

fn parse_pool_size(raw: Option<String>) -> Result<u32, ConfigError> {
    match parse_or("DB_POOL_SIZE", raw, DEFAULT_POOL_SIZE)? {
        0 => Err(ConfigError::InvalidValue {
            key: "DB_POOL_SIZE".to_owned(),
            message: "must be at least 1".to_owned(),
        }),
        size => Ok(size),
    }
}

fn parse_flag(key: &str, raw: Option<String>) -> Result<bool, ConfigError> {
    let Some(value) = raw else {
        return Ok(false);
    };
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(ConfigError::InvalidValue {
            key: key.to_owned(),
            message: format!("expected a boolean, got '{other}'"),
        }),
    }
}

#[cfg(test)]
mod tests;
