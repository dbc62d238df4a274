//! Service configuration
//!
//! Read from the process environment without a prefix, so `DATABASE_URL`
//! lands in `database_url` and `PORT` in `port`. The catalog service reads
//! its search store address from `DATABASE_URL` as well.

use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

use core_kernel::RetryPolicy;
use infra_db::DatabaseConfig;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(transparent)]
    Load(#[from] config::ConfigError),

    #[error("{0} environment variable is required")]
    Missing(&'static str),
}

/// Configuration shared by the account, catalog and order services
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceConfig {
    /// Datastore address; required
    #[serde(default)]
    pub database_url: String,
    /// Listen port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Log level used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Startup connection attempts before giving up
    #[serde(default = "default_connect_attempts")]
    pub connect_attempts: u32,
    /// Pause between startup connection attempts
    #[serde(default = "default_connect_backoff_ms")]
    pub connect_backoff_ms: u64,
    /// Catalog address used by the order service for pricing
    #[serde(default)]
    pub catalog_service_url: Option<String>,
    /// Upper bound of the PostgreSQL pool
    #[serde(default = "default_db_max_connections")]
    pub db_max_connections: u32,
    /// Wait for a free pooled connection before a call fails
    #[serde(default = "default_db_acquire_timeout_ms")]
    pub db_acquire_timeout_ms: u64,
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_connect_attempts() -> u32 {
    RetryPolicy::default().max_attempts
}

fn default_connect_backoff_ms() -> u64 {
    RetryPolicy::default().delay.as_millis() as u64
}

fn default_db_max_connections() -> u32 {
    DatabaseConfig::DEFAULT_MAX_CONNECTIONS
}

fn default_db_acquire_timeout_ms() -> u64 {
    DatabaseConfig::DEFAULT_ACQUIRE_TIMEOUT.as_millis() as u64
}

impl ServiceConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, ConfigError> {
        let source = config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?;
        Self::from_config(source)
    }

    /// Deserializes and validates an already assembled configuration
    pub fn from_config(source: config::Config) -> Result<Self, ConfigError> {
        let config: Self = source.try_deserialize()?;
        if config.database_url.trim().is_empty() {
            return Err(ConfigError::Missing("DATABASE_URL"));
        }
        Ok(config)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.connect_attempts,
            Duration::from_millis(self.connect_backoff_ms),
        )
    }

    /// Pool settings for the account and order services
    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database_url.clone(),
            max_connections: self.db_max_connections,
            acquire_timeout: Duration::from_millis(self.db_acquire_timeout_ms),
        }
    }

    /// Catalog address for the order service
    pub fn catalog_url(&self) -> Result<&str, ConfigError> {
        self.catalog_service_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .ok_or(ConfigError::Missing("CATALOG_SERVICE_URL"))
    }
}
