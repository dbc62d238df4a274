//! Gateway configuration

use std::time::Duration;

use serde::Deserialize;

/// Service addresses and listen settings
///
/// Read from `ACCOUNT_SERVICE_URL`, `CATALOG_SERVICE_URL`,
/// `ORDER_SERVICE_URL`, `PORT`, `LOG_LEVEL` and `REQUEST_TIMEOUT_MS`.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
    #[serde(rename = "account_service_url", default = "default_account_url")]
    pub account_url: String,
    #[serde(rename = "catalog_service_url", default = "default_catalog_url")]
    pub catalog_url: String,
    #[serde(rename = "order_service_url", default = "default_order_url")]
    pub order_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Deadline for a whole query, and for each service call within it
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_account_url() -> String {
    "localhost:8080".to_string()
}

fn default_catalog_url() -> String {
    "localhost:8081".to_string()
}

fn default_order_url() -> String {
    "localhost:8082".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_request_timeout_ms() -> u64 {
    30_000
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            account_url: default_account_url(),
            catalog_url: default_catalog_url(),
            order_url: default_order_url(),
            port: default_port(),
            log_level: default_log_level(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl GatewayConfig {
    /// Loads configuration from environment
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::default().try_parsing(true))
            .build()?
            .try_deserialize()
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("0.0.0.0:{}", self.port)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}
