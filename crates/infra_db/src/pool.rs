//! Database connection pool management
//!
//! The pool is the repository handle of the account and order services: it
//! is created once at startup, shared by every in-flight request, and closed
//! once at shutdown.

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::info;

use crate::error::DatabaseError;

/// Type alias for the PostgreSQL connection pool
pub type DatabasePool = PgPool;

/// Pool sizing for one service process
///
/// Every field is fed from the service environment. Connection lifetime and
/// idle reaping use sqlx defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    /// How long a request waits for a free connection before failing
    pub acquire_timeout: Duration,
}

impl DatabaseConfig {
    pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: Self::DEFAULT_MAX_CONNECTIONS,
            acquire_timeout: Self::DEFAULT_ACQUIRE_TIMEOUT,
        }
    }

    fn pool_options(&self) -> PgPoolOptions {
        PgPoolOptions::new()
            .max_connections(self.max_connections.max(1))
            .acquire_timeout(self.acquire_timeout)
    }
}

/// Opens the pool and verifies one connection
///
/// Failing to reach the server is `ConnectionFailed`, which the startup
/// retry treats as worth another attempt.
pub async fn create_pool(config: DatabaseConfig) -> Result<DatabasePool, DatabaseError> {
    let pool = config
        .pool_options()
        .connect(&config.url)
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(max_connections = config.max_connections, "Connected to postgres");
    Ok(pool)
}

/// Applies the embedded schema migrations
///
/// # Errors
///
/// Returns `DatabaseError::MigrationFailed` if any migration fails to apply
pub async fn run_migrations(pool: &DatabasePool) -> Result<(), DatabaseError> {
    info!("Running database migrations");
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
    info!("Database schema up to date");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_uses_defaults() {
        let config = DatabaseConfig::new("postgres://localhost/orders");

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_zero_pool_size_still_allows_one_connection() {
        let config = DatabaseConfig {
            max_connections: 0,
            ..DatabaseConfig::new("postgres://localhost/orders")
        };

        assert_eq!(config.pool_options().get_max_connections(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_server_is_connection_failure() {
        let config = DatabaseConfig {
            acquire_timeout: Duration::from_millis(200),
            ..DatabaseConfig::new("postgres://nobody@127.0.0.1:9/none")
        };

        let err = create_pool(config).await.unwrap_err();

        assert!(err.is_connection_error());
    }
}
