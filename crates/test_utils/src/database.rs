//! Disposable PostgreSQL for adapter tests
//!
//! Every `TestDatabase` runs its own container, so tests never see each
//! other's rows. The schema is not created here; callers apply the real
//! migrations to the pool.

use std::time::Duration;

use sqlx::postgres::{PgPool, PgPoolOptions};
use testcontainers::{runners::AsyncRunner, ContainerAsync};
use testcontainers_modules::postgres::Postgres;

pub type TestDatabaseError = Box<dyn std::error::Error + Send + Sync>;

/// A running PostgreSQL container and a pool connected to it
///
/// The container stops when this value is dropped.
pub struct TestDatabase {
    _container: ContainerAsync<Postgres>,
    url: String,
    pool: PgPool,
}

impl TestDatabase {
    /// Starts a container and waits until it accepts connections
    pub async fn start() -> Result<Self, TestDatabaseError> {
        let container = Postgres::default().start().await?;
        let host = container.get_host().await?;
        let port = container.get_host_port_ipv4(5432).await?;
        let url = connection_url(&host.to_string(), port);

        let pool = PgPoolOptions::new()
            .max_connections(4)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&url)
            .await?;

        Ok(Self {
            _container: container,
            url,
            pool,
        })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

/// The module image runs with user, password and database all `postgres`
fn connection_url(host: &str, port: u16) -> String {
    format!("postgres://postgres:postgres@{host}:{port}/postgres")
}
