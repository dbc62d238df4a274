//! Account service binary
//!
//! # Environment Variables
//!
//! * `DATABASE_URL` - PostgreSQL connection string (required)
//! * `PORT` - Server port (default: 8080)
//! * `LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `CONNECT_ATTEMPTS` / `CONNECT_BACKOFF_MS` - startup retry bounds
//! * `DB_MAX_CONNECTIONS` / `DB_ACQUIRE_TIMEOUT_MS` - pool sizing

use std::sync::Arc;

use core_kernel::retry_fixed;
use domain_account::{AccountRepository, AccountService};
use infra_db::{create_pool, run_migrations, PostgresAccountAdapter};
use interface_rpc::{account_router, config::ServiceConfig, runtime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env()?;
    runtime::init_tracing(&config.log_level);

    tracing::info!(port = config.port, "Starting account service");

    let pool = retry_fixed(config.retry_policy(), "connecting to postgres", |_| {
        create_pool(config.database_config())
    })
    .await?;
    run_migrations(&pool).await?;

    let repository: Arc<dyn AccountRepository> = Arc::new(PostgresAccountAdapter::new(pool));
    let service = Arc::new(AccountService::new(repository.clone()));

    let served = runtime::serve(&config.server_addr(), account_router(service)).await;
    repository.close().await?;
    served
}
