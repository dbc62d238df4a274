//! Order service binary
//!
//! # Environment Variables
//!
//! * `DATABASE_URL` - PostgreSQL connection string (required)
//! * `CATALOG_SERVICE_URL` - catalog service address used for pricing (required)
//! * `PORT` - Server port (default: 8080)
//! * `LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `CONNECT_ATTEMPTS` / `CONNECT_BACKOFF_MS` - startup retry bounds
//! * `DB_MAX_CONNECTIONS` / `DB_ACQUIRE_TIMEOUT_MS` - pool sizing

use std::sync::Arc;

use core_kernel::retry_fixed;
use domain_order::{CatalogPricing, OrderRepository, OrderService};
use infra_db::{create_pool, run_migrations, PostgresOrderAdapter};
use interface_rpc::{config::ServiceConfig, order_router, runtime, CatalogClient, ClientConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env()?;
    runtime::init_tracing(&config.log_level);

    let catalog = CatalogClient::new(&ClientConfig::new(config.catalog_url()?))?;

    tracing::info!(port = config.port, "Starting order service");

    let pool = retry_fixed(config.retry_policy(), "connecting to postgres", |_| {
        create_pool(config.database_config())
    })
    .await?;
    run_migrations(&pool).await?;

    let repository: Arc<dyn OrderRepository> = Arc::new(PostgresOrderAdapter::new(pool));
    let pricing = Arc::new(CatalogPricing::new(Arc::new(catalog)));
    let service = Arc::new(OrderService::new(repository.clone(), pricing));

    let served = runtime::serve(&config.server_addr(), order_router(service)).await;
    repository.close().await?;
    served
}
