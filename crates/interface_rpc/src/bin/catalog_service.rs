//! Catalog service binary
//!
//! # Environment Variables
//!
//! * `DATABASE_URL` - Elasticsearch base URL (required)
//! * `PORT` - Server port (default: 8080)
//! * `LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `CONNECT_ATTEMPTS` / `CONNECT_BACKOFF_MS` - startup retry bounds

use std::sync::Arc;

use core_kernel::retry_fixed;
use domain_catalog::{CatalogService, ProductRepository};
use infra_search::{ElasticConfig, ElasticProductRepository};
use interface_rpc::{catalog_router, config::ServiceConfig, runtime};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = ServiceConfig::from_env()?;
    runtime::init_tracing(&config.log_level);

    tracing::info!(port = config.port, "Starting catalog service");

    let repository = retry_fixed(config.retry_policy(), "connecting to elasticsearch", |_| {
        ElasticProductRepository::connect(ElasticConfig::new(config.database_url.clone()))
    })
    .await?;

    let repository: Arc<dyn ProductRepository> = Arc::new(repository);
    let service = Arc::new(CatalogService::new(repository.clone()));

    let served = runtime::serve(&config.server_addr(), catalog_router(service)).await;
    repository.close().await?;
    served
}
