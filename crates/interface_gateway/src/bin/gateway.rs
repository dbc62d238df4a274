//! Gateway binary
//!
//! # Environment Variables
//!
//! * `ACCOUNT_SERVICE_URL` - account service address (default: localhost:8080)
//! * `CATALOG_SERVICE_URL` - catalog service address (default: localhost:8081)
//! * `ORDER_SERVICE_URL` - order service address (default: localhost:8082)
//! * `PORT` - Server port (default: 8080)
//! * `LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `REQUEST_TIMEOUT_MS` - per-query deadline (default: 30000)

use std::sync::Arc;

use interface_gateway::{config::GatewayConfig, create_router, Gateway, Services};
use interface_rpc::{runtime, AccountClient, CatalogClient, ClientConfig, OrderClient};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = GatewayConfig::from_env()?;
    runtime::init_tracing(&config.log_level);

    tracing::info!(
        account = %config.account_url,
        catalog = %config.catalog_url,
        order = %config.order_url,
        "Connecting to services"
    );

    let client_config = |address: &str| ClientConfig::new(address).timeout(config.request_timeout());
    let services = Services {
        account: Arc::new(AccountClient::new(&client_config(&config.account_url))?),
        catalog: Arc::new(CatalogClient::new(&client_config(&config.catalog_url))?),
        order: Arc::new(OrderClient::new(&client_config(&config.order_url))?),
    };

    let gateway = Arc::new(Gateway::new(services)?);
    let app = create_router(gateway, config.request_timeout());

    runtime::serve(&config.server_addr(), app).await
}
