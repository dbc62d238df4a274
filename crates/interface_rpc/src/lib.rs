//! Service Transport
//!
//! Each domain service is exposed as a set of unary calls: one `POST` per
//! contract method, a JSON request body in, a JSON response body out. This
//! crate provides both ends of that transport.
//!
//! # Architecture
//!
//! - **Handlers**: decode a request, call the contract, encode the result
//! - **Clients**: implement the same contract traits by making the call
//!   over HTTP, so callers cannot tell local from remote
//! - **DTOs**: request/response bodies shared by both ends
//! - **Error Handling**: `ServiceError` travels as a status code plus an
//!   error body and is rebuilt on the client side
//!
//! Batching is not the transport's concern. A batched lookup is a single
//! call carrying a list of keys.
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_rpc::catalog_router;
//!
//! let app = catalog_router(Arc::new(CatalogService::new(repository)));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;
pub mod client;
pub mod paths;
pub mod runtime;

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower_http::trace::TraceLayer;

use domain_account::AccountApi;
use domain_catalog::CatalogApi;
use domain_order::OrderApi;

use crate::handlers::{account, catalog, health, order};
use crate::middleware::request_log_middleware;

pub use client::{AccountClient, CatalogClient, ClientConfig, OrderClient};
pub use error::RpcError;

/// Creates the router exposing the catalog contract
pub fn catalog_router(api: Arc<dyn CatalogApi>) -> Router {
    let routes = Router::new()
        .route(paths::catalog::PUT_PRODUCT, post(catalog::put_product))
        .route(paths::catalog::POST_PRODUCT, post(catalog::post_product))
        .route(paths::catalog::GET_PRODUCT, post(catalog::get_product))
        .route(paths::catalog::LIST_PRODUCTS, post(catalog::list_products))
        .route(paths::catalog::LIST_PRODUCTS_WITH_IDS, post(catalog::list_products_with_ids))
        .route(paths::catalog::SEARCH_PRODUCTS, post(catalog::search_products))
        .with_state(api);

    with_common_layers(routes)
}

/// Creates the router exposing the account contract
pub fn account_router(api: Arc<dyn AccountApi>) -> Router {
    let routes = Router::new()
        .route(paths::account::POST_ACCOUNT, post(account::post_account))
        .route(paths::account::GET_ACCOUNT, post(account::get_account))
        .route(paths::account::LIST_ACCOUNTS, post(account::list_accounts))
        .with_state(api);

    with_common_layers(routes)
}

/// Creates the router exposing the order contract
pub fn order_router(api: Arc<dyn OrderApi>) -> Router {
    let routes = Router::new()
        .route(paths::order::POST_ORDER, post(order::post_order))
        .route(paths::order::GET_ORDER, post(order::get_order))
        .route(paths::order::GET_ORDERS_FOR_ACCOUNT, post(order::get_orders_for_account))
        .route(paths::order::GET_ORDERS_FOR_ACCOUNTS, post(order::get_orders_for_accounts))
        .with_state(api);

    with_common_layers(routes)
}

fn with_common_layers(routes: Router) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .merge(routes)
        .layer(axum_middleware::from_fn(request_log_middleware))
        .layer(TraceLayer::new_for_http())
}
