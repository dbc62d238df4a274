//! Aggregation Gateway
//!
//! Exposes one query graph over the account, catalog and order services.
//! Each service contributes a schema fragment; the gateway composes them
//! and adds the two relational edges that cross service boundaries.
//!
//! # Architecture
//!
//! - **graph**: document parser, schema composition, batched execution
//! - **fragments**: the per-service types and root fields, plus the edges
//! - **gateway**: composes the schema and runs requests
//! - **handlers**: `POST /query` and `GET /health`
//!
//! Cross-service fields are resolved one graph level at a time, so a
//! query for N accounts with their orders and products costs one call per
//! level rather than one per record.
//!
//! # Example
//!
//! ```rust,ignore
//! let gateway = Gateway::new(Services { account, catalog, order })?;
//! let app = create_router(Arc::new(gateway), Duration::from_secs(30));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod fragments;
pub mod node;
pub mod gateway;
pub mod handlers;

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

pub use error::{GatewayError, GraphError, ResolutionError, SchemaError};
pub use gateway::{Gateway, GraphRequest, GraphResponse, Services};

/// Creates the gateway router
///
/// Requests still running after `request_timeout` are dropped, which
/// cancels their outstanding service calls.
pub fn create_router(gateway: Arc<Gateway>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/query", post(handlers::query))
        .route("/health", get(handlers::health_check))
        .with_state(gateway)
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(TraceLayer::new_for_http())
}
