//! HTTP handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};
use serde::Serialize;

use crate::error::GraphError;
use crate::gateway::{Gateway, GraphRequest, GraphResponse};

/// Runs one query document
///
/// Always answers 200 with a response body; failures are in `errors`.
pub async fn query(
    State(gateway): State<Arc<Gateway>>,
    payload: Result<Json<GraphRequest>, JsonRejection>,
) -> Json<GraphResponse> {
    match payload {
        Ok(Json(request)) => Json(gateway.execute(request).await),
        Err(rejection) => Json(GraphResponse::rejected(GraphError::new(rejection.body_text()))),
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
