//! Transport error handling
//!
//! A `ServiceError` crosses the wire as an HTTP status plus an
//! `ErrorResponse` body. The client rebuilds the same variant from the
//! body's `error` kind, so `NotFound` stays distinguishable end to end.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use core_kernel::ServiceError;

/// Error returned by a call handler
#[derive(Debug, Error)]
pub enum RpcError {
    #[error(transparent)]
    Service(#[from] ServiceError),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<JsonRejection> for RpcError {
    fn from(rejection: JsonRejection) -> Self {
        RpcError::BadRequest(rejection.body_text())
    }
}

/// Error response body
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl ErrorResponse {
    /// Rebuilds the contract error a peer service reported
    pub fn into_service_error(self, service: &str) -> ServiceError {
        match self.error.as_str() {
            "not_found" => ServiceError::NotFound {
                entity: self.entity.unwrap_or_default(),
                id: self.id.unwrap_or_default(),
            },
            "validation_error" | "bad_request" => ServiceError::Validation { message: self.message },
            "write_error" => ServiceError::Write { message: self.message },
            "decode_error" => ServiceError::Decode { message: self.message },
            "closed" => ServiceError::Closed,
            "unavailable" => ServiceError::unavailable(service, self.message),
            _ => ServiceError::Query { message: self.message },
        }
    }
}

/// Status code a contract error travels with
pub fn status_for(err: &ServiceError) -> StatusCode {
    match err {
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ServiceError::Unavailable { .. } | ServiceError::Closed => StatusCode::SERVICE_UNAVAILABLE,
        ServiceError::Query { .. } | ServiceError::Write { .. } | ServiceError::Decode { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl IntoResponse for RpcError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            RpcError::BadRequest(message) => (
                StatusCode::BAD_REQUEST,
                ErrorResponse {
                    error: "bad_request".to_string(),
                    message,
                    entity: None,
                    id: None,
                },
            ),
            RpcError::Service(err) => {
                let status = status_for(&err);
                let (entity, id) = match &err {
                    ServiceError::NotFound { entity, id } => (Some(entity.clone()), Some(id.clone())),
                    _ => (None, None),
                };
                let message = match &err {
                    ServiceError::Validation { message }
                    | ServiceError::Query { message }
                    | ServiceError::Write { message }
                    | ServiceError::Decode { message }
                    | ServiceError::Unavailable { message, .. } => message.clone(),
                    other => other.to_string(),
                };
                (
                    status,
                    ErrorResponse {
                        error: err.kind().to_string(),
                        message,
                        entity,
                        id,
                    },
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
