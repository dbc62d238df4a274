//! Contract-level error taxonomy shared by every service
//!
//! Repositories, domain services, remote clients, and the gateway all speak
//! `ServiceError`. Callers branch on the variant: `NotFound` means the key is
//! known not to exist, while `Query`/`Write`/`Unavailable` mean the answer
//! could not be obtained at all.

use std::fmt;
use thiserror::Error;

/// Result alias used by every contract method
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Error returned by repository ports and service contracts
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ServiceError {
    /// The requested key does not exist in the owning store
    #[error("Not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// The request was rejected before reaching the store
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// The store or transport failed while reading
    #[error("Query failed: {message}")]
    Query { message: String },

    /// The store or transport failed while writing
    #[error("Write failed: {message}")]
    Write { message: String },

    /// A single record could not be decoded
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// The remote service or store could not be reached
    #[error("Service unavailable: {service}: {message}")]
    Unavailable { service: String, message: String },

    /// The repository handle was closed at shutdown
    #[error("Repository closed")]
    Closed,
}

impl ServiceError {
    pub fn not_found(entity: impl Into<String>, id: impl fmt::Display) -> Self {
        ServiceError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation {
            message: message.into(),
        }
    }

    pub fn query(message: impl fmt::Display) -> Self {
        ServiceError::Query {
            message: message.to_string(),
        }
    }

    pub fn write(message: impl fmt::Display) -> Self {
        ServiceError::Write {
            message: message.to_string(),
        }
    }

    pub fn decode(message: impl fmt::Display) -> Self {
        ServiceError::Decode {
            message: message.to_string(),
        }
    }

    pub fn unavailable(service: impl Into<String>, message: impl fmt::Display) -> Self {
        ServiceError::Unavailable {
            service: service.into(),
            message: message.to_string(),
        }
    }

    /// Returns true if the key is known not to exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// Returns true if a later attempt could succeed without changing the request
    pub fn is_transient(&self) -> bool {
        matches!(self, ServiceError::Unavailable { .. })
    }

    /// Short machine-readable kind, used on the wire
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::Validation { .. } => "validation_error",
            ServiceError::Query { .. } => "query_error",
            ServiceError::Write { .. } => "write_error",
            ServiceError::Decode { .. } => "decode_error",
            ServiceError::Unavailable { .. } => "unavailable",
            ServiceError::Closed => "closed",
        }
    }
}
