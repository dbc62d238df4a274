//! Search store error types

use reqwest::StatusCode;
use thiserror::Error;

use core_kernel::ServiceError;

/// Errors raised while talking to the search store
#[derive(Debug, Error)]
pub enum SearchError {
    /// The request never produced a response
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The store answered with a non-success status
    #[error("Search store returned {status}: {body}")]
    Status { status: StatusCode, body: String },

    /// The response body did not have the expected shape
    #[error("Unexpected response: {0}")]
    Response(String),

    /// The configured base URL cannot carry a path
    #[error("Invalid search store URL: {0}")]
    InvalidUrl(String),
}

impl SearchError {
    fn is_connection_error(&self) -> bool {
        match self {
            SearchError::Transport(err) => err.is_connect() || err.is_timeout(),
            SearchError::Status { status, .. } => *status == StatusCode::SERVICE_UNAVAILABLE,
            _ => false,
        }
    }

    /// Translates a failure during a read into a contract error
    pub fn into_read_error(self) -> ServiceError {
        if self.is_connection_error() {
            ServiceError::unavailable("elasticsearch", self)
        } else {
            ServiceError::query(self)
        }
    }

    /// Translates a failure during a write into a contract error
    pub fn into_write_error(self) -> ServiceError {
        if self.is_connection_error() {
            ServiceError::unavailable("elasticsearch", self)
        } else {
            ServiceError::write(self)
        }
    }
}
