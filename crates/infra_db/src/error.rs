//! Database error types
//!
//! Errors raised by the SQL layer, and their translation into the
//! contract-level `ServiceError` the domain ports return.

use thiserror::Error;

use core_kernel::ServiceError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// A stored value does not fit the domain type
    #[error("Invalid stored value: {0}")]
    InvalidValue(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// The pool was closed at shutdown
    #[error("Connection pool closed")]
    PoolClosed,
}

impl DatabaseError {
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        DatabaseError::NotFound {
            entity,
            id: id.into(),
        }
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted | DatabaseError::PoolClosed
        )
    }

    /// Translates a failure during a read into a contract error
    pub fn into_read_error(self) -> ServiceError {
        match self {
            DatabaseError::NotFound { entity, id } => ServiceError::not_found(entity, id),
            DatabaseError::InvalidValue(message) => ServiceError::decode(message),
            other => other.into_common(ServiceError::query),
        }
    }

    /// Translates a failure during a write into a contract error
    pub fn into_write_error(self) -> ServiceError {
        match self {
            DatabaseError::ConstraintViolation(message) => ServiceError::validation(message),
            other => other.into_common(ServiceError::write),
        }
    }

    fn into_common(self, fallback: fn(String) -> ServiceError) -> ServiceError {
        match self {
            DatabaseError::PoolClosed => ServiceError::Closed,
            err if err.is_connection_error() => ServiceError::unavailable("postgres", err),
            err => fallback(err.to_string()),
        }
    }
}

/// Maps SQLx errors to the more specific variants based on the PostgreSQL error code
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match error {
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed => DatabaseError::PoolClosed,
            sqlx::Error::Io(err) => DatabaseError::ConnectionFailed(err.to_string()),
            sqlx::Error::Tls(err) => DatabaseError::ConnectionFailed(err.to_string()),
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23514") | Some("23502") => {
                        DatabaseError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                }
            }
            sqlx::Error::ColumnDecode { index, source } => {
                DatabaseError::InvalidValue(format!("column {}: {}", index, source))
            }
            other => DatabaseError::QueryFailed(other.to_string()),
        }
    }
}
