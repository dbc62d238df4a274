//! Infrastructure Database Layer
//!
//! PostgreSQL storage for the account and order services using SQLx.
//!
//! # Architecture
//!
//! - `repositories` hold the SQL and the row types
//! - `adapters` implement the domain storage ports on top of them and
//!   translate `DatabaseError` into `ServiceError`
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresAccountAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new(database_url)).await?;
//! let accounts = PostgresAccountAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DatabaseConfig, create_pool, run_migrations};
pub use error::DatabaseError;
pub use adapters::{PostgresAccountAdapter, PostgresOrderAdapter};
