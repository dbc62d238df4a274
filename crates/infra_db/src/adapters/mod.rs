//! Domain Adapters
//!
//! Implementations of the account and order storage ports on PostgreSQL.
//! Each adapter translates domain values to rows, calls its row repository,
//! and maps `DatabaseError` into `ServiceError`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresOrderAdapter;
//! use domain_order::OrderRepository;
//! use std::sync::Arc;
//!
//! let orders: Arc<dyn OrderRepository> = Arc::new(PostgresOrderAdapter::new(pool));
//! let placed = orders.get_orders_for_accounts(&account_ids).await?;
//! ```

pub mod account;
pub mod order;

pub use account::PostgresAccountAdapter;
pub use order::PostgresOrderAdapter;
