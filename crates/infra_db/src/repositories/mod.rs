//! Repository implementations
//!
//! SQL and row types for each table group. Queries are built at runtime with
//! `sqlx::query_as` and mapped through `FromRow`.

pub mod account;
pub mod order;

pub use account::{AccountRow, AccountRowRepository};
pub use order::{OrderLineRow, OrderRowRepository};
