//! Test Utilities Crate
//!
//! Provides shared test infrastructure, fixtures, and helpers for the
//! commerce test suite.
//!
//! # Modules
//!
//! - `fixtures`: Pre-built products, accounts and orders
//! - `generators`: Fake catalogs and property-based strategies
//! - `counting`: Contract wrappers that count calls, for asserting how
//!   many round-trips a resolution made
//! - `assertions`: Custom assertion helpers for domain types
//! - `database`: A disposable PostgreSQL container for adapter tests

pub mod fixtures;
pub mod generators;
pub mod counting;
pub mod assertions;
pub mod database;

pub use fixtures::*;
pub use generators::*;
pub use counting::*;
pub use assertions::*;
pub use database::TestDatabase;
