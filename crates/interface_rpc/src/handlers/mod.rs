//! Call handlers
//!
//! Every handler takes the contract from router state, decodes the JSON
//! body, and returns the contract's result as JSON. Malformed bodies are
//! answered with a `bad_request` error body instead of axum's plain-text
//! rejection.

pub mod health;
pub mod catalog;
pub mod account;
pub mod order;
