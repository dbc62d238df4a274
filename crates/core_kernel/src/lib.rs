//! Core Kernel - Foundational types shared by every commerce service
//!
//! This crate provides the building blocks used across the domain crates,
//! the infrastructure adapters, and the gateway:
//! - The contract-level error taxonomy (`ServiceError`)
//! - Pagination windows with the service page cap
//! - Identifier generation for entities whose keys are assigned by a service
//! - Bounded fixed-backoff retry for startup connection establishment

pub mod error;
pub mod identifiers;
pub mod pagination;
pub mod retry;

pub use error::{ServiceError, ServiceResult};
pub use identifiers::generate_id;
pub use pagination::{Page, DEFAULT_TAKE, MAX_TAKE};
pub use retry::{retry_fixed, RetryPolicy};
