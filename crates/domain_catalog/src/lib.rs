//! Catalog Domain
//!
//! This crate owns everything the system knows about products:
//!
//! - **Product**: the catalog record and its persisted document layout
//! - **ProductRepository**: the storage port offering exact-key lookup,
//!   ID-batch lookup, paginated listing, and relevance search
//! - **CatalogApi**: the remote-callable contract other services and the
//!   gateway consume
//! - **CatalogService**: input validation in front of a repository
//!
//! # Key Recovery
//!
//! The persisted document never stores the product ID. Every read recovers
//! the ID from the key the document was found under, so a product returned
//! for key `k` always has `id == k`.

pub mod product;
pub mod ports;
pub mod service;
pub mod adapters;

pub use product::{Product, ProductDocument, NewProduct};
pub use ports::{ProductRepository, CatalogApi};
pub use service::CatalogService;
pub use adapters::InMemoryProductRepository;

/// Entity name used in `NotFound` errors
pub const PRODUCT_ENTITY: &str = "Product";
