//! Catalog Adapters
//!
//! In-process implementations of the catalog ports. The production
//! inverted-index adapter lives in `infra_search`.

pub mod in_memory;

pub use in_memory::InMemoryProductRepository;
