//! Search Infrastructure
//!
//! Elasticsearch-backed implementation of the catalog `ProductRepository`,
//! spoken to over its REST API.
//!
//! # Persisted Layout
//!
//! One document per product in the catalog index, keyed by product ID,
//! containing only `{name, description, price}`. The ID is recovered from
//! each hit's `_id`.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_search::{ElasticConfig, ElasticProductRepository};
//!
//! let repository = ElasticProductRepository::connect(ElasticConfig::new(url)).await?;
//! let hits = repository.search_products("lamp", Page::new(0, 10)).await?;
//! ```

pub mod error;
pub mod elastic;
pub mod response;

pub use error::SearchError;
pub use elastic::{ElasticConfig, ElasticProductRepository};
