//! Catalog Domain Ports
//!
//! Two seams live here:
//!
//! - `ProductRepository` is the storage port. The catalog service only ever
//!   talks to the store through it, so the inverted-index engine behind it
//!   can be swapped without touching callers.
//! - `CatalogApi` is the remote-callable contract. The in-process
//!   `CatalogService` implements it, and so does the RPC client the gateway
//!   and the order service use.
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_catalog::{CatalogApi, CatalogService, InMemoryProductRepository};
//! use std::sync::Arc;
//!
//! let repository = Arc::new(InMemoryProductRepository::new());
//! let catalog: Arc<dyn CatalogApi> = Arc::new(CatalogService::new(repository));
//! let products = catalog.list_products_with_ids(&ids).await?;
//! ```

use async_trait::async_trait;

use core_kernel::{Page, ServiceResult};

use crate::product::{NewProduct, Product};

/// Storage port for the product index
///
/// Implementations must be safe for concurrent use by many in-flight
/// requests. Store and transport errors are returned as-is; nothing here
/// retries.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    /// Releases the underlying handle; later calls fail with `ServiceError::Closed`
    async fn close(&self) -> ServiceResult<()>;

    /// Upserts the full document at key `product.id`
    async fn put_product(&self, product: &Product) -> ServiceResult<()>;

    /// Exact lookup; `ServiceError::NotFound` when no document exists at `id`
    async fn get_product_by_id(&self, id: &str) -> ServiceResult<Product>;

    /// Default-ranked window over the whole corpus
    ///
    /// Malformed documents inside the window are skipped.
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>>;

    /// Batched exact lookup
    ///
    /// Keys with no document are omitted rather than failing the call, and
    /// result order is unspecified. Callers re-index by `Product::id`.
    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>>;

    /// Relevance-ranked match over name and description, highest score first
    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>>;
}

/// Remote-callable catalog contract
#[async_trait]
pub trait CatalogApi: Send + Sync + 'static {
    /// Upserts the full product at its externally assigned key; idempotent
    async fn put_product(&self, product: Product) -> ServiceResult<()>;

    /// Creates a product under a freshly generated ID
    async fn post_product(&self, product: NewProduct) -> ServiceResult<Product>;

    async fn get_product(&self, id: &str) -> ServiceResult<Product>;

    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>>;

    /// One call for the whole key set; missing keys are omitted
    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>>;

    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>>;
}
