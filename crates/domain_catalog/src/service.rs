//! Catalog service
//!
//! Validates requests, normalises paging, and forwards to the repository.
//! Errors from the repository are returned unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{generate_id, Page, ServiceError, ServiceResult};

use crate::ports::{CatalogApi, ProductRepository};
use crate::product::{NewProduct, Product};

/// Catalog service backed by any `ProductRepository`
pub struct CatalogService {
    repository: Arc<dyn ProductRepository>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn ProductRepository>) -> Self {
        Self { repository }
    }

    /// Returns the repository handle, used at shutdown to close it
    pub fn repository(&self) -> &Arc<dyn ProductRepository> {
        &self.repository
    }
}

#[async_trait]
impl CatalogApi for CatalogService {
    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn put_product(&self, product: Product) -> ServiceResult<()> {
        if product.id.trim().is_empty() {
            return Err(ServiceError::validation("product id must not be empty"));
        }
        NewProduct::new(product.name.clone(), product.description.clone(), product.price).check()?;
        self.repository.put_product(&product).await
    }

    #[instrument(skip(self, product), fields(name = %product.name))]
    async fn post_product(&self, product: NewProduct) -> ServiceResult<Product> {
        product.check()?;
        let product = Product::new(generate_id(), product.name, product.description, product.price);
        self.repository.put_product(&product).await?;
        debug!(product_id = %product.id, "Product stored");
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        if id.trim().is_empty() {
            return Err(ServiceError::validation("product id must not be empty"));
        }
        self.repository.get_product_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        self.repository.list_products(page.capped()).await
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.list_products_with_ids(ids).await
    }

    #[instrument(skip(self))]
    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>> {
        if query.trim().is_empty() {
            return self.repository.list_products(page.capped()).await;
        }
        self.repository.search_products(query, page.capped()).await
    }
}
