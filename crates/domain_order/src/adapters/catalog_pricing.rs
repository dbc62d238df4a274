//! Pricing through the catalog contract

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use core_kernel::ServiceResult;
use domain_catalog::CatalogApi;

use crate::ports::ProductPricing;

/// `ProductPricing` backed by one batched catalog lookup
pub struct CatalogPricing {
    catalog: Arc<dyn CatalogApi>,
}

impl CatalogPricing {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl ProductPricing for CatalogPricing {
    async fn prices(&self, product_ids: &[String]) -> ServiceResult<HashMap<String, f64>> {
        let products = self.catalog.list_products_with_ids(product_ids).await?;
        Ok(products
            .into_iter()
            .map(|product| (product.id, product.price))
            .collect())
    }
}
