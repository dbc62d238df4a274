use async_trait::async_trait;

use core_kernel::{Page, ServiceResult};
use domain_catalog::{CatalogApi, NewProduct, Product};

use super::{ClientConfig, RpcClient};
use crate::dto::catalog::{PutProductResponse, ProductResponse, ProductsResponse, SearchProductsRequest};
use crate::dto::{IdRequest, IdsRequest, PageRequest};
use crate::paths::catalog as path;

/// Remote catalog contract
#[derive(Debug, Clone)]
pub struct CatalogClient {
    rpc: RpcClient,
}

impl CatalogClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            rpc: RpcClient::new("catalog", config)?,
        })
    }
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn put_product(&self, product: Product) -> ServiceResult<()> {
        let _: PutProductResponse = self.rpc.call(path::PUT_PRODUCT, &product).await?;
        Ok(())
    }

    async fn post_product(&self, product: NewProduct) -> ServiceResult<Product> {
        let response: ProductResponse = self.rpc.call(path::POST_PRODUCT, &product).await?;
        Ok(response.product)
    }

    async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        let request = IdRequest { id: id.to_string() };
        let response: ProductResponse = self.rpc.call(path::GET_PRODUCT, &request).await?;
        Ok(response.product)
    }

    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        let response: ProductsResponse = self
            .rpc
            .call(path::LIST_PRODUCTS, &PageRequest::from(page))
            .await?;
        Ok(response.products)
    }

    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let request = IdsRequest { ids: ids.to_vec() };
        let response: ProductsResponse = self.rpc.call(path::LIST_PRODUCTS_WITH_IDS, &request).await?;
        Ok(response.products)
    }

    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>> {
        let request = SearchProductsRequest {
            query: query.to_string(),
            skip: page.skip,
            take: page.take,
        };
        let response: ProductsResponse = self.rpc.call(path::SEARCH_PRODUCTS, &request).await?;
        Ok(response.products)
    }
}

