//! Elasticsearch Product Repository
//!
//! Talks to the store's REST API with a shared `reqwest::Client`, which is
//! safe for concurrent use and pools its connections. Nothing in here
//! retries: a failed request is reported to the caller as-is.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::{debug, info, instrument};

use core_kernel::{Page, ServiceError, ServiceResult};
use domain_catalog::{Product, ProductDocument, ProductRepository, PRODUCT_ENTITY};

use crate::error::SearchError;
use crate::response::{GetResponse, MultiGetResponse, SearchResponse};

/// Index holding one document per product
pub const DEFAULT_INDEX: &str = "catalog";

/// Connection settings for the search store
#[derive(Debug, Clone)]
pub struct ElasticConfig {
    /// Base URL, e.g. "http://localhost:9200"
    pub url: String,
    pub index: String,
    pub request_timeout: Duration,
}

impl ElasticConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            index: DEFAULT_INDEX.to_string(),
            request_timeout: Duration::from_secs(10),
        }
    }

    pub fn index(mut self, index: impl Into<String>) -> Self {
        self.index = index.into();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Product repository backed by an Elasticsearch index
#[derive(Debug)]
pub struct ElasticProductRepository {
    client: Client,
    base_url: Url,
    index: String,
    closed: AtomicBool,
}

impl ElasticProductRepository {
    /// Builds the client without contacting the store
    pub fn new(config: ElasticConfig) -> Result<Self, SearchError> {
        let base_url = Url::parse(&config.url).map_err(|e| SearchError::InvalidUrl(e.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(SearchError::InvalidUrl(config.url));
        }
        let client = Client::builder().timeout(config.request_timeout).build()?;
        Ok(Self {
            client,
            base_url,
            index: config.index,
            closed: AtomicBool::new(false),
        })
    }

    /// Builds the client, checks the store answers, and creates the index if missing
    pub async fn connect(config: ElasticConfig) -> Result<Self, SearchError> {
        let repository = Self::new(config)?;
        repository.ensure_index().await?;
        info!(url = %repository.base_url, index = %repository.index, "Connected to search store");
        Ok(repository)
    }

    async fn ensure_index(&self) -> Result<(), SearchError> {
        let response = self.request(Method::HEAD, &[])?.send().await?;
        match response.status() {
            status if status.is_success() => Ok(()),
            StatusCode::NOT_FOUND => {
                let mapping = json!({
                    "mappings": {
                        "properties": {
                            "name": {"type": "text"},
                            "description": {"type": "text"},
                            "price": {"type": "double", "index": false}
                        }
                    }
                });
                let response = self.request(Method::PUT, &[])?.json(&mapping).send().await?;
                check_status(response).await.map(|_| ())
            }
            status => Err(SearchError::Status {
                status,
                body: String::new(),
            }),
        }
    }

    /// Request against `{base}/{index}/{segments...}`
    fn request(&self, method: Method, segments: &[&str]) -> Result<RequestBuilder, SearchError> {
        let url = endpoint(&self.base_url, &self.index, segments)?;
        Ok(self.client.request(method, url))
    }

    fn ensure_open(&self) -> ServiceResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(ServiceError::Closed)
        } else {
            Ok(())
        }
    }

    async fn search(&self, query: Value, page: Page) -> Result<Vec<Product>, SearchError> {
        let body = json!({
            "query": query,
            "from": page.skip,
            "size": page.take,
        });
        let response = self.request(Method::POST, &["_search"])?.json(&body).send().await?;
        let response: SearchResponse = decode_body(check_status(response).await?).await?;
        Ok(response.into_products())
    }
}

#[async_trait]
impl ProductRepository for ElasticProductRepository {
    async fn close(&self) -> ServiceResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn put_product(&self, product: &Product) -> ServiceResult<()> {
        self.ensure_open()?;
        let (id, document) = product.clone().into_document();
        let result: Result<(), SearchError> = async {
            let response = self
                .request(Method::PUT, &["_doc", &id])?
                .json(&document)
                .send()
                .await?;
            check_status(response).await?;
            Ok(())
        }
        .await;
        result.map_err(SearchError::into_write_error)
    }

    #[instrument(skip(self))]
    async fn get_product_by_id(&self, id: &str) -> ServiceResult<Product> {
        self.ensure_open()?;
        let result: Result<GetResponse, SearchError> = async {
            let response = self.request(Method::GET, &["_doc", id])?.send().await?;
            let status = response.status();
            if status == StatusCode::NOT_FOUND {
                // A missing document answers 404 with `found: false`; a missing index does not
                let body = response.text().await?;
                return serde_json::from_str::<GetResponse>(&body)
                    .ok()
                    .filter(|doc| doc.found == Some(false))
                    .ok_or(SearchError::Status { status, body });
            }
            decode_body(check_status(response).await?).await
        }
        .await;

        let response = result.map_err(SearchError::into_read_error)?;
        match (response.found, response.source) {
            (Some(true), Some(source)) => Ok(ProductDocument::decode(&source)?.into_product(id)),
            _ => Err(ServiceError::not_found(PRODUCT_ENTITY, id)),
        }
    }

    #[instrument(skip(self))]
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        self.ensure_open()?;
        if page.take == 0 {
            return Ok(Vec::new());
        }
        self.search(json!({"match_all": {}}), page)
            .await
            .map_err(SearchError::into_read_error)
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>> {
        self.ensure_open()?;
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        let result: Result<Vec<Product>, SearchError> = async {
            let response = self
                .request(Method::POST, &["_mget"])?
                .json(&json!({ "ids": ids }))
                .send()
                .await?;
            let response: MultiGetResponse = decode_body(check_status(response).await?).await?;
            Ok(response.into_products())
        }
        .await;
        let products = result.map_err(SearchError::into_read_error)?;
        debug!(requested = ids.len(), found = products.len(), "Batch lookup finished");
        Ok(products)
    }

    #[instrument(skip(self))]
    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>> {
        self.ensure_open()?;
        if page.take == 0 {
            return Ok(Vec::new());
        }
        let query = json!({
            "multi_match": {
                "query": query,
                "fields": ["name", "description"]
            }
        });
        self.search(query, page)
            .await
            .map_err(SearchError::into_read_error)
    }
}

fn endpoint(base: &Url, index: &str, segments: &[&str]) -> Result<Url, SearchError> {
    let mut url = base.clone();
    url.path_segments_mut()
        .map_err(|_| SearchError::InvalidUrl(base.to_string()))?
        .pop_if_empty()
        .push(index)
        .extend(segments);
    Ok(url)
}

async fn check_status(response: Response) -> Result<Response, SearchError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(SearchError::Status { status, body })
    }
}

async fn decode_body<T: DeserializeOwned>(response: Response) -> Result<T, SearchError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| SearchError::Response(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_escapes_ids() {
        let base = Url::parse("http://localhost:9200/").unwrap();

        let url = endpoint(&base, "catalog", &["_doc", "a/b c"]).unwrap();

        assert_eq!(url.as_str(), "http://localhost:9200/catalog/_doc/a%2Fb%20c");
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let base = Url::parse("http://search.internal/es").unwrap();

        let url = endpoint(&base, "catalog", &["_search"]).unwrap();

        assert_eq!(url.as_str(), "http://search.internal/es/catalog/_search");
    }

    #[test]
    fn test_rejects_non_base_url() {
        assert!(matches!(
            ElasticProductRepository::new(ElasticConfig::new("mailto:ops@example.com")),
            Err(SearchError::InvalidUrl(_))
        ));
    }

    #[tokio::test]
    async fn test_closed_repository_fails_without_request() {
        let repository = ElasticProductRepository::new(ElasticConfig::new("http://127.0.0.1:9")).unwrap();

        repository.close().await.unwrap();

        assert_eq!(
            repository.get_product_by_id("p1").await.unwrap_err(),
            ServiceError::Closed
        );
    }

    #[tokio::test]
    async fn test_zero_take_skips_the_store() {
        let repository = ElasticProductRepository::new(ElasticConfig::new("http://127.0.0.1:9")).unwrap();

        assert!(repository.list_products(Page::new(0, 0)).await.unwrap().is_empty());
        assert!(repository.search_products("lamp", Page::new(3, 0)).await.unwrap().is_empty());
    }
}
