//! Search store response bodies
//!
//! Multi-record responses are decoded hit by hit. A hit whose source does
//! not decode as a product is logged and skipped so one bad document cannot
//! fail a whole page or batch.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use domain_catalog::{Product, ProductDocument};

/// Body of `GET /{index}/_doc/{id}`
#[derive(Debug, Deserialize)]
pub struct GetResponse {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    #[serde(default)]
    pub found: Option<bool>,
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

/// Body of `POST /{index}/_search`
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    pub hits: HitsEnvelope,
}

#[derive(Debug, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default)]
    pub score: Option<f64>,
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

/// Body of `POST /{index}/_mget`
#[derive(Debug, Deserialize)]
pub struct MultiGetResponse {
    #[serde(default)]
    pub docs: Vec<MultiGetDoc>,
}

#[derive(Debug, Deserialize)]
pub struct MultiGetDoc {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub found: bool,
    #[serde(rename = "_source")]
    pub source: Option<Value>,
}

impl SearchResponse {
    /// Products in hit order, which is descending relevance for scored queries
    pub fn into_products(self) -> Vec<Product> {
        self.hits
            .hits
            .into_iter()
            .filter_map(|hit| decode_source(hit.id, hit.source))
            .collect()
    }
}

impl MultiGetResponse {
    /// Products for the documents that exist and decode
    pub fn into_products(self) -> Vec<Product> {
        self.docs
            .into_iter()
            .filter(|doc| doc.found)
            .filter_map(|doc| decode_source(doc.id, doc.source))
            .collect()
    }
}

fn decode_source(id: String, source: Option<Value>) -> Option<Product> {
    let Some(source) = source else {
        warn!(product_id = %id, "Skipping product hit without source");
        return None;
    };
    match ProductDocument::decode(&source) {
        Ok(document) => Some(document.into_product(id)),
        Err(err) => {
            warn!(product_id = %id, error = %err, "Skipping malformed product document");
            None
        }
    }
}
