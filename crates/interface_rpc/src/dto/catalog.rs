//! Catalog call bodies

use serde::{Deserialize, Serialize};

use domain_catalog::Product;

/// Body of `SearchProducts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchProductsRequest {
    pub query: String,
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "super::default_take")]
    pub take: u64,
}

/// Acknowledges `PutProduct` with the key written
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PutProductResponse {
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub product: Product,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductsResponse {
    pub products: Vec<Product>,
}
