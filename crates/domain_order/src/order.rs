//! Order records

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One product line of an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderedProduct {
    pub product_id: String,
    pub quantity: u32,
}

impl OrderedProduct {
    pub fn new(product_id: impl Into<String>, quantity: u32) -> Self {
        Self {
            product_id: product_id.into(),
            quantity,
        }
    }
}

/// A placed order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: f64,
    pub products: Vec<OrderedProduct>,
}

impl Order {
    /// Product keys referenced by this order, in line order
    pub fn product_ids(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(|line| line.product_id.as_str())
    }
}

/// Input for placing an order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewOrder {
    pub account_id: String,
    pub products: Vec<OrderedProduct>,
}

impl NewOrder {
    pub fn new(account_id: impl Into<String>, products: Vec<OrderedProduct>) -> Self {
        Self {
            account_id: account_id.into(),
            products,
        }
    }

    /// Drops zero-quantity lines and merges repeated products
    pub fn normalized_lines(&self) -> Vec<OrderedProduct> {
        let mut merged: BTreeMap<&str, u32> = BTreeMap::new();
        for line in self.products.iter().filter(|line| line.quantity > 0) {
            let quantity = merged.entry(line.product_id.as_str()).or_default();
            *quantity = quantity.saturating_add(line.quantity);
        }
        merged
            .into_iter()
            .map(|(product_id, quantity)| OrderedProduct::new(product_id, quantity))
            .collect()
    }
}
