//! In-memory inverted-index product repository
//!
//! Stores raw JSON documents keyed by product ID, next to a term index over
//! the `name` and `description` fields. Search scores each document with a
//! saturated term frequency weighted by inverse document frequency, taking
//! the best field per query term and summing across terms.
//!
//! Documents are kept in their stored form and decoded on every read, so a
//! malformed document behaves the way it would in a real document store.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::{debug, instrument, warn};

use core_kernel::{Page, ServiceError, ServiceResult};

use crate::ports::ProductRepository;
use crate::product::{Product, ProductDocument};
use crate::PRODUCT_ENTITY;

/// Term frequency saturation constant
const TF_SATURATION: f64 = 1.2;

#[derive(Debug, Default, Clone, Copy)]
struct FieldFrequency {
    name: u32,
    description: u32,
}

#[derive(Debug, Default)]
struct Index {
    documents: BTreeMap<String, Value>,
    postings: HashMap<String, HashMap<String, FieldFrequency>>,
}

impl Index {
    fn insert(&mut self, id: &str, source: Value) {
        self.unindex(id);
        for (term, frequency) in field_frequencies(&source) {
            self.postings
                .entry(term)
                .or_default()
                .insert(id.to_string(), frequency);
        }
        self.documents.insert(id.to_string(), source);
    }

    fn unindex(&mut self, id: &str) {
        let Some(previous) = self.documents.get(id) else {
            return;
        };
        for (term, _) in field_frequencies(previous) {
            if let Some(docs) = self.postings.get_mut(&term) {
                docs.remove(id);
                if docs.is_empty() {
                    self.postings.remove(&term);
                }
            }
        }
    }

    fn score(&self, query: &str) -> Vec<(String, f64)> {
        let total = self.documents.len() as f64;
        let terms: HashSet<String> = tokenize(query).collect();
        let mut scores: HashMap<&str, f64> = HashMap::new();

        for term in &terms {
            let Some(docs) = self.postings.get(term) else {
                continue;
            };
            let df = docs.len() as f64;
            let idf = (1.0 + (total - df + 0.5) / (df + 0.5)).ln();
            for (id, frequency) in docs {
                let tf = f64::from(frequency.name.max(frequency.description));
                *scores.entry(id.as_str()).or_default() += idf * tf / (tf + TF_SATURATION);
            }
        }

        let mut ranked: Vec<(String, f64)> = scores
            .into_iter()
            .map(|(id, score)| (id.to_string(), score))
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        ranked
    }
}

/// Product repository held entirely in memory
#[derive(Debug, Default)]
pub struct InMemoryProductRepository {
    index: RwLock<Index>,
    closed: AtomicBool,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-loaded with products
    pub async fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let repository = Self::new();
        {
            let mut index = repository.index.write().await;
            for product in products {
                let (id, document) = product.into_document();
                index.insert(&id, document_value(&document));
            }
        }
        repository
    }

    /// Stores a raw document exactly as given, bypassing encoding
    ///
    /// Used to load documents written by other producers, which may not
    /// decode as a product.
    pub async fn insert_raw(&self, id: impl Into<String>, source: Value) {
        let id = id.into();
        self.index.write().await.insert(&id, source);
    }

    /// Number of stored documents, malformed ones included
    pub async fn len(&self) -> usize {
        self.index.read().await.documents.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    fn ensure_open(&self) -> ServiceResult<()> {
        if self.closed.load(Ordering::Acquire) {
            Err(ServiceError::Closed)
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn close(&self) -> ServiceResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    #[instrument(skip(self, product), fields(product_id = %product.id))]
    async fn put_product(&self, product: &Product) -> ServiceResult<()> {
        self.ensure_open()?;
        let (id, document) = product.clone().into_document();
        self.index.write().await.insert(&id, document_value(&document));
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_product_by_id(&self, id: &str) -> ServiceResult<Product> {
        self.ensure_open()?;
        let index = self.index.read().await;
        let source = index
            .documents
            .get(id)
            .ok_or_else(|| ServiceError::not_found(PRODUCT_ENTITY, id))?;
        Ok(ProductDocument::decode(source)?.into_product(id))
    }

    #[instrument(skip(self))]
    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        self.ensure_open()?;
        let index = self.index.read().await;
        let window = page.apply(index.documents.iter());
        Ok(decode_hits(window.into_iter().map(|(id, source)| (id.as_str(), source))))
    }

    #[instrument(skip(self, ids), fields(count = ids.len()))]
    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>> {
        self.ensure_open()?;
        let index = self.index.read().await;
        let mut seen = HashSet::new();
        let hits = ids
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .filter_map(|id| index.documents.get(id).map(|source| (id.as_str(), source)));
        Ok(decode_hits(hits))
    }

    #[instrument(skip(self))]
    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>> {
        self.ensure_open()?;
        let index = self.index.read().await;
        let ranked = page.apply(index.score(query));
        debug!(hits = ranked.len(), "Search ranked");
        let hits = ranked
            .iter()
            .filter_map(|(id, _)| index.documents.get(id).map(|source| (id.as_str(), source)));
        Ok(decode_hits(hits))
    }
}

/// Decodes `(key, source)` hits, skipping any document that fails to decode
fn decode_hits<'a>(hits: impl IntoIterator<Item = (&'a str, &'a Value)>) -> Vec<Product> {
    hits.into_iter()
        .filter_map(|(id, source)| match ProductDocument::decode(source) {
            Ok(document) => Some(document.into_product(id)),
            Err(err) => {
                warn!(product_id = %id, error = %err, "Skipping malformed product document");
                None
            }
        })
        .collect()
}

fn document_value(document: &ProductDocument) -> Value {
    serde_json::json!({
        "name": document.name,
        "description": document.description,
        "price": document.price,
    })
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
}

fn field_frequencies(source: &Value) -> HashMap<String, FieldFrequency> {
    let mut frequencies: HashMap<String, FieldFrequency> = HashMap::new();
    if let Some(name) = source.get("name").and_then(Value::as_str) {
        for term in tokenize(name) {
            frequencies.entry(term).or_default().name += 1;
        }
    }
    if let Some(description) = source.get("description").and_then(Value::as_str) {
        for term in tokenize(description) {
            frequencies.entry(term).or_default().description += 1;
        }
    }
    frequencies
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens: Vec<String> = tokenize("Blue-Widget, 2 PACK").collect();
        assert_eq!(tokens, vec!["blue", "widget", "2", "pack"]);
    }

    #[test]
    fn test_reinsert_replaces_postings() {
        let mut index = Index::default();
        index.insert("p1", serde_json::json!({"name": "Widget", "description": "", "price": 1.0}));
        index.insert("p1", serde_json::json!({"name": "Gadget", "description": "", "price": 1.0}));

        assert!(index.postings.get("widget").is_none());
        assert_eq!(index.score("gadget").len(), 1);
    }

    #[test]
    fn test_more_matching_terms_rank_higher() {
        let mut index = Index::default();
        index.insert("a", serde_json::json!({"name": "red lamp", "description": "", "price": 1.0}));
        index.insert("b", serde_json::json!({"name": "red", "description": "metal lamp", "price": 1.0}));
        index.insert("c", serde_json::json!({"name": "blue chair", "description": "", "price": 1.0}));

        let ranked = index.score("red lamp");
        assert_eq!(ranked.len(), 2);
        assert!(ranked.iter().all(|(id, _)| id != "c"));
    }
}
