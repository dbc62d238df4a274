//! Call-Counting Contract Wrappers
//!
//! Each wrapper forwards to an inner contract and records every call, so
//! tests can assert how many round-trips a resolution made and which keys
//! each batched call carried.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use core_kernel::{Page, ServiceResult};
use domain_account::{Account, AccountApi, NewAccount};
use domain_catalog::{CatalogApi, NewProduct, Product};
use domain_order::{NewOrder, Order, OrderApi};

/// Per-method call counter plus the key sets of batched calls
#[derive(Debug, Default)]
pub struct CallLog {
    calls: Mutex<Vec<&'static str>>,
    batches: Mutex<Vec<Vec<String>>>,
    total: AtomicUsize,
}

impl CallLog {
    fn record(&self, method: &'static str) {
        self.total.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(method);
        }
    }

    fn record_batch(&self, method: &'static str, keys: &[String]) {
        self.record(method);
        if let Ok(mut batches) = self.batches.lock() {
            batches.push(keys.to_vec());
        }
    }

    /// Calls made to any method
    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    /// Calls made to `method`
    pub fn count(&self, method: &str) -> usize {
        self.calls
            .lock()
            .map(|calls| calls.iter().filter(|name| **name == method).count())
            .unwrap_or_default()
    }

    /// Key sets of every batched call, in call order
    pub fn batches(&self) -> Vec<Vec<String>> {
        self.batches.lock().map(|b| b.clone()).unwrap_or_default()
    }
}

/// `CatalogApi` that counts calls
pub struct CountingCatalog {
    inner: Arc<dyn CatalogApi>,
    pub log: CallLog,
}

impl CountingCatalog {
    pub fn new(inner: Arc<dyn CatalogApi>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            log: CallLog::default(),
        })
    }
}

#[async_trait]
impl CatalogApi for CountingCatalog {
    async fn put_product(&self, product: Product) -> ServiceResult<()> {
        self.log.record("put_product");
        self.inner.put_product(product).await
    }

    async fn post_product(&self, product: NewProduct) -> ServiceResult<Product> {
        self.log.record("post_product");
        self.inner.post_product(product).await
    }

    async fn get_product(&self, id: &str) -> ServiceResult<Product> {
        self.log.record("get_product");
        self.inner.get_product(id).await
    }

    async fn list_products(&self, page: Page) -> ServiceResult<Vec<Product>> {
        self.log.record("list_products");
        self.inner.list_products(page).await
    }

    async fn list_products_with_ids(&self, ids: &[String]) -> ServiceResult<Vec<Product>> {
        self.log.record_batch("list_products_with_ids", ids);
        self.inner.list_products_with_ids(ids).await
    }

    async fn search_products(&self, query: &str, page: Page) -> ServiceResult<Vec<Product>> {
        self.log.record("search_products");
        self.inner.search_products(query, page).await
    }
}

/// `OrderApi` that counts calls
pub struct CountingOrders {
    inner: Arc<dyn OrderApi>,
    pub log: CallLog,
}

impl CountingOrders {
    pub fn new(inner: Arc<dyn OrderApi>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            log: CallLog::default(),
        })
    }
}

#[async_trait]
impl OrderApi for CountingOrders {
    async fn post_order(&self, order: NewOrder) -> ServiceResult<Order> {
        self.log.record("post_order");
        self.inner.post_order(order).await
    }

    async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        self.log.record("get_order");
        self.inner.get_order(id).await
    }

    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>> {
        self.log.record("get_orders_for_account");
        self.inner.get_orders_for_account(account_id).await
    }

    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>> {
        self.log.record_batch("get_orders_for_accounts", account_ids);
        self.inner.get_orders_for_accounts(account_ids).await
    }
}

/// `AccountApi` that counts calls
pub struct CountingAccounts {
    inner: Arc<dyn AccountApi>,
    pub log: CallLog,
}

impl CountingAccounts {
    pub fn new(inner: Arc<dyn AccountApi>) -> Arc<Self> {
        Arc::new(Self {
            inner,
            log: CallLog::default(),
        })
    }
}

#[async_trait]
impl AccountApi for CountingAccounts {
    async fn post_account(&self, account: NewAccount) -> ServiceResult<Account> {
        self.log.record("post_account");
        self.inner.post_account(account).await
    }

    async fn get_account(&self, id: &str) -> ServiceResult<Account> {
        self.log.record("get_account");
        self.inner.get_account(id).await
    }

    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>> {
        self.log.record("list_accounts");
        self.inner.list_accounts(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{InMemoryServices, ProductFixtures};

    #[tokio::test]
    async fn test_counts_and_records_batches() {
        let services = InMemoryServices::seeded(Vec::new(), ProductFixtures::pair(), Vec::new()).await;
        let catalog = CountingCatalog::new(services.catalog);

        catalog.get_product("p1").await.unwrap();
        catalog
            .list_products_with_ids(&["p1".to_string(), "p2".to_string()])
            .await
            .unwrap();

        assert_eq!(catalog.log.total(), 2);
        assert_eq!(catalog.log.count("list_products_with_ids"), 1);
        assert_eq!(catalog.log.batches(), vec![vec!["p1".to_string(), "p2".to_string()]]);
    }
}
