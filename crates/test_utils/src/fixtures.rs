//! Pre-built Test Fixtures
//!
//! Consistent, predictable data for unit and integration tests.

use std::sync::Arc;

use chrono::{DateTime, TimeZone, Utc};

use domain_account::{Account, AccountApi, AccountService, InMemoryAccountRepository};
use domain_catalog::{CatalogApi, CatalogService, InMemoryProductRepository, Product};
use domain_order::{
    CatalogPricing, InMemoryOrderRepository, Order, OrderApi, OrderService, OrderedProduct,
};

/// Fixture for catalog data
pub struct ProductFixtures;

impl ProductFixtures {
    pub fn widget() -> Product {
        Product::new("p1", "Widget", "desc", 9.99)
    }

    pub fn gadget() -> Product {
        Product::new("p2", "Gadget", "desc", 19.99)
    }

    /// The two-product catalog most scenarios start from
    pub fn pair() -> Vec<Product> {
        vec![Self::widget(), Self::gadget()]
    }

    /// `count` products with IDs `p1..=p{count}` and distinct prices
    pub fn numbered(count: usize) -> Vec<Product> {
        (1..=count)
            .map(|n| Product::new(format!("p{n}"), format!("Product {n}"), "numbered", n as f64))
            .collect()
    }
}

/// Fixture for accounts
pub struct AccountFixtures;

impl AccountFixtures {
    pub fn ada() -> Account {
        Account::new("a1", "Ada")
    }

    /// `count` accounts with IDs `a1..=a{count}`
    pub fn numbered(count: usize) -> Vec<Account> {
        (1..=count)
            .map(|n| Account::new(format!("a{n}"), format!("Account {n}")))
            .collect()
    }
}

/// Fixture for orders
pub struct OrderFixtures;

impl OrderFixtures {
    /// Fixed order timestamp (Jan 1, 2024)
    pub fn placed_at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).single().unwrap_or_default()
    }

    /// An order of one unit of each listed product
    pub fn order(id: &str, account_id: &str, product_ids: &[&str]) -> Order {
        Order {
            id: id.to_string(),
            created_at: Self::placed_at(),
            account_id: account_id.to_string(),
            total_price: 0.0,
            products: product_ids
                .iter()
                .map(|product_id| OrderedProduct::new(*product_id, 1))
                .collect(),
        }
    }
}

/// In-process services wired the way the binaries wire them
pub struct InMemoryServices {
    pub accounts: Arc<InMemoryAccountRepository>,
    pub products: Arc<InMemoryProductRepository>,
    pub orders: Arc<InMemoryOrderRepository>,
    pub account: Arc<dyn AccountApi>,
    pub catalog: Arc<dyn CatalogApi>,
    pub order: Arc<dyn OrderApi>,
}

impl InMemoryServices {
    pub async fn seeded(
        accounts: Vec<Account>,
        products: Vec<Product>,
        orders: Vec<Order>,
    ) -> Self {
        let accounts = Arc::new(InMemoryAccountRepository::with_accounts(accounts));
        let products = Arc::new(InMemoryProductRepository::with_products(products).await);
        let orders = Arc::new(InMemoryOrderRepository::with_orders(orders));

        let catalog: Arc<dyn CatalogApi> = Arc::new(CatalogService::new(products.clone()));
        let account: Arc<dyn AccountApi> = Arc::new(AccountService::new(accounts.clone()));
        let order: Arc<dyn OrderApi> = Arc::new(OrderService::new(
            orders.clone(),
            Arc::new(CatalogPricing::new(catalog.clone())),
        ));

        Self {
            accounts,
            products,
            orders,
            account,
            catalog,
            order,
        }
    }

    pub async fn empty() -> Self {
        Self::seeded(Vec::new(), Vec::new(), Vec::new()).await
    }
}
