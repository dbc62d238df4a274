//! Relational edges between services
//!
//! These are the only fields whose records come from a different service
//! than their parent's. Both are batched: one order-service call per level
//! of accounts, one catalog call per level of orders.

use std::collections::HashSet;
use std::sync::Arc;

use async_trait::async_trait;

use domain_catalog::CatalogApi;
use domain_order::OrderApi;

use crate::error::ResolutionError;
use crate::graph::{BatchResolver, Fragment, Loaded, TypeDef};
use crate::node::{Object, Resolved};

pub fn edge_fragment(orders: Arc<dyn OrderApi>, catalog: Arc<dyn CatalogApi>) -> Fragment {
    Fragment::new()
        .with_type(TypeDef::new("Account").batched("orders", AccountOrders::new(orders)))
        .with_type(TypeDef::new("Order").batched("products", OrderProducts::new(catalog)))
}

/// `Account.orders`, keyed by account ID
pub struct AccountOrders {
    orders: Arc<dyn OrderApi>,
}

impl AccountOrders {
    pub fn new(orders: Arc<dyn OrderApi>) -> Self {
        Self { orders }
    }
}

#[async_trait]
impl BatchResolver for AccountOrders {
    fn child_type(&self) -> &'static str {
        "Order"
    }

    fn keys(&self, parent: &Object) -> Vec<String> {
        parent.as_account().map(|a| vec![a.id.clone()]).unwrap_or_default()
    }

    async fn load(&self, keys: &[String]) -> Result<Loaded, ResolutionError> {
        let orders = self.orders.get_orders_for_accounts(keys).await?;
        let mut loaded = Loaded::new();
        for order in orders {
            loaded
                .entry(order.account_id.clone())
                .or_default()
                .push(Object::Order(order));
        }
        Ok(loaded)
    }

    fn assemble(&self, parent: &Object, loaded: &Loaded) -> Resolved {
        let orders = parent
            .as_account()
            .and_then(|account| loaded.get(&account.id))
            .cloned()
            .unwrap_or_default();
        Resolved::Many(orders)
    }
}

/// `Order.products`, keyed by product ID
///
/// Each line becomes an `OrderedProduct` carrying the catalog record and
/// the line's quantity. A line whose product the catalog no longer has is
/// left out.
pub struct OrderProducts {
    catalog: Arc<dyn CatalogApi>,
}

impl OrderProducts {
    pub fn new(catalog: Arc<dyn CatalogApi>) -> Self {
        Self { catalog }
    }
}

#[async_trait]
impl BatchResolver for OrderProducts {
    fn child_type(&self) -> &'static str {
        "OrderedProduct"
    }

    fn keys(&self, parent: &Object) -> Vec<String> {
        parent
            .as_order()
            .map(|order| order.product_ids().map(str::to_string).collect())
            .unwrap_or_default()
    }

    async fn load(&self, keys: &[String]) -> Result<Loaded, ResolutionError> {
        let products = self.catalog.list_products_with_ids(keys).await?;
        // the contract leaves order unspecified; re-key by ID
        let mut loaded = Loaded::new();
        let mut seen = HashSet::new();
        for product in products {
            if seen.insert(product.id.clone()) {
                loaded.insert(product.id.clone(), vec![Object::Product(product)]);
            }
        }
        Ok(loaded)
    }

    fn assemble(&self, parent: &Object, loaded: &Loaded) -> Resolved {
        let Some(order) = parent.as_order() else {
            return Resolved::Null;
        };
        let lines = order
            .products
            .iter()
            .filter_map(|line| {
                let product = loaded.get(&line.product_id)?.first()?.as_product()?;
                Some(Object::OrderedProduct {
                    product: product.clone(),
                    quantity: line.quantity,
                })
            })
            .collect();
        Resolved::Many(lines)
    }
}
