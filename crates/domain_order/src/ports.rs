//! Order Domain Ports

use std::collections::HashMap;

use async_trait::async_trait;

use core_kernel::ServiceResult;

use crate::order::{NewOrder, Order};

/// Storage port for orders
#[async_trait]
pub trait OrderRepository: Send + Sync + 'static {
    async fn close(&self) -> ServiceResult<()>;

    async fn put_order(&self, order: &Order) -> ServiceResult<()>;

    /// `NotFound` when no order has this id
    async fn get_order_by_id(&self, id: &str) -> ServiceResult<Order>;

    /// Orders of one account, oldest first; empty when the account has none
    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>>;

    /// Orders of every listed account in one round-trip
    ///
    /// Accounts without orders contribute nothing. Callers group by
    /// `Order::account_id`.
    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>>;
}

/// Remote-callable order contract
#[async_trait]
pub trait OrderApi: Send + Sync + 'static {
    async fn post_order(&self, order: NewOrder) -> ServiceResult<Order>;

    async fn get_order(&self, id: &str) -> ServiceResult<Order>;

    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>>;

    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>>;
}

/// Price lookup used when placing an order
#[async_trait]
pub trait ProductPricing: Send + Sync + 'static {
    /// Unit price per product key; unknown keys are absent from the map
    async fn prices(&self, product_ids: &[String]) -> ServiceResult<HashMap<String, f64>>;
}
