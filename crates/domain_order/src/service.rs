//! Order service
//!
//! Placing an order prices every line with a single pricing call and
//! rejects the order if any referenced product does not exist.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{debug, instrument};

use core_kernel::{generate_id, ServiceError, ServiceResult};

use crate::order::{NewOrder, Order};
use crate::ports::{OrderApi, OrderRepository, ProductPricing};

pub struct OrderService {
    repository: Arc<dyn OrderRepository>,
    pricing: Arc<dyn ProductPricing>,
}

impl OrderService {
    pub fn new(repository: Arc<dyn OrderRepository>, pricing: Arc<dyn ProductPricing>) -> Self {
        Self { repository, pricing }
    }

    pub fn repository(&self) -> &Arc<dyn OrderRepository> {
        &self.repository
    }
}

#[async_trait]
impl OrderApi for OrderService {
    #[instrument(skip(self, order), fields(account_id = %order.account_id))]
    async fn post_order(&self, order: NewOrder) -> ServiceResult<Order> {
        if order.account_id.trim().is_empty() {
            return Err(ServiceError::validation("account id must not be empty"));
        }
        let lines = order.normalized_lines();
        if lines.is_empty() {
            return Err(ServiceError::validation("order must contain at least one product"));
        }

        let ids: Vec<String> = lines.iter().map(|line| line.product_id.clone()).collect();
        let prices = self.pricing.prices(&ids).await?;

        let mut total_price = 0.0;
        for line in &lines {
            let price = prices.get(&line.product_id).ok_or_else(|| {
                ServiceError::validation(format!("unknown product {}", line.product_id))
            })?;
            total_price += price * f64::from(line.quantity);
        }

        let order = Order {
            id: generate_id(),
            created_at: Utc::now(),
            account_id: order.account_id,
            total_price,
            products: lines,
        };
        self.repository.put_order(&order).await?;
        debug!(order_id = %order.id, total_price, "Order stored");
        Ok(order)
    }

    #[instrument(skip(self))]
    async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        if id.trim().is_empty() {
            return Err(ServiceError::validation("order id must not be empty"));
        }
        self.repository.get_order_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>> {
        self.repository.get_orders_for_account(account_id).await
    }

    #[instrument(skip(self, account_ids), fields(count = account_ids.len()))]
    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>> {
        if account_ids.is_empty() {
            return Ok(Vec::new());
        }
        self.repository.get_orders_for_accounts(account_ids).await
    }
}
