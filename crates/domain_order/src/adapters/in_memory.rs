//! In-memory order repository

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{ServiceError, ServiceResult};

use crate::order::Order;
use crate::ports::OrderRepository;
use crate::ORDER_ENTITY;

/// Orders kept in insertion order
#[derive(Debug, Default)]
pub struct InMemoryOrderRepository {
    orders: RwLock<Vec<Order>>,
    closed: AtomicBool,
}

impl InMemoryOrderRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orders(orders: impl IntoIterator<Item = Order>) -> Self {
        Self {
            orders: RwLock::new(orders.into_iter().collect()),
            closed: AtomicBool::new(false),
        }
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
impl OrderRepository for InMemoryOrderRepository {
    async fn close(&self) -> ServiceResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    async fn put_order(&self, order: &Order) -> ServiceResult<()> {
        self.ensure_open()?;
        let mut orders = self.orders.write().await;
        match orders.iter_mut().find(|existing| existing.id == order.id) {
            Some(existing) => *existing = order.clone(),
            None => orders.push(order.clone()),
        }
        Ok(())
    }

    async fn get_order_by_id(&self, id: &str) -> ServiceResult<Order> {
        self.ensure_open()?;
        self.orders
            .read()
            .await
            .iter()
            .find(|order| order.id == id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(ORDER_ENTITY, id))
    }

    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>> {
        self.ensure_open()?;
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| order.account_id == account_id)
            .cloned()
            .collect())
    }

    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>> {
        self.ensure_open()?;
        let wanted: HashSet<&str> = account_ids.iter().map(String::as_str).collect();
        Ok(self
            .orders
            .read()
            .await
            .iter()
            .filter(|order| wanted.contains(order.account_id.as_str()))
            .cloned()
            .collect())
    }
}
