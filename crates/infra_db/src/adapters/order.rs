//! PostgreSQL Order Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{instrument, warn};

use core_kernel::{ServiceError, ServiceResult};
use domain_order::{Order, OrderRepository, OrderedProduct, ORDER_ENTITY};

use crate::error::DatabaseError;
use crate::repositories::order::{NewOrderRows, OrderLineRow, OrderRowRepository};

/// PostgreSQL-backed implementation of `OrderRepository`
#[derive(Debug, Clone)]
pub struct PostgresOrderAdapter {
    repository: OrderRowRepository,
    pool: PgPool,
}

impl PostgresOrderAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: OrderRowRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl OrderRepository for PostgresOrderAdapter {
    async fn close(&self) -> ServiceResult<()> {
        self.pool.close().await;
        Ok(())
    }

    #[instrument(skip(self, order), fields(order_id = %order.id))]
    async fn put_order(&self, order: &Order) -> ServiceResult<()> {
        let rows = order_to_rows(order).map_err(DatabaseError::into_write_error)?;
        self.repository
            .upsert(&rows)
            .await
            .map_err(DatabaseError::into_write_error)
    }

    #[instrument(skip(self))]
    async fn get_order_by_id(&self, id: &str) -> ServiceResult<Order> {
        let rows = self
            .repository
            .lines_for_order(id)
            .await
            .map_err(DatabaseError::into_read_error)?;
        if rows.is_empty() {
            return Err(ServiceError::not_found(ORDER_ENTITY, id));
        }
        group_rows(rows)
            .pop()
            .ok_or_else(|| ServiceError::decode(format!("order {id} has an unreadable line")))
    }

    #[instrument(skip(self))]
    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>> {
        self.get_orders_for_accounts(&[account_id.to_string()]).await
    }

    #[instrument(skip(self, account_ids), fields(count = account_ids.len()))]
    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>> {
        let rows = self
            .repository
            .lines_for_accounts(account_ids)
            .await
            .map_err(DatabaseError::into_read_error)?;
        Ok(group_rows(rows))
    }
}

fn order_to_rows(order: &Order) -> Result<NewOrderRows, DatabaseError> {
    let quantities = order
        .products
        .iter()
        .map(|line| {
            i32::try_from(line.quantity)
                .map_err(|_| DatabaseError::InvalidValue(format!("quantity {} out of range", line.quantity)))
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(NewOrderRows {
        id: order.id.clone(),
        created_at: order.created_at,
        account_id: order.account_id.clone(),
        total_price: order.total_price,
        product_ids: order.products.iter().map(|line| line.product_id.clone()).collect(),
        quantities,
    })
}

/// Folds consecutive line rows of the same order into one `Order`
///
/// An order with a line that cannot be represented is dropped.
fn group_rows(rows: Vec<OrderLineRow>) -> Vec<Order> {
    let mut orders: Vec<Order> = Vec::new();
    let mut broken: Option<String> = None;

    for row in rows {
        if broken.as_deref() == Some(row.id.as_str()) {
            continue;
        }
        if orders.last().map(|order| order.id.as_str()) != Some(row.id.as_str()) {
            orders.push(Order {
                id: row.id.clone(),
                created_at: row.created_at,
                account_id: row.account_id.clone(),
                total_price: row.total_price,
                products: Vec::new(),
            });
        }
        let (Some(product_id), Some(quantity)) = (row.product_id, row.quantity) else {
            continue;
        };
        match u32::try_from(quantity) {
            Ok(quantity) => {
                if let Some(order) = orders.last_mut() {
                    order.products.push(OrderedProduct::new(product_id, quantity));
                }
            }
            Err(_) => {
                warn!(order_id = %row.id, quantity, "Skipping order with invalid line quantity");
                orders.pop();
                broken = Some(row.id);
            }
        }
    }

    orders
}
