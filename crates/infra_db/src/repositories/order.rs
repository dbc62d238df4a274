//! Order rows
//!
//! An order is stored as one `orders` row plus one `order_products` row per
//! line. Reads join the two and return one row per line; an order without
//! lines yields a single row with null line columns.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Joined `orders` / `order_products` row
#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct OrderLineRow {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: f64,
    pub product_id: Option<String>,
    pub quantity: Option<i32>,
}

/// Header and lines for an insert
#[derive(Debug, Clone)]
pub struct NewOrderRows {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub account_id: String,
    pub total_price: f64,
    pub product_ids: Vec<String>,
    pub quantities: Vec<i32>,
}

const SELECT_ORDER_LINES: &str = r#"
    SELECT
        o.id,
        o.created_at,
        o.account_id,
        o.total_price,
        op.product_id,
        op.quantity
    FROM orders o
    LEFT JOIN order_products op ON op.order_id = o.id
"#;

/// SQL access for orders
#[derive(Debug, Clone)]
pub struct OrderRowRepository {
    pool: PgPool,
}

impl OrderRowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Writes the order header and replaces its lines in one transaction
    pub async fn upsert(&self, order: &NewOrderRows) -> Result<(), DatabaseError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, created_at, account_id, total_price)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (id) DO UPDATE SET
                created_at = EXCLUDED.created_at,
                account_id = EXCLUDED.account_id,
                total_price = EXCLUDED.total_price
            "#,
        )
        .bind(&order.id)
        .bind(order.created_at)
        .bind(&order.account_id)
        .bind(order.total_price)
        .execute(&mut *tx)
        .await?;

        sqlx::query("DELETE FROM order_products WHERE order_id = $1")
            .bind(&order.id)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO order_products (order_id, product_id, quantity)
            SELECT $1, line.product_id, line.quantity
            FROM UNNEST($2::text[], $3::int[]) AS line (product_id, quantity)
            "#,
        )
        .bind(&order.id)
        .bind(&order.product_ids)
        .bind(&order.quantities)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(())
    }

    /// Line rows of one order; empty when the order does not exist
    pub async fn lines_for_order(&self, id: &str) -> Result<Vec<OrderLineRow>, DatabaseError> {
        let sql = format!("{} WHERE o.id = $1 ORDER BY op.product_id", SELECT_ORDER_LINES);
        let rows = sqlx::query_as::<_, OrderLineRow>(&sql)
            .bind(id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Line rows of every order owned by any of `account_ids`
    pub async fn lines_for_accounts(&self, account_ids: &[String]) -> Result<Vec<OrderLineRow>, DatabaseError> {
        let sql = format!(
            "{} WHERE o.account_id = ANY($1) ORDER BY o.created_at, o.id, op.product_id",
            SELECT_ORDER_LINES
        );
        let rows = sqlx::query_as::<_, OrderLineRow>(&sql)
            .bind(account_ids)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }
}
