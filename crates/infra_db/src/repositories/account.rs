//! Account rows

use sqlx::{FromRow, PgPool};

use crate::error::DatabaseError;

/// Row of the `accounts` table
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct AccountRow {
    pub id: String,
    pub name: String,
}

/// SQL access for accounts
#[derive(Debug, Clone)]
pub struct AccountRowRepository {
    pool: PgPool,
}

impl AccountRowRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Inserts the account, replacing the name of an existing row
    pub async fn upsert(&self, row: &AccountRow) -> Result<(), DatabaseError> {
        sqlx::query(
            r#"
            INSERT INTO accounts (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(&row.id)
        .bind(&row.name)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn get_by_id(&self, id: &str) -> Result<AccountRow, DatabaseError> {
        sqlx::query_as::<_, AccountRow>("SELECT id, name FROM accounts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::not_found("Account", id))
    }

    /// Accounts ordered by id, windowed by `OFFSET`/`LIMIT`
    pub async fn list(&self, skip: i64, take: i64) -> Result<Vec<AccountRow>, DatabaseError> {
        let rows = sqlx::query_as::<_, AccountRow>(
            "SELECT id, name FROM accounts ORDER BY id OFFSET $1 LIMIT $2",
        )
        .bind(skip)
        .bind(take)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
