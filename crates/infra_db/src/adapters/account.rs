//! PostgreSQL Account Adapter

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use core_kernel::{Page, ServiceResult};
use domain_account::{Account, AccountRepository};

use crate::error::DatabaseError;
use crate::repositories::account::{AccountRow, AccountRowRepository};

/// PostgreSQL-backed implementation of `AccountRepository`
#[derive(Debug, Clone)]
pub struct PostgresAccountAdapter {
    repository: AccountRowRepository,
    pool: PgPool,
}

impl PostgresAccountAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: AccountRowRepository::new(pool.clone()),
            pool,
        }
    }
}

#[async_trait]
impl AccountRepository for PostgresAccountAdapter {
    async fn close(&self) -> ServiceResult<()> {
        self.pool.close().await;
        Ok(())
    }

    #[instrument(skip(self, account), fields(account_id = %account.id))]
    async fn put_account(&self, account: &Account) -> ServiceResult<()> {
        let row = AccountRow {
            id: account.id.clone(),
            name: account.name.clone(),
        };
        self.repository
            .upsert(&row)
            .await
            .map_err(DatabaseError::into_write_error)
    }

    #[instrument(skip(self))]
    async fn get_account_by_id(&self, id: &str) -> ServiceResult<Account> {
        let row = self
            .repository
            .get_by_id(id)
            .await
            .map_err(DatabaseError::into_read_error)?;
        Ok(row_to_account(row))
    }

    #[instrument(skip(self))]
    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>> {
        if page.take == 0 {
            return Ok(Vec::new());
        }
        let rows = self
            .repository
            .list(to_sql_bound(page.skip), to_sql_bound(page.take))
            .await
            .map_err(DatabaseError::into_read_error)?;
        Ok(rows.into_iter().map(row_to_account).collect())
    }
}

fn row_to_account(row: AccountRow) -> Account {
    Account::new(row.id, row.name)
}

/// Clamps a pagination bound into PostgreSQL's `BIGINT` range
pub(crate) fn to_sql_bound(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}
