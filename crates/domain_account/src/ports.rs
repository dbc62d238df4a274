//! Account Domain Ports

use async_trait::async_trait;

use core_kernel::{Page, ServiceResult};

use crate::account::{Account, NewAccount};

/// Storage port for accounts
#[async_trait]
pub trait AccountRepository: Send + Sync + 'static {
    async fn close(&self) -> ServiceResult<()>;

    async fn put_account(&self, account: &Account) -> ServiceResult<()>;

    /// `ServiceError::NotFound` when no row exists for `id`
    async fn get_account_by_id(&self, id: &str) -> ServiceResult<Account>;

    /// Window over accounts ordered by id
    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>>;
}

/// Remote-callable account contract
#[async_trait]
pub trait AccountApi: Send + Sync + 'static {
    async fn post_account(&self, account: NewAccount) -> ServiceResult<Account>;

    async fn get_account(&self, id: &str) -> ServiceResult<Account>;

    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>>;
}
