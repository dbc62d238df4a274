//! Account service

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, instrument};

use core_kernel::{generate_id, Page, ServiceError, ServiceResult};

use crate::account::{Account, NewAccount};
use crate::ports::{AccountApi, AccountRepository};

pub struct AccountService {
    repository: Arc<dyn AccountRepository>,
}

impl AccountService {
    pub fn new(repository: Arc<dyn AccountRepository>) -> Self {
        Self { repository }
    }

    pub fn repository(&self) -> &Arc<dyn AccountRepository> {
        &self.repository
    }
}

#[async_trait]
impl AccountApi for AccountService {
    #[instrument(skip(self, account))]
    async fn post_account(&self, account: NewAccount) -> ServiceResult<Account> {
        account.check()?;
        let account = Account::new(generate_id(), account.name.trim());
        self.repository.put_account(&account).await?;
        debug!(account_id = %account.id, "Account stored");
        Ok(account)
    }

    #[instrument(skip(self))]
    async fn get_account(&self, id: &str) -> ServiceResult<Account> {
        if id.trim().is_empty() {
            return Err(ServiceError::validation("account id must not be empty"));
        }
        self.repository.get_account_by_id(id).await
    }

    #[instrument(skip(self))]
    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>> {
        self.repository.list_accounts(page.capped()).await
    }
}
