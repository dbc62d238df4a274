//! In-memory account repository, ordered by id like the relational adapter

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use core_kernel::{Page, ServiceError, ServiceResult};

use crate::account::Account;
use crate::ports::AccountRepository;
use crate::ACCOUNT_ENTITY;

#[derive(Debug, Default)]
pub struct InMemoryAccountRepository {
    accounts: RwLock<BTreeMap<String, Account>>,
    closed: AtomicBool,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_accounts(accounts: impl IntoIterator<Item = Account>) -> Self {
        let accounts = accounts
            .into_iter()
            .map(|account| (account.id.clone(), account))
            .collect();
        Self {
            accounts: RwLock::new(accounts),
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
impl AccountRepository for InMemoryAccountRepository {
    async fn close(&self) -> ServiceResult<()> {
        self.closed.store(true, Ordering::Release);
        Ok(())
    }

    async fn put_account(&self, account: &Account) -> ServiceResult<()> {
        self.ensure_open()?;
        self.accounts
            .write()
            .await
            .insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn get_account_by_id(&self, id: &str) -> ServiceResult<Account> {
        self.ensure_open()?;
        self.accounts
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ServiceError::not_found(ACCOUNT_ENTITY, id))
    }

    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>> {
        self.ensure_open()?;
        Ok(page.apply(self.accounts.read().await.values().cloned()))
    }
}
