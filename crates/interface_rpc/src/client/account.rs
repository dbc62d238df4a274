use async_trait::async_trait;

use core_kernel::{Page, ServiceResult};
use domain_account::{Account, AccountApi, NewAccount};

use super::{ClientConfig, RpcClient};
use crate::dto::account::{AccountResponse, AccountsResponse};
use crate::dto::{IdRequest, PageRequest};
use crate::paths::account as path;

/// Remote account contract
#[derive(Debug, Clone)]
pub struct AccountClient {
    rpc: RpcClient,
}

impl AccountClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            rpc: RpcClient::new("account", config)?,
        })
    }
}

#[async_trait]
impl AccountApi for AccountClient {
    async fn post_account(&self, account: NewAccount) -> ServiceResult<Account> {
        let response: AccountResponse = self.rpc.call(path::POST_ACCOUNT, &account).await?;
        Ok(response.account)
    }

    async fn get_account(&self, id: &str) -> ServiceResult<Account> {
        let request = IdRequest { id: id.to_string() };
        let response: AccountResponse = self.rpc.call(path::GET_ACCOUNT, &request).await?;
        Ok(response.account)
    }

    async fn list_accounts(&self, page: Page) -> ServiceResult<Vec<Account>> {
        let response: AccountsResponse = self
            .rpc
            .call(path::LIST_ACCOUNTS, &PageRequest::from(page))
            .await?;
        Ok(response.accounts)
    }
}
