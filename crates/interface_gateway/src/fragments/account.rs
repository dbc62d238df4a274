//! Account fragment

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use domain_account::{AccountApi, NewAccount};

use super::PaginationInput;
use crate::error::ResolutionError;
use crate::graph::{Arguments, Fragment, RootResolver, TypeDef};
use crate::node::{value_or_null, Object, Resolved};

pub fn account_fragment(accounts: Arc<dyn AccountApi>) -> Fragment {
    Fragment::new()
        .with_type(
            TypeDef::new("Account")
                .scalar("id", |node| value_or_null(node.as_account().map(|a| a.id.clone())))
                .scalar("name", |node| value_or_null(node.as_account().map(|a| a.name.clone()))),
        )
        .query(
            "accounts",
            AccountsQuery {
                accounts: accounts.clone(),
            },
        )
        .mutation("createAccount", CreateAccount { accounts })
}

/// `accounts(pagination, id)`; with `id` the list holds that one account
struct AccountsQuery {
    accounts: Arc<dyn AccountApi>,
}

#[async_trait]
impl RootResolver for AccountsQuery {
    fn output_type(&self) -> &'static str {
        "Account"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &["pagination", "id"]
    }

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError> {
        if let Some(id) = arguments.optional::<String>("id")? {
            let account = self.accounts.get_account(&id).await?;
            return Ok(Resolved::Many(vec![Object::Account(account)]));
        }

        let page = arguments
            .optional::<PaginationInput>("pagination")?
            .unwrap_or_default()
            .page();
        let accounts = self.accounts.list_accounts(page).await?;
        Ok(Resolved::Many(accounts.into_iter().map(Object::Account).collect()))
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct AccountInput {
    name: String,
}

/// `createAccount(account: {name})`
struct CreateAccount {
    accounts: Arc<dyn AccountApi>,
}

#[async_trait]
impl RootResolver for CreateAccount {
    fn output_type(&self) -> &'static str {
        "Account"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &["account"]
    }

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError> {
        let input: AccountInput = arguments.required("account")?;
        let account = self.accounts.post_account(NewAccount::new(input.name)).await?;
        Ok(Resolved::One(Object::Account(account)))
    }
}
