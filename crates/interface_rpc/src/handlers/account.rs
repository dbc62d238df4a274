//! Account handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use domain_account::{AccountApi, NewAccount};

use crate::dto::account::*;
use crate::dto::{IdRequest, PageRequest};
use crate::error::RpcError;

type Accounts = State<Arc<dyn AccountApi>>;

/// Creates an account
pub async fn post_account(
    State(api): Accounts,
    payload: Result<Json<NewAccount>, JsonRejection>,
) -> Result<Json<AccountResponse>, RpcError> {
    let Json(request) = payload?;
    let account = api.post_account(request).await?;
    Ok(Json(AccountResponse { account }))
}

/// Gets an account by ID
pub async fn get_account(
    State(api): Accounts,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<AccountResponse>, RpcError> {
    let Json(request) = payload?;
    let account = api.get_account(&request.id).await?;
    Ok(Json(AccountResponse { account }))
}

/// Lists accounts
pub async fn list_accounts(
    State(api): Accounts,
    payload: Result<Json<PageRequest>, JsonRejection>,
) -> Result<Json<AccountsResponse>, RpcError> {
    let Json(request) = payload?;
    let accounts = api.list_accounts(request.into()).await?;
    Ok(Json(AccountsResponse { accounts }))
}
