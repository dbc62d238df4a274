//! Order handlers

use std::sync::Arc;

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use domain_order::{NewOrder, OrderApi};

use crate::dto::order::*;
use crate::dto::IdRequest;
use crate::error::RpcError;

type Orders = State<Arc<dyn OrderApi>>;

/// Places an order
pub async fn post_order(
    State(api): Orders,
    payload: Result<Json<NewOrder>, JsonRejection>,
) -> Result<Json<OrderResponse>, RpcError> {
    let Json(request) = payload?;
    let order = api.post_order(request).await?;
    Ok(Json(OrderResponse { order }))
}

pub async fn get_order(
    State(api): Orders,
    payload: Result<Json<IdRequest>, JsonRejection>,
) -> Result<Json<OrderResponse>, RpcError> {
    let Json(request) = payload?;
    let order = api.get_order(&request.id).await?;
    Ok(Json(OrderResponse { order }))
}

pub async fn get_orders_for_account(
    State(api): Orders,
    payload: Result<Json<AccountOrdersRequest>, JsonRejection>,
) -> Result<Json<OrdersResponse>, RpcError> {
    let Json(request) = payload?;
    let orders = api.get_orders_for_account(&request.account_id).await?;
    Ok(Json(OrdersResponse { orders }))
}

/// Orders of many accounts in one call
pub async fn get_orders_for_accounts(
    State(api): Orders,
    payload: Result<Json<AccountsOrdersRequest>, JsonRejection>,
) -> Result<Json<OrdersResponse>, RpcError> {
    let Json(request) = payload?;
    let orders = api.get_orders_for_accounts(&request.account_ids).await?;
    Ok(Json(OrdersResponse { orders }))
}
