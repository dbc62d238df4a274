//! Order call bodies

use serde::{Deserialize, Serialize};

use domain_order::Order;

/// Body of `GetOrdersForAccount`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountOrdersRequest {
    pub account_id: String,
}

/// Body of `GetOrdersForAccounts`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountsOrdersRequest {
    pub account_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderResponse {
    pub order: Order,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrdersResponse {
    pub orders: Vec<Order>,
}
