use async_trait::async_trait;

use core_kernel::ServiceResult;
use domain_order::{NewOrder, Order, OrderApi};

use super::{ClientConfig, RpcClient};
use crate::dto::order::{AccountOrdersRequest, AccountsOrdersRequest, OrderResponse, OrdersResponse};
use crate::dto::IdRequest;
use crate::paths::order as path;

/// Remote order contract
#[derive(Debug, Clone)]
pub struct OrderClient {
    rpc: RpcClient,
}

impl OrderClient {
    pub fn new(config: &ClientConfig) -> Result<Self, reqwest::Error> {
        Ok(Self {
            rpc: RpcClient::new("order", config)?,
        })
    }
}

#[async_trait]
impl OrderApi for OrderClient {
    async fn post_order(&self, order: NewOrder) -> ServiceResult<Order> {
        let response: OrderResponse = self.rpc.call(path::POST_ORDER, &order).await?;
        Ok(response.order)
    }

    async fn get_order(&self, id: &str) -> ServiceResult<Order> {
        let request = IdRequest { id: id.to_string() };
        let response: OrderResponse = self.rpc.call(path::GET_ORDER, &request).await?;
        Ok(response.order)
    }

    async fn get_orders_for_account(&self, account_id: &str) -> ServiceResult<Vec<Order>> {
        let request = AccountOrdersRequest {
            account_id: account_id.to_string(),
        };
        let response: OrdersResponse = self.rpc.call(path::GET_ORDERS_FOR_ACCOUNT, &request).await?;
        Ok(response.orders)
    }

    async fn get_orders_for_accounts(&self, account_ids: &[String]) -> ServiceResult<Vec<Order>> {
        if account_ids.is_empty() {
            return Ok(Vec::new());
        }
        let request = AccountsOrdersRequest {
            account_ids: account_ids.to_vec(),
        };
        let response: OrdersResponse = self.rpc.call(path::GET_ORDERS_FOR_ACCOUNTS, &request).await?;
        Ok(response.orders)
    }
}
