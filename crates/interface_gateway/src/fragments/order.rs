//! Order fragment

use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;

use domain_order::{NewOrder, OrderApi, OrderedProduct};

use crate::error::ResolutionError;
use crate::graph::{Arguments, Fragment, RootResolver, TypeDef};
use crate::node::{value_or_null, Object, Resolved};

pub fn order_fragment(orders: Arc<dyn OrderApi>) -> Fragment {
    Fragment::new()
        .with_type(
            TypeDef::new("Order")
                .scalar("id", |node| value_or_null(node.as_order().map(|o| o.id.clone())))
                .scalar("createdAt", |node| {
                    value_or_null(node.as_order().map(|o| o.created_at.to_rfc3339()))
                })
                .scalar("totalPrice", |node| value_or_null(node.as_order().map(|o| o.total_price))),
        )
        .with_type(
            TypeDef::new("OrderedProduct")
                .scalar("id", |node| value_or_null(node.as_product().map(|p| p.id.clone())))
                .scalar("name", |node| value_or_null(node.as_product().map(|p| p.name.clone())))
                .scalar("description", |node| {
                    value_or_null(node.as_product().map(|p| p.description.clone()))
                })
                .scalar("price", |node| value_or_null(node.as_product().map(|p| p.price)))
                .scalar("quantity", |node| match node {
                    Object::OrderedProduct { quantity, .. } => (*quantity).into(),
                    _ => serde_json::Value::Null,
                }),
        )
        .query(
            "order",
            OrderQuery {
                orders: orders.clone(),
            },
        )
        .mutation("createOrder", CreateOrder { orders })
}

/// `order(id)`
struct OrderQuery {
    orders: Arc<dyn OrderApi>,
}

#[async_trait]
impl RootResolver for OrderQuery {
    fn output_type(&self) -> &'static str {
        "Order"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &["id"]
    }

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError> {
        let id: String = arguments.required("id")?;
        let order = self.orders.get_order(&id).await?;
        Ok(Resolved::One(Object::Order(order)))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct OrderInput {
    account_id: String,
    products: Vec<OrderProductInput>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct OrderProductInput {
    id: String,
    quantity: u32,
}

/// `createOrder(order: {accountId, products: [{id, quantity}]})`
struct CreateOrder {
    orders: Arc<dyn OrderApi>,
}

#[async_trait]
impl RootResolver for CreateOrder {
    fn output_type(&self) -> &'static str {
        "Order"
    }

    fn arguments(&self) -> &'static [&'static str] {
        &["order"]
    }

    async fn resolve(&self, arguments: Arguments) -> Result<Resolved, ResolutionError> {
        let input: OrderInput = arguments.required("order")?;
        let lines = input
            .products
            .into_iter()
            .map(|line| OrderedProduct::new(line.id, line.quantity))
            .collect();
        let order = self.orders.post_order(NewOrder::new(input.account_id, lines)).await?;
        Ok(Resolved::One(Object::Order(order)))
    }
}
