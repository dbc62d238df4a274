//! Values flowing through the graph
//!
//! Every resolved record is one `Object`. Parents of a batched field are
//! all of one variant, so each field reader only has to handle its own.

use serde_json::Value;

use domain_account::Account;
use domain_catalog::Product;
use domain_order::Order;

#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Account(Account),
    Order(Order),
    /// An order line joined with the catalog record it references
    OrderedProduct { product: Product, quantity: u32 },
    Product(Product),
}

impl Object {
    pub fn type_name(&self) -> &'static str {
        match self {
            Object::Account(_) => "Account",
            Object::Order(_) => "Order",
            Object::OrderedProduct { .. } => "OrderedProduct",
            Object::Product(_) => "Product",
        }
    }

    pub fn as_account(&self) -> Option<&Account> {
        match self {
            Object::Account(account) => Some(account),
            _ => None,
        }
    }

    pub fn as_order(&self) -> Option<&Order> {
        match self {
            Object::Order(order) => Some(order),
            _ => None,
        }
    }

    /// The catalog record behind a `Product` or an `OrderedProduct`
    pub fn as_product(&self) -> Option<&Product> {
        match self {
            Object::Product(product) | Object::OrderedProduct { product, .. } => Some(product),
            _ => None,
        }
    }
}

/// Result of resolving one field for one parent
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    Null,
    One(Object),
    Many(Vec<Object>),
}

/// Converts an optional field value, `null` when absent
pub fn value_or_null<T: Into<Value>>(value: Option<T>) -> Value {
    value.map(Into::into).unwrap_or(Value::Null)
}
