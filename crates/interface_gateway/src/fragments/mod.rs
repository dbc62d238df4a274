//! Schema fragments
//!
//! One fragment per service describes the types that service owns and the
//! root fields it answers. `edges` adds the two relational fields that
//! cross services, `Account.orders` and `Order.products`, both resolved
//! through batched calls.

mod account;
mod catalog;
mod edges;
mod order;

use serde::Deserialize;

use core_kernel::{Page, DEFAULT_TAKE};

pub use account::account_fragment;
pub use catalog::catalog_fragment;
pub use edges::{edge_fragment, AccountOrders, OrderProducts};
pub use order::order_fragment;

/// `pagination` argument of the list fields
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaginationInput {
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

impl PaginationInput {
    pub fn page(self) -> Page {
        Page::new(self.skip.unwrap_or(0), self.take.unwrap_or(DEFAULT_TAKE))
    }
}
