//! Order Domain
//!
//! An order belongs to one account and references catalog products by ID
//! with a quantity per line. The order service prices new orders through
//! the `ProductPricing` port, which in deployment is the catalog contract.
//!
//! Orders carry only product keys. Product details are joined in by the
//! gateway, one batched catalog call per graph level.

pub mod order;
pub mod ports;
pub mod service;
pub mod adapters;

pub use order::{Order, OrderedProduct, NewOrder};
pub use ports::{OrderRepository, OrderApi, ProductPricing};
pub use service::OrderService;
pub use adapters::{InMemoryOrderRepository, CatalogPricing};

/// Entity name used in `NotFound` errors
pub const ORDER_ENTITY: &str = "Order";
