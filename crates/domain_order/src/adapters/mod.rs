//! Order Adapters

pub mod in_memory;
pub mod catalog_pricing;

pub use in_memory::InMemoryOrderRepository;
pub use catalog_pricing::CatalogPricing;
