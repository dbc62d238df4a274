//! Account Domain
//!
//! Accounts are the owners of orders. The account service is a thin
//! validate-and-store layer over an `AccountRepository`; its row mapping
//! lives in `infra_db`.

pub mod account;
pub mod ports;
pub mod service;
pub mod adapters;

pub use account::{Account, NewAccount};
pub use ports::{AccountRepository, AccountApi};
pub use service::AccountService;
pub use adapters::InMemoryAccountRepository;

/// Entity name used in `NotFound` errors
pub const ACCOUNT_ENTITY: &str = "Account";
