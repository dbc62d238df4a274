//! Request and response bodies of the service calls

pub mod catalog;
pub mod account;
pub mod order;

use serde::{Deserialize, Serialize};

use core_kernel::Page;

/// Request naming a single key
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdRequest {
    pub id: String,
}

/// Request naming a set of keys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IdsRequest {
    pub ids: Vec<String>,
}

/// Pagination request
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageRequest {
    #[serde(default)]
    pub skip: u64,
    #[serde(default = "default_take")]
    pub take: u64,
}

fn default_take() -> u64 {
    core_kernel::DEFAULT_TAKE
}

impl From<Page> for PageRequest {
    fn from(page: Page) -> Self {
        Self {
            skip: page.skip,
            take: page.take,
        }
    }
}

impl From<PageRequest> for Page {
    fn from(request: PageRequest) -> Self {
        Page::new(request.skip, request.take)
    }
}
