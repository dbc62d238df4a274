//! Pagination windows
//!
//! A `Page` is the half-open window `[skip, skip + take)` over an ordered
//! result set. `take == 0` is a legal, empty window.

use serde::{Deserialize, Serialize};

/// Page size used when a caller does not supply one
pub const DEFAULT_TAKE: u64 = 100;

/// Largest page a service will return in one call
pub const MAX_TAKE: u64 = 100;

/// Half-open pagination window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub skip: u64,
    pub take: u64,
}

impl Page {
    pub fn new(skip: u64, take: u64) -> Self {
        Self { skip, take }
    }

    /// Builds a page from optional bounds, defaulting missing values
    pub fn from_bounds(skip: Option<u64>, take: Option<u64>) -> Self {
        Self {
            skip: skip.unwrap_or(0),
            take: take.unwrap_or(DEFAULT_TAKE),
        }
    }

    /// Returns the same window with `take` clamped to `MAX_TAKE`
    pub fn capped(self) -> Self {
        Self {
            skip: self.skip,
            take: self.take.min(MAX_TAKE),
        }
    }

    /// Applies the window to an already-ordered sequence
    pub fn apply<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        items
            .into_iter()
            .skip(usize::try_from(self.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(self.take).unwrap_or(usize::MAX))
            .collect()
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::from_bounds(None, None)
    }
}
