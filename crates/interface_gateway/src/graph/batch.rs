//! Batched field resolution
//!
//! A batched field is resolved for a whole graph level in three steps:
//!
//! 1. **collect**: gather the keys every parent needs, deduplicated
//! 2. **dispatch**: make exactly one call with that key set
//! 3. **distribute**: hand each parent the records for its own keys
//!
//! A key the callee knows nothing about simply has no entry in the loaded
//! map, so its parent gets an empty result rather than an error. A failed
//! call fails the field for every parent at that level.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tracing::debug;

use crate::error::ResolutionError;
use crate::node::{Object, Resolved};

/// Records loaded by one batched call, keyed by the key that asked for them
pub type Loaded = HashMap<String, Vec<Object>>;

#[async_trait]
pub trait BatchResolver: Send + Sync + 'static {
    /// Object type of the records this field returns
    fn child_type(&self) -> &'static str;

    /// Keys `parent` needs loaded
    fn keys(&self, parent: &Object) -> Vec<String>;

    /// One call covering every key of the level
    async fn load(&self, keys: &[String]) -> Result<Loaded, ResolutionError>;

    /// Builds `parent`'s value from the loaded records
    fn assemble(&self, parent: &Object, loaded: &Loaded) -> Resolved;
}

/// Keys of every parent, first occurrence order, no repeats
pub fn collect_keys(resolver: &dyn BatchResolver, parents: &[Object]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut keys = Vec::new();
    for parent in parents {
        for key in resolver.keys(parent) {
            if seen.insert(key.clone()) {
                keys.push(key);
            }
        }
    }
    keys
}

/// Resolves the field for every parent with at most one call
///
/// No call is made when no parent needs anything.
pub async fn resolve_batch(
    resolver: &dyn BatchResolver,
    parents: &[Object],
) -> Result<Vec<Resolved>, ResolutionError> {
    let keys = collect_keys(resolver, parents);

    let loaded = if keys.is_empty() {
        Loaded::new()
    } else {
        debug!(
            child_type = resolver.child_type(),
            parents = parents.len(),
            keys = keys.len(),
            "dispatching batch"
        );
        resolver.load(&keys).await?
    };

    Ok(parents
        .iter()
        .map(|parent| resolver.assemble(parent, &loaded))
        .collect())
}
