//! Test Data Generators
//!
//! `fake` for realistic-looking catalogs, proptest strategies for
//! property-based tests.

use fake::faker::lorem::en::{Sentence, Words};
use fake::Fake;
use proptest::prelude::*;

use core_kernel::Page;
use domain_catalog::Product;

/// A catalog of `count` products with generated names and descriptions
///
/// IDs are `g1..=g{count}` so tests can still address them.
pub fn fake_catalog(count: usize) -> Vec<Product> {
    (1..=count)
        .map(|n| {
            let name: Vec<String> = Words(1..3).fake();
            let description: String = Sentence(4..10).fake();
            let price: f64 = (1.0..500.0).fake();
            Product::new(format!("g{n}"), name.join(" "), description, price)
        })
        .collect()
}

/// Strategy for pagination windows over small corpora
pub fn page_strategy() -> impl Strategy<Value = Page> {
    (0u64..30, 0u64..30).prop_map(|(skip, take)| Page::new(skip, take))
}

/// Strategy for a single product with a word-like name
pub fn product_strategy() -> impl Strategy<Value = Product> {
    ("[a-z]{1,8}", "[a-z]{3,10}", "[a-z ]{0,30}", 0.0f64..1000.0)
        .prop_map(|(id, name, description, price)| Product::new(id, name, description, price))
}

/// Strategy for a catalog with unique IDs
pub fn catalog_strategy(max_len: usize) -> impl Strategy<Value = Vec<Product>> {
    prop::collection::btree_map("[a-z]{1,8}", product_strategy(), 0..max_len).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(id, product)| Product { id, ..product })
            .collect()
    })
}
