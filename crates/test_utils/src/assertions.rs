//! Custom Test Assertions

use std::collections::BTreeSet;

use domain_catalog::Product;

/// Asserts that `products` holds exactly the given IDs, in any order
///
/// # Panics
///
/// Panics listing both sets when they differ
pub fn assert_same_ids(products: &[Product], expected: &[&str]) {
    let actual: BTreeSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
    let expected: BTreeSet<&str> = expected.iter().copied().collect();
    assert_eq!(
        actual, expected,
        "Product IDs differ: actual={:?}, expected={:?}",
        actual, expected
    );
    assert_eq!(products.len(), actual.len(), "Duplicate products in {:?}", products);
}

/// Asserts that two prices are equal within a cent fraction
pub fn assert_price_eq(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "Prices differ: actual={}, expected={}",
        actual,
        expected
    );
}
