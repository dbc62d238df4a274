//! Identifier generation for service-assigned keys
//!
//! Accounts, orders and products created through a service receive a
//! time-ordered identifier so that listing by key roughly follows creation
//! order. Identifiers are opaque strings everywhere else in the system.

use uuid::Uuid;

/// Generates a new time-ordered identifier in its 32-character simple form
pub fn generate_id() -> String {
    Uuid::now_v7().simple().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_unique_and_sortable() {
        let first = generate_id();
        let second = generate_id();

        assert_eq!(first.len(), 32);
        assert_ne!(first, second);
        assert!(first < second);
    }
}
