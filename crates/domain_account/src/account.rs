//! Account records

use serde::{Deserialize, Serialize};
use validator::Validate;

use core_kernel::ServiceError;

/// A customer account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: String,
    pub name: String,
}

impl Account {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Input for creating an account
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct NewAccount {
    #[validate(length(min = 1, max = 24))]
    pub name: String,
}

impl NewAccount {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    pub fn check(&self) -> Result<(), ServiceError> {
        if self.name.trim().is_empty() {
            return Err(ServiceError::validation("name: must not be blank"));
        }
        self.validate()
            .map_err(|errors| ServiceError::validation(errors.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_rules() {
        assert!(NewAccount::new("Ada").check().is_ok());
        assert!(NewAccount::new("   ").check().is_err());
        assert!(NewAccount::new("x".repeat(25)).check().is_err());
    }
}
