//! Product records and their persisted document form

use serde::{Deserialize, Serialize};
use serde_json::Value;
use validator::Validate;

use core_kernel::ServiceError;

/// A catalog product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Product {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Splits the product into its key and the payload stored under it
    pub fn into_document(self) -> (String, ProductDocument) {
        (
            self.id,
            ProductDocument {
                name: self.name,
                description: self.description,
                price: self.price,
            },
        )
    }
}

/// Persisted payload of a product
///
/// The document is stored under the product ID and deliberately carries no
/// `id` field of its own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductDocument {
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl ProductDocument {
    /// Decodes a raw stored document
    pub fn decode(source: &Value) -> Result<Self, ServiceError> {
        ProductDocument::deserialize(source).map_err(ServiceError::decode)
    }

    /// Rebuilds the product from the key the document was found under
    pub fn into_product(self, id: impl Into<String>) -> Product {
        Product {
            id: id.into(),
            name: self.name,
            description: self.description,
            price: self.price,
        }
    }
}

/// Input for creating a product through the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewProduct {
    #[validate(length(min = 1, max = 256))]
    pub name: String,
    #[validate(length(max = 4096))]
    pub description: String,
    #[validate(range(min = 0.0))]
    pub price: f64,
}

impl NewProduct {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            price,
        }
    }

    /// Runs field validation and rejects non-finite prices
    pub fn check(&self) -> Result<(), ServiceError> {
        self.validate()
            .map_err(|errors| ServiceError::validation(errors.to_string()))?;
        if !self.price.is_finite() {
            return Err(ServiceError::validation("price: must be a finite number"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_has_no_id_field() {
        let (key, document) = Product::new("p1", "Widget", "desc", 9.99).into_document();
        let stored = serde_json::to_value(&document).unwrap();

        assert_eq!(key, "p1");
        assert!(stored.get("id").is_none());
        assert_eq!(stored["name"], "Widget");
    }

    #[test]
    fn test_id_comes_from_key_not_payload() {
        let source = json!({"id": "wrong", "name": "Widget", "description": "desc", "price": 9.99});
        let product = ProductDocument::decode(&source).unwrap().into_product("p1");

        assert_eq!(product.id, "p1");
    }

    #[test]
    fn test_malformed_document_is_decode_error() {
        let source = json!({"name": "Widget", "price": "cheap"});
        let err = ProductDocument::decode(&source).unwrap_err();

        assert!(matches!(err, ServiceError::Decode { .. }));
    }

    #[test]
    fn test_new_product_validation() {
        assert!(NewProduct::new("Widget", "", 0.0).check().is_ok());
        assert!(NewProduct::new("", "desc", 1.0).check().is_err());
        assert!(NewProduct::new("Widget", "desc", -0.01).check().is_err());
        assert!(NewProduct::new("Widget", "desc", f64::NAN).check().is_err());
        assert!(NewProduct::new("Widget", "desc", f64::INFINITY).check().is_err());
    }
}
