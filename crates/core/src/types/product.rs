//! Product wire types as served by the upstream catalog and search APIs.
//!
//! The upstream exposes loosely-shaped documents; every field that is not
//! guaranteed present is an `Option` here. Unknown fields are ignored on
//! deserialization. Products are read-only on our side - nothing in this
//! system ever mutates one.

use serde::{Deserialize, Serialize};

/// A single catalog product.
///
/// `id` travels on the wire as `_id` (upstream document identifier).
/// `image` is a relative path that must be resolved through the image
/// gateway, never fetched directly by a client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub house_hold_id: Option<String>,
}

/// The listing/search response shape: `{ "products": [...] }`.
///
/// Consumed directly into the browse session's grid state with no
/// transformation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn deserializes_full_product() {
        let json = r#"{
            "_id": "abc123",
            "name": "Oat Milk",
            "description": "Barista blend",
            "price": 4.5,
            "image": "/img/oat-milk.jpg",
            "brand": "Oately",
            "tags": ["dairy-free", "pantry"],
            "house_hold_id": "hh-9"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, "abc123");
        assert_eq!(product.price, Some(4.5));
        assert_eq!(product.tags.unwrap().len(), 2);
        assert_eq!(product.house_hold_id.as_deref(), Some("hh-9"));
    }

    #[test]
    fn deserializes_with_all_optionals_absent() {
        let json = r#"{"_id": "x", "name": "Salt", "description": ""}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert!(product.price.is_none());
        assert!(product.image.is_none());
        assert!(product.brand.is_none());
        assert!(product.tags.is_none());
        assert!(product.house_hold_id.is_none());
    }

    #[test]
    fn ignores_unknown_upstream_fields() {
        let json = r#"{"_id": "x", "name": "Salt", "description": "", "stock": 4}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.name, "Salt");
    }

    #[test]
    fn serializes_id_as_underscore_id() {
        let product = Product {
            id: "p1".to_string(),
            name: "Rice".to_string(),
            description: String::new(),
            price: None,
            image: None,
            brand: None,
            tags: None,
            house_hold_id: None,
        };

        let value = serde_json::to_value(&product).unwrap();
        assert_eq!(value["_id"], "p1");
        assert!(value.get("price").is_none());
    }

    #[test]
    fn product_page_consumed_verbatim() {
        let json = r#"{"products": [{"_id": "a", "name": "A", "description": "d"}]}"#;
        let page: ProductPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.products.len(), 1);
    }
}
