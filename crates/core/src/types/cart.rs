//! The client-held cart: an ordered list of product snapshots.
//!
//! Lines are snapshots, not references - a product already in the cart is
//! unaffected by later catalog changes. Duplicates by product id are
//! permitted; there is no dedup invariant. Removal is positional and
//! preserves the relative order of the remaining lines.

use serde::{Deserialize, Serialize};

use super::product::Product;

/// One cart line: a product copied at add-time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
}

impl From<&Product> for CartLine {
    fn from(product: &Product) -> Self {
        Self {
            product: product.clone(),
        }
    }
}

/// An ordered collection of product snapshots pending submission.
///
/// Cart contents are a pure function of the add/remove calls made on it;
/// no background process mutates a cart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Append a snapshot of `product` to the cart.
    pub fn add(&mut self, product: &Product) {
        self.lines.push(CartLine::from(product));
    }

    /// Remove the line at `index`, preserving the order of the rest.
    ///
    /// Out-of-range indices are ignored (the remove control for a line
    /// that no longer exists is a no-op, not a panic).
    pub fn remove(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
        }
    }

    /// The lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// The submission payload: `{"items": [...]}` with the full snapshots.
    #[must_use]
    pub fn submission_payload(&self) -> serde_json::Value {
        serde_json::json!({ "items": self.lines })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            price: Some(2.0),
            image: None,
            brand: None,
            tags: None,
            house_hold_id: None,
        }
    }

    #[test]
    fn add_appends_in_order() {
        let mut cart = Cart::new();
        cart.add(&product("a", "A"));
        cart.add(&product("b", "B"));

        let names: Vec<_> = cart.lines().iter().map(|l| l.product.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[test]
    fn duplicates_by_id_are_permitted() {
        let mut cart = Cart::new();
        cart.add(&product("a", "A"));
        cart.add(&product("a", "A"));
        assert_eq!(cart.len(), 2);
    }

    #[test]
    fn remove_preserves_relative_order() {
        let mut cart = Cart::new();
        for (id, name) in [("a", "A"), ("b", "B"), ("c", "C"), ("d", "D")] {
            cart.add(&product(id, name));
        }

        cart.remove(1);

        assert_eq!(cart.len(), 3);
        let ids: Vec<_> = cart.lines().iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, ["a", "c", "d"]);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut cart = Cart::new();
        cart.add(&product("a", "A"));
        cart.remove(5);
        assert_eq!(cart.len(), 1);
    }

    #[test]
    fn snapshot_is_unaffected_by_later_catalog_changes() {
        let mut upstream = product("a", "Old Name");
        let mut cart = Cart::new();
        cart.add(&upstream);

        upstream.name = "New Name".to_string();

        assert_eq!(cart.lines()[0].product.name, "Old Name");
    }

    #[test]
    fn submission_payload_wraps_items() {
        let mut cart = Cart::new();
        cart.add(&product("a", "A"));

        let payload = cart.submission_payload();
        let items = payload["items"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["_id"], "a");
        assert_eq!(items[0]["name"], "A");
    }
}
