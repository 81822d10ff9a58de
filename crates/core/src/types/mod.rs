//! Core types for Hearth.

pub mod cart;
pub mod price;
pub mod product;

pub use cart::{Cart, CartLine};
pub use price::display_price;
pub use product::{Product, ProductPage};
