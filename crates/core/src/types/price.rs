//! Price display for loosely-typed upstream prices.
//!
//! Upstream prices are plain currency-less JSON numbers and may be absent
//! entirely; a missing price renders as "Free".

/// Format an optional price for display.
#[must_use]
pub fn display_price(price: Option<f64>) -> String {
    price.map_or_else(|| "Free".to_string(), |amount| format!("${amount}"))
}
