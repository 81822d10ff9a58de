//! HTTP route handlers for the storefront gateways.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health        - Liveness check
//! GET  /health/ready  - Readiness check (database reachable)
//!
//! # Gateways
//! GET  /products      - Default catalog listing (proxied, verbatim JSON)
//! GET  /search        - Free-text search (proxied, verbatim JSON)
//! GET  /image         - Image streaming with 24h cache directive
//!
//! # Persistence
//! POST /cart          - Store one cart document per submission
//! ```
//!
//! Every handler is a self-contained request: open an upstream connection
//! (or one database insert), relay, done. No shared mutable state between
//! requests, no retries.

pub mod cart;
pub mod image;
pub mod products;
pub mod search;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/search", get(search::index))
        .route("/image", get(image::show))
        .route("/cart", post(cart::create))
}
