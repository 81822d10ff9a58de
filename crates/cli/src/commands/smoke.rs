//! Scripted browse session against a running storefront.
//!
//! Exercises the whole data flow end to end: default listing, debounced
//! search (typed one character at a time, so the debounce and
//! stale-response machinery run for real), detail selection, cart add, and
//! submission. Fails loudly on the first step that misbehaves, which makes
//! it usable as a deployment smoke check:
//!
//! ```bash
//! hearth-cli smoke --base-url http://127.0.0.1:3000 --query milk
//! ```

use std::time::Duration;

use thiserror::Error;
use tracing::info;

use hearth_core::display_price;
use hearth_storefront::browse::client::{ApiClient, ApiError};
use hearth_storefront::browse::{BrowseApp, SEARCH_DEBOUNCE};

#[derive(Debug, Error)]
pub enum SmokeError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("storefront misbehaved: {0}")]
    Check(String),
}

/// Run the scripted session.
///
/// # Errors
///
/// Returns `SmokeError` when a gateway fails or a session invariant does
/// not hold (e.g. a fetch left the loading flag set).
pub async fn run(base_url: &str, query: &str) -> Result<(), SmokeError> {
    let api = ApiClient::new(base_url);
    let mut app = BrowseApp::new(api);

    // Page mount: default listing
    app.load_initial().await;
    let listed = app.with_session(|s| {
        if s.is_loading() {
            return Err("loading flag stuck after initial fetch".to_string());
        }
        if let Some(error) = s.error() {
            return Err(format!("initial listing failed: {error}"));
        }
        Ok(s.products().to_vec())
    });
    let listed = listed.map_err(SmokeError::Check)?;
    info!(count = listed.len(), "default listing loaded");

    // Type the query one keystroke at a time; the debounce must collapse
    // this into a single search fetch.
    let mut typed = String::new();
    for c in query.chars() {
        typed.push(c);
        app.input(&typed);
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    tokio::time::sleep(SEARCH_DEBOUNCE + Duration::from_millis(200)).await;

    let found = app.with_session(|s| {
        s.error().map_or_else(
            || Ok(s.products().to_vec()),
            |error| Err(format!("search failed: {error}")),
        )
    });
    let found = found.map_err(SmokeError::Check)?;
    info!(count = found.len(), query = %query, "search results loaded");

    // Inspect and add the first couple of results (falling back to the
    // default listing if the search came back empty).
    let candidates = if found.is_empty() { listed } else { found };
    for product in candidates.iter().take(2) {
        app.with_session(|s| s.select(product));
        app.add_to_cart(product);
        app.with_session(|s| s.close_detail());
        info!(
            id = %product.id,
            name = %product.name,
            price = %display_price(product.price),
            "added to cart"
        );
    }

    let cart_len = app.with_session(|s| s.cart().len());
    if cart_len == 0 {
        info!("nothing to submit (no products available); smoke run ends here");
        return Ok(());
    }

    // Submit; the cart stays intact afterwards.
    app.submit_cart().await?;
    let after = app.with_session(|s| s.cart().len());
    if after != cart_len {
        return Err(SmokeError::Check(format!(
            "cart changed across submission: {cart_len} -> {after}"
        )));
    }
    info!(items = cart_len, "cart submitted");

    Ok(())
}
