//! Browse session state machine.
//!
//! Holds everything the grid UI binds to: the current product page, the
//! search text, the selected product, the cart, and the loading/error
//! flags. All mutation happens through the methods here; there is no
//! background mutation of session state.
//!
//! Fetches are tagged with a monotonically increasing sequence number.
//! A completion is applied only when its token is the latest issued, so a
//! slow listing fetch that resolves after a newer search fetch cannot
//! overwrite the newer result.

use hearth_core::{Cart, Product};

/// Token identifying one issued fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchToken(u64);

/// In-memory state of one browsing session.
///
/// Initialized empty, mutated by user actions and fetch completions,
/// discarded on teardown. Nothing here survives a reload.
#[derive(Debug, Default)]
pub struct BrowseSession {
    cart: Cart,
    search_input: String,
    products: Vec<Product>,
    loading: bool,
    error: Option<String>,
    selected: Option<Product>,
    latest_fetch: u64,
}

impl BrowseSession {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the current search text.
    pub fn set_search_input(&mut self, text: &str) {
        text.clone_into(&mut self.search_input);
    }

    #[must_use]
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    /// Start a fetch: sets the loading flag, clears any previous error, and
    /// returns the token the completion must present.
    pub fn begin_fetch(&mut self) -> FetchToken {
        self.loading = true;
        self.error = None;
        self.latest_fetch += 1;
        FetchToken(self.latest_fetch)
    }

    /// Apply a fetch completion.
    ///
    /// Stale completions (any token older than the latest issued) are
    /// discarded entirely: they neither replace the product list nor clear
    /// the loading flag, which still belongs to the newer fetch. For the
    /// current fetch, success replaces the product list and failure sets
    /// the error message; loading is cleared on both paths.
    pub fn apply_fetch(&mut self, token: FetchToken, result: Result<Vec<Product>, String>) {
        if token.0 != self.latest_fetch {
            return;
        }

        match result {
            Ok(products) => self.products = products,
            Err(message) => self.error = Some(message),
        }
        self.loading = false;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        self.loading
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Open the detail view for a product.
    pub fn select(&mut self, product: &Product) {
        self.selected = Some(product.clone());
    }

    /// Close the detail view (close control or click outside the panel).
    pub fn close_detail(&mut self) {
        self.selected = None;
    }

    #[must_use]
    pub fn selected(&self) -> Option<&Product> {
        self.selected.as_ref()
    }

    /// Append a snapshot of `product` to the cart.
    pub fn add_to_cart(&mut self, product: &Product) {
        self.cart.add(product);
    }

    /// Remove the cart line at `index` (order-preserving).
    pub fn remove_from_cart(&mut self, index: usize) {
        self.cart.remove(index);
    }

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Submission is enabled only for a non-empty cart.
    #[must_use]
    pub fn can_submit(&self) -> bool {
        !self.cart.is_empty()
    }
}
