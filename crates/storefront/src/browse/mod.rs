//! The headless browse client.
//!
//! This is the client application for the storefront, expressed without
//! presentational markup: a pure session state machine ([`session`]), a
//! cancellable debounce timer ([`debounce`]), and an HTTP client for this
//! system's own gateway surface ([`client`]). [`BrowseApp`] wires the three
//! together with the semantics the grid UI drives:
//!
//! - Initial load fetches the default catalog listing.
//! - Typing re-arms a 500 ms debounce; when it fires with a non-empty
//!   value, a search fetch is issued with the final text.
//! - The explicit search control fetches immediately with the current text.
//! - Every fetch is sequence-tagged; a slow fetch that completes after a
//!   newer one was issued is discarded rather than overwriting its result.
//! - Add-to-cart snapshots the product; submission posts the whole cart and
//!   does not clear it (the session just reports the outcome).

pub mod client;
pub mod debounce;
pub mod session;

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use hearth_core::Product;

use client::{ApiError, StorefrontApi};
use debounce::Debouncer;
use session::BrowseSession;

/// Quiet period between keystrokes before a search fetch is issued.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// The browse client: session state plus the fetch/debounce machinery.
pub struct BrowseApp<S> {
    api: Arc<S>,
    session: Arc<Mutex<BrowseSession>>,
    debouncer: Debouncer,
}

impl<S: StorefrontApi + Send + Sync + 'static> BrowseApp<S> {
    /// Create a browse client over the given API with the standard 500 ms
    /// search debounce.
    #[must_use]
    pub fn new(api: S) -> Self {
        Self::with_debounce(api, SEARCH_DEBOUNCE)
    }

    /// Create a browse client with a custom debounce period.
    #[must_use]
    pub fn with_debounce(api: S, debounce: Duration) -> Self {
        Self {
            api: Arc::new(api),
            session: Arc::new(Mutex::new(BrowseSession::new())),
            debouncer: Debouncer::new(debounce),
        }
    }

    /// Fetch the default listing (page mount).
    pub async fn load_initial(&self) {
        Self::run_fetch(Arc::clone(&self.api), Arc::clone(&self.session)).await;
    }

    /// Record a keystroke and re-arm the debounce timer.
    ///
    /// The fetch fires once, [`SEARCH_DEBOUNCE`] after the last call, with
    /// whatever text the session holds at that moment. Empty input does not
    /// schedule a fetch; a fetch already in flight runs to completion and
    /// its result is applied or discarded by sequence tag.
    pub fn input(&mut self, text: &str) {
        lock(&self.session).set_search_input(text);

        if text.is_empty() {
            self.debouncer.cancel();
            return;
        }

        let api = Arc::clone(&self.api);
        let session = Arc::clone(&self.session);
        self.debouncer
            .schedule(async move { Self::run_fetch(api, session).await });
    }

    /// Fetch immediately with the current text (search control clicked).
    pub async fn search_now(&mut self) {
        self.debouncer.cancel();
        Self::run_fetch(Arc::clone(&self.api), Arc::clone(&self.session)).await;
    }

    /// Submit the cart to the persistence service.
    ///
    /// A no-op when the cart is empty (the submit control is disabled).
    /// The cart is left intact after a successful submission; the caller
    /// decides what to show.
    ///
    /// # Errors
    ///
    /// Returns the API error when submission fails; the cart is unchanged.
    pub async fn submit_cart(&self) -> Result<(), ApiError> {
        let cart = {
            let session = lock(&self.session);
            if !session.can_submit() {
                return Ok(());
            }
            session.cart().clone()
        };

        self.api.submit_cart(&cart).await
    }

    /// Run a closure against the session state.
    pub fn with_session<T>(&self, f: impl FnOnce(&mut BrowseSession) -> T) -> T {
        f(&mut lock(&self.session))
    }

    /// Append a product snapshot to the cart (grid or detail view).
    pub fn add_to_cart(&self, product: &Product) {
        lock(&self.session).add_to_cart(product);
    }

    /// Remove the cart line at `index`.
    pub fn remove_from_cart(&self, index: usize) {
        lock(&self.session).remove_from_cart(index);
    }

    async fn run_fetch(api: Arc<S>, session: Arc<Mutex<BrowseSession>>) {
        let (token, query) = {
            let mut state = lock(&session);
            let query = state.search_input().to_owned();
            (state.begin_fetch(), query)
        };

        let result = if query.is_empty() {
            api.fetch_products().await
        } else {
            api.search(&query).await
        };

        lock(&session).apply_fetch(token, result.map_err(|e| e.to_string()));
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use hearth_core::Cart;

    /// Test double: canned responses plus call counters.
    struct FakeApi {
        listing: Vec<Product>,
        search_calls: AtomicUsize,
        listing_calls: AtomicUsize,
        last_query: Mutex<Option<String>>,
        submitted: Mutex<Vec<serde_json::Value>>,
    }

    impl FakeApi {
        fn new(listing: Vec<Product>) -> Self {
            Self {
                listing,
                search_calls: AtomicUsize::new(0),
                listing_calls: AtomicUsize::new(0),
                last_query: Mutex::new(None),
                submitted: Mutex::new(Vec::new()),
            }
        }
    }

    impl StorefrontApi for Arc<FakeApi> {
        fn fetch_products(
            &self,
        ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
            self.listing_calls.fetch_add(1, Ordering::SeqCst);
            let listing = self.listing.clone();
            async move { Ok(listing) }
        }

        fn search(
            &self,
            query: &str,
        ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            *self.last_query.lock().unwrap() = Some(query.to_owned());
            let listing = self.listing.clone();
            async move { Ok(listing) }
        }

        fn submit_cart(
            &self,
            cart: &Cart,
        ) -> impl Future<Output = Result<(), ApiError>> + Send {
            self.submitted.lock().unwrap().push(cart.submission_payload());
            async move { Ok(()) }
        }
    }

    /// Test double whose search takes a while to resolve.
    struct SlowApi {
        listing: Vec<Product>,
        search_delay: Duration,
    }

    impl StorefrontApi for Arc<SlowApi> {
        fn fetch_products(
            &self,
        ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
            let listing = self.listing.clone();
            async move { Ok(listing) }
        }

        fn search(
            &self,
            _query: &str,
        ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
            let listing = self.listing.clone();
            let delay = self.search_delay;
            async move {
                tokio::time::sleep(delay).await;
                Ok(listing)
            }
        }

        fn submit_cart(
            &self,
            _cart: &Cart,
        ) -> impl Future<Output = Result<(), ApiError>> + Send {
            async move { Ok(()) }
        }
    }

    fn product(id: &str) -> Product {
        Product {
            id: id.to_string(),
            name: id.to_uppercase(),
            description: String::new(),
            price: None,
            image: None,
            brand: None,
            tags: None,
            house_hold_id: None,
        }
    }

    #[tokio::test(start_paused = true)]
    async fn typing_within_quiet_period_fetches_exactly_once_with_final_text() {
        let api = Arc::new(FakeApi::new(vec![product("a")]));
        let mut app = BrowseApp::new(Arc::clone(&api));

        for text in ["m", "mi", "mil", "milk"] {
            app.input(text);
            tokio::task::yield_now().await;
            tokio::time::advance(Duration::from_millis(100)).await;
            tokio::task::yield_now().await;
        }
        assert_eq!(api.search_calls.load(Ordering::SeqCst), 0);

        // Quiet period elapses after the last keystroke
        tokio::time::advance(Duration::from_millis(500)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.last_query.lock().unwrap().as_deref(), Some("milk"));
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_input_cancels_pending_fetch() {
        let api = Arc::new(FakeApi::new(vec![product("a")]));
        let mut app = BrowseApp::new(Arc::clone(&api));

        app.input("milk");
        tokio::task::yield_now().await;
        app.input("");

        tokio::time::advance(Duration::from_secs(2)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        assert_eq!(api.search_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn clearing_input_mid_fetch_still_clears_loading() {
        let api = Arc::new(SlowApi {
            listing: vec![product("a")],
            search_delay: Duration::from_secs(10),
        });
        let mut app = BrowseApp::new(Arc::clone(&api));

        app.input("milk");
        tokio::task::yield_now().await;
        tokio::time::advance(Duration::from_millis(500)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }
        app.with_session(|s| assert!(s.is_loading()));

        // Clearing the input must not strand the in-flight fetch
        app.input("");
        tokio::time::advance(Duration::from_secs(10)).await;
        for _ in 0..4 {
            tokio::task::yield_now().await;
        }

        app.with_session(|s| {
            assert!(!s.is_loading());
            assert!(s.error().is_none());
            assert_eq!(s.products().len(), 1);
        });
    }

    #[tokio::test]
    async fn initial_load_uses_the_listing_gateway() {
        let api = Arc::new(FakeApi::new(vec![product("a"), product("b")]));
        let app = BrowseApp::new(Arc::clone(&api));

        app.load_initial().await;

        assert_eq!(api.listing_calls.load(Ordering::SeqCst), 1);
        app.with_session(|s| {
            assert_eq!(s.products().len(), 2);
            assert!(!s.is_loading());
        });
    }

    #[tokio::test]
    async fn manual_search_fetches_immediately() {
        let api = Arc::new(FakeApi::new(vec![product("a")]));
        let mut app = BrowseApp::new(Arc::clone(&api));

        app.input("rice");
        app.search_now().await;

        assert_eq!(api.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(api.last_query.lock().unwrap().as_deref(), Some("rice"));
    }

    #[tokio::test]
    async fn submit_posts_cart_and_leaves_it_intact() {
        let api = Arc::new(FakeApi::new(vec![]));
        let app = BrowseApp::new(Arc::clone(&api));

        app.add_to_cart(&product("a"));
        app.add_to_cart(&product("b"));
        app.submit_cart().await.unwrap();

        assert_eq!(api.submitted.lock().unwrap().len(), 1);
        app.with_session(|s| assert_eq!(s.cart().len(), 2));
    }

    #[tokio::test]
    async fn submit_with_empty_cart_is_a_noop() {
        let api = Arc::new(FakeApi::new(vec![]));
        let app = BrowseApp::new(Arc::clone(&api));

        app.submit_cart().await.unwrap();

        assert!(api.submitted.lock().unwrap().is_empty());
    }
}
