//! HTTP client for this system's own gateway surface.
//!
//! The browse client never talks to the upstream APIs directly (the API
//! key lives server-side); it goes through the gateways. The
//! [`StorefrontApi`] trait is the seam tests use to substitute a double
//! for the network.

use hearth_core::{Cart, Product, ProductPage};
use thiserror::Error;

/// Errors from the storefront API surface.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The gateway responded with a non-success status.
    #[error("API error: {status} - {message}")]
    Status { status: u16, message: String },
}

/// The operations the browse client needs from the storefront.
pub trait StorefrontApi {
    /// Fetch the default product listing (GET /products).
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch search results for `query` (GET /search).
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Submit the cart (POST /cart).
    fn submit_cart(&self, cart: &Cart) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// `reqwest`-backed client for a running storefront.
#[derive(Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create a client for the storefront at `base_url`
    /// (e.g. `http://127.0.0.1:3000`).
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    async fn get_products(&self, url: String) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        let page: ProductPage = response.json().await?;
        Ok(page.products)
    }
}

impl StorefrontApi for ApiClient {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        self.get_products(format!("{}/products", self.base_url)).await
    }

    async fn search(&self, query: &str) -> Result<Vec<Product>, ApiError> {
        let url = format!(
            "{}/search?query={}&page=1&pageSize=10",
            self.base_url,
            urlencoding::encode(query)
        );
        self.get_products(url).await
    }

    async fn submit_cart(&self, cart: &Cart) -> Result<(), ApiError> {
        let url = format!("{}/cart", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&cart.submission_payload())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(())
    }
}
