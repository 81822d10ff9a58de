//! HTTP client for the three upstream APIs (catalog, search, image store).
//!
//! One `reqwest` client is shared across all requests with the `x-api-key`
//! header installed as a default, so the key is injected server-side and
//! never reaches the browser. Listing and search bodies are relayed
//! verbatim; images are streamed without buffering.
//!
//! No retries are attempted and no explicit timeout is set - the transport
//! default applies (see DESIGN.md, decision D3).

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::config::UpstreamConfig;

/// Errors that can occur when talking to an upstream API.
#[derive(Debug, Error)]
pub enum UpstreamError {
    /// HTTP transport failure (connect, DNS, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Upstream responded with a non-success status.
    #[error("upstream returned status {status}")]
    Status { status: u16 },

    /// The configured API key cannot be used as a header value.
    #[error("invalid API key header: {0}")]
    InvalidHeader(String),
}

/// A successful image fetch, ready to be streamed to the caller.
pub struct ImageFetch {
    /// Upstream-declared content type (defaulted to `image/jpeg` when the
    /// upstream omits the header, matching the catalog's behavior).
    pub content_type: String,
    /// The open upstream response; consume with `bytes_stream()`.
    pub response: reqwest::Response,
}

/// Client for the upstream catalog, search, and image APIs.
#[derive(Clone)]
pub struct UpstreamClient {
    client: reqwest::Client,
    products_base_url: String,
    search_base_url: String,
    image_base_url: String,
}

impl UpstreamClient {
    /// Create a new upstream client with the shared API key installed.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build or the API key is
    /// not a valid header value.
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        let mut headers = HeaderMap::new();

        let mut api_key = HeaderValue::from_str(config.api_key.expose_secret())
            .map_err(|e| UpstreamError::InvalidHeader(e.to_string()))?;
        api_key.set_sensitive(true);
        headers.insert("x-api-key", api_key);

        let client = reqwest::Client::builder().default_headers(headers).build()?;

        Ok(Self {
            client,
            products_base_url: config.products_base_url.clone(),
            search_base_url: config.search_base_url.clone(),
            image_base_url: config.image_base_url.clone(),
        })
    }

    /// Fetch the default product listing and return the JSON body verbatim.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` on transport failure or non-success status.
    #[instrument(skip(self))]
    pub async fn list_products(&self, page: u32, page_size: u32) -> Result<String, UpstreamError> {
        let url = format!("{}?page={page}&pageSize={page_size}", self.products_base_url);
        self.relay_json(&url).await
    }

    /// Forward a free-text search and return the JSON body verbatim.
    ///
    /// `page` and `page_size` are forwarded as received (the upstream owns
    /// their interpretation).
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError` on transport failure or non-success status.
    #[instrument(skip(self))]
    pub async fn search(
        &self,
        query: &str,
        page: &str,
        page_size: &str,
    ) -> Result<String, UpstreamError> {
        let url = format!(
            "{}?search={}&page={page}&pageSize={page_size}",
            self.search_base_url,
            urlencoding::encode(query)
        );
        self.relay_json(&url).await
    }

    /// Open an image resource for streaming.
    ///
    /// The upstream URL is the configured base with `path` appended
    /// verbatim. The caller is responsible for the content-type policy
    /// check before relaying bytes.
    ///
    /// # Errors
    ///
    /// Returns `UpstreamError::Status` carrying the upstream status on
    /// non-success, so the gateway can propagate it.
    #[instrument(skip(self))]
    pub async fn fetch_image(&self, path: &str) -> Result<ImageFetch, UpstreamError> {
        let url = format!("{}{path}", self.image_base_url);
        debug!(url = %url, "fetching upstream image");

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            tracing::warn!(status = %status, path = %path, "upstream image fetch failed");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("image/jpeg")
            .to_string();

        Ok(ImageFetch {
            content_type,
            response,
        })
    }

    /// GET a JSON endpoint and return the raw body on success.
    async fn relay_json(&self, url: &str) -> Result<String, UpstreamError> {
        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body.chars().take(500).collect::<String>(),
                "upstream API returned non-success status"
            );
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }

        Ok(body)
    }
}
