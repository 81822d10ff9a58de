//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::StorefrontConfig;
use crate::upstream::{UpstreamClient, UpstreamError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the database pool and the upstream API client.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    pool: PgPool,
    upstream: UpstreamClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns an error if the upstream HTTP client cannot be built.
    pub fn new(config: &StorefrontConfig, pool: PgPool) -> Result<Self, UpstreamError> {
        let upstream = UpstreamClient::new(&config.upstream)?;

        Ok(Self {
            inner: Arc::new(AppStateInner { pool, upstream }),
        })
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the upstream API client.
    #[must_use]
    pub fn upstream(&self) -> &UpstreamClient {
        &self.inner.upstream
    }
}
