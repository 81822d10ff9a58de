//! Catalog listing gateway.

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// The listing gateway always asks the upstream for its first page.
const DEFAULT_PAGE: u32 = 1;
const DEFAULT_PAGE_SIZE: u32 = 10;

/// Forward the default product listing request to the upstream catalog.
///
/// The upstream JSON body is returned verbatim with status 200. Any
/// upstream failure surfaces as a generic 500; the cause is logged
/// server-side only.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let body = state
        .upstream()
        .list_products(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
        .await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
