//! Search gateway.

use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Search gateway query parameters.
///
/// `page` and `page_size` are forwarded to the upstream as received; their
/// interpretation belongs to the upstream search API.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub query: Option<String>,
    pub page: Option<String>,
    #[serde(rename = "pageSize")]
    pub page_size: Option<String>,
}

/// Forward a free-text search to the upstream search API.
///
/// Fails with 400 when `query` is absent or empty. On success the upstream
/// JSON body is returned verbatim.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Result<Response> {
    let query = params
        .query
        .as_deref()
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Search query is required".to_string()))?;

    let page = params.page.as_deref().unwrap_or("1");
    let page_size = params.page_size.as_deref().unwrap_or("10");

    let body = state.upstream().search(query, page, page_size).await?;

    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
