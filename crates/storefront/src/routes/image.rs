//! Image streaming gateway.
//!
//! Resolves a relative image path against the configured upstream image
//! store and streams the body through unchanged. The content-type check
//! keeps this endpoint from being used as an open proxy for arbitrary
//! upstream content.

use axum::body::Body;
use axum::extract::{Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::state::AppState;
use crate::upstream::UpstreamError;

/// Public cache lifetime for served images: 24 hours.
const CACHE_CONTROL: &str = "public, max-age=86400";

/// Image gateway query parameters.
#[derive(Debug, Deserialize)]
pub struct ImageQuery {
    pub path: Option<String>,
}

/// Stream an upstream image resource.
///
/// Fails with 400 when `path` is missing or when the upstream response is
/// not image content. Upstream non-success statuses are propagated to the
/// caller with a generic body.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Query(params): Query<ImageQuery>,
) -> Result<Response> {
    let path = params
        .path
        .as_deref()
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("Image path is required".to_string()))?;

    let fetch = match state.upstream().fetch_image(path).await {
        Ok(fetch) => fetch,
        Err(UpstreamError::Status { status }) => {
            // Propagate the upstream status to the caller, body stays generic
            return Err(axum::http::StatusCode::from_u16(status).map_or_else(
                |_| AppError::Internal(format!("invalid upstream status {status}")),
                AppError::ImageUnavailable,
            ));
        }
        Err(e) => return Err(AppError::Upstream(e)),
    };

    if !fetch.content_type.starts_with("image/") {
        return Err(AppError::ContentPolicy(fetch.content_type));
    }

    let headers = [
        (header::CONTENT_TYPE, fetch.content_type.clone()),
        (header::CACHE_CONTROL, CACHE_CONTROL.to_string()),
    ];
    let body = Body::from_stream(fetch.response.bytes_stream());

    Ok((headers, body).into_response())
}
