//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures server-side failures to
//! Sentry before responding to the client. All route handlers return
//! `Result<T, AppError>`. Client-facing bodies are JSON `{"error": "..."}`
//! with generic messages; upstream and database detail stays in the logs.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::upstream::UpstreamError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed required input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The image gateway received non-image content from upstream.
    #[error("Content policy violation: {0}")]
    ContentPolicy(String),

    /// A proxied upstream API failed (non-success status or network error).
    #[error("Upstream error: {0}")]
    Upstream(#[from] UpstreamError),

    /// Upstream image fetch failed; the upstream status is propagated.
    #[error("Image unavailable: upstream returned {0}")]
    ImageUnavailable(StatusCode),

    /// Cart document storage failed.
    #[error("Persistence error: {0}")]
    Persistence(#[from] RepositoryError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry; validation failures are the
        // caller's problem and stay out of error tracking.
        if matches!(
            self,
            Self::Upstream(_) | Self::Persistence(_) | Self::Internal(_)
        ) {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let status = match &self {
            Self::Validation(_) | Self::ContentPolicy(_) => StatusCode::BAD_REQUEST,
            Self::ImageUnavailable(status) => *status,
            Self::Upstream(_) | Self::Persistence(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose upstream or database detail to clients
        let message = match &self {
            Self::Validation(msg) => msg.clone(),
            Self::ContentPolicy(_) => "Invalid image type".to_string(),
            Self::ImageUnavailable(_) => "Failed to load image".to_string(),
            Self::Upstream(_) => "External service error".to_string(),
            Self::Persistence(_) => "Failed to save cart".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        };

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn test_app_error_display() {
        let err = AppError::Validation("Search query is required".to_string());
        assert_eq!(err.to_string(), "Validation error: Search query is required");
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(
            status_of(AppError::Validation("missing".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::ContentPolicy("text/html".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::ImageUnavailable(StatusCode::NOT_FOUND)),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Internal("boom".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_internal_detail_is_suppressed() {
        let response =
            AppError::Internal("connection refused to 10.0.0.5".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        // Body is a generic message; detail only reaches logs/Sentry.
    }
}
