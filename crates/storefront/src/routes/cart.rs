//! Cart persistence handler.

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::db::CartRepository;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Store a submitted cart as one new document.
///
/// The body must be a JSON object with an `items` array. Items are stored
/// verbatim with no per-item schema validation - item shape is loosely
/// typed by contract. An empty array is accepted and creates a zero-item
/// document. Each submission creates a new document; there is no dedup.
#[instrument(skip(state, body))]
pub async fn create(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response> {
    let items = body
        .get("items")
        .filter(|items| items.is_array())
        .ok_or_else(|| AppError::Validation("Invalid request format".to_string()))?;

    let document = CartRepository::new(state.pool()).insert(items).await?;
    tracing::info!(cart_id = %document.id, "cart saved");

    Ok((
        StatusCode::CREATED,
        Json(serde_json::json!({ "message": "Cart saved successfully!" })),
    )
        .into_response())
}
