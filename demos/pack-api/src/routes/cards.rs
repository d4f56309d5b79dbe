use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use chorepack::Card;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

/// GET /api/cards
///
/// The whole collection, newest first.
pub async fn list_cards(State(state): State<Arc<AppState>>) -> Result<Json<Value>, AppError> {
    let cards = state.sdk.list_cards().await?;
    let count = cards.len();
    Ok(Json(json!({ "data": cards, "count": count })))
}

/// POST /api/cards
///
/// Insert a card, or update it when the body carries an `id`.
pub async fn save_card(
    State(state): State<Arc<AppState>>,
    Json(card): Json<Card>,
) -> Result<Json<Value>, AppError> {
    let saved = state.sdk.save_card(card).await?;
    Ok(Json(json!({ "data": saved })))
}

/// DELETE /api/cards/{id}
pub async fn delete_card(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    if state.sdk.delete_card(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::not_found(format!("No card with id '{id}'")))
    }
}
