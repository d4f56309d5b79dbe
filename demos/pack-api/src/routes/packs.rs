use std::sync::Arc;

use axum::extract::{Path, State};
use axum::response::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::AppError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct GeneratePacksBody {
    pub players: Option<i64>,
    pub cards: Option<i64>,
}

/// POST /api/packs  {"players": 2, "cards": 3}
///
/// One pack per player drawn from the whole collection. Defaults to one
/// player and three cards.
pub async fn generate_packs(
    State(state): State<Arc<AppState>>,
    Json(body): Json<GeneratePacksBody>,
) -> Result<Json<Value>, AppError> {
    let players = positive(body.players.unwrap_or(1), "players")?;
    let cards = positive(body.cards.unwrap_or(3), "cards")?;

    let packs = state.sdk.generate_packs(players, cards).await?;
    let count = packs.len();
    Ok(Json(json!({ "data": packs, "count": count })))
}

/// GET /open/{token}
///
/// The cards of a live pack. Missing, expired and broken packs all answer
/// 404 with the same message.
pub async fn open_pack(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<Json<Value>, AppError> {
    let cards = state
        .sdk
        .get_pack(&token)
        .await
        .map_err(|e| match e {
            chorepack::ChorepackError::NotFound(_) => {
                AppError::not_found("This link has expired or doesn't exist")
            }
            other => other.into(),
        })?;
    Ok(Json(json!({ "data": cards, "count": cards.len() })))
}

fn positive(n: i64, field: &str) -> Result<usize, AppError> {
    usize::try_from(n)
        .ok()
        .filter(|n| *n > 0)
        .ok_or_else(|| AppError::bad_request(format!("'{field}' must be a positive integer")))
}
