use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use super::card::Card;
use crate::error::{ChorepackError, Result};

// ---------------------------------------------------------------------------
// Pack: a persisted, expiring draw
// ---------------------------------------------------------------------------

/// A stored pack. Immutable once created.
///
/// `card_ids` keeps draw order and may repeat an id when the same card was
/// drawn more than once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pack {
    pub token: String,
    pub card_ids: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Pack {
    /// Whether the pack can still be opened at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// Row shape of the `packs` table. Timestamps are epoch milliseconds and
/// `card_ids` is a JSON array.
#[derive(Debug, Deserialize)]
pub(crate) struct PackRow {
    pub token: String,
    pub card_ids: String,
    pub created_at: i64,
    pub expires_at: i64,
}

impl TryFrom<PackRow> for Pack {
    type Error = ChorepackError;

    fn try_from(row: PackRow) -> Result<Self> {
        Ok(Pack {
            card_ids: serde_json::from_str(&row.card_ids)?,
            created_at: from_millis(row.created_at)?,
            expires_at: from_millis(row.expires_at)?,
            token: row.token,
        })
    }
}

fn from_millis(ms: i64) -> Result<DateTime<Utc>> {
    Utc.timestamp_millis_opt(ms)
        .single()
        .ok_or_else(|| ChorepackError::InvalidInput(format!("Timestamp out of range: {}", ms)))
}

// ---------------------------------------------------------------------------
// PlayerPack: one entry of a generation run
// ---------------------------------------------------------------------------

/// The pack issued to one player by the generation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPack {
    /// 1-based player number.
    pub player_index: usize,
    pub cards: Vec<Card>,
    pub token: String,
    pub shareable_link: String,
}
