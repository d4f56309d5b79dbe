//! The card collection: the read side consumed by pack generation and pack
//! opening, plus the save/delete operations used by the collection editor.

use std::collections::HashMap;

use chrono::Utc;
use duckdb::params_from_iter;

use crate::connection::Connection;
use crate::error::{ChorepackError, Result};
use crate::models::{Card, CardRow};
use crate::sql_builder::SqlBuilder;

/// Query interface for the `cards` table.
pub struct CardQuery<'a> {
    conn: &'a Connection,
}

impl<'a> CardQuery<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    // -- Reads -------------------------------------------------------------

    /// Every card in the collection, newest first.
    pub fn list(&self) -> Result<Vec<Card>> {
        let (sql, params) = SqlBuilder::new("cards")
            .order_by(&["created_at DESC", "id"])
            .build();
        self.fetch(&sql, params)
    }

    /// Look up a single card by id.
    pub fn get(&self, id: &str) -> Result<Option<Card>> {
        let (sql, params) = SqlBuilder::new("cards").where_eq("id", id).limit(1).build();
        Ok(self.fetch(&sql, params)?.into_iter().next())
    }

    /// Look up many cards at once, keyed by id.
    ///
    /// Ids that do not exist are simply absent from the map; repeated ids
    /// are looked up once.
    pub fn get_by_ids<S: AsRef<str>>(&self, ids: &[S]) -> Result<HashMap<String, Card>> {
        let mut unique: Vec<&str> = ids.iter().map(|s| s.as_ref()).collect();
        unique.sort_unstable();
        unique.dedup();

        let (sql, params) = SqlBuilder::new("cards").where_in("id", &unique).build();
        let cards = self.fetch(&sql, params)?;

        Ok(cards
            .into_iter()
            .filter_map(|card| card.id.clone().map(|id| (id, card)))
            .collect())
    }

    pub fn count(&self) -> Result<usize> {
        let n = self
            .conn
            .execute_scalar("SELECT COUNT(*) FROM cards", [])?
            .and_then(|v| v.as_u64())
            .unwrap_or(0);
        Ok(n as usize)
    }

    // -- Writes ------------------------------------------------------------

    /// Insert a new card, or update it in place when it already has an id.
    ///
    /// Returns the stored card (with its id filled in). Updating an id that
    /// is not in the collection fails with `NotFound`.
    pub fn save(&self, card: &Card) -> Result<Card> {
        if card.title.trim().is_empty() {
            return Err(ChorepackError::InvalidInput(
                "Card title must not be empty".to_string(),
            ));
        }

        match &card.id {
            Some(id) => {
                let updated = self.conn.execute_update(
                    "UPDATE cards SET title = ?, rarity = ?, flavour_text = ?, \
                     time_estimate = ?, frequency = ?, image_url = ? WHERE id = ?",
                    duckdb::params![
                        card.title,
                        card.rarity.as_str(),
                        card.flavour_text,
                        card.time_estimate,
                        card.frequency,
                        card.image_url,
                        id,
                    ],
                )?;
                if updated == 0 {
                    return Err(ChorepackError::NotFound(format!("Card {}", id)));
                }
                tracing::debug!(card_id = %id, "updated card");
                Ok(card.clone())
            }
            None => {
                let id = uuid::Uuid::new_v4().to_string();
                self.conn.execute_update(
                    "INSERT INTO cards (id, title, rarity, flavour_text, time_estimate, \
                     frequency, image_url, created_at) VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
                    duckdb::params![
                        id,
                        card.title,
                        card.rarity.as_str(),
                        card.flavour_text,
                        card.time_estimate,
                        card.frequency,
                        card.image_url,
                        Utc::now().timestamp_millis(),
                    ],
                )?;
                tracing::debug!(card_id = %id, rarity = %card.rarity, "inserted card");
                Ok(Card {
                    id: Some(id),
                    ..card.clone()
                })
            }
        }
    }

    /// Remove a card. Returns `false` if no card had that id.
    ///
    /// Packs that reference the card stop resolving afterwards.
    pub fn delete(&self, id: &str) -> Result<bool> {
        let removed = self
            .conn
            .execute_update("DELETE FROM cards WHERE id = ?", duckdb::params![id])?;
        Ok(removed > 0)
    }

    fn fetch(&self, sql: &str, params: Vec<String>) -> Result<Vec<Card>> {
        let rows: Vec<CardRow> = self.conn.execute_into(sql, params_from_iter(params.iter()))?;
        rows.into_iter().map(Card::try_from).collect()
    }
}
