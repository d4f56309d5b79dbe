//! Pack persistence: issue expiring tokens and resolve them back into cards.
//!
//! Expiry is enforced when a pack is read. Expired rows are never deleted;
//! they simply stop matching the `expires_at > now` filter.

use chrono::{DateTime, Utc};
use rand::prelude::*;

use crate::config;
use crate::connection::Connection;
use crate::error::{ChorepackError, Result};
use crate::models::{Card, Pack, PackRow};
use crate::queries::cards::CardQuery;

/// The single persistence operation pack generation depends on.
///
/// [`PackStore`] is the production implementation; anything else that can
/// register a list of card ids and hand back a token can stand in for it.
pub trait PackRegistry {
    /// Persist a pack holding `card_ids` (in order) and return its token.
    fn create_pack(&self, card_ids: &[String]) -> Result<String>;
}

/// Query interface for the `packs` table.
pub struct PackStore<'a> {
    conn: &'a Connection,
}

impl<'a> PackStore<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Persist a new pack created at `now` and return its token.
    ///
    /// The pack expires [`config::pack_ttl`] after `now`. Tokens are not
    /// checked for collisions; the primary key turns one into a storage
    /// error.
    pub fn create_pack_at(&self, card_ids: &[String], now: DateTime<Utc>) -> Result<String> {
        let token = generate_token(&mut thread_rng());
        let expires_at = now + config::pack_ttl();
        let ids_json = serde_json::to_string(card_ids)?;

        self.conn.execute_update(
            "INSERT INTO packs (token, card_ids, created_at, expires_at) VALUES (?, ?, ?, ?)",
            duckdb::params![
                token,
                ids_json,
                now.timestamp_millis(),
                expires_at.timestamp_millis(),
            ],
        )?;

        tracing::info!(
            token = %token,
            cards = card_ids.len(),
            expires_at = %expires_at,
            "created pack"
        );
        Ok(token)
    }

    /// Resolve a pack token into its cards as of `now`.
    ///
    /// Returns `NotFound` when the token was never issued, when the pack has
    /// expired (`expires_at <= now`), or when any of its cards no longer
    /// exists. A partially resolvable pack is never returned.
    pub fn get_pack_at(&self, token: &str, now: DateTime<Utc>) -> Result<Vec<Card>> {
        let rows: Vec<PackRow> = self.conn.execute_into(
            "SELECT token, card_ids, created_at, expires_at FROM packs \
             WHERE token = ? AND expires_at > ? LIMIT 1",
            duckdb::params![token, now.timestamp_millis()],
        )?;

        let pack = match rows.into_iter().next() {
            Some(row) => Pack::try_from(row)?,
            None => {
                tracing::warn!(token = %token, "pack missing or expired");
                return Err(not_found(token));
            }
        };

        let by_id = CardQuery::new(self.conn).get_by_ids(&pack.card_ids)?;

        let mut cards = Vec::with_capacity(pack.card_ids.len());
        for id in &pack.card_ids {
            match by_id.get(id) {
                Some(card) => cards.push(card.clone()),
                None => {
                    tracing::warn!(token = %token, card_id = %id, "pack references a deleted card");
                    return Err(not_found(token));
                }
            }
        }

        Ok(cards)
    }

    /// Persist a new pack expiring seven days from now.
    pub fn create_pack(&self, card_ids: &[String]) -> Result<String> {
        self.create_pack_at(card_ids, Utc::now())
    }

    /// Resolve a pack token into its cards, in the order they were drawn.
    pub fn get_pack(&self, token: &str) -> Result<Vec<Card>> {
        self.get_pack_at(token, Utc::now())
    }

    /// Raw pack record, regardless of expiry.
    pub fn record(&self, token: &str) -> Result<Option<Pack>> {
        let rows: Vec<PackRow> = self.conn.execute_into(
            "SELECT token, card_ids, created_at, expires_at FROM packs WHERE token = ? LIMIT 1",
            duckdb::params![token],
        )?;
        rows.into_iter().next().map(Pack::try_from).transpose()
    }
}

impl PackRegistry for PackStore<'_> {
    fn create_pack(&self, card_ids: &[String]) -> Result<String> {
        PackStore::create_pack(self, card_ids)
    }
}

/// Generate an unguessable pack token: [`config::TOKEN_BYTES`] random bytes
/// as lowercase hex.
pub fn generate_token<R: Rng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; config::TOKEN_BYTES];
    rng.fill_bytes(&mut bytes);
    hex::encode(bytes)
}

fn not_found(token: &str) -> ChorepackError {
    ChorepackError::NotFound(format!("Pack '{}' does not exist or has expired", token))
}

impl<T: PackRegistry + ?Sized> PackRegistry for &T {
    fn create_pack(&self, card_ids: &[String]) -> Result<String> {
        (**self).create_pack(card_ids)
    }
}
