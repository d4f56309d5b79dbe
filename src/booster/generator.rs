//! Pack generation: one independent weighted draw per player, each registered
//! as its own expiring pack.

use crate::booster::draw::draw_cards;
use crate::config;
use crate::error::{ChorepackError, Result};
use crate::models::{Card, PlayerPack};
use crate::queries::packs::PackRegistry;

/// Issues packs for a group of players.
///
/// Generic over the [`PackRegistry`] so the persistence step can be swapped
/// out; [`ChorepackSdk::generator`](crate::ChorepackSdk::generator) wires it
/// to the DuckDB-backed [`PackStore`](crate::queries::PackStore).
pub struct PackGenerator<S> {
    registry: S,
    origin: String,
}

impl<S: PackRegistry> PackGenerator<S> {
    /// Create a generator that registers packs with `registry` and builds
    /// links under `origin`.
    pub fn new(registry: S, origin: impl Into<String>) -> Self {
        Self {
            registry,
            origin: origin.into(),
        }
    }

    /// Draw `cards_per_player` cards from `pool` for each of `player_count`
    /// players and register one pack each.
    ///
    /// Every player draws from the full pool; earlier players' cards are not
    /// removed. Inputs are validated before anything is written: zero counts
    /// and unsaved cards fail with `InvalidInput`, an empty pool with
    /// `EmptyPool`.
    ///
    /// If registering player k's pack fails, generation stops and the error
    /// is returned. Packs already issued to players 1..k stay valid.
    pub fn generate(
        &self,
        player_count: usize,
        cards_per_player: usize,
        pool: &[Card],
    ) -> Result<Vec<PlayerPack>> {
        if player_count == 0 {
            return Err(ChorepackError::InvalidInput(
                "Player count must be positive".to_string(),
            ));
        }
        if cards_per_player == 0 {
            return Err(ChorepackError::InvalidInput(
                "Cards per player must be positive".to_string(),
            ));
        }
        if pool.is_empty() {
            return Err(ChorepackError::EmptyPool);
        }
        if let Some(unsaved) = pool.iter().find(|c| c.id.is_none()) {
            return Err(ChorepackError::InvalidInput(format!(
                "Card '{}' has not been saved and cannot be put in a pack",
                unsaved.title
            )));
        }

        let mut packs = Vec::with_capacity(player_count);
        for player_index in 1..=player_count {
            let cards = draw_cards(pool, cards_per_player)?;
            let card_ids: Vec<String> = cards.iter().filter_map(|c| c.id.clone()).collect();

            let token = match self.registry.create_pack(&card_ids) {
                Ok(token) => token,
                Err(e) => {
                    tracing::warn!(
                        player = player_index,
                        issued = packs.len(),
                        error = %e,
                        "pack generation aborted"
                    );
                    return Err(e);
                }
            };

            packs.push(PlayerPack {
                player_index,
                shareable_link: config::share_link(&self.origin, &token),
                cards,
                token,
            });
        }

        tracing::info!(players = player_count, cards_per_player, "generated packs");
        Ok(packs)
    }

    pub fn origin(&self) -> &str {
        &self.origin
    }
}
