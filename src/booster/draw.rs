//! Rarity-weighted card draws.
//!
//! Every pick is independent and made with replacement, so one pack can hold
//! the same card more than once.

use rand::prelude::*;

use crate::error::{ChorepackError, Result};
use crate::models::Card;

/// Draw `count` cards from `pool` using the thread-local random source.
///
/// Fails with `InvalidInput` when `pool` is empty. `count == 0` yields an
/// empty vector.
pub fn draw_cards(pool: &[Card], count: usize) -> Result<Vec<Card>> {
    draw_cards_with(pool, count, &mut thread_rng())
}

/// Draw `count` cards from `pool` using the given random source.
pub fn draw_cards_with<R: Rng + ?Sized>(
    pool: &[Card],
    count: usize,
    rng: &mut R,
) -> Result<Vec<Card>> {
    if pool.is_empty() {
        return Err(ChorepackError::InvalidInput(
            "Cannot draw from an empty card pool".to_string(),
        ));
    }

    let total_weight: f64 = pool.iter().map(Card::weight).sum();

    let drawn: Vec<Card> = (0..count)
        .map(|_| pick_weighted(pool, total_weight, rng).clone())
        .collect();

    tracing::debug!(pool = pool.len(), count, "drew cards");
    Ok(drawn)
}

/// Pick one card, walking the pool in order until the roll is used up.
///
/// Falls back to the last card if rounding leaves a sliver of the roll over
/// after the walk.
fn pick_weighted<'p, R: Rng + ?Sized>(pool: &'p [Card], total_weight: f64, rng: &mut R) -> &'p Card {
    let mut roll = rng.gen_range(0.0..total_weight);

    for card in pool {
        roll -= card.weight();
        if roll <= 0.0 {
            return card;
        }
    }

    &pool[pool.len() - 1]
}
