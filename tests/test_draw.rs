//! Weighted draw tests: shape, edge cases and the rarity distribution.

mod common;

use std::collections::HashMap;

use chorepack::booster::{draw_cards, draw_cards_with};
use chorepack::{Card, ChorepackError, Rarity};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// Rarity weights
// ---------------------------------------------------------------------------

#[test]
fn every_rarity_has_a_positive_weight() {
    for rarity in Rarity::ALL {
        assert!(rarity.weight() > 0.0, "{} has no weight", rarity);
        assert!(rarity.weight() <= 1.0);
    }
}

#[test]
fn rarity_weights_match_the_table() {
    assert_eq!(Rarity::Common.weight(), 0.50);
    assert_eq!(Rarity::Uncommon.weight(), 0.30);
    assert_eq!(Rarity::Rare.weight(), 0.15);
    assert_eq!(Rarity::Legendary.weight(), 0.05);
}

#[test]
fn rarity_parses_case_insensitively() {
    assert_eq!("legendary".parse::<Rarity>().unwrap(), Rarity::Legendary);
    assert_eq!("RARE".parse::<Rarity>().unwrap(), Rarity::Rare);
    assert!(matches!(
        "mythic".parse::<Rarity>(),
        Err(ChorepackError::InvalidInput(_))
    ));
}

// ---------------------------------------------------------------------------
// Shape
// ---------------------------------------------------------------------------

#[test]
fn draw_returns_exactly_count_cards_from_the_pool() {
    let pool = common::detached_cards();
    let mut rng = StdRng::seed_from_u64(7);

    for count in [1, 3, 10, 57] {
        let drawn = draw_cards_with(&pool, count, &mut rng).unwrap();
        assert_eq!(drawn.len(), count);
        for card in &drawn {
            assert!(pool.contains(card), "{} is not in the pool", card.title);
        }
    }
}

#[test]
fn draw_zero_returns_empty() {
    let pool = common::detached_cards();
    let drawn = draw_cards(&pool, 0).unwrap();
    assert!(drawn.is_empty());
}

#[test]
fn draw_from_single_card_pool_repeats_it() {
    let pool = vec![Card::new("Water the plants", Rarity::Legendary)];
    let drawn = draw_cards(&pool, 5).unwrap();
    assert_eq!(drawn.len(), 5);
    assert!(drawn.iter().all(|c| c.title == "Water the plants"));
}

#[test]
fn draw_from_empty_pool_is_invalid_input() {
    let result = draw_cards(&[], 3);
    assert!(matches!(result, Err(ChorepackError::InvalidInput(_))));
}

#[test]
fn draw_samples_with_replacement() {
    let pool = vec![
        Card::new("Mop", Rarity::Common),
        Card::new("Dust", Rarity::Common),
    ];
    let mut rng = StdRng::seed_from_u64(42);
    let drawn = draw_cards_with(&pool, 20, &mut rng).unwrap();

    // Twenty picks from two cards must repeat.
    let mops = drawn.iter().filter(|c| c.title == "Mop").count();
    assert!(mops > 1 || drawn.len() - mops > 1);
}

#[test]
fn same_seed_gives_same_draw() {
    let pool = common::detached_cards();
    let a = draw_cards_with(&pool, 12, &mut StdRng::seed_from_u64(99)).unwrap();
    let b = draw_cards_with(&pool, 12, &mut StdRng::seed_from_u64(99)).unwrap();
    assert_eq!(a, b);
}

// ---------------------------------------------------------------------------
// Distribution
// ---------------------------------------------------------------------------

#[test]
fn large_sample_recovers_rarity_weights() {
    let pool = common::detached_cards();
    let mut rng = StdRng::seed_from_u64(2024);
    const N: usize = 100_000;

    let drawn = draw_cards_with(&pool, N, &mut rng).unwrap();

    let mut counts: HashMap<Rarity, usize> = HashMap::new();
    for card in &drawn {
        *counts.entry(card.rarity).or_default() += 1;
    }

    // One card per rarity and the weights sum to 1.0, so each frequency
    // should land near its weight.
    for rarity in Rarity::ALL {
        let freq = counts.get(&rarity).copied().unwrap_or(0) as f64 / N as f64;
        assert!(
            (freq - rarity.weight()).abs() < 0.01,
            "{} drawn at {:.4}, expected {:.2}",
            rarity,
            freq,
            rarity.weight()
        );
    }

    let ratio = counts[&Rarity::Common] as f64 / counts[&Rarity::Legendary] as f64;
    assert!((9.0..11.0).contains(&ratio), "common/legendary ratio {:.2}", ratio);
}

#[test]
fn heavier_cards_win_regardless_of_pool_order() {
    let mut pool = common::detached_cards();
    pool.reverse();
    let mut rng = StdRng::seed_from_u64(5);

    let drawn = draw_cards_with(&pool, 20_000, &mut rng).unwrap();
    let commons = drawn.iter().filter(|c| c.rarity == Rarity::Common).count();
    let legendaries = drawn.iter().filter(|c| c.rarity == Rarity::Legendary).count();
    assert!(commons > legendaries * 5);
}
