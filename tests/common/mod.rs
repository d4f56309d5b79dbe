//! Shared test fixtures for the chorepack integration tests.
//!
//! `setup_sdk()` builds an in-memory SDK; `seed_cards()` saves one card of
//! each rarity into it.

#![allow(dead_code)]

use chorepack::{Card, ChorepackSdk, Rarity};

pub const ORIGIN: &str = "https://chores.test";

/// An SDK backed by a private in-memory database.
pub fn setup_sdk() -> ChorepackSdk {
    ChorepackSdk::builder()
        .in_memory()
        .origin(ORIGIN)
        .build()
        .unwrap()
}

/// Unsaved sample cards, one per rarity, most common first.
pub fn sample_cards() -> Vec<Card> {
    vec![
        Card::new("Take out the bins", Rarity::Common)
            .with_flavour("Tuesday night, rain or shine."),
        Card {
            time_estimate: Some("20 min".to_string()),
            frequency: Some("Weekly".to_string()),
            ..Card::new("Vacuum the hallway", Rarity::Uncommon)
        },
        Card::new("Descale the kettle", Rarity::Rare),
        Card {
            image_url: Some("data:image/png;base64,iVBORw0KGgo=".to_string()),
            ..Card::new("Clean the oven", Rarity::Legendary)
                .with_flavour("Nobody has seen the bottom of it since 2019.")
        },
    ]
}

/// Save the sample cards and return them with their ids, in sample order.
pub fn seed_cards(sdk: &ChorepackSdk) -> Vec<Card> {
    sample_cards()
        .iter()
        .map(|c| sdk.cards().save(c).unwrap())
        .collect()
}

/// Saved-looking cards (ids set) that are not in any database.
pub fn detached_cards() -> Vec<Card> {
    sample_cards()
        .into_iter()
        .enumerate()
        .map(|(i, c)| Card {
            id: Some(format!("card-{:03}", i + 1)),
            ..c
        })
        .collect()
}

/// Card ids in order.
pub fn ids(cards: &[Card]) -> Vec<String> {
    cards.iter().map(|c| c.id.clone().unwrap()).collect()
}
