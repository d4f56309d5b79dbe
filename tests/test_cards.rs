//! Card collection tests: save, update, lookup and delete.

mod common;

use chorepack::{Card, ChorepackError, Rarity};

#[test]
fn save_assigns_an_id_and_keeps_fields() {
    let sdk = common::setup_sdk();
    let card = Card {
        time_estimate: Some("5 min".to_string()),
        ..Card::new("Wipe the counters", Rarity::Uncommon).with_flavour("Crumbs everywhere.")
    };

    let saved = sdk.cards().save(&card).unwrap();

    assert!(saved.id.is_some());
    assert_eq!(saved.title, "Wipe the counters");
    assert_eq!(saved.rarity, Rarity::Uncommon);
    assert_eq!(sdk.cards().get(saved.id.as_deref().unwrap()).unwrap(), Some(saved));
}

#[test]
fn saving_twice_without_id_creates_two_cards() {
    let sdk = common::setup_sdk();
    let card = Card::new("Make the bed", Rarity::Common);

    let a = sdk.cards().save(&card).unwrap();
    let b = sdk.cards().save(&card).unwrap();

    assert_ne!(a.id, b.id);
    assert_eq!(sdk.cards().count().unwrap(), 2);
}

#[test]
fn save_with_existing_id_updates_in_place() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);

    let mut kettle = cards[2].clone();
    kettle.rarity = Rarity::Legendary;
    kettle.frequency = Some("Monthly".to_string());
    sdk.cards().save(&kettle).unwrap();

    let stored = sdk.cards().get(kettle.id.as_deref().unwrap()).unwrap().unwrap();
    assert_eq!(stored.rarity, Rarity::Legendary);
    assert_eq!(stored.frequency.as_deref(), Some("Monthly"));
    assert_eq!(sdk.cards().count().unwrap(), 4);
}

#[test]
fn updating_an_unknown_id_is_not_found() {
    let sdk = common::setup_sdk();
    let ghost = Card {
        id: Some("no-such-card".to_string()),
        ..Card::new("Ghost chore", Rarity::Rare)
    };

    assert!(matches!(
        sdk.cards().save(&ghost),
        Err(ChorepackError::NotFound(_))
    ));
}

#[test]
fn blank_title_is_rejected() {
    let sdk = common::setup_sdk();
    let result = sdk.cards().save(&Card::new("   ", Rarity::Common));
    assert!(matches!(result, Err(ChorepackError::InvalidInput(_))));
    assert_eq!(sdk.cards().count().unwrap(), 0);
}

#[test]
fn list_returns_every_card() {
    let sdk = common::setup_sdk();
    assert!(sdk.cards().list().unwrap().is_empty());

    let cards = common::seed_cards(&sdk);
    let listed = sdk.cards().list().unwrap();

    assert_eq!(listed.len(), cards.len());
    for card in &cards {
        assert!(listed.contains(card), "{} missing from list", card.title);
    }
}

#[test]
fn list_is_newest_first() {
    let sdk = common::setup_sdk();
    let older = sdk.cards().save(&Card::new("Older", Rarity::Common)).unwrap();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let newer = sdk.cards().save(&Card::new("Newer", Rarity::Common)).unwrap();

    let listed = sdk.cards().list().unwrap();
    assert_eq!(listed, vec![newer, older]);
}

#[test]
fn get_missing_card_is_none() {
    let sdk = common::setup_sdk();
    assert_eq!(sdk.cards().get("missing").unwrap(), None);
}

#[test]
fn get_by_ids_skips_unknown_and_repeated_ids() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);
    let first = cards[0].id.clone().unwrap();
    let last = cards[3].id.clone().unwrap();

    let found = sdk
        .cards()
        .get_by_ids(&[first.as_str(), "missing", last.as_str(), first.as_str()])
        .unwrap();

    assert_eq!(found.len(), 2);
    assert_eq!(found[&first], cards[0]);
    assert_eq!(found[&last], cards[3]);
}

#[test]
fn get_by_no_ids_is_empty() {
    let sdk = common::setup_sdk();
    common::seed_cards(&sdk);
    let none: [&str; 0] = [];
    assert!(sdk.cards().get_by_ids(&none).unwrap().is_empty());
}

#[test]
fn delete_removes_the_card_once() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);
    let id = cards[1].id.as_deref().unwrap();

    assert!(sdk.cards().delete(id).unwrap());
    assert!(!sdk.cards().delete(id).unwrap());
    assert_eq!(sdk.cards().get(id).unwrap(), None);
    assert_eq!(sdk.cards().count().unwrap(), 3);
}

#[test]
fn card_json_uses_camel_case_and_uppercase_rarity() {
    let card = Card {
        id: Some("card-1".to_string()),
        time_estimate: Some("10 min".to_string()),
        ..Card::new("Fold laundry", Rarity::Rare)
    };

    let json = serde_json::to_value(&card).unwrap();
    assert_eq!(json["rarity"], "RARE");
    assert_eq!(json["timeEstimate"], "10 min");
    assert_eq!(json["flavourText"], "");
}
