//! Pack store tests: token issue, expiry and card resolution.

mod common;

use chorepack::queries::packs::generate_token;
use chorepack::ChorepackError;
use chrono::{Duration, Utc};
use rand::rngs::StdRng;
use rand::SeedableRng;

// ---------------------------------------------------------------------------
// create_pack / get_pack
// ---------------------------------------------------------------------------

#[test]
fn create_then_get_returns_cards_in_order() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);
    let ids = vec![
        cards[3].id.clone().unwrap(),
        cards[0].id.clone().unwrap(),
        cards[2].id.clone().unwrap(),
    ];

    let token = sdk.packs().create_pack(&ids).unwrap();
    let opened = sdk.packs().get_pack(&token).unwrap();

    let titles: Vec<&str> = opened.iter().map(|c| c.title.as_str()).collect();
    assert_eq!(titles, vec!["Clean the oven", "Take out the bins", "Descale the kettle"]);
    assert_eq!(common::ids(&opened), ids);
}

#[test]
fn duplicate_card_ids_are_kept() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);
    let bins = cards[0].id.clone().unwrap();
    let ids = vec![bins.clone(), bins.clone(), cards[1].id.clone().unwrap(), bins];

    let token = sdk.packs().create_pack(&ids).unwrap();
    let opened = sdk.packs().get_pack(&token).unwrap();

    assert_eq!(opened.len(), 4);
    assert_eq!(common::ids(&opened), ids);
}

#[test]
fn resolved_cards_keep_their_fields() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);

    let token = sdk.packs().create_pack(&common::ids(&cards)).unwrap();
    let opened = sdk.packs().get_pack(&token).unwrap();

    assert_eq!(opened, cards);
    assert_eq!(opened[1].time_estimate.as_deref(), Some("20 min"));
    assert!(opened[3].image_url.as_deref().unwrap().starts_with("data:image/png"));
}

#[test]
fn never_issued_token_is_not_found() {
    let sdk = common::setup_sdk();
    common::seed_cards(&sdk);

    let result = sdk.packs().get_pack("0123456789abcdef01234567");
    assert!(matches!(result, Err(ChorepackError::NotFound(_))));
}

// ---------------------------------------------------------------------------
// Expiry
// ---------------------------------------------------------------------------

#[test]
fn pack_expires_seven_days_after_creation() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);

    let token = sdk.packs().create_pack(&common::ids(&cards)).unwrap();
    let record = sdk.packs().record(&token).unwrap().unwrap();

    assert_eq!(record.token, token);
    assert_eq!(record.expires_at - record.created_at, Duration::days(7));
    assert!(record.is_live_at(Utc::now()));
}

#[test]
fn expired_pack_is_not_found_even_though_the_record_exists() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);

    let eight_days_ago = Utc::now() - Duration::days(8);
    let token = sdk
        .packs()
        .create_pack_at(&common::ids(&cards), eight_days_ago)
        .unwrap();

    let result = sdk.packs().get_pack(&token);
    assert!(matches!(result, Err(ChorepackError::NotFound(_))));

    let record = sdk.packs().record(&token).unwrap();
    assert!(record.is_some());
}

#[test]
fn pack_is_not_found_exactly_at_expiry() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);
    let created = Utc::now();

    let token = sdk
        .packs()
        .create_pack_at(&common::ids(&cards), created)
        .unwrap();

    let just_before = created + Duration::days(7) - Duration::milliseconds(1);
    assert!(sdk.packs().get_pack_at(&token, just_before).is_ok());

    let at_expiry = created + Duration::days(7);
    assert!(matches!(
        sdk.packs().get_pack_at(&token, at_expiry),
        Err(ChorepackError::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Fail-closed resolution
// ---------------------------------------------------------------------------

#[test]
fn deleting_a_card_makes_its_packs_not_found() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);

    let token = sdk.packs().create_pack(&common::ids(&cards)).unwrap();
    assert!(sdk.cards().delete(cards[2].id.as_deref().unwrap()).unwrap());

    let result = sdk.packs().get_pack(&token);
    assert!(matches!(result, Err(ChorepackError::NotFound(_))));
}

#[test]
fn pack_of_unknown_ids_is_not_found() {
    let sdk = common::setup_sdk();
    let token = sdk
        .packs()
        .create_pack(&["ghost-card".to_string()])
        .unwrap();

    assert!(matches!(
        sdk.packs().get_pack(&token),
        Err(ChorepackError::NotFound(_))
    ));
}

// ---------------------------------------------------------------------------
// Tokens
// ---------------------------------------------------------------------------

#[test]
fn tokens_are_24_lowercase_hex_chars() {
    let token = generate_token(&mut StdRng::seed_from_u64(1));
    assert_eq!(token.len(), 24);
    assert!(token.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
}

#[test]
fn issued_tokens_are_distinct() {
    let sdk = common::setup_sdk();
    let cards = common::seed_cards(&sdk);
    let ids = common::ids(&cards);

    let mut tokens: Vec<String> = (0..50)
        .map(|_| sdk.packs().create_pack(&ids).unwrap())
        .collect();
    tokens.sort();
    tokens.dedup();
    assert_eq!(tokens.len(), 50);
}

#[test]
fn storage_failure_surfaces_as_storage_error() {
    let sdk = common::setup_sdk();
    sdk.connection().execute_batch("DROP TABLE packs").unwrap();

    let result = sdk.packs().create_pack(&["card-001".to_string()]);
    assert!(matches!(result, Err(ChorepackError::Storage(_))));
}
