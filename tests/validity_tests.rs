//! Validity classification integration tests.
//!
//! Structured fixtures go through extraction and `Card` construction, so
//! these exercise the same path a corpus loader takes.

use ccg_encode::cards::{Card, Scheme};
use ccg_encode::rules::Violation;
use ccg_encode::Codec;
use serde_json::{json, Value};

fn card(src: Value) -> Card {
    Card::from_json(&src, &Codec::default())
}

// =============================================================================
// Validity Matrix
// =============================================================================

/// Test that a creature without power/toughness is invalid.
#[test]
fn test_creature_without_pt() {
    let c = card(json!({"name": "Bad Creature", "types": ["Creature"], "rarity": "Common"}));
    assert!(c.is_parsed());
    assert!(!c.is_valid());
    assert!(c.violations().contains(&Violation::MissingPt));
}

/// Test that a non-creature with power/toughness is invalid.
#[test]
fn test_non_creature_with_pt() {
    let c = card(json!({
        "name": "Weird Spell", "types": ["Instant"], "power": "1", "toughness": "1"
    }));
    assert!(!c.is_valid());
    assert!(c.violations().contains(&Violation::UnexpectedPt));
}

/// Test that a vehicle needs power/toughness like a creature.
#[test]
fn test_vehicle() {
    let with_pt = card(json!({
        "name": "Smuggler's Copter", "types": ["Artifact"], "subtypes": ["Vehicle"],
        "power": "3", "toughness": "3"
    }));
    assert!(with_pt.is_valid());

    let without = card(json!({
        "name": "Bad Vehicle", "types": ["Artifact"], "subtypes": ["Vehicle"]
    }));
    assert!(!without.is_valid());
}

/// Test that station artifacts need no power/toughness.
#[test]
fn test_station_artifact() {
    let c = card(json!({
        "name": "Summoning Station",
        "types": ["Artifact"],
        "text": "{T}: Create a 2/2 colorless Pincher creature token.\nStation"
    }));
    assert!(c.is_valid(), "{:?}", c.violations());
}

/// Test that station text excuses a missing power/toughness only, and only
/// as a whole word.
#[test]
fn test_station_limits() {
    let with_pt = card(json!({
        "name": "Summoning Station", "types": ["Artifact"],
        "text": "{T}: Create a 2/2 colorless Pincher creature token.\nStation",
        "power": "2", "toughness": "2"
    }));
    assert_eq!(with_pt.violations(), &[Violation::UnexpectedPt]);

    let stationary = card(json!({
        "name": "Parked Hauler", "types": ["Artifact"], "subtypes": ["Vehicle"],
        "text": "Parked Hauler stays stationary."
    }));
    assert_eq!(stationary.violations(), &[Violation::MissingPt]);
}

/// Test that a planeswalker without loyalty is invalid.
#[test]
fn test_planeswalker_without_loyalty() {
    let c = card(json!({"name": "Jace", "types": ["Planeswalker"]}));
    assert!(!c.is_valid());
    assert_eq!(c.violations(), &[Violation::MissingLoyalty]);

    let ok = card(json!({"name": "Jace", "types": ["Planeswalker"], "loyalty": "4"}));
    assert!(ok.is_valid());
}

/// Test that a battle without defense is invalid.
#[test]
fn test_battle_without_defense() {
    let c = card(json!({"name": "Bad Battle", "types": ["Battle"], "subtypes": ["Siege"]}));
    assert!(!c.is_valid());

    let ok = card(json!({
        "name": "Invasion of Zendikar", "types": ["Battle"], "subtypes": ["Siege"], "defense": "3"
    }));
    assert!(ok.is_valid());
}

/// Test that an instant carrying loyalty is invalid.
#[test]
fn test_instant_with_loyalty() {
    let c = card(json!({"name": "Odd Instant", "types": ["Instant"], "loyalty": "3"}));
    assert!(!c.is_valid());
    assert_eq!(c.violations(), &[Violation::UnexpectedLoyalty]);
}

// =============================================================================
// Data Checks
// =============================================================================

/// Test that a malformed cost leaves the card parsed but invalid.
#[test]
fn test_malformed_cost() {
    let c = card(json!({"name": "Odd Cost", "types": ["Instant"], "manaCost": "{Z}{1}"}));
    assert!(c.is_parsed());
    assert!(!c.is_valid());
    assert!(c.violations().contains(&Violation::InvalidCost));
}

/// Test that an invalid second face invalidates the whole card.
#[test]
fn test_invalid_bside() {
    let c = card(json!({
        "name": "Front", "types": ["Instant"],
        "bside": {"name": "Back", "types": ["Creature"]}
    }));
    assert!(c.is_parsed());
    assert!(!c.is_valid());
    assert!(!c.bside().unwrap().is_valid());
}

/// Test that extra faces beyond the second are dropped on decode.
#[test]
fn test_third_face_dropped() {
    let codec = Codec::default();
    let c = Card::decode(
        "|5instant|1fire|\n|5instant|1ice|\n|5instant|1water|",
        &codec,
        &Scheme::standard(),
    );
    assert_eq!(c.bside().map(Card::name), Some("ice"));
    assert!(c.bside().unwrap().bside().is_none());
    assert!(c.is_valid());
}

/// Test that unlabeled overflow chunks make a card invalid but keep it parsed.
#[test]
fn test_overflow_chunk() {
    let codec = Codec::default();
    let c = Card::decode(
        "|creature||bear||&^^/&^^||{^GG}|O|grizzly bears|stray|",
        &codec,
        &Scheme::nolabel(),
    );
    assert!(c.is_parsed());
    assert!(!c.is_valid());
    assert_eq!(c.other().len(), 1);
    assert_eq!(c.violations(), &[Violation::Leftovers]);
}

/// Test that a decoded card without name is fine when the scheme omits it.
#[test]
fn test_noname_scheme_needs_no_name() {
    let codec = Codec::default();
    let scheme = Scheme::noname();
    let c = Card::decode("|5instant|4|6|7|8|9draw a card.|3{^U}|0O|", &codec, &scheme);
    assert!(c.is_valid(), "{:?}", c.violations());

    let standard = Card::decode("|5instant|4|6|7|8|9draw a card.|3{^U}|0O|", &codec, &Scheme::standard());
    assert!(!standard.is_parsed());
}
