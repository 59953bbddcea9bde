//! Validity rules for extracted card faces.
//!
//! The rules are a pure function of a Field Set and the type vocabulary:
//! - creature-like faces need power/toughness unless their text carries the
//!   station keyword as a word, and other faces must not have it;
//! - planeswalkers and battles need a loyalty value, other faces must not
//!   have one.
//!
//! Card construction adds its own data checks (cost and text grammar,
//! rarity, leftovers) to the same `Validity`.

pub mod validity;

pub use validity::{check_fields, check_fields_with, Required, Validity, Violation};
