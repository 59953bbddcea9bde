//! Card records: field model, extraction, schemes, and the `Card` itself.
//!
//! ## Key Types
//!
//! - `FieldId`: The nine logical fields of a card face
//! - `FieldSet`: Every value recovered for each field, with provenance
//! - `Scheme`: Field order, labels and separator policy for one encoding
//! - `Card`: A classified face plus an optional second face
//!
//! ## Usage
//!
//! ```
//! use ccg_encode::cards::{Card, Scheme};
//! use ccg_encode::Codec;
//! use serde_json::json;
//!
//! let codec = Codec::default();
//! let card = Card::from_json(
//!     &json!({"name": "Shock", "manaCost": "{R}", "types": ["Instant"],
//!             "rarity": "Common", "text": "Shock deals 2 damage to any target."}),
//!     &codec,
//! );
//! assert!(card.is_valid());
//!
//! let encoded = card.encode(&codec, &Scheme::standard());
//! let decoded = Card::decode(&encoded, &codec, &Scheme::standard());
//! assert_eq!(decoded.name(), "shock");
//! ```

pub mod card;
pub mod corpus;
pub mod extract;
pub mod fields;
pub mod rarity;
pub mod scheme;

pub use card::{Card, CardSource, EncodeOptions};
pub use corpus::{cards_from_json, decode_corpus, encode_corpus, encode_corpus_randomized};
pub use extract::{fields_from_encoded, fields_from_json, sanitize_name, sanitize_type};
pub use fields::{FieldEntry, FieldId, FieldSet, FieldValue, Leftover, PowerToughness};
pub use rarity::Rarity;
pub use scheme::{FieldLabels, Scheme};
