//! # ccg-encode
//!
//! Reversible text encoding of trading card records for sequence model
//! training.
//!
//! ## Design Principles
//!
//! 1. **Reversible**: Every encoding decodes back to the same card, up to
//!    documented canonicalization (reminder text and ability words).
//!
//! 2. **Injected Tables**: Markers, separators, vocabulary and the mana
//!    symbol universe live in values passed to the codec, never in globals.
//!
//! 3. **Flags Over Errors**: Bad card data yields a best-effort `Card` with
//!    `parsed`/`valid` flags. `CodecError` is reserved for caller bugs.
//!
//! 4. **Explicit Randomness**: Augmentation draws from a caller-supplied
//!    `CodecRng`, so every shuffled corpus is reproducible.
//!
//! ## Modules
//!
//! - `core`: Configuration, errors, deterministic RNG
//! - `numeral`: Unary numeral grammar
//! - `mana`: Mana symbols, costs, and rules text with embedded costs
//! - `text`: Forward and inverse rules-text passes
//! - `cards`: Field model, extraction, schemes, `Card`, corpus helpers
//! - `rules`: Validity rules over extracted fields

pub mod core;
pub mod numeral;
pub mod mana;
pub mod text;
pub mod cards;
pub mod rules;
pub mod codec;

// Re-export commonly used types
pub use crate::core::{CodecConfig, CodecError, CodecRng, CodecRngState, Markers, Result, Separators, UnaryConfig};

pub use crate::numeral::NumeralCodec;

pub use crate::mana::{ManaCodec, ManaCost, ManaSymbol, ManaText, Notation, SymbolTable};

pub use crate::text::{TextPipeline, Vocabulary};

pub use crate::cards::{
    Card, CardSource, EncodeOptions,
    FieldId, FieldSet, FieldValue, PowerToughness, Rarity,
    FieldLabels, Scheme,
    decode_corpus, encode_corpus, encode_corpus_randomized,
};

pub use crate::rules::{Validity, Violation};

pub use crate::codec::Codec;
