//! Whole-corpus helpers over the record separator.

use serde_json::Value;

use super::card::{Card, EncodeOptions};
use super::scheme::Scheme;
use crate::codec::Codec;
use crate::core::CodecRng;

/// Encode every card and join the records.
pub fn encode_corpus(cards: &[Card], codec: &Codec, scheme: &Scheme) -> String {
    let records: Vec<String> = cards.iter().map(|c| c.encode(codec, scheme)).collect();
    records.join(&codec.config().separators.card)
}

/// Encode with augmentation. Record `i` draws from its own stream, so a
/// record's encoding does not depend on the cards before it.
pub fn encode_corpus_randomized(
    cards: &[Card],
    codec: &Codec,
    scheme: &Scheme,
    options: EncodeOptions,
    seed: u64,
) -> String {
    let records: Vec<String> = cards
        .iter()
        .enumerate()
        .map(|(i, card)| {
            let mut rng = CodecRng::for_record(seed, i as u64);
            card.encode_randomized(codec, scheme, options, &mut rng)
        })
        .collect();
    records.join(&codec.config().separators.card)
}

/// Split on the record separator and decode each non-blank record.
pub fn decode_corpus(src: &str, codec: &Codec, scheme: &Scheme) -> Vec<Card> {
    let cards: Vec<Card> = src
        .split(codec.config().separators.card.as_str())
        .filter(|record| !record.trim().is_empty())
        .map(|record| Card::decode(record, codec, scheme))
        .collect();
    let invalid = cards.iter().filter(|c| !c.is_valid()).count();
    tracing::debug!(records = cards.len(), invalid, "corpus decoded");
    cards
}

/// Build cards from an array of structured faces. Non-object entries are skipped.
pub fn cards_from_json(src: &Value, codec: &Codec) -> Vec<Card> {
    src.as_array()
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .map(|item| Card::from_json(item, codec))
                .collect()
        })
        .unwrap_or_default()
}
