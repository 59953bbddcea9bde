//! Rules-text transform pipeline.
//!
//! Forward passes turn printed rules text into the canonical form stored in
//! the encoding; inverse passes turn canonical text back into display text.
//! Two forward passes are lossy canonicalization rather than compression:
//! reminder text and ability-word headers are dropped and never restored.
//!
//! ## Key Types
//!
//! - `TextPipeline`: Compiled passes, built once from config and vocabulary
//! - `Vocabulary`: Word lists the passes consult
//! - `LineCategory`: Ordering class of one rules-text line
//!
//! ## Usage
//!
//! ```
//! use ccg_encode::core::CodecConfig;
//! use ccg_encode::mana::ManaCodec;
//! use ccg_encode::text::{TextPipeline, Vocabulary};
//!
//! let config = CodecConfig::default();
//! let pipeline = TextPipeline::new(&config, Vocabulary::default());
//! let mana = ManaCodec::default();
//!
//! let canon = pipeline.forward("Grizzly Bears deals 2 damage to any target.", "Grizzly Bears", &mana);
//! assert_eq!(canon, "@ deals &^^ damage to any target.");
//! ```

pub mod lines;
pub mod passes;
pub mod sentence;
pub mod unpasses;
pub mod vocab;

pub use lines::{LineCategory, LineGroups};
pub use sentence::{sentence_case, title_case};
pub use vocab::Vocabulary;

use regex::Regex;

use crate::core::{CodecConfig, Markers};
use crate::numeral::NumeralCodec;

fn escaped(c: char) -> String {
    regex::escape(&c.to_string())
}

fn alternation(words: &[String], transform: impl Fn(&str) -> String) -> Option<String> {
    let mut words: Vec<String> = words.iter().map(|w| transform(w.as_str())).collect();
    words.sort_by_key(|w| std::cmp::Reverse(w.len()));
    words.dedup();
    (!words.is_empty()).then(|| {
        words
            .iter()
            .map(|w| regex::escape(w))
            .collect::<Vec<_>>()
            .join("|")
    })
}

/// Regexes compiled from the markers and vocabulary.
#[derive(Clone, Debug)]
struct PassRegexes {
    reminder: Regex,
    braces: Regex,
    level_range: Regex,
    dash_x: Regex,
    x_word: Regex,
    ability_words: Option<Regex>,
    counter_types: Option<Regex>,
    counter_mark: Regex,
    counter_word: Regex,
    countered: Regex,
    choice_header: Regex,
    choice_block: Regex,
    uncast: Regex,
    uncasted: Regex,
    level_display: Regex,
}

impl PassRegexes {
    fn new(markers: &Markers, numerals: &NumeralCodec, vocab: &Vocabulary) -> Self {
        let unary = numerals.config();
        let marker = escaped(unary.marker);
        let counter = escaped(unary.counter);
        let dash = escaped(markers.dash);
        let bullet = escaped(markers.bullet);
        let open = escaped(markers.choice_open);
        let close = escaped(markers.choice_close);
        let counter_mark = escaped(markers.counter);

        let build = |pattern: String| Regex::new(&pattern).expect("pass regex built from escaped parts");

        let ability_words = alternation(&vocab.ability_words, str::to_string)
            .map(|alts| build(format!(r"\b(?:{alts})\s+[{dash}—]\s*")));

        // Counter types are matched after numerals became unary.
        let counter_types = alternation(&vocab.counter_types, |w| numerals.to_unary(w)).map(|alts| {
            build(format!(
                r"(^|[^\w{marker}{counter}+\-/])({alts}) counter"
            ))
        });

        Self {
            reminder: build(r"\([^()]*\)".to_string()),
            braces: build(r"\{[^{}]*\}".to_string()),
            level_range: build(format!(r"level ({marker}{counter}*)-({marker}{counter}*)")),
            dash_x: build(format!(r"{dash}x\b")),
            x_word: build(r"\bx\b".to_string()),
            ability_words,
            counter_types,
            counter_mark: build(format!(r"{counter_mark}({counter}*)")),
            counter_word: build(r"\bcounter\b".to_string()),
            countered: build(r"\bcountered\b".to_string()),
            choice_header: build(format!(
                r"^(.*?)choose (one or both|one or more|one|two|three|four) {dash}$"
            )),
            choice_block: build(format!(
                r"{open}({marker}{counter}*\+?)((?:\s*{bullet}[^{bullet}{close}]*)+){close}"
            )),
            uncast: build(r"\buncast\b".to_string()),
            uncasted: build(r"\buncasted\b".to_string()),
            level_display: build(format!(r"(?i)\b(level) (\d+){dash}(\d+)")),
        }
    }
}

/// Forward and inverse rules-text passes, compiled once.
#[derive(Clone, Debug)]
pub struct TextPipeline {
    markers: Markers,
    numerals: NumeralCodec,
    vocab: Vocabulary,
    line_reordering: bool,
    regexes: PassRegexes,
}

impl TextPipeline {
    pub fn new(config: &CodecConfig, vocab: Vocabulary) -> Self {
        let numerals = NumeralCodec::new(config.unary.clone());
        let regexes = PassRegexes::new(&config.markers, &numerals, &vocab);
        Self {
            markers: config.markers.clone(),
            numerals,
            vocab,
            line_reordering: config.line_reordering,
            regexes,
        }
    }

    pub fn markers(&self) -> &Markers {
        &self.markers
    }

    pub fn numerals(&self) -> &NumeralCodec {
        &self.numerals
    }

    pub fn vocab(&self) -> &Vocabulary {
        &self.vocab
    }
}

impl Default for TextPipeline {
    fn default() -> Self {
        Self::new(&CodecConfig::default(), Vocabulary::default())
    }
}
