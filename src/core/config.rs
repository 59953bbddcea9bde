//! Codec configuration types.
//!
//! The codec is configured once at startup by providing:
//! - `Markers`: reserved single characters used inside the canonical text
//! - `Separators`: record, face and field separators of the encoded format
//! - `UnaryConfig`: the unary numeral grammar
//! - `CodecConfig`: combines all of the above
//!
//! Nothing in the pipeline hardcodes these characters; every pass reads them
//! from the configuration it is handed.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Reserved characters of the canonical text form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markers {
    /// Replaces em-dashes and free-standing hyphens.
    pub dash: char,
    /// Replaces bullets of modal choice options.
    pub bullet: char,
    /// Stands in for the card's own name.
    pub this: char,
    /// Stands in for the declared counter type.
    pub counter: char,
    /// Scratch character, never survives a pass.
    pub reserved: char,
    /// Placeholder for an embedded mana cost inside rules text.
    pub reserved_mana: char,
    /// Opens a collapsed choice block.
    pub choice_open: char,
    /// Closes a collapsed choice block.
    pub choice_close: char,
    /// The variable X.
    pub x: char,
    /// The tap symbol `{T}`.
    pub tap: char,
    /// The untap symbol `{Q}`.
    pub untap: char,
    /// Internal line separator of flattened rules text.
    pub newline: char,
}

impl Default for Markers {
    fn default() -> Self {
        Self {
            dash: '~',
            bullet: '=',
            this: '@',
            counter: '%',
            reserved: '\u{b}',
            reserved_mana: '$',
            choice_open: '[',
            choice_close: ']',
            x: 'X',
            tap: 'T',
            untap: 'Q',
            newline: '\\',
        }
    }
}

/// Separators of the encoded text format.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Separators {
    /// Between records in a corpus.
    pub card: String,
    /// Between the two faces of one record.
    pub bside: String,
    /// Between fields of one face.
    pub field: String,
}

impl Default for Separators {
    fn default() -> Self {
        Self {
            card: "\n\n".to_string(),
            bside: "\n".to_string(),
            field: "|".to_string(),
        }
    }
}

/// Unary numeral grammar.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnaryConfig {
    /// Starts every unary numeral.
    pub marker: char,
    /// Repeated once per unit.
    pub counter: char,
    /// Values above this clamp to it.
    pub max: u32,
    /// Values spelled out literally instead of being counted.
    pub exceptions: BTreeMap<u32, String>,
    /// Emit a `tracing` warning whenever a value is clamped.
    pub warn_on_clamp: bool,
}

impl Default for UnaryConfig {
    fn default() -> Self {
        let exceptions = [
            (25, "twenty-five"),
            (30, "thirty"),
            (40, "forty"),
            (50, "fifty"),
            (100, "one hundred"),
            (200, "two hundred"),
        ]
        .into_iter()
        .map(|(n, s)| (n, s.to_string()))
        .collect();

        Self {
            marker: '&',
            counter: '^',
            max: 20,
            exceptions,
            warn_on_clamp: false,
        }
    }
}

/// Complete codec configuration.
///
/// ## Example
///
/// ```
/// use ccg_encode::core::CodecConfig;
///
/// let config = CodecConfig::default().with_line_reordering(false);
/// assert_eq!(config.markers.this, '@');
/// assert!(!config.line_reordering);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecConfig {
    pub markers: Markers,
    pub separators: Separators,
    pub unary: UnaryConfig,
    /// Reorder rules text lines into canonical categories during extraction.
    pub line_reordering: bool,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            markers: Markers::default(),
            separators: Separators::default(),
            unary: UnaryConfig::default(),
            line_reordering: true,
        }
    }
}

impl CodecConfig {
    /// Enable or disable the line-category reordering pass.
    #[must_use]
    pub fn with_line_reordering(mut self, enabled: bool) -> Self {
        self.line_reordering = enabled;
        self
    }

    /// Warn through `tracing` when a numeral is clamped.
    #[must_use]
    pub fn with_clamp_warnings(mut self, enabled: bool) -> Self {
        self.unary.warn_on_clamp = enabled;
        self
    }

    /// Replace the unary exception table.
    #[must_use]
    pub fn with_unary_exceptions(mut self, exceptions: BTreeMap<u32, String>) -> Self {
        self.unary.exceptions = exceptions;
        self
    }
}
