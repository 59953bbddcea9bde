//! Unary numeral grammar.
//!
//! Decimal digits never appear in canonical text. Each run of digits becomes
//! a start marker followed by one counter character per unit, so `3` becomes
//! `&^^^` with the default configuration.
//!
//! ## Usage
//!
//! ```
//! use ccg_encode::core::UnaryConfig;
//! use ccg_encode::numeral::NumeralCodec;
//!
//! let numerals = NumeralCodec::new(UnaryConfig::default());
//! assert_eq!(numerals.to_unary("deals 3 damage"), "deals &^^^ damage");
//! assert_eq!(numerals.from_unary("deals &^^^ damage"), "deals 3 damage");
//! ```

use regex::{Captures, Regex};

use crate::core::UnaryConfig;

/// Converts decimal numerals to and from their unary form.
#[derive(Clone, Debug)]
pub struct NumeralCodec {
    config: UnaryConfig,
    digits: Regex,
    runs: Regex,
    /// Matches spelled-out exception values; `None` when the table is empty.
    spelled: Option<Regex>,
}

impl NumeralCodec {
    pub fn new(config: UnaryConfig) -> Self {
        let digits = Regex::new(r"[0-9]+").expect("static regex");
        let runs = Regex::new(&format!(
            "{}(?:{})*",
            regex::escape(&config.marker.to_string()),
            regex::escape(&config.counter.to_string())
        ))
        .expect("escaped markers always form a valid regex");

        // Longest spelling first so "two hundred" never loses to a shorter entry.
        let mut spellings: Vec<&str> = config.exceptions.values().map(String::as_str).collect();
        spellings.sort_by_key(|s| std::cmp::Reverse(s.len()));
        let spelled = (!spellings.is_empty()).then(|| {
            let alternation = spellings
                .iter()
                .map(|s| regex::escape(s))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!(r"\b(?:{alternation})\b"))
                .expect("escaped spellings always form a valid regex")
        });

        Self {
            config,
            digits,
            runs,
            spelled,
        }
    }

    pub fn config(&self) -> &UnaryConfig {
        &self.config
    }

    /// Unary form of a single value, honoring exceptions and the clamp.
    pub fn encode_value(&self, value: u64) -> String {
        if let Some(spelled) = u32::try_from(value)
            .ok()
            .and_then(|v| self.config.exceptions.get(&v))
        {
            return spelled.clone();
        }

        let max = u64::from(self.config.max);
        if value > max && self.config.warn_on_clamp {
            tracing::warn!(value, max, "numeral clamped to unary maximum");
        }
        let count = value.min(max) as usize;

        let mut out = String::with_capacity(1 + count);
        out.push(self.config.marker);
        out.extend(std::iter::repeat(self.config.counter).take(count));
        out
    }

    /// Replace every run of decimal digits with its unary form.
    pub fn to_unary(&self, s: &str) -> String {
        self.digits
            .replace_all(s, |caps: &Captures| {
                // Runs too long for u64 are far above any clamp.
                let value = caps[0].parse::<u64>().unwrap_or(u64::MAX);
                self.encode_value(value)
            })
            .into_owned()
    }

    /// Replace every unary run, and every spelled exception, with decimal digits.
    ///
    /// Spelled exceptions match as whole words wherever they occur, so prose
    /// that already spelled a table value out (`sacrifices thirty lands`)
    /// also comes back in digits. Canonical text cannot tell the two apart;
    /// drop the entry from the exception table to keep such prose as printed.
    pub fn from_unary(&self, s: &str) -> String {
        let counted = self.runs.replace_all(s, |caps: &Captures| {
            let run = &caps[0];
            let units = run.chars().count() - 1;
            units.to_string()
        });

        match &self.spelled {
            Some(spelled) => spelled
                .replace_all(&counted, |caps: &Captures| {
                    self.config
                        .exceptions
                        .iter()
                        .find(|(_, s)| s.as_str() == &caps[0])
                        .map(|(n, _)| n.to_string())
                        .unwrap_or_else(|| caps[0].to_string())
                })
                .into_owned(),
            None => counted.into_owned(),
        }
    }

    /// Count of a bare unary run, e.g. `&^^` is 2. `None` if `s` is not one run.
    pub fn parse_run(&self, s: &str) -> Option<usize> {
        let mut chars = s.chars();
        if chars.next()? != self.config.marker {
            return None;
        }
        let mut units = 0;
        for c in chars {
            if c != self.config.counter {
                return None;
            }
            units += 1;
        }
        Some(units)
    }
}

impl Default for NumeralCodec {
    fn default() -> Self {
        Self::new(UnaryConfig::default())
    }
}
