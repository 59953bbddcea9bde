//! Rarity markers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed rarity set, plus the raw string of anything unrecognized.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Rarity {
    Common,
    Uncommon,
    Rare,
    Mythic,
    Special,
    BasicLand,
    /// Kept verbatim; a card carrying it is parsed but not valid.
    Unrecognized(String),
}

impl Rarity {
    const KNOWN: [Rarity; 6] = [
        Rarity::Common,
        Rarity::Uncommon,
        Rarity::Rare,
        Rarity::Mythic,
        Rarity::Special,
        Rarity::BasicLand,
    ];

    /// Structured-source spelling, any case. `mythic rare` is accepted too.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_lowercase().as_str() {
            "common" => Rarity::Common,
            "uncommon" => Rarity::Uncommon,
            "rare" => Rarity::Rare,
            "mythic" | "mythic rare" => Rarity::Mythic,
            "special" => Rarity::Special,
            "basic land" => Rarity::BasicLand,
            _ => Rarity::Unrecognized(name.to_string()),
        }
    }

    /// Encoded form: a one-character marker, or the raw string.
    pub fn from_encoded(s: &str) -> Self {
        Self::KNOWN
            .into_iter()
            .find(|r| r.marker().is_some_and(|m| s.len() == m.len_utf8() && s.starts_with(m)))
            .unwrap_or_else(|| Rarity::Unrecognized(s.to_string()))
    }

    pub fn marker(&self) -> Option<char> {
        match self {
            Rarity::Common => Some('O'),
            Rarity::Uncommon => Some('N'),
            Rarity::Rare => Some('A'),
            Rarity::Mythic => Some('Y'),
            Rarity::Special => Some('E'),
            Rarity::BasicLand => Some('L'),
            Rarity::Unrecognized(_) => None,
        }
    }

    /// Lowercase display name, or the raw string.
    pub fn name(&self) -> &str {
        match self {
            Rarity::Common => "common",
            Rarity::Uncommon => "uncommon",
            Rarity::Rare => "rare",
            Rarity::Mythic => "mythic",
            Rarity::Special => "special",
            Rarity::BasicLand => "basic land",
            Rarity::Unrecognized(raw) => raw,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Rarity::Unrecognized(_))
    }

    /// String stored in the encoded field.
    pub fn encoded(&self) -> String {
        match self.marker() {
            Some(m) => m.to_string(),
            None => self.name().to_string(),
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
