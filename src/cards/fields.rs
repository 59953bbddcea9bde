//! Field identifiers and the multi-entry Field Set.
//!
//! A field may be recovered more than once, e.g. types split across repeated
//! labels. Entries are kept in the order they were seen and every consumer
//! folds over all of them.

use std::fmt;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::rarity::Rarity;
use crate::mana::{ManaCost, ManaText};

/// Logical field of one card face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldId {
    Name,
    Rarity,
    Cost,
    Supertypes,
    Types,
    Subtypes,
    Loyalty,
    Pt,
    Text,
}

impl FieldId {
    pub const ALL: [FieldId; 9] = [
        FieldId::Name,
        FieldId::Rarity,
        FieldId::Cost,
        FieldId::Supertypes,
        FieldId::Types,
        FieldId::Subtypes,
        FieldId::Loyalty,
        FieldId::Pt,
        FieldId::Text,
    ];

    /// Fields holding a single value; a second entry is a duplicate.
    pub fn is_scalar(self) -> bool {
        !matches!(self, FieldId::Supertypes | FieldId::Types | FieldId::Subtypes)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FieldId::Name => "name",
            FieldId::Rarity => "rarity",
            FieldId::Cost => "cost",
            FieldId::Supertypes => "supertypes",
            FieldId::Types => "types",
            FieldId::Subtypes => "subtypes",
            FieldId::Loyalty => "loyalty",
            FieldId::Pt => "pt",
            FieldId::Text => "text",
        }
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Power and toughness, each side in unary form.
///
/// A side is empty when the source only carried the other one.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PowerToughness {
    pub power: String,
    pub toughness: String,
}

impl PowerToughness {
    pub fn new(power: impl Into<String>, toughness: impl Into<String>) -> Self {
        Self {
            power: power.into(),
            toughness: toughness.into(),
        }
    }

    /// Split `p/t`. A missing slash leaves the toughness empty.
    pub fn parse(s: &str) -> Self {
        match s.split_once('/') {
            Some((power, toughness)) => Self::new(power.trim(), toughness.trim()),
            None => Self::new(s.trim(), ""),
        }
    }

    /// Both sides present.
    pub fn is_complete(&self) -> bool {
        !self.power.is_empty() && !self.toughness.is_empty()
    }
}

impl fmt::Display for PowerToughness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.power, self.toughness)
    }
}

/// Value recovered for one field.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FieldValue {
    /// Name or loyalty.
    Text(String),
    /// Supertypes, types or subtypes.
    List(Vec<String>),
    Cost(ManaCost),
    Rules(ManaText),
    Pt(PowerToughness),
    Rarity(Rarity),
}

impl FieldValue {
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            FieldValue::List(v) => Some(v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_cost(&self) -> Option<&ManaCost> {
        match self {
            FieldValue::Cost(c) => Some(c),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rules(&self) -> Option<&ManaText> {
        match self {
            FieldValue::Rules(t) => Some(t),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_pt(&self) -> Option<&PowerToughness> {
        match self {
            FieldValue::Pt(pt) => Some(pt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_rarity(&self) -> Option<&Rarity> {
        match self {
            FieldValue::Rarity(r) => Some(r),
            _ => None,
        }
    }

    /// Whether the value carries anything.
    pub fn is_present(&self) -> bool {
        match self {
            FieldValue::Text(s) => !s.is_empty(),
            FieldValue::List(v) => !v.is_empty(),
            FieldValue::Cost(c) => !c.is_none(),
            FieldValue::Rules(t) => !t.is_empty(),
            FieldValue::Pt(_) | FieldValue::Rarity(_) => true,
        }
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<Vec<String>> for FieldValue {
    fn from(v: Vec<String>) -> Self {
        FieldValue::List(v)
    }
}

impl From<ManaCost> for FieldValue {
    fn from(c: ManaCost) -> Self {
        FieldValue::Cost(c)
    }
}

impl From<ManaText> for FieldValue {
    fn from(t: ManaText) -> Self {
        FieldValue::Rules(t)
    }
}

impl From<PowerToughness> for FieldValue {
    fn from(pt: PowerToughness) -> Self {
        FieldValue::Pt(pt)
    }
}

impl From<Rarity> for FieldValue {
    fn from(r: Rarity) -> Self {
        FieldValue::Rarity(r)
    }
}

/// One recovered value and where it came from.
///
/// `position` is the chunk index for encoded input, `None` for structured input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldEntry {
    pub position: Option<usize>,
    pub value: FieldValue,
}

/// A value that could not be placed on the card.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Leftover {
    /// Field the value belonged to, `None` for an unassigned chunk.
    pub field: Option<FieldId>,
    pub position: Option<usize>,
    pub value: FieldValue,
}

/// Field id to every entry recovered for it, in order.
#[derive(Clone, Debug, Default)]
pub struct FieldSet {
    entries: FxHashMap<FieldId, SmallVec<[FieldEntry; 1]>>,
    other: Vec<Leftover>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a value. Empty values are dropped.
    pub fn push(&mut self, field: FieldId, position: Option<usize>, value: impl Into<FieldValue>) {
        let value = value.into();
        if !value.is_present() {
            return;
        }
        self.entries
            .entry(field)
            .or_default()
            .push(FieldEntry { position, value });
    }

    /// Record a chunk no field claimed.
    pub fn push_other(&mut self, position: Option<usize>, raw: impl Into<String>) {
        self.other.push(Leftover {
            field: None,
            position,
            value: FieldValue::Text(raw.into()),
        });
    }

    /// Builder form of `push`, handy for fixtures.
    #[must_use]
    pub fn with(mut self, field: FieldId, value: impl Into<FieldValue>) -> Self {
        self.push(field, None, value);
        self
    }

    pub fn entries(&self, field: FieldId) -> &[FieldEntry] {
        self.entries.get(&field).map_or(&[], |v| v.as_slice())
    }

    pub fn values(&self, field: FieldId) -> impl Iterator<Item = &FieldValue> {
        self.entries(field).iter().map(|e| &e.value)
    }

    pub fn contains(&self, field: FieldId) -> bool {
        !self.entries(field).is_empty()
    }

    /// Every token of a list field, across all entries.
    pub fn tokens(&self, field: FieldId) -> impl Iterator<Item = &str> {
        self.values(field)
            .filter_map(FieldValue::as_list)
            .flatten()
            .map(String::as_str)
    }

    pub fn other(&self) -> &[Leftover] {
        &self.other
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty() && self.other.is_empty()
    }
}
