//! Validity rules over a Field Set.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::cards::{FieldId, FieldSet, FieldValue};
use crate::text::Vocabulary;

/// One reason a card is not valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Violation {
    MissingName,
    MissingTypes,
    /// Creature-like without power/toughness.
    MissingPt,
    /// Power/toughness on a card that is not creature-like.
    UnexpectedPt,
    /// Only one side of power/toughness present.
    MalformedPt,
    MissingLoyalty,
    UnexpectedLoyalty,
    InvalidCost,
    InvalidText,
    UnrecognizedRarity,
    /// Chunks nothing claimed, or duplicate single-value fields.
    Leftovers,
}

impl Violation {
    /// Violations that also leave the card unparsed.
    pub fn is_structural(self) -> bool {
        matches!(self, Violation::MissingName | Violation::MissingTypes)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Violation::MissingName => "missing name",
            Violation::MissingTypes => "missing types",
            Violation::MissingPt => "creature without power/toughness",
            Violation::UnexpectedPt => "power/toughness on a non-creature",
            Violation::MalformedPt => "incomplete power/toughness",
            Violation::MissingLoyalty => "missing loyalty or defense",
            Violation::UnexpectedLoyalty => "loyalty on a card that takes none",
            Violation::InvalidCost => "malformed mana cost",
            Violation::InvalidText => "malformed rules text",
            Violation::UnrecognizedRarity => "unrecognized rarity",
            Violation::Leftovers => "unassigned or duplicate fields",
        };
        f.write_str(s)
    }
}

/// Outcome of checking one face.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Validity {
    violations: Vec<Violation>,
}

impl Validity {
    /// Name (when required) and at least one type were present.
    pub fn parsed(&self) -> bool {
        !self.violations.iter().any(|v| v.is_structural())
    }

    pub fn valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    pub fn push(&mut self, violation: Violation) {
        if !self.violations.contains(&violation) {
            self.violations.push(violation);
        }
    }
}

/// Which structural fields `check_fields_with` insists on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Required {
    NameAndTypes,
    /// For encodings whose scheme omits the name.
    TypesOnly,
}

fn any_in<'a>(mut tokens: impl Iterator<Item = &'a str>, set: &[String]) -> bool {
    tokens.any(|t| set.iter().any(|s| s == t))
}

/// Check a Field Set that must carry a name and types.
pub fn check_fields(fields: &FieldSet, vocab: &Vocabulary) -> Validity {
    check_fields_with(fields, vocab, Required::NameAndTypes)
}

/// Fold the rules over every entry of every field.
pub fn check_fields_with(fields: &FieldSet, vocab: &Vocabulary, required: Required) -> Validity {
    let mut validity = Validity::default();

    let has_name = fields
        .values(FieldId::Name)
        .filter_map(FieldValue::as_text)
        .any(|n| !n.is_empty());
    if required == Required::NameAndTypes && !has_name {
        validity.push(Violation::MissingName);
    }
    if fields.tokens(FieldId::Types).next().is_none() {
        validity.push(Violation::MissingTypes);
    }

    let creature_like = any_in(fields.tokens(FieldId::Types), &vocab.creature_types)
        || any_in(fields.tokens(FieldId::Subtypes), &vocab.creature_like_subtypes);
    let station = !vocab.station_keyword.is_empty()
        && fields
            .values(FieldId::Text)
            .filter_map(FieldValue::as_rules)
            .any(|t| {
                t.text()
                    .split(|c: char| !c.is_alphanumeric())
                    .any(|word| word == vocab.station_keyword)
            });
    let has_pt = fields.contains(FieldId::Pt);

    // Station cards gain their stats from the text; only a missing pt is excused.
    if creature_like && !has_pt && !station {
        validity.push(Violation::MissingPt);
    }
    if !creature_like && has_pt {
        validity.push(Violation::UnexpectedPt);
    }

    let needs_loyalty = any_in(fields.tokens(FieldId::Types), &vocab.loyalty_types);
    let has_loyalty = fields.contains(FieldId::Loyalty);
    if needs_loyalty && !has_loyalty {
        validity.push(Violation::MissingLoyalty);
    }
    if !needs_loyalty && has_loyalty {
        validity.push(Violation::UnexpectedLoyalty);
    }

    validity
}
