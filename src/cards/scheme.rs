//! Field ordering and labeling schemes.
//!
//! A scheme is plain data passed to both `encode` and `decode`; nothing is
//! inferred from the input.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use super::fields::FieldId;
use crate::core::{CodecError, Result};

/// Label prefix of each field in labeled schemes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldLabels {
    labels: FxHashMap<FieldId, String>,
}

impl Default for FieldLabels {
    fn default() -> Self {
        let labels = [
            (FieldId::Name, "1"),
            (FieldId::Rarity, "0"),
            (FieldId::Cost, "3"),
            (FieldId::Supertypes, "4"),
            (FieldId::Types, "5"),
            (FieldId::Subtypes, "6"),
            (FieldId::Loyalty, "7"),
            (FieldId::Pt, "8"),
            (FieldId::Text, "9"),
        ]
        .into_iter()
        .map(|(field, label)| (field, label.to_string()))
        .collect();
        Self { labels }
    }
}

impl FieldLabels {
    /// Table with no labels at all.
    pub fn empty() -> Self {
        Self {
            labels: FxHashMap::default(),
        }
    }

    /// Set or replace one field's label.
    #[must_use]
    pub fn with_label(mut self, field: FieldId, label: impl Into<String>) -> Self {
        self.labels.insert(field, label.into());
        self
    }

    pub fn label(&self, field: FieldId) -> Option<&str> {
        self.labels.get(&field).map(String::as_str)
    }

    /// Label at the very start of `chunk`, longest label first.
    ///
    /// Returns the field and the chunk with the label stripped.
    pub fn match_prefix<'a>(&self, chunk: &'a str) -> Option<(FieldId, &'a str)> {
        self.labels
            .iter()
            .filter(|(_, label)| !label.is_empty() && chunk.starts_with(label.as_str()))
            .max_by(|(fa, la), (fb, lb)| la.len().cmp(&lb.len()).then(fb.cmp(fa)))
            .map(|(field, label)| (*field, &chunk[label.len()..]))
    }
}

/// Named field order plus labeling and separator options.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scheme {
    pub name: String,
    pub order: Vec<FieldId>,
    /// `None` for fully positional schemes.
    pub labels: Option<FieldLabels>,
    /// Emit a field separator before the first field.
    pub initial_sep: bool,
    /// Emit a field separator after the last field.
    pub final_sep: bool,
    /// Shuffle field order on every encode. Only honored with labels.
    pub randomize_fields: bool,
}

const DEFAULT_ORDER: [FieldId; 9] = [
    FieldId::Types,
    FieldId::Supertypes,
    FieldId::Subtypes,
    FieldId::Loyalty,
    FieldId::Pt,
    FieldId::Text,
    FieldId::Cost,
    FieldId::Rarity,
    FieldId::Name,
];

impl Scheme {
    /// Names accepted by `by_name`.
    pub const NAMES: [&'static str; 7] = ["std", "named", "noname", "rfields", "old", "norarity", "nolabel"];

    fn labeled(name: &str, order: Vec<FieldId>) -> Self {
        Self {
            name: name.to_string(),
            order,
            labels: Some(FieldLabels::default()),
            initial_sep: true,
            final_sep: true,
            randomize_fields: false,
        }
    }

    /// Default order, labeled.
    pub fn standard() -> Self {
        Self::labeled("std", DEFAULT_ORDER.to_vec())
    }

    /// Name first, then the default order.
    pub fn named() -> Self {
        let mut order = vec![FieldId::Name];
        order.extend(DEFAULT_ORDER.iter().copied().filter(|f| *f != FieldId::Name));
        Self::labeled("named", order)
    }

    /// Default order without the name.
    pub fn noname() -> Self {
        let order = DEFAULT_ORDER.iter().copied().filter(|f| *f != FieldId::Name).collect();
        Self::labeled("noname", order)
    }

    /// Default order, shuffled on every encode, no trailing separator.
    pub fn rfields() -> Self {
        Self {
            randomize_fields: true,
            final_sep: false,
            ..Self::labeled("rfields", DEFAULT_ORDER.to_vec())
        }
    }

    /// Legacy order.
    pub fn old() -> Self {
        Self::labeled(
            "old",
            vec![
                FieldId::Name,
                FieldId::Supertypes,
                FieldId::Types,
                FieldId::Loyalty,
                FieldId::Subtypes,
                FieldId::Rarity,
                FieldId::Pt,
                FieldId::Cost,
                FieldId::Text,
            ],
        )
    }

    /// Legacy order without rarity.
    pub fn norarity() -> Self {
        Self::labeled(
            "norarity",
            vec![
                FieldId::Name,
                FieldId::Supertypes,
                FieldId::Types,
                FieldId::Loyalty,
                FieldId::Subtypes,
                FieldId::Pt,
                FieldId::Cost,
                FieldId::Text,
            ],
        )
    }

    /// Default order, positional only.
    pub fn nolabel() -> Self {
        Self {
            labels: None,
            ..Self::labeled("nolabel", DEFAULT_ORDER.to_vec())
        }
    }

    /// Look a preset up by name. Unknown names are a caller bug.
    pub fn by_name(name: &str) -> Result<Self> {
        match name {
            "std" | "default" => Ok(Self::standard()),
            "named" => Ok(Self::named()),
            "noname" => Ok(Self::noname()),
            "rfields" => Ok(Self::rfields()),
            "old" => Ok(Self::old()),
            "norarity" => Ok(Self::norarity()),
            "nolabel" => Ok(Self::nolabel()),
            other => Err(CodecError::UnknownScheme(other.to_string())),
        }
    }

    pub fn includes(&self, field: FieldId) -> bool {
        self.order.contains(&field)
    }

    pub fn label(&self, field: FieldId) -> Option<&str> {
        self.labels.as_ref().and_then(|l| l.label(field))
    }
}

impl Default for Scheme {
    fn default() -> Self {
        Self::standard()
    }
}
