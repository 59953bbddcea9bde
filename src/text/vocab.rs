//! Word lists the text passes and validity rules consult.
//!
//! Everything is plain data so tests can inject a smaller table.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(|w| (*w).to_string()).collect()
}

const ABILITY_WORDS: &[&str] = &[
    "adamant", "addendum", "alliance", "battalion", "bloodrush", "celebration",
    "channel", "chroma", "cohort", "constellation", "converge", "council's dilemma",
    "coven", "delirium", "domain", "eerie", "eminence", "enrage", "fateful hour",
    "fathomless descent", "ferocious", "flurry", "formidable", "grandeur", "hellbent",
    "heroic", "imprint", "inspired", "join forces", "kinship", "landfall",
    "lieutenant", "magecraft", "metalcraft", "morbid", "pack tactics", "paradox",
    "parley", "radiance", "raid", "rally", "revolt", "secret council",
    "spell mastery", "strive", "survival", "sweep", "tempting offer", "threshold",
    "undergrowth", "valiant", "will of the council",
];

const COUNTER_TYPES: &[&str] = &[
    "+1/+1", "-1/-1", "+1/+0", "+0/+1", "+1/+2", "+2/+2", "+2/+0", "+0/+2",
    "-0/-1", "-0/-2", "-1/-0", "-2/-1", "-2/-2", "age", "aim", "arrow",
    "arrowhead", "awakening", "blaze", "blood", "bounty", "bribery", "brick",
    "carrion", "charge", "coin", "corpse", "credit", "crystal", "cube", "currency",
    "death", "delay", "depletion", "despair", "devotion", "divinity", "doom",
    "dream", "echo", "egg", "elixir", "energy", "eon", "experience", "eyeball",
    "fade", "feather", "fetch", "filibuster", "finality", "flood", "fungus", "fuse",
    "gem", "glyph", "gold", "growth", "hatchling", "healing", "hit", "hoofprint",
    "hour", "hourglass", "hunger", "ice", "incarnation", "infection",
    "intervention", "isolation", "javelin", "ki", "knowledge", "level", "lore",
    "loyalty", "luck", "magnet", "manifestation", "mannequin", "mask", "matrix",
    "mine", "mining", "mire", "music", "muster", "net", "night", "oil", "omen",
    "ore", "page", "pain", "paralyzation", "petal", "petrification",
    "phylactery", "pin", "plague", "poison", "polyp", "pressure", "prey", "pupa",
    "quest", "rad", "rust", "scream", "shell", "shield", "shred", "sleep",
    "sleight", "slime", "slumber", "soot", "spore", "storage", "strife", "study",
    "stun", "theft", "tide", "time", "tower", "training", "trap", "treasure",
    "velocity", "verse", "vitality", "volatile", "wage", "winch", "wind", "wish",
];

const NAME_OVERRIDES: &[(&str, &str)] = &[
    ("crovax the cursed", "crovax"),
    ("rashka the slayer", "rashka"),
    ("phage the untouchable", "phage"),
    ("shimatsu the bloodcloaked", "shimatsu"),
    ("1996 world champion", "world champion"),
    ("axelrod gunnarson", "axelrod"),
    ("hazezon tamar", "hazezon"),
    ("rubinia soulsinger", "rubinia"),
    ("rasputin dreamweaver", "rasputin"),
    ("hivis of the scale", "hivis"),
];

/// Vocabulary shared by the text passes and the validity rules.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vocabulary {
    /// Headers stripped as `word ~ `.
    pub ability_words: Vec<String>,
    /// Words recognized before `counter`, in decimal form.
    pub counter_types: Vec<String>,
    /// Full name to the short form the rules text uses.
    pub name_overrides: BTreeMap<String, String>,
    /// Names that double as rules words and are never replaced.
    pub name_exclusions: Vec<String>,
    /// Phrases after which the literal name is kept, e.g. `named `.
    pub name_keepers: Vec<String>,
    /// Words that make the next `counter` the verb.
    pub negate_objects: Vec<String>,
    /// Words that make the next `counter` a noun.
    pub counter_determiners: Vec<String>,
    /// Types that require power and toughness.
    pub creature_types: Vec<String>,
    /// Subtypes that require power and toughness even on non-creatures.
    pub creature_like_subtypes: Vec<String>,
    /// Types that require a loyalty value.
    pub loyalty_types: Vec<String>,
    /// Loyalty types whose value is exported as defense.
    pub defense_types: Vec<String>,
    /// Keyword exempting a card from the power/toughness rules.
    pub station_keyword: String,
    /// Words of a type line that are supertypes.
    pub supertypes: Vec<String>,
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self {
            ability_words: owned(ABILITY_WORDS),
            counter_types: owned(COUNTER_TYPES),
            name_overrides: NAME_OVERRIDES
                .iter()
                .map(|(full, short)| ((*full).to_string(), (*short).to_string()))
                .collect(),
            name_exclusions: owned(&["fear"]),
            name_keepers: owned(&[
                "named ",
                "name is still ",
                "named keeper of ",
                "named kobolds of ",
                "named sword of kaldra, ",
            ]),
            negate_objects: owned(&[
                "target", "it", "that", "all", "up", "another", "each", "the", "those",
                "this", "@", "spells", "abilities", "them", "any",
            ]),
            counter_determiners: owned(&[
                "a", "an", "one", "each", "every", "no", "that", "the", "additional",
                "another", "more", "single", "of", "with", "%",
            ]),
            creature_types: owned(&["creature"]),
            creature_like_subtypes: owned(&["vehicle"]),
            loyalty_types: owned(&["planeswalker", "battle"]),
            defense_types: owned(&["battle"]),
            station_keyword: "station".to_string(),
            supertypes: owned(&["legendary", "basic", "snow", "world", "ongoing", "elite", "host"]),
        }
    }
}

impl Vocabulary {
    /// Replace the ability-word list.
    #[must_use]
    pub fn with_ability_words(mut self, words: &[&str]) -> Self {
        self.ability_words = owned(words);
        self
    }

    /// Replace the counter-type list.
    #[must_use]
    pub fn with_counter_types(mut self, types: &[&str]) -> Self {
        self.counter_types = owned(types);
        self
    }

    /// Replace the creature-like subtype list.
    #[must_use]
    pub fn with_creature_like_subtypes(mut self, subtypes: &[&str]) -> Self {
        self.creature_like_subtypes = owned(subtypes);
        self
    }

    pub fn is_supertype(&self, word: &str) -> bool {
        self.supertypes.iter().any(|s| s == word)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_tables_populated() {
        let vocab = Vocabulary::default();
        assert!(vocab.ability_words.iter().any(|w| w == "landfall"));
        assert!(vocab.counter_types.iter().any(|w| w == "+1/+1"));
        assert_eq!(
            vocab.name_overrides.get("hivis of the scale").map(String::as_str),
            Some("hivis")
        );
        assert!(vocab.is_supertype("legendary"));
        assert!(!vocab.is_supertype("creature"));
    }

    #[test]
    fn test_builder() {
        let vocab = Vocabulary::default()
            .with_ability_words(&["landfall"])
            .with_counter_types(&["time"]);
        assert_eq!(vocab.ability_words, vec!["landfall".to_string()]);
        assert_eq!(vocab.counter_types, vec!["time".to_string()]);
    }
}
