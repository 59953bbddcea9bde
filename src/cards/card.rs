//! Card record: one face plus an optional second face.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::extract::{fields_from_encoded, fields_from_json};
use super::fields::{FieldId, FieldSet, FieldValue, Leftover, PowerToughness};
use super::rarity::Rarity;
use super::scheme::Scheme;
use crate::codec::Codec;
use crate::core::{CodecError, CodecRng, Result};
use crate::mana::{ManaCost, ManaText, Notation};
use crate::rules::{check_fields_with, Required, Violation};
use crate::text::title_case;

/// Payload a card was built from, attached by whoever loaded it.
#[derive(Clone, Debug, PartialEq)]
pub enum CardSource {
    Encoded(String),
    Structured(Value),
}

/// Independent augmentation toggles for `Card::encode_randomized`.
///
/// Every combination decodes back with the same scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncodeOptions {
    /// Shuffle field order. Ignored by schemes without labels.
    pub fields: bool,
    /// Shuffle symbols inside every cost.
    pub mana: bool,
    /// Shuffle rules text lines within their category.
    pub lines: bool,
    /// Shuffle options inside choice blocks.
    pub choices: bool,
}

impl EncodeOptions {
    /// Every augmentation enabled.
    pub fn all() -> Self {
        Self {
            fields: true,
            mana: true,
            lines: true,
            choices: true,
        }
    }

    #[must_use]
    pub fn with_fields(mut self, enabled: bool) -> Self {
        self.fields = enabled;
        self
    }

    #[must_use]
    pub fn with_mana(mut self, enabled: bool) -> Self {
        self.mana = enabled;
        self
    }

    #[must_use]
    pub fn with_lines(mut self, enabled: bool) -> Self {
        self.lines = enabled;
        self
    }

    #[must_use]
    pub fn with_choices(mut self, enabled: bool) -> Self {
        self.choices = enabled;
        self
    }
}

/// One card face and, for split and double-faced cards, its partner.
///
/// Built once from a structured payload or an encoded string. Only the
/// provenance and annotation slots change afterwards.
#[derive(Clone, Debug)]
pub struct Card {
    name: String,
    supertypes: Vec<String>,
    types: Vec<String>,
    subtypes: Vec<String>,
    cost: ManaCost,
    text: ManaText,
    pt: Option<PowerToughness>,
    loyalty: Option<String>,
    rarity: Option<Rarity>,
    bside: Option<Box<Card>>,
    parsed: bool,
    valid: bool,
    violations: Vec<Violation>,
    other: Vec<Leftover>,
    source: OnceLock<CardSource>,
    nearest_names: Vec<String>,
    nearest_cards: Vec<String>,
}

impl Card {
    fn empty() -> Self {
        Self {
            name: String::new(),
            supertypes: Vec::new(),
            types: Vec::new(),
            subtypes: Vec::new(),
            cost: ManaCost::none(),
            text: ManaText::plain(""),
            pt: None,
            loyalty: None,
            rarity: None,
            bside: None,
            parsed: false,
            valid: false,
            violations: Vec::new(),
            other: Vec::new(),
            source: OnceLock::new(),
            nearest_names: Vec::new(),
            nearest_cards: Vec::new(),
        }
    }

    /// Fold a Field Set into a face and classify it.
    ///
    /// List fields concatenate every entry. Single-value fields keep their
    /// first entry; later ones land in `other` and make the face invalid.
    pub fn from_fields(fields: &FieldSet, required: Required, codec: &Codec) -> Self {
        let mut validity = check_fields_with(fields, codec.vocab(), required);
        let mut card = Self::empty();
        card.other = fields.other().to_vec();

        for field in FieldId::ALL {
            if !field.is_scalar() {
                let tokens: Vec<String> = fields.tokens(field).map(str::to_string).collect();
                match field {
                    FieldId::Supertypes => card.supertypes = tokens,
                    FieldId::Types => card.types = tokens,
                    _ => card.subtypes = tokens,
                }
                continue;
            }

            let mut entries = fields.entries(field).iter();
            if let Some(first) = entries.next() {
                if !card.set_scalar(field, &first.value) {
                    card.other.push(Leftover {
                        field: Some(field),
                        position: first.position,
                        value: first.value.clone(),
                    });
                }
            }
            card.other.extend(entries.map(|e| Leftover {
                field: Some(field),
                position: e.position,
                value: e.value.clone(),
            }));
        }

        if !card.cost.is_valid() {
            validity.push(Violation::InvalidCost);
        }
        if !card.text.is_valid() {
            validity.push(Violation::InvalidText);
        }
        if card.pt.as_ref().is_some_and(|pt| !pt.is_complete()) {
            validity.push(Violation::MalformedPt);
        }
        if card.rarity.as_ref().is_some_and(|r| !r.is_recognized()) {
            validity.push(Violation::UnrecognizedRarity);
        }
        if !card.other.is_empty() {
            validity.push(Violation::Leftovers);
        }

        card.parsed = validity.parsed();
        card.valid = validity.valid();
        card.violations = validity.violations().to_vec();
        if !card.valid {
            tracing::debug!(
                name = %card.name,
                parsed = card.parsed,
                violations = ?card.violations,
                "card face failed validation"
            );
        }
        card
    }

    fn set_scalar(&mut self, field: FieldId, value: &FieldValue) -> bool {
        match (field, value) {
            (FieldId::Name, FieldValue::Text(s)) => self.name = s.clone(),
            (FieldId::Loyalty, FieldValue::Text(s)) => self.loyalty = Some(s.clone()),
            (FieldId::Rarity, FieldValue::Rarity(r)) => self.rarity = Some(r.clone()),
            (FieldId::Cost, FieldValue::Cost(c)) => self.cost = c.clone(),
            (FieldId::Text, FieldValue::Rules(t)) => self.text = t.clone(),
            (FieldId::Pt, FieldValue::Pt(pt)) => self.pt = Some(pt.clone()),
            _ => return false,
        }
        true
    }

    fn attach_bside(&mut self, bside: Card) {
        self.valid &= bside.valid;
        self.bside = Some(Box::new(bside));
    }

    /// Build a card from a structured payload, including its `bside`.
    pub fn from_json(src: &Value, codec: &Codec) -> Self {
        let mut card = Self::from_fields(&fields_from_json(src, codec), Required::NameAndTypes, codec);
        if let Some(back) = src.get("bside").filter(|b| b.is_object()) {
            if back.get("bside").is_some() {
                tracing::debug!(name = %card.name, "dropping face nested beyond the second");
            }
            let bside = Self::from_fields(&fields_from_json(back, codec), Required::NameAndTypes, codec);
            card.attach_bside(bside);
        }
        card
    }

    /// Decode one encoded record.
    pub fn decode(src: &str, codec: &Codec, scheme: &Scheme) -> Self {
        let required = if scheme.includes(FieldId::Name) {
            Required::NameAndTypes
        } else {
            Required::TypesOnly
        };
        let face = |s: &str| Self::from_fields(&fields_from_encoded(s, scheme, codec), required, codec);

        let mut faces = src.split(codec.config().separators.bside.as_str());
        let mut card = face(faces.next().unwrap_or_default());
        if let Some(back) = faces.next().filter(|b| !b.is_empty()) {
            card.attach_bside(face(back));
        }
        let dropped = faces.filter(|f| !f.is_empty()).count();
        if dropped > 0 {
            tracing::debug!(name = %card.name, dropped, "dropping faces beyond the second");
        }
        card
    }

    /// Encode in the scheme's fixed order with no augmentation.
    pub fn encode(&self, codec: &Codec, scheme: &Scheme) -> String {
        // No toggle is set, so the generator is never drawn from.
        let mut rng = CodecRng::new(0);
        self.encode_record(codec, scheme, EncodeOptions::default(), &mut rng)
    }

    /// Encode with the requested augmentations drawn from `rng`.
    ///
    /// A scheme with `randomize_fields` shuffles field order even when
    /// `options.fields` is off.
    pub fn encode_randomized(&self, codec: &Codec, scheme: &Scheme, options: EncodeOptions, rng: &mut CodecRng) -> String {
        let options = options.with_fields(options.fields || scheme.randomize_fields);
        self.encode_record(codec, scheme, options, rng)
    }

    fn encode_record(&self, codec: &Codec, scheme: &Scheme, options: EncodeOptions, rng: &mut CodecRng) -> String {
        let mut out = self.encode_face(codec, scheme, options, rng);
        if let Some(bside) = &self.bside {
            out.push_str(&codec.config().separators.bside);
            out.push_str(&bside.encode_face(codec, scheme, options, rng));
        }
        out
    }

    fn encode_face(&self, codec: &Codec, scheme: &Scheme, options: EncodeOptions, rng: &mut CodecRng) -> String {
        let separator = codec.config().separators.field.as_str();
        let mut order = scheme.order.clone();
        if options.fields && scheme.labels.is_some() {
            rng.shuffle(&mut order);
        }

        let mut rendered = Vec::with_capacity(order.len());
        for field in order {
            let label = scheme.label(field).unwrap_or_default();
            rendered.push(format!("{label}{}", self.render_field(field, codec, options, rng)));
        }

        let mut out = String::new();
        if scheme.initial_sep {
            out.push_str(separator);
        }
        out.push_str(&rendered.join(separator));
        if scheme.final_sep {
            out.push_str(separator);
        }
        out
    }

    fn render_field(&self, field: FieldId, codec: &Codec, options: EncodeOptions, rng: &mut CodecRng) -> String {
        let mana = codec.mana();
        match field {
            FieldId::Name => self.name.clone(),
            FieldId::Rarity => self.rarity.as_ref().map(Rarity::encoded).unwrap_or_default(),
            FieldId::Cost if options.mana => mana.encode_cost_shuffled(&self.cost, rng),
            FieldId::Cost => mana.format_cost(&self.cost, Notation::Encoded),
            FieldId::Supertypes => self.supertypes.join(" "),
            FieldId::Types => self.types.join(" "),
            FieldId::Subtypes => self.subtypes.join(" "),
            FieldId::Loyalty => self.loyalty.clone().unwrap_or_default(),
            FieldId::Pt => self.pt.as_ref().map(ToString::to_string).unwrap_or_default(),
            FieldId::Text => {
                let pipeline = codec.text();
                let mut s = if options.mana {
                    mana.encode_text_shuffled(&self.text, rng)
                } else {
                    mana.render_text(&self.text, Notation::Encoded)
                };
                if options.choices {
                    s = pipeline.shuffle_choices(&s, rng);
                }
                if options.lines {
                    s = pipeline.shuffle_lines(&s, rng);
                }
                s
            }
        }
    }

    /// Display name: dash marker back to hyphens, title cased.
    pub fn display_name(&self, codec: &Codec) -> String {
        title_case(&codec.text().display_name(&self.name))
    }

    /// Rules text for display with costs in `notation`.
    pub fn display_text(&self, codec: &Codec, notation: Notation) -> String {
        codec.text().display(&self.text, &self.name, codec.mana(), notation)
    }

    /// Whether the loyalty slot holds a battle's defense.
    pub fn is_defense(&self, codec: &Codec) -> bool {
        self.types
            .iter()
            .any(|t| codec.vocab().defense_types.contains(t))
    }

    fn display_types(codec: &Codec, tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .map(|t| title_case(&codec.text().display_name(t)))
            .collect()
    }

    /// Structured export mirroring the structured input shape.
    pub fn to_json(&self, codec: &Codec) -> Value {
        let numerals = codec.text().numerals();
        let mut out = Map::new();
        out.insert("name".into(), Value::String(self.display_name(codec)));
        if !self.cost.is_none() {
            out.insert(
                "manaCost".into(),
                Value::String(codec.mana().format_cost(&self.cost, Notation::Json)),
            );
        }
        for (key, tokens) in [
            ("supertypes", &self.supertypes),
            ("types", &self.types),
            ("subtypes", &self.subtypes),
        ] {
            if !tokens.is_empty() || key == "types" {
                out.insert(key.into(), Self::display_types(codec, tokens).into());
            }
        }
        if let Some(rarity) = &self.rarity {
            out.insert("rarity".into(), Value::String(rarity.name().to_string()));
        }
        if let Some(pt) = &self.pt {
            for (key, side) in [("power", &pt.power), ("toughness", &pt.toughness)] {
                if !side.is_empty() {
                    out.insert(key.into(), Value::String(numerals.from_unary(side)));
                }
            }
        }
        if let Some(loyalty) = &self.loyalty {
            let key = if self.is_defense(codec) { "defense" } else { "loyalty" };
            out.insert(key.into(), Value::String(numerals.from_unary(loyalty)));
        }
        if !self.text.is_empty() {
            out.insert("text".into(), Value::String(self.display_text(codec, Notation::Json)));
        }
        if let Some(bside) = &self.bside {
            out.insert("bside".into(), bside.to_json(codec));
        }
        Value::Object(out)
    }

    /// Plain multi-line summary, the text view renderers build on.
    pub fn format_plain(&self, codec: &Codec) -> String {
        let numerals = codec.text().numerals();
        let mut lines = Vec::new();

        let cost = codec.mana().format_cost(&self.cost, Notation::Json);
        lines.push(format!("{} {cost}", self.display_name(codec)).trim_end().to_string());

        let mut type_line = Self::display_types(codec, &self.supertypes);
        type_line.extend(Self::display_types(codec, &self.types));
        let mut type_line = type_line.join(" ");
        if !self.subtypes.is_empty() {
            type_line.push_str(" — ");
            type_line.push_str(&Self::display_types(codec, &self.subtypes).join(" "));
        }
        if let Some(rarity) = &self.rarity {
            type_line.push_str(&format!(" ({rarity})"));
        }
        lines.push(type_line);

        if !self.text.is_empty() {
            lines.push(self.display_text(codec, Notation::Json));
        }
        if let Some(pt) = &self.pt {
            lines.push(format!("({})", numerals.from_unary(&pt.to_string())));
        }
        if let Some(loyalty) = &self.loyalty {
            let value = numerals.from_unary(loyalty);
            lines.push(if self.is_defense(codec) {
                format!("[[{value}]]")
            } else {
                format!("(({value}))")
            });
        }

        let mut out = lines.join("\n");
        if let Some(bside) = &self.bside {
            out.push_str("\n----\n");
            out.push_str(&bside.format_plain(codec));
        }
        out
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn supertypes(&self) -> &[String] {
        &self.supertypes
    }

    pub fn types(&self) -> &[String] {
        &self.types
    }

    pub fn subtypes(&self) -> &[String] {
        &self.subtypes
    }

    pub fn cost(&self) -> &ManaCost {
        &self.cost
    }

    pub fn text(&self) -> &ManaText {
        &self.text
    }

    pub fn pt(&self) -> Option<&PowerToughness> {
        self.pt.as_ref()
    }

    /// Loyalty or defense, in unary form.
    pub fn loyalty(&self) -> Option<&str> {
        self.loyalty.as_deref()
    }

    pub fn rarity(&self) -> Option<&Rarity> {
        self.rarity.as_ref()
    }

    pub fn bside(&self) -> Option<&Card> {
        self.bside.as_deref()
    }

    /// Name and types were present.
    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    /// Parsed, passes every validity rule, and so does the second face.
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// Unassigned chunks and duplicate single-value entries.
    pub fn other(&self) -> &[Leftover] {
        &self.other
    }

    pub fn source(&self) -> Option<&CardSource> {
        self.source.get()
    }

    /// Record the payload this card came from. Works once per card.
    pub fn attach_source(&self, source: CardSource) -> Result<()> {
        self.source
            .set(source)
            .map_err(|_| CodecError::SourceAlreadyAttached(self.name.clone()))
    }

    pub fn nearest_names(&self) -> &[String] {
        &self.nearest_names
    }

    pub fn set_nearest_names(&mut self, names: Vec<String>) {
        self.nearest_names = names;
    }

    pub fn nearest_cards(&self) -> &[String] {
        &self.nearest_cards
    }

    pub fn set_nearest_cards(&mut self, cards: Vec<String>) {
        self.nearest_cards = cards;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ornithopter() -> Value {
        json!({
            "name": "Ornithopter",
            "manaCost": "{0}",
            "type": "Artifact Creature — Thopter",
            "supertypes": [],
            "types": ["Artifact", "Creature"],
            "subtypes": ["Thopter"],
            "rarity": "Uncommon",
            "text": "Flying",
            "power": "0",
            "toughness": "2"
        })
    }

    #[test]
    fn test_from_json() {
        let codec = Codec::default();
        let card = Card::from_json(&ornithopter(), &codec);
        assert_eq!(card.name(), "ornithopter");
        assert_eq!(card.cost().cmc(), 0);
        assert_eq!(card.types(), &["artifact", "creature"]);
        assert_eq!(card.subtypes(), &["thopter"]);
        assert_eq!(card.pt().map(ToString::to_string).as_deref(), Some("&/&^^"));
        assert_eq!(card.text().text(), "flying");
        assert!(card.is_parsed());
        assert!(card.is_valid());
    }

    #[test]
    fn test_encode_standard() {
        let codec = Codec::default();
        let card = Card::from_json(&ornithopter(), &codec);
        assert_eq!(
            card.encode(&codec, &Scheme::standard()),
            "|5artifact creature|4|6thopter|7|8&/&^^|9flying|3{}|0N|1ornithopter|"
        );
    }

    #[test]
    fn test_decode_legacy_record() {
        let codec = Codec::default();
        let card = Card::decode(
            "|5artifact creature|4|6thopter|8&/&^^|9flying|3{}|0N|1ornithopter|",
            &codec,
            &Scheme::standard(),
        );
        assert_eq!(card.name(), "ornithopter");
        assert_eq!(card.cost().cmc(), 0);
        assert!(!card.cost().is_none());
        assert_eq!(card.types(), &["artifact", "creature"]);
        assert!(card.is_valid());
    }

    #[test]
    fn test_unparsed_card_still_built() {
        let codec = Codec::default();
        let card = Card::from_json(&json!({"name": "Token", "types": []}), &codec);
        assert!(!card.is_parsed());
        assert!(!card.is_valid());
        assert_eq!(card.name(), "token");
        assert_eq!(card.violations(), &[Violation::MissingTypes]);
    }

    #[test]
    fn test_unrecognized_rarity() {
        let codec = Codec::default();
        let card = Card::from_json(
            &json!({"name": "Test", "types": ["Instant"], "rarity": "Ultra Rare"}),
            &codec,
        );
        assert!(card.is_parsed());
        assert!(!card.is_valid());
        assert_eq!(card.rarity(), Some(&Rarity::Unrecognized("Ultra Rare".to_string())));
    }

    #[test]
    fn test_partial_pt_is_invalid() {
        let codec = Codec::default();
        let card = Card::from_json(
            &json!({"name": "Critter", "types": ["Creature"], "power": "2"}),
            &codec,
        );
        assert!(card.is_parsed());
        assert!(card.violations().contains(&Violation::MalformedPt));
    }

    #[test]
    fn test_duplicate_scalar_goes_to_other() {
        let codec = Codec::default();
        let card = Card::decode("|1shock|1zap|5instant|", &codec, &Scheme::standard());
        assert_eq!(card.name(), "shock");
        assert_eq!(card.other().len(), 1);
        assert_eq!(card.other()[0].field, Some(FieldId::Name));
        assert!(!card.is_valid());
    }

    #[test]
    fn test_battle_defense_export() {
        let codec = Codec::default();
        let card = Card::from_json(
            &json!({
                "name": "Invasion of Test",
                "manaCost": "{2}{R}",
                "type": "Battle — Siege",
                "types": ["Battle"],
                "subtypes": ["Siege"],
                "defense": "5",
                "text": "Test text.",
                "rarity": "common"
            }),
            &codec,
        );
        assert!(card.is_valid());
        assert_eq!(card.loyalty(), Some("&^^^^^"));
        assert!(card.encode(&codec, &Scheme::standard()).contains("|7&^^^^^|"));

        let exported = card.to_json(&codec);
        assert_eq!(exported["defense"], "5");
        assert!(exported.get("loyalty").is_none());
        assert!(card.format_plain(&codec).contains("[[5]]"));
    }

    #[test]
    fn test_to_json_creature() {
        let codec = Codec::default();
        let card = Card::from_json(
            &json!({
                "name": "Grizzly Bears",
                "manaCost": "{1}{G}",
                "types": ["Creature"],
                "subtypes": ["Bear"],
                "rarity": "Common",
                "power": "2",
                "toughness": "2",
                "text": "Whenever Grizzly Bears enters the battlefield, you win."
            }),
            &codec,
        );
        let d = card.to_json(&codec);
        assert_eq!(d["name"], "Grizzly Bears");
        assert_eq!(d["manaCost"], "{1}{G}");
        assert_eq!(d["types"], json!(["Creature"]));
        assert_eq!(d["subtypes"], json!(["Bear"]));
        assert_eq!(d["rarity"], "common");
        assert_eq!(d["power"], "2");
        assert_eq!(d["toughness"], "2");
        assert_eq!(d["text"], "Whenever Grizzly Bears enters the battlefield, you win.");
    }

    #[test]
    fn test_split_card() {
        let codec = Codec::default();
        let card = Card::from_json(
            &json!({
                "name": "Fire",
                "manaCost": "{1}{R}",
                "types": ["Instant"],
                "rarity": "Uncommon",
                "text": "Fire deals 2 damage divided as you choose among one or two targets.",
                "bside": {
                    "name": "Ice",
                    "manaCost": "{1}{U}",
                    "types": ["Instant"],
                    "rarity": "Uncommon",
                    "text": "Tap target permanent.\nDraw a card."
                }
            }),
            &codec,
        );
        assert!(card.is_valid());
        let encoded = card.encode(&codec, &Scheme::standard());
        assert_eq!(encoded.matches('\n').count(), 1);

        let decoded = Card::decode(&encoded, &codec, &Scheme::standard());
        let back = decoded.bside().unwrap();
        assert_eq!(back.name(), "ice");
        assert_eq!(back.cost().colors(), "U");

        let d = decoded.to_json(&codec);
        assert_eq!(d["bside"]["name"], "Ice");
        assert_eq!(d["bside"]["manaCost"], "{1}{U}");
        assert_eq!(d["bside"]["text"], "Tap target permanent.\nDraw a card.");
    }

    #[test]
    fn test_source_is_write_once() {
        let codec = Codec::default();
        let card = Card::from_json(&ornithopter(), &codec);
        assert!(card.source().is_none());
        card.attach_source(CardSource::Structured(ornithopter())).unwrap();
        assert_eq!(
            card.attach_source(CardSource::Encoded(String::new())),
            Err(CodecError::SourceAlreadyAttached("ornithopter".to_string()))
        );
        assert!(matches!(card.source(), Some(CardSource::Structured(_))));
    }

    #[test]
    fn test_annotations() {
        let codec = Codec::default();
        let mut card = Card::from_json(&ornithopter(), &codec);
        card.set_nearest_names(vec!["ornithopter of paradise".to_string()]);
        card.set_nearest_cards(vec!["|5artifact|".to_string()]);
        assert_eq!(card.nearest_names().len(), 1);
        assert_eq!(card.nearest_cards().len(), 1);
    }

    #[test]
    fn test_format_plain() {
        let codec = Codec::default();
        let card = Card::from_json(&ornithopter(), &codec);
        assert_eq!(
            card.format_plain(&codec),
            "Ornithopter {0}\nArtifact Creature — Thopter (uncommon)\nFlying\n(0/2)"
        );
    }
}
