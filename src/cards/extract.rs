//! Field extraction from structured payloads and from encoded text.
//!
//! Both entry points produce the same `FieldSet` shape. Structured entries
//! carry no position; encoded entries carry their chunk index.

use serde_json::Value;

use super::fields::{FieldId, FieldSet, PowerToughness};
use super::rarity::Rarity;
use super::scheme::Scheme;
use crate::codec::Codec;
use crate::core::Markers;
use crate::mana::Notation;
use crate::text::passes::fold_unicode;

/// Supertype whose names also go by their nickname before the comma.
const LEGENDARY: &str = "legendary";

/// Numerals in names that are spelled out before encoding.
const NAME_NUMERALS: [(&str, &str); 3] = [
    ("100,000", "one hundred thousand"),
    ("1,000", "one thousand"),
    ("1996", "nineteen ninety-six"),
];

/// Lowercase a printed name and fold it to the encoded alphabet.
pub fn sanitize_name(name: &str, markers: &Markers) -> String {
    let mut s = name.trim().to_lowercase().replace(['!', '?'], "");
    for (digits, words) in NAME_NUMERALS {
        s = s.replace(digits, words);
    }
    fold_unicode(&s, markers).replace('-', &markers.dash.to_string())
}

/// Lowercase a type token, normalizing quotes and hyphens.
pub fn sanitize_type(token: &str, markers: &Markers) -> String {
    fold_unicode(&token.trim().to_lowercase(), markers)
        .replace('"', "'")
        .replace('-', &markers.dash.to_string())
}

/// String form of a JSON string or number.
fn scalar(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn type_tokens(value: &Value, markers: &Markers) -> Vec<String> {
    let words: Vec<String> = match value {
        Value::Array(items) => items.iter().filter_map(scalar).collect(),
        other => scalar(other).into_iter().collect(),
    };
    words
        .iter()
        .flat_map(|w| w.split_whitespace())
        .map(|w| sanitize_type(w, markers))
        .filter(|w| !w.is_empty())
        .collect()
}

/// Split a printed type line into supertypes, types and subtypes.
fn split_type_line(line: &str, codec: &Codec) -> (Vec<String>, Vec<String>, Vec<String>) {
    let markers = &codec.config().markers;
    let (main, sub) = match line.split_once('—') {
        Some((main, sub)) => (main, sub),
        None => line.split_once(" - ").unwrap_or((line, "")),
    };

    let (mut supertypes, mut types) = (Vec::new(), Vec::new());
    for word in main.split_whitespace().map(|w| sanitize_type(w, markers)) {
        if codec.vocab().is_supertype(&word) {
            supertypes.push(word);
        } else {
            types.push(word);
        }
    }
    let subtypes = sub
        .split_whitespace()
        .map(|w| sanitize_type(w, markers))
        .collect();
    (supertypes, types, subtypes)
}

/// Extract the fields of one structured face. Nested faces are ignored here.
pub fn fields_from_json(src: &Value, codec: &Codec) -> FieldSet {
    let markers = &codec.config().markers;
    let numerals = codec.text().numerals();
    let mut fields = FieldSet::new();

    let raw_name = src.get("name").and_then(scalar).unwrap_or_default();
    fields.push(FieldId::Name, None, sanitize_name(&raw_name, markers));

    for (key, field) in [
        ("supertypes", FieldId::Supertypes),
        ("types", FieldId::Types),
        ("subtypes", FieldId::Subtypes),
    ] {
        if let Some(value) = src.get(key) {
            fields.push(field, None, type_tokens(value, markers));
        }
    }
    if src.get("types").is_none() {
        if let Some(line) = src.get("type").and_then(Value::as_str) {
            let (supertypes, types, subtypes) = split_type_line(line, codec);
            if src.get("supertypes").is_none() {
                fields.push(FieldId::Supertypes, None, supertypes);
            }
            fields.push(FieldId::Types, None, types);
            if src.get("subtypes").is_none() {
                fields.push(FieldId::Subtypes, None, subtypes);
            }
        }
    }

    if let Some(cost) = src.get("manaCost").and_then(Value::as_str) {
        fields.push(FieldId::Cost, None, codec.mana().parse_cost(cost, Notation::Json));
    }

    if let Some(text) = src.get("text").and_then(Value::as_str) {
        let legendary = fields.tokens(FieldId::Supertypes).any(|t| t == LEGENDARY);
        let canonical = codec.text().forward_face(text, &raw_name, legendary, codec.mana());
        fields.push(
            FieldId::Text,
            None,
            codec.mana().parse_text(&canonical, Notation::Json),
        );
    }

    let fold = |s: &str| fold_unicode(&numerals.to_unary(s.trim()), markers);
    let unary = |v: &Value| scalar(v).map(|s| fold(s.as_str()));
    let power = src.get("power").and_then(unary);
    let toughness = src.get("toughness").and_then(unary);
    if power.is_some() || toughness.is_some() {
        fields.push(
            FieldId::Pt,
            None,
            PowerToughness::new(power.unwrap_or_default(), toughness.unwrap_or_default()),
        );
    } else if let Some(pt) = src.get("pt").and_then(scalar) {
        let pt = PowerToughness::parse(&pt);
        fields.push(
            FieldId::Pt,
            None,
            PowerToughness::new(fold(pt.power.as_str()), fold(pt.toughness.as_str())),
        );
    }

    // Loyalty wins when a payload carries both.
    if let Some(loyalty) = src.get("loyalty").or_else(|| src.get("defense")).and_then(unary) {
        fields.push(FieldId::Loyalty, None, loyalty);
    }

    if let Some(rarity) = src.get("rarity").and_then(Value::as_str) {
        fields.push(FieldId::Rarity, None, Rarity::from_name(rarity));
    }

    fields
}

/// Parse one encoded value into its field.
fn push_encoded(fields: &mut FieldSet, field: FieldId, position: Option<usize>, value: &str, codec: &Codec) {
    if value.is_empty() {
        return;
    }
    let mana = codec.mana();
    match field {
        FieldId::Name | FieldId::Loyalty => fields.push(field, position, value),
        FieldId::Rarity => fields.push(field, position, Rarity::from_encoded(value)),
        FieldId::Cost => fields.push(field, position, mana.parse_cost(value, Notation::Encoded)),
        FieldId::Supertypes | FieldId::Types | FieldId::Subtypes => {
            let tokens: Vec<String> = value.split_whitespace().map(str::to_string).collect();
            fields.push(field, position, tokens);
        }
        FieldId::Pt => fields.push(field, position, PowerToughness::parse(value)),
        FieldId::Text => fields.push(field, position, mana.parse_text(value, Notation::Encoded)),
    }
}

/// Extract the fields of one encoded face.
///
/// A label at the very start of a chunk decides its field; otherwise the
/// chunk index picks from the scheme's order. An empty chunk is skipped
/// without consuming a position only when it is the first or last one.
pub fn fields_from_encoded(src: &str, scheme: &Scheme, codec: &Codec) -> FieldSet {
    let separator = codec.config().separators.field.as_str();
    let chunks: Vec<&str> = src.split(separator).collect();
    let last = chunks.len().saturating_sub(1);

    let mut fields = FieldSet::new();
    let mut index = 0;
    for (i, chunk) in chunks.iter().enumerate() {
        if chunk.is_empty() && (i == 0 || i == last) {
            continue;
        }
        let position = Some(index);
        let labeled = scheme.labels.as_ref().and_then(|labels| labels.match_prefix(chunk));
        let target = labeled.or_else(|| scheme.order.get(index).map(|field| (*field, *chunk)));
        index += 1;

        match target {
            Some((field, value)) => {
                tracing::trace!(%field, chunk = index - 1, labeled = labeled.is_some(), "field resolved");
                push_encoded(&mut fields, field, position, value, codec);
            }
            None if chunk.is_empty() => {}
            None => {
                tracing::trace!(chunk = index - 1, raw = *chunk, "chunk beyond scheme order");
                fields.push_other(position, *chunk);
            }
        }
    }
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::FieldValue;
    use crate::core::CodecConfig;
    use serde_json::json;

    fn text_of(fields: &FieldSet, field: FieldId) -> Option<&str> {
        fields.values(field).next().and_then(FieldValue::as_text)
    }

    #[test]
    fn test_sanitize_name() {
        let markers = Markers::default();
        assert_eq!(sanitize_name("Ach! Hans, Run!", &markers), "ach hans, run");
        assert_eq!(sanitize_name("Lim-Dûl's Vault", &markers), "lim~dul's vault");
        assert_eq!(
            sanitize_name("1996 World Champion", &markers),
            "nineteen ninety~six world champion"
        );
        assert_eq!(
            sanitize_name("Borrowing 100,000 Arrows", &markers),
            "borrowing one hundred thousand arrows"
        );
    }

    #[test]
    fn test_json_name_and_types() {
        let codec = Codec::default();
        let fields = fields_from_json(&json!({"name": "Test Card", "types": ["Creature"]}), &codec);
        assert_eq!(text_of(&fields, FieldId::Name), Some("test card"));
        assert_eq!(fields.tokens(FieldId::Types).collect::<Vec<_>>(), vec!["creature"]);
    }

    #[test]
    fn test_json_subtype_sanitization() {
        let codec = Codec::default();
        let fields = fields_from_json(
            &json!({"name": "Land", "types": ["Land"], "subtypes": ["Urza\"s", "Power-Plant"]}),
            &codec,
        );
        let subtypes: Vec<&str> = fields.tokens(FieldId::Subtypes).collect();
        assert_eq!(subtypes, vec!["urza's", "power~plant"]);
    }

    #[test]
    fn test_json_type_line_fallback() {
        let codec = Codec::default();
        let fields = fields_from_json(
            &json!({"name": "Bob", "type": "Legendary Creature — Human Wizard"}),
            &codec,
        );
        assert_eq!(fields.tokens(FieldId::Supertypes).collect::<Vec<_>>(), vec!["legendary"]);
        assert_eq!(fields.tokens(FieldId::Types).collect::<Vec<_>>(), vec!["creature"]);
        assert_eq!(fields.tokens(FieldId::Subtypes).collect::<Vec<_>>(), vec!["human", "wizard"]);
    }

    #[test]
    fn test_json_nickname_only_when_legendary() {
        let codec = Codec::default();
        let rules = |src: Value| {
            let fields = fields_from_json(&src, &codec);
            let text = fields
                .values(FieldId::Text)
                .next()
                .and_then(FieldValue::as_rules)
                .map(|t| t.text().to_string());
            text
        };
        let legendary = rules(json!({
            "name": "Skithiryx, the Blight Dragon", "supertypes": ["Legendary"],
            "types": ["Creature"], "text": "Regenerate Skithiryx."
        }));
        assert_eq!(legendary.as_deref(), Some("regenerate @."));

        let plain = rules(json!({
            "name": "Hunt, the Pack", "types": ["Sorcery"], "text": "Hunt each turn."
        }));
        assert_eq!(plain.as_deref(), Some("hunt each turn."));
    }

    #[test]
    fn test_json_pt_variants() {
        let codec = Codec::default();
        let pt = |src: Value| {
            fields_from_json(&src, &codec)
                .values(FieldId::Pt)
                .next()
                .and_then(FieldValue::as_pt)
                .cloned()
        };
        assert_eq!(
            pt(json!({"power": "4", "toughness": 5})),
            Some(PowerToughness::new("&^^^^", "&^^^^^"))
        );
        assert_eq!(pt(json!({"power": "2"})), Some(PowerToughness::new("&^^", "")));
        assert_eq!(pt(json!({"pt": "1/1"})), Some(PowerToughness::new("&^", "&^")));
        assert_eq!(
            pt(json!({"pt": "\u{2212}1/1"})),
            pt(json!({"power": "\u{2212}1", "toughness": "1"}))
        );
        assert_eq!(pt(json!({"pt": "\u{2212}1/1"})), Some(PowerToughness::new("-&^", "&^")));
        assert_eq!(pt(json!({"power": "*", "toughness": "1+*"})), Some(PowerToughness::new("*", "&^+*")));
        assert_eq!(pt(json!({"name": "x"})), None);
    }

    #[test]
    fn test_json_loyalty_prefers_loyalty() {
        let codec = Codec::default();
        let fields = fields_from_json(&json!({"loyalty": "3", "defense": "5"}), &codec);
        assert_eq!(text_of(&fields, FieldId::Loyalty), Some("&^^^"));
        let fields = fields_from_json(&json!({"defense": 5}), &codec);
        assert_eq!(text_of(&fields, FieldId::Loyalty), Some("&^^^^^"));
    }

    #[test]
    fn test_json_text_costs() {
        let codec = Codec::default();
        let fields = fields_from_json(
            &json!({"name": "Test Station", "text": "{T}: Add {1}."}),
            &codec,
        );
        let text = fields.values(FieldId::Text).next().and_then(FieldValue::as_rules).unwrap();
        assert_eq!(text.costs().len(), 1);
        assert_eq!(codec.mana().render_text(text, Notation::Json), "T: add {1}.");
    }

    #[test]
    fn test_encoded_label_vs_position() {
        let codec = Codec::default();
        let fields = fields_from_encoded("5creature|||||deals 9 damage.|{}|N|1golem", &Scheme::standard(), &codec);
        assert_eq!(text_of(&fields, FieldId::Name), Some("golem"));
        assert_eq!(fields.tokens(FieldId::Types).collect::<Vec<_>>(), vec!["creature"]);
        let text = fields.values(FieldId::Text).next().and_then(FieldValue::as_rules).unwrap();
        assert_eq!(text.text(), "deals 9 damage.");
        assert_eq!(
            fields.values(FieldId::Rarity).next(),
            Some(&FieldValue::Rarity(Rarity::Uncommon))
        );
    }

    #[test]
    fn test_encoded_label_wins_over_position() {
        let codec = Codec::default();
        let fields = fields_from_encoded("|1grizzly bears|", &Scheme::standard(), &codec);
        assert_eq!(text_of(&fields, FieldId::Name), Some("grizzly bears"));
        assert!(!fields.contains(FieldId::Types));
    }

    #[test]
    fn test_encoded_positional() {
        let codec = Codec::default();
        let src = "|creature||bear||||{^GG}|O|grizzly bears|";
        let fields = fields_from_encoded(src, &Scheme::nolabel(), &codec);
        assert_eq!(text_of(&fields, FieldId::Name), Some("grizzly bears"));
        assert_eq!(fields.tokens(FieldId::Subtypes).collect::<Vec<_>>(), vec!["bear"]);
        assert!(fields.contains(FieldId::Cost));
        assert!(fields.other().is_empty());
    }

    #[test]
    fn test_encoded_overflow_goes_to_other() {
        let codec = Codec::default();
        let src = "|a|b|c|d|e|f|{}|O|name|extra|";
        let fields = fields_from_encoded(src, &Scheme::nolabel(), &codec);
        assert_eq!(fields.other().len(), 1);
        assert_eq!(fields.other()[0].position, Some(9));
    }

    #[test]
    fn test_custom_separator() {
        let mut config = CodecConfig::default();
        config.separators.field = ";".to_string();
        let codec = Codec::new(config, Default::default());
        let fields = fields_from_encoded(";5instant;1shock;", &Scheme::standard(), &codec);
        assert_eq!(text_of(&fields, FieldId::Name), Some("shock"));
    }
}
