//! Parsing and rendering costs in the four supported notations.

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::cost::{ManaCost, ManaToken};
use super::symbol::{ManaSymbol, SymbolTable};
use crate::core::{CodecConfig, CodecRng, Result};

const FORUM_OPEN: &str = "[mana]";
const FORUM_CLOSE: &str = "[/mana]";
const HTML_OPEN: &str = "<img class='mana-";
const HTML_CLOSE: &str = "'>";

/// External spelling of a cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Notation {
    /// `{2}{W}{W/U}{G/W/P}`
    #[default]
    Json,
    /// `[mana]2W{WU}[/mana]`
    Forum,
    /// `<img class='mana-2'><img class='mana-W-U'>`
    Html,
    /// `{^^WWWU}`
    Encoded,
}

/// Symbol table plus the scanners built from it.
#[derive(Clone, Debug)]
pub struct ManaCodec {
    table: SymbolTable,
    counter: char,
    unary_marker: char,
    tap: char,
    untap: char,
    pub(crate) placeholder: char,
    json_block: Regex,
    encoded_block: Regex,
    tap_symbol: Regex,
}

fn char_class(chars: impl IntoIterator<Item = char>) -> String {
    chars
        .into_iter()
        .map(|c| regex::escape(&c.to_string()))
        .collect()
}

impl ManaCodec {
    pub fn new(table: SymbolTable, config: &CodecConfig) -> Self {
        let letters = table.charset();
        let cased: Vec<char> = letters
            .iter()
            .flat_map(|c| [c.to_ascii_uppercase(), c.to_ascii_lowercase()])
            .collect();

        let counter = config.unary.counter;
        let unary_marker = config.unary.marker;

        // Bracketed blocks may run together, so braces belong to the class.
        let json_class = char_class(
            cased
                .iter()
                .copied()
                .chain("0123456789/{}".chars())
                .chain([counter, unary_marker]),
        );
        let json_block = Regex::new(&format!(r"\{{[{json_class}]+\}}"))
            .expect("escaped character class is a valid regex");

        let encoded_class = char_class(cased.iter().copied().chain([counter]));
        let encoded_block = Regex::new(&format!(r"\{{[{encoded_class}]*\}}"))
            .expect("escaped character class is a valid regex");

        let markers = &config.markers;
        let tap_symbol = Regex::new(&format!(
            r"\{{([{}])\}}",
            char_class(
                [markers.tap, markers.untap]
                    .into_iter()
                    .flat_map(|c| [c.to_ascii_uppercase(), c.to_ascii_lowercase()])
            )
        ))
        .expect("escaped character class is a valid regex");

        Self {
            table,
            counter,
            unary_marker,
            tap: markers.tap,
            untap: markers.untap,
            placeholder: markers.reserved_mana,
            json_block,
            encoded_block,
            tap_symbol,
        }
    }

    pub fn table(&self) -> &SymbolTable {
        &self.table
    }

    /// Look up a symbol by canonical or alt spelling.
    pub fn lookup(&self, spelling: &str) -> Result<ManaSymbol> {
        self.table.lookup(spelling)
    }

    pub(crate) fn block_regex(&self, notation: Notation) -> &Regex {
        match notation {
            Notation::Encoded => &self.encoded_block,
            _ => &self.json_block,
        }
    }

    /// Read a cost. Malformed input yields a cost with `valid == false`.
    pub fn parse_cost(&self, src: &str, notation: Notation) -> ManaCost {
        let src = src.trim();
        if src.is_empty() {
            return ManaCost::none();
        }
        match notation {
            Notation::Json => self.parse_json(src),
            Notation::Forum => self.parse_forum(src),
            Notation::Html => self.parse_html(src),
            Notation::Encoded => self.parse_encoded(src),
        }
    }

    /// Interpret the inside of one bracketed or tagged group.
    fn parse_group(&self, inner: &str, separator: char, tokens: &mut Vec<ManaToken>) -> bool {
        if !inner.is_empty() && inner.bytes().all(|b| b.is_ascii_digit()) {
            match inner.parse::<usize>() {
                Ok(n) => {
                    tokens.extend(std::iter::repeat(ManaToken::Generic).take(n));
                    return true;
                }
                Err(_) => return false,
            }
        }

        let mut chars = inner.chars();
        if chars.next() == Some(self.unary_marker) && chars.clone().all(|c| c == self.counter) {
            tokens.extend(std::iter::repeat(ManaToken::Generic).take(chars.count()));
            return true;
        }

        let code: String = inner.chars().filter(|&c| c != separator).collect();
        match self.table.lookup(&code) {
            Ok(symbol) => {
                tokens.push(ManaToken::Symbol(symbol));
                true
            }
            Err(err) => {
                tracing::trace!(%err, group = inner, "unrecognized mana group");
                false
            }
        }
    }

    fn parse_json(&self, src: &str) -> ManaCost {
        let mut tokens = Vec::new();
        let mut valid = true;
        let mut groups = 0;
        let mut rest = src;

        while let Some(open) = rest.find('{') {
            if !rest[..open].trim().is_empty() {
                valid = false;
            }
            let Some(close) = rest[open..].find('}') else {
                valid = false;
                rest = "";
                break;
            };
            let inner = &rest[open + 1..open + close];
            groups += 1;
            valid &= self.parse_group(inner, '/', &mut tokens);
            rest = &rest[open + close + 1..];
        }
        if !rest.trim().is_empty() {
            valid = false;
        }

        let parsed = groups > 0;
        ManaCost::from_tokens(tokens).with_flags(parsed, valid && parsed)
    }

    fn parse_forum(&self, src: &str) -> ManaCost {
        let Some(inner) = src
            .strip_prefix(FORUM_OPEN)
            .and_then(|s| s.strip_suffix(FORUM_CLOSE))
        else {
            return ManaCost::from_tokens(Vec::new()).with_flags(false, false);
        };

        let mut tokens = Vec::new();
        let mut valid = true;
        let digits_end = inner
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(inner.len());
        if digits_end > 0 {
            valid &= self.parse_group(&inner[..digits_end], '/', &mut tokens);
        }

        let mut rest = &inner[digits_end..];
        while let Some(c) = rest.chars().next() {
            if c == '{' {
                match rest.find('}') {
                    Some(close) => {
                        valid &= self.parse_group(&rest[1..close], '/', &mut tokens);
                        rest = &rest[close + 1..];
                    }
                    None => {
                        valid = false;
                        break;
                    }
                }
            } else {
                valid &= self.parse_group(&c.to_string(), '/', &mut tokens);
                rest = &rest[c.len_utf8()..];
            }
        }

        ManaCost::from_tokens(tokens).with_flags(true, valid)
    }

    fn parse_html(&self, src: &str) -> ManaCost {
        let mut tokens = Vec::new();
        let mut valid = true;
        let mut groups = 0;
        let mut rest = src;

        while !rest.is_empty() {
            let Some(body) = rest.strip_prefix(HTML_OPEN) else {
                valid = false;
                break;
            };
            let Some(close) = body.find(HTML_CLOSE) else {
                valid = false;
                break;
            };
            groups += 1;
            valid &= self.parse_group(&body[..close], '-', &mut tokens);
            rest = &body[close + HTML_CLOSE.len()..];
        }

        let parsed = groups > 0;
        ManaCost::from_tokens(tokens).with_flags(parsed, valid && parsed)
    }

    fn parse_encoded(&self, src: &str) -> ManaCost {
        let Some(inner) = src.strip_prefix('{').and_then(|s| s.strip_suffix('}')) else {
            return ManaCost::from_tokens(Vec::new()).with_flags(false, false);
        };
        let (tokens, valid) = self.scan_dense(&inner.to_ascii_uppercase());
        ManaCost::from_tokens(tokens).with_flags(true, valid)
    }

    /// Scan a dense run, preferring the longest unit that still lets the rest
    /// of the run decode.
    fn scan_dense(&self, inner: &str) -> (Vec<ManaToken>, bool) {
        let chars: Vec<char> = inner.chars().collect();
        let n = chars.len();
        let max = self.table.max_encoded_len();
        let unit = |i: usize, len: usize| -> Option<ManaSymbol> {
            if i + len > n {
                return None;
            }
            let s: String = chars[i..i + len].iter().collect();
            self.table.decode_unit(&s)
        };

        // decodable[i]: chars[i..] splits cleanly into units.
        let mut decodable = vec![false; n + 1];
        decodable[n] = true;
        for i in (0..n).rev() {
            decodable[i] = (chars[i] == self.counter && decodable[i + 1])
                || (1..=max).any(|len| decodable.get(i + len) == Some(&true) && unit(i, len).is_some());
        }

        let mut tokens = Vec::new();
        let mut valid = true;
        let mut i = 0;
        while i < n {
            if chars[i] == self.counter {
                tokens.push(ManaToken::Generic);
                i += 1;
                continue;
            }
            let clean = (1..=max)
                .rev()
                .find(|&len| decodable.get(i + len) == Some(&true) && unit(i, len).is_some());
            let chosen = clean.or_else(|| (1..=max).rev().find(|&len| unit(i, len).is_some()));
            match chosen.and_then(|len| unit(i, len).map(|s| (len, s))) {
                Some((len, symbol)) => {
                    tokens.push(ManaToken::Symbol(symbol));
                    i += len;
                }
                None => {
                    valid = false;
                    i += 1;
                }
            }
        }
        (tokens, valid)
    }

    /// Render a cost. A "no cost" renders as an empty string in every notation.
    pub fn format_cost(&self, cost: &ManaCost, notation: Notation) -> String {
        if cost.is_none() {
            return String::new();
        }
        let (generic, symbols) = cost.canonical_order();
        match notation {
            Notation::Encoded => self.dense(cost.tokens()),
            Notation::Json => {
                let mut out = if generic > 0 || symbols.is_empty() {
                    format!("{{{generic}}}")
                } else {
                    String::new()
                };
                out.extend(symbols.iter().map(|s| s.json()));
                out
            }
            Notation::Forum => {
                let mut out = String::from(FORUM_OPEN);
                if generic > 0 || symbols.is_empty() {
                    out.push_str(&generic.to_string());
                }
                out.extend(symbols.iter().map(|s| s.forum()));
                out.push_str(FORUM_CLOSE);
                out
            }
            Notation::Html => {
                let mut out = if generic > 0 || symbols.is_empty() {
                    format!("{HTML_OPEN}{generic}{HTML_CLOSE}")
                } else {
                    String::new()
                };
                out.extend(symbols.iter().map(|s| s.html()));
                out
            }
        }
    }

    /// Dense rendering with tokens in shuffled order.
    pub fn encode_cost_shuffled(&self, cost: &ManaCost, rng: &mut CodecRng) -> String {
        if cost.is_none() {
            return String::new();
        }
        let mut tokens = cost.tokens().to_vec();
        rng.shuffle(&mut tokens);
        self.dense(&tokens)
    }

    fn dense(&self, tokens: &[ManaToken]) -> String {
        let mut out = String::from("{");
        for token in tokens {
            match token {
                ManaToken::Generic => out.push(self.counter),
                ManaToken::Symbol(s) => out.push_str(&s.encoded()),
            }
        }
        out.push('}');
        out
    }

    /// `{T}`/`{Q}` in any case become the tap/untap markers.
    pub fn to_symbols(&self, text: &str) -> String {
        self.tap_symbol
            .replace_all(text, |caps: &regex::Captures| {
                let c = caps[1].chars().next().unwrap_or(self.tap);
                if c.eq_ignore_ascii_case(&self.untap) {
                    self.untap.to_string()
                } else {
                    self.tap.to_string()
                }
            })
            .into_owned()
    }

    /// Tap/untap markers back to symbols in the given notation.
    pub fn from_symbols(&self, text: &str, notation: Notation) -> String {
        let render = |c: char| match notation {
            Notation::Json => format!("{{{c}}}"),
            Notation::Forum => format!("{FORUM_OPEN}{c}{FORUM_CLOSE}"),
            Notation::Html => format!("{HTML_OPEN}{c}{HTML_CLOSE}"),
            Notation::Encoded => c.to_string(),
        };
        let mut out = String::with_capacity(text.len());
        for c in text.chars() {
            if c == self.tap || c == self.untap {
                out.push_str(&render(c));
            } else {
                out.push(c);
            }
        }
        out
    }
}

impl Default for ManaCodec {
    fn default() -> Self {
        Self::new(SymbolTable::default(), &CodecConfig::default())
    }
}
