//! Mana symbol universe and lookup table.

use rustc_hash::FxHashMap;

use crate::core::{CodecError, Result};

/// One of the five base colors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    White,
    Blue,
    Black,
    Red,
    Green,
}

impl Color {
    pub const ALL: [Color; 5] = [
        Color::White,
        Color::Blue,
        Color::Black,
        Color::Red,
        Color::Green,
    ];

    pub const fn letter(self) -> char {
        match self {
            Color::White => 'W',
            Color::Blue => 'U',
            Color::Black => 'B',
            Color::Red => 'R',
            Color::Green => 'G',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'W' => Some(Color::White),
            'U' => Some(Color::Blue),
            'B' => Some(Color::Black),
            'R' => Some(Color::Red),
            'G' => Some(Color::Green),
            _ => None,
        }
    }
}

/// A set of colors represented as bitflags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct ColorSet(u8);

impl ColorSet {
    pub const COLORLESS: Self = Self(0);

    pub const fn from_color(color: Color) -> Self {
        Self(match color {
            Color::White => 1 << 0,
            Color::Blue => 1 << 1,
            Color::Black => 1 << 2,
            Color::Red => 1 << 3,
            Color::Green => 1 << 4,
        })
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, color: Color) -> bool {
        self.0 & Self::from_color(color).0 != 0
    }

    pub const fn contains_all(self, other: ColorSet) -> bool {
        self.0 & other.0 == other.0
    }

    pub const fn union(self, other: ColorSet) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn with(self, color: Color) -> Self {
        self.union(Self::from_color(color))
    }

    pub const fn count(self) -> u32 {
        self.0.count_ones()
    }

    /// Color letters in ascending letter order, e.g. `"BGRUW"`.
    pub fn letters(self) -> String {
        let mut letters: Vec<char> = Color::ALL
            .iter()
            .filter(|c| self.contains(**c))
            .map(|c| c.letter())
            .collect();
        letters.sort_unstable();
        letters.into_iter().collect()
    }

    /// Parse a string of color letters. Returns `None` on any non-color letter.
    pub fn from_letters(s: &str) -> Option<Self> {
        s.chars()
            .try_fold(Self::COLORLESS, |set, c| Color::from_letter(c).map(|color| set.with(color)))
    }
}

/// Static description of a symbol.
#[derive(Debug, PartialEq, Eq, Hash)]
pub struct SymbolDef {
    /// Canonical spelling, e.g. `"W"`, `"2W"`, `"GWP"`.
    pub code: &'static str,
    /// Contribution to converted mana cost.
    pub cmc: u32,
}

macro_rules! symbols {
    ($($code:literal => $cmc:literal),* $(,)?) => {
        &[$(SymbolDef { code: $code, cmc: $cmc }),*]
    };
}

/// Every symbol the codec knows about.
pub static UNIVERSE: &[SymbolDef] = symbols![
    "W" => 1, "U" => 1, "B" => 1, "R" => 1, "G" => 1,
    "P" => 1, "S" => 1, "X" => 0, "C" => 1, "E" => 0,
    "WP" => 1, "UP" => 1, "BP" => 1, "RP" => 1, "GP" => 1,
    "2W" => 2, "2U" => 2, "2B" => 2, "2R" => 2, "2G" => 2,
    "WU" => 1, "WB" => 1, "RW" => 1, "GW" => 1, "UB" => 1,
    "UR" => 1, "GU" => 1, "BR" => 1, "BG" => 1, "RG" => 1,
    "GWP" => 1, "RGP" => 1, "RWP" => 1, "GUP" => 1,
    "CW" => 1, "CU" => 1, "CB" => 1, "CR" => 1, "CG" => 1,
];

/// A symbol from the universe. Cheap to copy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ManaSymbol(&'static SymbolDef);

impl ManaSymbol {
    pub fn code(self) -> &'static str {
        self.0.code
    }

    pub fn cmc(self) -> u32 {
        self.0.cmc
    }

    pub fn colors(self) -> ColorSet {
        self.0
            .code
            .chars()
            .filter_map(Color::from_letter)
            .fold(ColorSet::COLORLESS, ColorSet::with)
    }

    /// Reversed spelling, identical for single characters.
    pub fn alt(self) -> String {
        self.0.code.chars().rev().collect()
    }

    /// Dense form: single characters doubled, longer codes verbatim.
    pub fn encoded(self) -> String {
        if self.0.code.len() == 1 {
            self.0.code.repeat(2)
        } else {
            self.0.code.to_string()
        }
    }

    /// Bracketed form with slash-separated components, e.g. `{G/W/P}`.
    pub fn json(self) -> String {
        format!("{{{}}}", self.components().join("/"))
    }

    /// Forum form: bare letter, or the whole code in braces.
    pub fn forum(self) -> String {
        if self.0.code.len() == 1 {
            self.0.code.to_string()
        } else {
            format!("{{{}}}", self.0.code)
        }
    }

    /// HTML tag with dash-separated components.
    pub fn html(self) -> String {
        format!("<img class='mana-{}'>", self.components().join("-"))
    }

    fn components(self) -> Vec<String> {
        self.0.code.chars().map(String::from).collect()
    }

    /// Look up a symbol in the full universe, accepting alt spellings.
    pub fn lookup(code: &str) -> Result<Self> {
        let upper = code.to_ascii_uppercase();
        let reversed: String = upper.chars().rev().collect();
        UNIVERSE
            .iter()
            .find(|def| def.code == upper || def.code == reversed)
            .map(ManaSymbol)
            .ok_or_else(|| CodecError::UnknownSymbol(code.to_string()))
    }
}

/// Lookup table over a subset of the universe.
///
/// Keys cover canonical, alt and dense spellings so every notation can share
/// one table.
#[derive(Clone, Debug)]
pub struct SymbolTable {
    by_spelling: FxHashMap<String, ManaSymbol>,
    by_encoding: FxHashMap<String, ManaSymbol>,
    symbols: Vec<ManaSymbol>,
    max_encoded_len: usize,
}

impl SymbolTable {
    /// Build a table restricted to the given canonical codes.
    pub fn with_symbols(codes: &[&str]) -> Result<Self> {
        let symbols = codes
            .iter()
            .map(|code| ManaSymbol::lookup(code))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::from_symbols(symbols))
    }

    fn from_symbols(symbols: Vec<ManaSymbol>) -> Self {
        let mut by_spelling = FxHashMap::default();
        let mut by_encoding = FxHashMap::default();
        for &symbol in &symbols {
            by_spelling.insert(symbol.code().to_string(), symbol);
            by_spelling.insert(symbol.alt(), symbol);
            by_encoding.insert(symbol.encoded(), symbol);
            if symbol.code().len() > 1 {
                by_encoding.insert(symbol.alt(), symbol);
            }
        }
        let max_encoded_len = by_encoding.keys().map(String::len).max().unwrap_or(0);

        Self {
            by_spelling,
            by_encoding,
            symbols,
            max_encoded_len,
        }
    }

    /// Canonical or alt spelling, case-insensitive.
    pub fn lookup(&self, spelling: &str) -> Result<ManaSymbol> {
        self.by_spelling
            .get(&spelling.to_ascii_uppercase())
            .copied()
            .ok_or_else(|| CodecError::UnknownSymbol(spelling.to_string()))
    }

    /// Dense spelling as produced by `ManaSymbol::encoded`, or an alt order.
    pub fn decode_unit(&self, unit: &str) -> Option<ManaSymbol> {
        self.by_encoding.get(unit).copied()
    }

    /// Longest dense spelling in the table, the scanner's window.
    pub fn max_encoded_len(&self) -> usize {
        self.max_encoded_len
    }

    /// Symbols in the table, in the order the table was built from.
    pub fn symbols(&self) -> &[ManaSymbol] {
        &self.symbols
    }

    /// Every character any symbol spelling uses.
    pub fn charset(&self) -> Vec<char> {
        let mut chars: Vec<char> = self.symbols.iter().flat_map(|s| s.code().chars()).collect();
        chars.sort_unstable();
        chars.dedup();
        chars
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::from_symbols(UNIVERSE.iter().map(ManaSymbol).collect())
    }
}
