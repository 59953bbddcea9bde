//! Mana-Cost value type.

use super::symbol::{ColorSet, ManaSymbol};

/// One element of a cost: a single generic unit or a symbol.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ManaToken {
    Generic,
    Symbol(ManaSymbol),
}

/// Ordered multiset of mana tokens.
///
/// `cmc` and `colors` only depend on the multiset, never on the order or on
/// the notation the cost was read from.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ManaCost {
    tokens: Vec<ManaToken>,
    none: bool,
    parsed: bool,
    valid: bool,
}

impl ManaCost {
    /// The absence of any cost, distinct from a zero cost.
    #[must_use]
    pub fn none() -> Self {
        Self {
            tokens: Vec::new(),
            none: true,
            parsed: true,
            valid: true,
        }
    }

    #[must_use]
    pub fn from_tokens(tokens: Vec<ManaToken>) -> Self {
        Self {
            tokens,
            none: false,
            parsed: true,
            valid: true,
        }
    }

    pub(crate) fn with_flags(mut self, parsed: bool, valid: bool) -> Self {
        self.parsed = parsed;
        self.valid = valid;
        self
    }

    pub fn tokens(&self) -> &[ManaToken] {
        &self.tokens
    }

    pub fn is_none(&self) -> bool {
        self.none
    }

    pub fn is_parsed(&self) -> bool {
        self.parsed
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Number of generic units.
    pub fn generic(&self) -> u32 {
        self.tokens
            .iter()
            .filter(|t| matches!(t, ManaToken::Generic))
            .count() as u32
    }

    /// Non-generic symbols in order.
    pub fn symbols(&self) -> impl Iterator<Item = ManaSymbol> + '_ {
        self.tokens.iter().filter_map(|t| match t {
            ManaToken::Symbol(s) => Some(*s),
            ManaToken::Generic => None,
        })
    }

    pub fn x_count(&self) -> usize {
        self.symbols().filter(|s| s.code() == "X").count()
    }

    /// Converted mana cost.
    pub fn cmc(&self) -> u32 {
        self.tokens
            .iter()
            .map(|t| match t {
                ManaToken::Generic => 1,
                ManaToken::Symbol(s) => s.cmc(),
            })
            .sum()
    }

    pub fn color_set(&self) -> ColorSet {
        self.symbols()
            .fold(ColorSet::COLORLESS, |set, s| set.union(s.colors()))
    }

    /// Contributing colors in ascending letter order, e.g. `"GR"`.
    pub fn colors(&self) -> String {
        self.color_set().letters()
    }

    /// True when every letter of `colors` is among this cost's colors.
    pub fn check_colors(&self, colors: &str) -> bool {
        ColorSet::from_letters(colors)
            .is_some_and(|wanted| self.color_set().contains_all(wanted))
    }

    /// Tokens reordered for output: generic units first, symbols after.
    pub(crate) fn canonical_order(&self) -> (u32, Vec<ManaSymbol>) {
        (self.generic(), self.symbols().collect())
    }
}
