//! Rules text with embedded costs.

use super::cost::ManaCost;
use super::notation::{ManaCodec, Notation};
use crate::core::CodecRng;

/// Text plus the costs lifted out of it.
///
/// Each cost left a placeholder behind; `slots` records the byte offset of
/// every such placeholder, so a placeholder character that was already
/// present in the prose is never mistaken for a cost.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct ManaText {
    text: String,
    costs: Vec<ManaCost>,
    slots: Vec<usize>,
    valid: bool,
}

impl ManaText {
    /// Text with no embedded costs.
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            costs: Vec::new(),
            slots: Vec::new(),
            valid: true,
        }
    }

    /// Text with placeholders, excluding the costs.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn costs(&self) -> &[ManaCost] {
        &self.costs
    }

    pub fn slots(&self) -> &[usize] {
        &self.slots
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Copy of the text with every cost slot replaced by `mark`.
    pub fn mark_slots(&self, mark: char) -> String {
        self.fill(|_| mark.to_string())
    }

    fn fill(&self, mut render: impl FnMut(&ManaCost) -> String) -> String {
        let mut out = String::with_capacity(self.text.len());
        let mut last = 0;
        for (slot, cost) in self.slots.iter().zip(&self.costs) {
            out.push_str(&self.text[last..*slot]);
            out.push_str(&render(cost));
            // Placeholder characters are single-byte markers in practice, but
            // step over whatever character sits in the slot.
            let width = self.text[*slot..].chars().next().map_or(0, char::len_utf8);
            last = slot + width;
        }
        out.push_str(&self.text[last..]);
        out
    }
}

impl ManaCodec {
    /// Lift every bracketed cost out of `src`.
    ///
    /// Tap and untap symbols are turned into their markers first, since their
    /// letters overlap the mana alphabet. Any brace left over afterwards marks
    /// the text invalid. `Notation::Encoded` scans dense blocks; every other
    /// notation scans bracketed blocks.
    pub fn parse_text(&self, src: &str, notation: Notation) -> ManaText {
        let src = self.to_symbols(src);
        let block_notation = match notation {
            Notation::Encoded => Notation::Encoded,
            _ => Notation::Json,
        };

        let mut text = String::with_capacity(src.len());
        let mut costs = Vec::new();
        let mut slots = Vec::new();
        let mut last = 0;

        for block in self.block_regex(block_notation).find_iter(&src) {
            text.push_str(&src[last..block.start()]);
            slots.push(text.len());
            text.push(self.placeholder);
            let raw = block.as_str();
            let cost = match block_notation {
                Notation::Encoded => self.parse_cost(&raw.to_ascii_uppercase(), Notation::Encoded),
                _ => self.parse_cost(raw, Notation::Json),
            };
            costs.push(cost);
            last = block.end();
        }
        text.push_str(&src[last..]);

        let valid = costs.iter().all(ManaCost::is_valid) && !text.contains(['{', '}']);
        ManaText {
            text,
            costs,
            slots,
            valid,
        }
    }

    /// Substitute each cost back into its slot.
    pub fn render_text(&self, text: &ManaText, notation: Notation) -> String {
        text.fill(|cost| self.format_cost(cost, notation))
    }

    /// Dense rendering with each cost's tokens shuffled.
    pub fn encode_text_shuffled(&self, text: &ManaText, rng: &mut CodecRng) -> String {
        text.fill(|cost| self.encode_cost_shuffled(cost, rng))
    }

    /// Replace the Nth occurrence of `mark` with the Nth cost.
    ///
    /// Marks beyond the number of costs are left alone.
    pub fn fill_marks(&self, marked: &str, mark: char, costs: &[ManaCost], notation: Notation) -> String {
        let mut costs = costs.iter();
        let mut out = String::with_capacity(marked.len());
        for c in marked.chars() {
            match (c == mark).then(|| costs.next()).flatten() {
                Some(cost) => out.push_str(&self.format_cost(cost, notation)),
                None => out.push(c),
            }
        }
        out
    }
}
