//! Inverse passes: canonical rules text back to display text.

use regex::{Captures, NoExpand};

use super::passes::COUNTER_DECLARATION;
use super::sentence::{sentence_case, title_case};
use super::TextPipeline;
use crate::core::CodecRng;
use crate::mana::{ManaCodec, ManaText, Notation};

impl TextPipeline {
    /// Render canonical text for display.
    ///
    /// Costs are swapped for the reserved marker while the string passes run
    /// and substituted back last, in `notation`.
    pub fn display(&self, text: &ManaText, name: &str, mana: &ManaCodec, notation: Notation) -> String {
        let reserved = self.markers.reserved;

        let s = text.mark_slots(reserved);
        let s = self.expand_choices(&s);
        let s = self.restore_counters(&s);
        let s = self.rename_negate_back(&s);
        let s = self.numerals.from_unary(&s);
        let s = mana.from_symbols(&s, notation);
        let s = sentence_case(&s, &self.markers);
        let s = s.replace(self.markers.this, &title_case(&self.display_name(name)));
        let s = s.replace(self.markers.newline, "\n");
        let s = self
            .regexes
            .level_display
            .replace_all(&s, "$1 $2-$3")
            .into_owned();
        let s = s.replace(self.markers.dash, "—");
        let s = self.restore_bullets(&s);

        mana.fill_marks(&s, reserved, text.costs(), notation)
    }

    /// Stored name with the dash marker turned back into a hyphen.
    pub fn display_name(&self, name: &str) -> String {
        name.replace(self.markers.dash, "-")
    }

    /// Expand `[N = a = b]` into a `choose` header and one bullet line per option.
    pub fn expand_choices(&self, s: &str) -> String {
        let newline = self.markers.newline;
        let bullet = self.markers.bullet;
        let dash = self.markers.dash;

        self.regexes
            .choice_block
            .replace_all(s, |caps: &Captures| {
                let mut out = format!("choose {} {dash}", self.choice_words(&caps[1]));
                for option in Self::choice_options(&caps[2], bullet) {
                    out.push(newline);
                    out.push(bullet);
                    out.push(' ');
                    out.push_str(option);
                }
                out
            })
            .into_owned()
    }

    fn choice_words(&self, count: &str) -> String {
        if count.ends_with('+') {
            return "one or more".to_string();
        }
        match self.numerals.parse_run(count) {
            Some(0) => "one or both".to_string(),
            Some(1) => "one".to_string(),
            Some(2) => "two".to_string(),
            Some(3) => "three".to_string(),
            Some(4) => "four".to_string(),
            _ => count.to_string(),
        }
    }

    // Spaces only: a cost mark at either end of an option is text.
    fn choice_options(options: &str, bullet: char) -> impl Iterator<Item = &str> {
        options
            .split(bullet)
            .map(|o| o.trim_matches(' '))
            .filter(|o| !o.is_empty())
    }

    /// Shuffle the options of every choice block.
    pub fn shuffle_choices(&self, s: &str, rng: &mut CodecRng) -> String {
        let bullet = self.markers.bullet;
        self.regexes
            .choice_block
            .replace_all(s, |caps: &Captures| {
                let mut options: Vec<&str> = Self::choice_options(&caps[2], bullet).collect();
                rng.shuffle(&mut options);

                let mut out = format!("{}{}", self.markers.choice_open, &caps[1]);
                for option in options {
                    out.push(' ');
                    out.push(bullet);
                    out.push(' ');
                    out.push_str(option);
                }
                out.push(self.markers.choice_close);
                out
            })
            .into_owned()
    }

    /// Drop the counter declaration line and put each counter marker's
    /// declared type back in its place.
    ///
    /// A marker followed by `k` unary counters names the `k`-th declared
    /// type. Markers past the end of the declaration are left as they are.
    pub fn restore_counters(&self, s: &str) -> String {
        let newline = self.markers.newline;
        let marker = self.markers.counter;

        let lines: Vec<&str> = s.split(newline).collect();
        let declared = lines.iter().enumerate().find_map(|(i, line)| {
            line.trim()
                .strip_prefix(COUNTER_DECLARATION)?
                .trim_start()
                .strip_prefix(marker)
                .map(|types| (i, types.split_whitespace().collect::<Vec<_>>()))
        });
        let Some((index, kinds)) = declared else {
            return s.to_string();
        };

        let body = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != index)
            .map(|(_, line)| *line)
            .collect::<Vec<_>>()
            .join(&newline.to_string());
        self.regexes
            .counter_mark
            .replace_all(&body, |caps: &Captures| {
                let position = caps[1].chars().count();
                kinds.get(position).map_or_else(|| caps[0].to_string(), |kind| (*kind).to_string())
            })
            .into_owned()
    }

    /// `uncast`/`uncasted` back to `counter`/`countered`.
    pub fn rename_negate_back(&self, s: &str) -> String {
        let s = self.regexes.uncasted.replace_all(s, NoExpand("countered"));
        self.regexes.uncast.replace_all(&s, NoExpand("counter")).into_owned()
    }

    fn restore_bullets(&self, s: &str) -> String {
        let prefix = format!("{} ", self.markers.bullet);
        s.split('\n')
            .map(|line| match line.strip_prefix(&prefix) {
                Some(rest) => format!("• {rest}"),
                None => line.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}
