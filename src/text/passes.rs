//! Forward passes: printed rules text to canonical form.

use regex::{Captures, NoExpand};

use super::TextPipeline;
use crate::core::Markers;
use crate::mana::ManaCodec;

/// Keyword that opens a counter declaration line.
pub const COUNTER_DECLARATION: &str = "countertype";
/// Verb sense of "counter" after renaming.
pub const NEGATE: &str = "uncast";
/// Past tense of `NEGATE`.
pub const NEGATED: &str = "uncasted";

/// Replace `needle` wherever it is not glued to surrounding letters or digits.
pub(crate) fn replace_word(haystack: &str, needle: &str, with: &str) -> String {
    if needle.is_empty() {
        return haystack.to_string();
    }
    let starts_word = needle.chars().next().is_some_and(char::is_alphanumeric);
    let ends_word = needle.chars().next_back().is_some_and(char::is_alphanumeric);

    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    let mut from = 0;
    while let Some(found) = haystack[from..].find(needle) {
        let start = from + found;
        let end = start + needle.len();
        let before_ok = !starts_word
            || !haystack[..start].chars().next_back().is_some_and(char::is_alphanumeric);
        let after_ok = !ends_word || !haystack[end..].chars().next().is_some_and(char::is_alphanumeric);

        if before_ok && after_ok {
            out.push_str(&haystack[last..start]);
            out.push_str(with);
            last = end;
            from = end;
        } else {
            from = start + needle.chars().next().map_or(1, char::len_utf8);
        }
    }
    out.push_str(&haystack[last..]);
    out
}

/// Fold typographic characters to the plain alphabet the codec uses.
pub fn fold_unicode(s: &str, markers: &Markers) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'à' | 'á' | 'â' | 'ä' | 'ã' | 'å' => out.push('a'),
            'è' | 'é' | 'ê' | 'ë' => out.push('e'),
            'ì' | 'í' | 'î' | 'ï' => out.push('i'),
            'ò' | 'ó' | 'ô' | 'ö' | 'õ' => out.push('o'),
            'ù' | 'ú' | 'û' | 'ü' => out.push('u'),
            'ñ' => out.push('n'),
            'ç' => out.push('c'),
            'ý' | 'ÿ' => out.push('y'),
            'æ' => out.push_str("ae"),
            'œ' => out.push_str("oe"),
            '‘' | '’' | '`' | '´' => out.push('\''),
            '“' | '”' => out.push('"'),
            '\u{2212}' => out.push('-'),
            '½' => out.push_str("1/2"),
            '∞' => out.push_str("inf"),
            'π' => out.push_str("pi"),
            '®' => out.push('r'),
            '☐' => out.push_str("na"),
            '\r' => {}
            c if c == markers.reserved => {}
            c => out.push(c),
        }
    }
    out
}

impl TextPipeline {
    /// Run every forward pass over printed rules text.
    pub fn forward(&self, text: &str, name: &str, mana: &ManaCodec) -> String {
        self.forward_face(text, name, false, mana)
    }

    /// `forward` for a face that may be legendary. Only legendary names have
    /// their nickname before the comma replaced too.
    pub fn forward_face(&self, text: &str, name: &str, legendary: bool, mana: &ManaCodec) -> String {
        let s = text.to_lowercase();
        let s = self.strip_reminder(&s);
        let s = self.replace_self_references(&s, name, legendary);
        let s = fold_unicode(&s, &self.markers);
        let s = self.unary(&s);
        let s = self.normalize_dashes(&s);
        let s = self.normalize_x(&s);
        let s = self.strip_ability_words(&s);
        let s = self.type_counters(&s);
        let s = self.rename_negate(&s);
        let s = self.collapse_choices(&s);
        let s = self.promote_equip(&s);
        let s = self.flatten_newlines(&s);
        let s = mana.to_symbols(&s);
        let s = if self.line_reordering {
            self.reorder_lines(&s)
        } else {
            s
        };

        let canonical = s.trim().to_string();
        tracing::trace!(%canonical, "rules text canonicalized");
        canonical
    }

    /// Remove parenthesized reminder text, innermost spans first.
    pub fn strip_reminder(&self, s: &str) -> String {
        let mut current = s.to_string();
        while self.regexes.reminder.is_match(&current) {
            current = self.regexes.reminder.replace_all(&current, "").into_owned();
        }
        current
    }

    /// Replace the card's own name, and the ways rules text refers to it,
    /// with the self-reference marker. A legendary name also stands for its
    /// nickname before the comma.
    pub fn replace_self_references(&self, s: &str, name: &str, legendary: bool) -> String {
        let name = name.trim().to_lowercase();
        if name.is_empty() || self.vocab.name_exclusions.contains(&name) {
            return s.to_string();
        }
        let this = self.markers.this.to_string();

        let mut out = replace_word(s, &name, &this);
        if let Some((nickname, _)) = name.split_once(',').filter(|_| legendary) {
            out = replace_word(&out, nickname.trim(), &this);
        }
        if let Some(short) = self.vocab.name_overrides.get(&name) {
            out = replace_word(&out, short, &this);
        }

        out = replace_word(&out, "to him.", &format!("to {this}."));
        out = replace_word(&out, "to him this", &format!("to {this} this"));
        out = replace_word(&out, "to himself", "to itself");
        out = replace_word(&out, "he's", &format!("{this} is"));

        for keeper in &self.vocab.name_keepers {
            out = out.replace(&format!("{keeper}{this}"), &format!("{keeper}{name}"));
        }
        out
    }

    /// Unary numerals everywhere except inside braces, where costs keep decimal.
    pub fn unary(&self, s: &str) -> String {
        let mut out = String::with_capacity(s.len());
        let mut last = 0;
        for block in self.regexes.braces.find_iter(s) {
            out.push_str(&self.numerals.to_unary(&s[last..block.start()]));
            out.push_str(block.as_str());
            last = block.end();
        }
        out.push_str(&self.numerals.to_unary(&s[last..]));
        out
    }

    /// Em and en dashes and free-standing hyphens become the dash marker.
    ///
    /// Minus signs in front of numerals or x, and hyphens inside words, stay.
    pub fn normalize_dashes(&self, s: &str) -> String {
        let markers = &self.markers;
        let unary_marker = self.numerals.config().marker;
        let chars: Vec<char> = s.chars().collect();

        let mut out = String::with_capacity(s.len());
        for (i, &c) in chars.iter().enumerate() {
            match c {
                '—' | '–' => out.push(markers.dash),
                '•' => out.push(markers.bullet),
                '-' => {
                    let prev = i.checked_sub(1).map(|j| chars[j]);
                    let next = chars.get(i + 1).copied();
                    let signed = next.is_some_and(|n| n == unary_marker || n == 'x');
                    let joined = prev.is_some_and(char::is_alphabetic)
                        && next.is_some_and(char::is_alphabetic);
                    out.push(if signed || joined { '-' } else { markers.dash });
                }
                c => out.push(c),
            }
        }

        self.regexes
            .level_range
            .replace_all(&out, |caps: &Captures| {
                format!("level {}{}{}", &caps[1], markers.dash, &caps[2])
            })
            .into_owned()
    }

    /// Every free-standing `x` becomes the X marker.
    pub fn normalize_x(&self, s: &str) -> String {
        let x = self.markers.x.to_string();
        let signed = format!("-{x}");
        let s = self.regexes.dash_x.replace_all(s, NoExpand(&signed));
        self.regexes.x_word.replace_all(&s, NoExpand(&x)).into_owned()
    }

    /// Drop `word ~ ` ability-word headers.
    pub fn strip_ability_words(&self, s: &str) -> String {
        match &self.regexes.ability_words {
            Some(re) => re.replace_all(s, "").into_owned(),
            None => s.to_string(),
        }
    }

    /// Replace every counter type with the counter marker and prepend a
    /// declaration of the types in first-seen order.
    ///
    /// Each marker is followed by one unary counter per place its type sits
    /// after the first in the declaration, so `%` is the first type and `%^`
    /// the second.
    pub fn type_counters(&self, s: &str) -> String {
        let Some(re) = &self.regexes.counter_types else {
            return s.to_string();
        };
        let marker = self.markers.counter;
        let tally = self.numerals.config().counter;

        let mut kinds: Vec<String> = Vec::new();
        let body = re.replace_all(s, |caps: &Captures| {
            let kind = &caps[2];
            let position = kinds.iter().position(|k| k == kind).unwrap_or_else(|| {
                kinds.push(kind.to_string());
                kinds.len() - 1
            });
            let tallies: String = std::iter::repeat(tally).take(position).collect();
            format!("{}{marker}{tallies} counter", &caps[1])
        });
        if kinds.is_empty() {
            return s.to_string();
        }
        format!("{COUNTER_DECLARATION} {marker} {}\n{body}", kinds.join(" "))
    }

    /// Rename the verb sense of "counter" so it never reads as the noun.
    pub fn rename_negate(&self, s: &str) -> String {
        let s = self.regexes.countered.replace_all(s, NEGATED);

        let mut out = String::with_capacity(s.len());
        let mut last = 0;
        for m in self.regexes.counter_word.find_iter(&s) {
            let prev = s[..m.start()].split_whitespace().next_back().unwrap_or("");
            let next = s[m.end()..]
                .split_whitespace()
                .next()
                .unwrap_or("")
                .trim_end_matches(['.', ',', ';', ':']);
            if self.is_negate(prev, next) {
                out.push_str(&s[last..m.start()]);
                out.push_str(NEGATE);
                last = m.end();
            }
        }
        out.push_str(&s[last..]);
        out
    }

    fn is_negate(&self, prev: &str, next: &str) -> bool {
        let unary = self.numerals.config();
        let noun = self.vocab.counter_determiners.iter().any(|w| w == prev)
            || self.vocab.counter_types.iter().any(|w| w == prev)
            || prev.ends_with([unary.marker, unary.counter, self.markers.counter]);
        !noun && self.vocab.negate_objects.iter().any(|w| w == next)
    }

    /// Collapse a `choose N ~` header and its bullet lines into one line.
    pub fn collapse_choices(&self, s: &str) -> String {
        let bullet = self.markers.bullet;
        let lines: Vec<&str> = s.split('\n').collect();
        let mut out: Vec<String> = Vec::with_capacity(lines.len());

        let mut i = 0;
        while i < lines.len() {
            if let Some(caps) = self.regexes.choice_header.captures(lines[i].trim_end()) {
                let mut options = Vec::new();
                for line in &lines[i + 1..] {
                    match line.trim_start().strip_prefix(bullet) {
                        Some(option) => options.push(option.trim()),
                        None => break,
                    }
                }
                if !options.is_empty() {
                    let mut collapsed = format!(
                        "{}{}{}",
                        &caps[1],
                        self.markers.choice_open,
                        self.choice_count(&caps[2])
                    );
                    for option in &options {
                        collapsed.push(' ');
                        collapsed.push(bullet);
                        collapsed.push(' ');
                        collapsed.push_str(option);
                    }
                    collapsed.push(self.markers.choice_close);
                    out.push(collapsed);
                    i += 1 + options.len();
                    continue;
                }
            }
            out.push(lines[i].to_string());
            i += 1;
        }
        out.join("\n")
    }

    fn choice_count(&self, words: &str) -> String {
        match words {
            "one or both" => self.numerals.encode_value(0),
            "one or more" => format!("{}+", self.numerals.encode_value(1)),
            "two" => self.numerals.encode_value(2),
            "three" => self.numerals.encode_value(3),
            "four" => self.numerals.encode_value(4),
            _ => self.numerals.encode_value(1),
        }
    }

    /// Move equip and enchant lines to the top, keeping their order.
    pub fn promote_equip(&self, s: &str) -> String {
        let (pre, rest): (Vec<&str>, Vec<&str>) =
            s.split('\n').partition(|line| super::lines::is_pre_line(line.trim()));
        pre.into_iter().chain(rest).collect::<Vec<_>>().join("\n")
    }

    /// Trim every line, drop empty ones, join with the newline marker.
    pub fn flatten_newlines(&self, s: &str) -> String {
        s.split('\n')
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>()
            .join(&self.markers.newline.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline() -> TextPipeline {
        TextPipeline::default()
    }

    #[test]
    fn test_strip_reminder() {
        let p = pipeline();
        assert_eq!(
            p.strip_reminder("Destroy target creature. (It can't be regenerated.)"),
            "Destroy target creature. "
        );
        assert_eq!(
            p.strip_reminder("Flying (This creature has flying.) Trample (This creature can deal excess damage.)"),
            "Flying  Trample "
        );
        assert_eq!(p.strip_reminder("no parens"), "no parens");
        assert_eq!(p.strip_reminder("a (b (c) d) e"), "a  e");
    }

    #[test]
    fn test_self_reference_basic() {
        let p = pipeline();
        assert_eq!(
            p.replace_self_references("dark confidant is a 2/1 creature.", "dark confidant", false),
            "@ is a 2/1 creature."
        );
        assert_eq!(
            p.replace_self_references("sacrifice a creature.", "sacrifice", false),
            "@ a creature."
        );
        let fear = "fear cannot be blocked except by artifact creatures and black creatures.";
        assert_eq!(p.replace_self_references(fear, "fear", false), fear);
    }

    #[test]
    fn test_self_reference_nickname_and_overrides() {
        let p = pipeline();
        let skithiryx = "skithiryx, the blight dragon";
        assert_eq!(
            p.replace_self_references("flying, infect, haste. regenerate skithiryx.", skithiryx, true),
            "flying, infect, haste. regenerate @."
        );
        assert_eq!(
            p.replace_self_references("regenerate skithiryx.", skithiryx, false),
            "regenerate skithiryx."
        );
        for (full, short) in [
            ("crovax the cursed", "crovax"),
            ("1996 world champion", "world champion"),
            ("hivis of the scale", "hivis"),
        ] {
            assert_eq!(
                p.replace_self_references(&format!("{short} enters the battlefield."), full, false),
                "@ enters the battlefield."
            );
        }
    }

    #[test]
    fn test_self_reference_pronouns() {
        let p = pipeline();
        let name = "jace beleren";
        assert_eq!(
            p.replace_self_references("prevent all damage that would be dealt to him.", name, false),
            "prevent all damage that would be dealt to @."
        );
        assert_eq!(
            p.replace_self_references("prevent all damage that would be dealt to him this turn.", name, false),
            "prevent all damage that would be dealt to @ this turn."
        );
        assert_eq!(
            p.replace_self_references("jace beleren deals 2 damage to himself.", name, false),
            "@ deals 2 damage to itself."
        );
        assert_eq!(
            p.replace_self_references("as long as he's on the battlefield", name, false),
            "as long as @ is on the battlefield"
        );
    }

    #[test]
    fn test_self_reference_keeps_named() {
        let p = pipeline();
        for (name, text) in [
            ("grizzly bears", "creatures named grizzly bears get +1/+1."),
            ("grizzly bears", "its name is still grizzly bears."),
            ("progenitus", "named keeper of progenitus"),
            ("kher keep", "named kobolds of kher keep"),
            ("helm of kaldra", "equipment named sword of kaldra, helm of kaldra, or shield of kaldra"),
        ] {
            assert_eq!(p.replace_self_references(text, name, false), text);
        }
    }

    #[test]
    fn test_self_reference_word_boundary() {
        let p = pipeline();
        assert_eq!(
            p.replace_self_references("pain is temporary. painful.", "pain", false),
            "@ is temporary. painful."
        );
    }

    #[test]
    fn test_fold_unicode() {
        let markers = Markers::default();
        assert_eq!(fold_unicode("lim-dûl’s vault", &markers), "lim-dul's vault");
        assert_eq!(fold_unicode("æther \u{2212}1 ½", &markers), "aether -1 1/2");
        assert_eq!(fold_unicode("a\u{b}b\r", &markers), "ab");
    }

    #[test]
    fn test_unary_skips_braces() {
        let p = pipeline();
        assert_eq!(p.unary("{2}{w}: deal 3 damage"), "{2}{w}: deal &^^^ damage");
    }

    #[test]
    fn test_normalize_dashes() {
        let p = pipeline();
        assert_eq!(p.normalize_dashes("landfall — whenever"), "landfall ~ whenever");
        assert_eq!(p.normalize_dashes("gets -&^/-&^"), "gets -&^/-&^");
        assert_eq!(p.normalize_dashes("non-human"), "non-human");
        assert_eq!(p.normalize_dashes("gets +x/-x"), "gets +x/-x");
        assert_eq!(p.normalize_dashes("level &^-&^^^"), "level &^~&^^^");
        assert_eq!(p.normalize_dashes("• option"), "= option");
        assert_eq!(p.normalize_dashes("a - b"), "a ~ b");
    }

    #[test]
    fn test_normalize_x() {
        let p = pipeline();
        assert_eq!(p.normalize_x("~x costs more."), "-X costs more.");
        assert_eq!(p.normalize_x("+x"), "+X");
        assert_eq!(p.normalize_x(" x "), " X ");
        assert_eq!(p.normalize_x("x:"), "X:");
        assert_eq!(p.normalize_x("x\u{2014}"), "X\u{2014}");
        assert_eq!(p.normalize_x("six target"), "six target");
        assert_eq!(p.normalize_x("avarax"), "avarax");
    }

    #[test]
    fn test_strip_ability_words() {
        let p = pipeline();
        assert_eq!(
            p.strip_ability_words("landfall \u{2014} whenever a land enters the battlefield..."),
            "whenever a land enters the battlefield..."
        );
        assert_eq!(p.strip_ability_words("islandfall \u{2014} effect"), "islandfall \u{2014} effect");
        assert_eq!(
            p.strip_ability_words("landfall ~ effect. metalcraft ~ effect."),
            "effect. effect."
        );
    }

    #[test]
    fn test_type_counters() {
        let p = pipeline();
        assert_eq!(
            p.type_counters("remove a time counter from it."),
            "countertype % time\nremove a % counter from it."
        );
        assert_eq!(
            p.type_counters("put a charge counter on it. remove a charge counter."),
            "countertype % charge\nput a % counter on it. remove a % counter."
        );
        assert_eq!(
            p.type_counters("put a +&^/+&^ counter on target creature."),
            "countertype % +&^/+&^\nput a % counter on target creature."
        );
        assert_eq!(p.type_counters("counter target spell."), "counter target spell.");
    }

    #[test]
    fn test_type_counters_two_kinds() {
        let p = pipeline();
        assert_eq!(
            p.type_counters("put a time counter and a charge counter on it."),
            "countertype % time charge\nput a % counter and a %^ counter on it."
        );
        assert_eq!(
            p.type_counters("remove a time counter. put a charge counter. remove a time counter."),
            "countertype % time charge\nremove a % counter. put a %^ counter. remove a % counter."
        );
        let canon = p.rename_negate(&p.type_counters("then remove a charge counter that was put on it."));
        assert_eq!(canon, "countertype % charge\nthen remove a % counter that was put on it.");
    }

    #[test]
    fn test_rename_negate() {
        let p = pipeline();
        assert_eq!(p.rename_negate("counter target spell."), "uncast target spell.");
        assert_eq!(p.rename_negate("counter all spells."), "uncast all spells.");
        assert_eq!(p.rename_negate("can't be countered."), "can't be uncasted.");
        assert_eq!(p.rename_negate("put a % counter on it."), "put a % counter on it.");
        assert_eq!(
            p.rename_negate("remove a counter that was put on it."),
            "remove a counter that was put on it."
        );
    }

    #[test]
    fn test_collapse_choices() {
        let p = pipeline();
        assert_eq!(
            p.collapse_choices("choose one ~\n= option &^\n= option &^^"),
            "[&^ = option &^ = option &^^]"
        );
        assert_eq!(
            p.collapse_choices("when @ enters, choose one or both ~\n= a\n= b\nflying"),
            "when @ enters, [& = a = b]\nflying"
        );
        assert_eq!(
            p.collapse_choices("choose one ~ destroy target artifact."),
            "choose one ~ destroy target artifact."
        );
    }

    #[test]
    fn test_promote_equip() {
        let p = pipeline();
        assert_eq!(p.promote_equip("Do stuff.\nequip {3}"), "equip {3}\nDo stuff.");
        assert_eq!(
            p.promote_equip("equipped creature gets +&^/+&^.\nequip {&^}"),
            "equip {&^}\nequipped creature gets +&^/+&^."
        );
    }

    #[test]
    fn test_flatten_newlines() {
        let p = pipeline();
        assert_eq!(p.flatten_newlines("flying \n\n draw a card.\n"), "flying\\draw a card.");
    }

    #[test]
    fn test_forward_full() {
        let p = pipeline();
        let mana = ManaCodec::default();
        let text = "Flying\n{T}: Put a time counter on Clockwork Owl. (Reminder.)\nCounter target spell.";
        assert_eq!(
            p.forward(text, "Clockwork Owl", &mana),
            "flying\\uncast target spell.\\T: put a % counter on @.\\countertype % time"
        );
    }
}
