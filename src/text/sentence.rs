//! Casing for display text.

use crate::core::Markers;

/// Words kept lowercase inside a title unless they open it.
const MINOR_WORDS: &[&str] = &[
    "a", "an", "and", "as", "at", "but", "by", "for", "from", "in", "into", "of", "on", "or",
    "the", "to", "with",
];

/// Capitalize the first letter reached from `start`, stepping over openers.
fn capitalize_from(chars: &mut [char], start: usize, bullet: char) {
    for c in chars.iter_mut().skip(start) {
        if c.is_whitespace() || matches!(*c, '{' | '(' | '"') || *c == bullet {
            continue;
        }
        if c.is_lowercase() {
            *c = c.to_uppercase().next().unwrap_or(*c);
        }
        return;
    }
}

fn sentence_case_line(line: &str, bullet: char) -> String {
    let mut chars: Vec<char> = line.chars().collect();
    let mut starts = vec![0];

    let mut colon_seen = false;
    for i in 1..chars.len() {
        if chars[i] != ' ' {
            continue;
        }
        match chars[i - 1] {
            '.' => starts.push(i + 1),
            ':' if !colon_seen => {
                colon_seen = true;
                starts.push(i + 1);
            }
            _ => {}
        }
    }

    for start in starts {
        capitalize_from(&mut chars, start, bullet);
    }
    chars.into_iter().collect()
}

/// Capitalize each line start, each sentence start, and the effect after
/// the first `: ` of a line. Lines are separated by the newline marker.
pub fn sentence_case(text: &str, markers: &Markers) -> String {
    text.split(markers.newline)
        .map(|line| sentence_case_line(line, markers.bullet))
        .collect::<Vec<_>>()
        .join(&markers.newline.to_string())
}

fn capitalize_word(word: &str) -> String {
    let mut out = String::with_capacity(word.len());
    let mut at_start = true;
    for c in word.chars() {
        if at_start && c.is_alphabetic() {
            out.extend(c.to_uppercase());
            at_start = false;
        } else {
            out.push(c);
            if c == '-' {
                at_start = true;
            }
        }
    }
    out
}

/// Title case for card names: every word capitalized, minor words left
/// lowercase unless they open the name.
pub fn title_case(name: &str) -> String {
    name.split(' ')
        .enumerate()
        .map(|(i, word)| {
            if i > 0 && MINOR_WORDS.contains(&word) {
                word.to_string()
            } else {
                capitalize_word(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
