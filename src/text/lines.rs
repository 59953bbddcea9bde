//! Line categories and canonical line order.
//!
//! Lines are ordered pre → key → main → cost → post. Leveler text is never
//! reordered because its lines are positional.

use super::passes::COUNTER_DECLARATION;
use super::TextPipeline;
use crate::core::{CodecRng, Markers};

/// Ordering class of one rules-text line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LineCategory {
    /// Equip costs and enchant targets.
    Pre,
    /// Bare keyword lines with no sentence.
    Key,
    /// Full sentences.
    Main,
    /// Activated abilities led by a cost, and keyword costs.
    Cost,
    /// Counter declarations.
    Post,
}

pub(crate) fn is_pre_line(line: &str) -> bool {
    ["equip", "enchant"].iter().any(|keyword| {
        line.strip_prefix(keyword).is_some_and(|rest| {
            rest.is_empty() || rest.starts_with([' ', '{', '~'])
        })
    })
}

/// Classify one line of flattened rules text.
pub fn classify(line: &str, markers: &Markers) -> LineCategory {
    let line = line.trim();
    if is_pre_line(line) {
        return LineCategory::Pre;
    }
    if line.starts_with(COUNTER_DECLARATION) {
        return LineCategory::Post;
    }

    let has_period = line.contains('.');
    let led_by_cost = line.starts_with(['{', markers.tap, markers.untap]);
    if (led_by_cost && line.contains(':')) || (!has_period && line.contains('{')) {
        LineCategory::Cost
    } else if !has_period {
        LineCategory::Key
    } else {
        LineCategory::Main
    }
}

/// Lines of one text grouped by category, each group in original order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineGroups<'a> {
    pub pre: Vec<&'a str>,
    pub key: Vec<&'a str>,
    pub main: Vec<&'a str>,
    pub cost: Vec<&'a str>,
    pub post: Vec<&'a str>,
}

impl<'a> LineGroups<'a> {
    fn group_mut(&mut self, category: LineCategory) -> &mut Vec<&'a str> {
        match category {
            LineCategory::Pre => &mut self.pre,
            LineCategory::Key => &mut self.key,
            LineCategory::Main => &mut self.main,
            LineCategory::Cost => &mut self.cost,
            LineCategory::Post => &mut self.post,
        }
    }

    fn groups_mut(&mut self) -> [&mut Vec<&'a str>; 5] {
        [
            &mut self.pre,
            &mut self.key,
            &mut self.main,
            &mut self.cost,
            &mut self.post,
        ]
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn len(&self) -> usize {
        self.pre.len() + self.key.len() + self.main.len() + self.cost.len() + self.post.len()
    }

    fn join(&self, newline: char) -> String {
        [&self.pre, &self.key, &self.main, &self.cost, &self.post]
            .into_iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(&newline.to_string())
    }
}

impl TextPipeline {
    fn is_leveler(text: &str) -> bool {
        text.contains("level up")
    }

    /// Group the lines of flattened text. Leveler text yields no groups.
    pub fn separate_lines<'a>(&self, text: &'a str) -> LineGroups<'a> {
        let mut groups = LineGroups::default();
        if Self::is_leveler(text) {
            return groups;
        }
        for line in text.split(self.markers.newline).filter(|l| !l.trim().is_empty()) {
            groups.group_mut(classify(line, &self.markers)).push(line);
        }
        groups
    }

    /// Reorder lines into canonical category order.
    pub fn reorder_lines(&self, text: &str) -> String {
        let groups = self.separate_lines(text);
        if groups.is_empty() {
            return text.to_string();
        }
        groups.join(self.markers.newline)
    }

    /// Shuffle lines within each category, never across categories.
    pub fn shuffle_lines(&self, text: &str, rng: &mut CodecRng) -> String {
        let mut groups = self.separate_lines(text);
        if groups.is_empty() {
            return text.to_string();
        }
        for group in groups.groups_mut() {
            rng.shuffle(group);
        }
        groups.join(self.markers.newline)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_separate_lines_categorization() {
        let p = TextPipeline::default();
        let text = [
            "equip {1}",
            "enchant creature",
            "flying",
            "trample",
            "deal 2 damage.",
            "destroy target.",
            "kicker {R}",
            "cycling {2}",
            "countertype % time",
        ]
        .join("\\");

        let groups = p.separate_lines(&text);
        assert_eq!(groups.pre, vec!["equip {1}", "enchant creature"]);
        assert_eq!(groups.key, vec!["flying", "trample"]);
        assert_eq!(groups.main, vec!["deal 2 damage.", "destroy target."]);
        assert_eq!(groups.cost, vec!["kicker {R}", "cycling {2}"]);
        assert_eq!(groups.post, vec!["countertype % time"]);
    }

    #[test]
    fn test_classify_special_lines() {
        let markers = Markers::default();
        assert_eq!(
            classify("choose one ~ destroy target artifact.", &markers),
            LineCategory::Main
        );
        assert_eq!(classify("{4}{G}{G}: monstrosity 2.", &markers), LineCategory::Cost);
        assert_eq!(classify("T: add {G}.", &markers), LineCategory::Cost);
        assert_eq!(
            classify("enchanted creature gets +1/+1.", &markers),
            LineCategory::Main
        );
        assert_eq!(classify("equipped creature has flying.", &markers), LineCategory::Main);
    }

    #[test]
    fn test_exclusions() {
        let p = TextPipeline::default();
        assert!(p.separate_lines("").is_empty());
        assert!(p.separate_lines("level up {1}\\level 1-4").is_empty());
        assert_eq!(p.reorder_lines("level up {1}\\flying"), "level up {1}\\flying");
    }

    #[test]
    fn test_reorder() {
        let p = TextPipeline::default();
        let text = "destroy target creature.\\flying\\equip {1}\\countertype % time";
        assert_eq!(
            p.reorder_lines(text),
            "equip {1}\\flying\\destroy target creature.\\countertype % time"
        );
    }

    #[test]
    fn test_shuffle_stays_within_categories() {
        let p = TextPipeline::default();
        let text = "enchant creature\\flying\\trample\\vigilance\\deal damage.\\kicker {1}";
        let mut rng = CodecRng::new(11);

        let mut variants = std::collections::HashSet::new();
        for _ in 0..20 {
            let shuffled = p.shuffle_lines(text, &mut rng);
            let lines: Vec<&str> = shuffled.split('\\').collect();
            assert_eq!(lines.len(), 6);
            assert_eq!(lines[0], "enchant creature");
            assert_eq!(&lines[4..], &["deal damage.", "kicker {1}"]);
            let mut keys = lines[1..4].to_vec();
            keys.sort_unstable();
            assert_eq!(keys, vec!["flying", "trample", "vigilance"]);
            variants.insert(shuffled);
        }
        assert!(variants.len() > 1);
    }

    #[test]
    fn test_shuffle_skips_leveler() {
        let p = TextPipeline::default();
        let mut rng = CodecRng::new(1);
        assert_eq!(p.shuffle_lines("level up {1}", &mut rng), "level up {1}");
    }
}
