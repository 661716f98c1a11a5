//! Whole-utterance structural matching.
//!
//! The utterance is normalized to lower-case words, then every node reports
//! the set of word positions where a match starting at a given position can
//! end. An utterance matches when the full word count is among the end
//! positions of the root. Carrying sets instead of a single position keeps
//! the search exhaustive: `[big] big dog` matches "big dog".

use std::collections::BTreeSet;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use smol_str::SmolStr;

use super::expansion::{Expansion, NULL};
use super::rules::HiddenRule;
use crate::base::normalize_words;

/// Resolves `<name>` references while matching
pub trait RuleLookup {
    fn expansion_of(&self, name: &str) -> Option<&Expansion>;
}

/// Lookup that knows no rules
pub struct NoRules;

impl RuleLookup for NoRules {
    fn expansion_of(&self, _name: &str) -> Option<&Expansion> {
        None
    }
}

impl RuleLookup for [Arc<HiddenRule>] {
    fn expansion_of(&self, name: &str) -> Option<&Expansion> {
        self.iter()
            .find(|rule| rule.name() == name)
            .map(|rule| rule.expansion())
    }
}

/// Test whether `utterance` is exactly one path through `expansion`
pub fn matches<L: RuleLookup + ?Sized>(expansion: &Expansion, utterance: &str, rules: &L) -> bool {
    let words = normalize_words(utterance);
    let mut matcher = Matcher {
        words: &words,
        rules,
        active: FxHashSet::default(),
    };
    matcher.ends(expansion, 0).contains(&words.len())
}

struct Matcher<'a, L: ?Sized> {
    words: &'a [SmolStr],
    rules: &'a L,
    /// Rule references being expanded, with their start position
    active: FxHashSet<(&'a str, usize)>,
}

impl<'a, L: RuleLookup + ?Sized> Matcher<'a, L> {
    fn ends(&mut self, expansion: &'a Expansion, start: usize) -> BTreeSet<usize> {
        match expansion {
            Expansion::Literal(literal) => {
                let mut ends = BTreeSet::new();
                if self.literal_at(literal, start) {
                    ends.insert(start + literal.len());
                }
                ends
            }
            Expansion::Sequence(children) => {
                let mut positions = BTreeSet::from([start]);
                for child in children {
                    let mut next = BTreeSet::new();
                    for &position in &positions {
                        next.extend(self.ends(child, position));
                    }
                    if next.is_empty() {
                        return next;
                    }
                    positions = next;
                }
                positions
            }
            Expansion::Optional(inner) => {
                let mut ends = self.ends(inner, start);
                ends.insert(start);
                ends
            }
            Expansion::AlternativeSet(alternatives) => {
                let mut ends = BTreeSet::new();
                for alternative in alternatives {
                    ends.extend(self.ends(alternative, start));
                }
                ends
            }
            Expansion::RuleRef(name) => self.rule_ref_ends(name, start),
        }
    }

    fn literal_at(&self, literal: &[SmolStr], start: usize) -> bool {
        let Some(spoken) = self.words.get(start..start + literal.len()) else {
            return false;
        };
        literal
            .iter()
            .zip(spoken)
            .all(|(expected, heard)| expected.to_lowercase() == heard.as_str())
    }

    fn rule_ref_ends(&mut self, name: &'a str, start: usize) -> BTreeSet<usize> {
        if name == NULL {
            return BTreeSet::from([start]);
        }
        let Some(expansion) = self.rules.expansion_of(name) else {
            tracing::warn!("[MATCH] unresolved rule reference <{}>", name);
            return BTreeSet::new();
        };
        // Re-entering the same rule at the same position cannot consume
        // anything new.
        if !self.active.insert((name, start)) {
            tracing::trace!("[MATCH] left recursion on <{}> at word {}", name, start);
            return BTreeSet::new();
        }
        tracing::trace!("[MATCH] expanding <{}> at word {}", name, start);
        let ends = self.ends(expansion, start);
        self.active.remove(&(name, start));
        ends
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(children: Vec<Expansion>) -> Expansion {
        Expansion::Sequence(children)
    }

    #[test]
    fn test_literal_is_whole_utterance() {
        let exp = Expansion::literal("hello world");
        assert!(exp.matches("hello world"));
        assert!(exp.matches("  HELLO   World "));
        assert!(!exp.matches("hello"));
        assert!(!exp.matches("hello world again"));
        assert!(!exp.matches("goodbye world"));
    }

    #[test]
    fn test_optional_present_or_absent() {
        let exp = seq(vec![
            Expansion::literal("hello"),
            Expansion::optional(Expansion::literal("glorious")),
            Expansion::literal("world"),
        ]);
        assert!(exp.matches("hello world"));
        assert!(exp.matches("hello glorious world"));
        assert!(!exp.matches("hello glorious"));
    }

    #[test]
    fn test_backtracking_through_optional() {
        let exp = seq(vec![
            Expansion::optional(Expansion::literal("big")),
            Expansion::literal("big dog"),
        ]);
        assert!(exp.matches("big dog"));
        assert!(exp.matches("big big dog"));
    }

    #[test]
    fn test_alternatives() {
        let exp = seq(vec![
            Expansion::literal("hello"),
            Expansion::alternatives_of(["Bob", "John Smith"]),
        ]);
        assert!(exp.matches("hello bob"));
        assert!(exp.matches("hello john smith"));
        assert!(!exp.matches("hello john"));
        assert!(!exp.matches("hello alice"));
    }

    #[test]
    fn test_void_matches_nothing() {
        assert!(!Expansion::AlternativeSet(vec![]).matches(""));
        assert!(!Expansion::AlternativeSet(vec![]).matches("anything"));
    }

    #[test]
    fn test_rule_ref_resolution() {
        let fruit = Arc::new(HiddenRule::new(
            "fruit",
            Expansion::alternatives_of(["apple", "pear"]),
        ));
        let rules = vec![fruit];
        let exp = seq(vec![Expansion::literal("eat"), Expansion::rule_ref("fruit")]);
        assert!(exp.matches_with("eat pear", rules.as_slice()));
        assert!(!exp.matches_with("eat plum", rules.as_slice()));
        assert!(!exp.matches("eat pear"));
    }

    struct Amount(Expansion);

    impl RuleLookup for Amount {
        fn expansion_of(&self, name: &str) -> Option<&Expansion> {
            (name == "n").then_some(&self.0)
        }
    }

    #[test]
    fn test_lookup_through_trait_object() {
        let rules = vec![Arc::new(HiddenRule::new("n", Expansion::literal("two")))];
        let exp = seq(vec![Expansion::rule_ref("n"), Expansion::literal("pears")]);
        assert!(matches(&exp, "two pears", rules.as_slice()));

        let amount = Amount(Expansion::literal("two"));
        let lookups: [&dyn RuleLookup; 2] = [&amount, &NoRules];
        assert!(exp.matches_with("two pears", lookups[0]));
        assert!(!exp.matches_with("two pears", lookups[1]));
    }

    #[test]
    fn test_null_reference() {
        let exp = seq(vec![Expansion::literal("go"), Expansion::rule_ref("NULL")]);
        assert!(exp.matches("go"));
    }

    #[test]
    fn test_left_recursion_terminates() {
        let looping = Arc::new(HiddenRule::new(
            "loop",
            Expansion::AlternativeSet(vec![
                seq(vec![Expansion::rule_ref("loop"), Expansion::literal("a")]),
                Expansion::literal("a"),
            ]),
        ));
        let rules = vec![looping];
        let exp = Expansion::rule_ref("loop");
        assert!(exp.matches_with("a", rules.as_slice()));
        assert!(!exp.matches_with("b", rules.as_slice()));
    }
}
