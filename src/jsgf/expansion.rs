//! JSGF expansions: the right-hand side of a rule.

use smol_str::SmolStr;

use super::matcher::{self, NoRules, RuleLookup};
use crate::base::Name;

/// Name JSGF reserves for an expansion that can never be spoken.
pub const VOID: &str = "VOID";
/// Name JSGF reserves for an expansion that matches without any words.
pub const NULL: &str = "NULL";

/// A node of a compiled JSGF expansion
///
/// Equality is structural; two expansions built independently compare equal
/// when they have the same shape and words.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Expansion {
    /// A run of words; compiled lower-cased
    Literal(Vec<SmolStr>),
    /// Children spoken one after another
    Sequence(Vec<Expansion>),
    /// `[inner]`
    Optional(Box<Expansion>),
    /// `(a|b|c)`
    AlternativeSet(Vec<Expansion>),
    /// `<name>`, resolved by name when matching
    RuleRef(Name),
}

impl Expansion {
    /// A literal from whitespace-separated text
    pub fn literal(text: &str) -> Self {
        Self::Literal(text.split_whitespace().map(SmolStr::new).collect())
    }

    pub fn optional(inner: Expansion) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn rule_ref(name: impl Into<Name>) -> Self {
        Self::RuleRef(name.into())
    }

    /// An alternative set with one literal per phrase
    pub fn alternatives_of<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self::AlternativeSet(
            phrases
                .into_iter()
                .map(|phrase| Self::literal(phrase.as_ref()))
                .collect(),
        )
    }

    /// Canonical JSGF text for this expansion
    pub fn compile(&self) -> String {
        let mut out = String::new();
        self.compile_into(&mut out);
        out
    }

    fn compile_into(&self, out: &mut String) {
        match self {
            Self::Literal(words) => {
                for (i, word) in words.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    out.push_str(&word.to_lowercase());
                }
            }
            Self::Sequence(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        out.push(' ');
                    }
                    child.compile_into(out);
                }
            }
            Self::Optional(inner) => {
                out.push('[');
                inner.compile_into(out);
                out.push(']');
            }
            Self::AlternativeSet(alternatives) => match alternatives.as_slice() {
                [] => {
                    out.push('<');
                    out.push_str(VOID);
                    out.push('>');
                }
                [only] => only.compile_into(out),
                _ => {
                    out.push('(');
                    for (i, alternative) in alternatives.iter().enumerate() {
                        if i > 0 {
                            out.push('|');
                        }
                        alternative.compile_into(out);
                    }
                    out.push(')');
                }
            },
            Self::RuleRef(name) => {
                out.push('<');
                out.push_str(name);
                out.push('>');
            }
        }
    }

    /// Every rule name referenced from this expansion, in order of appearance
    pub fn rule_refs(&self) -> Vec<&Name> {
        let mut names = Vec::new();
        self.collect_rule_refs(&mut names);
        names
    }

    fn collect_rule_refs<'a>(&'a self, names: &mut Vec<&'a Name>) {
        match self {
            Self::Literal(_) => {}
            Self::Sequence(children) | Self::AlternativeSet(children) => {
                for child in children {
                    child.collect_rule_refs(names);
                }
            }
            Self::Optional(inner) => inner.collect_rule_refs(names),
            Self::RuleRef(name) => names.push(name),
        }
    }

    /// Whole-utterance match; any rule reference fails to match
    pub fn matches(&self, utterance: &str) -> bool {
        matcher::matches(self, utterance, &NoRules)
    }

    /// Whole-utterance match, resolving rule references through `rules`
    pub fn matches_with<L: RuleLookup + ?Sized>(&self, utterance: &str, rules: &L) -> bool {
        matcher::matches(self, utterance, rules)
    }
}
