//! Spec AST
//!
//! The tree produced by parsing one specification string. It is built fresh
//! for every parse and only lives until the translator has turned it into
//! JSGF expansions.

use std::fmt;

use text_size::TextRange;

use crate::base::Name;

/// A node of a parsed command specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecNode {
    /// One or more bare words, in source case
    Literal(Vec<Name>),
    /// Children matched left to right
    Sequence(Vec<SpecNode>),
    /// `[ ... ]`
    Optional(Box<SpecNode>),
    /// `( a | b )`, or `|` at top level
    Alternatives(Vec<SpecNode>),
    /// `<name>`
    Reference { name: Name, range: TextRange },
}

impl SpecNode {
    /// Build a sequence, collapsing it to its only child when possible
    pub fn sequence(mut children: Vec<SpecNode>) -> Self {
        if children.len() == 1 {
            children.remove(0)
        } else {
            Self::Sequence(children)
        }
    }

    /// Build an alternative group, collapsing it to its only branch when possible
    pub fn alternatives(mut branches: Vec<SpecNode>) -> Self {
        if branches.len() == 1 {
            branches.remove(0)
        } else {
            Self::Alternatives(branches)
        }
    }

    /// Names of every `<name>` reference in the tree, in source order
    pub fn references(&self) -> Vec<&Name> {
        let mut names = Vec::new();
        self.collect_references(&mut names);
        names
    }

    fn collect_references<'a>(&'a self, names: &mut Vec<&'a Name>) {
        match self {
            Self::Literal(_) => {}
            Self::Sequence(children) | Self::Alternatives(children) => {
                for child in children {
                    child.collect_references(names);
                }
            }
            Self::Optional(child) => child.collect_references(names),
            Self::Reference { name, .. } => names.push(name),
        }
    }
}

/// Renders the node back into spec syntax, keeping the source case
impl fmt::Display for SpecNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Literal(words) => write!(f, "{}", words.join(" ")),
            Self::Sequence(children) => {
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Self::Optional(child) => write!(f, "[{}]", child),
            Self::Alternatives(branches) => {
                write!(f, "(")?;
                for (i, branch) in branches.iter().enumerate() {
                    if i > 0 {
                        write!(f, "|")?;
                    }
                    write!(f, "{}", branch)?;
                }
                write!(f, ")")
            }
            Self::Reference { name, .. } => write!(f, "<{}>", name),
        }
    }
}
