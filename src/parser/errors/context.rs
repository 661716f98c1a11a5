//! Parse context tracking for context-aware error messages
//!
//! The parser maintains a stack of contexts so error messages can say where
//! in the nesting structure the problem was found.

use crate::parser::SyntaxKind;

/// Represents the current parsing context
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParseContext {
    /// At the top level of a specification
    #[default]
    TopLevel,
    /// Inside `[ ... ]`
    OptionalGroup,
    /// Inside `( ... )`
    AlternativeGroup,
    /// Inside `<...>`
    Reference,
    /// Inside a compiled `<name> = ...;` declaration
    RuleDeclaration,
}

impl ParseContext {
    /// Get a human-readable description of this context for error messages
    pub fn description(&self) -> &'static str {
        match self {
            Self::TopLevel => "at top level",
            Self::OptionalGroup => "in optional group",
            Self::AlternativeGroup => "in alternative group",
            Self::Reference => "in reference",
            Self::RuleDeclaration => "in rule declaration",
        }
    }

    /// Get a description of what is expected in this context
    pub fn expected_description(&self) -> &'static str {
        match self {
            Self::TopLevel => "a word, group or reference",
            Self::OptionalGroup => "a word, group, reference or ']'",
            Self::AlternativeGroup => "a word, group, reference, '|' or ')'",
            Self::Reference => "a name followed by '>'",
            Self::RuleDeclaration => "an expansion followed by ';'",
        }
    }

    /// The token that closes this context, if any
    pub fn closing_kind(&self) -> Option<SyntaxKind> {
        match self {
            Self::TopLevel => None,
            Self::OptionalGroup => Some(SyntaxKind::R_BRACKET),
            Self::AlternativeGroup => Some(SyntaxKind::R_PAREN),
            Self::Reference => Some(SyntaxKind::GT),
            Self::RuleDeclaration => Some(SyntaxKind::SEMICOLON),
        }
    }
}
