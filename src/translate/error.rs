//! Error types for translation.

use smol_str::SmolStr;
use thiserror::Error;

use crate::base::Name;

/// Errors raised while turning source rules into JSGF.
///
/// Parse failures of a rule's own spec are reported separately as
/// [`crate::parser::ParseError`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranslationError {
    /// A `<name>` token with no matching extra.
    #[error("Undefined reference <{name}> in rule '{rule}'")]
    UndefinedReference { name: Name, rule: Name },

    /// Rules that reach themselves through sibling references.
    #[error("Rule dependency cycle: {}", format_path(.path))]
    Cycle { path: Vec<Name> },

    /// Nested rules deeper than the configured limit.
    #[error("Rule '{rule}' nests deeper than {max_depth} levels")]
    DepthExceeded { rule: Name, max_depth: usize },

    /// Two rules with the same name in one grammar.
    #[error("Duplicate rule '{name}'")]
    DuplicateRule { name: Name },

    /// A hidden list rule named like one of the grammar's rules.
    #[error("List '{name}' has the same name as a rule")]
    NameCollision { name: Name },

    /// Two different lists sharing one name in the same pass.
    #[error("Conflicting definitions of list '{name}'")]
    ConflictingList { name: Name },

    /// A list item or choice phrase containing characters a spec word cannot.
    #[error("Phrase '{phrase}' of '{element}' is not plain words")]
    InvalidPhrase { phrase: SmolStr, element: Name },

    /// A rule or list name that cannot be written as `<name>`.
    #[error("'{name}' is not a valid rule name")]
    InvalidName { name: Name },

    /// A rule or list named `NULL` or `VOID`.
    #[error("'{name}' is a reserved JSGF rule name")]
    ReservedName { name: Name },
}

impl TranslationError {
    pub fn undefined_reference(name: impl Into<Name>, rule: impl Into<Name>) -> Self {
        Self::UndefinedReference {
            name: name.into(),
            rule: rule.into(),
        }
    }
}

fn format_path(path: &[Name]) -> String {
    path.iter()
        .map(|name| format!("<{}>", name))
        .collect::<Vec<_>>()
        .join(" -> ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            TranslationError::undefined_reference("who", "greet").to_string(),
            "Undefined reference <who> in rule 'greet'"
        );
        let cycle = TranslationError::Cycle {
            path: vec!["a".into(), "b".into(), "a".into()],
        };
        assert_eq!(cycle.to_string(), "Rule dependency cycle: <a> -> <b> -> <a>");
        let phrase = TranslationError::InvalidPhrase {
            phrase: "C#".into(),
            element: "language".into(),
        };
        assert_eq!(phrase.to_string(), "Phrase 'C#' of 'language' is not plain words");
    }
}
