//! Crate-level error type.

use thiserror::Error;

use crate::parser::ParseError;
use crate::translate::TranslationError;

/// Any failure while translating a rule or grammar.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The rule's spec text is not valid.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The spec parsed but could not be turned into JSGF.
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),
}

impl Error {
    pub fn is_parse(&self) -> bool {
        matches!(self, Error::Parse(_))
    }

    pub fn is_translation(&self) -> bool {
        matches!(self, Error::Translation(_))
    }

    pub fn as_parse(&self) -> Option<&ParseError> {
        match self {
            Error::Parse(err) => Some(err),
            Error::Translation(_) => None,
        }
    }

    pub fn as_translation(&self) -> Option<&TranslationError> {
        match self {
            Error::Translation(err) => Some(err),
            Error::Parse(_) => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
