//! Parse error type
//!
//! Provides rich error information including:
//! - Error codes for categorization
//! - The first offending token
//! - Hints/suggestions for fixes
//! - Related source locations ("opened here")

use text_size::{TextRange, TextSize};
use thiserror::Error;

use super::codes::ErrorCode;
use super::context::ParseContext;

/// Related location information for an error
///
/// Used to point to related source locations, e.g.,
/// "unclosed bracket opened here" pointing to the opening `[`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    /// Description of this related location
    pub message: String,
    /// Source range
    pub range: TextRange,
}

impl RelatedInfo {
    /// Create a new related info
    pub fn new(message: impl Into<String>, range: TextRange) -> Self {
        Self {
            message: message.into(),
            range,
        }
    }
}

/// A syntax error in a specification or compiled rule text
///
/// Parsing stops at the first error, so a `ParseError` always describes
/// the first offending token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{code}: {message}")]
pub struct ParseError {
    /// Human-readable error message
    pub message: String,
    /// Source location
    pub range: TextRange,
    /// Categorized error code
    pub code: ErrorCode,
    /// Text of the offending token (`None` at end of input)
    pub token: Option<String>,
    /// Optional suggestion for fixing the error
    pub hint: Option<String>,
    /// Related source locations
    pub related: Vec<RelatedInfo>,
}

impl ParseError {
    /// Create a builder for more complex error construction
    pub fn builder(code: ErrorCode) -> ParseErrorBuilder {
        ParseErrorBuilder::new(code)
    }

    /// Check if this error has a hint
    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }
}

/// Builder for creating complex parse errors
pub struct ParseErrorBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    token: Option<String>,
    hint: Option<String>,
    related: Vec<RelatedInfo>,
}

impl ParseErrorBuilder {
    /// Create a new builder with an error code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            range: None,
            token: None,
            hint: None,
            related: vec![],
        }
    }

    /// Set the error message
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the source range
    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Set the offending token text
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Add a hint
    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Add related information
    pub fn related(mut self, message: impl Into<String>, range: TextRange) -> Self {
        self.related.push(RelatedInfo::new(message, range));
        self
    }

    /// Build the parse error, falling back to the code's default message
    pub fn build(self) -> ParseError {
        ParseError {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .range
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code: self.code,
            token: self.token,
            hint: self.hint,
            related: self.related,
        }
    }
}

/// Create an "unexpected X in context, expected Y" error
pub fn format_context_error(found: &str, context: ParseContext, code: ErrorCode) -> ParseErrorBuilder {
    let message = format!(
        "unexpected {} {}, expected {}",
        found,
        context.description(),
        context.expected_description()
    );

    ParseError::builder(code).message(message)
}
