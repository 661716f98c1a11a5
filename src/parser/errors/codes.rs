//! Error code definitions for parser diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Lexical errors (invalid characters)
//! - E02xx: Structural errors (brackets, parentheses, empty groups)
//! - E03xx: Reference errors (`<name>` tokens)
//! - E04xx: Declaration errors (compiled `<name> = ...;` rules)
//! - E09xx: Generic/fallback errors

use std::fmt;

/// Error codes for parser diagnostics
///
/// Each error code represents a specific category of parse error,
/// enabling callers to filter or document failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Lexical errors
    // =========================================================================
    /// Invalid or unexpected character in source
    E0101,

    // =========================================================================
    // E02xx: Structural errors
    // =========================================================================
    /// Unclosed parenthesis `(`
    E0203,
    /// Unclosed bracket `[`
    E0204,
    /// Unexpected closing delimiter
    E0205,
    /// Empty group or alternative
    E0206,
    /// Mismatched delimiters
    E0207,
    /// Empty specification
    E0208,

    // =========================================================================
    // E03xx: Reference errors
    // =========================================================================
    /// Missing reference name after `<`
    E0301,
    /// Unclosed reference `<name`
    E0302,
    /// Stray `>` outside a reference
    E0303,
    /// Reference name is not an identifier
    E0304,

    // =========================================================================
    // E04xx: Declaration errors
    // =========================================================================
    /// Missing `<name>` in a rule declaration
    E0401,
    /// Missing `=` in a rule declaration
    E0402,
    /// Missing `;` after a rule declaration
    E0403,
    /// Invalid `grammar` statement
    E0404,

    // =========================================================================
    // E09xx: Generic/fallback errors
    // =========================================================================
    /// Unexpected token in current context
    E0901,
    /// Internal parser error
    E0999,
}

impl ErrorCode {
    /// Get the string representation of the error code (e.g., "E0204")
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0203 => "E0203",
            Self::E0204 => "E0204",
            Self::E0205 => "E0205",
            Self::E0206 => "E0206",
            Self::E0207 => "E0207",
            Self::E0208 => "E0208",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
            Self::E0303 => "E0303",
            Self::E0304 => "E0304",
            Self::E0401 => "E0401",
            Self::E0402 => "E0402",
            Self::E0403 => "E0403",
            Self::E0404 => "E0404",
            Self::E0901 => "E0901",
            Self::E0999 => "E0999",
        }
    }

    /// Get a short description of the error category
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 => "lexical error",
            Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206 | Self::E0207 | Self::E0208 => {
                "structural error"
            }
            Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304 => "reference error",
            Self::E0401 | Self::E0402 | Self::E0403 | Self::E0404 => "declaration error",
            Self::E0901 | Self::E0999 => "syntax error",
        }
    }

    /// Get the default message template for this error code
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "invalid character",
            Self::E0203 => "unclosed parenthesis",
            Self::E0204 => "unclosed bracket",
            Self::E0205 => "unexpected closing delimiter",
            Self::E0206 => "empty group",
            Self::E0207 => "mismatched delimiters",
            Self::E0208 => "empty specification",
            Self::E0301 => "missing reference name",
            Self::E0302 => "unclosed reference",
            Self::E0303 => "unexpected '>'",
            Self::E0304 => "invalid reference name",
            Self::E0401 => "missing rule name",
            Self::E0402 => "missing '='",
            Self::E0403 => "missing semicolon",
            Self::E0404 => "invalid grammar statement",
            Self::E0901 => "unexpected token",
            Self::E0999 => "internal parser error",
        }
    }

    /// Check if this is a structural error (delimiter-related)
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::E0203 | Self::E0204 | Self::E0205 | Self::E0206 | Self::E0207 | Self::E0208
        )
    }

    /// Check if this error concerns a `<name>` reference token
    pub fn is_reference(&self) -> bool {
        matches!(self, Self::E0301 | Self::E0302 | Self::E0303 | Self::E0304)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
