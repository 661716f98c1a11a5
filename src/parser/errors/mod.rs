//! Parser error handling module
//!
//! This module provides error handling for the spec and declaration parsers:
//! - Categorized error codes for filtering and documentation
//! - Context-aware error messages
//! - Hints for common mistakes
//! - Related span tracking (e.g., "opened here" for unclosed brackets)

mod codes;
mod context;
mod error;

pub use codes::ErrorCode;
pub use context::ParseContext;
pub use error::{ParseError, ParseErrorBuilder, RelatedInfo, format_context_error};

#[cfg(test)]
mod tests;
