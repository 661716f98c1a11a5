//! Parser for the command specification language
//!
//! Parses spec strings such as `Hello [glorious] (world|planet) <name>` into
//! a [`SpecNode`] tree using:
//! - **logos** for fast lexing
//! - a hand-written recursive descent parser that fails fast
//!
//! ## Architecture
//!
//! ```text
//! Spec text
//!     ↓
//! Lexer (logos) → Tokens with SyntaxKind
//!     ↓
//! Parser → SpecNode (or the first ParseError)
//!     ↓
//! Translator → JSGF expansions
//! ```
//!
//! The same machinery reads compiled JSGF rule declarations back in
//! ([`parse_declarations`]).

#[allow(clippy::module_inception)]
mod parser;

pub mod ast;
mod declarations;
pub mod errors;
mod lexer;
mod syntax_kind;

pub use ast::SpecNode;
pub use declarations::{Declaration, DeclarationFile, parse_declarations};
pub use errors::{ErrorCode, ParseContext, ParseError};
pub use lexer::{Lexer, Token, is_word, tokenize};
pub use parser::parse;
pub use syntax_kind::SyntaxKind;
