//! # voxgram
//!
//! Speech-command specifications to JSGF grammars, plus utterance matching.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! translate → Translator: source rules + extras → JSGF rules
//!   ↓
//! jsgf      → Expansions, hidden/linked rules, grammars, compile & match
//!   ↓
//! source    → Caller-supplied rules, lists, choices
//!   ↓
//! parser    → Logos lexer, recursive-descent spec parser, ParseError
//!   ↓
//! base      → Primitives (Name, TextRange, word normalization)
//! ```
//!
//! ## Example
//!
//! ```
//! use voxgram::{Choice, JsgfRule, Rule, Translator};
//!
//! let rule = Rule::compound(
//!     "greet",
//!     "Hello <person>",
//!     [Choice::new("person", [("Bob", "bob"), ("John", "john")])],
//! );
//! let mut translator = Translator::new();
//! let compiled = translator.translate_rule(&rule).unwrap().jsgf_rule;
//!
//! assert_eq!(compiled.compile(), "public <greet> = hello (bob|john);");
//! assert!(compiled.matches("hello Bob"));
//! ```

// ============================================================================
// MODULES (dependency order: base → parser → source → jsgf → translate)
// ============================================================================

/// Foundation types: Name, TextRange, word normalization
pub mod base;

/// Spec parser: Logos lexer, recursive-descent parser, error catalogue
pub mod parser;

/// Grammar source model: rules, lists, choices, references
pub mod source;

/// JSGF target model: expansions, rules, grammars, matching
pub mod jsgf;

/// Translation from the source model to JSGF
pub mod translate;

mod error;

pub use error::{Error, Result};

// Re-export the types most callers need
pub use jsgf::{CompileOptions, Expansion, GrammarRule, HiddenRule, JsgfRule, LinkedRule};
pub use parser::{ParseError, SpecNode, parse};
pub use source::{Choice, Element, Grammar, List, ListRef, Rule, RuleId, RuleRef};
pub use translate::{RuleTranslation, TranslationError, TranslationState, Translator, TranslatorOptions};

// Re-export foundation types
pub use base::{Name, TextRange, TextSize};
