//! JSGF target model
//!
//! The compiled side of translation: expansions, hidden and linked rules,
//! whole grammars, their text form, and utterance matching.
//!
//! ```text
//! Expansion  → "hello [glorious] (world|planet) <fruit>"
//! HiddenRule → "<fruit> = (apple|pear);"
//! LinkedRule → "public <eat> = eat <fruit>;"
//! Grammar    → hidden rules, then linked rules, one line each
//! ```
//!
//! Compiled text is a pure function of the tree. Reading it back with
//! [`read_rules`] and compiling again yields the same text.

mod expansion;
mod matcher;
mod reader;
mod rules;

pub use expansion::{Expansion, NULL, VOID};
pub use matcher::{NoRules, RuleLookup, matches};
pub use reader::{DeclaredRule, compile_rules, read_rules};
pub use rules::{CompileOptions, Grammar, GrammarRule, HiddenRule, JsgfRule, LinkedRule};
