//! Translation from the grammar source model to JSGF
//!
//! ```text
//! Rule spec ──parse──▶ SpecNode ──resolve extras──▶ TranslationState
//!                                                        │
//!                          LinkedRule + new HiddenRules ◀┘
//! ```
//!
//! Extras resolve by kind:
//! - **List / ListRef**: `<list>` plus a shared hidden rule of the items
//! - **Choice**: an inline alternative set of its phrases
//! - **Rule**: the nested rule's spec, translated in place
//! - **RuleRef**: `<target>`, a sibling rule of the grammar being translated
//!
//! A list becomes one hidden rule per pass no matter how many rules use it.
//! [`Translator::translate_grammar`] runs one pass over a whole grammar;
//! [`Translator::session`] opens one explicitly.

mod error;
mod state;
mod translator;


pub use error::TranslationError;
pub use state::{RuleTranslation, TranslationState};
pub use translator::{Session, Translator, TranslatorOptions};
