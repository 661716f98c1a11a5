//! Foundation types for the voxgram toolchain.
//!
//! This module provides fundamental types used throughout the crate:
//! - [`Name`] - Rule, list and reference names
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets) in spec text
//! - [`normalize_words`] - Utterance normalization shared by compiler and matcher
//!
//! This module has NO dependencies on other voxgram modules.

pub use smol_str::SmolStr;
pub use text_size::{TextRange, TextSize};

/// A rule, list, choice or extra name.
///
/// Names are short and cloned a lot (every `RuleRef` carries one), so they
/// use `SmolStr` rather than `String`.
pub type Name = SmolStr;

/// Split text into lower-cased words, collapsing any run of whitespace.
pub fn normalize_words(text: &str) -> Vec<SmolStr> {
    text.split_whitespace()
        .map(|word| SmolStr::new(word.to_lowercase()))
        .collect()
}

/// Whether `name` is usable inside `<...>`.
///
/// The first character must start an identifier; later characters may also
/// be `-` or `.`, which JSGF allows in rule names.
pub fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first == '_' || unicode_ident::is_xid_start(first) => {}
        _ => return false,
    }
    chars.all(|c| unicode_ident::is_xid_continue(c) || c == '-' || c == '.')
}
