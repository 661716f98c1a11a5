//! Shared fixtures for integration tests.

#![allow(dead_code)]

pub mod fixtures;

use voxgram::jsgf::LinkedRule;
use voxgram::{Rule, Translator};

/// Translate one rule with a fresh translator, panicking on failure
pub fn compile_rule(rule: &Rule) -> LinkedRule {
    let mut translator = Translator::new();
    match translator.translate_rule(rule) {
        Ok(translation) => translation.jsgf_rule,
        Err(err) => panic!("failed to translate rule '{}': {}", rule.name(), err),
    }
}

/// Translate a bare spec into a public rule named `test`
pub fn compile_spec(spec: &str) -> LinkedRule {
    compile_rule(&Rule::new("test", spec))
}
