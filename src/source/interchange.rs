//! JSON interchange for the grammar source model.
//!
//! Lets a scripting layer hand over a whole grammar as one document:
//!
//! ```json
//! {
//!   "name": "shopping",
//!   "lists": { "fruit": ["apple", "pear"] },
//!   "rules": [
//!     { "name": "buy", "spec": "buy [some] <fruit>",
//!       "extras": [ { "type": "list", "name": "fruit", "list": "fruit" } ] }
//!   ]
//! }
//! ```
//!
//! Lists are declared once at the grammar level so every rule that names a
//! list shares the same [`List`] instance.

use std::collections::HashMap;
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use super::{Choice, Element, Grammar, List, ListRef, Rule, RuleRef};

/// Errors that can occur while loading a grammar document.
#[derive(Debug, Error)]
pub enum InterchangeError {
    /// JSON parsing error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// An extra names a list the document does not declare.
    #[error("Rule '{rule}' refers to undeclared list '{list}'")]
    UnknownList { rule: String, list: String },
}

#[derive(Debug, Deserialize)]
struct GrammarDoc {
    name: String,
    #[serde(default)]
    lists: IndexMap<String, Vec<String>>,
    #[serde(default)]
    rules: Vec<RuleDoc>,
}

#[derive(Debug, Deserialize)]
struct RuleDoc {
    name: String,
    spec: String,
    #[serde(default = "default_exported")]
    exported: bool,
    #[serde(default)]
    extras: Vec<ExtraDoc>,
}

fn default_exported() -> bool {
    true
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ExtraDoc {
    List { name: String, list: String },
    Choice {
        name: String,
        choices: IndexMap<String, String>,
    },
    RuleRef { name: String, target: String },
}

/// Build a [`Grammar`] from a JSON document.
pub fn grammar_from_json(text: &str) -> Result<Grammar, InterchangeError> {
    let doc: GrammarDoc = serde_json::from_str(text)?;

    let lists: HashMap<String, Arc<List>> = doc
        .lists
        .into_iter()
        .map(|(name, items)| {
            let list = Arc::new(List::with_items(name.as_str(), items));
            (name, list)
        })
        .collect();

    let mut grammar = Grammar::new(doc.name);
    for rule_doc in doc.rules {
        let mut rule = Rule::new(rule_doc.name.as_str(), rule_doc.spec).exported(rule_doc.exported);
        for extra in rule_doc.extras {
            let element: Element = match extra {
                ExtraDoc::List { name, list } => {
                    let target = lists.get(&list).ok_or_else(|| InterchangeError::UnknownList {
                        rule: rule_doc.name.clone(),
                        list: list.clone(),
                    })?;
                    if name == list {
                        Element::List(Arc::clone(target))
                    } else {
                        ListRef::new(name, Arc::clone(target)).into()
                    }
                }
                ExtraDoc::Choice { name, choices } => Choice::new(name, choices).into(),
                ExtraDoc::RuleRef { name, target } => RuleRef::new(name, target).into(),
            };
            rule = rule.with_extra(element);
        }
        grammar.add_rule(rule);
    }

    tracing::debug!(
        "loaded grammar '{}' with {} rules and {} lists",
        grammar.name(),
        grammar.rules().len(),
        lists.len()
    );
    Ok(grammar)
}
