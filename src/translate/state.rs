//! Intermediate translation results.

use std::sync::Arc;

use indexmap::IndexMap;

use crate::base::Name;
use crate::jsgf::{Expansion, HiddenRule, LinkedRule};

/// An expansion plus the hidden rules it introduced to the current pass
///
/// States are never mutated in place; combining children produces a new
/// state whose dependencies keep first-seen order, one entry per name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationState {
    expansion: Expansion,
    dependencies: Vec<Arc<HiddenRule>>,
}

impl TranslationState {
    pub fn new(expansion: Expansion) -> Self {
        Self {
            expansion,
            dependencies: Vec::new(),
        }
    }

    pub fn with_dependency(mut self, dependency: Arc<HiddenRule>) -> Self {
        if !self
            .dependencies
            .iter()
            .any(|existing| existing.name() == dependency.name())
        {
            self.dependencies.push(dependency);
        }
        self
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    pub fn dependencies(&self) -> &[Arc<HiddenRule>] {
        &self.dependencies
    }

    pub fn into_parts(self) -> (Expansion, Vec<Arc<HiddenRule>>) {
        (self.expansion, self.dependencies)
    }

    /// Wrap the expansion, keeping the dependencies
    pub fn map(self, wrap: impl FnOnce(Expansion) -> Expansion) -> Self {
        Self {
            expansion: wrap(self.expansion),
            dependencies: self.dependencies,
        }
    }

    /// Combine child states into one node built by `build`
    pub fn merge(
        children: impl IntoIterator<Item = TranslationState>,
        build: impl FnOnce(Vec<Expansion>) -> Expansion,
    ) -> Self {
        let mut expansions = Vec::new();
        let mut dependencies: IndexMap<Name, Arc<HiddenRule>> = IndexMap::new();
        for child in children {
            expansions.push(child.expansion);
            for dependency in child.dependencies {
                dependencies
                    .entry(dependency.name().clone())
                    .or_insert(dependency);
            }
        }
        Self {
            expansion: build(expansions),
            dependencies: dependencies.into_values().collect(),
        }
    }
}

/// The compiled form of one source rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleTranslation {
    pub jsgf_rule: LinkedRule,
    /// Hidden rules this rule introduced to the pass
    pub dependencies: Vec<Arc<HiddenRule>>,
}
