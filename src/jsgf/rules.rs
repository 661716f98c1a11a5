//! JSGF rules and grammars.

use std::sync::Arc;

use super::expansion::Expansion;
use super::matcher::RuleLookup;
use crate::base::Name;
use crate::source::RuleId;

/// Shared behaviour of every compiled rule
pub trait JsgfRule {
    fn name(&self) -> &Name;

    fn is_public(&self) -> bool;

    fn expansion(&self) -> &Expansion;

    /// `public <name> = expansion;` or `<name> = expansion;`
    fn compile(&self) -> String {
        compile_rule(self.name(), self.is_public(), self.expansion())
    }

    /// Whole-utterance match against this rule's expansion
    fn matches(&self, utterance: &str) -> bool {
        self.expansion().matches(utterance)
    }
}

pub(crate) fn compile_rule(name: &str, public: bool, expansion: &Expansion) -> String {
    let visibility = if public { "public " } else { "" };
    format!("{}<{}> = {};", visibility, name, expansion.compile())
}

/// A non-exported rule, typically one list, shared by every rule that uses it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HiddenRule {
    name: Name,
    expansion: Expansion,
}

impl HiddenRule {
    pub fn new(name: impl Into<Name>, expansion: Expansion) -> Self {
        Self {
            name: name.into(),
            expansion,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn expansion(&self) -> &Expansion {
        &self.expansion
    }
}

impl JsgfRule for HiddenRule {
    fn name(&self) -> &Name {
        &self.name
    }

    fn is_public(&self) -> bool {
        false
    }

    fn expansion(&self) -> &Expansion {
        &self.expansion
    }
}

/// A compiled rule tied back to the source rule that produced it
///
/// Carries every hidden rule its expansion refers to, so it can be matched
/// on its own. Inside a grammar it also carries the sibling rules it reaches
/// through `<name>` references.
#[derive(Debug, Clone)]
pub struct LinkedRule {
    name: Name,
    public: bool,
    expansion: Expansion,
    source: RuleId,
    dependencies: Vec<Arc<HiddenRule>>,
    siblings: Vec<(Name, Expansion)>,
}

impl LinkedRule {
    pub fn new(name: impl Into<Name>, public: bool, expansion: Expansion, source: RuleId) -> Self {
        Self {
            name: name.into(),
            public,
            expansion,
            source,
            dependencies: Vec::new(),
            siblings: Vec::new(),
        }
    }

    pub fn with_dependencies(mut self, dependencies: Vec<Arc<HiddenRule>>) -> Self {
        self.dependencies = dependencies;
        self
    }

    /// Rules of the same grammar that references resolve against
    pub(crate) fn with_siblings(mut self, siblings: Vec<(Name, Expansion)>) -> Self {
        self.siblings = siblings;
        self
    }

    /// Id of the source rule, for dispatching its action
    pub fn source(&self) -> RuleId {
        self.source
    }

    pub fn dependencies(&self) -> &[Arc<HiddenRule>] {
        &self.dependencies
    }

    /// Names of the sibling rules this rule reaches, directly or not
    pub fn siblings(&self) -> impl Iterator<Item = &Name> {
        self.siblings.iter().map(|(name, _)| name)
    }
}

impl PartialEq for LinkedRule {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.public == other.public
            && self.expansion == other.expansion
            && self.source == other.source
    }
}

impl Eq for LinkedRule {}

impl JsgfRule for LinkedRule {
    fn name(&self) -> &Name {
        &self.name
    }

    fn is_public(&self) -> bool {
        self.public
    }

    fn expansion(&self) -> &Expansion {
        &self.expansion
    }

    fn matches(&self, utterance: &str) -> bool {
        self.expansion.matches_with(utterance, self)
    }
}

impl RuleLookup for LinkedRule {
    fn expansion_of(&self, name: &str) -> Option<&Expansion> {
        if name == self.name {
            return Some(&self.expansion);
        }
        self.dependencies.as_slice().expansion_of(name).or_else(|| {
            self.siblings
                .iter()
                .find(|(sibling, _)| sibling.as_str() == name)
                .map(|(_, expansion)| expansion)
        })
    }
}

/// One entry of a compiled [`Grammar`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarRule {
    Hidden(Arc<HiddenRule>),
    Linked(LinkedRule),
}

impl GrammarRule {
    pub fn as_linked(&self) -> Option<&LinkedRule> {
        match self {
            GrammarRule::Linked(rule) => Some(rule),
            GrammarRule::Hidden(_) => None,
        }
    }

    pub fn as_hidden(&self) -> Option<&Arc<HiddenRule>> {
        match self {
            GrammarRule::Hidden(rule) => Some(rule),
            GrammarRule::Linked(_) => None,
        }
    }
}

impl JsgfRule for GrammarRule {
    fn name(&self) -> &Name {
        match self {
            GrammarRule::Hidden(rule) => rule.name(),
            GrammarRule::Linked(rule) => JsgfRule::name(rule),
        }
    }

    fn is_public(&self) -> bool {
        match self {
            GrammarRule::Hidden(_) => false,
            GrammarRule::Linked(rule) => rule.is_public(),
        }
    }

    fn expansion(&self) -> &Expansion {
        match self {
            GrammarRule::Hidden(rule) => rule.expansion(),
            GrammarRule::Linked(rule) => JsgfRule::expansion(rule),
        }
    }

    fn matches(&self, utterance: &str) -> bool {
        match self {
            GrammarRule::Hidden(rule) => JsgfRule::matches(rule.as_ref(), utterance),
            GrammarRule::Linked(rule) => rule.matches(utterance),
        }
    }
}

/// Options for [`Grammar::compile_with`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompileOptions {
    /// Emit `#JSGF ...;` and `grammar <name>;` before the rules
    pub header: bool,
    pub version: Name,
    pub charset: Option<Name>,
    pub locale: Option<Name>,
}

impl Default for CompileOptions {
    fn default() -> Self {
        Self {
            header: false,
            version: Name::new_static("V1.0"),
            charset: Some(Name::new_static("UTF-8")),
            locale: Some(Name::new_static("en")),
        }
    }
}

impl CompileOptions {
    /// Options that emit the JSGF header
    pub fn with_header() -> Self {
        Self {
            header: true,
            ..Self::default()
        }
    }

    /// The `#JSGF` self-identifying header line
    pub fn header_line(&self) -> String {
        let mut line = format!("#JSGF {}", self.version);
        if let Some(charset) = &self.charset {
            line.push(' ');
            line.push_str(charset);
            if let Some(locale) = &self.locale {
                line.push(' ');
                line.push_str(locale);
            }
        }
        line.push(';');
        line
    }
}

/// A compiled grammar: hidden dependencies first, then the linked rules
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grammar {
    name: Name,
    rules: Vec<GrammarRule>,
}

impl Grammar {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub(crate) fn push(&mut self, rule: GrammarRule) {
        self.rules.push(rule);
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn rules(&self) -> &[GrammarRule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&GrammarRule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }

    pub fn hidden_rules(&self) -> impl Iterator<Item = &Arc<HiddenRule>> {
        self.rules.iter().filter_map(GrammarRule::as_hidden)
    }

    pub fn linked_rules(&self) -> impl Iterator<Item = &LinkedRule> {
        self.rules.iter().filter_map(GrammarRule::as_linked)
    }

    /// Each rule's line followed by a newline, in stored order
    pub fn compile(&self) -> String {
        self.compile_with(&CompileOptions::default())
    }

    pub fn compile_with(&self, options: &CompileOptions) -> String {
        let mut out = String::new();
        if options.header {
            out.push_str(&options.header_line());
            out.push('\n');
            out.push_str(&format!("grammar {};\n", self.name));
        }
        for rule in &self.rules {
            out.push_str(&rule.compile());
            out.push('\n');
        }
        out
    }

    /// The first public rule that matches the utterance
    pub fn find_match(&self, utterance: &str) -> Option<&LinkedRule> {
        self.linked_rules()
            .filter(|rule| rule.is_public())
            .find(|rule| rule.expansion().matches_with(utterance, self))
    }

    /// Whether any public rule matches the utterance
    pub fn matches(&self, utterance: &str) -> bool {
        self.find_match(utterance).is_some()
    }
}

impl RuleLookup for Grammar {
    fn expansion_of(&self, name: &str) -> Option<&Expansion> {
        self.rule(name).map(JsgfRule::expansion)
    }
}
