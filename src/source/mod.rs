//! Grammar source model: the caller-supplied rules, lists and choices.
//!
//! These types describe *what* a speech-command grammar says before it is
//! translated. The translator only ever reads them.
//!
//! ## Key Types
//!
//! - [`Rule`]: a named spec string plus the extras its `<name>` tokens refer to
//! - [`Grammar`]: an ordered collection of rules
//! - [`Element`]: the closed set of things an extra can be
//! - [`List`], [`ListRef`], [`Choice`], [`RuleRef`]: the element payloads

#[cfg(feature = "interchange")]
pub mod interchange;

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use smol_str::SmolStr;
use uuid::Uuid;

use crate::base::Name;

// ============================================================================
// IDENTITY
// ============================================================================

/// Stable identity of a source rule.
///
/// Compiled rules carry it back to the rule that produced them so a caller
/// can dispatch that rule's action after a recognition. Cloning a [`Rule`]
/// keeps its id.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(Uuid);

impl RuleId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for RuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ELEMENTS
// ============================================================================

/// An ordered list of phrases, e.g. the fruits a user can name.
///
/// A list compiles to one hidden rule no matter how many rules use it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct List {
    name: Name,
    items: Vec<SmolStr>,
}

impl List {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            items: Vec::new(),
        }
    }

    pub fn with_items<I, S>(name: impl Into<Name>, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        Self {
            name: name.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn items(&self) -> &[SmolStr] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn append(&mut self, item: impl Into<SmolStr>) {
        self.items.push(item.into());
    }

    pub fn extend<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.items.extend(items.into_iter().map(Into::into));
    }

    /// Replace every item
    pub fn set<I, S>(&mut self, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        self.items = items.into_iter().map(Into::into).collect();
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

/// A named handle on a [`List`].
///
/// The handle name is what a spec writes inside `<...>`; the hidden rule is
/// still named after the list itself.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListRef {
    name: Name,
    list: Arc<List>,
}

impl ListRef {
    pub fn new(name: impl Into<Name>, list: Arc<List>) -> Self {
        Self {
            name: name.into(),
            list,
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn list(&self) -> &Arc<List> {
        &self.list
    }
}

/// Spoken phrases mapped to the values they stand for.
///
/// Phrases keep their insertion order, which is the order they compile in.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Choice {
    name: Name,
    choices: IndexMap<SmolStr, SmolStr>,
}

impl Choice {
    pub fn new<I, K, V>(name: impl Into<Name>, choices: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<SmolStr>,
        V: Into<SmolStr>,
    {
        Self {
            name: name.into(),
            choices: choices
                .into_iter()
                .map(|(phrase, value)| (phrase.into(), value.into()))
                .collect(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn phrases(&self) -> impl Iterator<Item = &SmolStr> {
        self.choices.keys()
    }

    /// Value for a phrase, compared case-insensitively
    pub fn value(&self, phrase: &str) -> Option<&SmolStr> {
        self.choices
            .iter()
            .find(|(p, _)| p.eq_ignore_ascii_case(phrase))
            .map(|(_, value)| value)
    }

    pub fn len(&self) -> usize {
        self.choices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }
}

/// A reference to a sibling rule of the enclosing [`Grammar`], by name.
///
/// Compiles to `<target>`; the target must be declared in the same grammar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleRef {
    name: Name,
    target: Name,
}

impl RuleRef {
    pub fn new(name: impl Into<Name>, target: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            target: target.into(),
        }
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn target(&self) -> &Name {
        &self.target
    }
}

/// Everything an extra can be.
///
/// The set is closed: the translator has exactly one method per variant.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Element {
    List(Arc<List>),
    ListRef(ListRef),
    Choice(Choice),
    /// A nested rule, translated inline
    Rule(Arc<Rule>),
    RuleRef(RuleRef),
}

impl Element {
    /// The name a spec uses to refer to this element
    pub fn name(&self) -> &Name {
        match self {
            Element::List(list) => list.name(),
            Element::ListRef(list_ref) => list_ref.name(),
            Element::Choice(choice) => choice.name(),
            Element::Rule(rule) => rule.name(),
            Element::RuleRef(rule_ref) => rule_ref.name(),
        }
    }

    /// Short description of the variant, for diagnostics
    pub fn kind_name(&self) -> &'static str {
        match self {
            Element::List(_) => "list",
            Element::ListRef(_) => "list reference",
            Element::Choice(_) => "choice",
            Element::Rule(_) => "rule",
            Element::RuleRef(_) => "rule reference",
        }
    }
}

impl From<List> for Element {
    fn from(list: List) -> Self {
        Element::List(Arc::new(list))
    }
}

impl From<Arc<List>> for Element {
    fn from(list: Arc<List>) -> Self {
        Element::List(list)
    }
}

impl From<ListRef> for Element {
    fn from(list_ref: ListRef) -> Self {
        Element::ListRef(list_ref)
    }
}

impl From<Choice> for Element {
    fn from(choice: Choice) -> Self {
        Element::Choice(choice)
    }
}

impl From<Rule> for Element {
    fn from(rule: Rule) -> Self {
        Element::Rule(Arc::new(rule))
    }
}

impl From<RuleRef> for Element {
    fn from(rule_ref: RuleRef) -> Self {
        Element::RuleRef(rule_ref)
    }
}

// ============================================================================
// RULES & GRAMMARS
// ============================================================================

/// A speech command: a spec string plus the extras it refers to.
///
/// Rules are exported (directly invocable) unless marked otherwise.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Rule {
    id: RuleId,
    name: Name,
    spec: String,
    extras: IndexMap<Name, Element>,
    exported: bool,
}

impl Rule {
    /// A rule with no extras
    pub fn new(name: impl Into<Name>, spec: impl Into<String>) -> Self {
        Self {
            id: RuleId::new(),
            name: name.into(),
            spec: spec.into(),
            extras: IndexMap::new(),
            exported: true,
        }
    }

    /// A rule whose spec refers to the given extras by name
    pub fn compound<I, E>(name: impl Into<Name>, spec: impl Into<String>, extras: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Element>,
    {
        let mut rule = Self::new(name, spec);
        for extra in extras {
            rule = rule.with_extra(extra);
        }
        rule
    }

    /// A rule that is exactly one element, e.g. `<fruit_ref>`
    pub fn from_element(name: impl Into<Name>, element: impl Into<Element>) -> Self {
        let element = element.into();
        let spec = format!("<{}>", element.name());
        Self::new(name, spec).with_extra(element)
    }

    /// Add an extra, replacing any extra with the same name
    pub fn with_extra(mut self, extra: impl Into<Element>) -> Self {
        let extra = extra.into();
        self.extras.insert(extra.name().clone(), extra);
        self
    }

    pub fn exported(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn id(&self) -> RuleId {
        self.id
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn spec(&self) -> &str {
        &self.spec
    }

    pub fn extras(&self) -> &IndexMap<Name, Element> {
        &self.extras
    }

    pub fn extra(&self, name: &str) -> Option<&Element> {
        self.extras.get(name)
    }

    pub fn is_exported(&self) -> bool {
        self.exported
    }
}

/// An ordered collection of rules that are loaded together.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grammar {
    name: Name,
    rules: Vec<Rule>,
}

impl Grammar {
    pub fn new(name: impl Into<Name>) -> Self {
        Self {
            name: name.into(),
            rules: Vec::new(),
        }
    }

    pub fn add_rule(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    pub fn with_rule(mut self, rule: Rule) -> Self {
        self.add_rule(rule);
        self
    }

    pub fn name(&self) -> &Name {
        &self.name
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules.iter().find(|rule| rule.name() == name)
    }
}
