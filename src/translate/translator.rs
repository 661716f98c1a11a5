//! Translator and translation sessions.

use std::sync::Arc;

use indexmap::IndexMap;
use rustc_hash::{FxHashMap, FxHashSet};
use smol_str::SmolStr;

use super::error::TranslationError;
use super::state::{RuleTranslation, TranslationState};
use crate::base::{Name, is_valid_name, normalize_words};
use crate::error::Result;
use crate::jsgf::{self, Expansion, GrammarRule, HiddenRule, JsgfRule, LinkedRule, RuleLookup};
use crate::parser::{self, ParseError, SpecNode};
use crate::source::{Choice, Element, Grammar, List, ListRef, Rule, RuleRef};

/// Translator configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatorOptions {
    /// Deepest allowed nesting of inline rules
    pub max_depth: usize,
    /// Reuse hidden list rules across calls while the list is unchanged
    pub cache_lists: bool,
}

impl Default for TranslatorOptions {
    fn default() -> Self {
        Self {
            max_depth: 64,
            cache_lists: true,
        }
    }
}

struct CachedList {
    items: Vec<SmolStr>,
    rule: Arc<HiddenRule>,
}

/// Turns source rules and grammars into JSGF.
///
/// The only state is the list cache, so one translator can serve many
/// calls. Each call runs as its own pass unless several are grouped with
/// [`Translator::session`].
#[derive(Default)]
pub struct Translator {
    options: TranslatorOptions,
    lists: FxHashMap<Name, CachedList>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: TranslatorOptions) -> Self {
        Self {
            options,
            lists: FxHashMap::default(),
        }
    }

    pub fn options(&self) -> &TranslatorOptions {
        &self.options
    }

    /// Parse a spec string
    pub fn translate(&self, text: &str) -> Result<SpecNode, ParseError> {
        parser::parse(text)
    }

    /// The hidden rule for a list: its items as alternatives, in order
    ///
    /// While the list's items are unchanged, repeated calls return the same
    /// instance.
    pub fn translate_list(&mut self, list: &List) -> Result<Arc<HiddenRule>, TranslationError> {
        if !self.options.cache_lists {
            return Ok(Arc::new(list_rule(list)?));
        }

        match self.lists.get(list.name()) {
            Some(cached) if cached.items == list.items() => {
                tracing::debug!("list cache hit: {}", list.name());
                return Ok(Arc::clone(&cached.rule));
            }
            Some(_) => tracing::debug!("list cache invalidated: {}", list.name()),
            None => tracing::debug!("list cache miss: {}", list.name()),
        }

        let rule = Arc::new(list_rule(list)?);
        self.lists.insert(
            list.name().clone(),
            CachedList {
                items: list.items().to_vec(),
                rule: Arc::clone(&rule),
            },
        );
        Ok(rule)
    }

    /// `<list>`, with the list's hidden rule as a new dependency
    pub fn translate_list_ref(
        &mut self,
        list_ref: &ListRef,
    ) -> Result<TranslationState, TranslationError> {
        self.session().translate_list_ref(list_ref)
    }

    pub fn translate_rule(&mut self, rule: &Rule) -> Result<RuleTranslation> {
        self.session().translate_rule(rule)
    }

    /// Translate an ad-hoc rule that has no extras
    pub fn translate_to_rule(
        &mut self,
        name: impl Into<Name>,
        spec: impl Into<String>,
        exported: bool,
    ) -> Result<LinkedRule> {
        let rule = Rule::new(name, spec).exported(exported);
        Ok(self.translate_rule(&rule)?.jsgf_rule)
    }

    /// Translate every rule of a grammar in one pass
    ///
    /// The result lists each hidden rule once, then the linked rules in
    /// source order.
    pub fn translate_grammar(&mut self, grammar: &Grammar) -> Result<jsgf::Grammar> {
        self.clear_cache();

        let mut names = FxHashSet::default();
        for rule in grammar.rules() {
            if !names.insert(rule.name().clone()) {
                return Err(TranslationError::DuplicateRule {
                    name: rule.name().clone(),
                }
                .into());
            }
        }
        check_cycles(grammar)?;

        let mut session = Session::new(self, Some(names));
        let mut linked = Vec::with_capacity(grammar.rules().len());
        for rule in grammar.rules() {
            linked.push(session.translate_rule(rule)?.jsgf_rule);
        }
        let hidden: Vec<Arc<HiddenRule>> = session.hidden_rules().cloned().collect();

        if let Some(siblings) = &session.siblings {
            if let Some(clash) = hidden.iter().find(|rule| siblings.contains(rule.name())) {
                return Err(TranslationError::NameCollision {
                    name: clash.name().clone(),
                }
                .into());
            }
        }

        let linked = link_siblings(linked, &hidden);
        let mut compiled = jsgf::Grammar::new(grammar.name().clone());
        for rule in &hidden {
            compiled.push(GrammarRule::Hidden(Arc::clone(rule)));
        }
        for rule in linked {
            compiled.push(GrammarRule::Linked(rule));
        }

        tracing::info!(
            "translated grammar '{}': {} hidden, {} linked rules",
            grammar.name(),
            hidden.len(),
            grammar.rules().len()
        );
        Ok(compiled)
    }

    /// Open a pass in which each hidden rule is a new dependency only once
    pub fn session(&mut self) -> Session<'_> {
        Session::new(self, None)
    }

    pub fn clear_cache(&mut self) {
        self.lists.clear();
    }

    /// Number of lists currently cached
    pub fn cached_lists(&self) -> usize {
        self.lists.len()
    }
}

/// Give each linked rule the sibling rules it reaches, so it matches on its own
fn link_siblings(linked: Vec<LinkedRule>, hidden: &[Arc<HiddenRule>]) -> Vec<LinkedRule> {
    let expansions: FxHashMap<Name, Expansion> = hidden
        .iter()
        .map(|rule| (rule.name().clone(), rule.expansion().clone()))
        .chain(
            linked
                .iter()
                .map(|rule| (JsgfRule::name(rule).clone(), JsgfRule::expansion(rule).clone())),
        )
        .collect();

    linked
        .into_iter()
        .map(|rule| {
            let siblings = reachable_siblings(&rule, &expansions);
            rule.with_siblings(siblings)
        })
        .collect()
}

fn reachable_siblings(rule: &LinkedRule, expansions: &FxHashMap<Name, Expansion>) -> Vec<(Name, Expansion)> {
    let mut siblings = Vec::new();
    let mut seen: FxHashSet<&Name> = FxHashSet::default();
    let mut pending = JsgfRule::expansion(rule).rule_refs();
    while let Some(name) = pending.pop() {
        if !seen.insert(name) || rule.expansion_of(name).is_some() {
            continue;
        }
        if let Some(expansion) = expansions.get(name) {
            siblings.push((name.clone(), expansion.clone()));
            pending.extend(expansion.rule_refs());
        }
    }
    siblings
}

fn list_rule(list: &List) -> Result<HiddenRule, TranslationError> {
    check_name(list.name())?;
    let expansion = alternatives(list.items().iter().map(SmolStr::as_str), list.name())?;
    Ok(HiddenRule::new(list.name().clone(), expansion))
}

/// Names become `<name>` in the compiled grammar
fn check_name(name: &Name) -> Result<(), TranslationError> {
    if name.as_str() == jsgf::NULL || name.as_str() == jsgf::VOID {
        return Err(TranslationError::ReservedName { name: name.clone() });
    }
    if !is_valid_name(name) {
        return Err(TranslationError::InvalidName { name: name.clone() });
    }
    Ok(())
}

/// One literal per phrase; phrases without words are dropped
///
/// Every word must read back as a single spec word, otherwise the compiled
/// grammar could not be parsed again.
fn alternatives<'a>(
    phrases: impl Iterator<Item = &'a str>,
    element: &Name,
) -> Result<Expansion, TranslationError> {
    let mut branches = Vec::new();
    for phrase in phrases {
        let words = normalize_words(phrase);
        if words.iter().any(|word| !parser::is_word(word)) {
            return Err(TranslationError::InvalidPhrase {
                phrase: SmolStr::new(phrase),
                element: element.clone(),
            });
        }
        if !words.is_empty() {
            branches.push(Expansion::Literal(words));
        }
    }
    Ok(Expansion::AlternativeSet(branches))
}

/// One translation pass.
///
/// Tracks the hidden rules already produced so each appears as a new
/// dependency once. Inside [`Translator::translate_grammar`] it also knows
/// the sibling rules that `RuleRef` extras may point at.
pub struct Session<'t> {
    translator: &'t mut Translator,
    hidden: IndexMap<Name, Arc<HiddenRule>>,
    siblings: Option<FxHashSet<Name>>,
}

impl<'t> Session<'t> {
    fn new(translator: &'t mut Translator, siblings: Option<FxHashSet<Name>>) -> Self {
        Self {
            translator,
            hidden: IndexMap::new(),
            siblings,
        }
    }

    /// Hidden rules produced so far, in first-seen order
    pub fn hidden_rules(&self) -> impl Iterator<Item = &Arc<HiddenRule>> {
        self.hidden.values()
    }

    pub fn translate_list(&mut self, list: &List) -> Result<Arc<HiddenRule>, TranslationError> {
        self.translator.translate_list(list)
    }

    pub fn translate_list_ref(
        &mut self,
        list_ref: &ListRef,
    ) -> Result<TranslationState, TranslationError> {
        self.list_state(list_ref.list())
    }

    pub fn translate_rule(&mut self, rule: &Rule) -> Result<RuleTranslation> {
        tracing::trace!("translating rule '{}'", rule.name());
        check_name(rule.name())?;
        let (expansion, dependencies) = self.rule_state(rule, 0)?.into_parts();

        let mut referenced: IndexMap<&Name, Arc<HiddenRule>> = IndexMap::new();
        for name in expansion.rule_refs() {
            if let Some(hidden) = self.hidden.get(name) {
                referenced.entry(name).or_insert_with(|| Arc::clone(hidden));
            }
        }
        let referenced = referenced.into_values().collect();

        let jsgf_rule = LinkedRule::new(rule.name().clone(), rule.is_exported(), expansion, rule.id())
            .with_dependencies(referenced);
        Ok(RuleTranslation {
            jsgf_rule,
            dependencies,
        })
    }

    fn rule_state(&mut self, rule: &Rule, depth: usize) -> Result<TranslationState> {
        let max_depth = self.translator.options.max_depth;
        if depth > max_depth {
            return Err(TranslationError::DepthExceeded {
                rule: rule.name().clone(),
                max_depth,
            }
            .into());
        }
        let spec = parser::parse(rule.spec())?;
        self.node_state(&spec, rule, depth)
    }

    fn node_state(&mut self, node: &SpecNode, rule: &Rule, depth: usize) -> Result<TranslationState> {
        Ok(match node {
            SpecNode::Literal(words) => TranslationState::new(Expansion::Literal(
                words.iter().map(|word| SmolStr::new(word.to_lowercase())).collect(),
            )),
            SpecNode::Sequence(children) => {
                let states = self.node_states(children, rule, depth)?;
                TranslationState::merge(states, Expansion::Sequence)
            }
            SpecNode::Optional(inner) => self.node_state(inner, rule, depth)?.map(Expansion::optional),
            SpecNode::Alternatives(branches) => {
                let states = self.node_states(branches, rule, depth)?;
                TranslationState::merge(states, Expansion::AlternativeSet)
            }
            SpecNode::Reference { name, .. } => self.reference_state(name, rule, depth)?,
        })
    }

    fn node_states(
        &mut self,
        nodes: &[SpecNode],
        rule: &Rule,
        depth: usize,
    ) -> Result<Vec<TranslationState>> {
        nodes
            .iter()
            .map(|node| self.node_state(node, rule, depth))
            .collect()
    }

    fn reference_state(&mut self, name: &Name, rule: &Rule, depth: usize) -> Result<TranslationState> {
        let Some(element) = rule.extra(name) else {
            return Err(TranslationError::undefined_reference(name.clone(), rule.name().clone()).into());
        };
        match element {
            Element::List(list) => Ok(self.list_state(list)?),
            Element::ListRef(list_ref) => Ok(self.translate_list_ref(list_ref)?),
            Element::Choice(choice) => Ok(choice_state(choice)?),
            Element::Rule(nested) => self.rule_state(nested, depth + 1),
            Element::RuleRef(rule_ref) => Ok(self.sibling_state(rule_ref, rule)?),
        }
    }

    fn list_state(&mut self, list: &List) -> Result<TranslationState, TranslationError> {
        let rule = self.translator.translate_list(list)?;
        let expansion = Expansion::RuleRef(list.name().clone());

        if let Some(existing) = self.hidden.get(list.name()) {
            if existing.expansion() != rule.expansion() {
                return Err(TranslationError::ConflictingList {
                    name: list.name().clone(),
                });
            }
            return Ok(TranslationState::new(expansion));
        }

        self.hidden.insert(list.name().clone(), Arc::clone(&rule));
        Ok(TranslationState::new(expansion).with_dependency(rule))
    }

    fn sibling_state(
        &self,
        rule_ref: &RuleRef,
        rule: &Rule,
    ) -> Result<TranslationState, TranslationError> {
        match &self.siblings {
            Some(siblings) if siblings.contains(rule_ref.target()) => {
                Ok(TranslationState::new(Expansion::RuleRef(rule_ref.target().clone())))
            }
            _ => Err(TranslationError::undefined_reference(
                rule_ref.target().clone(),
                rule.name().clone(),
            )),
        }
    }
}

fn choice_state(choice: &Choice) -> Result<TranslationState, TranslationError> {
    let expansion = alternatives(choice.phrases().map(SmolStr::as_str), choice.name())?;
    Ok(TranslationState::new(expansion))
}

// ============================================================================
// CYCLE DETECTION
// ============================================================================

/// Sibling rules a rule's spec reaches through `RuleRef` extras, including
/// through nested rules. Extras the spec never mentions are not edges.
fn sibling_targets<'a>(rule: &'a Rule, targets: &mut Vec<&'a Name>) -> Result<(), ParseError> {
    let spec = parser::parse(rule.spec())?;
    for name in spec.references() {
        match rule.extra(name) {
            Some(Element::RuleRef(rule_ref)) => targets.push(rule_ref.target()),
            Some(Element::Rule(nested)) => sibling_targets(nested, targets)?,
            Some(Element::List(_) | Element::ListRef(_) | Element::Choice(_)) | None => {}
        }
    }
    Ok(())
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Visit {
    InProgress,
    Done,
}

fn check_cycles(grammar: &Grammar) -> Result<()> {
    let mut edges: FxHashMap<&Name, Vec<&Name>> = FxHashMap::default();
    for rule in grammar.rules() {
        let mut targets = Vec::new();
        sibling_targets(rule, &mut targets)?;
        edges.insert(rule.name(), targets);
    }

    let mut visits: FxHashMap<&Name, Visit> = FxHashMap::default();
    let mut path = Vec::new();
    for rule in grammar.rules() {
        visit(rule.name(), &edges, &mut visits, &mut path)?;
    }
    Ok(())
}

fn visit<'a>(
    name: &'a Name,
    edges: &FxHashMap<&'a Name, Vec<&'a Name>>,
    visits: &mut FxHashMap<&'a Name, Visit>,
    path: &mut Vec<&'a Name>,
) -> Result<(), TranslationError> {
    match visits.get(name) {
        Some(Visit::Done) => return Ok(()),
        Some(Visit::InProgress) => {
            let start = path.iter().position(|entry| *entry == name).unwrap_or(0);
            let mut cycle: Vec<Name> = path[start..].iter().map(|entry| (*entry).clone()).collect();
            cycle.push(name.clone());
            return Err(TranslationError::Cycle { path: cycle });
        }
        None => {}
    }
    // Targets outside the grammar are reported during translation.
    let Some(targets) = edges.get(name) else {
        return Ok(());
    };

    visits.insert(name, Visit::InProgress);
    path.push(name);
    for &target in targets {
        visit(target, edges, visits, path)?;
    }
    path.pop();
    visits.insert(name, Visit::Done);
    Ok(())
}
