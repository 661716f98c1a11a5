//! Translation tests
//!
//! Source rules with lists, choices, nested rules and sibling references,
//! translated one at a time and as whole grammars.

mod helpers;

use std::sync::Arc;

use helpers::fixtures::{fruit_list, greet_rule, people, shopping_grammar};
use helpers::{compile_rule, compile_spec};
use rstest::rstest;
use voxgram::jsgf::{Expansion, HiddenRule, JsgfRule};
use voxgram::{Element, Grammar, List, ListRef, Rule, RuleRef, TranslationError, Translator};

// ============================================================================
// Bare specs
// ============================================================================

#[rstest]
#[case("Hello", "public <test> = hello;")]
#[case("Hello world", "public <test> = hello world;")]
#[case("OPEN the POD bay Doors", "public <test> = open the pod bay doors;")]
#[case("Hello [glorious] world", "public <test> = hello [glorious] world;")]
#[case("[[hello] world] hi", "public <test> = [[hello] world] hi;")]
#[case("(Yes|No)", "public <test> = (yes|no);")]
#[case("(only)", "public <test> = only;")]
fn test_bare_spec(#[case] spec: &str, #[case] expected: &str) {
    assert_eq!(compile_spec(spec).compile(), expected);
}

#[test]
fn test_hello_world_matching() {
    let rule = compile_spec("Hello world");
    assert!(rule.matches("hello world"));
    assert!(rule.matches("HELLO WORLD"));
    assert!(!rule.matches("goodbye world"));
    assert!(!rule.matches("hello"));
}

#[test]
fn test_optional_matching() {
    let rule = compile_spec("Hello [glorious] world");
    assert!(rule.matches("hello world"));
    assert!(rule.matches("hello glorious world"));
    assert!(!rule.matches("glorious world"));
}

// ============================================================================
// Extras
// ============================================================================

#[test]
fn test_choice_rule() {
    let rule = compile_rule(&greet_rule());
    assert_eq!(rule.compile(), "public <greet> = hello (bob|john);");
    assert!(rule.matches("hello Bob"));
    assert!(rule.matches("Hello JOHN"));
    assert!(!rule.matches("hello"));
}

#[test]
fn test_choice_value_lookup() {
    assert_eq!(people().value("bob").map(|v| v.as_str()), Some("Bob"));
}

#[test]
fn test_undefined_extra() {
    let mut translator = Translator::new();
    let err = translator
        .translate_rule(&Rule::new("greet", "Hello <person>"))
        .unwrap_err();
    assert!(err.is_translation());
    assert!(!err.is_parse());
    assert!(matches!(
        err.as_translation(),
        Some(TranslationError::UndefinedReference { name, .. }) if name == "person"
    ));
}

#[test]
fn test_parse_error_is_not_translation_error() {
    let mut translator = Translator::new();
    let err = translator
        .translate_rule(&Rule::compound("greet", "Hello <person", [people()]))
        .unwrap_err();
    assert!(err.is_parse());
    assert!(err.as_parse().is_some());
}

#[test]
fn test_translate_list() {
    let mut translator = Translator::new();
    let hidden = translator.translate_list(&List::with_items("fruit", ["apple"])).unwrap();
    let expected = HiddenRule::new("fruit", Expansion::AlternativeSet(vec![Expansion::literal("apple")]));
    assert_eq!(*hidden, expected);
}

#[test]
fn test_translate_list_ref() {
    let mut translator = Translator::new();
    let list = Arc::new(List::with_items("fruit", ["apple"]));
    let state = translator
        .translate_list_ref(&ListRef::new("fruit_ref", Arc::clone(&list)))
        .unwrap();

    assert_eq!(state.expansion(), &Expansion::rule_ref("fruit"));
    assert_eq!(
        state.dependencies().iter().map(|d| (**d).clone()).collect::<Vec<_>>(),
        vec![(*translator.translate_list(&list).unwrap()).clone()]
    );
}

#[test]
fn test_rule_referencing_list_ref() {
    let list = Arc::new(List::with_items("fruit", ["apple"]));
    let rule = Rule::from_element("fav_fruit", ListRef::new("fruit_ref", list));
    let mut translator = Translator::new();
    let translation = translator.translate_rule(&rule).unwrap();

    assert_eq!(translation.jsgf_rule.compile(), "public <fav_fruit> = <fruit>;");
    assert_eq!(translation.jsgf_rule.source(), rule.id());
    assert_eq!(translation.dependencies.len(), 1);
    assert_eq!(translation.dependencies[0].compile(), "<fruit> = apple;");
}

#[test]
fn test_multi_word_list_items() {
    let rule = compile_rule(&Rule::compound("eat", "eat <fruit>", [Element::from(fruit_list())]));
    assert!(rule.matches("eat blood orange"));
    assert!(rule.matches("EAT pear"));
    assert!(!rule.matches("eat blood"));
}

// ============================================================================
// Grammars
// ============================================================================

#[test]
fn test_shared_list_gives_one_hidden_rule() {
    let mut translator = Translator::new();
    let compiled = translator.translate_grammar(&shopping_grammar()).unwrap();

    let hidden: Vec<_> = compiled.hidden_rules().collect();
    assert_eq!(hidden.len(), 1);
    assert_eq!(hidden[0].name(), "fruit");

    let buy = compiled.rule("buy").and_then(|r| r.as_linked()).unwrap();
    let eat = compiled.rule("eat").and_then(|r| r.as_linked()).unwrap();
    assert!(Arc::ptr_eq(&buy.dependencies()[0], &eat.dependencies()[0]));
}

#[test]
fn test_grammar_layout() {
    let mut translator = Translator::new();
    let compiled = translator.translate_grammar(&shopping_grammar()).unwrap();
    assert_eq!(
        compiled.compile(),
        "<fruit> = (apple|pear|blood orange);\n\
         <amount> = (one|two|a few);\n\
         public <buy> = buy [<amount>] <fruit>;\n\
         public <eat> = eat [the] <fruit> (now|later);\n\
         public <greet> = hello (bob|john);\n"
    );
}

#[test]
fn test_exported_flag_mirrored() {
    let mut translator = Translator::new();
    let compiled = translator.translate_grammar(&shopping_grammar()).unwrap();
    let public: Vec<&str> = compiled
        .linked_rules()
        .filter(|r| r.is_public())
        .map(|r| r.name().as_str())
        .collect();
    assert_eq!(public, vec!["buy", "eat", "greet"]);
}

#[test]
fn test_linked_rules_point_back_to_sources() {
    let grammar = shopping_grammar();
    let mut translator = Translator::new();
    let compiled = translator.translate_grammar(&grammar).unwrap();
    for (source, linked) in grammar.rules().iter().zip(compiled.linked_rules()) {
        assert_eq!(linked.source(), source.id());
    }
}

#[test]
fn test_repeated_translation_is_stable() {
    let grammar = shopping_grammar();
    let mut translator = Translator::new();
    let first = translator.translate_grammar(&grammar).unwrap();
    let second = translator.translate_grammar(&grammar).unwrap();
    assert_eq!(first, second);
    assert_eq!(first.compile(), second.compile());
}

#[rstest]
#[case::cycle(
    Grammar::new("g")
        .with_rule(Rule::compound("a", "<b>", [RuleRef::new("b", "b")]))
        .with_rule(Rule::compound("b", "<c>", [RuleRef::new("c", "c")]))
        .with_rule(Rule::compound("c", "<a>", [RuleRef::new("a", "a")]))
)]
#[case::duplicate(
    Grammar::new("g")
        .with_rule(Rule::new("a", "one"))
        .with_rule(Rule::new("a", "two"))
)]
#[case::missing_sibling(
    Grammar::new("g").with_rule(Rule::compound("a", "<b>", [RuleRef::new("b", "b")]))
)]
fn test_grammar_translation_errors(#[case] grammar: Grammar) {
    let mut translator = Translator::new();
    let err = translator.translate_grammar(&grammar).unwrap_err();
    assert!(err.is_translation(), "unexpected error: {}", err);
}

#[test]
fn test_cycle_reports_path() {
    let grammar = Grammar::new("g")
        .with_rule(Rule::compound("a", "<b>", [RuleRef::new("b", "b")]))
        .with_rule(Rule::compound("b", "<a>", [RuleRef::new("a", "a")]));
    let mut translator = Translator::new();
    let err = translator.translate_grammar(&grammar).unwrap_err();
    assert_eq!(err.to_string(), "Translation error: Rule dependency cycle: <a> -> <b> -> <a>");
}
