//! Source model fixtures.

use std::sync::Arc;

use voxgram::{Choice, Element, Grammar, List, ListRef, Rule, RuleRef};

pub fn fruit_list() -> Arc<List> {
    Arc::new(List::with_items("fruit", ["Apple", "Pear", "Blood Orange"]))
}

pub fn people() -> Choice {
    Choice::new("person", [("Bob", "Bob"), ("John", "John")])
}

pub fn greet_rule() -> Rule {
    Rule::compound("greet", "Hello <person>", [people()])
}

/// Two exported rules sharing one list, plus a hidden helper rule
pub fn shopping_grammar() -> Grammar {
    let fruit = fruit_list();
    Grammar::new("shopping")
        .with_rule(Rule::new("amount", "(one|two|a few)").exported(false))
        .with_rule(Rule::compound(
            "buy",
            "buy [<n>] <fruit>",
            [
                Element::from(Arc::clone(&fruit)),
                Element::from(RuleRef::new("n", "amount")),
            ],
        ))
        .with_rule(Rule::compound(
            "eat",
            "eat [the] <snack> (now|later)",
            [ListRef::new("snack", fruit)],
        ))
        .with_rule(greet_rule())
}
