//! Reading compiled JSGF text back into expansions.

use super::expansion::{Expansion, VOID};
use super::matcher::RuleLookup;
use super::rules::JsgfRule;
use crate::base::Name;
use crate::parser::{ParseError, SpecNode, parse_declarations};

/// A rule read from grammar text; it has no source rule behind it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeclaredRule {
    name: Name,
    public: bool,
    expansion: Expansion,
}

impl JsgfRule for DeclaredRule {
    fn name(&self) -> &Name {
        &self.name
    }

    fn is_public(&self) -> bool {
        self.public
    }

    fn expansion(&self) -> &Expansion {
        &self.expansion
    }
}

impl RuleLookup for [DeclaredRule] {
    fn expansion_of(&self, name: &str) -> Option<&Expansion> {
        self.iter()
            .find(|rule| rule.name == name)
            .map(|rule| &rule.expansion)
    }
}

/// Parse every rule declaration in compiled grammar text
pub fn read_rules(text: &str) -> Result<Vec<DeclaredRule>, ParseError> {
    let file = parse_declarations(text)?;
    Ok(file
        .declarations
        .into_iter()
        .map(|declaration| DeclaredRule {
            name: declaration.name,
            public: declaration.public,
            expansion: to_expansion(declaration.expansion),
        })
        .collect())
}

/// Compile declared rules the way [`super::Grammar::compile`] does
pub fn compile_rules(rules: &[DeclaredRule]) -> String {
    let mut out = String::new();
    for rule in rules {
        out.push_str(&rule.compile());
        out.push('\n');
    }
    out
}

fn to_expansion(node: SpecNode) -> Expansion {
    match node {
        SpecNode::Literal(words) => Expansion::Literal(words),
        SpecNode::Sequence(children) => {
            Expansion::Sequence(children.into_iter().map(to_expansion).collect())
        }
        SpecNode::Optional(inner) => Expansion::optional(to_expansion(*inner)),
        SpecNode::Alternatives(branches) => {
            Expansion::AlternativeSet(branches.into_iter().map(to_expansion).collect())
        }
        SpecNode::Reference { name, .. } if name == VOID => Expansion::AlternativeSet(Vec::new()),
        SpecNode::Reference { name, .. } => Expansion::RuleRef(name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_rules() {
        let rules = read_rules(
            "#JSGF V1.0 UTF-8 en;\ngrammar food;\n<fruit> = (apple|pear);\npublic <eat> = eat [some] <fruit>;\n",
        )
        .unwrap();
        assert_eq!(rules.len(), 2);
        assert!(!rules[0].is_public());
        assert_eq!(rules[0].expansion(), &Expansion::alternatives_of(["apple", "pear"]));
        assert!(rules[1].is_public());
        assert_eq!(rules[1].name(), "eat");
    }

    #[test]
    fn test_void_reads_as_empty_set() {
        let rules = read_rules("<nothing> = <VOID>;").unwrap();
        assert_eq!(rules[0].expansion(), &Expansion::AlternativeSet(Vec::new()));
        assert_eq!(compile_rules(&rules), "<nothing> = <VOID>;\n");
    }

    #[test]
    fn test_match_read_rules() {
        let rules = read_rules("<fruit> = (apple|pear);\npublic <eat> = eat <fruit>;").unwrap();
        assert!(rules[1].expansion().matches_with("eat apple", rules.as_slice()));
        assert!(!rules[1].expansion().matches_with("eat", rules.as_slice()));
    }

    #[test]
    fn test_read_error() {
        assert!(read_rules("public <eat> = eat").is_err());
    }
}
