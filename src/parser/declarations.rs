//! Reader for compiled JSGF rule declarations
//!
//! ```text
//! file        = HEADER? ('grammar' WORD ';')? declaration*
//! declaration = 'public'? '<' NAME '>' '=' alternatives ';'
//! ```
//!
//! Expansions reuse the spec grammar: compiled JSGF text is a subset of the
//! spec language once the `<name> =` prefix and trailing `;` are stripped.
//! Comments are allowed between declarations.

use text_size::TextRange;

use super::ast::SpecNode;
use super::errors::{ErrorCode, ParseContext, ParseError};
use super::lexer::Lexer;
use super::parser::Parser;
use super::syntax_kind::SyntaxKind;
use crate::base::Name;

/// One `[public] <name> = expansion;` line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub name: Name,
    pub public: bool,
    pub expansion: SpecNode,
    pub range: TextRange,
}

/// A parsed grammar document
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeclarationFile {
    /// Name from the `grammar <name>;` statement, if present
    pub grammar_name: Option<Name>,
    pub declarations: Vec<Declaration>,
}

/// Parse compiled grammar text into rule declarations
pub fn parse_declarations(input: &str) -> Result<DeclarationFile, ParseError> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input);
    parser.parse_declaration_file()
}

impl Parser<'_> {
    fn parse_declaration_file(&mut self) -> Result<DeclarationFile, ParseError> {
        self.skip_trivia();
        if self.at(SyntaxKind::HEADER) {
            self.bump();
            self.skip_trivia();
        }

        let grammar_name = if self.at_word("grammar") {
            Some(self.parse_grammar_statement()?)
        } else {
            None
        };

        let mut declarations = Vec::new();
        loop {
            self.skip_trivia();
            if self.at_eof() {
                break;
            }
            declarations.push(self.parse_declaration()?);
        }

        Ok(DeclarationFile {
            grammar_name,
            declarations,
        })
    }

    /// 'grammar' WORD ';'
    fn parse_grammar_statement(&mut self) -> Result<Name, ParseError> {
        self.bump();
        self.skip_trivia();
        if !self.at(SyntaxKind::WORD) {
            return Err(ParseError::builder(ErrorCode::E0404)
                .message("expected a grammar name after 'grammar'")
                .range(self.current_range())
                .build());
        }
        let name = Name::new(self.current_text());
        self.bump();
        self.skip_trivia();
        if !self.at(SyntaxKind::SEMICOLON) {
            return Err(ParseError::builder(ErrorCode::E0403)
                .message("missing ';' after grammar statement")
                .range(self.current_range())
                .build());
        }
        self.bump();
        Ok(name)
    }

    /// 'public'? '<' NAME '>' '=' alternatives ';'
    fn parse_declaration(&mut self) -> Result<Declaration, ParseError> {
        let start = self.current_range();
        let public = self.at_word("public");
        if public {
            self.bump();
            self.skip_trivia();
        }

        if !self.at(SyntaxKind::LT) {
            let mut builder = ParseError::builder(ErrorCode::E0401)
                .message(format!(
                    "expected '<name>' to start a rule declaration, found {}",
                    self.current_kind().display_name()
                ))
                .range(self.current_range());
            if !self.at_eof() {
                builder = builder.token(self.current_text());
            }
            return Err(builder.build());
        }
        let (name, _) = self.parse_reference()?;

        self.skip_trivia();
        if !self.at(SyntaxKind::EQ) {
            return Err(ParseError::builder(ErrorCode::E0402)
                .message(format!("expected '=' after rule name <{}>", name))
                .range(self.current_range())
                .build());
        }
        let eq = self.current_range();
        self.bump();

        let expansion =
            self.with_context(ParseContext::RuleDeclaration, eq, |p| p.parse_alternatives())?;
        let end = self.current_range();
        // check_terminator guarantees we stopped on ';'
        self.bump();

        Ok(Declaration {
            name,
            public,
            expansion,
            range: start.cover(end),
        })
    }
}
