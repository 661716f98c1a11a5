//! Recursive descent parser for command specifications
//!
//! ```text
//! spec         = alternatives EOF
//! alternatives = sequence ('|' sequence)*
//! sequence     = item+
//! item         = WORD | '[' alternatives ']' | '(' alternatives ')' | reference
//! reference    = '<' NAME '>'            (no whitespace inside)
//! ```
//!
//! Unlike an editor parser there is no error recovery: a malformed spec is
//! rejected at the first offending token.

use text_size::{TextRange, TextSize};

use super::ast::SpecNode;
use super::errors::{ErrorCode, ParseContext, ParseError, format_context_error};
use super::lexer::{Lexer, Token};
use super::syntax_kind::SyntaxKind;
use crate::base::{Name, is_valid_name};

/// Parse a command specification into a [`SpecNode`] tree
pub fn parse(input: &str) -> Result<SpecNode, ParseError> {
    let tokens: Vec<_> = Lexer::new(input).collect();
    let mut parser = Parser::new(&tokens, input);
    parser.parse_spec()
}

/// The parser state
pub(super) struct Parser<'a> {
    tokens: &'a [Token<'a>],
    pos: usize,
    end: TextSize,
    /// Open groups, innermost last, with the range of their opening token
    contexts: Vec<(ParseContext, TextRange)>,
}

impl<'a> Parser<'a> {
    pub(super) fn new(tokens: &'a [Token<'a>], input: &str) -> Self {
        Self {
            tokens,
            pos: 0,
            end: TextSize::of(input),
            contexts: Vec::new(),
        }
    }

    // =========================================================================
    // Token inspection
    // =========================================================================

    fn current(&self) -> Option<&Token<'a>> {
        self.tokens.get(self.pos)
    }

    pub(super) fn current_kind(&self) -> SyntaxKind {
        self.current().map(|t| t.kind).unwrap_or(SyntaxKind::EOF)
    }

    pub(super) fn current_text(&self) -> &'a str {
        self.current().map(|t| t.text).unwrap_or("")
    }

    pub(super) fn current_range(&self) -> TextRange {
        self.current()
            .map(Token::range)
            .unwrap_or_else(|| TextRange::empty(self.end))
    }

    pub(super) fn at(&self, kind: SyntaxKind) -> bool {
        self.current_kind() == kind
    }

    /// Check for a specific bare word, e.g. `public`
    pub(super) fn at_word(&self, word: &str) -> bool {
        self.at(SyntaxKind::WORD) && self.current_text() == word
    }

    pub(super) fn at_eof(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    fn context(&self) -> (ParseContext, Option<TextRange>) {
        self.contexts
            .last()
            .map(|(ctx, range)| (*ctx, Some(*range)))
            .unwrap_or((ParseContext::TopLevel, None))
    }

    // =========================================================================
    // Token consumption
    // =========================================================================

    pub(super) fn bump(&mut self) -> Option<Token<'a>> {
        let token = self.current().cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub(super) fn skip_whitespace(&mut self) {
        while self.at(SyntaxKind::WHITESPACE) {
            self.pos += 1;
        }
    }

    pub(super) fn skip_trivia(&mut self) {
        while self.current().map(|t| t.kind.is_trivia()).unwrap_or(false) {
            self.pos += 1;
        }
    }

    pub(super) fn with_context<T>(
        &mut self,
        context: ParseContext,
        opened: TextRange,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.contexts.push((context, opened));
        let result = f(self);
        self.contexts.pop();
        result
    }

    // =========================================================================
    // Error handling
    // =========================================================================

    /// Error for a token that cannot appear where it was found
    pub(super) fn unexpected_token(&self) -> ParseError {
        let kind = self.current_kind();
        let (context, _) = self.context();
        let code = match kind {
            SyntaxKind::ERROR => ErrorCode::E0101,
            SyntaxKind::GT => ErrorCode::E0303,
            SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN => ErrorCode::E0205,
            _ => ErrorCode::E0901,
        };
        let found = match kind {
            SyntaxKind::ERROR | SyntaxKind::WORD => format!("'{}'", self.current_text()),
            other => other.display_name().to_string(),
        };
        let mut builder = format_context_error(&found, context, code).range(self.current_range());
        if !self.at_eof() {
            builder = builder.token(self.current_text());
        }
        match kind {
            SyntaxKind::ERROR => builder
                .hint("words may only contain letters, digits, '_', ''', '.' and '-'")
                .build(),
            SyntaxKind::GT => builder.hint("remove the extra '>'").build(),
            _ => builder.build(),
        }
    }

    /// Error for a group or declaration that reached end of input
    fn unclosed(&self, context: ParseContext, opened: Option<TextRange>) -> ParseError {
        let (code, message, hint) = match context {
            ParseContext::OptionalGroup => (
                ErrorCode::E0204,
                "unclosed '[' in optional group",
                "add ']' to close the optional group",
            ),
            ParseContext::AlternativeGroup => (
                ErrorCode::E0203,
                "unclosed '(' in alternative group",
                "add ')' to close the alternative group",
            ),
            ParseContext::RuleDeclaration => (
                ErrorCode::E0403,
                "missing ';' after rule declaration",
                "end every rule with ';'",
            ),
            ParseContext::Reference => (
                ErrorCode::E0302,
                "unclosed reference at end of input",
                "write references as '<name>'",
            ),
            ParseContext::TopLevel => (
                ErrorCode::E0999,
                "end of input in unexpected context",
                "this is a parser bug",
            ),
        };
        let mut builder = ParseError::builder(code)
            .message(message)
            .range(self.current_range())
            .hint(hint);
        if let Some(opened) = opened {
            builder = builder.related("opened here", opened);
        }
        builder.build()
    }

    /// Validate the token that ended a sequence
    ///
    /// `|` and the closer of the innermost open group are fine; anything else
    /// is an unbalanced, mismatched or stray delimiter.
    fn check_terminator(&self) -> Result<(), ParseError> {
        let kind = self.current_kind();
        let (context, opened) = self.context();
        if kind == SyntaxKind::PIPE || context.closing_kind() == Some(kind) {
            return Ok(());
        }
        match kind {
            SyntaxKind::EOF if context == ParseContext::TopLevel => Ok(()),
            SyntaxKind::EOF => Err(self.unclosed(context, opened)),
            SyntaxKind::R_BRACKET | SyntaxKind::R_PAREN => match (context, opened) {
                (ParseContext::OptionalGroup | ParseContext::AlternativeGroup, Some(opened)) => {
                    Err(ParseError::builder(ErrorCode::E0207)
                        .message(format!(
                            "mismatched {} {}",
                            kind.display_name(),
                            context.description()
                        ))
                        .range(self.current_range())
                        .token(self.current_text())
                        .related("group opened here", opened)
                        .build())
                }
                _ => Err(self.unexpected_token()),
            },
            _ => Err(self.unexpected_token()),
        }
    }

    fn empty_error(&self) -> ParseError {
        let (context, opened) = self.context();
        let message = match context {
            ParseContext::OptionalGroup => "empty optional group",
            ParseContext::AlternativeGroup => "empty alternative in alternative group",
            ParseContext::RuleDeclaration => "empty rule expansion",
            ParseContext::TopLevel | ParseContext::Reference => "empty alternative",
        };
        let mut builder = ParseError::builder(ErrorCode::E0206)
            .message(message)
            .range(self.current_range())
            .hint("groups and alternatives must contain at least one word");
        if !self.at_eof() {
            builder = builder.token(self.current_text());
        }
        if let Some(opened) = opened {
            builder = builder.related("opened here", opened);
        }
        builder.build()
    }

    // =========================================================================
    // Grammar rules
    // =========================================================================

    /// spec = alternatives EOF
    fn parse_spec(&mut self) -> Result<SpecNode, ParseError> {
        self.skip_whitespace();
        if self.at_eof() {
            return Err(ParseError::builder(ErrorCode::E0208)
                .range(self.current_range())
                .build());
        }
        let node = self.parse_alternatives()?;
        if !self.at_eof() {
            return Err(self.unexpected_token());
        }
        Ok(node)
    }

    /// alternatives = sequence ('|' sequence)*
    pub(super) fn parse_alternatives(&mut self) -> Result<SpecNode, ParseError> {
        let mut branches = vec![self.parse_sequence()?];
        while self.at(SyntaxKind::PIPE) {
            self.bump();
            branches.push(self.parse_sequence()?);
        }
        Ok(SpecNode::alternatives(branches))
    }

    /// sequence = item+
    ///
    /// Adjacent words fold into a single literal.
    fn parse_sequence(&mut self) -> Result<SpecNode, ParseError> {
        let mut items = Vec::new();
        let mut words: Vec<Name> = Vec::new();

        loop {
            self.skip_whitespace();
            match self.current_kind() {
                SyntaxKind::WORD => {
                    words.push(Name::new(self.current_text()));
                    self.bump();
                }
                SyntaxKind::L_BRACKET | SyntaxKind::L_PAREN | SyntaxKind::LT => {
                    if !words.is_empty() {
                        items.push(SpecNode::Literal(std::mem::take(&mut words)));
                    }
                    items.push(self.parse_item()?);
                }
                SyntaxKind::PIPE
                | SyntaxKind::R_BRACKET
                | SyntaxKind::R_PAREN
                | SyntaxKind::SEMICOLON
                | SyntaxKind::EOF => break,
                _ => return Err(self.unexpected_token()),
            }
        }

        if !words.is_empty() {
            items.push(SpecNode::Literal(words));
        }
        self.check_terminator()?;
        if items.is_empty() {
            return Err(self.empty_error());
        }
        Ok(SpecNode::sequence(items))
    }

    /// item = '[' alternatives ']' | '(' alternatives ')' | reference
    fn parse_item(&mut self) -> Result<SpecNode, ParseError> {
        match self.current_kind() {
            SyntaxKind::L_BRACKET => {
                let inner = self.parse_group(ParseContext::OptionalGroup)?;
                Ok(SpecNode::Optional(Box::new(inner)))
            }
            SyntaxKind::L_PAREN => self.parse_group(ParseContext::AlternativeGroup),
            SyntaxKind::LT => {
                let (name, range) = self.parse_reference()?;
                Ok(SpecNode::Reference { name, range })
            }
            _ => Err(self.unexpected_token()),
        }
    }

    fn parse_group(&mut self, context: ParseContext) -> Result<SpecNode, ParseError> {
        let opened = self.current_range();
        self.bump();
        let inner = self.with_context(context, opened, |p| p.parse_alternatives())?;
        // check_terminator guarantees we stopped on this group's closer
        self.bump();
        Ok(inner)
    }

    /// reference = '<' NAME '>'
    pub(super) fn parse_reference(&mut self) -> Result<(Name, TextRange), ParseError> {
        let opened = self.current_range();
        self.bump();
        let name = self.with_context(ParseContext::Reference, opened, |p| p.parse_reference_name())?;
        // parse_reference_name guarantees we stopped on '>'
        let closed = self.current_range();
        self.bump();
        Ok((name, opened.cover(closed)))
    }

    fn parse_reference_name(&mut self) -> Result<Name, ParseError> {
        let (context, opened) = self.context();
        match self.current_kind() {
            SyntaxKind::WORD => {}
            SyntaxKind::EOF => return Err(self.unclosed(context, opened)),
            other => {
                let mut builder = format_context_error(other.display_name(), context, ErrorCode::E0301)
                    .range(self.current_range())
                    .token(self.current_text())
                    .hint("write references as '<name>' with no spaces or brackets inside");
                if let Some(opened) = opened {
                    builder = builder.related("reference opened here", opened);
                }
                return Err(builder.build());
            }
        }

        let name_text = self.current_text();
        if !is_valid_name(name_text) {
            return Err(ParseError::builder(ErrorCode::E0304)
                .message(format!("'{}' is not a valid reference name", name_text))
                .range(self.current_range())
                .token(name_text)
                .build());
        }
        self.bump();

        if !self.at(SyntaxKind::GT) {
            let found = self.current_kind().display_name();
            let mut builder = ParseError::builder(ErrorCode::E0302)
                .message(format!(
                    "expected '>' to close reference, found {} {}",
                    found,
                    context.description()
                ))
                .range(self.current_range())
                .hint("write references as '<name>'");
            if let Some(opened) = opened {
                builder = builder.related("reference opened here", opened);
            }
            if !self.at_eof() {
                builder = builder.token(self.current_text());
            }
            return Err(builder.build());
        }
        Ok(Name::new(name_text))
    }
}
