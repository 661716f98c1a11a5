//! Logos-based lexer for the command specification language
//!
//! Fast tokenization using the logos crate. Nothing is skipped: whitespace
//! is significant inside `<name>` references, so the parser decides what
//! counts as trivia.

use super::syntax_kind::SyntaxKind;
use logos::Logos;
use text_size::{TextRange, TextSize};

/// A token with its kind, text, and position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub offset: TextSize,
}

impl Token<'_> {
    /// Source range covered by this token
    pub fn range(&self) -> TextRange {
        TextRange::at(self.offset, TextSize::of(self.text))
    }
}

/// Lexer wrapping the logos-generated tokenizer
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, LogosToken>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: LogosToken::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let logos_token = self.inner.next()?;
        let text = self.inner.slice();
        let offset = TextSize::new(self.inner.span().start as u32);

        let kind = match logos_token {
            Ok(t) => t.into(),
            Err(()) => SyntaxKind::ERROR,
        };

        Some(Token { kind, text, offset })
    }
}

/// Tokenize an entire string into a Vec
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    Lexer::new(input).collect()
}

/// Whether `text` lexes as exactly one word
pub fn is_word(text: &str) -> bool {
    let mut tokens = Lexer::new(text);
    matches!(
        (tokens.next(), tokens.next()),
        (Some(Token { kind: SyntaxKind::WORD, .. }), None)
    )
}

/// Logos token enum - maps to SyntaxKind
#[derive(Logos, Debug, Clone, Copy, PartialEq)]
pub enum LogosToken {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    #[regex(r"/\*([^*]|\*[^/])*\*/")]
    BlockComment,

    // =========================================================================
    // WORDS
    // =========================================================================
    #[regex(r"[\p{L}\p{N}_'.\-]+")]
    Word,

    #[regex(r"#JSGF[^;]*;")]
    Header,

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("|")]
    Pipe,
    #[token("<")]
    Lt,
    #[token(">")]
    Gt,
    #[token("=")]
    Eq,
    #[token(";")]
    Semicolon,
}

impl From<LogosToken> for SyntaxKind {
    fn from(token: LogosToken) -> Self {
        match token {
            LogosToken::Whitespace => SyntaxKind::WHITESPACE,
            LogosToken::LineComment => SyntaxKind::LINE_COMMENT,
            LogosToken::BlockComment => SyntaxKind::BLOCK_COMMENT,
            LogosToken::Word => SyntaxKind::WORD,
            LogosToken::Header => SyntaxKind::HEADER,
            LogosToken::LBracket => SyntaxKind::L_BRACKET,
            LogosToken::RBracket => SyntaxKind::R_BRACKET,
            LogosToken::LParen => SyntaxKind::L_PAREN,
            LogosToken::RParen => SyntaxKind::R_PAREN,
            LogosToken::Pipe => SyntaxKind::PIPE,
            LogosToken::Lt => SyntaxKind::LT,
            LogosToken::Gt => SyntaxKind::GT,
            LogosToken::Eq => SyntaxKind::EQ,
            LogosToken::Semicolon => SyntaxKind::SEMICOLON,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<SyntaxKind> {
        Lexer::new(input).map(|t| t.kind).collect()
    }

    #[test]
    fn test_lex_words() {
        let tokens: Vec<_> = Lexer::new("Hello world").collect();
        assert_eq!(tokens.len(), 3); // Hello, whitespace, world
        assert_eq!(tokens[0].kind, SyntaxKind::WORD);
        assert_eq!(tokens[1].kind, SyntaxKind::WHITESPACE);
        assert_eq!(tokens[2].kind, SyntaxKind::WORD);
        assert_eq!(tokens[2].text, "world");
        assert_eq!(tokens[2].offset, TextSize::new(6));
    }

    #[test]
    fn test_is_word() {
        assert!(is_word("don't"));
        assert!(is_word("e-mail"));
        assert!(is_word("café"));
        assert!(!is_word("C#"));
        assert!(!is_word("C++"));
        assert!(!is_word("two words"));
        assert!(!is_word("<x>"));
        assert!(!is_word(""));
    }

    #[test]
    fn test_lex_groups() {
        assert_eq!(
            kinds("[a](b|c)"),
            vec![
                SyntaxKind::L_BRACKET,
                SyntaxKind::WORD,
                SyntaxKind::R_BRACKET,
                SyntaxKind::L_PAREN,
                SyntaxKind::WORD,
                SyntaxKind::PIPE,
                SyntaxKind::WORD,
                SyntaxKind::R_PAREN,
            ]
        );
    }

    #[test]
    fn test_lex_reference() {
        assert_eq!(
            kinds("<person>"),
            vec![SyntaxKind::LT, SyntaxKind::WORD, SyntaxKind::GT]
        );
    }

    #[test]
    fn test_lex_word_punctuation() {
        let tokens = tokenize("don't e-mail v1.0");
        let words: Vec<_> = tokens
            .iter()
            .filter(|t| t.kind == SyntaxKind::WORD)
            .map(|t| t.text)
            .collect();
        assert_eq!(words, vec!["don't", "e-mail", "v1.0"]);
    }

    #[test]
    fn test_lex_invalid_character() {
        assert!(kinds("world#").contains(&SyntaxKind::ERROR));
    }

    #[test]
    fn test_lex_header_and_comment() {
        assert_eq!(
            kinds("#JSGF V1.0 UTF-8 en;\n// rules"),
            vec![
                SyntaxKind::HEADER,
                SyntaxKind::WHITESPACE,
                SyntaxKind::LINE_COMMENT
            ]
        );
    }

    #[test]
    fn test_token_range() {
        let tokens = tokenize("ab cd");
        assert_eq!(
            tokens[2].range(),
            TextRange::new(TextSize::new(3), TextSize::new(5))
        );
    }
}
