//! Token kinds for the command specification language
//!
//! The same kinds cover both the spec DSL (`hello [there] <name>`) and the
//! compiled JSGF rule declarations read back by the declaration reader
//! (`public <greet> = hello (bob|john);`).

/// All token kinds produced by the lexer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
#[allow(non_camel_case_types)]
pub enum SyntaxKind {
    // =========================================================================
    // TRIVIA
    // =========================================================================
    WHITESPACE = 0,
    LINE_COMMENT,
    BLOCK_COMMENT,

    // =========================================================================
    // WORDS
    // =========================================================================
    WORD,   // hello, don't, v1.0
    HEADER, // #JSGF V1.0 UTF-8 en;

    // =========================================================================
    // PUNCTUATION
    // =========================================================================
    L_BRACKET, // [
    R_BRACKET, // ]
    L_PAREN,   // (
    R_PAREN,   // )
    PIPE,      // |
    LT,        // <
    GT,        // >
    EQ,        // =
    SEMICOLON, // ;

    // =========================================================================
    // SPECIAL
    // =========================================================================
    ERROR,
    EOF,
}

impl SyntaxKind {
    /// Check if this is trivia (whitespace or comment)
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::WHITESPACE | Self::LINE_COMMENT | Self::BLOCK_COMMENT
        )
    }

    /// Check if this kind closes a group
    pub fn is_closing_delimiter(self) -> bool {
        matches!(self, Self::R_BRACKET | Self::R_PAREN)
    }

    /// Human-readable description used in error messages
    pub fn display_name(self) -> &'static str {
        match self {
            Self::WHITESPACE => "whitespace",
            Self::LINE_COMMENT | Self::BLOCK_COMMENT => "comment",
            Self::WORD => "word",
            Self::HEADER => "grammar header",
            Self::L_BRACKET => "'['",
            Self::R_BRACKET => "']'",
            Self::L_PAREN => "'('",
            Self::R_PAREN => "')'",
            Self::PIPE => "'|'",
            Self::LT => "'<'",
            Self::GT => "'>'",
            Self::EQ => "'='",
            Self::SEMICOLON => "';'",
            Self::ERROR => "invalid character",
            Self::EOF => "end of input",
        }
    }
}
