//! Integration tests for the errors module

use super::*;
use text_size::{TextRange, TextSize};

#[test]
fn test_error_module_exports() {
    let _code = ErrorCode::E0204;
    let _context = ParseContext::TopLevel;

    let _err = ParseError::builder(ErrorCode::E0901)
        .message("test error")
        .range(TextRange::empty(TextSize::new(0)))
        .build();
}

#[test]
fn test_complete_error_workflow() {
    // Unclosed bracket opened at 6, detected at end of input
    let opening = TextRange::new(TextSize::new(6), TextSize::new(7));
    let error_pos = TextRange::empty(TextSize::new(11));

    let err = ParseError::builder(ErrorCode::E0204)
        .message("unclosed '[' in optional group")
        .range(error_pos)
        .hint("add ']' to close the optional group")
        .related("opened here", opening)
        .build();

    assert_eq!(err.code, ErrorCode::E0204);
    assert!(err.message.contains("unclosed"));
    assert!(err.has_hint());
    assert_eq!(err.related[0].range, opening);
}

#[test]
fn test_error_code_exhaustiveness() {
    let codes = [
        ErrorCode::E0101,
        ErrorCode::E0203,
        ErrorCode::E0204,
        ErrorCode::E0205,
        ErrorCode::E0206,
        ErrorCode::E0207,
        ErrorCode::E0208,
        ErrorCode::E0301,
        ErrorCode::E0302,
        ErrorCode::E0303,
        ErrorCode::E0304,
        ErrorCode::E0401,
        ErrorCode::E0402,
        ErrorCode::E0403,
        ErrorCode::E0404,
        ErrorCode::E0901,
        ErrorCode::E0999,
    ];

    for code in codes {
        assert!(code.as_str().starts_with('E'));
        assert_eq!(code.as_str().len(), 5);
        assert!(!code.default_message().is_empty());
        assert!(!code.category_description().is_empty());
    }
}

#[test]
fn test_context_error_carries_code() {
    let err = format_context_error("';'", ParseContext::TopLevel, ErrorCode::E0901)
        .token(";")
        .build();
    assert_eq!(err.code, ErrorCode::E0901);
    assert_eq!(err.token.as_deref(), Some(";"));
}
