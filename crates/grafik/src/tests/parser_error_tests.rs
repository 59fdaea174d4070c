//! Tests for parse errors: kinds, positions, notes and rendering.

use crate::ParseError;
use crate::ParseErrorKind;
use crate::ParseErrorNote;
use crate::ParseErrorNoteKind;
use crate::Variables;
use smallvec::smallvec;

fn parse_err(text: &str) -> ParseError {
    crate::parse_str(text).unwrap_err()
}

// =============================================================================
// Delimiters
// =============================================================================

#[test]
fn test_unclosed_selection_set() {
    let error = parse_err("project { a");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnclosedDelimiter {
            delimiter: "{".to_string(),
        },
    );
    assert_eq!(error.position(), 11);
    assert_eq!(error.message(), "Unclosed `{`: expected `}` before the end of input");
    assert_eq!(error.notes().len(), 1);
    assert_eq!(error.notes()[0].message, "`{` opened here");
    assert_eq!(error.notes()[0].position, Some(8));
}

#[test]
fn test_unclosed_argument_list() {
    let error = parse_err("a(x: 1");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnclosedDelimiter {
            delimiter: "(".to_string(),
        },
    );
    assert_eq!(error.position(), 6);
    assert_eq!(error.notes()[0].position, Some(1));
}

#[test]
fn test_unclosed_list() {
    let error = parse_err("a(x: [1, 2");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnclosedDelimiter {
            delimiter: "[".to_string(),
        },
    );
    assert_eq!(error.position(), 10);
    assert_eq!(error.notes()[0].position, Some(5));
}

#[test]
fn test_unmatched_closers() {
    let error = parse_err("project }");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnmatchedDelimiter {
            delimiter: "}".to_string(),
        },
    );
    assert_eq!(error.position(), 8);
    assert_eq!(error.message(), "Unmatched `}`");

    assert_eq!(
        parse_err("a ]").kind(),
        &ParseErrorKind::UnmatchedDelimiter {
            delimiter: "]".to_string(),
        },
    );
    assert_eq!(
        parse_err("a { b ) }").kind(),
        &ParseErrorKind::UnmatchedDelimiter {
            delimiter: ")".to_string(),
        },
    );
}

/// The closer of an argument list must match its opener.
#[test]
fn test_mismatched_argument_closer() {
    let error = parse_err("a(x: 1 }");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnexpectedToken {
            expected: vec!["an argument name".to_string(), "`)`".to_string()],
            found: "`}`".to_string(),
        },
    );
    assert_eq!(error.message(), "Expected an argument name or `)`, found `}`");
}

// =============================================================================
// Unexpected tokens and separators
// =============================================================================

#[test]
fn test_missing_argument_colon() {
    let error = parse_err("project(id 1) { name }");
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnexpectedToken {
            expected: vec!["`:` after the argument name".to_string()],
            found: "integer `1`".to_string(),
        },
    );
    assert_eq!(error.position(), 11);
    assert_eq!(
        error.message(),
        "Invalid separator integer `1`: expected `:` after the argument name",
    );
    assert_eq!(error.notes()[0].kind, ParseErrorNoteKind::Help);
    assert_eq!(error.notes()[0].message, "Write the argument as `id: value`");
}

#[test]
fn test_comma_in_value_position() {
    let error = parse_err("a(x: ,)");
    assert_eq!(error.position(), 5);
    assert_eq!(error.message(), "Invalid separator `,`: expected a value");
}

#[test]
fn test_alias_without_field_name() {
    let error = parse_err("a: 1");
    assert_eq!(error.position(), 1);
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnexpectedToken {
            expected: vec!["a field name after the alias".to_string()],
            found: "`:`".to_string(),
        },
    );
}

#[test]
fn test_unexpected_token_at_top_level() {
    let error = parse_err(": a");
    assert_eq!(error.position(), 0);
    assert_eq!(error.message(), "Expected a field name, found `:`");
}

/// Inside a selection set the closing brace is also acceptable.
#[test]
fn test_unexpected_token_in_selection_set() {
    let error = parse_err("a { : }");
    assert_eq!(error.position(), 4);
    assert_eq!(error.message(), "Expected a field name or `}`, found `:`");
}

#[test]
fn test_non_name_argument_key() {
    let error = parse_err("a(1: 2)");
    assert_eq!(error.message(), "Expected an argument name or `)`, found integer `1`");
}

#[test]
fn test_missing_variable_name() {
    let error = parse_err("a(x: $ 1)");
    assert_eq!(error.position(), 7);
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UnexpectedToken {
            expected: vec!["a variable name".to_string()],
            found: "integer `1`".to_string(),
        },
    );
}

// =============================================================================
// Lexer and value errors
// =============================================================================

#[test]
fn test_unexpected_character() {
    let error = parse_err("a { b# }");
    assert_eq!(error.kind(), &ParseErrorKind::InvalidToken);
    assert_eq!(error.position(), 5);
    assert_eq!(error.message(), "Unexpected character `#`");
}

#[test]
fn test_unterminated_string() {
    let error = parse_err(r#"a(s: "abc"#);
    assert_eq!(error.kind(), &ParseErrorKind::InvalidToken);
    assert_eq!(error.position(), 5);
    assert_eq!(error.message(), "Unterminated string literal");
}

#[test]
fn test_invalid_identifier() {
    let error = parse_err("a(x: 1abc)");
    assert_eq!(error.kind(), &ParseErrorKind::InvalidToken);
    assert_eq!(error.message(), "Invalid identifier `1abc`");
}

#[test]
fn test_integer_overflow() {
    let error = parse_err("a(x: 99999999999999999999)");
    assert_eq!(error.kind(), &ParseErrorKind::InvalidValue);
    assert_eq!(error.position(), 5);
    assert_eq!(error.message(), "Integer `99999999999999999999` does not fit in 64 bits");
}

#[test]
fn test_invalid_escape() {
    let error = parse_err(r#"a(x: "\q")"#);
    assert_eq!(error.kind(), &ParseErrorKind::InvalidValue);
    assert_eq!(error.message(), r"Invalid escape sequence: `\q`");
}

#[test]
fn test_undefined_variable() {
    let error = crate::parse("a(x: $missing)", &Variables::new()).unwrap_err();
    assert_eq!(
        error.kind(),
        &ParseErrorKind::UndefinedVariable {
            name: "missing".to_string(),
        },
    );
    assert_eq!(error.position(), 6);
    assert_eq!(error.message(), "Variable `$missing` is not defined");
    assert!(!error.kind().is_syntax_error());
}

#[test]
fn test_syntax_error_classification() {
    assert!(parse_err("a {").kind().is_syntax_error());
    assert!(parse_err("a(x: 1abc)").kind().is_syntax_error());
}

// =============================================================================
// Nesting limit
// =============================================================================

fn nested(depth: usize) -> String {
    format!("{}b{}", "a { ".repeat(depth), " }".repeat(depth))
}

#[test]
fn test_nesting_at_limit_is_accepted() {
    assert!(crate::parse_str(&nested(64)).is_ok());
}

#[test]
fn test_nesting_beyond_limit_is_rejected() {
    assert_eq!(parse_err(&nested(65)).kind(), &ParseErrorKind::NestingTooDeep);
    let deep_list = format!("a(x: {}1{})", "[".repeat(100), "]".repeat(100));
    assert_eq!(parse_err(&deep_list).kind(), &ParseErrorKind::NestingTooDeep);
}

// =============================================================================
// Positions and rendering
// =============================================================================

/// Positions refer to the sanitized single-line text.
#[test]
fn test_positions_refer_to_sanitized_text() {
    let text = "project {\n  a\n  b";
    let error = parse_err(text);
    assert_eq!(crate::sanitize(text), "project { a b");
    assert_eq!(error.position(), 13);
}

#[test]
fn test_display() {
    assert_eq!(
        parse_err("project { a").to_string(),
        "Unclosed `{`: expected `}` before the end of input (at position 11)",
    );
}

#[test]
fn test_format_detailed() {
    let source = "project(id 1) { name }";
    let error = parse_err(source);
    assert_eq!(
        error.format_detailed(Some("query.graphql"), Some(source)),
        concat!(
            "error: Invalid separator integer `1`: expected `:` after the argument name\n",
            "  --> query.graphql, position 11\n",
            "   |\n",
            "   | project(id 1) { name }\n",
            "   |            ^\n",
            "   = help: Write the argument as `id: value`\n",
        ),
    );
}

#[test]
fn test_format_detailed_without_source() {
    let error = parse_err("a(x: ,)");
    assert_eq!(
        error.format_detailed(None, None),
        "error: Invalid separator `,`: expected a value\n  --> <input>, position 5\n",
    );
}

/// Notes with a position get their own snippet.
#[test]
fn test_format_detailed_note_snippet() {
    let source = "project { a";
    let detailed = parse_err(source).format_detailed(None, Some(source));
    assert!(detailed.contains("   |            ^\n"));
    assert!(detailed.ends_with("   = note: `{` opened here\n   |\n   | project { a\n   |         -\n"));
}

/// Long inputs are cut down to a window around the position.
#[test]
fn test_snippet_window() {
    let source = format!("{}{{", "a ".repeat(40));
    let error = parse_err(&source);
    assert_eq!(error.position(), 81);
    let detailed = error.format_detailed(None, Some(&source));
    let snippet_line = detailed.lines().nth(3).unwrap();
    assert_eq!(snippet_line, format!("   | {}", &source[51..]));
}

#[test]
fn test_manual_construction() {
    let mut error = ParseError::with_notes(
        "Something went wrong",
        3,
        ParseErrorKind::InvalidValue,
        smallvec![ParseErrorNote::general("first")],
    );
    error.add_note("second");
    error.add_help("try again");
    assert_eq!(error.notes().len(), 3);
    assert_eq!(
        error.format_detailed(None, None),
        concat!(
            "error: Something went wrong\n",
            "  --> <input>, position 3\n",
            "   = note: first\n",
            "   = note: second\n",
            "   = help: try again\n",
        ),
    );
}
