//! Tests for `TokenStream`.

use crate::tests::utils;
use crate::token::TokenKind;
use crate::TokenStream;

fn stream() -> TokenStream<'static, utils::MockTokenSource> {
    TokenStream::new(utils::MockTokenSource::new(vec![
        utils::mock_name_token("project", 0),
        utils::mock_token(TokenKind::CurlyBraceOpen, 8),
        utils::mock_name_token("name", 10),
        utils::mock_eof_token(14),
    ]))
}

/// Repeated peeks return the same token without consuming it.
#[test]
fn test_peek_without_consuming() {
    let mut stream = stream();
    let first = stream.peek().cloned();
    let second = stream.peek().cloned();
    assert_eq!(first, second);
    assert_eq!(stream.consume(), first);
}

#[test]
fn test_consume_advances() {
    let mut stream = stream();
    assert_eq!(stream.consume().map(|token| token.position), Some(0));
    assert_eq!(stream.peek().map(|token| token.kind.clone()), Some(TokenKind::CurlyBraceOpen));
}

/// The source's own `Eof` token is handed out once; after that the stream is
/// empty.
#[test]
fn test_end_of_stream() {
    let mut stream = stream();
    for _ in 0..3 {
        assert!(stream.consume().is_some());
    }
    assert_eq!(stream.peek().map(|token| token.kind.clone()), Some(TokenKind::Eof));
    assert_eq!(stream.consume().map(|token| token.kind), Some(TokenKind::Eof));
    assert!(stream.peek().is_none());
    assert!(stream.consume().is_none());
}
