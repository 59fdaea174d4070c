use crate::token::Token;

/// Marker trait for lexers: iterators that generate [`Token`]s, ending with a
/// single [`TokenKind::Eof`](crate::token::TokenKind::Eof) token.
///
/// Lexers skip whitespace and report malformed input as
/// [`TokenKind::Error`](crate::token::TokenKind::Error) tokens. All lookahead
/// and buffering is handled by [`TokenStream`](crate::TokenStream).
pub trait TokenSource<'src>: Iterator<Item = Token<'src>> {}

impl<'src, T> TokenSource<'src> for T where T: Iterator<Item = Token<'src>> {}
