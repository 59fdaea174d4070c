use crate::token::TokenKind;

/// A single lexed token and the position at which it starts.
#[derive(Clone, Debug, PartialEq)]
pub struct Token<'src> {
    /// The kind of token (including `Error` for lexer errors).
    pub kind: TokenKind<'src>,

    /// 0-based character (not byte) offset of the token's first character.
    pub position: usize,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind<'src>, position: usize) -> Self {
        Self { kind, position }
    }
}
