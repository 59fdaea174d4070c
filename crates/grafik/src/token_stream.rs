//! Bounded-lookahead buffering over any [`TokenSource`].

use crate::token::Token;
use crate::token_source::TokenSource;
use std::collections::VecDeque;

/// Buffers tokens from a [`TokenSource`] and provides the `peek`/`consume`
/// lookahead the parser needs.
///
/// Unconsumed tokens are buffered at the back of a [`VecDeque`];
/// [`consume()`](Self::consume) pops from the front.
pub struct TokenStream<'src, TTokenSource: TokenSource<'src>> {
    token_source: TTokenSource,
    buffer: VecDeque<Token<'src>>,
}

impl<'src, TTokenSource: TokenSource<'src>> TokenStream<'src, TTokenSource> {
    /// Advance to the next token and return it as an owned value.
    ///
    /// Returns `None` if the stream is exhausted.
    pub fn consume(&mut self) -> Option<Token<'src>> {
        self.ensure_buffer_has(1);
        self.buffer.pop_front()
    }

    fn ensure_buffer_has(&mut self, count: usize) {
        while self.buffer.len() < count {
            if let Some(token) = self.token_source.next() {
                self.buffer.push_back(token);
            } else {
                break;
            }
        }
    }

    pub fn new(token_source: TTokenSource) -> Self {
        Self {
            token_source,
            buffer: VecDeque::new(),
        }
    }

    /// The next unconsumed token, or `None` once the source is exhausted.
    pub fn peek(&mut self) -> Option<&Token<'src>> {
        self.ensure_buffer_has(1);
        self.buffer.front()
    }
}
