//! A [`TokenSource`](crate::token_source::TokenSource) that lexes from a
//! `&str` input.
//!
//! Token values borrow directly from the source string, so lexing never
//! allocates for names, numbers or strings.
//!
//! ```rust
//! use grafik::token::TokenKind;
//! use grafik::token_source::StrTokenSource;
//!
//! let kinds: Vec<_> = StrTokenSource::new("a: b(x: 1)")
//!     .map(|token| token.kind)
//!     .collect();
//! assert_eq!(kinds[0], TokenKind::name_borrowed("a"));
//! assert_eq!(kinds[1], TokenKind::Colon);
//! assert_eq!(kinds.last(), Some(&TokenKind::Eof));
//! ```

use crate::names;
use crate::token::Token;
use crate::token::TokenKind;

pub struct StrTokenSource<'src> {
    /// The full source text being lexed.
    source: &'src str,

    /// Current byte offset from the start of `source`.
    curr_byte_offset: usize,

    /// Current 0-based character offset from the start of `source`.
    curr_char_offset: usize,

    /// Whether the EOF token has been emitted.
    finished: bool,
}

impl<'src> StrTokenSource<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            curr_byte_offset: 0,
            curr_char_offset: 0,
            finished: false,
        }
    }

    // =========================================================================
    // Position and scanning helpers
    // =========================================================================

    fn remaining(&self) -> &'src str {
        &self.source[self.curr_byte_offset..]
    }

    fn peek_char(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    fn consume(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        self.curr_byte_offset += ch.len_utf8();
        self.curr_char_offset += 1;
        Some(ch)
    }

    /// Advances past `byte_len` bytes of the remaining text.
    fn advance_bytes(&mut self, byte_len: usize) {
        let skipped = &self.remaining()[..byte_len];
        self.curr_char_offset += skipped.chars().count();
        self.curr_byte_offset += byte_len;
    }

    // =========================================================================
    // Lexer main loop
    // =========================================================================

    fn next_token(&mut self) -> Token<'src> {
        self.skip_whitespace();
        let start = self.curr_char_offset;

        let kind = match self.peek_char() {
            None => TokenKind::Eof,
            Some('"') => return self.lex_string(start),
            Some(ch) if names::is_name_continue(ch) || ch == '-' => {
                return self.lex_word(start);
            },
            Some(ch) => {
                self.consume();
                match ch {
                    ':' => TokenKind::Colon,
                    ',' => TokenKind::Comma,
                    '}' => TokenKind::CurlyBraceClose,
                    '{' => TokenKind::CurlyBraceOpen,
                    '$' => TokenKind::Dollar,
                    ')' => TokenKind::ParenClose,
                    '(' => TokenKind::ParenOpen,
                    ']' => TokenKind::SquareBracketClose,
                    '[' => TokenKind::SquareBracketOpen,
                    ch => TokenKind::error(format!(
                        "Unexpected character {}",
                        describe_char(ch),
                    )),
                }
            },
        };

        Token::new(kind, start)
    }

    fn skip_whitespace(&mut self) {
        while let Some(ch) = self.peek_char() {
            match ch {
                ' ' | '\t' | '\n' | '\r' | '\u{FEFF}' => {
                    self.consume();
                },
                _ => break,
            }
        }
    }

    // =========================================================================
    // Word lexing
    // =========================================================================

    /// Lexes a maximal run of word characters (plus a leading `-`).
    ///
    /// All-digit runs (optionally negative) become `IntValue`s, runs matching
    /// `/[_A-Za-z][_0-9A-Za-z]*/` become `Name`s and anything else is an
    /// error.
    fn lex_word(&mut self, start: usize) -> Token<'src> {
        let word_start = self.curr_byte_offset;
        if self.peek_char() == Some('-') {
            self.consume();
        }
        while let Some(ch) = self.peek_char() {
            if names::is_name_continue(ch) {
                self.consume();
            } else {
                break;
            }
        }
        let word = &self.source[word_start..self.curr_byte_offset];

        let digits = word.strip_prefix('-').unwrap_or(word);
        let kind = if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            TokenKind::int_value_borrowed(word)
        } else if names::is_name(word) {
            TokenKind::name_borrowed(word)
        } else {
            TokenKind::error(format!("Invalid identifier `{word}`"))
        };

        Token::new(kind, start)
    }

    // =========================================================================
    // String lexing
    // =========================================================================

    /// Lexes a double-quoted string literal. Escapes are skipped over here
    /// and cooked later by [`TokenKind::parse_string_value()`].
    fn lex_string(&mut self, start: usize) -> Token<'src> {
        let str_start = self.curr_byte_offset;
        self.consume();

        loop {
            let remaining = self.remaining();
            match memchr::memchr3(b'"', b'\\', b'\n', remaining.as_bytes()) {
                None => {
                    self.advance_bytes(remaining.len());
                    return Token::new(
                        TokenKind::error("Unterminated string literal"),
                        start,
                    );
                },
                Some(idx) => {
                    let found = remaining.as_bytes()[idx];
                    self.advance_bytes(idx);
                    match found {
                        b'"' => {
                            self.consume();
                            break;
                        },
                        b'\\' => {
                            self.consume();
                            self.consume();
                        },
                        _ => {
                            return Token::new(
                                TokenKind::error(
                                    "Unterminated string literal: strings cannot \
                                    contain unescaped newlines",
                                ),
                                start,
                            );
                        },
                    }
                },
            }
        }

        let text = &self.source[str_start..self.curr_byte_offset];
        Token::new(TokenKind::string_value_borrowed(text), start)
    }
}

impl<'src> Iterator for StrTokenSource<'src> {
    type Item = Token<'src>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let token = self.next_token();
        if matches!(token.kind, TokenKind::Eof) {
            self.finished = true;
        }
        Some(token)
    }
}

/// Returns a human-readable description of a character for error messages.
fn describe_char(ch: char) -> String {
    if ch.is_control() || (ch.is_whitespace() && ch != ' ') {
        format!("`{}` (U+{:04X})", ch.escape_default(), ch as u32)
    } else {
        format!("`{ch}`")
    }
}
