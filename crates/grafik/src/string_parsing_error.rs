/// Error returned when cooking the raw text of a string token into its
/// unescaped content fails.
///
/// See [`TokenKind::parse_string_value()`](crate::token::TokenKind::parse_string_value).
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum StringParsingError {
    /// An invalid escape sequence was encountered (e.g. `\q`).
    #[error("Invalid escape sequence: `{0}`")]
    InvalidEscapeSequence(String),

    /// An invalid or unpaired `\uXXXX` escape was encountered.
    #[error("Invalid unicode escape: `{0}`")]
    InvalidUnicodeEscape(String),

    /// The string was not properly terminated.
    #[error("Unterminated string: missing closing quote")]
    UnterminatedString,
}
