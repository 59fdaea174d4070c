use crate::StringParsingError;
use std::borrow::Cow;
use std::num::ParseIntError;

/// The kind of a query-text token.
///
/// Literal values (`IntValue`, `StringValue`) store only the raw source text;
/// the parser cooks them with [`parse_int_value()`](Self::parse_int_value) and
/// [`parse_string_value()`](Self::parse_string_value).
///
/// The `'src` lifetime lets [`StrTokenSource`](crate::token_source::StrTokenSource)
/// borrow token text straight out of the input with `Cow::Borrowed`.
#[derive(Clone, Debug, PartialEq)]
pub enum TokenKind<'src> {
    // =========================================================================
    // Punctuators
    // =========================================================================
    /// `:`
    Colon,
    /// `,`
    Comma,
    /// `}`
    CurlyBraceClose,
    /// `{`
    CurlyBraceOpen,
    /// `$`
    Dollar,
    /// `)`
    ParenClose,
    /// `(`
    ParenOpen,
    /// `]`
    SquareBracketClose,
    /// `[`
    SquareBracketOpen,

    // =========================================================================
    // Literals (raw source text only)
    // =========================================================================
    /// A name, e.g. a field, alias, argument or enum value name. `true` and
    /// `false` are lexed as names too; the parser gives them meaning in value
    /// position.
    Name(Cow<'src, str>),

    /// Raw text of an integer literal, including an optional negative sign
    /// (e.g. `"-123"`).
    IntValue(Cow<'src, str>),

    /// Raw text of a string literal, including its quotes
    /// (e.g. `"\"hello\\nworld\""`).
    StringValue(Cow<'src, str>),

    // =========================================================================
    // End of input / lexer errors
    // =========================================================================
    Eof,

    Error {
        message: String,
    },
}

impl<'src> TokenKind<'src> {
    #[inline]
    pub fn name_borrowed(s: &'src str) -> Self {
        TokenKind::Name(Cow::Borrowed(s))
    }

    #[inline]
    pub fn int_value_borrowed(s: &'src str) -> Self {
        TokenKind::IntValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn string_value_borrowed(s: &'src str) -> Self {
        TokenKind::StringValue(Cow::Borrowed(s))
    }

    #[inline]
    pub fn error(message: impl Into<String>) -> Self {
        TokenKind::Error {
            message: message.into(),
        }
    }

    /// Returns the source text of this token if it is a punctuator.
    pub fn as_punctuator_str(&self) -> Option<&'static str> {
        match self {
            TokenKind::Colon => Some(":"),
            TokenKind::Comma => Some(","),
            TokenKind::CurlyBraceClose => Some("}"),
            TokenKind::CurlyBraceOpen => Some("{"),
            TokenKind::Dollar => Some("$"),
            TokenKind::ParenClose => Some(")"),
            TokenKind::ParenOpen => Some("("),
            TokenKind::SquareBracketClose => Some("]"),
            TokenKind::SquareBracketOpen => Some("["),

            TokenKind::Name(_)
            | TokenKind::IntValue(_)
            | TokenKind::StringValue(_)
            | TokenKind::Eof
            | TokenKind::Error { .. } => None,
        }
    }

    /// A short description of this token for error messages, e.g. `` `{` ``,
    /// `` name `foo` `` or `end of input`.
    pub fn describe(&self) -> String {
        match self {
            TokenKind::Name(name) => format!("name `{name}`"),
            TokenKind::IntValue(raw) => format!("integer `{raw}`"),
            TokenKind::StringValue(raw) => format!("string {raw}"),
            TokenKind::Eof => "end of input".to_string(),
            TokenKind::Error { message } => message.to_string(),
            punctuator => format!(
                "`{}`",
                punctuator.as_punctuator_str().unwrap_or_default(),
            ),
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error { .. })
    }

    /// Parse an `IntValue`'s raw text to `i64`.
    ///
    /// Returns `None` if this is not an `IntValue`, or `Some(Err(...))` if the
    /// literal does not fit.
    pub fn parse_int_value(&self) -> Option<Result<i64, ParseIntError>> {
        match self {
            TokenKind::IntValue(raw) => Some(raw.parse()),
            _ => None,
        }
    }

    /// Parse a `StringValue`'s raw text to unescaped content.
    ///
    /// Handles `\n`, `\r`, `\t`, `\\`, `\"`, `\/`, `\b`, `\f` and `\uXXXX`
    /// (including UTF-16 surrogate pairs written as two escapes).
    ///
    /// Returns `None` if this is not a `StringValue`.
    pub fn parse_string_value(&self) -> Option<Result<String, StringParsingError>> {
        match self {
            TokenKind::StringValue(raw) => Some(cook_string_literal(raw)),
            _ => None,
        }
    }
}

/// Unescapes the raw text of a string literal (quotes included).
fn cook_string_literal(raw: &str) -> Result<String, StringParsingError> {
    if raw.len() < 2 || !raw.starts_with('"') || !raw.ends_with('"') {
        return Err(StringParsingError::UnterminatedString);
    }
    let content = &raw[1..raw.len() - 1];

    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            result.push(ch);
            continue;
        }
        match chars.next() {
            Some('n') => result.push('\n'),
            Some('r') => result.push('\r'),
            Some('t') => result.push('\t'),
            Some('\\') => result.push('\\'),
            Some('"') => result.push('"'),
            Some('/') => result.push('/'),
            Some('b') => result.push('\u{8}'),
            Some('f') => result.push('\u{c}'),
            Some('u') => result.push(parse_unicode_escape(&mut chars)?),
            Some(other) => {
                return Err(StringParsingError::InvalidEscapeSequence(format!(
                    "\\{other}"
                )));
            },
            None => {
                return Err(StringParsingError::InvalidEscapeSequence(
                    "\\".to_string(),
                ));
            },
        }
    }

    Ok(result)
}

/// Reads the 4 hex digits following `\u`.
fn read_hex4(chars: &mut std::str::Chars) -> Result<u32, StringParsingError> {
    let mut hex = String::with_capacity(4);
    for _ in 0..4 {
        match chars.next() {
            Some(ch) if ch.is_ascii_hexdigit() => hex.push(ch),
            Some(ch) => {
                return Err(StringParsingError::InvalidUnicodeEscape(format!(
                    "\\u{hex}{ch}"
                )));
            },
            None => {
                return Err(StringParsingError::InvalidUnicodeEscape(format!(
                    "\\u{hex}"
                )));
            },
        }
    }
    u32::from_str_radix(&hex, 16)
        .map_err(|_| StringParsingError::InvalidUnicodeEscape(format!("\\u{hex}")))
}

/// Parses the remainder of a `\uXXXX` escape, combining a leading surrogate
/// with a following `\uXXXX` trailing surrogate.
fn parse_unicode_escape(chars: &mut std::str::Chars) -> Result<char, StringParsingError> {
    let first = read_hex4(chars)?;
    if !(0xD800..0xDC00).contains(&first) {
        return char::from_u32(first).ok_or_else(|| {
            StringParsingError::InvalidUnicodeEscape(format!("\\u{first:04X}"))
        });
    }

    let unpaired = || StringParsingError::InvalidUnicodeEscape(format!("\\u{first:04X}"));
    if chars.next() != Some('\\') || chars.next() != Some('u') {
        return Err(unpaired());
    }
    let second = read_hex4(chars)?;
    if !(0xDC00..0xE000).contains(&second) {
        return Err(unpaired());
    }
    let code_point = 0x10000 + ((first - 0xD800) << 10) + (second - 0xDC00);
    char::from_u32(code_point).ok_or_else(unpaired)
}
