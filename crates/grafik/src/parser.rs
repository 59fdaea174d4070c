//! Recursive descent parser turning query text back into [`Child`]
//! selections.
//!
//! Grammar (whitespace and commas between selections/arguments are
//! insignificant):
//!
//! ```text
//! selections := selection*
//! selection  := (alias ':')? name arguments? ('{' selections '}')?
//!             | arguments? '{' selections '}'           (anonymous)
//! arguments  := '(' (name ':' value)* ')'
//! value      := '$' name | "string" | int | true | false | enum
//!             | '{' (name ':' value)* '}' | '[' value* ']'
//! ```

use crate::names;
use crate::token::Token;
use crate::token::TokenKind;
use crate::token_source::StrTokenSource;
use crate::token_source::TokenSource;
use crate::Arguments;
use crate::Child;
use crate::EnumValue;
use crate::Node;
use crate::ParseError;
use crate::ParseErrorKind;
use crate::TokenStream;
use crate::Value;
use indexmap::IndexMap;
use std::borrow::Cow;

/// Values available to `$name` references while parsing.
pub type Variables = IndexMap<String, Value>;

/// Strips each line, removes control characters and joins the lines with
/// single spaces. Parse error positions refer to this text.
///
/// Tabs count as spaces rather than being dropped.
///
/// ```rust
/// assert_eq!(grafik::sanitize("project {\n\titem1\r\n  item2\n}"), "project { item1 item2 }");
/// ```
pub fn sanitize(text: &str) -> String {
    text.split('\n')
        .map(|line| {
            line.trim()
                .chars()
                .filter_map(|ch| match ch {
                    '\t' => Some(' '),
                    ch if ch.is_control() => None,
                    ch => Some(ch),
                })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Parses query text into its top-level selections.
///
/// `$name` references (and string values whose content is `$name`) are
/// resolved against `variables`.
///
/// ```rust
/// use grafik::Value;
/// use grafik::Variables;
///
/// let mut variables = Variables::new();
/// variables.insert("project".to_string(), Value::from("gid://Project/7"));
///
/// let selections = grafik::parse("project(id: $project) { name }", &variables).unwrap();
/// assert_eq!(
///     grafik::serialize_children(&selections, &Default::default()),
///     r#"project(id: "gid://Project/7") { name }"#,
/// );
/// ```
pub fn parse(text: &str, variables: &Variables) -> Result<Vec<Child>, ParseError> {
    let sanitized = sanitize(text);
    log::trace!("Parsing {} characters of query text.", sanitized.len());
    let selections = QueryParser::new(&sanitized, variables).parse_document()?;
    log::trace!("Parsed {} top-level selections.", selections.len());
    Ok(selections)
}

/// [`parse()`] with no variables.
pub fn parse_str(text: &str) -> Result<Vec<Child>, ParseError> {
    parse(text, &Variables::new())
}

/// Recursive descent parser over any [`TokenSource`].
///
/// Parsing stops at the first error; there is no recovery.
pub struct QueryParser<'src, 'env, TTokenSource: TokenSource<'src>> {
    token_stream: TokenStream<'src, TTokenSource>,
    variables: &'env Variables,

    /// Current nesting depth of selection sets and composite values.
    recursion_depth: usize,

    /// Position of the most recently consumed token.
    last_position: usize,
}

impl<'src, 'env> QueryParser<'src, 'env, StrTokenSource<'src>> {
    /// Creates a parser over already-sanitized text.
    pub fn new(source: &'src str, variables: &'env Variables) -> Self {
        Self::from_token_source(StrTokenSource::new(source), variables)
    }
}

impl<'src, 'env, TTokenSource: TokenSource<'src>> QueryParser<'src, 'env, TTokenSource> {
    /// Maximum nesting depth of selection sets, argument lists and composite
    /// values.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource, variables: &'env Variables) -> Self {
        Self {
            token_stream: TokenStream::new(token_source),
            variables,
            recursion_depth: 0,
            last_position: 0,
        }
    }

    /// Parses every selection up to the end of input.
    pub fn parse_document(mut self) -> Result<Vec<Child>, ParseError> {
        self.parse_selections(None)
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    fn peek_token(&mut self) -> Token<'src> {
        let eof_position = self.last_position;
        self.token_stream
            .peek()
            .cloned()
            .unwrap_or_else(|| Token::new(TokenKind::Eof, eof_position))
    }

    fn consume_token(&mut self) -> Token<'src> {
        match self.token_stream.consume() {
            Some(token) => {
                self.last_position = token.position;
                token
            },
            None => Token::new(TokenKind::Eof, self.last_position),
        }
    }

    fn peek_is(&mut self, kind: &TokenKind<'src>) -> bool {
        self.token_stream
            .peek()
            .is_some_and(|token| token.kind == *kind)
    }

    fn enter_recursion(&mut self, position: usize) -> Result<(), ParseError> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            self.recursion_depth -= 1;
            return Err(ParseError::new(
                "Maximum nesting depth exceeded",
                position,
                ParseErrorKind::NestingTooDeep,
            ));
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Error helpers
    // =========================================================================

    fn unexpected(token: &Token<'src>, expected: &[&str]) -> ParseError {
        let found = token.kind.describe();
        ParseError::new(
            format!("Expected {}, found {found}", expected.join(" or ")),
            token.position,
            ParseErrorKind::UnexpectedToken {
                expected: expected.iter().map(|item| item.to_string()).collect(),
                found,
            },
        )
    }

    fn invalid_separator(token: &Token<'src>, expected: &str) -> ParseError {
        let found = token.kind.describe();
        ParseError::new(
            format!("Invalid separator {found}: expected {expected}"),
            token.position,
            ParseErrorKind::UnexpectedToken {
                expected: vec![expected.to_string()],
                found,
            },
        )
    }

    fn unclosed(open: &str, close: &str, open_position: usize, position: usize) -> ParseError {
        let mut error = ParseError::new(
            format!("Unclosed `{open}`: expected `{close}` before the end of input"),
            position,
            ParseErrorKind::UnclosedDelimiter {
                delimiter: open.to_string(),
            },
        );
        error.add_note_at(format!("`{open}` opened here"), open_position);
        error
    }

    fn unmatched(token: &Token<'src>) -> ParseError {
        let delimiter = token.kind.as_punctuator_str().unwrap_or_default();
        ParseError::new(
            format!("Unmatched `{delimiter}`"),
            token.position,
            ParseErrorKind::UnmatchedDelimiter {
                delimiter: delimiter.to_string(),
            },
        )
    }

    fn lexer_error(message: &str, position: usize) -> ParseError {
        ParseError::new(message, position, ParseErrorKind::InvalidToken)
    }

    // =========================================================================
    // Selections
    // =========================================================================

    /// Parses a list of selections.
    ///
    /// With `open_position: None` this consumes everything up to the end of
    /// input. With `Some(position)` the opening `{` (at `position`) has
    /// already been consumed, and parsing ends after its matching `}`.
    pub fn parse_selections(
        &mut self,
        open_position: Option<usize>,
    ) -> Result<Vec<Child>, ParseError> {
        let mut selections = vec![];
        loop {
            let token = self.peek_token();
            match &token.kind {
                TokenKind::Eof => {
                    return match open_position {
                        Some(open_position) => {
                            Err(Self::unclosed("{", "}", open_position, token.position))
                        },
                        None => Ok(selections),
                    };
                },

                TokenKind::CurlyBraceClose if open_position.is_some() => {
                    self.consume_token();
                    return Ok(selections);
                },

                TokenKind::Comma => {
                    self.consume_token();
                },

                TokenKind::Name(_) | TokenKind::ParenOpen | TokenKind::CurlyBraceOpen => {
                    selections.push(self.parse_selection()?);
                },

                TokenKind::CurlyBraceClose
                | TokenKind::ParenClose
                | TokenKind::SquareBracketClose => {
                    return Err(Self::unmatched(&token));
                },

                TokenKind::Error { message } => {
                    return Err(Self::lexer_error(message, token.position));
                },

                _ => {
                    let expected: &[&str] = if open_position.is_some() {
                        &["a field name", "`}`"]
                    } else {
                        &["a field name"]
                    };
                    return Err(Self::unexpected(&token, expected));
                },
            }
        }
    }

    /// Parses `alias: name(arguments) { selections }`, where every part but
    /// the name is optional. Anonymous selections start directly with `(` or
    /// `{`.
    fn parse_selection(&mut self) -> Result<Child, ParseError> {
        let (alias, name) = match self.peek_token().kind {
            TokenKind::Name(first) => {
                self.consume_token();
                if self.peek_is(&TokenKind::Colon) {
                    let colon = self.consume_token();
                    match self.peek_token().kind {
                        TokenKind::Name(name) => {
                            self.consume_token();
                            (Some(first), name)
                        },
                        _ => return Err(Self::invalid_separator(&colon, "a field name after the alias")),
                    }
                } else {
                    (None, first)
                }
            },
            _ => (None, Cow::Borrowed("")),
        };

        let arguments = if self.peek_is(&TokenKind::ParenOpen) {
            let open = self.consume_token();
            self.enter_recursion(open.position)?;
            let arguments = self.parse_arguments(open.position, &TokenKind::ParenClose);
            self.exit_recursion();
            arguments?
        } else {
            Arguments::new()
        };

        let children = if self.peek_is(&TokenKind::CurlyBraceOpen) {
            let open = self.consume_token();
            self.enter_recursion(open.position)?;
            let children = self.parse_selections(Some(open.position));
            self.exit_recursion();
            children?
        } else {
            vec![]
        };

        if arguments.is_empty() && children.is_empty() && !name.is_empty() {
            return Ok(Child::Field(names::display_name(alias.as_deref(), &name)));
        }

        let mut node = Node {
            alias: alias.map(Cow::into_owned),
            name: name.into_owned(),
            ..Node::default()
        };
        node.apply_add(children, arguments);
        Ok(Child::Node(node))
    }

    // =========================================================================
    // Arguments and values
    // =========================================================================

    /// Parses `name: value` pairs up to `closing` (`)` for argument lists,
    /// `}` for object values). The opener at `open_position` has already
    /// been consumed.
    pub fn parse_arguments(
        &mut self,
        open_position: usize,
        closing: &TokenKind<'src>,
    ) -> Result<Arguments, ParseError> {
        let (open, close) = match closing {
            TokenKind::CurlyBraceClose => ("{", "}"),
            _ => ("(", ")"),
        };

        let mut arguments = Arguments::new();
        loop {
            let token = self.consume_token();
            match &token.kind {
                kind if kind == closing => return Ok(arguments),

                TokenKind::Comma => {},

                TokenKind::Name(name) => {
                    let separator = self.consume_token();
                    match &separator.kind {
                        TokenKind::Colon => {},
                        TokenKind::Eof => {
                            return Err(Self::unclosed(open, close, open_position, separator.position));
                        },
                        TokenKind::Error { message } => {
                            return Err(Self::lexer_error(message, separator.position));
                        },
                        _ => {
                            let mut error = Self::invalid_separator(
                                &separator,
                                "`:` after the argument name",
                            );
                            error.add_help(format!("Write the argument as `{name}: value`"));
                            return Err(error);
                        },
                    }
                    let value = self.parse_value()?;
                    arguments.insert(name.to_string(), value);
                },

                TokenKind::Eof => {
                    return Err(Self::unclosed(open, close, open_position, token.position));
                },

                TokenKind::Error { message } => {
                    return Err(Self::lexer_error(message, token.position));
                },

                _ => {
                    let close = format!("`{close}`");
                    return Err(Self::unexpected(&token, &["an argument name", close.as_str()]));
                },
            }
        }
    }

    fn parse_value(&mut self) -> Result<Value, ParseError> {
        let token = self.consume_token();
        match &token.kind {
            TokenKind::Dollar => self.parse_variable(),

            TokenKind::Name(name) if name == "true" => Ok(Value::Bool(true)),
            TokenKind::Name(name) if name == "false" => Ok(Value::Bool(false)),
            TokenKind::Name(name) => EnumValue::new(name.to_string())
                .map(Value::Enum)
                .map_err(|error| {
                    ParseError::new(
                        error.to_string(),
                        token.position,
                        ParseErrorKind::InvalidNode(error),
                    )
                }),

            TokenKind::IntValue(raw) => match token.kind.parse_int_value() {
                Some(Ok(value)) => Ok(Value::Int(value)),
                _ => Err(ParseError::new(
                    format!("Integer `{raw}` does not fit in 64 bits"),
                    token.position,
                    ParseErrorKind::InvalidValue,
                )),
            },

            TokenKind::StringValue(_) => {
                let cooked = token
                    .kind
                    .parse_string_value()
                    .transpose()
                    .map_err(|error| {
                        ParseError::new(
                            error.to_string(),
                            token.position,
                            ParseErrorKind::InvalidValue,
                        )
                    })?
                    .unwrap_or_default();
                if let Some(variable) = cooked.strip_prefix('$')
                    && let Some(value) = self.variables.get(variable)
                {
                    return Ok(value.clone());
                }
                Ok(Value::String(cooked))
            },

            TokenKind::CurlyBraceOpen => {
                self.enter_recursion(token.position)?;
                let fields = self.parse_arguments(token.position, &TokenKind::CurlyBraceClose);
                self.exit_recursion();
                Ok(Value::Object(fields?))
            },

            TokenKind::SquareBracketOpen => {
                self.enter_recursion(token.position)?;
                let values = self.parse_list(token.position);
                self.exit_recursion();
                Ok(Value::List(values?))
            },

            TokenKind::Comma => Err(Self::invalid_separator(&token, "a value")),

            TokenKind::Error { message } => Err(Self::lexer_error(message, token.position)),

            _ => Err(Self::unexpected(&token, &["a value"])),
        }
    }

    /// Parses the name after a `$` and looks it up.
    fn parse_variable(&mut self) -> Result<Value, ParseError> {
        let token = self.consume_token();
        let TokenKind::Name(name) = &token.kind else {
            return Err(Self::unexpected(&token, &["a variable name"]));
        };
        match self.variables.get(&**name) {
            Some(value) => Ok(value.clone()),
            None => Err(ParseError::new(
                format!("Variable `${name}` is not defined"),
                token.position,
                ParseErrorKind::UndefinedVariable {
                    name: name.to_string(),
                },
            )),
        }
    }

    /// Parses list items up to `]`. The `[` at `open_position` has already
    /// been consumed.
    fn parse_list(&mut self, open_position: usize) -> Result<Vec<Value>, ParseError> {
        let mut values = vec![];
        loop {
            let token = self.peek_token();
            match &token.kind {
                TokenKind::SquareBracketClose => {
                    self.consume_token();
                    return Ok(values);
                },
                TokenKind::Comma => {
                    self.consume_token();
                },
                TokenKind::Eof => {
                    return Err(Self::unclosed("[", "]", open_position, token.position));
                },
                _ => values.push(self.parse_value()?),
            }
        }
    }
}
