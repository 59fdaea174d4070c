use crate::NodeError;

/// Categorizes [`ParseError`](crate::ParseError)s for programmatic handling.
///
/// Everything except [`UndefinedVariable`](Self::UndefinedVariable) and
/// [`InvalidNode`](Self::InvalidNode) is a syntax error; see
/// [`is_syntax_error()`](Self::is_syntax_error).
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ParseErrorKind {
    /// Found a token the grammar does not allow here.
    #[error("unexpected token: {found}")]
    UnexpectedToken {
        /// What was expected (e.g. `[":"]`).
        expected: Vec<String>,
        /// Description of what was found.
        found: String,
    },

    /// Reached the end of input while a delimiter was still open.
    #[error("unclosed delimiter: `{delimiter}`")]
    UnclosedDelimiter {
        delimiter: String,
    },

    /// Found a closing delimiter with no matching opener.
    #[error("unmatched delimiter: `{delimiter}`")]
    UnmatchedDelimiter {
        delimiter: String,
    },

    /// The lexer could not make sense of the input (unexpected character,
    /// unterminated string, malformed identifier).
    #[error("invalid token")]
    InvalidToken,

    /// A literal was well-formed but its value is not representable (bad
    /// escape sequence, integer out of range).
    #[error("invalid literal value")]
    InvalidValue,

    /// Nesting exceeded the parser's depth limit.
    #[error("maximum nesting depth exceeded")]
    NestingTooDeep,

    /// A `$name` reference had no entry in the supplied variables.
    #[error("undefined variable: `${name}`")]
    UndefinedVariable {
        name: String,
    },

    /// The parsed selection could not be turned into a node.
    #[error("invalid node: {0}")]
    InvalidNode(NodeError),
}

impl ParseErrorKind {
    pub fn is_syntax_error(&self) -> bool {
        !matches!(
            self,
            ParseErrorKind::UndefinedVariable { .. } | ParseErrorKind::InvalidNode(_)
        )
    }
}
