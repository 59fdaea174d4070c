use smallvec::SmallVec;

/// How a [`ParseErrorNote`] is rendered.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseErrorNoteKind {
    /// General context about the error. Rendered as `= note: ...`.
    General,

    /// An actionable suggestion. Rendered as `= help: ...`.
    Help,
}

/// Additional context attached to a [`ParseError`](crate::ParseError).
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseErrorNote {
    pub kind: ParseErrorNoteKind,
    pub message: String,

    /// Optional character position of a related location (e.g. where an
    /// unclosed delimiter was opened).
    pub position: Option<usize>,
}

impl ParseErrorNote {
    pub fn general(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorNoteKind::General,
            message: message.into(),
            position: None,
        }
    }

    pub fn general_at(message: impl Into<String>, position: usize) -> Self {
        Self {
            kind: ParseErrorNoteKind::General,
            message: message.into(),
            position: Some(position),
        }
    }

    pub fn help(message: impl Into<String>) -> Self {
        Self {
            kind: ParseErrorNoteKind::Help,
            message: message.into(),
            position: None,
        }
    }
}

/// Most errors have 0-2 notes.
pub type ParseErrorNotes = SmallVec<[ParseErrorNote; 2]>;
