use crate::ParseErrorKind;
use crate::ParseErrorNote;
use crate::ParseErrorNoteKind;
use crate::ParseErrorNotes;

/// A parse failure with the position it was detected at and contextual
/// notes.
///
/// Positions are 0-based character offsets into the *sanitized* query text
/// (see [`sanitize()`](crate::sanitize)), which is always a single line.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[error("{message} (at position {position})")]
pub struct ParseError {
    /// Human-readable primary error message.
    message: String,

    /// Where the error was detected.
    position: usize,

    kind: ParseErrorKind,

    notes: ParseErrorNotes,
}

impl ParseError {
    pub fn new(message: impl Into<String>, position: usize, kind: ParseErrorKind) -> Self {
        Self {
            message: message.into(),
            position,
            kind,
            notes: ParseErrorNotes::new(),
        }
    }

    pub fn with_notes(
        message: impl Into<String>,
        position: usize,
        kind: ParseErrorKind,
        notes: ParseErrorNotes,
    ) -> Self {
        Self {
            message: message.into(),
            position,
            kind,
            notes,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn kind(&self) -> &ParseErrorKind {
        &self.kind
    }

    pub fn notes(&self) -> &ParseErrorNotes {
        &self.notes
    }

    pub fn add_note(&mut self, message: impl Into<String>) {
        self.notes.push(ParseErrorNote::general(message));
    }

    pub fn add_note_at(&mut self, message: impl Into<String>, position: usize) {
        self.notes.push(ParseErrorNote::general_at(message, position));
    }

    pub fn add_help(&mut self, message: impl Into<String>) {
        self.notes.push(ParseErrorNote::help(message));
    }

    /// Formats this error as a multi-line diagnostic:
    ///
    /// ```text
    /// error: Expected `:` after argument name `id`, found `1`
    ///   --> query.graphql, position 11
    ///    |
    ///    | project(id 1) { name }
    ///    |            ^
    ///    = help: Arguments are written as `name: value`
    /// ```
    ///
    /// `sanitized_source` is the text the position refers to (the output of
    /// [`sanitize()`](crate::sanitize)); when given, a snippet around the
    /// error is included.
    pub fn format_detailed(&self, file_name: Option<&str>, sanitized_source: Option<&str>) -> String {
        let mut output = format!("error: {}\n", self.message);
        output.push_str(&format!(
            "  --> {}, position {}\n",
            file_name.unwrap_or("<input>"),
            self.position,
        ));

        if let Some(source) = sanitized_source {
            output.push_str(&format_snippet(source, self.position, '^'));
        }

        for note in &self.notes {
            let prefix = match note.kind {
                ParseErrorNoteKind::General => "note",
                ParseErrorNoteKind::Help => "help",
            };
            output.push_str(&format!("   = {prefix}: {}\n", note.message));
            if let (Some(position), Some(source)) = (note.position, sanitized_source) {
                output.push_str(&format_snippet(source, position, '-'));
            }
        }

        output
    }
}

/// Characters of context shown on either side of a position.
const SNIPPET_CONTEXT: usize = 30;

fn format_snippet(source: &str, position: usize, marker: char) -> String {
    let start = position.saturating_sub(SNIPPET_CONTEXT);
    let window: String = source
        .chars()
        .skip(start)
        .take(position - start + SNIPPET_CONTEXT)
        .collect();
    format!(
        "   |\n   | {window}\n   | {:>padding$}{marker}\n",
        "",
        padding = position - start,
    )
}
