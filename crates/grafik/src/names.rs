use crate::NodeError;

/// Returns `true` for characters that may appear after the first character of
/// a name: ASCII letters, digits and `_`.
pub(crate) fn is_name_continue(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphanumeric()
}

/// Returns `true` for characters that may start a name: ASCII letters and
/// `_`.
pub(crate) fn is_name_start(ch: char) -> bool {
    ch == '_' || ch.is_ascii_alphabetic()
}

/// Returns `true` if `text` matches `/[_A-Za-z][_0-9A-Za-z]*/`.
pub(crate) fn is_name(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) if is_name_start(first) => chars.all(is_name_continue),
        _ => false,
    }
}

/// Splits a display string of the form `alias: name` (or just `name`) into its
/// alias and name parts, validating both.
///
/// An empty name is accepted (it denotes an anonymous node) as long as no
/// alias is given.
pub(crate) fn split_alias(text: &str) -> Result<(Option<&str>, &str), NodeError> {
    let invalid = || NodeError::InvalidName { name: text.to_string() };
    match text.split_once(':') {
        Some((alias, name)) => {
            let alias = alias.trim();
            let name = name.trim();
            if is_name(alias) && is_name(name) {
                Ok((Some(alias), name))
            } else {
                Err(invalid())
            }
        },

        None => {
            let name = text.trim();
            if name.is_empty() || is_name(name) {
                Ok((None, name))
            } else {
                Err(invalid())
            }
        },
    }
}

/// Renders an `(alias, name)` pair the way it appears in query text.
pub(crate) fn display_name(alias: Option<&str>, name: &str) -> String {
    match alias {
        Some(alias) => format!("{alias}: {name}"),
        None => name.to_string(),
    }
}
