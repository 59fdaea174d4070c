use crate::EnumValue;
use crate::Node;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;
use std::fmt::Write;

/// Ordered mapping of argument names to their values.
///
/// Insertion order is preserved and re-inserting an existing key overwrites
/// its value without moving it.
pub type Arguments = IndexMap<String, Value>;

/// A value that can be passed as a field argument.
///
/// The [`Display`](fmt::Display) impl renders a value exactly the way it is
/// written in query text, and is the only place argument text is produced:
///
/// - strings are double-quoted (and escaped)
/// - booleans are `true`/`false`
/// - enum values are bare names
/// - objects are `{ key: value, ... }`
/// - lists are `[ value, ... ]`
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Enum(EnumValue),
    Int(i64),
    List(Vec<Value>),
    Object(Arguments),
    String(String),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        if let Self::Bool(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_enum(&self) -> Option<&EnumValue> {
        if let Self::Enum(value) = self {
            Some(value)
        } else {
            None
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        if let Self::Int(value) = self {
            Some(*value)
        } else {
            None
        }
    }

    pub fn as_list(&self) -> Option<&[Value]> {
        if let Self::List(values) = self {
            Some(values.as_slice())
        } else {
            None
        }
    }

    pub fn as_object(&self) -> Option<&Arguments> {
        if let Self::Object(fields) = self {
            Some(fields)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        if let Self::String(str) = self {
            Some(str.as_str())
        } else {
            None
        }
    }

    /// A short human-readable name for the kind of this value, used in error
    /// messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "a boolean",
            Self::Enum(_) => "an enum value",
            Self::Int(_) => "an integer",
            Self::List(_) => "a list",
            Self::Object(_) => "an object",
            Self::String(_) => "a string",
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(value) => write!(f, "{value}"),
            Self::Enum(value) => f.write_str(value.name()),
            Self::Int(value) => write!(f, "{value}"),
            Self::List(values) => {
                if values.is_empty() {
                    return f.write_str("[]");
                }
                f.write_str("[ ")?;
                for (idx, value) in values.iter().enumerate() {
                    if idx > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{value}")?;
                }
                f.write_str(" ]")
            },
            Self::Object(fields) => {
                if fields.is_empty() {
                    return f.write_str("{}");
                }
                f.write_str("{ ")?;
                write_arguments(f, fields)?;
                f.write_str(" }")
            },
            Self::String(value) => write_quoted(f, value),
        }
    }
}

/// Writes `key: value` pairs separated by `, `.
///
/// Shared by node headers (`field(a: 1, b: 2)`) and object values
/// (`{ a: 1, b: 2 }`).
pub(crate) fn write_arguments<W: Write>(
    out: &mut W,
    arguments: &Arguments,
) -> fmt::Result {
    for (idx, (key, value)) in arguments.iter().enumerate() {
        if idx > 0 {
            out.write_str(", ")?;
        }
        write!(out, "{key}: {value}")?;
    }
    Ok(())
}

/// Writes `value` as a double-quoted GraphQL string literal.
fn write_quoted<W: Write>(out: &mut W, value: &str) -> fmt::Result {
    out.write_char('"')?;
    for ch in value.chars() {
        match ch {
            '"' => out.write_str("\\\"")?,
            '\\' => out.write_str("\\\\")?,
            '\n' => out.write_str("\\n")?,
            '\r' => out.write_str("\\r")?,
            '\t' => out.write_str("\\t")?,
            '\u{8}' => out.write_str("\\b")?,
            '\u{c}' => out.write_str("\\f")?,
            ch if ch.is_control() => write!(out, "\\u{:04X}", ch as u32)?,
            ch => out.write_char(ch)?,
        }
    }
    out.write_char('"')
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<EnumValue> for Value {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(value.into())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<u32> for Value {
    fn from(value: u32) -> Self {
        Self::Int(value.into())
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<Arguments> for Value {
    fn from(value: Arguments) -> Self {
        Self::Object(value)
    }
}

/// A node used as a value contributes its arguments as an object value; its
/// name and children do not appear in argument position.
impl From<Node> for Value {
    fn from(node: Node) -> Self {
        Self::Object(node.arguments().clone())
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(values: Vec<T>) -> Self {
        Self::List(values.into_iter().map(Into::into).collect())
    }
}
