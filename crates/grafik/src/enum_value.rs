use crate::names;
use crate::NodeError;
use crate::Value;
use indexmap::IndexMap;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

/// A bare (unquoted) enum token usable as an argument value, e.g. the `DESC`
/// in `issues(sort: DESC)`.
///
/// Enum values compare and hash case-insensitively by name. Besides its name
/// an enum value can carry a fixed bag of extra attributes and a description;
/// neither takes part in equality or rendering.
#[derive(Clone, Debug)]
pub struct EnumValue {
    attributes: IndexMap<String, Value>,
    description: Option<String>,
    name: String,
}

impl EnumValue {
    /// Creates an enum value, failing with [`NodeError::InvalidName`] if
    /// `name` is not a valid GraphQL name.
    pub fn new(name: impl Into<String>) -> Result<Self, NodeError> {
        let name = name.into();
        if !names::is_name(&name) {
            return Err(NodeError::InvalidName { name });
        }
        Ok(Self {
            attributes: IndexMap::new(),
            description: None,
            name,
        })
    }

    /// Declares an extra attribute, replacing any earlier attribute with the
    /// same key.
    pub fn with_attribute(
        mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Looks up a declared attribute.
    ///
    /// Undeclared keys fail with [`NodeError::AttributeNotFound`].
    pub fn attribute(&self, key: &str) -> Result<&Value, NodeError> {
        self.attributes.get(key).ok_or_else(|| NodeError::AttributeNotFound {
            attribute: key.to_string(),
            enum_name: self.name.to_string(),
        })
    }

    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }
}

impl PartialEq for EnumValue {
    fn eq(&self, other: &Self) -> bool {
        self.name.eq_ignore_ascii_case(&other.name)
    }
}

impl Eq for EnumValue {}

impl PartialEq<str> for EnumValue {
    fn eq(&self, other: &str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

impl PartialEq<&str> for EnumValue {
    fn eq(&self, other: &&str) -> bool {
        self.name.eq_ignore_ascii_case(other)
    }
}

impl Hash for EnumValue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.name.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
        state.write_u8(0xff);
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for EnumValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
