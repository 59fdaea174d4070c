use crate::names;
use crate::Node;
use crate::NodeError;
use serde::Serialize;
use std::fmt;

/// One entry in a node's selection: either a bare field reference or a nested
/// [`Node`].
///
/// A `Field` holds the field's display text (`name` or `alias: name`) in
/// canonical form.
#[derive(Clone, Debug, Serialize)]
#[serde(untagged)]
pub enum Child {
    Field(String),
    Node(Node),
}

impl Child {
    /// Creates a bare field child from `name` or `alias: name` text.
    pub fn field(text: &str) -> Result<Self, NodeError> {
        Self::Field(text.to_string()).normalized()
    }

    pub fn as_field(&self) -> Option<&str> {
        if let Self::Field(text) = self {
            Some(text.as_str())
        } else {
            None
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        if let Self::Node(node) = self {
            Some(node)
        } else {
            None
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut Node> {
        if let Self::Node(node) = self {
            Some(node)
        } else {
            None
        }
    }

    /// The identifier this child is looked up and deduplicated by: its alias
    /// if it has one, otherwise its name.
    pub fn key(&self) -> &str {
        match self {
            Self::Field(text) => match text.split_once(':') {
                Some((alias, _)) => alias.trim(),
                None => text.as_str(),
            },
            Self::Node(node) => node.key(),
        }
    }

    /// The underlying field name, ignoring any alias.
    pub fn name(&self) -> &str {
        match self {
            Self::Field(text) => match text.split_once(':') {
                Some((_, name)) => name.trim(),
                None => text.as_str(),
            },
            Self::Node(node) => node.name(),
        }
    }

    /// Validates this child's name and rewrites a field's display text into
    /// canonical `alias: name` form.
    pub(crate) fn normalized(self) -> Result<Self, NodeError> {
        match self {
            Self::Field(text) => {
                let (alias, name) = names::split_alias(&text)?;
                if name.is_empty() {
                    return Err(NodeError::InvalidName { name: text });
                }
                Ok(Self::Field(names::display_name(alias, name)))
            },
            Self::Node(node) => Ok(Self::Node(node)),
        }
    }
}

/// Fields and nodes compare equal when the node is a plain leaf (no arguments,
/// no children) with the same alias and name.
impl PartialEq for Child {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Field(lhs), Self::Field(rhs)) => lhs == rhs,
            (Self::Node(lhs), Self::Node(rhs)) => lhs == rhs,
            (Self::Field(text), Self::Node(node))
            | (Self::Node(node), Self::Field(text)) => {
                node.arguments().is_empty()
                    && !node.has_children()
                    && node.display_name() == *text
            },
        }
    }
}

impl Eq for Child {}

impl PartialEq<str> for Child {
    fn eq(&self, other: &str) -> bool {
        self.key() == other
    }
}

impl PartialEq<&str> for Child {
    fn eq(&self, other: &&str) -> bool {
        self.key() == *other
    }
}

impl fmt::Display for Child {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(text) => f.write_str(text),
            Self::Node(node) => fmt::Display::fmt(node, f),
        }
    }
}

/// Bare field text. Invalid names are rejected when the child is added to a
/// node.
impl From<&str> for Child {
    fn from(text: &str) -> Self {
        Self::Field(text.to_string())
    }
}

impl From<String> for Child {
    fn from(text: String) -> Self {
        Self::Field(text)
    }
}

impl From<Node> for Child {
    fn from(node: Node) -> Self {
        Self::Node(node)
    }
}
