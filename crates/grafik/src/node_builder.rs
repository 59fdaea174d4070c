use crate::names;
use crate::Arguments;
use crate::Child;
use crate::Node;
use crate::NodeError;
use crate::Value;
use indexmap::IndexMap;
use indexmap::IndexSet;

/// Builder for [`Node`]s, started with [`Node::builder`].
///
/// Setters never fail; everything is validated by [`build()`](Self::build).
///
/// Argument names passed to [`argument()`](Self::argument) lose one leading
/// underscore, so arguments whose names collide with Rust keywords or with
/// the builder's own options can still be expressed:
///
/// ```rust
/// use grafik::Node;
///
/// let node = Node::builder("issues")
///     .argument("_type", "BUG")
///     .child("title")
///     .build()
///     .unwrap();
/// assert_eq!(node.to_string(), r#"issues(type: "BUG") { title }"#);
/// ```
#[derive(Clone, Debug)]
pub struct NodeBuilder {
    alias: Option<String>,
    arguments: Vec<(String, Value)>,
    children: Vec<Child>,
    gid_base_path: String,
    name: String,
    transparent: Option<Node>,
    valid_arguments: Option<IndexSet<String>>,
    valid_items: Option<IndexSet<String>>,
}

impl NodeBuilder {
    pub(crate) fn new(name: impl Into<String>) -> Self {
        Self {
            alias: None,
            arguments: vec![],
            children: vec![],
            gid_base_path: String::new(),
            name: name.into(),
            transparent: None,
            valid_arguments: None,
            valid_items: None,
        }
    }

    /// Sets the alias, overriding any `alias: name` form in the node's name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn argument(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.arguments.push((name.into(), value.into()));
        self
    }

    pub fn arguments<K, V>(mut self, arguments: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        self.arguments.extend(
            arguments
                .into_iter()
                .map(|(name, value)| (name.into(), value.into())),
        );
        self
    }

    pub fn child(mut self, child: impl Into<Child>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<C: Into<Child>>(mut self, children: impl IntoIterator<Item = C>) -> Self {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Sets the slash-separated path used to normalize the `id` argument into
    /// a global identifier. See [`gid::normalize_gid`](crate::gid::normalize_gid).
    pub fn gid_path(mut self, gid_base_path: impl Into<String>) -> Self {
        self.gid_base_path = gid_base_path.into();
        self
    }

    /// Makes the node transparent: it wraps `wrapped` and forwards all
    /// additions (including this builder's arguments) to it.
    ///
    /// A transparent node has exactly one child, so combining this with
    /// [`child()`](Self::child) fails at build time.
    pub fn transparent(mut self, wrapped: Node) -> Self {
        self.transparent = Some(wrapped);
        self
    }

    /// Restricts which argument names may be added. An empty set rejects
    /// every argument.
    pub fn valid_arguments<S: Into<String>>(
        mut self,
        names: impl IntoIterator<Item = S>,
    ) -> Self {
        self.valid_arguments = Some(names.into_iter().map(Into::into).collect());
        self
    }

    /// Restricts which field names may be added as children. An empty set
    /// rejects every child.
    pub fn valid_items<S: Into<String>>(mut self, names: impl IntoIterator<Item = S>) -> Self {
        self.valid_items = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn build(self) -> Result<Node, NodeError> {
        let (name_alias, name) = names::split_alias(&self.name)?;
        let alias = match self.alias {
            Some(alias) if !names::is_name(&alias) => {
                return Err(NodeError::InvalidName { name: alias });
            },
            Some(alias) => Some(alias),
            None => name_alias.map(str::to_string),
        };
        if alias.is_some() && name.is_empty() {
            return Err(NodeError::InvalidName {
                name: names::display_name(alias.as_deref(), name),
            });
        }

        let children = self
            .children
            .into_iter()
            .map(Child::normalized)
            .collect::<Result<Vec<_>, _>>()?;
        let arguments = normalize_arguments(self.arguments)?;

        let mut node = Node {
            alias,
            gid_base_path: self.gid_base_path,
            name: name.to_string(),
            valid_arguments: self.valid_arguments,
            valid_items: self.valid_items,
            ..Node::default()
        };

        if let Some(mut wrapped) = self.transparent {
            if !children.is_empty() {
                return Err(NodeError::TypeMismatch {
                    expected: "exactly one transparent child".to_string(),
                    found: format!("{} additional children", children.len()),
                });
            }
            if wrapped.gid_base_path.is_empty() {
                wrapped.gid_base_path = node.gid_base_path.to_string();
            }
            node.transparent = true;
            node.children.insert(wrapped.key().to_string(), Child::Node(wrapped));
        }

        node.check_add(&children, &arguments)?;
        node.apply_add(children, arguments);
        Ok(node)
    }
}

/// Strips one leading underscore from each argument name and validates the
/// result.
pub(crate) fn normalize_arguments(
    arguments: impl IntoIterator<Item = (String, Value)>,
) -> Result<Arguments, NodeError> {
    let mut normalized = IndexMap::new();
    for (name, value) in arguments {
        let stripped = name.strip_prefix('_').unwrap_or(&name);
        if !names::is_name(stripped) {
            return Err(NodeError::InvalidName { name });
        }
        normalized.insert(stripped.to_string(), value);
    }
    Ok(normalized)
}
