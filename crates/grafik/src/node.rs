use crate::gid;
use crate::names;
use crate::serializer;
use crate::Arguments;
use crate::Child;
use crate::NodeBuilder;
use crate::NodeError;
use crate::SerializeOptions;
use crate::Value;
use crate::DEFAULT_INDENT;
use indexmap::IndexMap;
use indexmap::IndexSet;
use serde::ser::SerializeMap;
use serde::Serialize;
use serde::Serializer;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Index;

/// A GraphQL field/selection: an optional alias, a name, an ordered argument
/// map and an ordered list of child selections.
///
/// Children are keyed by their display identifier ([`Child::key()`]): adding a
/// child whose key is already present replaces the old entry and moves it to
/// the end, so a node never holds two children with the same key.
///
/// A *transparent* node wraps exactly one child node and forwards every
/// mutation (and lookup) to it. In rendered text the wrapped layer is
/// invisible: the transparent node's header is followed directly by the
/// wrapped node's arguments and children. This lets several named wrappers
/// share one selection (see [`Node::nodes_wrapper`]).
///
/// Nodes compare structurally (name, alias, arguments and ordered children of
/// the effective content), and hash by [`key()`](Node::key).
#[derive(Clone, Debug, Default)]
pub struct Node {
    pub(crate) alias: Option<String>,
    pub(crate) arguments: Arguments,
    pub(crate) children: IndexMap<String, Child>,
    pub(crate) gid_base_path: String,
    pub(crate) immutable: bool,
    pub(crate) name: String,
    pub(crate) nodes_key: Option<String>,
    pub(crate) transparent: bool,
    pub(crate) valid_arguments: Option<IndexSet<String>>,
    pub(crate) valid_items: Option<IndexSet<String>>,
}

impl Node {
    /// Starts building a node. `name` may be empty (an anonymous node), a
    /// name, or `alias: name`.
    pub fn builder(name: impl Into<String>) -> NodeBuilder {
        NodeBuilder::new(name)
    }

    /// Shorthand for a node with no children or arguments.
    pub fn new(name: &str) -> Result<Self, NodeError> {
        NodeBuilder::new(name).build()
    }

    /// Builds the common `name { <alias>: nodes { ...inner... } }` shape.
    ///
    /// The `nodes` child is transparent: it wraps `inner` (usually an
    /// anonymous node). Children added to the returned node through
    /// [`add()`](Self::add) and its shorthands land in `inner`, while
    /// arguments stay on the outer node. `node_alias` defaults to
    /// `<name>_nodes`.
    ///
    /// Forwarding is a property of the built wrapper. Parsing the rendered
    /// text back yields an ordinary node.
    ///
    /// ```rust
    /// use grafik::Node;
    ///
    /// let inner = Node::builder("").child("item1").build().unwrap();
    /// let mut project = Node::nodes_wrapper(
    ///     Node::builder("project").argument("id", 12),
    ///     inner,
    ///     None,
    /// ).unwrap();
    /// project.add_child("item2").unwrap();
    /// project.first(10).unwrap();
    ///
    /// assert_eq!(
    ///     project.to_string(),
    ///     r#"project(id: "gid://12", first: 10) { project_nodes: nodes { item1 item2 } }"#,
    /// );
    /// ```
    pub fn nodes_wrapper(
        outer: NodeBuilder,
        inner: Node,
        node_alias: Option<&str>,
    ) -> Result<Self, NodeError> {
        let mut outer = outer.build()?;
        let node_alias = match node_alias {
            Some(alias) => alias.to_string(),
            None => format!("{}_nodes", outer.name),
        };
        let nodes = Node::builder("nodes")
            .alias(node_alias.as_str())
            .transparent(inner)
            .build()?;
        outer.add_child(nodes)?;
        outer.nodes_key = Some(node_alias);
        Ok(outer)
    }

    /// Creates a leaf node from canonical `name` / `alias: name` field text.
    pub(crate) fn from_field_text(text: &str) -> Result<Self, NodeError> {
        let (alias, name) = names::split_alias(text)?;
        Ok(Self {
            alias: alias.map(str::to_string),
            name: name.to_string(),
            ..Self::default()
        })
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn alias(&self) -> Option<&str> {
        self.alias.as_deref()
    }

    pub fn name(&self) -> &str {
        self.name.as_str()
    }

    /// The identifier this node is looked up and deduplicated by: its alias
    /// if it has one, otherwise its name.
    pub fn key(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// `alias: name`, or just `name`.
    pub fn display_name(&self) -> String {
        names::display_name(self.alias(), &self.name)
    }

    /// The arguments rendered for this node (the wrapped node's, for a
    /// transparent node).
    pub fn arguments(&self) -> &Arguments {
        &self.content().arguments
    }

    pub fn argument(&self, key: &str) -> Option<&Value> {
        self.arguments().get(key)
    }

    /// The children rendered for this node (the wrapped node's, for a
    /// transparent node), in order.
    pub fn children(&self) -> impl ExactSizeIterator<Item = &Child> + '_ {
        self.content().children.values()
    }

    pub fn has_children(&self) -> bool {
        !self.content().children.is_empty()
    }

    pub fn gid_base_path(&self) -> &str {
        self.gid_base_path.as_str()
    }

    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn valid_arguments(&self) -> Option<&IndexSet<String>> {
        self.valid_arguments.as_ref()
    }

    pub fn valid_items(&self) -> Option<&IndexSet<String>> {
        self.valid_items.as_ref()
    }

    /// The node a transparent node delegates to. `None` for ordinary nodes.
    pub fn wrapped(&self) -> Option<&Node> {
        if !self.transparent {
            return None;
        }
        self.children.values().next().and_then(Child::as_node)
    }

    /// The transparent `nodes` child of a node built by
    /// [`nodes_wrapper()`](Self::nodes_wrapper).
    pub fn nodes_child(&self) -> Option<&Node> {
        let key = self.nodes_key.as_deref()?;
        self.children.get(key).and_then(Child::as_node)
    }

    pub(crate) fn nodes_child_mut(&mut self) -> Option<&mut Node> {
        let key = self.nodes_key.as_deref()?;
        self.children.get_mut(key).and_then(Child::as_node_mut)
    }

    pub fn wrapped_mut(&mut self) -> Option<&mut Node> {
        if !self.transparent {
            return None;
        }
        self.children.values_mut().next().and_then(Child::as_node_mut)
    }

    /// Follows the chain of transparent wrappers down to the node whose
    /// arguments and children are actually rendered.
    pub(crate) fn content(&self) -> &Node {
        match self.wrapped() {
            Some(inner) => inner.content(),
            None => self,
        }
    }

    pub(crate) fn content_mut(&mut self) -> &mut Node {
        if self.wrapped().is_none() {
            return self;
        }
        match self.children.values_mut().next() {
            Some(Child::Node(inner)) => inner.content_mut(),
            _ => unreachable!("a transparent node always wraps a node child"),
        }
    }

    // =========================================================================
    // Child lookup
    // =========================================================================

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Looks a child up by its [key](Child::key).
    pub fn get(&self, key: &str) -> Option<&Child> {
        self.content().children.get(key)
    }

    /// Looks a nested node up by its key. Bare field children return `None`.
    pub fn node(&self, key: &str) -> Option<&Node> {
        self.get(key).and_then(Child::as_node)
    }

    /// Returns the child with the given key as a mutable node.
    ///
    /// A bare field child is first promoted, in place, to an empty node with
    /// the same alias and name, so it can be extended:
    ///
    /// ```rust
    /// let mut node = grafik::parse_str(r#"node(id: "gid://12") { item1 item2 item3 }"#)
    ///     .unwrap()
    ///     .remove(0);
    /// let node = node.as_node_mut().unwrap();
    /// node.node_mut("item1").unwrap().unwrap().add_children(["sub1", "sub2"]).unwrap();
    ///
    /// assert_eq!(
    ///     node.to_string(),
    ///     r#"node(id: "gid://12") { item1 { sub1 sub2 } item2 item3 }"#,
    /// );
    /// ```
    pub fn node_mut(&mut self, key: &str) -> Result<Option<&mut Node>, NodeError> {
        self.check_mutable()?;
        if self.transparent {
            return match self.wrapped_mut() {
                Some(inner) => inner.node_mut(key),
                None => Ok(None),
            };
        }

        let Some(child) = self.children.get_mut(key) else {
            return Ok(None);
        };
        if let Child::Field(text) = child {
            let promoted = Node::from_field_text(text)?;
            *child = Child::Node(promoted);
        }
        Ok(child.as_node_mut())
    }

    /// Returns the numeric id in `candidate` if its gid path is compatible
    /// with this node's gid base path. See [`gid::matching_gid`].
    pub fn matching_gid<'a>(&self, candidate: &'a str) -> Option<&'a str> {
        gid::matching_gid(&self.gid_base_path, candidate)
    }

    pub(crate) fn check_mutable(&self) -> Result<(), NodeError> {
        if self.immutable {
            return Err(NodeError::ImmutableNode {
                node: self.display_name(),
            });
        }
        Ok(())
    }
}

impl Index<&str> for Node {
    type Output = Child;

    fn index(&self, key: &str) -> &Child {
        match self.get(key) {
            Some(child) => child,
            None => panic!("no child found for key `{key}` in `{}`", self.display_name()),
        }
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        let lhs = self.content();
        let rhs = other.content();
        self.name == other.name
            && self.alias == other.alias
            && lhs.arguments == rhs.arguments
            && lhs.children.len() == rhs.children.len()
            && lhs
                .children
                .iter()
                .zip(rhs.children.iter())
                .all(|((lhs_key, lhs_child), (rhs_key, rhs_child))| {
                    lhs_key == rhs_key && lhs_child == rhs_child
                })
    }
}

impl Eq for Node {}

impl PartialEq<str> for Node {
    fn eq(&self, other: &str) -> bool {
        self.key() == other
    }
}

impl PartialEq<&str> for Node {
    fn eq(&self, other: &&str) -> bool {
        self.key() == *other
    }
}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// `{}` renders compact single-line text; `{:#}` renders the pretty layout
/// with the default indent.
impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let options = if f.alternate() {
            SerializeOptions::pretty(DEFAULT_INDENT)
        } else {
            SerializeOptions::compact()
        };
        serializer::write_node(f, self, &options)
    }
}

/// Serializes as a mapping with `name`, plus `alias`, `arguments` and
/// `children` when present.
impl Serialize for Node {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(None)?;
        map.serialize_entry("name", &self.name)?;
        if let Some(alias) = &self.alias {
            map.serialize_entry("alias", alias)?;
        }
        if !self.arguments().is_empty() {
            map.serialize_entry("arguments", self.arguments())?;
        }
        if self.has_children() {
            let children: Vec<&Child> = self.children().collect();
            map.serialize_entry("children", &children)?;
        }
        map.end()
    }
}
