//! Mutating operations on [`Node`]: `add` and friends, `add_to_all` and
//! `update`.
//!
//! Every operation validates its whole input before touching the tree, so a
//! failed call leaves the node exactly as it was.

use crate::gid;
use crate::node_builder::normalize_arguments;
use crate::Arguments;
use crate::Child;
use crate::Node;
use crate::NodeError;
use crate::Value;

impl Node {
    /// Adds children and arguments.
    ///
    /// A child whose [key](Child::key) is already present replaces the old
    /// entry and moves to the end. An argument whose name is already present
    /// is overwritten in place. Argument names lose one leading underscore,
    /// and an `id` argument is normalized into a global identifier.
    ///
    /// Fails with [`NodeError::ImmutableNode`] on immutable nodes and with
    /// [`NodeError::InvalidItem`] / [`NodeError::InvalidArgument`] when the
    /// node restricts what may be added.
    ///
    /// On a node built by [`Node::nodes_wrapper`] the children go to the
    /// wrapped selection instead.
    pub fn add(&mut self, children: Vec<Child>, arguments: Arguments) -> Result<(), NodeError> {
        let children = normalize_children(children)?;
        let arguments = normalize_arguments(arguments)?;

        let Some(nodes) = self.nodes_child() else {
            self.check_add(&children, &arguments)?;
            self.apply_add(children, arguments);
            return Ok(());
        };
        nodes.check_add(&children, &Arguments::new())?;
        self.check_add(&[], &arguments)?;

        if let Some(nodes) = self.nodes_child_mut() {
            log::trace!("Forwarding children to `{}`.", nodes.display_name());
            nodes.apply_add(children, Arguments::new());
        }
        self.apply_add(vec![], arguments);
        Ok(())
    }

    pub fn add_child(&mut self, child: impl Into<Child>) -> Result<(), NodeError> {
        self.add(vec![child.into()], Arguments::new())
    }

    pub fn add_children<C: Into<Child>>(
        &mut self,
        children: impl IntoIterator<Item = C>,
    ) -> Result<(), NodeError> {
        self.add(children.into_iter().map(Into::into).collect(), Arguments::new())
    }

    pub fn add_argument(
        &mut self,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<(), NodeError> {
        self.add_arguments([(name.into(), value.into())])
    }

    pub fn add_arguments<K, V>(
        &mut self,
        arguments: impl IntoIterator<Item = (K, V)>,
    ) -> Result<(), NodeError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let arguments = arguments
            .into_iter()
            .map(|(name, value)| (name.into(), value.into()))
            .collect();
        self.add(vec![], arguments)
    }

    /// Adds one child node per `(name, children)` entry.
    ///
    /// ```rust
    /// use grafik::Node;
    ///
    /// let mut project = Node::new("project").unwrap();
    /// project.add_bundle([("owner", vec!["name", "email"])]).unwrap();
    /// assert_eq!(project.to_string(), "project { owner { name email } }");
    /// ```
    pub fn add_bundle<N, I, C>(&mut self, bundle: impl IntoIterator<Item = (N, I)>) -> Result<(), NodeError>
    where
        N: Into<String>,
        I: IntoIterator<Item = C>,
        C: Into<Child>,
    {
        let children = bundle
            .into_iter()
            .map(|(name, children)| {
                Node::builder(name).children(children).build().map(Child::Node)
            })
            .collect::<Result<Vec<_>, _>>()?;
        self.add(children, Arguments::new())
    }

    /// Shorthand for `add_argument("first", count)`.
    pub fn first(&mut self, count: u32) -> Result<(), NodeError> {
        self.add_argument("first", count)
    }

    /// Shorthand for `add_argument("after", cursor)`.
    pub fn after(&mut self, cursor: &str) -> Result<(), NodeError> {
        self.add_argument("after", cursor)
    }

    /// Applies the same [`add`](Self::add) to every child *node* (bare field
    /// children are skipped). Only direct children are affected.
    pub fn add_to_all(&mut self, children: Vec<Child>, arguments: Arguments) -> Result<(), NodeError> {
        let children = normalize_children(children)?;
        let arguments = normalize_arguments(arguments)?;
        self.check_mutable()?;

        let targets = self.content().children.values().filter_map(Child::as_node);
        for target in targets {
            target.check_add(&children, &arguments)?;
        }

        let targets = self.content_mut().children.values_mut().filter_map(Child::as_node_mut);
        for target in targets {
            target.apply_add(children.clone(), arguments.clone());
        }
        Ok(())
    }

    /// Merges `other` into this node.
    ///
    /// Each child of `other` is matched against this node's children by key:
    ///
    /// - both sides are nodes: merged recursively
    /// - `other`'s child is a bare field: the existing child is kept
    /// - this node's child is a bare field and `other`'s is a node: the node
    ///   replaces the field in place
    /// - no match: the child is appended
    ///
    /// `other`'s arguments are then set on top of this node's own, so on
    /// conflicting argument values the merged-in node wins. A transparent node
    /// delegates the merge to the node it wraps; `other`'s name and alias are
    /// ignored.
    ///
    /// The merge is all-or-nothing: on error this node is left unchanged.
    pub fn update(&mut self, other: &Node) -> Result<(), NodeError> {
        log::debug!(
            "Merging `{}` into `{}`.",
            other.display_name(),
            self.display_name(),
        );
        let mut merged = self.clone();
        merged.merge_from(other)?;
        *self = merged;
        Ok(())
    }

    fn merge_from(&mut self, other: &Node) -> Result<(), NodeError> {
        self.check_mutable()?;
        if let Some(inner) = self.wrapped_mut() {
            log::trace!("Delegating merge through transparent node.");
            return inner.merge_from(other);
        }

        let other = other.content();
        for incoming in other.children.values() {
            let key = incoming.key();
            let existing_is_node = self.children.get(key).map(|child| child.as_node().is_some());
            match (existing_is_node, incoming) {
                (Some(_), Child::Field(_)) => {},
                (Some(true), Child::Node(incoming)) => {
                    if let Some(Child::Node(existing)) = self.children.get_mut(key) {
                        existing.merge_from(incoming)?;
                    }
                },
                (Some(false), Child::Node(_)) | (None, _) => {
                    self.check_items(std::slice::from_ref(incoming))?;
                    self.children.insert(key.to_string(), incoming.clone());
                },
            }
        }

        self.check_arguments(&other.arguments)?;
        for (name, value) in &other.arguments {
            self.insert_argument(name.to_string(), value.clone());
        }
        Ok(())
    }

    // =========================================================================
    // Validation and application
    // =========================================================================

    /// Checks that `children` and `arguments` may be added to this node (and,
    /// for a transparent node, to the node it wraps).
    pub(crate) fn check_add(&self, children: &[Child], arguments: &Arguments) -> Result<(), NodeError> {
        self.check_mutable()?;
        self.check_items(children)?;
        self.check_arguments(arguments)?;
        match self.wrapped() {
            Some(inner) => inner.check_add(children, arguments),
            None => Ok(()),
        }
    }

    fn check_items(&self, children: &[Child]) -> Result<(), NodeError> {
        let Some(valid_items) = &self.valid_items else {
            return Ok(());
        };
        match children.iter().find(|child| !valid_items.contains(child.name())) {
            Some(child) => Err(NodeError::InvalidItem {
                item: child.name().to_string(),
                node: self.display_name(),
            }),
            None => Ok(()),
        }
    }

    fn check_arguments(&self, arguments: &Arguments) -> Result<(), NodeError> {
        let Some(valid_arguments) = &self.valid_arguments else {
            return Ok(());
        };
        match arguments.keys().find(|name| !valid_arguments.contains(*name)) {
            Some(name) => Err(NodeError::InvalidArgument {
                argument: name.to_string(),
                node: self.display_name(),
            }),
            None => Ok(()),
        }
    }

    /// Adds already-validated children and arguments.
    pub(crate) fn apply_add(&mut self, children: Vec<Child>, arguments: Arguments) {
        if let Some(inner) = self.wrapped_mut() {
            log::trace!("Delegating add through transparent node.");
            inner.apply_add(children, arguments);
            return;
        }

        for child in children {
            let key = child.key().to_string();
            self.children.shift_remove(&key);
            self.children.insert(key, child);
        }
        for (name, value) in arguments {
            self.insert_argument(name, value);
        }
    }

    fn insert_argument(&mut self, name: String, value: Value) {
        let value = if name == "id" {
            gid::normalize_id_value(&self.gid_base_path, value)
        } else {
            value
        };
        self.arguments.insert(name, value);
    }
}

fn normalize_children(children: Vec<Child>) -> Result<Vec<Child>, NodeError> {
    children.into_iter().map(Child::normalized).collect()
}
