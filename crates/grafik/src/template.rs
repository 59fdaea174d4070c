use crate::Arguments;
use crate::Child;
use crate::Node;
use crate::NodeError;
use crate::Value;
use heck::ToLowerCamelCase;

/// What a template producer returns: the template's children and default
/// arguments.
///
/// A `_name` argument, if present, is consumed as the template's node name
/// instead of being rendered.
pub type TemplateParts = (Vec<Child>, Arguments);

impl Node {
    /// Defines a reusable, pre-populated template node.
    ///
    /// The node is named after `name` converted to lowerCamelCase (so a
    /// template defined as `merge_requests` renders as `mergeRequests`),
    /// unless the producer supplies a `_name` argument. The returned node is
    /// immutable; use [`instantiate()`](Self::instantiate) to get a mutable
    /// copy.
    ///
    /// ```rust
    /// use grafik::Arguments;
    /// use grafik::Node;
    ///
    /// let mut merge_requests = Node::define_template("merge_requests", || {
    ///     let mut arguments = Arguments::new();
    ///     arguments.insert("state".to_string(), "opened".into());
    ///     (vec!["iid".into(), "title".into()], arguments)
    /// }).unwrap();
    /// assert!(merge_requests.add_child("author").is_err());
    ///
    /// let mut mine = merge_requests.instantiate([("first", 10)]).unwrap();
    /// mine.add_child("author").unwrap();
    /// assert_eq!(
    ///     mine.to_string(),
    ///     r#"mergeRequests(state: "opened", first: 10) { iid title author }"#,
    /// );
    /// ```
    pub fn define_template(
        name: &str,
        producer: impl FnOnce() -> TemplateParts,
    ) -> Result<Node, NodeError> {
        let (children, mut arguments) = producer();
        let node_name = match arguments.shift_remove("_name") {
            Some(Value::String(node_name)) => node_name,
            Some(other) => {
                return Err(NodeError::TypeMismatch {
                    expected: "a string for `_name`".to_string(),
                    found: other.kind_name().to_string(),
                });
            },
            None => name.to_lower_camel_case(),
        };

        let mut template = Node::builder(node_name)
            .children(children)
            .arguments(arguments)
            .build()?;
        template.immutable = true;
        log::debug!("Defined template `{}`.", template.display_name());
        Ok(template)
    }

    /// Returns a fresh, mutable copy of this node with `overrides` set on top
    /// of its own arguments.
    pub fn instantiate<K, V>(
        &self,
        overrides: impl IntoIterator<Item = (K, V)>,
    ) -> Result<Node, NodeError>
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut node = self.clone();
        node.immutable = false;
        node.add_arguments(overrides)?;
        Ok(node)
    }
}
