/// Errors raised while constructing or mutating a [`Node`](crate::Node).
///
/// Every mutating operation validates its input before touching the tree, so a
/// returned `NodeError` always leaves the node exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum NodeError {
    #[error(
        "Enum value `{enum_name}` has no attribute named `{attribute}`."
    )]
    AttributeNotFound {
        attribute: String,
        enum_name: String,
    },

    #[error("Attempted to modify `{node}`, but it is immutable.")]
    ImmutableNode {
        node: String,
    },

    #[error(
        "Attempted to add an argument named `{argument}` to `{node}`, but \
        `{argument}` is not one of its valid arguments."
    )]
    InvalidArgument {
        argument: String,
        node: String,
    },

    #[error(
        "Attempted to add `{item}` to `{node}`, but `{item}` is not one of \
        its valid items."
    )]
    InvalidItem {
        item: String,
        node: String,
    },

    #[error("`{name}` is not a valid GraphQL name.")]
    InvalidName {
        name: String,
    },

    #[error("Expected {expected}, but found {found}.")]
    TypeMismatch {
        expected: String,
        found: String,
    },
}
