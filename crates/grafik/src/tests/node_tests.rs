//! Tests for `Node` lookup, equality and transparent wrappers.

use crate::tests::utils;
use crate::Child;
use crate::Node;
use crate::NodeError;
use crate::Value;
use std::collections::HashSet;

fn project() -> Node {
    Node::builder("project")
        .argument("id", 12)
        .child("name")
        .child(Node::builder("owner").child("email").build().unwrap())
        .child("mine: issues")
        .build()
        .unwrap()
}

// =============================================================================
// Lookup
// =============================================================================

#[test]
fn test_get_and_contains() {
    let project = project();
    assert!(project.contains("name"));
    assert!(project.contains("mine"));
    assert!(!project.contains("issues"));
    assert_eq!(project.get("name"), Some(&Child::from("name")));
    assert!(project.node("owner").is_some());
    assert!(project.node("name").is_none());
    assert_eq!(project.children().len(), 3);
}

#[test]
fn test_index_by_key() {
    let project = project();
    assert_eq!(project["owner"].to_string(), "owner { email }");
}

#[test]
#[should_panic(expected = "no child found for key `missing`")]
fn test_index_panics_on_missing_key() {
    let _ = &project()["missing"];
}

/// `node_mut` promotes a bare field to a node in place.
#[test]
fn test_node_mut_promotes_fields() {
    let mut project = project();
    project
        .node_mut("mine")
        .unwrap()
        .unwrap()
        .add_children(["title", "state"])
        .unwrap();
    assert_eq!(
        project.to_string(),
        r#"project(id: "gid://12") { name owner { email } mine: issues { title state } }"#,
    );
}

#[test]
fn test_node_mut_missing_key() {
    let mut project = project();
    assert!(project.node_mut("missing").unwrap().is_none());
}

#[test]
fn test_node_mut_on_immutable_node() {
    let mut template =
        Node::define_template("project", || (vec!["name".into()], Default::default())).unwrap();
    assert_eq!(
        template.node_mut("name").unwrap_err(),
        NodeError::ImmutableNode {
            node: "project".to_string(),
        },
    );
}

// =============================================================================
// Equality and hashing
// =============================================================================

#[test]
fn test_structural_equality() {
    assert_eq!(project(), project());

    let mut reordered = Node::builder("project")
        .argument("id", 12)
        .child("mine: issues")
        .child("name")
        .build()
        .unwrap();
    reordered
        .add_child(Node::builder("owner").child("email").build().unwrap())
        .unwrap();
    assert_ne!(project(), reordered);

    let mut changed = project();
    changed.add_argument("first", 1).unwrap();
    assert_ne!(project(), changed);
}

/// Nodes hash by key, so a set holds one node per key.
#[test]
fn test_hash_by_key() {
    let mut with_child = Node::new("project").unwrap();
    with_child.add_child("name").unwrap();
    let set: HashSet<Node> = [with_child, Node::new("project").unwrap(), Node::new("group").unwrap()]
        .into_iter()
        .collect();
    assert_eq!(set.len(), 3);
    assert!(set.iter().filter(|node| *node == "project").count() == 2);
}

#[test]
fn test_compares_with_str_by_key() {
    let node = Node::new("mine: project").unwrap();
    assert!(node == "mine");
    assert!(node != "project");
}

// =============================================================================
// Display
// =============================================================================

#[test]
fn test_display_compact_and_pretty() {
    let node = Node::builder("project").child("name").build().unwrap();
    assert_eq!(format!("{node}"), "project { name }");
    assert_eq!(format!("{node:#}"), "project {\n  name\n}");
}

#[test]
fn test_empty_anonymous_node_renders_nothing() {
    assert_eq!(Node::new("").unwrap().to_string(), "");
}

// =============================================================================
// Transparent wrappers
// =============================================================================

#[test]
fn test_nodes_wrapper_default_alias() {
    let inner = Node::builder("").children(["item1"]).build().unwrap();
    let project = Node::nodes_wrapper(Node::builder("project"), inner, None).unwrap();
    assert_eq!(project.to_string(), "project { project_nodes: nodes { item1 } }");

    let nodes = project.node("project_nodes").unwrap();
    assert!(nodes.is_transparent());
    assert_eq!(nodes.name(), "nodes");
    assert!(nodes.wrapped().is_some());
    assert!(project.wrapped().is_none());
}

/// Children added to the wrapper land in the wrapped selection.
#[test]
fn test_nodes_wrapper_with_initial_items() {
    let inner = Node::builder("").child("item1").build().unwrap();
    let mut project =
        Node::nodes_wrapper(Node::builder("project").argument("id", 12), inner, None).unwrap();
    assert_eq!(
        project.to_string(),
        r#"project(id: "gid://12") { project_nodes: nodes { item1 } }"#,
    );

    project.add_child("item2").unwrap();
    assert_eq!(
        project.to_string(),
        r#"project(id: "gid://12") { project_nodes: nodes { item1 item2 } }"#,
    );
    assert_eq!(project.children().len(), 1);
}

#[test]
fn test_nodes_wrapper_no_initial_items() {
    let mut project = Node::nodes_wrapper(
        Node::builder("project").argument("id", 12),
        Node::new("").unwrap(),
        None,
    )
    .unwrap();
    project.add_children(["item1", "item2"]).unwrap();
    assert_eq!(
        project.to_string(),
        r#"project(id: "gid://12") { project_nodes: nodes { item1 item2 } }"#,
    );
}

/// Arguments stay on the outer node; children still go to the selection.
#[test]
fn test_nodes_wrapper_keeps_arguments_outside() {
    let inner = Node::builder("").child("iid").build().unwrap();
    let mut issues = Node::nodes_wrapper(Node::builder("issues"), inner, Some("open")).unwrap();
    issues
        .add(
            vec![Child::from("title")],
            utils::arguments([("state", Value::from("opened"))]),
        )
        .unwrap();
    assert_eq!(
        issues.to_string(),
        r#"issues(state: "opened") { open: nodes { iid title } }"#,
    );
    assert_eq!(issues.nodes_child().unwrap().key(), "open");
}

/// The wrapped selection's restrictions apply to forwarded children, and a
/// rejected add changes nothing.
#[test]
fn test_nodes_wrapper_forwarding_is_validated() {
    let inner = Node::builder("").valid_items(["iid"]).build().unwrap();
    let mut project = Node::nodes_wrapper(Node::builder("project"), inner, None).unwrap();
    assert_eq!(
        project.add_child("title").unwrap_err(),
        NodeError::InvalidItem {
            item: "title".to_string(),
            node: "".to_string(),
        },
    );
    project.add_child("iid").unwrap();
    assert_eq!(project.to_string(), "project { project_nodes: nodes { iid } }");
}

/// Ordinary nodes have no `nodes` child to forward to.
#[test]
fn test_plain_node_has_no_nodes_child() {
    assert!(project().nodes_child().is_none());
}

#[test]
fn test_nodes_wrapper_custom_alias() {
    let inner = Node::builder("").children(["title"]).build().unwrap();
    let project = Node::nodes_wrapper(Node::builder("issues"), inner, Some("open")).unwrap();
    assert_eq!(project.to_string(), "issues { open: nodes { title } }");
}

/// Lookups and `node_mut` reach through the transparent layer.
#[test]
fn test_transparent_lookup_reaches_wrapped_children() {
    let inner = Node::builder("").children(["item1", "item2"]).build().unwrap();
    let mut project = Node::nodes_wrapper(Node::builder("project"), inner, None).unwrap();

    let nodes = project.node_mut("project_nodes").unwrap().unwrap();
    assert!(nodes.contains("item1"));
    nodes.node_mut("item1").unwrap().unwrap().add_child("sub").unwrap();

    assert_eq!(
        project.to_string(),
        "project { project_nodes: nodes { item1 { sub } item2 } }",
    );
}

#[test]
fn test_transparent_with_empty_selection() {
    let project = Node::nodes_wrapper(
        Node::builder("project"),
        Node::new("").unwrap(),
        None,
    )
    .unwrap();
    assert_eq!(project.to_string(), "project { project_nodes: nodes }");
}

#[test]
fn test_nodes_wrapper_propagates_outer_errors() {
    let inner = Node::new("").unwrap();
    assert!(Node::nodes_wrapper(Node::builder("bad name"), inner, None).is_err());
}

#[test]
fn test_wrapper_parses_back() {
    let inner = Node::builder("").children(["item1"]).build().unwrap();
    let project = Node::nodes_wrapper(Node::builder("project"), inner, None).unwrap();
    let reparsed = utils::parse_node(&project.to_string());
    assert_eq!(reparsed.to_string(), project.to_string());
}
