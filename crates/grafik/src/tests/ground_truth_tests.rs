//! Checks that serialized output is accepted by an independent GraphQL
//! parser when wrapped in an operation.

use crate::tests::utils;
use crate::EnumValue;
use crate::Node;
use crate::SerializeOptions;
use crate::Value;
use proptest::prelude::*;

fn assert_valid_graphql(selection: &str) {
    let document = format!("query {{ {selection} }}");
    if let Err(error) = graphql_parser::query::parse_query::<String>(&document) {
        panic!("`{document}` is not valid GraphQL: {error}");
    }
}

#[test]
fn test_handwritten_queries_are_valid() {
    let inner = Node::builder("").children(["iid", "title"]).build().unwrap();
    let mut project = Node::nodes_wrapper(
        Node::builder("project").argument("fullPath", "group/project"),
        inner,
        Some("mrs"),
    )
    .unwrap();
    project
        .add_arguments([
            ("sort", Value::from(EnumValue::new("CREATED_DESC").unwrap())),
            ("labels", Value::from(vec!["bug", "ui \"quoted\""])),
            ("first", Value::from(-1)),
        ])
        .unwrap();
    project.add_child("mine: name").unwrap();

    assert_valid_graphql(&project.to_string());
    assert_valid_graphql(&format!("{project:#}"));
}

#[test]
fn test_parsed_queries_are_valid_after_reserialization() {
    let selections = crate::parse_str(
        r#"a: project(id: 3, filter: { state: OPENED, ids: [1, 2] }) { name, owner { email } } other"#,
    )
    .unwrap();
    assert_valid_graphql(&crate::serialize_children(&selections, &SerializeOptions::compact()));
    assert_valid_graphql(&crate::serialize_children(&selections, &SerializeOptions::pretty(2)));
}

proptest! {
    #[test]
    fn test_generated_queries_are_valid(node in utils::node_strategy()) {
        assert_valid_graphql(&crate::serialize(&node, &SerializeOptions::compact()));
        assert_valid_graphql(&crate::serialize(&node, &SerializeOptions::pretty(2)));
    }
}
