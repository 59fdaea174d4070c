//! Shared test helpers and proptest strategies.

use crate::token::Token;
use crate::token::TokenKind;
use crate::Arguments;
use crate::Child;
use crate::EnumValue;
use crate::Node;
use crate::Value;
use proptest::prelude::*;

/// Builds a token at `position`. Mock tokens own their text so they can
/// outlive the test's source strings.
pub fn mock_token(kind: TokenKind<'static>, position: usize) -> Token<'static> {
    Token::new(kind, position)
}

pub fn mock_name_token(name: &str, position: usize) -> Token<'static> {
    mock_token(TokenKind::Name(name.to_string().into()), position)
}

pub fn mock_eof_token(position: usize) -> Token<'static> {
    mock_token(TokenKind::Eof, position)
}

/// A token source that replays a fixed list of tokens.
pub struct MockTokenSource {
    tokens: std::vec::IntoIter<Token<'static>>,
}

impl MockTokenSource {
    pub fn new(tokens: Vec<Token<'static>>) -> Self {
        Self {
            tokens: tokens.into_iter(),
        }
    }
}

impl Iterator for MockTokenSource {
    type Item = Token<'static>;

    fn next(&mut self) -> Option<Self::Item> {
        self.tokens.next()
    }
}

/// Parses `text` and returns its single top-level selection as a node.
///
/// Panics if the text does not parse to exactly one node.
pub fn parse_node(text: &str) -> Node {
    let mut selections = crate::parse_str(text).unwrap();
    assert_eq!(selections.len(), 1, "expected a single selection in {text:?}");
    match selections.remove(0) {
        Child::Node(node) => node,
        Child::Field(field) => panic!("expected a node, found field `{field}` in {text:?}"),
    }
}

pub fn arguments<const N: usize>(pairs: [(&str, Value); N]) -> Arguments {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect()
}

// =============================================================================
// Proptest strategies
// =============================================================================

pub fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z][a-zA-Z0-9_]{0,7}"
}

/// Values that every GraphQL parser accepts: enum names are upper case (so
/// never `true`, `false` or `null`) and integers stay within 32 bits.
pub fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<bool>().prop_map(Value::Bool),
        any::<i32>().prop_map(Value::from),
        "[A-Z][A-Z_]{0,5}".prop_map(|name| {
            Value::Enum(EnumValue::new(name).unwrap())
        }),
        "[ -~]{0,12}".prop_map(Value::String),
    ];
    leaf.prop_recursive(3, 16, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::List),
            prop::collection::vec((name_strategy(), inner), 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect())),
        ]
    })
}

fn arguments_strategy() -> impl Strategy<Value = Vec<(String, Value)>> {
    prop::collection::vec((name_strategy(), value_strategy()), 0..3)
}

/// Named (never anonymous) node trees, optionally aliased.
pub fn node_strategy() -> impl Strategy<Value = Node> {
    let leaf = (
        prop::option::of(name_strategy()),
        name_strategy(),
        arguments_strategy(),
    )
        .prop_map(|(alias, name, arguments)| build_node(alias, name, arguments, vec![]));
    leaf.prop_recursive(4, 32, 4, |inner| {
        (
            prop::option::of(name_strategy()),
            name_strategy(),
            arguments_strategy(),
            prop::collection::vec(inner, 1..4),
        )
            .prop_map(|(alias, name, arguments, children)| {
                build_node(alias, name, arguments, children)
            })
    })
}

fn build_node(
    alias: Option<String>,
    name: String,
    arguments: Vec<(String, Value)>,
    children: Vec<Node>,
) -> Node {
    let mut builder = Node::builder(name).arguments(arguments).children(children);
    if let Some(alias) = alias {
        builder = builder.alias(alias);
    }
    builder.build().unwrap()
}
