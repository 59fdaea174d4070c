//! Build, merge, parse and re-emit GraphQL query documents.
//!
//! A query is modelled as a tree of [`Node`]s. Trees can be assembled in code
//! (see [`Node::builder`]), extended incrementally ([`Node::add`],
//! [`Node::add_to_all`], [`Node::update`]) and serialized back to canonical
//! query text ([`serialize`]). The [`parse`] entry point goes the other way,
//! turning query text into the same tree model so that existing queries can be
//! edited and re-emitted.
//!
//! ```rust
//! use grafik::Node;
//!
//! let mut project = Node::builder("project")
//!     .child("name")
//!     .argument("id", 12)
//!     .build()
//!     .unwrap();
//! project.add_child("description").unwrap();
//!
//! assert_eq!(
//!     project.to_string(),
//!     r#"project(id: "gid://12") { name description }"#,
//! );
//!
//! let reparsed = grafik::parse_str(&project.to_string()).unwrap();
//! assert_eq!(reparsed, vec![grafik::Child::from(project)]);
//! ```

mod child;
mod enum_value;
pub mod gid;
mod names;
mod node;
mod node_builder;
mod node_error;
mod node_mutation;
mod parse_error;
mod parse_error_kind;
mod parse_error_note;
mod parser;
mod serializer;
mod string_parsing_error;
mod template;
pub mod token;
mod token_stream;
pub mod token_source;
mod value;

pub use child::Child;
pub use enum_value::EnumValue;
pub use node::Node;
pub use node_builder::NodeBuilder;
pub use node_error::NodeError;
pub use parse_error::ParseError;
pub use parse_error_kind::ParseErrorKind;
pub use parse_error_note::ParseErrorNote;
pub use parse_error_note::ParseErrorNoteKind;
pub use parse_error_note::ParseErrorNotes;
pub use parser::parse;
pub use parser::parse_str;
pub use parser::sanitize;
pub use parser::QueryParser;
pub use parser::Variables;
pub use serializer::serialize;
pub use serializer::serialize_children;
pub use serializer::Layout;
pub use serializer::SerializeOptions;
pub use serializer::DEFAULT_INDENT;
pub use string_parsing_error::StringParsingError;
pub use template::TemplateParts;
pub use token_stream::TokenStream;
pub use value::Arguments;
pub use value::Value;
pub use smallvec::smallvec;
pub use smallvec::SmallVec;

#[cfg(test)]
mod tests;
