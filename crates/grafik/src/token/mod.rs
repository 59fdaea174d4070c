//! Token types produced by [`StrTokenSource`](crate::token_source::StrTokenSource)
//! and consumed by the parser.

mod query_token;
mod query_token_kind;

pub use query_token::Token;
pub use query_token_kind::TokenKind;
