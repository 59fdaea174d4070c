//! Token source trait and the `&str` lexer.

mod query_token_source;
mod str_token_source;

pub use query_token_source::TokenSource;
pub use str_token_source::StrTokenSource;
