//! The query language: lexer, parser, and AST.
//!
//! A query is a whitespace-separated list of terms, implicitly AND'ed.
//! `tag:<word>` matches the exact-tag index, a literal uppercase `OR` is
//! disjunction, a leading `-` negates a term or group, and parentheses
//! group sub-expressions.
//!
//! Precedence, tightest first: grouping, negation, juxtaposition (AND),
//! then `OR`.

/// Converts a raw query string into a flat token sequence.
pub mod lexer;
/// Builds a [`QueryAst`](parser::QueryAst) from the token sequence.
pub mod parser;

pub use lexer::{lex, Token, TokenKind};
pub use parser::{parse, QueryAst, QueryError};
