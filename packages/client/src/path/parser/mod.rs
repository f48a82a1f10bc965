//! Path expression parser
//!
//! Builds an [`Expression`](crate::path::ast::Expression) from the token
//! stream produced by [`PathTokenizer`](crate::path::tokenizer::PathTokenizer).

mod closures;
mod core;
mod expressions;
mod steps;

pub use self::core::PathParser;
