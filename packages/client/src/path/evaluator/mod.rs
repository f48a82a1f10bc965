//! Path evaluation
//!
//! Evaluation walks an [`Expression`](crate::path::ast::Expression) over a
//! [`PathValue`](crate::value::PathValue) tree with Groovy semantics:
//! property access spreads over lists, `==` is loose, numbers compare across
//! widths and closures bind `it` (or a named parameter) per member.

mod closures;
mod engine;
mod methods;
mod navigation;
mod operators;

pub use self::engine::Evaluator;
pub use self::operators::{compare, loose_eq};
