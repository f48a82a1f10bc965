//! Error handling for path compilation and evaluation

mod constructors;
mod types;

pub use types::{ErrorKind, PathError, PathResult};

/// Shorthand used by the tokenizer and parsers
#[inline]
pub(crate) fn invalid_expression_error(
    expression: &str,
    reason: &str,
    position: Option<usize>,
) -> PathError {
    PathError::invalid_expression(expression, reason, position)
}
