//! Error constructor functions
//!
//! Factory methods for creating path errors with expression and position context.

use super::types::{ErrorKind, PathError};

impl PathError {
    /// Creates an invalid path expression error
    ///
    /// # Arguments
    /// * `expression` - The invalid path expression
    /// * `reason` - Specific reason why the expression is invalid
    /// * `position` - Optional character position where the error occurred
    ///
    /// # Examples
    /// ```
    /// use restcheck_client::path::error::PathError;
    ///
    /// let error = PathError::invalid_expression(
    ///     "store.book[0",
    ///     "unclosed bracket",
    ///     Some(12),
    /// );
    /// assert!(error.message.contains("store.book[0"));
    /// ```
    pub fn invalid_expression(
        expression: impl Into<String>,
        reason: impl Into<String>,
        position: Option<usize>,
    ) -> Self {
        let expression = expression.into();
        let reason = reason.into();
        let message = match position {
            Some(pos) => format!("Invalid path expression '{expression}': {reason} at position {pos}"),
            None => format!("Invalid path expression '{expression}': {reason}"),
        };
        PathError::new(ErrorKind::InvalidPath, message)
    }

    /// Creates the error raised when an expression references a parameter that was never set
    pub fn undefined_parameter(name: &str) -> Self {
        PathError::new(
            ErrorKind::UndefinedParameter,
            format!(
                "The parameter \"{name}\" was used but not defined. Define parameters using the param(...) function"
            ),
        )
    }

    /// Creates the internal signal for a property read on a value without properties
    pub fn missing_property(property: &str, receiver: &str) -> Self {
        PathError::new(
            ErrorKind::MissingProperty,
            format!("No such property: {property} for value {receiver}"),
        )
    }

    /// Creates an error for a method the evaluator does not know for the receiver
    pub fn unsupported_method(method: &str, receiver: &str) -> Self {
        PathError::new(
            ErrorKind::Evaluation,
            format!("No signature of method {method}() is applicable for {receiver}"),
        )
    }

    /// Creates a conversion error for a typed getter
    pub fn cannot_convert(value: impl std::fmt::Display, target: &str) -> Self {
        PathError::new(
            ErrorKind::Conversion,
            format!("Cannot convert {value} to {target}"),
        )
    }
}
