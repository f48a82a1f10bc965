//! Path Error Types
//!
//! Core error types for path compilation, evaluation and typed conversion.

use std::error::Error;
use std::fmt;

/// Path processing error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid path expression syntax
    InvalidPath,
    /// Document is not valid JSON
    InvalidJson,
    /// Document is not valid XML
    InvalidXml,
    /// A named parameter was referenced but never supplied
    UndefinedParameter,
    /// A property was read from a value that has no properties
    MissingProperty,
    /// Selected value cannot be converted to the requested type
    Conversion,
    /// Object deserialization hook failed
    Deserialization,
    /// Generic evaluation failure (bad method, bad argument)
    Evaluation,
}

/// Main path error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathError {
    pub kind: ErrorKind,
    pub message: String,
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl Error for PathError {}

/// Result type for path operations
pub type PathResult<T> = Result<T, PathError>;

impl PathError {
    #[must_use]
    pub fn new(kind: ErrorKind, message: String) -> Self {
        Self { kind, message }
    }

    pub fn invalid_path(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPath, msg.into())
    }

    pub fn invalid_json(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidJson, msg.into())
    }

    pub fn invalid_xml(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidXml, msg.into())
    }

    pub fn conversion(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Conversion, msg.into())
    }

    pub fn deserialization(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Deserialization, msg.into())
    }

    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Evaluation, msg.into())
    }

    /// True when the error only signals that a property could not be read,
    /// which top-level lookups report as a null result.
    #[inline]
    #[must_use]
    pub fn is_missing_property(&self) -> bool {
        self.kind == ErrorKind::MissingProperty
    }
}
