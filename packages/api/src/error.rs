//! Errors raised while building, dispatching and validating requests

use std::fmt;

use restcheck_client::config::ConfigurationError;
use restcheck_client::http::TransportError;

/// Failure to turn a `RequestSpecification` into a response
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RequestError {
    #[error("No transport configured; call `transport(...)` before sending a request")]
    MissingTransport,

    #[error("Invalid URI '{uri}': {reason}")]
    InvalidUri { uri: String, reason: String },

    #[error("You specified too few path parameters to the request; unresolved: {0}")]
    UnresolvedPathParam(String),

    #[error("Redundant path parameters: {0}")]
    RedundantPathParams(String),

    #[error("Invalid header {0}")]
    InvalidHeader(String),

    #[error("Cannot serialize request body: {0}")]
    Serialization(String),

    #[error("Invalid configuration: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Transport failed: {0}")]
    Transport(#[from] TransportError),
}

/// Every expectation a response failed, one message each
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub struct AssertionError {
    failures: Vec<String>,
}

impl AssertionError {
    #[must_use]
    pub fn new(failures: Vec<String>) -> Self {
        Self { failures }
    }

    #[inline]
    #[must_use]
    pub fn failures(&self) -> &[String] {
        &self.failures
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

impl fmt::Display for AssertionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.failures.len() > 1 {
            writeln!(f, "{} expectations failed.", self.failures.len())?;
        } else {
            writeln!(f, "1 expectation failed.")?;
        }
        f.write_str(&self.failures.join("\n"))
    }
}
