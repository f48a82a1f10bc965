//! The seam through which requests leave the library
//!
//! No network client ships with the crate: callers implement [`Transport`]
//! for their HTTP stack, or pass a closure.

use super::{Request, Response};

/// Transport failures
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransportError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Request timed out after {0} ms")]
    Timeout(u64),

    #[error("Transport error: {0}")]
    Other(String),
}

/// Executes a request and returns the complete response
pub trait Transport: Send + Sync {
    /// # Errors
    /// Returns a [`TransportError`] when no response could be obtained.
    fn execute(&self, request: &Request) -> Result<Response, TransportError>;
}

impl<F> Transport for F
where
    F: Fn(&Request) -> Result<Response, TransportError> + Send + Sync,
{
    fn execute(&self, request: &Request) -> Result<Response, TransportError> {
        self(request)
    }
}
