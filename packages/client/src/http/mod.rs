//! HTTP data model
//!
//! Content types, headers, requests, responses and the transport seam.
//! Cookies live in [`crate::cookie`].

pub mod content_type;
pub mod headers;
pub mod request;
pub mod response;
pub mod transport;

pub use content_type::{ContentType, charset_of, without_parameters};
pub use headers::{Header, Headers};
pub use request::Request;
pub use response::Response;
pub use transport::{Transport, TransportError};
