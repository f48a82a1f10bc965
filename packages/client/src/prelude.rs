//! restcheck client prelude
//!
//! The types most callers need to query documents and model HTTP exchanges.

// Documents and values
pub use crate::json::JsonPath;
pub use crate::value::{BigDecimal, BigInt, FromPathValue, Number, NumberReturnType, PathValue};
pub use crate::xml::{Node, NodeChildren, XmlPath};

// Errors
pub use crate::config::ConfigurationError;
pub use crate::path::{ErrorKind, PathError, PathResult};

// Configuration
pub use crate::config::{CompatibilityMode, JsonPathConfig, Validator, XmlPathConfig};
pub use crate::mapping::{DeserializationContext, ObjectDeserializer};

// HTTP data model
pub use crate::cookie::{Cookie, Cookies};
pub use crate::http::{ContentType, Header, Headers, Request, Response, Transport, TransportError};

// HTTP standard types from http crate
pub use ::http::{Method, StatusCode};

// URL handling
pub use url::Url;
