//! # restcheck client
//!
//! The engine behind `restcheck`: GPath-style path expressions evaluated over
//! JSON and XML trees, plus the HTTP data model the assertion DSL works with.
//!
//! ## Features
//!
//! - **Path expressions** with escaping, indexing, slicing, closures and
//!   depth-first search (`store.book.findAll { it.price < 10 }.title`)
//! - **Configurable number coercion** for JSON documents
//! - **Namespace-aware XML** navigation with attributes and node handles
//! - **Object deserialization hook** feeding selected values to serde
//! - **Response model** with headers, cookies and lazily parsed bodies
//!
//! ## Usage
//!
//! ```
//! use restcheck_client::json::JsonPath;
//! use restcheck_client::value::PathValue;
//!
//! let json = JsonPath::from(r#"{"lotto": {"winners": [{"winnerId": 23}, {"winnerId": 54}]}}"#)
//!     .expect("valid json");
//! let ids = json.get_value("lotto.winners.winnerId").expect("evaluates");
//! assert_eq!(ids, PathValue::from(vec![23, 54]));
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod config;
pub mod cookie;
pub mod http;
pub mod json;
pub mod mapping;
pub mod path;
pub mod prelude;
pub mod value;
pub mod xml;

pub use config::{CompatibilityMode, JsonPathConfig, XmlPathConfig};
pub use http::{ContentType, Request, Response, Transport, TransportError};
pub use json::JsonPath;
pub use path::{ErrorKind, PathError, PathResult};
pub use value::{Number, NumberReturnType, PathValue};
pub use xml::XmlPath;
