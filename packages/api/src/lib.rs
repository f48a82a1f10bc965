//! # restcheck
//!
//! Fluent `given()/when()/then()` testing of HTTP APIs. Requests go out
//! through a caller-supplied [`Transport`]; responses are validated with
//! matchers against status, headers, cookies, content type and body paths
//! evaluated over JSON or XML.
//!
//! ```
//! use restcheck::prelude::*;
//!
//! let transport = |request: &Request| -> Result<Response, TransportError> {
//!     assert_eq!(request.uri().path(), "/lotto/5");
//!     Ok(Response::new(200)
//!         .with_content_type(ContentType::Json)
//!         .with_body(r#"{"lotto": {"lottoId": 5, "winners": [{"winnerId": 23}, {"winnerId": 54}]}}"#))
//! };
//!
//! RestCheck::given()
//!     .transport(transport)
//!     .path_param("id", 5)
//!     .when()
//!     .get("/lotto/{id}")
//!     .then()
//!     .status_code(200)
//!     .root_path("lotto")
//!     .body("lottoId", 5)
//!     .body("winners.winnerId", has_items([23, 54]));
//! ```

#![deny(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]

pub mod builder;
pub mod config;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod validate;

pub use builder::{MediaType, RequestSpecification};
pub use config::RestConfig;
pub use error::{AssertionError, RequestError};
pub use extract::ExtractableResponse;
pub use matcher::Matcher;
pub use validate::{ExpectedContentType, ResponseSpecification, Then, ValidatableResponse};

// Re-export important types from client package
pub use restcheck_client::http::{ContentType, Request, Response, Transport, TransportError};
pub use restcheck_client::{JsonPath, PathValue, XmlPath};

/// Main entry point providing the static DSL starters
pub struct RestCheck;

impl RestCheck {
    /// Start a request specification with default configuration
    #[must_use]
    pub fn given() -> RequestSpecification {
        RequestSpecification::new()
    }

    /// Start a request specification that sends through `transport`
    #[must_use]
    pub fn with_transport(transport: impl Transport + 'static) -> RequestSpecification {
        RequestSpecification::new().transport(transport)
    }

    /// Start a request specification from `config`
    #[must_use]
    pub fn with_config(config: RestConfig) -> RequestSpecification {
        RequestSpecification::new().config(config)
    }

    /// Start an empty response specification
    #[must_use]
    pub fn expect() -> ResponseSpecification {
        ResponseSpecification::new()
    }
}

/// Start a request specification
///
/// Shorthand for `RestCheck::given()`
#[must_use]
pub fn given() -> RequestSpecification {
    RestCheck::given()
}

/// Start a response specification
///
/// Shorthand for `RestCheck::expect()`
#[must_use]
pub fn expect() -> ResponseSpecification {
    RestCheck::expect()
}

/// Everything a test needs in one import
pub mod prelude {
    pub use crate::matcher::*;
    pub use crate::{
        AssertionError, ExpectedContentType, ExtractableResponse, RequestError, RequestSpecification,
        ResponseSpecification, RestCheck, RestConfig, Then, ValidatableResponse, expect, given,
    };
    pub use restcheck_client::prelude::*;
}
