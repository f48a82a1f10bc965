//! Authentication methods for requests
//!
//! Credentials are sent preemptively as an `Authorization` header.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http::header;

use crate::builder::core::RequestSpecification;

impl RequestSpecification {
    /// Use HTTP basic authentication
    ///
    /// # Examples
    /// ```
    /// use restcheck::RestCheck;
    ///
    /// let spec = RestCheck::given().auth_basic("user", "secret");
    /// assert_eq!(spec.headers().get_value("authorization"), Some("Basic dXNlcjpzZWNyZXQ="));
    /// ```
    #[must_use]
    pub fn auth_basic(self, username: &str, password: &str) -> Self {
        let encoded = STANDARD.encode(format!("{username}:{password}"));
        self.header(header::AUTHORIZATION.as_str(), format!("Basic {encoded}"))
    }

    /// Use an OAuth 2 bearer token
    #[must_use]
    pub fn auth_oauth2(self, token: &str) -> Self {
        self.header(header::AUTHORIZATION.as_str(), format!("Bearer {token}"))
    }
}
