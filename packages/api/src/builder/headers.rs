//! Header, cookie and media-type methods

use http::{HeaderName, HeaderValue, header};
use restcheck_client::cookie::Cookie;
use restcheck_client::http::Header;

use crate::builder::core::{MediaType, RequestSpecification};
use crate::error::RequestError;

impl RequestSpecification {
    /// Add a request header
    ///
    /// Headers are multi-valued: adding a name twice sends both values.
    /// An invalid name or value makes the request fail when it is sent.
    ///
    /// # Examples
    /// ```
    /// use restcheck::RestCheck;
    ///
    /// let spec = RestCheck::given().header("X-Trace", "1").header("X-Trace", "2");
    /// assert_eq!(spec.headers().get_values("x-trace"), vec!["1", "2"]);
    /// ```
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let (name, value) = (name.into(), value.into());
        if HeaderName::from_bytes(name.as_bytes()).is_err() || HeaderValue::from_str(&value).is_err() {
            self.fail(RequestError::InvalidHeader(format!("{name}: {value}")));
            return self;
        }
        if header::CONTENT_TYPE.as_str().eq_ignore_ascii_case(&name) {
            self.content_type = Some(value);
            return self;
        }
        self.headers.add(Header::new(name, value));
        self
    }

    /// Add several headers in order
    #[must_use]
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        headers
            .into_iter()
            .fold(self, |spec, (name, value)| spec.header(name, value))
    }

    /// Set the `Content-Type` of the request body
    #[must_use]
    pub fn content_type(mut self, content_type: impl Into<MediaType>) -> Self {
        self.content_type = Some(content_type.into().content_type_value());
        self
    }

    /// Set the `Accept` header
    ///
    /// A [`ContentType`](restcheck_client::http::ContentType) expands to all
    /// of its MIME types.
    #[must_use]
    pub fn accept(mut self, media_type: impl Into<MediaType>) -> Self {
        self.headers
            .replace(Header::new(header::ACCEPT.as_str(), media_type.into().accept_value()));
        self
    }

    /// Send a cookie
    #[must_use]
    pub fn cookie(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.cookies.add(Cookie::new(name, value));
        self
    }

    /// Send a cookie built with its attributes
    #[must_use]
    pub fn detailed_cookie(mut self, cookie: Cookie) -> Self {
        self.cookies.add(cookie);
        self
    }

    /// Send several cookies in order
    #[must_use]
    pub fn cookies<I, K, V>(self, cookies: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        cookies
            .into_iter()
            .fold(self, |spec, (name, value)| spec.cookie(name, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use restcheck_client::http::ContentType;

    #[test]
    fn content_type_header_is_kept_apart() {
        let spec = RequestSpecification::new().header("content-type", "text/plain");
        assert_eq!(spec.get_content_type(), Some("text/plain"));
        assert!(!spec.headers().exist());
    }

    #[test]
    fn accept_expands_content_types() {
        let spec = RequestSpecification::new().accept(ContentType::Json);
        let accept = spec.headers().get_value("accept").expect("accept header set");
        assert!(accept.contains("application/json"));
    }

    #[test]
    fn invalid_header_is_reported_later() {
        let spec = RequestSpecification::new().header("bad header", "x");
        assert!(matches!(spec.pending_error, Some(RequestError::InvalidHeader(_))));
    }
}
