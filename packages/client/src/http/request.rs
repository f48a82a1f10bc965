//! Outgoing request model handed to a transport

use bytes::Bytes;
use http::{Method, header};
use url::Url;

use super::headers::{Header, Headers};
use crate::cookie::{Cookies, format_cookie};

/// A fully assembled request: URI with query string, headers, cookies and body
#[derive(Debug, Clone)]
pub struct Request {
    method: Method,
    uri: Url,
    headers: Headers,
    cookies: Cookies,
    body: Bytes,
    content_type: Option<String>,
}

impl Request {
    #[must_use]
    pub fn new(method: Method, uri: Url) -> Self {
        Self {
            method,
            uri,
            headers: Headers::default(),
            cookies: Cookies::default(),
            body: Bytes::new(),
            content_type: None,
        }
    }

    #[must_use]
    pub fn with_headers(mut self, headers: Headers) -> Self {
        self.headers = headers;
        self
    }

    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.add(Header::new(name, value));
        self
    }

    #[must_use]
    pub fn with_cookies(mut self, cookies: Cookies) -> Self {
        self.cookies = cookies;
        self
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self
    }

    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    #[inline]
    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[inline]
    #[must_use]
    pub fn uri(&self) -> &Url {
        &self.uri
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[inline]
    #[must_use]
    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn body_as_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[inline]
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Convert into an `http::Request`, adding `Content-Type` and `Cookie` headers
    ///
    /// # Errors
    /// Returns an error if a header name or value is invalid.
    pub fn to_http(&self) -> Result<http::Request<Bytes>, http::Error> {
        let mut builder = http::Request::builder()
            .method(self.method.clone())
            .uri(self.uri.as_str());
        if let Some(map) = builder.headers_mut() {
            map.extend(self.headers.to_header_map()?);
        }
        if let Some(content_type) = &self.content_type {
            if !self.headers.has_header_with_name(header::CONTENT_TYPE.as_str()) {
                builder = builder.header(header::CONTENT_TYPE, content_type.as_str());
            }
        }
        if self.cookies.exist() {
            builder = builder.header(header::COOKIE, format_cookie(&self.cookies));
        }
        builder.body(self.body.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::Cookie;

    #[test]
    fn converts_to_http_request() {
        let uri = Url::parse("http://localhost:8080/greet?name=John").expect("valid url");
        let request = Request::new(Method::POST, uri)
            .with_header("Accept", "application/json")
            .with_cookies(Cookies::new(vec![Cookie::new("session", "abc")]))
            .with_content_type("application/json")
            .with_body("{}");
        let http = request.to_http().expect("valid request");
        assert_eq!(http.method(), &Method::POST);
        assert_eq!(http.uri().query(), Some("name=John"));
        assert_eq!(http.headers()[header::COOKIE], "session=abc");
        assert_eq!(http.headers()[header::CONTENT_TYPE], "application/json");
        assert_eq!(http.body().as_ref(), b"{}");
    }
}
