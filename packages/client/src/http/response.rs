//! Received response model
//!
//! Bodies are kept as bytes and parsed on demand; the parsed JSON and XML
//! documents are cached per response.

use std::fmt;
use std::time::Duration;

use bytes::Bytes;
use http::{StatusCode, header};
use once_cell::sync::OnceCell;

use super::content_type::{ContentType, charset_of};
use super::headers::{Header, Headers};
use crate::config::{CompatibilityMode, JsonPathConfig, XmlPathConfig};
use crate::cookie::{Cookies, parse_set_cookie};
use crate::json::JsonPath;
use crate::path::PathResult;
use crate::value::PathValue;
use crate::xml::XmlPath;

/// A complete HTTP response
#[derive(Clone)]
pub struct Response {
    status_code: u16,
    status_line: String,
    headers: Headers,
    cookies: Cookies,
    body: Bytes,
    time: Duration,
    json_config: JsonPathConfig,
    xml_config: XmlPathConfig,
    json: OnceCell<PathResult<JsonPath>>,
    xml: OnceCell<PathResult<XmlPath>>,
}

impl Response {
    /// A response with `status_code`, an `HTTP/1.1` status line and no body
    #[must_use]
    pub fn new(status_code: u16) -> Self {
        let reason = StatusCode::from_u16(status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or_default();
        Self {
            status_code,
            status_line: format!("HTTP/1.1 {status_code} {reason}").trim_end().to_string(),
            headers: Headers::default(),
            cookies: Cookies::default(),
            body: Bytes::new(),
            time: Duration::ZERO,
            json_config: JsonPathConfig::default(),
            xml_config: XmlPathConfig::default(),
            json: OnceCell::new(),
            xml: OnceCell::new(),
        }
    }

    /// Convert an `http::Response`; `Set-Cookie` headers populate the cookies
    #[must_use]
    pub fn from_http(response: http::Response<Bytes>) -> Self {
        let (parts, body) = response.into_parts();
        let mut converted = Self::new(parts.status.as_u16());
        let version = match parts.version {
            http::Version::HTTP_10 => "HTTP/1.0",
            http::Version::HTTP_2 => "HTTP/2",
            http::Version::HTTP_3 => "HTTP/3",
            _ => "HTTP/1.1",
        };
        converted.status_line = format!(
            "{version} {} {}",
            parts.status.as_u16(),
            parts.status.canonical_reason().unwrap_or_default()
        )
        .trim_end()
        .to_string();
        for header in Headers::from(&parts.headers) {
            converted = converted.with_header(header.name(), header.value());
        }
        converted.with_body(body)
    }

    #[must_use]
    pub fn with_status_line(mut self, status_line: impl Into<String>) -> Self {
        self.status_line = status_line.into();
        self
    }

    /// Add a header; `Set-Cookie` values are also parsed into cookies
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let header = Header::new(name, value);
        if header.has_name(header::SET_COOKIE.as_str()) {
            match parse_set_cookie(header.value()) {
                Ok(cookie) => self.cookies.add(cookie),
                Err(e) => tracing::debug!(target: "restcheck::transport", error = %e, "ignoring malformed Set-Cookie"),
            }
        }
        self.headers.add(header);
        self
    }

    #[must_use]
    pub fn with_content_type(self, content_type: impl fmt::Display) -> Self {
        self.with_header(header::CONTENT_TYPE.as_str(), content_type.to_string())
    }

    #[must_use]
    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = body.into();
        self.json = OnceCell::new();
        self.xml = OnceCell::new();
        self
    }

    /// Time the request took, set by whoever dispatched it
    #[must_use]
    pub fn with_time(mut self, time: Duration) -> Self {
        self.time = time;
        self
    }

    #[must_use]
    pub fn with_json_path_config(mut self, config: JsonPathConfig) -> Self {
        self.json_config = config;
        self.json = OnceCell::new();
        self
    }

    #[must_use]
    pub fn with_xml_path_config(mut self, config: XmlPathConfig) -> Self {
        self.xml_config = config;
        self.xml = OnceCell::new();
        self
    }

    #[inline]
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.status_code
    }

    #[inline]
    #[must_use]
    pub fn status_line(&self) -> &str {
        &self.status_line
    }

    #[inline]
    #[must_use]
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get_value(name)
    }

    #[inline]
    #[must_use]
    pub fn cookies(&self) -> &Cookies {
        &self.cookies
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.cookies.get_value(name)
    }

    /// Raw `Content-Type` header, empty when absent
    #[must_use]
    pub fn content_type(&self) -> &str {
        self.header(header::CONTENT_TYPE.as_str()).unwrap_or_default()
    }

    #[inline]
    #[must_use]
    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Body decoded as UTF-8, replacing invalid sequences
    #[must_use]
    pub fn as_string(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    #[inline]
    #[must_use]
    pub fn time(&self) -> Duration {
        self.time
    }

    /// Whether the body is read as XML (XML and HTML content types)
    #[must_use]
    pub fn is_xml(&self) -> bool {
        matches!(
            ContentType::from_content_type(self.content_type()),
            Some(ContentType::Xml | ContentType::Html)
        )
    }

    /// The body as a JSON document
    ///
    /// # Errors
    /// Returns an `InvalidJson` error if the body is not JSON.
    pub fn json_path(&self) -> PathResult<JsonPath> {
        self.json
            .get_or_init(|| {
                let mut config = self.json_config.clone();
                if let Some(charset) = charset_of(self.content_type()) {
                    config = config.with_charset(charset);
                }
                JsonPath::from_bytes_with_config(&self.body, config)
            })
            .clone()
    }

    /// The body as an XML document; HTML bodies are read leniently
    ///
    /// # Errors
    /// Returns an `InvalidXml` error if the body is not XML.
    pub fn xml_path(&self) -> PathResult<XmlPath> {
        self.xml
            .get_or_init(|| {
                let mut config = self.xml_config.clone();
                if let Some(charset) = charset_of(self.content_type()) {
                    config = config.with_charset(charset);
                }
                if ContentType::from_content_type(self.content_type()) == Some(ContentType::Html) {
                    config = config.with_compatibility_mode(CompatibilityMode::Html);
                }
                XmlPath::from_bytes_with_config(&self.body, config)
            })
            .clone()
    }

    /// Evaluate `path` against the body, read as XML or JSON by content type
    ///
    /// # Errors
    /// Fails if the body cannot be parsed or the path cannot be evaluated.
    pub fn path(&self, path: &str) -> PathResult<PathValue> {
        if self.is_xml() {
            self.xml_path()?.get_value(path)
        } else {
            self.json_path()?.get_value(path)
        }
    }
}

impl fmt::Debug for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Response")
            .field("status_line", &self.status_line)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("body_len", &self.body.len())
            .field("time", &self.time)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_defaults_to_reason_phrase() {
        assert_eq!(Response::new(404).status_line(), "HTTP/1.1 404 Not Found");
        assert_eq!(Response::new(299).status_line(), "HTTP/1.1 299");
    }

    #[test]
    fn set_cookie_headers_become_cookies() {
        let response = Response::new(200)
            .with_header("Set-Cookie", "session=abc; Path=/")
            .with_header("Set-Cookie", "theme=dark");
        assert_eq!(response.cookie("session"), Some("abc"));
        assert_eq!(response.cookies().size(), 2);
        assert_eq!(response.headers().get_values("set-cookie").len(), 2);
    }

    #[test]
    fn path_picks_document_kind_from_content_type() {
        let json = Response::new(200)
            .with_content_type(ContentType::Json)
            .with_body(r#"{"greeting": {"firstName": "John"}}"#);
        assert_eq!(json.path("greeting.firstName").expect("json"), PathValue::from("John"));

        let xml = Response::new(200)
            .with_content_type("application/xml; charset=utf-8")
            .with_body("<greeting><firstName>John</firstName></greeting>");
        assert_eq!(xml.path("greeting.firstName").expect("xml"), PathValue::from("John"));
    }

    #[test]
    fn html_bodies_are_read_leniently() {
        let html = Response::new(200)
            .with_content_type("text/html; charset=utf-8")
            .with_body("<html><body><p>hi<br></p></body></html>");
        assert_eq!(html.path("html.body.p").expect("html").text(), "hi");

        let xml = Response::new(200)
            .with_content_type(ContentType::Xml)
            .with_body("<html><body><p>hi<br></p></body></html>");
        assert!(xml.path("html.body.p").is_err());
    }

    #[test]
    fn declared_charsets_decode_the_body() {
        let latin = Response::new(200)
            .with_content_type("application/json; charset=ISO-8859-1")
            .with_body(b"{\"a\":1,\"name\":\"Ren\xE9\"}".to_vec());
        assert_eq!(latin.path("a").expect("latin-1 body"), PathValue::from(1));
        assert_eq!(latin.path("name").expect("latin-1 text"), PathValue::from("Ren\u{e9}"));

        let bogus = Response::new(200)
            .with_content_type("application/json; charset=x-bogus")
            .with_body(b"{\"a\":1}".to_vec());
        assert!(bogus.path("a").is_err());
    }

    #[test]
    fn from_http_keeps_headers() {
        let http = http::Response::builder()
            .status(201)
            .header("Location", "/items/1")
            .body(Bytes::from_static(b""))
            .expect("valid response");
        let response = Response::from_http(http);
        assert_eq!(response.status_code(), 201);
        assert_eq!(response.status_line(), "HTTP/1.1 201 Created");
        assert_eq!(response.header("location"), Some("/items/1"));
    }
}
