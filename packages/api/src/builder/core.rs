//! Core `RequestSpecification` structure and base configuration
//!
//! Contains the request specification, the media-type helper used by the
//! header methods and the connectors (`given`, `when`) of the fluent API.

use std::fmt;
use std::sync::Arc;

use bytes::Bytes;
use indexmap::IndexMap;
use restcheck_client::cookie::Cookies;
use restcheck_client::http::{ContentType, Headers, Transport};

use crate::config::RestConfig;
use crate::error::RequestError;

/// A media type given either as text or as a [`ContentType`]
#[derive(Debug, Clone)]
pub enum MediaType {
    /// Literal media type, sent unchanged
    String(String),
    /// Well-known content type
    ContentType(ContentType),
}

impl MediaType {
    /// Value for a `Content-Type` header
    #[must_use]
    pub fn content_type_value(&self) -> String {
        match self {
            MediaType::String(s) => s.clone(),
            MediaType::ContentType(ct) => ct.as_str().to_string(),
        }
    }

    /// Value for an `Accept` header
    #[must_use]
    pub fn accept_value(&self) -> String {
        match self {
            MediaType::String(s) => s.clone(),
            MediaType::ContentType(ct) => ct.accept_header(),
        }
    }
}

impl From<&str> for MediaType {
    fn from(s: &str) -> Self {
        MediaType::String(s.to_string())
    }
}

impl From<String> for MediaType {
    fn from(s: String) -> Self {
        MediaType::String(s)
    }
}

impl From<ContentType> for MediaType {
    fn from(ct: ContentType) -> Self {
        MediaType::ContentType(ct)
    }
}

/// Description of the request to send
///
/// Built with `given()`, refined with the header, parameter and body
/// methods, and sent with one of the HTTP method functions. Sending borrows
/// the specification, so one specification can issue several requests.
#[derive(Clone, Default)]
pub struct RequestSpecification {
    /// Where requests are dispatched
    pub(crate) transport: Option<Arc<dyn Transport>>,
    /// Base URI, port, path configs
    pub(crate) config: RestConfig,
    pub(crate) headers: Headers,
    pub(crate) cookies: Cookies,
    /// Explicit `Content-Type`, if any
    pub(crate) content_type: Option<String>,
    pub(crate) query_params: Vec<(String, String)>,
    pub(crate) form_params: Vec<(String, String)>,
    pub(crate) path_params: IndexMap<String, String>,
    pub(crate) body: Option<Bytes>,
    /// First error met while building, reported when the request is sent
    pub(crate) pending_error: Option<RequestError>,
}

impl RequestSpecification {
    /// Start an empty specification with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Syntactic connector between request setup and the HTTP method
    ///
    /// # Examples
    /// ```
    /// use restcheck::RestCheck;
    ///
    /// let spec = RestCheck::given().header("Accept-Language", "en").when();
    /// assert_eq!(spec.headers().size(), 1);
    /// ```
    #[must_use]
    pub fn when(self) -> Self {
        self
    }

    /// Alias of [`when`](Self::when) for chaining several setup sections
    #[must_use]
    pub fn and(self) -> Self {
        self
    }

    /// Set the transport requests are dispatched through
    ///
    /// Any `Fn(&Request) -> Result<Response, TransportError>` is a transport.
    #[must_use]
    pub fn transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Some(Arc::new(transport));
        self
    }

    /// Share an existing transport
    #[must_use]
    pub fn shared_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Replace the whole configuration
    #[must_use]
    pub fn config(mut self, config: RestConfig) -> Self {
        self.config = config;
        self
    }

    #[must_use]
    pub fn base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.config = self.config.with_base_uri(base_uri);
        self
    }

    #[must_use]
    pub fn base_path(mut self, base_path: impl Into<String>) -> Self {
        self.config = self.config.with_base_path(base_path);
        self
    }

    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.config = self.config.with_port(port);
        self
    }

    /// Disable or enable percent-encoding of path and query parameters
    #[must_use]
    pub fn url_encoding_enabled(mut self, enabled: bool) -> Self {
        self.config = self.config.with_url_encoding_enabled(enabled);
        self
    }

    #[inline]
    #[must_use]
    pub fn get_config(&self) -> &RestConfig {
        &self.config
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
    pub fn get_content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }

    /// Keep the first building error; later ones are usually consequences of it
    pub(crate) fn fail(&mut self, error: RequestError) {
        if self.pending_error.is_none() {
            tracing::debug!(target: "restcheck::transport", %error, "request specification is invalid");
            self.pending_error = Some(error);
        }
    }
}

impl fmt::Debug for RequestSpecification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RequestSpecification")
            .field("transport", &self.transport.as_ref().map(|_| "<transport>"))
            .field("config", &self.config)
            .field("headers", &self.headers)
            .field("cookies", &self.cookies)
            .field("content_type", &self.content_type)
            .field("query_params", &self.query_params)
            .field("form_params", &self.form_params)
            .field("path_params", &self.path_params)
            .field("body_len", &self.body.as_ref().map(Bytes::len))
            .field("pending_error", &self.pending_error)
            .finish()
    }
}
