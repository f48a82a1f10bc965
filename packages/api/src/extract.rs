//! Extracting values from a validated response

use restcheck_client::http::Response;
use restcheck_client::json::JsonPath;
use restcheck_client::path::PathResult;
use restcheck_client::value::{FromPathValue, PathValue};
use restcheck_client::xml::XmlPath;
use serde::de::DeserializeOwned;

/// Read-only access to a response after validation
#[derive(Debug, Clone)]
pub struct ExtractableResponse {
    response: Response,
}

impl ExtractableResponse {
    #[must_use]
    pub fn new(response: Response) -> Self {
        Self { response }
    }

    #[inline]
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }

    #[must_use]
    pub fn into_response(self) -> Response {
        self.response
    }

    /// Evaluate `path` against the body
    ///
    /// # Errors
    /// Fails if the body cannot be parsed or the path cannot be evaluated.
    pub fn path(&self, path: &str) -> PathResult<PathValue> {
        self.response.path(path)
    }

    /// Evaluate `path` and convert the result
    ///
    /// # Examples
    /// ```
    /// use restcheck::prelude::*;
    ///
    /// let response = Response::new(201)
    ///     .with_content_type(ContentType::Json)
    ///     .with_body(r#"{"id": 42}"#);
    /// let id: i64 = response.then().status_code(201).extract().path_as("id").expect("numeric id");
    /// assert_eq!(id, 42);
    /// ```
    ///
    /// # Errors
    /// Returns a `Conversion` error if the value does not fit `T`.
    pub fn path_as<T: FromPathValue>(&self, path: &str) -> PathResult<T> {
        T::from_path_value(self.path(path)?)
    }

    /// The body as JSON
    ///
    /// # Errors
    /// Returns `InvalidJson` if the body is not JSON.
    pub fn json_path(&self) -> PathResult<JsonPath> {
        self.response.json_path()
    }

    /// The body as XML
    ///
    /// # Errors
    /// Returns `InvalidXml` if the body is not XML.
    pub fn xml_path(&self) -> PathResult<XmlPath> {
        self.response.xml_path()
    }

    /// Deserialize the whole body
    ///
    /// # Errors
    /// Fails if the body cannot be parsed or does not fit `T`.
    pub fn body_as<T: DeserializeOwned>(&self) -> PathResult<T> {
        if self.response.is_xml() {
            self.xml_path()?.get_object("")
        } else {
            self.json_path()?.get_object("")
        }
    }

    #[inline]
    #[must_use]
    pub fn status_code(&self) -> u16 {
        self.response.status_code()
    }

    #[inline]
    #[must_use]
    pub fn status_line(&self) -> &str {
        self.response.status_line()
    }

    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.response.header(name)
    }

    #[must_use]
    pub fn cookie(&self, name: &str) -> Option<&str> {
        self.response.cookie(name)
    }

    #[must_use]
    pub fn content_type(&self) -> &str {
        self.response.content_type()
    }

    #[must_use]
    pub fn as_string(&self) -> String {
        self.response.as_string()
    }
}
