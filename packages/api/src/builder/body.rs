//! Request body handling
//!
//! Raw bodies are sent as given, `body_json` serializes with serde and form
//! parameters are encoded as `application/x-www-form-urlencoded` when no
//! explicit body is set.

use bytes::Bytes;
use restcheck_client::http::ContentType;
use serde::Serialize;

use crate::builder::core::RequestSpecification;
use crate::error::RequestError;

impl RequestSpecification {
    /// Set the raw request body
    ///
    /// # Examples
    /// ```
    /// use restcheck::RestCheck;
    ///
    /// let spec = RestCheck::given().body("<greeting/>").content_type("application/xml");
    /// assert_eq!(spec.get_content_type(), Some("application/xml"));
    /// ```
    #[must_use]
    pub fn body(mut self, body: impl AsRef<[u8]>) -> Self {
        self.body = Some(Bytes::copy_from_slice(body.as_ref()));
        self
    }

    /// Serialize `body` as JSON
    ///
    /// Sets `Content-Type: application/json` unless a content type was
    /// already chosen. A serialization failure is reported when the request
    /// is sent.
    #[must_use]
    pub fn body_json<T: Serialize + ?Sized>(mut self, body: &T) -> Self {
        match serde_json::to_vec(body) {
            Ok(bytes) => {
                self.body = Some(Bytes::from(bytes));
                if self.content_type.is_none() {
                    self.content_type = Some(ContentType::Json.as_str().to_string());
                }
            }
            Err(e) => self.fail(RequestError::Serialization(e.to_string())),
        }
        self
    }

    /// Add a form parameter
    #[must_use]
    pub fn form_param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.form_params.push((name.into(), value.to_string()));
        self
    }

    /// Add several form parameters in order
    #[must_use]
    pub fn form_params<I, K, V>(self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: ToString,
    {
        params
            .into_iter()
            .fold(self, |spec, (name, value)| spec.form_param(name, value))
    }

    /// Body and content type to send, encoding form parameters if needed
    pub(crate) fn encoded_body(&self) -> Result<(Option<Bytes>, Option<String>), RequestError> {
        if self.body.is_some() || self.form_params.is_empty() {
            return Ok((self.body.clone(), self.content_type.clone()));
        }
        let encoded = serde_urlencoded::to_string(&self.form_params)
            .map_err(|e| RequestError::Serialization(e.to_string()))?;
        let content_type = self
            .content_type
            .clone()
            .unwrap_or_else(|| ContentType::UrlEnc.with_charset("UTF-8"));
        Ok((Some(Bytes::from(encoded)), Some(content_type)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_body_sets_content_type() {
        let spec = RequestSpecification::new().body_json(&json!({"name": "John"}));
        assert_eq!(spec.get_content_type(), Some("application/json"));
        let (body, _) = spec.encoded_body().expect("encodes");
        assert_eq!(body.as_deref(), Some(br#"{"name":"John"}"#.as_slice()));
    }

    #[test]
    fn form_params_are_url_encoded() {
        let spec = RequestSpecification::new()
            .form_param("firstName", "John Doe")
            .form_param("age", 42);
        let (body, content_type) = spec.encoded_body().expect("encodes");
        assert_eq!(body.as_deref(), Some(b"firstName=John+Doe&age=42".as_slice()));
        assert_eq!(content_type.as_deref(), Some("application/x-www-form-urlencoded; charset=UTF-8"));
    }

    #[test]
    fn explicit_body_wins_over_form_params() {
        let spec = RequestSpecification::new().form_param("a", "b").body("raw");
        let (body, _) = spec.encoded_body().expect("encodes");
        assert_eq!(body.as_deref(), Some(b"raw".as_slice()));
    }
}
