//! Reusable response expectations

use restcheck_client::http::Response;
use restcheck_client::path::join_root_path;

use super::expectation::{Expectation, ExpectedContentType};
use crate::error::AssertionError;
use crate::matcher::Matcher;

/// Expectations to check against any number of responses
///
/// Unlike [`ValidatableResponse`](super::ValidatableResponse), validation
/// checks every expectation and reports all failures together.
///
/// # Examples
/// ```
/// use restcheck::prelude::*;
///
/// let spec = ResponseSpecification::new()
///     .expect_status_code(200)
///     .expect_content_type(ContentType::Json)
///     .expect_body("greeting.firstName", "John");
///
/// let response = Response::new(200)
///     .with_content_type("application/json")
///     .with_body(r#"{"greeting": {"firstName": "John"}}"#);
/// assert!(spec.validate(&response).is_ok());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ResponseSpecification {
    expectations: Vec<Expectation>,
    root_path: String,
}

impl ResponseSpecification {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn expect(mut self, expectation: Expectation) -> Self {
        self.expectations.push(expectation);
        self
    }

    #[must_use]
    pub fn expect_status_code(self, expected: impl Into<Matcher>) -> Self {
        self.expect(Expectation::StatusCode(expected.into()))
    }

    #[must_use]
    pub fn expect_status_line(self, expected: impl Into<Matcher>) -> Self {
        self.expect(Expectation::StatusLine(expected.into()))
    }

    #[must_use]
    pub fn expect_header(self, name: impl Into<String>, expected: impl Into<Matcher>) -> Self {
        self.expect(Expectation::Header(name.into(), expected.into()))
    }

    #[must_use]
    pub fn expect_cookie(self, name: impl Into<String>, expected: impl Into<Matcher>) -> Self {
        self.expect(Expectation::Cookie(name.into(), expected.into()))
    }

    #[must_use]
    pub fn expect_content_type(self, expected: impl Into<ExpectedContentType>) -> Self {
        self.expect(Expectation::ContentType(expected.into()))
    }

    /// Expect the value at `path`, joined to the root path set so far
    #[must_use]
    pub fn expect_body(self, path: impl Into<String>, expected: impl Into<Matcher>) -> Self {
        let expectation = Expectation::Body {
            root: self.root_path.clone(),
            path: path.into(),
            matcher: expected.into(),
        };
        self.expect(expectation)
    }

    #[must_use]
    pub fn expect_body_root(self, expected: impl Into<Matcher>) -> Self {
        self.expect_body("", expected)
    }

    #[must_use]
    pub fn expect_body_text(self, expected: impl Into<Matcher>) -> Self {
        self.expect(Expectation::BodyText(expected.into()))
    }

    #[must_use]
    pub fn expect_time(self, expected: impl Into<Matcher>) -> Self {
        self.expect(Expectation::Time(expected.into()))
    }

    /// Root path for body expectations added after this call
    #[must_use]
    pub fn root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    #[must_use]
    pub fn append_root_path(mut self, path: &str) -> Self {
        self.root_path = join_root_path(&self.root_path, path);
        self
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.expectations.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expectations.is_empty()
    }

    /// Check every expectation against `response`
    ///
    /// # Errors
    /// Returns an `AssertionError` listing each failed expectation.
    pub fn validate(&self, response: &Response) -> Result<(), AssertionError> {
        let failures: Vec<String> = self
            .expectations
            .iter()
            .filter_map(|expectation| expectation.check(response).err())
            .collect();
        if failures.is_empty() {
            return Ok(());
        }
        for message in &failures {
            tracing::debug!(target: "restcheck::validate", %message, "assertion failed");
        }
        Err(AssertionError::new(failures))
    }
}
