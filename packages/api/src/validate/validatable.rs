//! `then()` side of the DSL: assertions that panic on the first failure

use restcheck_client::http::Response;
use restcheck_client::path::join_root_path;

use super::expectation::{Expectation, ExpectedContentType};
use super::specification::ResponseSpecification;
use crate::error::RequestError;
use crate::extract::ExtractableResponse;
use crate::matcher::Matcher;

/// Entry point to response validation
pub trait Then {
    /// Start validating the response
    ///
    /// # Panics
    /// For `Result<Response, RequestError>`, panics if the request failed.
    fn then(self) -> ValidatableResponse;
}

impl Then for Response {
    fn then(self) -> ValidatableResponse {
        ValidatableResponse::new(self)
    }
}

impl Then for Result<Response, RequestError> {
    #[track_caller]
    fn then(self) -> ValidatableResponse {
        match self {
            Ok(response) => ValidatableResponse::new(response),
            Err(e) => panic!("Request failed: {e}"),
        }
    }
}

/// A response under validation
///
/// Each assertion checks immediately and panics with a descriptive message
/// when the response does not satisfy it.
///
/// # Examples
/// ```
/// use restcheck::prelude::*;
///
/// let response = Response::new(200)
///     .with_content_type(ContentType::Json)
///     .with_body(r#"{"lotto": {"lottoId": 5, "winners": [{"winnerId": 23}, {"winnerId": 54}]}}"#);
///
/// response
///     .then()
///     .status_code(200)
///     .body("lotto.lottoId", 5)
///     .body("lotto.winners.winnerId", has_items([23, 54]));
/// ```
#[derive(Debug, Clone)]
pub struct ValidatableResponse {
    response: Response,
    root_path: String,
}

impl ValidatableResponse {
    #[must_use]
    pub fn new(response: Response) -> Self {
        Self {
            response,
            root_path: String::new(),
        }
    }

    #[track_caller]
    fn verify(self, expectation: &Expectation) -> Self {
        if let Err(message) = expectation.check(&self.response) {
            tracing::debug!(target: "restcheck::validate", %message, "assertion failed");
            panic!("1 expectation failed.\n{message}");
        }
        self
    }

    /// # Panics
    /// If the status code does not match.
    #[track_caller]
    #[must_use]
    pub fn status_code(self, expected: impl Into<Matcher>) -> Self {
        self.verify(&Expectation::StatusCode(expected.into()))
    }

    /// # Panics
    /// If the status line does not match.
    #[track_caller]
    #[must_use]
    pub fn status_line(self, expected: impl Into<Matcher>) -> Self {
        self.verify(&Expectation::StatusLine(expected.into()))
    }

    /// # Panics
    /// If the last header called `name` does not match.
    #[track_caller]
    #[must_use]
    pub fn header(self, name: &str, expected: impl Into<Matcher>) -> Self {
        self.verify(&Expectation::Header(name.to_string(), expected.into()))
    }

    /// # Panics
    /// If any of the headers does not match.
    #[track_caller]
    #[must_use]
    pub fn headers<I, M>(self, expected: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, M)>,
        M: Into<Matcher>,
    {
        expected
            .into_iter()
            .fold(self, |response, (name, matcher)| response.header(name, matcher))
    }

    /// # Panics
    /// If the cookie is missing or its value does not match.
    #[track_caller]
    #[must_use]
    pub fn cookie(self, name: &str, expected: impl Into<Matcher>) -> Self {
        self.verify(&Expectation::Cookie(name.to_string(), expected.into()))
    }

    /// # Panics
    /// If any of the cookies is missing or does not match.
    #[track_caller]
    #[must_use]
    pub fn cookies<I, M>(self, expected: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, M)>,
        M: Into<Matcher>,
    {
        expected
            .into_iter()
            .fold(self, |response, (name, matcher)| response.cookie(name, matcher))
    }

    /// # Panics
    /// If the `Content-Type` header does not match.
    #[track_caller]
    #[must_use]
    pub fn content_type(self, expected: impl Into<ExpectedContentType>) -> Self {
        self.verify(&Expectation::ContentType(expected.into()))
    }

    /// Evaluate `path` against the body, joined to the current root path
    ///
    /// # Panics
    /// If the path cannot be evaluated or its value does not match.
    #[track_caller]
    #[must_use]
    pub fn body(self, path: &str, expected: impl Into<Matcher>) -> Self {
        let expectation = Expectation::Body {
            root: self.root_path.clone(),
            path: path.to_string(),
            matcher: expected.into(),
        };
        self.verify(&expectation)
    }

    /// Match the value at the root path, or the whole document without one
    ///
    /// # Panics
    /// If the value does not match.
    #[track_caller]
    #[must_use]
    pub fn body_root(self, expected: impl Into<Matcher>) -> Self {
        self.body("", expected)
    }

    /// Match the raw body text
    ///
    /// # Panics
    /// If the body does not match.
    #[track_caller]
    #[must_use]
    pub fn body_text(self, expected: impl Into<Matcher>) -> Self {
        self.verify(&Expectation::BodyText(expected.into()))
    }

    /// Match the response time in milliseconds
    ///
    /// # Panics
    /// If the time does not match.
    #[track_caller]
    #[must_use]
    pub fn time(self, expected: impl Into<Matcher>) -> Self {
        self.verify(&Expectation::Time(expected.into()))
    }

    /// Prefix later body paths with `root_path`
    #[must_use]
    pub fn root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    /// Extend the current root path
    #[must_use]
    pub fn append_root_path(mut self, path: &str) -> Self {
        self.root_path = join_root_path(&self.root_path, path);
        self
    }

    /// Remove `path` from the end of the root path
    ///
    /// # Panics
    /// If the root path does not end with `path`.
    #[track_caller]
    #[must_use]
    pub fn detach_root_path(mut self, path: &str) -> Self {
        match detach(&self.root_path, path) {
            Some(rest) => self.root_path = rest,
            None => panic!(
                "Cannot detach path '{path}' since root path '{}' doesn't end with it",
                self.root_path
            ),
        }
        self
    }

    #[must_use]
    pub fn no_root_path(mut self) -> Self {
        self.root_path.clear();
        self
    }

    #[must_use]
    pub fn current_root_path(&self) -> &str {
        &self.root_path
    }

    /// Syntactic connector
    #[must_use]
    pub fn and(self) -> Self {
        self
    }

    /// Check every expectation of `spec`
    ///
    /// # Panics
    /// With all failures of the specification listed.
    #[track_caller]
    #[must_use]
    pub fn assert_that(self, spec: &ResponseSpecification) -> Self {
        if let Err(error) = spec.validate(&self.response) {
            panic!("{error}");
        }
        self
    }

    /// Switch to extracting values from the response
    #[must_use]
    pub fn extract(self) -> ExtractableResponse {
        ExtractableResponse::new(self.response)
    }

    #[inline]
    #[must_use]
    pub fn response(&self) -> &Response {
        &self.response
    }
}

/// `root` without a trailing `path` segment
pub(crate) fn detach(root: &str, path: &str) -> Option<String> {
    let root = root.trim().trim_end_matches('.');
    let path = path.trim().trim_start_matches('.');
    if path.is_empty() {
        return Some(root.to_string());
    }
    if root == path {
        return Some(String::new());
    }
    root.strip_suffix(path).and_then(|rest| {
        if rest.ends_with('.') {
            Some(rest.trim_end_matches('.').to_string())
        } else if path.starts_with('[') {
            Some(rest.to_string())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{equal_to, has_size};
    use restcheck_client::http::ContentType;

    fn response() -> Response {
        Response::new(200)
            .with_content_type(ContentType::Json)
            .with_header("Set-Cookie", "session=abc")
            .with_body(r#"{"store": {"book": [{"title": "Sword"}, {"title": "Moby Dick"}]}}"#)
    }

    #[test]
    fn root_path_manipulation() {
        let validatable = response()
            .then()
            .root_path("store")
            .append_root_path("book")
            .body("title", has_size(2))
            .detach_root_path("book")
            .body("book[0].title", "Sword");
        assert_eq!(validatable.current_root_path(), "store");
    }

    #[test]
    fn detaching() {
        assert_eq!(detach("store.book", "book").as_deref(), Some("store"));
        assert_eq!(detach("store.book[0]", "[0]").as_deref(), Some("store.book"));
        assert_eq!(detach("store", "store").as_deref(), Some(""));
        assert_eq!(detach("store.notebook", "book"), None);
    }

    #[test]
    fn cookies_and_headers() {
        let _ = response()
            .then()
            .cookie("session", "abc")
            .header("content-type", equal_to("application/json"))
            .and()
            .status_line("HTTP/1.1 200 OK");
    }

    #[test]
    #[should_panic(expected = "JSON path store.book.size() doesn't match.")]
    fn failing_body_panics_with_path() {
        let _ = response().then().body("store.book.size()", 3);
    }

    #[test]
    #[should_panic(expected = "Request failed")]
    fn failed_request_panics_on_then() {
        let failed: Result<Response, RequestError> = Err(RequestError::MissingTransport);
        let _ = failed.then();
    }
}
