//! HTTP method implementations
//!
//! Terminal methods that resolve the target URI, assemble the request and
//! dispatch it through the configured transport.

use std::time::Instant;

use http::Method;
use restcheck_client::config::Validator;
use restcheck_client::http::{Request, Response};
use url::Url;

use crate::builder::core::RequestSpecification;
use crate::error::RequestError;

/// Join path pieces with single slashes, keeping a trailing slash of the last piece
fn join_paths(parts: &[&str]) -> String {
    let mut joined = String::new();
    for part in parts {
        let trimmed = part.trim_matches('/');
        if !trimmed.is_empty() {
            joined.push('/');
            joined.push_str(trimmed);
        }
    }
    let trailing = parts
        .iter()
        .rev()
        .find(|part| !part.trim_matches('/').is_empty())
        .is_some_and(|part| part.ends_with('/'));
    if joined.is_empty() || trailing {
        joined.push('/');
    }
    joined
}

fn is_absolute(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

impl RequestSpecification {
    /// Substitute `{name}` placeholders in `path`
    ///
    /// Values are percent-encoded unless URL encoding is disabled.
    ///
    /// # Errors
    /// Returns `UnresolvedPathParam` when a placeholder has no value and
    /// `RedundantPathParams` when a bound parameter is never used.
    pub fn resolve_path(&self, path: &str) -> Result<String, RequestError> {
        let mut resolved = String::with_capacity(path.len());
        let mut unresolved = Vec::new();
        let mut used = Vec::new();
        let mut rest = path;
        while let Some(open) = rest.find('{') {
            let Some(close) = rest[open..].find('}').map(|c| open + c) else {
                break;
            };
            resolved.push_str(&rest[..open]);
            let name = &rest[open + 1..close];
            match self.path_params.get(name) {
                Some(value) if self.config.is_url_encoding_enabled() => {
                    resolved.push_str(&urlencoding::encode(value));
                    used.push(name);
                }
                Some(value) => {
                    resolved.push_str(value);
                    used.push(name);
                }
                None => unresolved.push(name.to_string()),
            }
            rest = &rest[close + 1..];
        }
        resolved.push_str(rest);

        if !unresolved.is_empty() {
            return Err(RequestError::UnresolvedPathParam(unresolved.join(", ")));
        }
        let redundant: Vec<&str> = self
            .path_params
            .keys()
            .map(String::as_str)
            .filter(|name| !used.contains(name))
            .collect();
        if !redundant.is_empty() {
            return Err(RequestError::RedundantPathParams(redundant.join(", ")));
        }
        Ok(resolved)
    }

    /// Full URI for `path`: base URI, port, base path, path and query parameters
    ///
    /// # Errors
    /// Fails when path parameters do not resolve or the URI does not parse.
    pub fn target_uri(&self, path: &str) -> Result<Url, RequestError> {
        let resolved = self.resolve_path(path)?;
        let (path_part, inline_query) = match resolved.split_once('?') {
            Some((p, q)) => (p.to_string(), Some(q.to_string())),
            None => (resolved, None),
        };
        let invalid = |reason: String| RequestError::InvalidUri {
            uri: path.to_string(),
            reason,
        };

        let mut url = if is_absolute(&path_part) {
            Url::parse(&path_part).map_err(|e| invalid(e.to_string()))?
        } else {
            let mut base = self.config.target()?;
            let joined = join_paths(&[base.path(), self.config.base_path(), &path_part]);
            base.set_path(&joined);
            base
        };

        let mut query: Vec<String> = inline_query.into_iter().filter(|q| !q.is_empty()).collect();
        for (name, value) in &self.query_params {
            if self.config.is_url_encoding_enabled() {
                query.push(format!("{}={}", urlencoding::encode(name), urlencoding::encode(value)));
            } else {
                query.push(format!("{name}={value}"));
            }
        }
        if !query.is_empty() {
            url.set_query(Some(&query.join("&")));
        }
        Ok(url)
    }

    /// Assemble the request that would be sent for `method` and `path`
    ///
    /// # Errors
    /// Returns the first building error, or a URI or encoding failure.
    pub fn build_request(&self, method: Method, path: &str) -> Result<Request, RequestError> {
        if let Some(error) = &self.pending_error {
            return Err(error.clone());
        }
        let uri = self.target_uri(path)?;
        let (body, content_type) = self.encoded_body()?;
        let mut request = Request::new(method, uri)
            .with_headers(self.headers.clone())
            .with_cookies(self.cookies.clone());
        if let Some(body) = body {
            request = request.with_body(body);
        }
        if let Some(content_type) = content_type {
            request = request.with_content_type(content_type);
        }
        Ok(request)
    }

    /// Send a request with any method
    ///
    /// # Errors
    /// Returns a `RequestError` if the specification is invalid, no transport
    /// is configured or the transport fails.
    pub fn request(&self, method: Method, path: &str) -> Result<Response, RequestError> {
        self.config.validate()?;
        let request = self.build_request(method, path)?;
        let transport = self.transport.as_ref().ok_or(RequestError::MissingTransport)?;

        tracing::debug!(
            target: "restcheck::transport",
            method = %request.method(),
            uri = %request.uri(),
            "dispatching request"
        );
        let started = Instant::now();
        let response = transport.execute(&request).map_err(|e| {
            tracing::debug!(target: "restcheck::transport", error = %e, "transport failed");
            RequestError::from(e)
        })?;
        let elapsed = started.elapsed();
        tracing::debug!(
            target: "restcheck::transport",
            status = response.status_code(),
            elapsed_ms = elapsed.as_millis(),
            "received response"
        );

        Ok(response
            .with_time(elapsed)
            .with_json_path_config(self.config.json_path_config().clone())
            .with_xml_path_config(self.config.xml_path_config().clone()))
    }

    /// Send a GET request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn get(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::GET, path)
    }

    /// Send a POST request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn post(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::POST, path)
    }

    /// Send a PUT request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn put(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::PUT, path)
    }

    /// Send a PATCH request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn patch(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::PATCH, path)
    }

    /// Send a DELETE request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn delete(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::DELETE, path)
    }

    /// Send a HEAD request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn head(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::HEAD, path)
    }

    /// Send an OPTIONS request
    ///
    /// # Errors
    /// See [`request`](Self::request).
    pub fn options(&self, path: &str) -> Result<Response, RequestError> {
        self.request(Method::OPTIONS, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_joining() {
        assert_eq!(join_paths(&["/", "", "/users"]), "/users");
        assert_eq!(join_paths(&["/api/", "v1", "users/"]), "/api/v1/users/");
        assert_eq!(join_paths(&["/", "", ""]), "/");
    }

    #[test]
    fn target_uses_base_uri_port_and_base_path() {
        let spec = RequestSpecification::new().base_path("/api").query_param("q", "a b");
        let url = spec.target_uri("/users").expect("valid target");
        assert_eq!(url.as_str(), "http://localhost:8080/api/users?q=a%20b");
    }

    #[test]
    fn absolute_paths_ignore_the_base() {
        let spec = RequestSpecification::new().base_path("/api");
        let url = spec.target_uri("https://example.com/x?y=1").expect("valid target");
        assert_eq!(url.as_str(), "https://example.com/x?y=1");
    }

    #[test]
    fn path_params_are_encoded_and_checked() {
        let spec = RequestSpecification::new().path_param("name", "John Doe");
        assert_eq!(spec.resolve_path("/users/{name}").expect("bound"), "/users/John%20Doe");
        assert_eq!(
            spec.resolve_path("/users/{id}"),
            Err(RequestError::UnresolvedPathParam("id".to_string()))
        );
        assert_eq!(
            spec.resolve_path("/users"),
            Err(RequestError::RedundantPathParams("name".to_string()))
        );
    }

    #[test]
    fn encoding_can_be_disabled() {
        let spec = RequestSpecification::new()
            .url_encoding_enabled(false)
            .path_param("q", "a%2Fb");
        assert_eq!(spec.resolve_path("/find/{q}").expect("bound"), "/find/a%2Fb");
    }

    #[test]
    fn missing_transport_is_an_error() {
        let err = RequestSpecification::new().get("/").expect_err("no transport");
        assert_eq!(err, RequestError::MissingTransport);
    }
}
