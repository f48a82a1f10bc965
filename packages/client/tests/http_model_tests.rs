//! HTTP data model integration tests
//!
//! Requests round-trip through a closure transport into responses whose
//! bodies are read with path expressions.

use bytes::Bytes;
use http::Method;
use restcheck_client::cookie::{Cookie, Cookies};
use restcheck_client::http::{ContentType, Request, Response, Transport, TransportError};
use restcheck_client::value::PathValue;
use url::Url;

fn echo(request: &Request) -> Result<Response, TransportError> {
    let greeting = request
        .cookies()
        .get_value("name")
        .ok_or_else(|| TransportError::InvalidRequest("missing name cookie".to_string()))?;
    Ok(Response::new(200)
        .with_content_type(ContentType::Xml.with_charset("UTF-8"))
        .with_header("Set-Cookie", "visited=yes; Max-Age=3600; HttpOnly")
        .with_body(format!("<greeting><firstName>{greeting}</firstName></greeting>")))
}

#[cfg(test)]
mod transport_tests {
    use super::*;

    fn request() -> Request {
        let uri = Url::parse("http://localhost:8080/greet").expect("valid uri");
        Request::new(Method::GET, uri).with_cookies(Cookies::new(vec![Cookie::new("name", "John")]))
    }

    #[test]
    fn functions_are_transports() {
        let response = echo.execute(&request()).expect("echo answers");
        assert!(response.is_xml());
        assert_eq!(response.path("greeting.firstName").expect("xml body"), PathValue::from("John"));

        let cookie = response.cookies().get("visited").expect("set-cookie parsed");
        assert_eq!(cookie.max_age(), Some(3600));
        assert!(cookie.is_http_only());
    }

    #[test]
    fn transport_errors_propagate() {
        let uri = Url::parse("http://localhost:8080/greet").expect("valid uri");
        let err = echo.execute(&Request::new(Method::GET, uri)).expect_err("no cookie");
        assert_eq!(err, TransportError::InvalidRequest("missing name cookie".to_string()));
    }

    #[test]
    fn requests_convert_to_http() {
        let http = request()
            .with_body(Bytes::from_static(b"{}"))
            .with_content_type("application/json")
            .to_http()
            .expect("valid http request");
        assert_eq!(http.headers()["cookie"], "name=John");
        assert_eq!(http.headers()["content-type"], "application/json");
        assert_eq!(http.body().as_ref(), b"{}");
    }

    #[test]
    fn json_is_the_default_body_kind() {
        let response = Response::new(200).with_body(r#"{"id": 7}"#);
        assert!(!response.is_xml());
        assert_eq!(response.path("id").expect("json body"), PathValue::from(7));
    }
}
