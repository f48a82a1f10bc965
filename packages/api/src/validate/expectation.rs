//! Single expectations on a response and their failure messages

use std::fmt;

use restcheck_client::http::{ContentType, Response, without_parameters};
use restcheck_client::path::join_root_path;
use restcheck_client::value::PathValue;

use crate::matcher::Matcher;

/// Expected `Content-Type` of a response
#[derive(Debug, Clone)]
pub enum ExpectedContentType {
    /// Any MIME type of the family, parameters ignored
    Kind(ContentType),
    /// Case-insensitive match; parameters compared only when given
    Exact(String),
    Matching(Matcher),
}

impl ExpectedContentType {
    fn matches(&self, actual: &str) -> bool {
        match self {
            ExpectedContentType::Kind(kind) => ContentType::from_content_type(actual) == Some(*kind),
            ExpectedContentType::Exact(expected) if expected.contains(';') => {
                normalize(expected) == normalize(actual)
            }
            ExpectedContentType::Exact(expected) => {
                without_parameters(expected).trim().eq_ignore_ascii_case(without_parameters(actual).trim())
            }
            ExpectedContentType::Matching(matcher) => matcher.matches(&PathValue::from(actual)),
        }
    }
}

fn normalize(content_type: &str) -> String {
    content_type
        .split(';')
        .map(str::trim)
        .collect::<Vec<_>>()
        .join(";")
        .to_ascii_lowercase()
}

impl fmt::Display for ExpectedContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpectedContentType::Kind(kind) => write!(f, "\"{kind}\""),
            ExpectedContentType::Exact(expected) => write!(f, "\"{expected}\""),
            ExpectedContentType::Matching(matcher) => write!(f, "{matcher}"),
        }
    }
}

impl From<ContentType> for ExpectedContentType {
    fn from(kind: ContentType) -> Self {
        ExpectedContentType::Kind(kind)
    }
}

impl From<&str> for ExpectedContentType {
    fn from(expected: &str) -> Self {
        ExpectedContentType::Exact(expected.to_string())
    }
}

impl From<String> for ExpectedContentType {
    fn from(expected: String) -> Self {
        ExpectedContentType::Exact(expected)
    }
}

impl From<Matcher> for ExpectedContentType {
    fn from(matcher: Matcher) -> Self {
        ExpectedContentType::Matching(matcher)
    }
}

/// One thing a response must satisfy
#[derive(Debug, Clone)]
pub(crate) enum Expectation {
    StatusCode(Matcher),
    StatusLine(Matcher),
    Header(String, Matcher),
    Cookie(String, Matcher),
    ContentType(ExpectedContentType),
    /// Path evaluated against the body, joined to the root path active when added
    Body { root: String, path: String, matcher: Matcher },
    /// Raw body text
    BodyText(Matcher),
    /// Response time in milliseconds
    Time(Matcher),
}

impl Expectation {
    /// `Err` carries the failure message
    pub(crate) fn check(&self, response: &Response) -> Result<(), String> {
        match self {
            Expectation::StatusCode(matcher) => {
                let actual = PathValue::from(i32::from(response.status_code()));
                if matcher.matches(&actual) {
                    Ok(())
                } else {
                    Err(format!("Expected status code {matcher} but was <{actual}>."))
                }
            }
            Expectation::StatusLine(matcher) => {
                if matcher.matches(&PathValue::from(response.status_line())) {
                    Ok(())
                } else {
                    Err(format!(
                        "Expected status line {matcher} doesn't match actual status line \"{}\".",
                        response.status_line()
                    ))
                }
            }
            Expectation::Header(name, matcher) => {
                let actual = PathValue::from(response.header(name));
                if matcher.matches(&actual) {
                    Ok(())
                } else {
                    Err(format!(
                        "Expected header \"{name}\" was not {matcher}, was \"{actual}\". Headers are:\n{}",
                        response.headers()
                    ))
                }
            }
            Expectation::Cookie(name, matcher) => {
                let Some(cookie) = response.cookies().get(name) else {
                    if matcher.matches(&PathValue::Null) {
                        return Ok(());
                    }
                    return Err(format!(
                        "Cookie \"{name}\" was not defined in the response. Cookies are: \n{}",
                        response.cookies()
                    ));
                };
                let actual = PathValue::from(cookie.value());
                if matcher.matches(&actual) {
                    Ok(())
                } else {
                    Err(format!("Expected cookie \"{name}\" was not {matcher}, was \"{actual}\"."))
                }
            }
            Expectation::ContentType(expected) => {
                if expected.matches(response.content_type()) {
                    Ok(())
                } else {
                    Err(format!(
                        "Expected content-type {expected} doesn't match actual content-type \"{}\".",
                        response.content_type()
                    ))
                }
            }
            Expectation::Body { root, path, matcher } => check_body(response, root, path, matcher),
            Expectation::BodyText(matcher) => {
                let actual = PathValue::from(response.as_string());
                if matcher.matches(&actual) {
                    Ok(())
                } else {
                    Err(format!(
                        "Response body doesn't match expectation.\nExpected: {matcher}\n  Actual: {actual}"
                    ))
                }
            }
            Expectation::Time(matcher) => {
                let millis = i64::try_from(response.time().as_millis()).unwrap_or(i64::MAX);
                if matcher.matches(&PathValue::from(millis)) {
                    Ok(())
                } else {
                    Err(format!("Expected response time {matcher} but was <{millis}> milliseconds."))
                }
            }
        }
    }
}

fn check_body(response: &Response, root: &str, path: &str, matcher: &Matcher) -> Result<(), String> {
    let full = join_root_path(root, path);
    let kind = if response.is_xml() { "XML" } else { "JSON" };
    let actual = response
        .path(&full)
        .map_err(|e| format!("Failed to evaluate {kind} path {full}: {e}"))?;
    if matcher.matches(&actual) {
        Ok(())
    } else {
        let shown = if full.is_empty() { "$" } else { full.as_str() };
        Err(format!(
            "{kind} path {shown} doesn't match.\nExpected: {matcher}\n  Actual: {actual}"
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matcher::{equal_to, has_items};

    fn lotto() -> Response {
        Response::new(200)
            .with_content_type("application/json; charset=utf-8")
            .with_body(r#"{"lotto": {"lottoId": 5, "winners": [{"winnerId": 23}, {"winnerId": 54}]}}"#)
    }

    #[test]
    fn body_failure_message() {
        let expectation = Expectation::Body {
            root: String::new(),
            path: "lotto.lottoId".to_string(),
            matcher: equal_to(6),
        };
        let message = expectation.check(&lotto()).expect_err("5 is not 6");
        assert_eq!(message, "JSON path lotto.lottoId doesn't match.\nExpected: <6>\n  Actual: 5");
    }

    #[test]
    fn body_uses_root_path() {
        let expectation = Expectation::Body {
            root: "lotto".to_string(),
            path: "winners.winnerId".to_string(),
            matcher: has_items([23, 54]),
        };
        assert!(expectation.check(&lotto()).is_ok());
    }

    #[test]
    fn content_type_forms() {
        let response = lotto();
        assert!(Expectation::ContentType(ContentType::Json.into()).check(&response).is_ok());
        assert!(Expectation::ContentType("application/json".into()).check(&response).is_ok());
        assert!(Expectation::ContentType("APPLICATION/JSON; charset=UTF-8".into()).check(&response).is_ok());
        assert!(Expectation::ContentType(ContentType::Xml.into()).check(&response).is_err());
    }

    #[test]
    fn missing_cookie_message() {
        let message = Expectation::Cookie("session".to_string(), equal_to("x"))
            .check(&lotto())
            .expect_err("no cookies");
        assert!(message.starts_with("Cookie \"session\" was not defined in the response."));
    }
}
