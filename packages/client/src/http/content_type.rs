//! Content type enumeration and MIME matching
//!
//! Each variant covers a family of MIME types; the first string is the
//! canonical one used when a request is sent.

use std::fmt;

/// Content type families recognised when choosing how to read a body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentType {
    /// `*/*`
    Any,
    /// text/plain
    Text,
    /// application/json and its aliases
    Json,
    /// application/xml, text/xml, application/xhtml+xml
    Xml,
    /// text/html
    Html,
    /// application/x-www-form-urlencoded
    UrlEnc,
    /// application/octet-stream
    Binary,
}

const PLUS_XML: &str = "+xml";
const PLUS_JSON: &str = "+json";
const PLUS_HTML: &str = "+html";

impl ContentType {
    /// Every MIME type of the family, canonical first
    #[must_use]
    pub fn content_type_strings(self) -> &'static [&'static str] {
        match self {
            ContentType::Any => &["*/*"],
            ContentType::Text => &["text/plain"],
            ContentType::Json => &[
                "application/json",
                "application/javascript",
                "text/javascript",
                "text/json",
            ],
            ContentType::Xml => &["application/xml", "text/xml", "application/xhtml+xml"],
            ContentType::Html => &["text/html"],
            ContentType::UrlEnc => &["application/x-www-form-urlencoded"],
            ContentType::Binary => &["application/octet-stream"],
        }
    }

    /// Canonical MIME type
    #[inline]
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.content_type_strings()[0]
    }

    /// Family of a `Content-Type` header value; parameters and case are ignored
    ///
    /// ```
    /// use restcheck_client::http::ContentType;
    ///
    /// assert_eq!(ContentType::from_content_type("application/vnd.api+json; charset=utf-8"), Some(ContentType::Json));
    /// assert_eq!(ContentType::from_content_type("image/png"), None);
    /// ```
    #[must_use]
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let mime = without_parameters(content_type).to_ascii_lowercase();
        let listed = |family: ContentType| family.content_type_strings().contains(&mime.as_str());
        if listed(ContentType::Xml) || mime.ends_with(PLUS_XML) {
            Some(ContentType::Xml)
        } else if listed(ContentType::Json) || mime.ends_with(PLUS_JSON) {
            Some(ContentType::Json)
        } else if listed(ContentType::Text) {
            Some(ContentType::Text)
        } else if listed(ContentType::Html) || mime.ends_with(PLUS_HTML) {
            Some(ContentType::Html)
        } else {
            [ContentType::UrlEnc, ContentType::Binary, ContentType::Any]
                .into_iter()
                .find(|family| listed(*family))
        }
    }

    /// Whether `content_type` is one of this family's MIME types
    #[must_use]
    pub fn matches(self, content_type: &str) -> bool {
        let expected = content_type.trim();
        !expected.is_empty()
            && self
                .content_type_strings()
                .iter()
                .any(|supported| supported.eq_ignore_ascii_case(expected))
    }

    /// Canonical MIME type with a charset parameter
    #[must_use]
    pub fn with_charset(self, charset: &str) -> String {
        let charset = charset.trim();
        if charset.is_empty() {
            return self.as_str().to_string();
        }
        format!("{}; charset={charset}", self.as_str())
    }

    /// Value for an `Accept` header covering the whole family
    #[must_use]
    pub fn accept_header(self) -> String {
        self.content_type_strings().join(", ")
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// MIME type without parameters: `text/xml; charset=utf-8` is `text/xml`
#[must_use]
pub fn without_parameters(content_type: &str) -> &str {
    content_type.split(';').next().unwrap_or_default().trim()
}

/// The `charset` parameter of a `Content-Type` value, unquoted
#[must_use]
pub fn charset_of(content_type: &str) -> Option<&str> {
    content_type.split(';').skip(1).find_map(|parameter| {
        let (key, value) = parameter.split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"'))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixes_and_aliases() {
        assert_eq!(ContentType::from_content_type("TEXT/XML"), Some(ContentType::Xml));
        assert_eq!(ContentType::from_content_type("application/problem+json"), Some(ContentType::Json));
        assert_eq!(ContentType::from_content_type("text/javascript"), Some(ContentType::Json));
        assert_eq!(ContentType::from_content_type("*/*"), Some(ContentType::Any));
    }

    #[test]
    fn charset_handling() {
        assert_eq!(ContentType::Json.with_charset("UTF-8"), "application/json; charset=UTF-8");
        assert_eq!(charset_of("text/html; charset=\"ISO-8859-1\""), Some("ISO-8859-1"));
        assert_eq!(charset_of("text/html"), None);
    }

    #[test]
    fn accept_header_lists_family() {
        assert_eq!(ContentType::Xml.accept_header(), "application/xml, text/xml, application/xhtml+xml");
        assert!(ContentType::Json.matches(" text/json "));
        assert!(!ContentType::Json.matches(""));
    }
}
