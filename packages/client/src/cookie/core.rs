//! Response and request cookies

use std::fmt;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;

const COMMENT: &str = "Comment";
const PATH: &str = "Path";
const DOMAIN: &str = "Domain";
const MAX_AGE: &str = "Max-Age";
const SECURE: &str = "Secure";
const HTTP_ONLY: &str = "HttpOnly";
const EXPIRES: &str = "Expires";
const VERSION: &str = "Version";

/// A single HTTP cookie with its `Set-Cookie` attributes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cookie {
    name: String,
    value: Option<String>,
    comment: Option<String>,
    path: Option<String>,
    domain: Option<String>,
    max_age: Option<i64>,
    secure: bool,
    http_only: bool,
    expiry: Option<DateTime<Utc>>,
    version: Option<i32>,
}

impl Cookie {
    #[must_use]
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::without_value(name)
        }
    }

    /// A cookie that is only a name, such as a bare `Set-Cookie: flag`
    #[must_use]
    pub fn without_value(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: None,
            comment: None,
            path: None,
            domain: None,
            max_age: None,
            secure: false,
            http_only: false,
            expiry: None,
            version: None,
        }
    }

    #[must_use]
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = Some(domain.into());
        self
    }

    #[must_use]
    pub fn with_max_age(mut self, seconds: i64) -> Self {
        self.max_age = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_secured(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    #[must_use]
    pub fn with_http_only(mut self, http_only: bool) -> Self {
        self.http_only = http_only;
        self
    }

    #[must_use]
    pub fn with_expiry(mut self, expiry: DateTime<Utc>) -> Self {
        self.expiry = Some(expiry);
        self
    }

    /// Negative versions mean "not set"
    #[must_use]
    pub fn with_version(mut self, version: i32) -> Self {
        self.version = (version >= 0).then_some(version);
        self
    }

    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    #[inline]
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn domain(&self) -> Option<&str> {
        self.domain.as_deref()
    }

    #[inline]
    #[must_use]
    pub fn max_age(&self) -> Option<i64> {
        self.max_age
    }

    #[inline]
    #[must_use]
    pub fn is_secured(&self) -> bool {
        self.secure
    }

    #[inline]
    #[must_use]
    pub fn is_http_only(&self) -> bool {
        self.http_only
    }

    #[inline]
    #[must_use]
    pub fn expiry(&self) -> Option<DateTime<Utc>> {
        self.expiry
    }

    #[inline]
    #[must_use]
    pub fn version(&self) -> Option<i32> {
        self.version
    }
}

/// Renders the `Set-Cookie` form: `name=value;Path=/;Secure`
impl fmt::Display for Cookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        if let Some(value) = &self.value {
            write!(f, "={value}")?;
        }
        if let Some(comment) = &self.comment {
            write!(f, ";{COMMENT}={comment}")?;
        }
        if let Some(path) = &self.path {
            write!(f, ";{PATH}={path}")?;
        }
        if let Some(domain) = &self.domain {
            write!(f, ";{DOMAIN}={domain}")?;
        }
        if let Some(max_age) = self.max_age {
            write!(f, ";{MAX_AGE}={max_age}")?;
        }
        if self.secure {
            write!(f, ";{SECURE}")?;
        }
        if self.http_only {
            write!(f, ";{HTTP_ONLY}")?;
        }
        if let Some(expiry) = self.expiry {
            write!(f, ";{EXPIRES}={}", expiry.format("%a, %d %b %Y %H:%M:%S GMT"))?;
        }
        if let Some(version) = self.version {
            write!(f, ";{VERSION}={version}")?;
        }
        Ok(())
    }
}

/// Error representing a parse failure of a `Set-Cookie` header
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid Set-Cookie header '{header}': {reason}")]
pub struct CookieParseError {
    header: String,
    reason: String,
}

/// Parse one `Set-Cookie` header value
///
/// ```
/// use restcheck_client::cookie::parse_set_cookie;
///
/// let cookie = parse_set_cookie("session=abc; Path=/; HttpOnly; Max-Age=60").expect("valid cookie");
/// assert_eq!(cookie.value(), Some("abc"));
/// assert_eq!(cookie.path(), Some("/"));
/// assert!(cookie.is_http_only());
/// assert_eq!(cookie.max_age(), Some(60));
/// ```
///
/// # Errors
/// Returns a [`CookieParseError`] when the header has no cookie name.
pub fn parse_set_cookie(header: &str) -> Result<Cookie, CookieParseError> {
    let has_value = header
        .split(';')
        .next()
        .is_some_and(|pair| pair.contains('='));
    // The cookie crate requires a name=value pair; a bare name gets an empty value
    let normalized = if has_value {
        header.to_string()
    } else {
        match header.split_once(';') {
            Some((name, attributes)) => format!("{}=;{attributes}", name.trim()),
            None => format!("{}=", header.trim()),
        }
    };
    let parsed = ::cookie::Cookie::parse(normalized.as_str()).map_err(|e| CookieParseError {
        header: header.to_string(),
        reason: e.to_string(),
    })?;

    let mut cookie = if has_value {
        Cookie::new(parsed.name(), parsed.value())
    } else {
        Cookie::without_value(parsed.name())
    };
    cookie.path = parsed.path().map(str::to_string);
    cookie.domain = parsed.domain().map(str::to_string);
    cookie.max_age = parsed.max_age().map(|age| age.whole_seconds());
    cookie.secure = parsed.secure().unwrap_or(false);
    cookie.http_only = parsed.http_only().unwrap_or(false);
    cookie.expiry = parsed
        .expires_datetime()
        .and_then(|at| DateTime::from_timestamp(at.unix_timestamp(), 0));

    // Comment and Version predate RFC 6265 and are read by hand
    for attribute in header.split(';').skip(1) {
        let Some((key, value)) = attribute.split_once('=') else {
            continue;
        };
        let (key, value) = (key.trim(), value.trim());
        if key.eq_ignore_ascii_case(COMMENT) {
            cookie.comment = Some(value.to_string());
        } else if key.eq_ignore_ascii_case(VERSION) {
            cookie.version = value.parse().ok().filter(|v: &i32| *v >= 0);
        }
    }
    Ok(cookie)
}

/// Cookies in the order they were received; a name may repeat
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cookies {
    cookies: Vec<Cookie>,
}

impl Cookies {
    #[must_use]
    pub fn new(cookies: Vec<Cookie>) -> Self {
        Self { cookies }
    }

    pub fn add(&mut self, cookie: Cookie) {
        self.cookies.push(cookie);
    }

    #[inline]
    #[must_use]
    pub fn size(&self) -> usize {
        self.cookies.len()
    }

    #[inline]
    #[must_use]
    pub fn exist(&self) -> bool {
        !self.cookies.is_empty()
    }

    #[must_use]
    pub fn has_cookie_with_name(&self, name: &str) -> bool {
        self.cookies.iter().any(|cookie| cookie.name.eq_ignore_ascii_case(name))
    }

    /// The last cookie called `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Cookie> {
        self.cookies
            .iter()
            .rev()
            .find(|cookie| cookie.name.eq_ignore_ascii_case(name))
    }

    #[must_use]
    pub fn get_value(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Cookie::value)
    }

    #[must_use]
    pub fn get_list(&self, name: &str) -> Vec<&Cookie> {
        self.cookies
            .iter()
            .filter(|cookie| cookie.name.eq_ignore_ascii_case(name))
            .collect()
    }

    #[must_use]
    pub fn get_values(&self, name: &str) -> Vec<&str> {
        self.get_list(name).into_iter().filter_map(Cookie::value).collect()
    }

    #[inline]
    #[must_use]
    pub fn as_list(&self) -> &[Cookie] {
        &self.cookies
    }

    /// Name to value, later cookies overriding earlier ones
    #[must_use]
    pub fn as_map(&self) -> IndexMap<String, String> {
        self.cookies
            .iter()
            .map(|cookie| (cookie.name.clone(), cookie.value.clone().unwrap_or_default()))
            .collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Cookie> {
        self.cookies.iter()
    }
}

impl FromIterator<Cookie> for Cookies {
    fn from_iter<I: IntoIterator<Item = Cookie>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a Cookies {
    type Item = &'a Cookie;
    type IntoIter = std::slice::Iter<'a, Cookie>;

    fn into_iter(self) -> Self::IntoIter {
        self.cookies.iter()
    }
}

impl fmt::Display for Cookies {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cookie) in self.cookies.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{cookie}")?;
        }
        Ok(())
    }
}
