//! Cookie header utilities

use indexmap::IndexMap;

use super::Cookies;

/// Format cookies into a request `Cookie` header value
#[must_use]
pub fn format_cookie(cookies: &Cookies) -> String {
    cookies
        .iter()
        .map(|cookie| format!("{}={}", cookie.name(), cookie.value().unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Parse a request `Cookie` header string into name/value pairs
#[must_use]
pub fn parse_cookie(cookie_header: &str) -> IndexMap<String, String> {
    let mut cookies = IndexMap::new();

    for pair in cookie_header.split(';') {
        let pair = pair.trim();
        if let Some((key, value)) = pair.split_once('=') {
            cookies.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    cookies
}

/// Validate cookie name and value according to RFC 6265
///
/// # Errors
///
/// Returns an error message as a `String` if validation fails:
/// - If the cookie name is empty
/// - If the cookie name contains control characters or RFC 6265 separator characters: `(),/<>@[\\]{}`
/// - If the cookie value contains control characters (except tab character)
pub fn validate_cookie(name: &str, value: &str) -> Result<(), String> {
    if name.is_empty() {
        return Err("Cookie name cannot be empty".to_string());
    }

    for ch in name.chars() {
        if ch.is_control() || "(),/<>@[\\]{}".contains(ch) {
            return Err(format!("Invalid character '{ch}' in cookie name"));
        }
    }

    for ch in value.chars() {
        if ch.is_control() && ch != '\t' {
            return Err(format!("Invalid character '{ch}' in cookie value"));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cookie::Cookie;

    #[test]
    fn header_round() {
        let cookies = Cookies::new(vec![Cookie::new("a", "1"), Cookie::new("b", "2")]);
        let header = format_cookie(&cookies);
        assert_eq!(header, "a=1; b=2");
        assert_eq!(parse_cookie(&header).get("b").map(String::as_str), Some("2"));
    }

    #[test]
    fn rejects_separators_in_names() {
        assert!(validate_cookie("a b", "x").is_ok());
        assert!(validate_cookie("a/b", "x").is_err());
        assert!(validate_cookie("", "x").is_err());
    }
}
