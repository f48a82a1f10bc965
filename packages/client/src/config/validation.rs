//! Configuration validation
//!
//! Common validation helpers shared by the path configurations.

use encoding_rs::Encoding;

/// Configuration validation result type
pub type ConfigResult<T> = Result<T, ConfigurationError>;

/// Configuration error types
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Unsupported charset: {0}")]
    UnsupportedCharset(String),

    #[error("Invalid namespace declaration: {0}")]
    InvalidNamespace(String),

    #[error("Invalid base URI: {0}")]
    InvalidBaseUri(String),

    #[error("Invalid configuration parameter: {0}")]
    InvalidParameter(String),
}

/// Configuration validation trait
pub trait Validator {
    /// Validates the configuration settings
    ///
    /// # Errors
    ///
    /// Returns a `ConfigurationError` variant if any validation fails:
    /// - `UnsupportedCharset` - if the document charset cannot be decoded
    /// - `InvalidNamespace` - if a namespace prefix or URI is empty
    /// - `InvalidBaseUri` - if a base URI does not parse
    /// - `InvalidParameter` - if a parameter is outside its valid range
    fn validate(&self) -> ConfigResult<()>;
}

/// Common configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate a charset name
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::UnsupportedCharset` unless the name is a
    /// known encoding label (case-insensitive, `ISO-8859-1` and `ASCII` accepted).
    pub fn validate_charset(charset: &str) -> ConfigResult<()> {
        if canonical_charset(charset).is_some() {
            Ok(())
        } else {
            Err(ConfigurationError::UnsupportedCharset(charset.to_string()))
        }
    }

    /// Validate a namespace prefix and URI
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidNamespace` if either part is blank
    /// or the prefix contains a colon.
    pub fn validate_namespace(prefix: &str, uri: &str) -> ConfigResult<()> {
        if prefix.trim().is_empty() {
            return Err(ConfigurationError::InvalidNamespace(format!(
                "prefix for '{uri}' cannot be empty"
            )));
        }
        if prefix.contains(':') {
            return Err(ConfigurationError::InvalidNamespace(format!(
                "prefix '{prefix}' cannot contain ':'"
            )));
        }
        if uri.trim().is_empty() {
            return Err(ConfigurationError::InvalidNamespace(format!(
                "URI for prefix '{prefix}' cannot be empty"
            )));
        }
        Ok(())
    }
}

/// Canonical name of a supported charset
///
/// US-ASCII keeps its own name so documents declared as ASCII are held to it;
/// every other label resolves through the WHATWG encoding registry.
///
/// ```rust
/// use restcheck_client::config::canonical_charset;
///
/// assert_eq!(canonical_charset("utf8"), Some("UTF-8"));
/// assert_eq!(canonical_charset("latin1"), Some("windows-1252"));
/// assert_eq!(canonical_charset("x-bogus"), None);
/// ```
#[must_use]
pub fn canonical_charset(charset: &str) -> Option<&'static str> {
    if is_us_ascii(charset) {
        return Some("US-ASCII");
    }
    Encoding::for_label(charset.trim().as_bytes()).map(Encoding::name)
}

/// Whether `charset` names US-ASCII
#[must_use]
pub fn is_us_ascii(charset: &str) -> bool {
    matches!(charset.trim().to_ascii_uppercase().as_str(), "US-ASCII" | "ASCII")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn charsets() {
        assert!(ConfigValidator::validate_charset("utf-8").is_ok());
        assert!(ConfigValidator::validate_charset("ASCII").is_ok());
        assert!(ConfigValidator::validate_charset("ISO-8859-1").is_ok());
        assert!(ConfigValidator::validate_charset("Shift_JIS").is_ok());
        assert_eq!(
            ConfigValidator::validate_charset("EBCDIC"),
            Err(ConfigurationError::UnsupportedCharset("EBCDIC".to_string()))
        );
    }

    #[test]
    fn namespaces() {
        assert!(ConfigValidator::validate_namespace("ns", "http://localhost/").is_ok());
        assert!(ConfigValidator::validate_namespace("", "http://localhost/").is_err());
        assert!(ConfigValidator::validate_namespace("ns", " ").is_err());
    }
}
