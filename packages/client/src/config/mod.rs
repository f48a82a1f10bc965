//! Configuration for JSON and XML path evaluation

pub mod json;
pub mod validation;
pub mod xml;

pub use json::JsonPathConfig;
pub use validation::{ConfigResult, ConfigValidator, ConfigurationError, Validator, canonical_charset, is_us_ascii};
pub use xml::{CompatibilityMode, XmlPathConfig};

use encoding_rs::Encoding;

use crate::path::error::{PathError, PathResult};

/// Decode a document body with the encoding named by `charset`
///
/// A byte order mark matching the encoding is dropped.
///
/// # Errors
/// Returns a `Conversion` error for unknown charset labels, bytes the
/// encoding cannot decode or non-ASCII bytes in a US-ASCII document.
pub fn decode_document(bytes: &[u8], charset: &str) -> PathResult<String> {
    let Some(encoding) = Encoding::for_label(charset.trim().as_bytes()) else {
        return Err(PathError::conversion(format!("Unsupported charset: {charset}")));
    };
    if is_us_ascii(charset) && !bytes.is_ascii() {
        return Err(PathError::conversion(
            "Document declared as US-ASCII contains non-ASCII bytes",
        ));
    }
    let (text, had_errors) = encoding.decode_with_bom_removal(bytes);
    if had_errors {
        return Err(PathError::conversion(format!(
            "Document is not valid {}",
            encoding.name()
        )));
    }
    tracing::trace!(target: "restcheck::config", encoding = encoding.name(), len = bytes.len(), "decoded document");
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_by_label() {
        assert_eq!(decode_document(b"caf\xE9", "ISO-8859-1").expect("latin-1"), "caf\u{e9}");
        assert_eq!(decode_document("caf\u{e9}".as_bytes(), "utf-8").expect("utf-8"), "caf\u{e9}");
        assert_eq!(decode_document(b"\xEF\xBB\xBF{}", "UTF-8").expect("bom"), "{}");
        assert_eq!(decode_document(b"\x82\xA0", "Shift_JIS").expect("sjis"), "\u{3042}");
    }

    #[test]
    fn rejects_bad_input() {
        assert!(decode_document(b"{}", "x-bogus").is_err());
        assert!(decode_document(b"caf\xE9", "US-ASCII").is_err());
        assert!(decode_document(b"caf\xE9", "UTF-8").is_err());
    }
}
