//! JSON path configuration

use std::fmt;
use std::sync::Arc;

use super::validation::{ConfigResult, ConfigValidator, Validator};
use crate::mapping::ObjectDeserializer;
use crate::value::NumberReturnType;

/// Settings applied when a [`JsonPath`](crate::json::JsonPath) parses and evaluates a document
#[derive(Clone)]
pub struct JsonPathConfig {
    number_return_type: NumberReturnType,
    charset: String,
    deserializer: Option<Arc<dyn ObjectDeserializer>>,
}

impl JsonPathConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// How JSON numbers are represented
    #[must_use]
    pub fn with_number_return_type(mut self, number_return_type: NumberReturnType) -> Self {
        self.number_return_type = number_return_type;
        self
    }

    /// Charset used by [`JsonPath::from_bytes`](crate::json::JsonPath::from_bytes)
    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    /// Hook used by `get_object`
    #[must_use]
    pub fn with_object_deserializer(mut self, deserializer: impl ObjectDeserializer + 'static) -> Self {
        self.deserializer = Some(Arc::new(deserializer));
        self
    }

    #[inline]
    #[must_use]
    pub fn number_return_type(&self) -> NumberReturnType {
        self.number_return_type
    }

    #[inline]
    #[must_use]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    #[inline]
    #[must_use]
    pub fn object_deserializer(&self) -> Option<&Arc<dyn ObjectDeserializer>> {
        self.deserializer.as_ref()
    }
}

impl Default for JsonPathConfig {
    fn default() -> Self {
        Self {
            number_return_type: NumberReturnType::FloatAndDouble,
            charset: "UTF-8".to_string(),
            deserializer: None,
        }
    }
}

impl fmt::Debug for JsonPathConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonPathConfig")
            .field("number_return_type", &self.number_return_type)
            .field("charset", &self.charset)
            .field("custom_deserializer", &self.deserializer.is_some())
            .finish()
    }
}

impl Validator for JsonPathConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_charset(&self.charset)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = JsonPathConfig::default();
        assert_eq!(config.number_return_type(), NumberReturnType::FloatAndDouble);
        assert_eq!(config.charset(), "UTF-8");
        assert!(config.object_deserializer().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn rejects_unknown_charset() {
        let config = JsonPathConfig::new().with_charset("EBCDIC");
        assert!(config.validate().is_err());
    }
}
