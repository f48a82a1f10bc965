//! XML path configuration

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use super::validation::{ConfigResult, ConfigValidator, Validator};
use crate::mapping::ObjectDeserializer;

/// How strictly a document is read
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompatibilityMode {
    /// Well-formed XML only
    #[default]
    Xml,
    /// Tag-soup HTML: void elements, unquoted attributes, unclosed and
    /// mismatched tags and named HTML entities are tolerated
    Html,
}

/// Settings applied when an [`XmlPath`](crate::xml::XmlPath) parses and evaluates a document
#[derive(Clone)]
pub struct XmlPathConfig {
    namespace_aware: bool,
    declared_namespaces: IndexMap<String, String>,
    charset: String,
    compatibility_mode: CompatibilityMode,
    deserializer: Option<Arc<dyn ObjectDeserializer>>,
}

impl XmlPathConfig {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve element names by namespace; when off, names are matched as written
    #[must_use]
    pub fn with_namespace_aware(mut self, namespace_aware: bool) -> Self {
        self.namespace_aware = namespace_aware;
        self
    }

    /// Make `prefix:name` steps match elements in `uri`
    #[must_use]
    pub fn declare_namespace(mut self, prefix: impl Into<String>, uri: impl Into<String>) -> Self {
        self.declared_namespaces.insert(prefix.into(), uri.into());
        self
    }

    /// Replace every declared namespace
    #[must_use]
    pub fn with_declared_namespaces<I, K, V>(mut self, namespaces: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.declared_namespaces = namespaces
            .into_iter()
            .map(|(prefix, uri)| (prefix.into(), uri.into()))
            .collect();
        self
    }

    #[must_use]
    pub fn with_charset(mut self, charset: impl Into<String>) -> Self {
        self.charset = charset.into();
        self
    }

    #[must_use]
    pub fn with_compatibility_mode(mut self, mode: CompatibilityMode) -> Self {
        self.compatibility_mode = mode;
        self
    }

    #[must_use]
    pub fn with_object_deserializer(mut self, deserializer: impl ObjectDeserializer + 'static) -> Self {
        self.deserializer = Some(Arc::new(deserializer));
        self
    }

    #[inline]
    #[must_use]
    pub fn is_namespace_aware(&self) -> bool {
        self.namespace_aware
    }

    #[inline]
    #[must_use]
    pub fn declared_namespaces(&self) -> &IndexMap<String, String> {
        &self.declared_namespaces
    }

    #[inline]
    #[must_use]
    pub fn charset(&self) -> &str {
        &self.charset
    }

    #[inline]
    #[must_use]
    pub fn compatibility_mode(&self) -> CompatibilityMode {
        self.compatibility_mode
    }

    #[inline]
    #[must_use]
    pub fn object_deserializer(&self) -> Option<&Arc<dyn ObjectDeserializer>> {
        self.deserializer.as_ref()
    }
}

impl Default for XmlPathConfig {
    fn default() -> Self {
        Self {
            namespace_aware: true,
            declared_namespaces: IndexMap::new(),
            charset: "UTF-8".to_string(),
            compatibility_mode: CompatibilityMode::Xml,
            deserializer: None,
        }
    }
}

impl fmt::Debug for XmlPathConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlPathConfig")
            .field("namespace_aware", &self.namespace_aware)
            .field("declared_namespaces", &self.declared_namespaces)
            .field("charset", &self.charset)
            .field("compatibility_mode", &self.compatibility_mode)
            .field("custom_deserializer", &self.deserializer.is_some())
            .finish()
    }
}

impl Validator for XmlPathConfig {
    fn validate(&self) -> ConfigResult<()> {
        ConfigValidator::validate_charset(&self.charset)?;
        for (prefix, uri) in &self.declared_namespaces {
            ConfigValidator::validate_namespace(prefix, uri)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigurationError;

    #[test]
    fn namespace_declarations_are_validated() {
        let config = XmlPathConfig::new().declare_namespace("ns", "");
        assert!(matches!(config.validate(), Err(ConfigurationError::InvalidNamespace(_))));

        let config = XmlPathConfig::new().declare_namespace("ns", "http://localhost/");
        assert!(config.validate().is_ok());
        assert!(config.is_namespace_aware());
        assert_eq!(config.compatibility_mode(), CompatibilityMode::Xml);
    }
}
