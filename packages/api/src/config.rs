//! Request defaults shared by every specification built from them

use restcheck_client::config::{ConfigResult, ConfigurationError, JsonPathConfig, Validator, XmlPathConfig};
use url::Url;

/// Base URI used when none is configured
pub const DEFAULT_URI: &str = "http://localhost";

/// Port used for the default base URI when no port is configured
pub const DEFAULT_PORT: u16 = 8080;

/// Where requests go and how response bodies are read
#[derive(Debug, Clone)]
pub struct RestConfig {
    base_uri: String,
    base_path: String,
    port: Option<u16>,
    json_path_config: JsonPathConfig,
    xml_path_config: XmlPathConfig,
    url_encoding_enabled: bool,
}

impl Default for RestConfig {
    fn default() -> Self {
        Self {
            base_uri: DEFAULT_URI.to_string(),
            base_path: String::new(),
            port: None,
            json_path_config: JsonPathConfig::default(),
            xml_path_config: XmlPathConfig::default(),
            url_encoding_enabled: true,
        }
    }
}

impl RestConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_base_uri(mut self, base_uri: impl Into<String>) -> Self {
        self.base_uri = base_uri.into();
        self
    }

    #[must_use]
    pub fn with_base_path(mut self, base_path: impl Into<String>) -> Self {
        self.base_path = base_path.into();
        self
    }

    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    #[must_use]
    pub fn with_json_path_config(mut self, config: JsonPathConfig) -> Self {
        self.json_path_config = config;
        self
    }

    #[must_use]
    pub fn with_xml_path_config(mut self, config: XmlPathConfig) -> Self {
        self.xml_path_config = config;
        self
    }

    /// Whether path and query parameters are percent-encoded
    #[must_use]
    pub fn with_url_encoding_enabled(mut self, enabled: bool) -> Self {
        self.url_encoding_enabled = enabled;
        self
    }

    #[inline]
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    #[inline]
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    #[inline]
    #[must_use]
    pub fn port(&self) -> Option<u16> {
        self.port
    }

    #[inline]
    #[must_use]
    pub fn json_path_config(&self) -> &JsonPathConfig {
        &self.json_path_config
    }

    #[inline]
    #[must_use]
    pub fn xml_path_config(&self) -> &XmlPathConfig {
        &self.xml_path_config
    }

    #[inline]
    #[must_use]
    pub fn is_url_encoding_enabled(&self) -> bool {
        self.url_encoding_enabled
    }

    /// The base URI with the configured port applied
    ///
    /// An unset port keeps the base URI's own port; the default
    /// `http://localhost` falls back to [`DEFAULT_PORT`].
    ///
    /// # Errors
    /// Returns `InvalidBaseUri` if the base URI does not parse or cannot carry a port.
    pub fn target(&self) -> ConfigResult<Url> {
        let mut url = Url::parse(&self.base_uri)
            .map_err(|e| ConfigurationError::InvalidBaseUri(format!("{}: {e}", self.base_uri)))?;
        let port = match self.port {
            Some(port) => Some(port),
            None if url.port().is_none() && url.host_str() == Some("localhost") => Some(DEFAULT_PORT),
            None => None,
        };
        if let Some(port) = port {
            url.set_port(Some(port)).map_err(|()| {
                ConfigurationError::InvalidBaseUri(format!("{} cannot have a port", self.base_uri))
            })?;
        }
        Ok(url)
    }
}

impl Validator for RestConfig {
    fn validate(&self) -> ConfigResult<()> {
        self.target()?;
        if self.port == Some(0) {
            return Err(ConfigurationError::InvalidParameter("port must be greater than 0".to_string()));
        }
        self.json_path_config.validate()?;
        self.xml_path_config.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_target_is_localhost_8080() {
        let url = RestConfig::default().target().expect("default uri parses");
        assert_eq!(url.as_str(), "http://localhost:8080/");
    }

    #[test]
    fn explicit_port_wins() {
        let url = RestConfig::new()
            .with_base_uri("https://api.example.com")
            .with_port(9443)
            .target()
            .expect("valid uri");
        assert_eq!(url.port(), Some(9443));
    }

    #[test]
    fn remote_base_uri_keeps_its_own_port() {
        let url = RestConfig::new()
            .with_base_uri("https://api.example.com")
            .target()
            .expect("valid uri");
        assert_eq!(url.port_or_known_default(), Some(443));
    }

    #[test]
    fn unparsable_base_uri_fails_validation() {
        let err = RestConfig::new().with_base_uri("not a uri").validate().expect_err("invalid uri");
        assert!(matches!(err, ConfigurationError::InvalidBaseUri(_)));
    }
}
