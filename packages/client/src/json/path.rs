//! Querying JSON documents with path expressions

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::Value as JsonValue;

use crate::config::{JsonPathConfig, decode_document};
use crate::http::ContentType;
use crate::mapping::{DefaultObjectDeserializer, DeserializationContext, deserialize_as};
use crate::path::{self, Params, PathError, PathResult, join_root_path};
use crate::value::{PathValue, typed_getters};

/// A parsed JSON document queried with path expressions
///
/// ```
/// use restcheck_client::json::JsonPath;
///
/// let json = JsonPath::from(r#"{"store": {"book": [{"author": "Nigel Rees", "price": 8.95}]}}"#)
///     .expect("valid JSON");
/// assert_eq!(json.get_string("store.book[0].author").expect("author").as_deref(), Some("Nigel Rees"));
/// assert_eq!(json.get_int("store.book.size()").expect("size"), 1);
/// ```
#[derive(Clone)]
pub struct JsonPath {
    document: Arc<JsonValue>,
    root: PathValue,
    config: JsonPathConfig,
    params: Params,
    root_path: String,
}

impl JsonPath {
    /// Parse a JSON text
    ///
    /// # Errors
    /// Returns an `InvalidJson` error if the text is not valid JSON.
    #[allow(clippy::should_implement_trait)]
    pub fn from(text: &str) -> PathResult<Self> {
        let document: JsonValue = serde_json::from_str(text).map_err(|e| {
            tracing::debug!(target: "restcheck::json", error = %e, "JSON parse failure");
            PathError::invalid_json(format!("Failed to parse the JSON document: {e}"))
        })?;
        Ok(Self::from_value(document))
    }

    /// Alias of [`JsonPath::from`]
    ///
    /// # Errors
    /// See [`JsonPath::from`].
    #[inline]
    pub fn with(text: &str) -> PathResult<Self> {
        Self::from(text)
    }

    /// Alias of [`JsonPath::from`]
    ///
    /// # Errors
    /// See [`JsonPath::from`].
    #[inline]
    pub fn given(text: &str) -> PathResult<Self> {
        Self::from(text)
    }

    /// Decode `bytes` with the default charset and parse them
    ///
    /// # Errors
    /// Fails if the bytes are not valid UTF-8 or not valid JSON.
    pub fn from_bytes(bytes: &[u8]) -> PathResult<Self> {
        Self::from_bytes_with_config(bytes, JsonPathConfig::default())
    }

    /// Decode `bytes` with the charset of `config` and parse them
    ///
    /// # Errors
    /// Fails if the charset is unsupported or the document is not valid JSON.
    pub fn from_bytes_with_config(bytes: &[u8], config: JsonPathConfig) -> PathResult<Self> {
        let text = decode_document(bytes, config.charset())?;
        Ok(Self::from(&text)?.using(config))
    }

    /// Wrap an already parsed tree
    #[must_use]
    pub fn from_value(document: JsonValue) -> Self {
        let config = JsonPathConfig::default();
        let root = PathValue::from_json(&document, config.number_return_type());
        Self {
            document: Arc::new(document),
            root,
            config,
            params: Params::new(),
            root_path: String::new(),
        }
    }

    /// Apply a configuration; numbers are re-read with its return type
    #[must_use]
    pub fn using(mut self, config: JsonPathConfig) -> Self {
        if config.number_return_type() != self.config.number_return_type() {
            self.root = PathValue::from_json(&self.document, config.number_return_type());
        }
        self.config = config;
        self
    }

    /// Make `name` available to expressions
    #[must_use]
    pub fn param(mut self, name: impl Into<String>, value: impl Into<PathValue>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    #[must_use]
    pub fn params<I, K, V>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<PathValue>,
    {
        self.params
            .extend(params.into_iter().map(|(name, value)| (name.into(), value.into())));
        self
    }

    /// Prefix every subsequent path with `root_path`
    #[must_use]
    pub fn set_root_path(mut self, root_path: impl Into<String>) -> Self {
        self.root_path = root_path.into();
        self
    }

    #[inline]
    #[must_use]
    pub fn root_path(&self) -> &str {
        &self.root_path
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &JsonPathConfig {
        &self.config
    }

    /// Evaluate `path` (joined to the root path) and return the raw value
    ///
    /// # Errors
    /// Returns an error if the path is malformed, references an undefined
    /// parameter or calls an unsupported method.
    pub fn get_value(&self, path: &str) -> PathResult<PathValue> {
        let full = join_root_path(&self.root_path, path);
        path::evaluate(&full, &self.root, &self.params)
    }

    /// Deserialize the selected value through the configured hook
    ///
    /// # Errors
    /// Returns a `Deserialization` error when the value does not fit `T`.
    pub fn get_object<T: DeserializeOwned>(&self, path: &str) -> PathResult<T> {
        let value = self.get_value(path)?;
        let ctx = DeserializationContext::new(&value, ContentType::Json, self.config.charset());
        match self.config.object_deserializer() {
            Some(custom) => deserialize_as(custom.as_ref(), &ctx),
            None => deserialize_as(&DefaultObjectDeserializer, &ctx),
        }
    }

    /// The document re-serialized with indentation
    #[must_use]
    pub fn prettify(&self) -> String {
        serde_json::to_string_pretty(self.document.as_ref()).unwrap_or_else(|_| self.document.to_string())
    }
}

typed_getters!(JsonPath);

impl fmt::Debug for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JsonPath")
            .field("root_path", &self.root_path)
            .field("params", &self.params.keys().collect::<Vec<_>>())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for JsonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.document)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Number, NumberReturnType};

    const STORE: &str = r#"{
        "store": {
            "book": [
                {"category": "reference", "author": "Nigel Rees", "title": "Sayings of the Century", "price": 8.95},
                {"category": "fiction", "author": "Evelyn Waugh", "title": "Sword of Honour", "price": 12},
                {"category": "fiction", "author": "Herman Melville", "title": "Moby Dick", "isbn": "0-553-21311-3", "price": 8.99},
                {"category": "fiction", "author": "J. R. R. Tolkien", "title": "The Lord of the Rings", "isbn": "0-395-19395-8", "price": 22.99}
            ],
            "bicycle": {"color": "red", "price": 19.95}
        }
    }"#;

    fn store() -> JsonPath {
        JsonPath::from(STORE).expect("store document parses")
    }

    #[test]
    fn filters_with_closures() {
        let titles: Vec<String> = store()
            .get_list_as("store.book.findAll { it.price < 10 }.title")
            .expect("cheap titles");
        assert_eq!(titles, vec!["Sayings of the Century", "Moby Dick"]);
    }

    #[test]
    fn default_number_policy_reads_floats() {
        let price = store().get_value("store.bicycle.price").expect("price");
        assert_eq!(price, PathValue::Number(Number::Float(19.95)));
    }

    #[test]
    fn big_decimal_policy_keeps_digits() {
        let json = store().using(JsonPathConfig::new().with_number_return_type(NumberReturnType::BigDecimal));
        let price = json.get_value("store.bicycle.price").expect("price");
        assert_eq!(price.to_string(), "19.95");
        assert!(matches!(price, PathValue::Number(Number::BigDecimal(_))));
    }

    #[test]
    fn root_path_prefixes_paths() {
        let json = store().set_root_path("store.book");
        assert_eq!(json.get_string("[1].author").expect("author").as_deref(), Some("Evelyn Waugh"));
        assert_eq!(json.get_int("size()").expect("size"), 4);
    }

    #[test]
    fn malformed_documents_are_rejected() {
        let err = JsonPath::from("{\"a\": ").expect_err("truncated");
        assert_eq!(err.kind, crate::path::ErrorKind::InvalidJson);
    }

    #[test]
    fn undefined_parameter_message() {
        let err = store()
            .get_value("store.book.findAll { it.price < maxPrice }")
            .expect_err("maxPrice is not defined");
        assert_eq!(
            err.message,
            "The parameter \"maxPrice\" was used but not defined. Define parameters using the param(...) function"
        );
    }

    #[test]
    fn parameters_are_visible_in_closures() {
        let json = store().param("maxPrice", 10);
        let authors: Vec<String> = json
            .get_list_as("store.book.findAll { it.price < maxPrice }.author")
            .expect("authors");
        assert_eq!(authors, vec!["Nigel Rees", "Herman Melville"]);
    }
}
