//! Querying XML documents with path expressions

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::config::{XmlPathConfig, decode_document};
use crate::http::ContentType;
use crate::mapping::{DefaultObjectDeserializer, DeserializationContext, deserialize_as};
use crate::path::{CompiledPath, Evaluator, Params, PathResult, join_root_path};
use crate::value::{FromPathValue, PathValue, typed_getters};

use super::{Node, NodeChildren, convert_result, parse_document};

/// A parsed XML document queried with path expressions
///
/// Paths may start with the root element's name or skip it:
///
/// ```
/// use restcheck_client::xml::XmlPath;
///
/// let xml = XmlPath::from("<shopping><category type='groceries'><item>Chocolate</item></category></shopping>")
///     .expect("valid XML");
/// assert_eq!(xml.get_string("shopping.category.item").expect("item").as_deref(), Some("Chocolate"));
/// assert_eq!(xml.get_string("category.@type").expect("attribute").as_deref(), Some("groceries"));
/// ```
#[derive(Clone)]
pub struct XmlPath {
    source: Arc<str>,
    root: Node,
    config: XmlPathConfig,
    params: Params,
    root_path: String,
}

impl XmlPath {
    /// Parse an XML text with the default configuration
    ///
    /// # Errors
    /// Returns an `InvalidXml` error if the text is not well-formed.
    #[allow(clippy::should_implement_trait)]
    pub fn from(text: &str) -> PathResult<Self> {
        Self::with_config(text, XmlPathConfig::default())
    }

    /// Alias of [`XmlPath::from`]
    ///
    /// # Errors
    /// See [`XmlPath::from`].
    #[inline]
    pub fn with(text: &str) -> PathResult<Self> {
        Self::from(text)
    }

    /// Alias of [`XmlPath::from`]
    ///
    /// # Errors
    /// See [`XmlPath::from`].
    #[inline]
    pub fn given(text: &str) -> PathResult<Self> {
        Self::from(text)
    }

    /// Parse `text` honouring the namespace and compatibility settings of `config`
    ///
    /// # Errors
    /// Returns an `InvalidXml` error if the text is not well-formed XML, or
    /// has no root element in HTML mode.
    pub fn with_config(text: &str, config: XmlPathConfig) -> PathResult<Self> {
        let document = parse_document(text, &config)?;
        Ok(Self {
            source: Arc::from(text),
            root: Node::root(document),
            config,
            params: Params::new(),
            root_path: String::new(),
        })
    }

    /// Decode `bytes` with the default charset and parse them
    ///
    /// # Errors
    /// Fails if the bytes are not valid UTF-8 or not well-formed XML.
    pub fn from_bytes(bytes: &[u8]) -> PathResult<Self> {
        Self::from_bytes_with_config(bytes, XmlPathConfig::default())
    }

    /// Decode `bytes` with the charset of `config` and parse them
    ///
    /// # Errors
    /// Fails if the charset is unsupported or the document is not well-formed.
    pub fn from_bytes_with_config(bytes: &[u8], config: XmlPathConfig) -> PathResult<Self> {
        let text = decode_document(bytes, config.charset())?;
        Self::with_config(&text, config)
    }

    /// Re-read the document with another configuration, keeping parameters and root path
    ///
    /// # Errors
    /// Returns an `InvalidXml` error if the document cannot be parsed under the new settings.
    pub fn using(self, config: XmlPathConfig) -> PathResult<Self> {
        let reparsed = Self::with_config(&self.source, config)?;
        Ok(Self {
            params: self.params,
            root_path: self.root_path,
            ..reparsed
        })
    }

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
    pub fn config(&self) -> &XmlPathConfig {
        &self.config
    }

    /// The document's root element
    #[inline]
    #[must_use]
    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Evaluate without collapsing node sets
    fn evaluate_raw(&self, path: &str) -> PathResult<PathValue> {
        let full = join_root_path(&self.root_path, path);
        let compiled = CompiledPath::compile(&full)?;
        match Evaluator::new(&self.params).evaluate_document(&compiled, &self.root) {
            Err(e) if e.is_missing_property() => Ok(PathValue::Null),
            other => other,
        }
    }

    /// Evaluate `path` and convert node sets into text, nodes or lists
    ///
    /// # Errors
    /// Returns an error if the path is malformed, references an undefined
    /// parameter or calls an unsupported method.
    pub fn get_value(&self, path: &str) -> PathResult<PathValue> {
        self.evaluate_raw(path).map(convert_result)
    }

    /// The single element `path` selects
    ///
    /// # Errors
    /// Fails when the path selects no element or several.
    pub fn get_node(&self, path: &str) -> PathResult<Node> {
        Node::from_path_value(self.evaluate_raw(path)?)
    }

    /// Every element `path` selects
    ///
    /// # Errors
    /// Fails when the path selects something other than elements.
    pub fn get_node_children(&self, path: &str) -> PathResult<NodeChildren> {
        NodeChildren::from_path_value(self.evaluate_raw(path)?)
    }

    /// Attribute `name` of the element `path` selects
    ///
    /// # Errors
    /// Fails when the path does not select exactly one element.
    pub fn get_attribute(&self, path: &str, name: &str) -> PathResult<Option<String>> {
        Ok(self.get_node(path)?.get_attribute(name))
    }

    /// Deserialize the selected value through the configured hook
    ///
    /// Elements are first shaped as JSON: attributes and children become
    /// keys, repeated children arrays and leaves their text.
    ///
    /// # Errors
    /// Returns a `Deserialization` error when the value does not fit `T`.
    pub fn get_object<T: DeserializeOwned>(&self, path: &str) -> PathResult<T> {
        let value = match self.evaluate_raw(path)? {
            PathValue::Nodes(mut nodes) if nodes.len() == 1 => PathValue::Node(nodes.remove(0)),
            other => other,
        };
        let ctx = DeserializationContext::new(&value, ContentType::Xml, self.config.charset());
        match self.config.object_deserializer() {
            Some(custom) => deserialize_as(custom.as_ref(), &ctx),
            None => deserialize_as(&DefaultObjectDeserializer, &ctx),
        }
    }
}

typed_getters!(XmlPath);

impl fmt::Debug for XmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("XmlPath")
            .field("root", &self.root.name())
            .field("root_path", &self.root_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for XmlPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}
