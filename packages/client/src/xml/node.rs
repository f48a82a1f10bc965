//! XML element tree
//!
//! A parsed document is an arena of elements; a [`Node`] is a cheap shared
//! handle to one element of that arena, so node sets produced by path
//! evaluation can be cloned freely and still reach their parents.

use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::{Map as JsonMap, Value as JsonValue};

use crate::path::error::PathResult;
use crate::value::PathValue;

/// Element content in document order
#[derive(Debug, Clone)]
pub(crate) enum Content {
    Element(usize),
    Text(String),
}

#[derive(Debug, Clone)]
pub(crate) struct ElementData {
    /// Name reported by `name()`: local name when namespace aware, else the raw qualified name
    pub(crate) name: String,
    pub(crate) qualified_name: String,
    pub(crate) namespace: Option<String>,
    /// Keyed by qualified attribute name
    pub(crate) attributes: IndexMap<String, String>,
    pub(crate) content: Vec<Content>,
    pub(crate) parent: Option<usize>,
}

/// A parsed XML document
#[derive(Debug)]
pub(crate) struct Document {
    pub(crate) elements: Vec<ElementData>,
    pub(crate) namespace_aware: bool,
    /// Prefixes the caller declared for use in path expressions
    pub(crate) declared_namespaces: IndexMap<String, String>,
}

/// Handle to one element of a parsed document
#[derive(Clone)]
pub struct Node {
    document: Arc<Document>,
    index: usize,
}

impl Node {
    pub(crate) fn root(document: Arc<Document>) -> Self {
        Self { document, index: 0 }
    }

    #[inline]
    fn data(&self) -> &ElementData {
        &self.document.elements[self.index]
    }

    fn sibling(&self, index: usize) -> Node {
        Node {
            document: Arc::clone(&self.document),
            index,
        }
    }

    /// Element name; the local part when the document was parsed namespace aware
    #[must_use]
    pub fn name(&self) -> &str {
        &self.data().name
    }

    /// Name as written in the document, prefix included
    #[must_use]
    pub fn qualified_name(&self) -> &str {
        &self.data().qualified_name
    }

    /// Namespace URI of the element, if any
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.data().namespace.as_deref()
    }

    /// Concatenated text of this element and all descendants
    #[must_use]
    pub fn value(&self) -> String {
        let mut text = String::new();
        self.collect_text(&mut text);
        text
    }

    fn collect_text(&self, out: &mut String) {
        for content in &self.data().content {
            match content {
                Content::Text(text) => out.push_str(text),
                Content::Element(index) => self.sibling(*index).collect_text(out),
            }
        }
    }

    /// All attributes, keyed by qualified name
    #[must_use]
    pub fn attributes(&self) -> IndexMap<String, String> {
        self.data().attributes.clone()
    }

    /// Attribute value by name; a leading `@` is ignored and an unprefixed
    /// name also matches the local part of a prefixed attribute
    #[must_use]
    pub fn get_attribute(&self, name: &str) -> Option<String> {
        let name = name.strip_prefix('@').unwrap_or(name);
        let attributes = &self.data().attributes;
        if let Some(value) = attributes.get(name) {
            return Some(value.clone());
        }
        if name.contains(':') || !self.document.namespace_aware {
            return None;
        }
        attributes
            .iter()
            .find(|(key, _)| key.rsplit_once(':').is_some_and(|(_, local)| local == name))
            .map(|(_, value)| value.clone())
    }

    pub(crate) fn child_elements(&self) -> impl Iterator<Item = Node> + '_ {
        self.data().content.iter().filter_map(|content| match content {
            Content::Element(index) => Some(self.sibling(*index)),
            Content::Text(_) => None,
        })
    }

    /// Child elements of this node
    #[must_use]
    pub fn children(&self) -> NodeChildren {
        NodeChildren::new(self.child_elements().collect())
    }

    /// First child element matching `name`
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Node> {
        self.child_elements().find(|child| child.matches_name(name))
    }

    /// Evaluate a path relative to this node
    ///
    /// # Errors
    /// Returns an error if the path is malformed or cannot be evaluated.
    pub fn get_path(&self, path: &str) -> PathResult<PathValue> {
        let compiled = crate::path::compiler::CompiledPath::compile(path)?;
        let evaluator = crate::path::evaluator::Evaluator::new(&crate::path::NO_PARAMS);
        let value = match evaluator.evaluate(&compiled, &PathValue::Node(self.clone())) {
            Err(e) if e.is_missing_property() => PathValue::Null,
            other => other?,
        };
        Ok(crate::xml::convert_result(value))
    }

    /// Parent element, `None` for the document root
    #[must_use]
    pub fn parent(&self) -> Option<Node> {
        self.data().parent.map(|index| self.sibling(index))
    }

    #[must_use]
    pub fn has_element_children(&self) -> bool {
        self.data()
            .content
            .iter()
            .any(|content| matches!(content, Content::Element(_)))
    }

    /// This node followed by all descendant elements in document order
    #[must_use]
    pub fn depth_first(&self) -> Vec<Node> {
        let mut out = vec![self.clone()];
        for child in self.child_elements() {
            out.extend(child.depth_first());
        }
        out
    }

    /// This node followed by all descendant elements, level by level
    #[must_use]
    pub fn breadth_first(&self) -> Vec<Node> {
        let mut out = vec![self.clone()];
        let mut cursor = 0;
        while cursor < out.len() {
            let children: Vec<Node> = out[cursor].child_elements().collect();
            out.extend(children);
            cursor += 1;
        }
        out
    }

    /// Whether a path step name selects this element
    ///
    /// Namespace aware documents match unprefixed steps on the local name,
    /// `:name` only on elements without a namespace, and `p:name` when `p`
    /// was declared with the element's namespace URI.
    pub(crate) fn matches_name(&self, step: &str) -> bool {
        let data = self.data();
        if !self.document.namespace_aware {
            return data.qualified_name == step;
        }
        match step.split_once(':') {
            None => data.name == step,
            Some(("", local)) => data.namespace.is_none() && data.name == local,
            Some((prefix, local)) => {
                data.name == local
                    && self
                        .document
                        .declared_namespaces
                        .get(prefix)
                        .is_some_and(|uri| data.namespace.as_deref() == Some(uri.as_str()))
            }
        }
    }

    /// JSON shape used by the object-deserialization hook: attributes and
    /// child elements become keys, repeated children become arrays and leaf
    /// elements become their text.
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        if !self.has_element_children() && self.data().attributes.is_empty() {
            return JsonValue::String(self.value());
        }
        let mut object = JsonMap::new();
        for (key, value) in &self.data().attributes {
            object.insert(key.clone(), JsonValue::String(value.clone()));
        }
        for child in self.child_elements() {
            let value = child.to_json();
            match object.get_mut(child.name()) {
                Some(JsonValue::Array(items)) => items.push(value),
                Some(existing) => {
                    let first = existing.take();
                    *existing = JsonValue::Array(vec![first, value]);
                }
                None => {
                    object.insert(child.name().to_string(), value);
                }
            }
        }
        if !self.has_element_children() {
            let text = self.value();
            if !text.is_empty() {
                object.insert("value".to_string(), JsonValue::String(text));
            }
        }
        JsonValue::Object(object)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.document, &other.document) && self.index == other.index
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("name", &self.qualified_name())
            .field("attributes", &self.data().attributes)
            .finish_non_exhaustive()
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value())
    }
}

/// An ordered set of element nodes
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NodeChildren {
    nodes: Vec<Node>,
}

impl NodeChildren {
    #[must_use]
    pub fn new(nodes: Vec<Node>) -> Self {
        Self { nodes }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    /// Text of every node
    #[must_use]
    pub fn list(&self) -> Vec<String> {
        self.nodes.iter().map(Node::value).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Node> {
        self.nodes.iter()
    }

    #[must_use]
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes
    }
}

impl fmt::Display for NodeChildren {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.nodes {
            f.write_str(&node.value())?;
        }
        Ok(())
    }
}

impl IntoIterator for NodeChildren {
    type Item = Node;
    type IntoIter = std::vec::IntoIter<Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.into_iter()
    }
}

impl<'a> IntoIterator for &'a NodeChildren {
    type Item = &'a Node;
    type IntoIter = std::slice::Iter<'a, Node>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
