//! Values produced by path evaluation
//!
//! Both document kinds evaluate into [`PathValue`]: JSON trees map onto the
//! scalar, list and map variants while XML evaluation yields nodes and node
//! sets that later collapse into text or [`Node`] handles.

pub mod convert;
mod getters;
pub mod number;

pub(crate) use getters::typed_getters;

use std::fmt;

use indexmap::IndexMap;
use serde_json::Value as JsonValue;

pub use convert::FromPathValue;
pub use number::{BigDecimal, BigInt, Number, NumberReturnType};

use crate::xml::Node;

/// A value selected by a path expression
#[derive(Debug, Clone, Default)]
pub enum PathValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    List(Vec<PathValue>),
    Map(IndexMap<String, PathValue>),
    /// A single XML element
    Node(Node),
    /// An XML node set as produced by navigation steps
    Nodes(Vec<Node>),
}

impl PathValue {
    #[inline]
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, PathValue::Null)
    }

    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            PathValue::Null => "null",
            PathValue::Bool(_) => "Boolean",
            PathValue::Number(n) => n.type_name(),
            PathValue::String(_) => "String",
            PathValue::List(_) => "List",
            PathValue::Map(_) => "Map",
            PathValue::Node(_) => "Node",
            PathValue::Nodes(_) => "NodeChildren",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PathValue::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            PathValue::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PathValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[PathValue]> {
        match self {
            PathValue::List(items) => Some(items),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_map(&self) -> Option<&IndexMap<String, PathValue>> {
        match self {
            PathValue::Map(map) => Some(map),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_node(&self) -> Option<&Node> {
        match self {
            PathValue::Node(node) => Some(node),
            PathValue::Nodes(nodes) if nodes.len() == 1 => nodes.first(),
            _ => None,
        }
    }

    /// Text form: node text for XML values, display form otherwise
    #[must_use]
    pub fn text(&self) -> String {
        match self {
            PathValue::String(s) => s.clone(),
            PathValue::Node(node) => node.value(),
            PathValue::Nodes(nodes) => nodes.iter().map(Node::value).collect(),
            other => other.to_string(),
        }
    }

    /// Member count for collections, character count for strings
    #[must_use]
    pub fn size(&self) -> Option<usize> {
        match self {
            PathValue::String(s) => Some(s.chars().count()),
            PathValue::List(items) => Some(items.len()),
            PathValue::Map(map) => Some(map.len()),
            PathValue::Nodes(nodes) => Some(nodes.len()),
            PathValue::Node(_) => Some(1),
            _ => None,
        }
    }

    /// Groovy truth: null, false, zero and empty values are false
    #[must_use]
    pub fn truthy(&self) -> bool {
        match self {
            PathValue::Null => false,
            PathValue::Bool(b) => *b,
            PathValue::Number(n) => n.as_f64() != 0.0,
            PathValue::String(s) => !s.is_empty(),
            PathValue::List(items) => !items.is_empty(),
            PathValue::Map(map) => !map.is_empty(),
            PathValue::Node(_) => true,
            PathValue::Nodes(nodes) => !nodes.is_empty(),
        }
    }

    /// Convert into a JSON value; XML nodes use [`Node::to_json`]
    #[must_use]
    pub fn to_json(&self) -> JsonValue {
        match self {
            PathValue::Null => JsonValue::Null,
            PathValue::Bool(b) => JsonValue::Bool(*b),
            PathValue::Number(n) => number_to_json(n),
            PathValue::String(s) => JsonValue::String(s.clone()),
            PathValue::List(items) => JsonValue::Array(items.iter().map(PathValue::to_json).collect()),
            PathValue::Map(map) => JsonValue::Object(
                map.iter().map(|(k, v)| (k.clone(), v.to_json())).collect(),
            ),
            PathValue::Node(node) => node.to_json(),
            PathValue::Nodes(nodes) => JsonValue::Array(nodes.iter().map(Node::to_json).collect()),
        }
    }

    /// Convert a JSON tree using the given number policy
    #[must_use]
    pub fn from_json(value: &JsonValue, number_return_type: NumberReturnType) -> Self {
        match value {
            JsonValue::Null => PathValue::Null,
            JsonValue::Bool(b) => PathValue::Bool(*b),
            JsonValue::Number(n) => Number::parse(&n.to_string(), number_return_type)
                .map_or(PathValue::Null, PathValue::Number),
            JsonValue::String(s) => PathValue::String(s.clone()),
            JsonValue::Array(items) => PathValue::List(
                items
                    .iter()
                    .map(|item| PathValue::from_json(item, number_return_type))
                    .collect(),
            ),
            JsonValue::Object(map) => PathValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), PathValue::from_json(v, number_return_type)))
                    .collect(),
            ),
        }
    }
}

fn number_to_json(number: &Number) -> JsonValue {
    match number {
        Number::Float(v) => serde_json::Number::from_f64(f64::from(*v))
            .map_or(JsonValue::Null, JsonValue::Number),
        Number::Double(v) => serde_json::Number::from_f64(*v).map_or(JsonValue::Null, JsonValue::Number),
        other => serde_json::from_str::<serde_json::Number>(&other.to_string())
            .map_or(JsonValue::Null, JsonValue::Number),
    }
}

impl PartialEq for PathValue {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (PathValue::Null, PathValue::Null) => true,
            (PathValue::Bool(a), PathValue::Bool(b)) => a == b,
            (PathValue::Number(a), PathValue::Number(b)) => a == b,
            (PathValue::String(a), PathValue::String(b)) => a == b,
            (PathValue::List(a), PathValue::List(b)) => a == b,
            (PathValue::Map(a), PathValue::Map(b)) => a == b,
            (PathValue::Node(a), PathValue::Node(b)) => a == b,
            (PathValue::Nodes(a), PathValue::Nodes(b)) => a == b,
            _ => false,
        }
    }
}

impl fmt::Display for PathValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathValue::Null => f.write_str("null"),
            PathValue::Bool(b) => write!(f, "{b}"),
            PathValue::Number(n) => write!(f, "{n}"),
            PathValue::String(s) => f.write_str(s),
            PathValue::List(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            PathValue::Map(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}={value}")?;
                }
                f.write_str("}")
            }
            PathValue::Node(node) => f.write_str(&node.value()),
            PathValue::Nodes(nodes) => {
                for node in nodes {
                    f.write_str(&node.value())?;
                }
                Ok(())
            }
        }
    }
}

impl From<bool> for PathValue {
    fn from(value: bool) -> Self {
        PathValue::Bool(value)
    }
}

impl From<&str> for PathValue {
    fn from(value: &str) -> Self {
        PathValue::String(value.to_string())
    }
}

impl From<String> for PathValue {
    fn from(value: String) -> Self {
        PathValue::String(value)
    }
}

impl From<char> for PathValue {
    fn from(value: char) -> Self {
        PathValue::String(value.to_string())
    }
}

impl From<Number> for PathValue {
    fn from(value: Number) -> Self {
        PathValue::Number(value)
    }
}

impl From<i32> for PathValue {
    fn from(value: i32) -> Self {
        PathValue::Number(Number::Integer(value))
    }
}

impl From<i64> for PathValue {
    fn from(value: i64) -> Self {
        PathValue::Number(Number::from(value))
    }
}

impl From<usize> for PathValue {
    fn from(value: usize) -> Self {
        PathValue::Number(Number::from(value))
    }
}

impl From<f32> for PathValue {
    fn from(value: f32) -> Self {
        PathValue::Number(Number::Float(value))
    }
}

impl From<f64> for PathValue {
    fn from(value: f64) -> Self {
        PathValue::Number(Number::Double(value))
    }
}

impl From<Node> for PathValue {
    fn from(value: Node) -> Self {
        PathValue::Node(value)
    }
}

impl From<JsonValue> for PathValue {
    fn from(value: JsonValue) -> Self {
        PathValue::from_json(&value, NumberReturnType::default())
    }
}

impl<T: Into<PathValue>> From<Vec<T>> for PathValue {
    fn from(values: Vec<T>) -> Self {
        PathValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<PathValue>> From<Option<T>> for PathValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(PathValue::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn json_conversion_respects_number_policy() {
        let doc = json!({"price": 19.95, "count": 3});
        let value = PathValue::from_json(&doc, NumberReturnType::BigDecimal);
        let map = value.as_map().expect("object becomes a map");
        assert!(matches!(map["price"], PathValue::Number(Number::BigDecimal(_))));
        assert!(matches!(map["count"], PathValue::Number(Number::Integer(3))));
    }

    #[test]
    fn display_uses_collection_forms() {
        let value = PathValue::from(json!({"a": [1, "b"], "c": null}));
        assert_eq!(value.to_string(), "{a=[1, b], c=null}");
    }

    #[test]
    fn truthiness() {
        assert!(!PathValue::Null.truthy());
        assert!(!PathValue::from(0).truthy());
        assert!(!PathValue::from("").truthy());
        assert!(PathValue::from(vec![1]).truthy());
        assert!(!PathValue::List(Vec::new()).truthy());
    }
}
