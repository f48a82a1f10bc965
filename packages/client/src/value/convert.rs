//! Typed conversion of selected values
//!
//! Numeric targets follow cast semantics: fractions are truncated and wide
//! integers keep their low bits, so `Long.MAX` read as `i8` is `-1`.
//! Strings and XML text are parsed when a number or boolean is requested.

use indexmap::IndexMap;
use num_traits::ToPrimitive;
use uuid::Uuid;

use super::number::parse_decimal;
use super::{BigDecimal, BigInt, Number, NumberReturnType, PathValue};
use crate::path::error::{PathError, PathResult};
use crate::xml::{Node, NodeChildren};

/// Conversion from a selected [`PathValue`] into a Rust type
pub trait FromPathValue: Sized {
    /// # Errors
    /// Returns a conversion error when the value has no sensible representation as `Self`.
    fn from_path_value(value: PathValue) -> PathResult<Self>;
}

/// Number carried by a value, parsing text under `policy` when needed
fn parsed(value: &PathValue, target: &str, policy: NumberReturnType) -> PathResult<Number> {
    match value {
        PathValue::Number(n) => Ok(n.clone()),
        PathValue::String(_) | PathValue::Node(_) | PathValue::Nodes(_) => {
            let text = value.text();
            Number::parse(text.trim(), policy)
                .ok_or_else(|| PathError::cannot_convert(format!("\"{text}\""), target))
        }
        other => Err(PathError::cannot_convert(other, target)),
    }
}

fn numeric(value: &PathValue, target: &str) -> PathResult<Number> {
    parsed(value, target, NumberReturnType::Double)
}

/// Like [`numeric`], but text keeps every digit
fn exact_numeric(value: &PathValue, target: &str) -> PathResult<Number> {
    parsed(value, target, NumberReturnType::BigDecimal)
}

macro_rules! integral_conversion {
    ($($ty:ty => $name:literal),* $(,)?) => {
        $(
            impl FromPathValue for $ty {
                #[allow(clippy::cast_possible_truncation)]
                fn from_path_value(value: PathValue) -> PathResult<Self> {
                    numeric(&value, $name).map(|n| n.to_i64_lossy() as $ty)
                }
            }
        )*
    };
}

integral_conversion!(i8 => "byte", i16 => "short", i32 => "int", i64 => "long", u16 => "u16", u32 => "u32", u64 => "u64", usize => "usize");

/// Exact form of a number; floats go through their shortest text
pub(crate) fn exact_decimal(number: &Number) -> Option<BigDecimal> {
    number.as_big_decimal().or_else(|| parse_decimal(&number.to_string()))
}

impl FromPathValue for i128 {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        let truncated = exact_numeric(&value, "i128")?.truncated();
        truncated
            .to_i128()
            .ok_or_else(|| PathError::cannot_convert(truncated, "i128"))
    }
}

impl FromPathValue for BigInt {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        exact_numeric(&value, "BigInteger").map(|n| n.truncated())
    }
}

impl FromPathValue for BigDecimal {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        let number = exact_numeric(&value, "BigDecimal")?;
        exact_decimal(&number).ok_or_else(|| PathError::cannot_convert(number, "BigDecimal"))
    }
}

impl FromPathValue for f32 {
    #[allow(clippy::cast_possible_truncation)]
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        numeric(&value, "float").map(|n| match n {
            Number::Float(v) => v,
            other => other.as_f64() as f32,
        })
    }
}

impl FromPathValue for f64 {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        numeric(&value, "double").map(|n| n.as_f64())
    }
}

impl FromPathValue for Number {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        numeric(&value, "Number")
    }
}

impl FromPathValue for bool {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        match value {
            PathValue::Bool(b) => Ok(b),
            PathValue::String(_) | PathValue::Node(_) | PathValue::Nodes(_) => {
                let text = value.text();
                match text.trim().to_ascii_lowercase().as_str() {
                    "true" => Ok(true),
                    "false" => Ok(false),
                    _ => Err(PathError::cannot_convert(format!("\"{text}\""), "boolean")),
                }
            }
            other => Err(PathError::cannot_convert(other, "boolean")),
        }
    }
}

impl FromPathValue for char {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        if value.is_null() {
            return Err(PathError::cannot_convert(value, "char"));
        }
        let text = value.text();
        let mut chars = text.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => Err(PathError::cannot_convert(format!("\"{text}\""), "char")),
        }
    }
}

impl FromPathValue for String {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        if value.is_null() {
            return Err(PathError::cannot_convert(value, "String"));
        }
        Ok(value.text())
    }
}

impl FromPathValue for Uuid {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        let text = String::from_path_value(value)?;
        Uuid::parse_str(text.trim()).map_err(|_| PathError::cannot_convert(format!("\"{text}\""), "UUID"))
    }
}

impl FromPathValue for PathValue {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        Ok(value)
    }
}

impl FromPathValue for serde_json::Value {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        Ok(value.to_json())
    }
}

impl FromPathValue for Node {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        match value {
            PathValue::Node(node) => Ok(node),
            PathValue::Nodes(mut nodes) if nodes.len() == 1 => Ok(nodes.remove(0)),
            other => Err(PathError::cannot_convert(other.type_name(), "Node")),
        }
    }
}

impl FromPathValue for NodeChildren {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        match value {
            PathValue::Null => Ok(NodeChildren::default()),
            PathValue::Node(node) => Ok(NodeChildren::new(vec![node])),
            PathValue::Nodes(nodes) => Ok(NodeChildren::new(nodes)),
            PathValue::List(items) => items
                .into_iter()
                .map(Node::from_path_value)
                .collect::<PathResult<Vec<_>>>()
                .map(NodeChildren::new),
            other => Err(PathError::cannot_convert(other.type_name(), "NodeChildren")),
        }
    }
}

impl<T: FromPathValue> FromPathValue for Option<T> {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        match value {
            PathValue::Null => Ok(None),
            other => T::from_path_value(other).map(Some),
        }
    }
}

impl<T: FromPathValue> FromPathValue for Vec<T> {
    fn from_path_value(value: PathValue) -> PathResult<Self> {
        as_list(value).into_iter().map(T::from_path_value).collect()
    }
}

/// Collapse a value into list members; scalars become a one-member list and null an empty one
#[must_use]
pub fn as_list(value: PathValue) -> Vec<PathValue> {
    match value {
        PathValue::Null => Vec::new(),
        PathValue::List(items) => items,
        PathValue::Nodes(nodes) => nodes.into_iter().map(PathValue::Node).collect(),
        other => vec![other],
    }
}

/// Map entries with converted keys and values
///
/// # Errors
/// Fails when the value is not a map or an XML node, or when a key or value does not convert.
pub fn as_map<K, V>(value: PathValue) -> PathResult<IndexMap<K, V>>
where
    K: FromPathValue + std::hash::Hash + Eq,
    V: FromPathValue,
{
    let entries: Vec<(String, PathValue)> = match value {
        PathValue::Map(map) => map.into_iter().collect(),
        PathValue::Node(node) => node
            .attributes()
            .into_iter()
            .map(|(k, v)| (k, PathValue::String(v)))
            .collect(),
        PathValue::Null => Vec::new(),
        other => return Err(PathError::cannot_convert(other.type_name(), "Map")),
    };
    entries
        .into_iter()
        .map(|(key, value)| Ok((K::from_path_value(PathValue::String(key))?, V::from_path_value(value)?)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_targets_keep_digits() {
        let text = "98765432109876543210987654321098765432.125";
        let decimal = BigDecimal::from_path_value(PathValue::from(text)).expect("numeric text");
        assert_eq!(crate::value::number::plain_decimal(&decimal), text);

        let integer = BigInt::from_path_value(PathValue::from(text)).expect("numeric text");
        assert_eq!(integer.to_string(), "98765432109876543210987654321098765432");
        assert!(i128::from_path_value(PathValue::from("1e60")).is_err());
    }

    #[test]
    fn narrowing_follows_cast_rules() {
        let big = PathValue::Number(Number::Long(i64::MAX));
        assert_eq!(i8::from_path_value(big.clone()).expect("numeric"), -1);
        assert_eq!(i16::from_path_value(big.clone()).expect("numeric"), -1);
        assert_eq!(i32::from_path_value(big).expect("numeric"), -1);
        let price = PathValue::Number(Number::Float(12.0));
        assert_eq!(i32::from_path_value(price).expect("numeric"), 12);
    }

    #[test]
    fn text_is_parsed_for_numbers_and_booleans() {
        assert_eq!(i32::from_path_value("3548".into()).expect("numeric text"), 3548);
        assert!((f64::from_path_value("15.5".into()).expect("numeric text") - 15.5).abs() < f64::EPSILON);
        assert!(bool::from_path_value("TRUE".into()).expect("boolean text"));
        assert!(i32::from_path_value("abc".into()).is_err());
        assert!(i32::from_path_value(PathValue::Null).is_err());
    }

    #[test]
    fn char_needs_exactly_one_character() {
        assert_eq!(char::from_path_value("x".into()).expect("single char"), 'x');
        assert!(char::from_path_value("xy".into()).is_err());
    }

    #[test]
    fn lists_wrap_scalars() {
        let values: Vec<String> = Vec::from_path_value("10".into()).expect("scalar wraps");
        assert_eq!(values, vec!["10".to_string()]);
        let empty: Vec<String> = Vec::from_path_value(PathValue::Null).expect("null is empty");
        assert!(empty.is_empty());
    }
}
