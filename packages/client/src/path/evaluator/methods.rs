//! Methods callable on path values without a closure

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::path::error::{PathError, PathResult};
use crate::value::convert::exact_decimal;
use crate::value::{Number, NumberReturnType, PathValue};
use crate::xml::Node;

use super::navigation::{self, members, rebuild};
use super::operators::{compare, loose_eq};

fn unsupported(name: &str, receiver: &PathValue) -> PathError {
    PathError::unsupported_method(name, receiver.type_name())
}

fn argument<'v>(args: &'v [PathValue], position: usize, method: &str) -> PathResult<&'v PathValue> {
    args.get(position).ok_or_else(|| {
        PathError::evaluation(format!("{method}() expects at least {} argument(s)", position + 1))
    })
}

/// Parse the receiver's text as a number, keeping numbers as they are
fn to_number(receiver: &PathValue, target: NumberReturnType, method: &str) -> PathResult<Number> {
    match receiver {
        PathValue::Number(n) => Ok(n.clone()),
        PathValue::String(_) | PathValue::Node(_) | PathValue::Nodes(_) => {
            let text = receiver.text();
            Number::parse(text.trim(), target)
                .ok_or_else(|| PathError::cannot_convert(format!("\"{text}\""), method))
        }
        other => Err(unsupported(method, other)),
    }
}

#[allow(clippy::cast_possible_truncation)]
fn convert_number(receiver: &PathValue, name: &str) -> PathResult<PathValue> {
    let number = to_number(receiver, NumberReturnType::Double, name)?;
    let converted = match name {
        "toInteger" => Number::Integer(number.to_i64_lossy() as i32),
        "toLong" => Number::Long(number.to_i64_lossy()),
        "toBigInteger" => Number::BigInteger(number.truncated()),
        "toFloat" => Number::Float(number.as_f64() as f32),
        "toDouble" => Number::Double(number.as_f64()),
        _ => {
            let exact = to_number(receiver, NumberReturnType::BigDecimal, name)?;
            match exact_decimal(&exact) {
                Some(decimal) => Number::BigDecimal(decimal),
                None => return Err(PathError::cannot_convert(exact, "BigDecimal")),
            }
        }
    };
    Ok(PathValue::Number(converted))
}

/// Smallest or largest member, null when there are none
pub(crate) fn extreme(items: Vec<PathValue>, wanted: Ordering) -> PathResult<PathValue> {
    let mut best: Option<PathValue> = None;
    for item in items {
        best = Some(match best {
            None => item,
            Some(current) if compare(&item, &current)? == wanted => item,
            Some(current) => current,
        });
    }
    Ok(best.unwrap_or_default())
}

/// Sum of members; strings and lists concatenate
pub(crate) fn sum(items: Vec<PathValue>) -> PathResult<PathValue> {
    let mut iter = items.into_iter();
    let Some(mut total) = iter.next() else {
        return Ok(PathValue::Null);
    };
    for item in iter {
        total = super::operators::binary(crate::path::ast::BinaryOp::Add, &total, &item)?;
    }
    Ok(total)
}

/// Stable sort by Groovy ordering
pub(crate) fn sort_values(mut items: Vec<(PathValue, PathValue)>) -> PathResult<Vec<PathValue>> {
    let mut failure = None;
    items.sort_by(|(a, _), (b, _)| {
        compare(a, b).unwrap_or_else(|e| {
            failure.get_or_insert(e);
            Ordering::Equal
        })
    });
    match failure {
        Some(e) => Err(e),
        None => Ok(items.into_iter().map(|(_, item)| item).collect()),
    }
}

fn flatten(items: Vec<PathValue>, out: &mut Vec<PathValue>) {
    for item in items {
        match item {
            PathValue::List(nested) => flatten(nested, out),
            other => out.push(other),
        }
    }
}

fn string_method(receiver: &PathValue, name: &str, args: &[PathValue]) -> PathResult<PathValue> {
    let text = receiver.text();
    let value = match name {
        "toUpperCase" => PathValue::String(text.to_uppercase()),
        "toLowerCase" => PathValue::String(text.to_lowercase()),
        "trim" => PathValue::String(text.trim().to_string()),
        "startsWith" => PathValue::Bool(text.starts_with(&argument(args, 0, name)?.text())),
        "endsWith" => PathValue::Bool(text.ends_with(&argument(args, 0, name)?.text())),
        "length" | "size" => PathValue::from(text.chars().count()),
        "replace" => PathValue::String(text.replace(
            &argument(args, 0, name)?.text(),
            &argument(args, 1, name)?.text(),
        )),
        "split" => {
            let separator = args.first().map(PathValue::text);
            let parts: Vec<PathValue> = match separator.as_deref() {
                None | Some(" ") => text.split_whitespace().map(PathValue::from).collect(),
                Some(sep) => text.split(sep).map(PathValue::from).collect(),
            };
            PathValue::List(parts)
        }
        _ => return Err(unsupported(name, receiver)),
    };
    Ok(value)
}

fn get(receiver: PathValue, args: &[PathValue], name: &str) -> PathResult<PathValue> {
    let key = argument(args, 0, name)?;
    let selector = match key {
        PathValue::Number(n) if n.is_integral() => navigation::IndexKey::Position(n.to_i64_lossy()),
        other => navigation::IndexKey::Key(other.text()),
    };
    navigation::index(receiver, &[selector])
}

/// Invoke `name(args)` on `receiver`
///
/// # Errors
/// Returns an `Evaluation` error for methods the receiver does not support.
pub(crate) fn call(receiver: PathValue, name: &str, args: &[PathValue]) -> PathResult<PathValue> {
    if receiver.is_null() {
        // Methods on a missing value stay missing rather than failing the whole path
        return Ok(match name {
            "list" => PathValue::List(Vec::new()),
            "size" => PathValue::from(0),
            "isEmpty" => PathValue::Bool(true),
            _ => PathValue::Null,
        });
    }

    let was_nodes = matches!(receiver, PathValue::Nodes(_));
    let value = match name {
        "size" | "length" if !matches!(receiver, PathValue::String(_)) => receiver
            .size()
            .map(PathValue::from)
            .ok_or_else(|| unsupported(name, &receiver))?,
        "isEmpty" => PathValue::Bool(receiver.size().is_some_and(|size| size == 0)),
        "list" | "toList" => PathValue::List(members(receiver)),
        "text" | "toString" | "value" => PathValue::String(receiver.text()),
        "name" => match receiver.as_node() {
            Some(node) => PathValue::String(node.name().to_string()),
            None => return Err(unsupported(name, &receiver)),
        },
        "children" => navigation::children(receiver),
        "depthFirst" => navigation::depth_first(receiver),
        "breadthFirst" => match receiver {
            PathValue::Node(node) => PathValue::Nodes(node.breadth_first()),
            PathValue::Nodes(nodes) => PathValue::Nodes(nodes.iter().flat_map(Node::breadth_first).collect()),
            other => return Err(unsupported(name, &other)),
        },
        "parent" => match receiver {
            PathValue::Node(node) => node.parent().map_or(PathValue::Null, PathValue::Node),
            PathValue::Nodes(nodes) => {
                let mut parents: Vec<Node> = Vec::new();
                for parent in nodes.iter().filter_map(Node::parent) {
                    if !parents.contains(&parent) {
                        parents.push(parent);
                    }
                }
                PathValue::Nodes(parents)
            }
            other => return Err(unsupported(name, &other)),
        },
        "attributes" => match receiver.as_node() {
            Some(node) => PathValue::Map(
                node.attributes()
                    .into_iter()
                    .map(|(k, v)| (k, PathValue::String(v)))
                    .collect(),
            ),
            None => return Err(unsupported(name, &receiver)),
        },
        "toInteger" | "toLong" | "toBigInteger" | "toFloat" | "toDouble" | "toBigDecimal" => {
            convert_number(&receiver, name)?
        }
        "toBoolean" => PathValue::Bool(matches!(receiver.text().trim().to_ascii_lowercase().as_str(), "true" | "y" | "1")),
        "abs" => PathValue::Number(to_number(&receiver, NumberReturnType::Double, name)?.abs()),
        "min" => extreme(members(receiver), Ordering::Less)?,
        "max" => extreme(members(receiver), Ordering::Greater)?,
        "sum" => sum(members(receiver))?,
        "first" | "head" => members(receiver).into_iter().next().unwrap_or_default(),
        "last" => members(receiver).pop().unwrap_or_default(),
        "reverse" => match receiver {
            PathValue::String(text) => PathValue::String(text.chars().rev().collect()),
            other => {
                let mut items = members(other);
                items.reverse();
                rebuild(was_nodes, items)
            }
        },
        "sort" => {
            let items = members(receiver).into_iter().map(|item| (item.clone(), item)).collect();
            rebuild(was_nodes, sort_values(items)?)
        }
        "unique" => {
            let mut unique: Vec<PathValue> = Vec::new();
            for item in members(receiver) {
                if !unique.iter().any(|seen| loose_eq(seen, &item)) {
                    unique.push(item);
                }
            }
            rebuild(was_nodes, unique)
        }
        "flatten" => {
            let mut out = Vec::new();
            flatten(members(receiver), &mut out);
            PathValue::List(out)
        }
        "join" => {
            let separator = args.first().map(PathValue::text).unwrap_or_default();
            let parts: Vec<String> = members(receiver).iter().map(PathValue::text).collect();
            PathValue::String(parts.join(&separator))
        }
        "contains" => {
            let needle = argument(args, 0, name)?;
            match &receiver {
                PathValue::String(text) => PathValue::Bool(text.contains(&needle.text())),
                PathValue::Map(map) => PathValue::Bool(map.values().any(|v| loose_eq(v, needle))),
                _ => PathValue::Bool(members(receiver).iter().any(|item| loose_eq(item, needle))),
            }
        }
        "containsKey" => match &receiver {
            PathValue::Map(map) => PathValue::Bool(map.contains_key(&argument(args, 0, name)?.text())),
            other => return Err(unsupported(name, other)),
        },
        "containsValue" => match &receiver {
            PathValue::Map(map) => {
                let needle = argument(args, 0, name)?;
                PathValue::Bool(map.values().any(|v| loose_eq(v, needle)))
            }
            other => return Err(unsupported(name, other)),
        },
        "keySet" | "keys" => match receiver {
            PathValue::Map(map) => PathValue::List(map.into_keys().map(PathValue::String).collect()),
            other => return Err(unsupported(name, &other)),
        },
        "values" => match receiver {
            PathValue::Map(map) => PathValue::List(map.into_values().collect()),
            other => return Err(unsupported(name, &other)),
        },
        "entrySet" => match receiver {
            PathValue::Map(map) => PathValue::List(map.into_iter().map(|(k, v)| navigation::entry(k, v)).collect()),
            other => return Err(unsupported(name, &other)),
        },
        "get" | "getAt" => get(receiver, args, name)?,
        "take" | "drop" => {
            let count = match argument(args, 0, name)? {
                PathValue::Number(n) => usize::try_from(n.to_i64_lossy().max(0)).unwrap_or_default(),
                other => return Err(unsupported(name, other)),
            };
            let items = members(receiver);
            let selected: Vec<PathValue> = if name == "take" {
                items.into_iter().take(count).collect()
            } else {
                items.into_iter().skip(count).collect()
            };
            rebuild(was_nodes, selected)
        }
        "toMap" => {
            let mut map = IndexMap::new();
            for item in members(receiver) {
                if let PathValue::Map(mut entry) = item {
                    let key = entry.swap_remove("key").unwrap_or_default().text();
                    map.insert(key, entry.swap_remove("value").unwrap_or_default());
                }
            }
            PathValue::Map(map)
        }
        _ => string_method(&receiver, name, args)?,
    };
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aggregates() {
        let list = PathValue::from(json!([3, 1, 2]));
        assert_eq!(call(list.clone(), "min", &[]).expect("min"), PathValue::from(1));
        assert_eq!(call(list.clone(), "max", &[]).expect("max"), PathValue::from(3));
        assert_eq!(call(list.clone(), "sum", &[]).expect("sum"), PathValue::from(6));
        assert_eq!(call(list, "size", &[]).expect("size"), PathValue::from(3));
    }

    #[test]
    fn null_receivers_stay_null() {
        assert_eq!(call(PathValue::Null, "toUpperCase", &[]).expect("null"), PathValue::Null);
        assert_eq!(call(PathValue::Null, "size", &[]).expect("null"), PathValue::from(0));
    }

    #[test]
    fn conversions_parse_text() {
        let value = call(PathValue::from("42"), "toInteger", &[]).expect("convert");
        assert_eq!(value, PathValue::Number(Number::Integer(42)));
        assert!(call(PathValue::from("x"), "toInteger", &[]).is_err());
    }

    #[test]
    fn unknown_method_is_an_error() {
        let err = call(PathValue::from(1), "frobnicate", &[]).expect_err("unsupported");
        assert!(err.to_string().contains("frobnicate"));
    }

    #[test]
    fn join_and_sort() {
        let list = PathValue::from(json!(["b", "c", "a"]));
        let sorted = call(list, "sort", &[]).expect("sort");
        assert_eq!(call(sorted, "join", &[PathValue::from(",")]).expect("join"), PathValue::from("a,b,c"));
    }
}
