//! Groovy-style operators: loose equality, ordering, arithmetic and regex

use std::cmp::Ordering;
use std::sync::RwLock;

use hashbrown::HashMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::path::{
    ast::{BinaryOp, UnaryOp},
    error::{PathError, PathResult},
};
use crate::value::{Number, NumberReturnType, PathValue};

/// Compiled patterns kept for reuse; later patterns compile on every use
const REGEX_CACHE_CAPACITY: usize = 32;

static REGEX_CACHE: Lazy<RwLock<HashMap<String, Regex>>> = Lazy::new(|| RwLock::new(HashMap::new()));

fn regex(pattern: &str) -> PathResult<Regex> {
    if let Ok(cache) = REGEX_CACHE.read() {
        if let Some(compiled) = cache.get(pattern) {
            return Ok(compiled.clone());
        }
    }
    let compiled = Regex::new(pattern)
        .map_err(|e| PathError::evaluation(format!("Invalid regular expression '{pattern}': {e}")))?;
    if let Ok(mut cache) = REGEX_CACHE.write() {
        if cache.len() < REGEX_CACHE_CAPACITY {
            cache.insert(pattern.to_string(), compiled.clone());
        }
    }
    Ok(compiled)
}

/// Collapse a one-node set to its node and XML values to their text
fn scalar_view(value: &PathValue) -> PathValue {
    match value {
        PathValue::Node(node) => PathValue::String(node.value()),
        PathValue::Nodes(nodes) if nodes.len() == 1 => PathValue::String(nodes[0].value()),
        other => other.clone(),
    }
}

fn is_xml(value: &PathValue) -> bool {
    matches!(value, PathValue::Node(_) | PathValue::Nodes(_))
}

/// XML text read as a number when the other side is numeric
fn coerce_text(text: &PathValue, other: &PathValue) -> Option<(Number, Number)> {
    match (text, other) {
        (PathValue::String(s), PathValue::Number(n)) => {
            Number::parse(s.trim(), NumberReturnType::Double).map(|parsed| (parsed, n.clone()))
        }
        _ => None,
    }
}

/// Groovy `==`: XML text coerces to numbers, numbers compare across widths
#[must_use]
pub fn loose_eq(left: &PathValue, right: &PathValue) -> bool {
    match (left, right) {
        (PathValue::Node(a), PathValue::Node(b)) => a == b || a.value() == b.value(),
        (PathValue::Nodes(a), PathValue::Nodes(b)) if a.len() != 1 || b.len() != 1 => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x == y || x.value() == y.value())
        }
        (PathValue::Nodes(nodes), PathValue::List(items))
        | (PathValue::List(items), PathValue::Nodes(nodes))
            if nodes.len() != 1 =>
        {
            nodes.len() == items.len()
                && nodes
                    .iter()
                    .zip(items)
                    .all(|(node, item)| loose_eq(&PathValue::Node(node.clone()), item))
        }
        _ if is_xml(left) || is_xml(right) => {
            let (a, b) = (scalar_view(left), scalar_view(right));
            if is_xml(left) {
                if let Some((x, y)) = coerce_text(&a, &b) {
                    return x.compare(&y) == Some(Ordering::Equal);
                }
            }
            if is_xml(right) {
                if let Some((y, x)) = coerce_text(&b, &a) {
                    return x.compare(&y) == Some(Ordering::Equal);
                }
            }
            !is_xml(&a) && !is_xml(&b) && loose_eq(&a, &b)
        }
        (PathValue::Number(a), PathValue::Number(b)) => a.compare(b) == Some(Ordering::Equal),
        (PathValue::List(a), PathValue::List(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| loose_eq(x, y))
        }
        (PathValue::Map(a), PathValue::Map(b)) => {
            a.len() == b.len()
                && a.iter().all(|(k, v)| b.get(k).is_some_and(|other| loose_eq(v, other)))
        }
        (a, b) => a == b,
    }
}

/// Groovy `<=>`; null orders before everything
///
/// # Errors
/// Returns an `Evaluation` error when the values have no common ordering.
pub fn compare(left: &PathValue, right: &PathValue) -> PathResult<Ordering> {
    let (a, b) = (scalar_view(left), scalar_view(right));
    let ordering = match (&a, &b) {
        (PathValue::Null, PathValue::Null) => Some(Ordering::Equal),
        (PathValue::Null, _) => Some(Ordering::Less),
        (_, PathValue::Null) => Some(Ordering::Greater),
        (PathValue::Number(x), PathValue::Number(y)) => x.compare(y),
        (PathValue::String(x), PathValue::String(y)) => Some(x.cmp(y)),
        (PathValue::Bool(x), PathValue::Bool(y)) => Some(x.cmp(y)),
        (PathValue::String(_), PathValue::Number(_)) if is_xml(left) => {
            coerce_text(&a, &b).and_then(|(x, y)| x.compare(&y))
        }
        (PathValue::Number(_), PathValue::String(_)) if is_xml(right) => {
            coerce_text(&b, &a).and_then(|(y, x)| x.compare(&y))
        }
        _ => None,
    };
    ordering.ok_or_else(|| {
        PathError::evaluation(format!(
            "Cannot compare {} with {}",
            left.type_name(),
            right.type_name()
        ))
    })
}

fn contains(container: &PathValue, needle: &PathValue) -> bool {
    match container {
        PathValue::List(items) => items.iter().any(|item| loose_eq(item, needle)),
        PathValue::Nodes(nodes) => nodes.iter().any(|node| loose_eq(&PathValue::Node(node.clone()), needle)),
        PathValue::Map(map) => map.contains_key(&needle.text()),
        PathValue::String(text) => text.contains(&needle.text()),
        PathValue::Null => false,
        other => loose_eq(other, needle),
    }
}

fn numbers(left: &PathValue, right: &PathValue) -> Option<(Number, Number)> {
    let read = |value: &PathValue| match scalar_view(value) {
        PathValue::Number(n) => Some(n),
        PathValue::String(s) if is_xml(value) => Number::parse(s.trim(), NumberReturnType::Double),
        _ => None,
    };
    Some((read(left)?, read(right)?))
}

fn arithmetic(operator: BinaryOp, left: &PathValue, right: &PathValue) -> PathResult<PathValue> {
    // String and list concatenation take precedence over numeric addition
    if operator == BinaryOp::Add {
        match (left, right) {
            (PathValue::String(a), b) => return Ok(PathValue::String(format!("{a}{}", b.text()))),
            (PathValue::List(a), PathValue::List(b)) => {
                return Ok(PathValue::List(a.iter().chain(b).cloned().collect()));
            }
            (PathValue::List(a), b) => {
                let mut items = a.clone();
                items.push(b.clone());
                return Ok(PathValue::List(items));
            }
            _ => {}
        }
    }
    let unsupported = || {
        PathError::evaluation(format!(
            "Operator {operator:?} is not supported for {} and {}",
            left.type_name(),
            right.type_name()
        ))
    };
    let (a, b) = numbers(left, right).ok_or_else(unsupported)?;
    let result = match operator {
        BinaryOp::Add => a.checked_add(&b),
        BinaryOp::Subtract => a.checked_sub(&b),
        BinaryOp::Multiply => a.checked_mul(&b),
        BinaryOp::Divide => a.checked_div(&b),
        BinaryOp::Remainder => a.checked_rem(&b),
        _ => None,
    };
    result
        .map(PathValue::Number)
        .ok_or_else(|| PathError::evaluation(format!("Arithmetic failed: {a} {operator:?} {b}")))
}

pub(crate) fn binary(operator: BinaryOp, left: &PathValue, right: &PathValue) -> PathResult<PathValue> {
    let result = match operator {
        BinaryOp::Equal => loose_eq(left, right),
        BinaryOp::NotEqual => !loose_eq(left, right),
        BinaryOp::Less => compare(left, right)? == Ordering::Less,
        BinaryOp::LessEq => compare(left, right)? != Ordering::Greater,
        BinaryOp::Greater => compare(left, right)? == Ordering::Greater,
        BinaryOp::GreaterEq => compare(left, right)? != Ordering::Less,
        BinaryOp::RegexFind => !left.is_null() && regex(&right.text())?.is_match(&left.text()),
        BinaryOp::RegexMatch => {
            !left.is_null() && regex(&format!("^(?:{})$", right.text()))?.is_match(&left.text())
        }
        BinaryOp::In => contains(right, left),
        BinaryOp::Add
        | BinaryOp::Subtract
        | BinaryOp::Multiply
        | BinaryOp::Divide
        | BinaryOp::Remainder => return arithmetic(operator, left, right),
    };
    Ok(PathValue::Bool(result))
}

pub(crate) fn unary(operator: UnaryOp, operand: &PathValue) -> PathResult<PathValue> {
    match operator {
        UnaryOp::Not => Ok(PathValue::Bool(!operand.truthy())),
        UnaryOp::Negate => match scalar_view(operand) {
            PathValue::Number(n) => Ok(PathValue::Number(n.negate())),
            _ => Err(PathError::evaluation(format!(
                "Cannot negate {}",
                operand.type_name()
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_compare_across_widths() {
        let int = PathValue::from(10);
        let long = PathValue::Number(Number::Long(10));
        let float = PathValue::from(10.0_f32);
        assert!(loose_eq(&int, &long));
        assert!(loose_eq(&int, &float));
        assert_eq!(compare(&PathValue::from(2), &PathValue::from(1.5)).expect("numbers"), Ordering::Greater);
    }

    #[test]
    fn strings_and_numbers_are_not_equal() {
        assert!(!loose_eq(&PathValue::from("1"), &PathValue::from(1)));
        assert!(compare(&PathValue::from("a"), &PathValue::from(1)).is_err());
    }

    #[test]
    fn regex_operators() {
        let text = PathValue::from("Nigel Rees");
        let find = binary(BinaryOp::RegexFind, &text, &PathValue::from("Rees")).expect("find");
        let full = binary(BinaryOp::RegexMatch, &text, &PathValue::from("Rees")).expect("match");
        assert_eq!(find, PathValue::Bool(true));
        assert_eq!(full, PathValue::Bool(false));
    }

    #[test]
    fn regex_cache_is_bounded() {
        for i in 0..(REGEX_CACHE_CAPACITY * 2) {
            let pattern = PathValue::from(format!("^item-{i}$"));
            let found = binary(BinaryOp::RegexFind, &PathValue::from(format!("item-{i}")), &pattern).expect("find");
            assert_eq!(found, PathValue::Bool(true));
        }
        let cached = REGEX_CACHE.read().map(|cache| cache.len()).expect("cache lock");
        assert!(cached <= REGEX_CACHE_CAPACITY);
    }

    #[test]
    fn inexact_division_widens() {
        let result = binary(BinaryOp::Divide, &PathValue::from(7), &PathValue::from(2)).expect("divide");
        assert_eq!(result, PathValue::Number(Number::Double(3.5)));
        assert!(binary(BinaryOp::Divide, &PathValue::from(1), &PathValue::from(0)).is_err());
    }

    #[test]
    fn string_concatenation() {
        let result = binary(BinaryOp::Add, &PathValue::from("a"), &PathValue::from(1)).expect("concat");
        assert_eq!(result, PathValue::from("a1"));
    }
}
