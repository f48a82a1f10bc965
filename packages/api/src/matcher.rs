//! Value matchers for status lines, headers, cookies and body paths
//!
//! Values are compared with the same rules path expressions use: numbers
//! compare across widths and null orders before everything. Plain values
//! convert into [`Matcher::EqualTo`], so `body("id", 5)` and
//! `body("id", equal_to(5))` are the same expectation.

use std::cmp::Ordering;
use std::fmt;

use regex::Regex;
use restcheck_client::path::evaluator::{compare, loose_eq};
use restcheck_client::value::PathValue;

/// An expectation on a single value
#[derive(Debug, Clone)]
pub enum Matcher {
    EqualTo(PathValue),
    NotEqualTo(PathValue),
    GreaterThan(PathValue),
    GreaterThanOrEqualTo(PathValue),
    LessThan(PathValue),
    LessThanOrEqualTo(PathValue),
    NullValue,
    NotNullValue,
    ContainsString(String),
    StartsWith(String),
    EndsWith(String),
    /// Whole-value regular expression match
    MatchesPattern(String),
    HasItem(Box<Matcher>),
    HasItems(Vec<Matcher>),
    HasSize(usize),
    Empty,
    HasKey(String),
    HasEntry(String, Box<Matcher>),
    Not(Box<Matcher>),
    AllOf(Vec<Matcher>),
    AnyOf(Vec<Matcher>),
}

impl Matcher {
    /// Whether `actual` satisfies the expectation
    #[must_use]
    pub fn matches(&self, actual: &PathValue) -> bool {
        match self {
            Matcher::EqualTo(expected) => loose_eq(actual, expected),
            Matcher::NotEqualTo(expected) => !loose_eq(actual, expected),
            Matcher::GreaterThan(bound) => ordered(actual, bound, |o| o == Ordering::Greater),
            Matcher::GreaterThanOrEqualTo(bound) => ordered(actual, bound, |o| o != Ordering::Less),
            Matcher::LessThan(bound) => ordered(actual, bound, |o| o == Ordering::Less),
            Matcher::LessThanOrEqualTo(bound) => ordered(actual, bound, |o| o != Ordering::Greater),
            Matcher::NullValue => actual.is_null(),
            Matcher::NotNullValue => !actual.is_null(),
            Matcher::ContainsString(part) => text_of(actual).is_some_and(|text| text.contains(part.as_str())),
            Matcher::StartsWith(prefix) => text_of(actual).is_some_and(|text| text.starts_with(prefix.as_str())),
            Matcher::EndsWith(suffix) => text_of(actual).is_some_and(|text| text.ends_with(suffix.as_str())),
            Matcher::MatchesPattern(pattern) => text_of(actual).is_some_and(|text| {
                Regex::new(&format!("^(?:{pattern})$")).is_ok_and(|regex| regex.is_match(&text))
            }),
            Matcher::HasItem(item) => items_of(actual).is_some_and(|items| items.iter().any(|i| item.matches(i))),
            Matcher::HasItems(wanted) => items_of(actual)
                .is_some_and(|items| wanted.iter().all(|m| items.iter().any(|i| m.matches(i)))),
            Matcher::HasSize(size) => actual.size() == Some(*size),
            Matcher::Empty => actual.size() == Some(0),
            Matcher::HasKey(key) => actual.as_map().is_some_and(|map| map.contains_key(key)),
            Matcher::HasEntry(key, value) => actual
                .as_map()
                .and_then(|map| map.get(key))
                .is_some_and(|entry| value.matches(entry)),
            Matcher::Not(inner) => !inner.matches(actual),
            Matcher::AllOf(all) => all.iter().all(|m| m.matches(actual)),
            Matcher::AnyOf(any) => any.iter().any(|m| m.matches(actual)),
        }
    }
}

fn ordered(actual: &PathValue, bound: &PathValue, accept: impl Fn(Ordering) -> bool) -> bool {
    !actual.is_null() && compare(actual, bound).is_ok_and(accept)
}

fn text_of(value: &PathValue) -> Option<String> {
    match value {
        PathValue::String(_) | PathValue::Node(_) | PathValue::Nodes(_) => Some(value.text()),
        _ => None,
    }
}

fn items_of(value: &PathValue) -> Option<Vec<PathValue>> {
    match value {
        PathValue::List(items) => Some(items.clone()),
        PathValue::Nodes(nodes) => Some(nodes.iter().cloned().map(PathValue::Node).collect()),
        _ => None,
    }
}

/// Hamcrest-style rendering of an expected value: `"text"` or `<5>`
struct Described<'a>(&'a PathValue);

impl fmt::Display for Described<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            PathValue::String(s) => write!(f, "\"{s}\""),
            PathValue::Null => f.write_str("null"),
            other => write!(f, "<{other}>"),
        }
    }
}

fn joined(f: &mut fmt::Formatter<'_>, matchers: &[Matcher], separator: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, matcher) in matchers.iter().enumerate() {
        if i > 0 {
            f.write_str(separator)?;
        }
        write!(f, "{matcher}")?;
    }
    f.write_str(")")
}

impl fmt::Display for Matcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Matcher::EqualTo(v) => write!(f, "{}", Described(v)),
            Matcher::NotEqualTo(v) => write!(f, "not {}", Described(v)),
            Matcher::GreaterThan(v) => write!(f, "a value greater than {}", Described(v)),
            Matcher::GreaterThanOrEqualTo(v) => write!(f, "a value equal to or greater than {}", Described(v)),
            Matcher::LessThan(v) => write!(f, "a value less than {}", Described(v)),
            Matcher::LessThanOrEqualTo(v) => write!(f, "a value less than or equal to {}", Described(v)),
            Matcher::NullValue => f.write_str("null"),
            Matcher::NotNullValue => f.write_str("not null"),
            Matcher::ContainsString(s) => write!(f, "a string containing \"{s}\""),
            Matcher::StartsWith(s) => write!(f, "a string starting with \"{s}\""),
            Matcher::EndsWith(s) => write!(f, "a string ending with \"{s}\""),
            Matcher::MatchesPattern(p) => write!(f, "a string matching the pattern '{p}'"),
            Matcher::HasItem(m) => write!(f, "a collection containing {m}"),
            Matcher::HasItems(ms) => {
                let items: Vec<Matcher> = ms.iter().cloned().map(|m| Matcher::HasItem(Box::new(m))).collect();
                joined(f, &items, " and ")
            }
            Matcher::HasSize(n) => write!(f, "a collection with size <{n}>"),
            Matcher::Empty => f.write_str("an empty collection"),
            Matcher::HasKey(k) => write!(f, "map containing [\"{k}\"->ANYTHING]"),
            Matcher::HasEntry(k, m) => write!(f, "map containing [\"{k}\"->{m}]"),
            Matcher::Not(m) => write!(f, "not {m}"),
            Matcher::AllOf(ms) => joined(f, ms, " and "),
            Matcher::AnyOf(ms) => joined(f, ms, " or "),
        }
    }
}

macro_rules! equal_to_from {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Matcher {
                fn from(value: $ty) -> Self {
                    Matcher::EqualTo(PathValue::from(value))
                }
            }
        )*
    };
}

equal_to_from!(bool, &str, String, char, i32, i64, usize, f32, f64);

impl From<u16> for Matcher {
    fn from(value: u16) -> Self {
        Matcher::EqualTo(PathValue::from(i32::from(value)))
    }
}

impl From<PathValue> for Matcher {
    fn from(value: PathValue) -> Self {
        Matcher::EqualTo(value)
    }
}

impl From<serde_json::Value> for Matcher {
    fn from(value: serde_json::Value) -> Self {
        Matcher::EqualTo(PathValue::from(value))
    }
}

#[must_use]
pub fn equal_to(value: impl Into<PathValue>) -> Matcher {
    Matcher::EqualTo(value.into())
}

#[must_use]
pub fn not_equal_to(value: impl Into<PathValue>) -> Matcher {
    Matcher::NotEqualTo(value.into())
}

#[must_use]
pub fn greater_than(value: impl Into<PathValue>) -> Matcher {
    Matcher::GreaterThan(value.into())
}

#[must_use]
pub fn greater_than_or_equal_to(value: impl Into<PathValue>) -> Matcher {
    Matcher::GreaterThanOrEqualTo(value.into())
}

#[must_use]
pub fn less_than(value: impl Into<PathValue>) -> Matcher {
    Matcher::LessThan(value.into())
}

#[must_use]
pub fn less_than_or_equal_to(value: impl Into<PathValue>) -> Matcher {
    Matcher::LessThanOrEqualTo(value.into())
}

#[must_use]
pub fn null_value() -> Matcher {
    Matcher::NullValue
}

#[must_use]
pub fn not_null_value() -> Matcher {
    Matcher::NotNullValue
}

#[must_use]
pub fn contains_string(part: impl Into<String>) -> Matcher {
    Matcher::ContainsString(part.into())
}

#[must_use]
pub fn starts_with(prefix: impl Into<String>) -> Matcher {
    Matcher::StartsWith(prefix.into())
}

#[must_use]
pub fn ends_with(suffix: impl Into<String>) -> Matcher {
    Matcher::EndsWith(suffix.into())
}

#[must_use]
pub fn matches_pattern(pattern: impl Into<String>) -> Matcher {
    Matcher::MatchesPattern(pattern.into())
}

/// A collection with at least one member matching `item`
#[must_use]
pub fn has_item(item: impl Into<Matcher>) -> Matcher {
    Matcher::HasItem(Box::new(item.into()))
}

/// A collection where every one of `items` matches some member
#[must_use]
pub fn has_items<I, M>(items: I) -> Matcher
where
    I: IntoIterator<Item = M>,
    M: Into<Matcher>,
{
    Matcher::HasItems(items.into_iter().map(Into::into).collect())
}

#[must_use]
pub fn has_size(size: usize) -> Matcher {
    Matcher::HasSize(size)
}

#[must_use]
pub fn empty() -> Matcher {
    Matcher::Empty
}

#[must_use]
pub fn has_key(key: impl Into<String>) -> Matcher {
    Matcher::HasKey(key.into())
}

#[must_use]
pub fn has_entry(key: impl Into<String>, value: impl Into<Matcher>) -> Matcher {
    Matcher::HasEntry(key.into(), Box::new(value.into()))
}

#[must_use]
pub fn not(matcher: impl Into<Matcher>) -> Matcher {
    Matcher::Not(Box::new(matcher.into()))
}

#[must_use]
pub fn all_of(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    Matcher::AllOf(matchers.into_iter().collect())
}

#[must_use]
pub fn any_of(matchers: impl IntoIterator<Item = Matcher>) -> Matcher {
    Matcher::AnyOf(matchers.into_iter().collect())
}
