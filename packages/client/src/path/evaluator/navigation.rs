//! Property, attribute, index and wildcard steps

use indexmap::IndexMap;

use crate::path::{
    ast::{Expression, IndexSelector},
    error::{PathError, PathResult},
};
use crate::value::PathValue;
use crate::xml::Node;

/// Members a value iterates over
///
/// Lists yield their items, node sets their nodes, maps `{key, value}`
/// entries and a single node or scalar itself. Null has no members.
pub(crate) fn members(value: PathValue) -> Vec<PathValue> {
    match value {
        PathValue::Null => Vec::new(),
        PathValue::List(items) => items,
        PathValue::Nodes(nodes) => nodes.into_iter().map(PathValue::Node).collect(),
        PathValue::Map(map) => map.into_iter().map(|(k, v)| entry(k, v)).collect(),
        other => vec![other],
    }
}

/// Map entry as seen by closures: `it.key` and `it.value`
pub(crate) fn entry(key: String, value: PathValue) -> PathValue {
    let mut map = IndexMap::with_capacity(2);
    map.insert("key".to_string(), PathValue::String(key));
    map.insert("value".to_string(), value);
    PathValue::Map(map)
}

/// Rebuild a collection of the receiver's kind from selected members
pub(crate) fn rebuild(receiver_was_nodes: bool, items: Vec<PathValue>) -> PathValue {
    if receiver_was_nodes && items.iter().all(|item| matches!(item, PathValue::Node(_))) {
        PathValue::Nodes(
            items
                .into_iter()
                .filter_map(|item| match item {
                    PathValue::Node(node) => Some(node),
                    _ => None,
                })
                .collect(),
        )
    } else {
        PathValue::List(items)
    }
}

fn child_nodes<'n>(nodes: impl IntoIterator<Item = &'n Node>, name: &str) -> Vec<Node> {
    nodes
        .into_iter()
        .flat_map(|node| node.child_elements().filter(|child| child.matches_name(name)).collect::<Vec<_>>())
        .collect()
}

/// `receiver.name`
///
/// Lists spread the lookup over their non-null members. Reading a property of
/// a scalar is a `MissingProperty` error.
pub(crate) fn property(current: PathValue, name: &str) -> PathResult<PathValue> {
    match current {
        PathValue::Null => Ok(PathValue::Null),
        PathValue::Map(mut map) => Ok(map.swap_remove(name).unwrap_or_default()),
        PathValue::Node(node) => Ok(PathValue::Nodes(child_nodes([&node], name))),
        PathValue::Nodes(nodes) => Ok(PathValue::Nodes(child_nodes(&nodes, name))),
        PathValue::List(items) => {
            let mut out = Vec::with_capacity(items.len());
            for item in items {
                if item.is_null() {
                    continue;
                }
                out.push(property(item, name)?);
            }
            Ok(PathValue::List(out))
        }
        other => Err(PathError::missing_property(name, other.type_name())),
    }
}

/// `receiver.@name`
pub(crate) fn attribute(current: PathValue, name: &str) -> PathResult<PathValue> {
    match current {
        PathValue::Null => Ok(PathValue::Null),
        PathValue::Node(node) => Ok(node.get_attribute(name).map_or(PathValue::Null, PathValue::String)),
        PathValue::Nodes(nodes) if nodes.len() == 1 => {
            Ok(nodes[0].get_attribute(name).map_or(PathValue::Null, PathValue::String))
        }
        PathValue::Nodes(nodes) => Ok(PathValue::List(
            nodes
                .iter()
                .filter_map(|node| node.get_attribute(name))
                .map(PathValue::String)
                .collect(),
        )),
        PathValue::Map(mut map) => Ok(map.swap_remove(&format!("@{name}")).unwrap_or_default()),
        PathValue::List(items) => items
            .into_iter()
            .filter(|item| !item.is_null())
            .map(|item| attribute(item, name))
            .collect::<PathResult<Vec<_>>>()
            .map(PathValue::List),
        other => Err(PathError::missing_property(&format!("@{name}"), other.type_name())),
    }
}

/// An evaluated bracket selector
#[derive(Debug, Clone)]
pub(crate) enum IndexKey {
    Position(i64),
    Key(String),
    Range { from: i64, to: i64, inclusive: bool },
}

impl IndexKey {
    pub(crate) fn evaluate(
        selector: &IndexSelector,
        mut eval: impl FnMut(&Expression) -> PathResult<PathValue>,
    ) -> PathResult<Self> {
        match selector {
            IndexSelector::Single(expression) => match eval(expression)? {
                PathValue::Number(n) if n.is_integral() => Ok(IndexKey::Position(n.to_i64_lossy())),
                PathValue::String(key) => Ok(IndexKey::Key(key)),
                other => Err(PathError::evaluation(format!(
                    "Cannot use {} as an index",
                    other.type_name()
                ))),
            },
            IndexSelector::Range {
                from,
                to,
                inclusive,
            } => {
                let from = range_bound(eval(from)?)?;
                let to = range_bound(eval(to)?)?;
                Ok(IndexKey::Range {
                    from,
                    to,
                    inclusive: *inclusive,
                })
            }
        }
    }
}

fn range_bound(value: PathValue) -> PathResult<i64> {
    match value {
        PathValue::Number(n) if n.is_integral() => Ok(n.to_i64_lossy()),
        other => Err(PathError::evaluation(format!(
            "Range bounds must be integers, got {}",
            other.type_name()
        ))),
    }
}

/// Resolve a possibly negative position against `len`
fn resolve(position: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let resolved = if position < 0 { len + position } else { position };
    (0..len).contains(&resolved).then(|| usize::try_from(resolved).ok()).flatten()
}

/// Positions a range selects, clipped to the collection
fn range_positions(from: i64, to: i64, inclusive: bool, len: usize) -> Vec<usize> {
    let Ok(signed_len) = i64::try_from(len) else {
        return Vec::new();
    };
    let Some(last) = signed_len.checked_sub(1).filter(|last| *last >= 0) else {
        return Vec::new();
    };
    let normalize = |p: i64| if p < 0 { signed_len.saturating_add(p) } else { p };
    let (from, to) = (normalize(from), normalize(to));
    let clamp = |p: i64| usize::try_from(p.clamp(0, last)).unwrap_or_default();

    if from <= to {
        let end = if inclusive { Some(to) } else { to.checked_sub(1) };
        match end {
            Some(end) if end >= from && end >= 0 && from <= last => (clamp(from)..=clamp(end)).collect(),
            _ => Vec::new(),
        }
    } else {
        let end = if inclusive { Some(to) } else { to.checked_add(1) };
        match end {
            Some(end) if from >= 0 && end <= last => (clamp(end)..=clamp(from)).rev().collect(),
            _ => Vec::new(),
        }
    }
}

/// `receiver[selectors]`
///
/// One positional or key selector returns the selected member itself;
/// ranges and unions return a collection of the receiver's kind.
pub(crate) fn index(current: PathValue, keys: &[IndexKey]) -> PathResult<PathValue> {
    if current.is_null() {
        return Ok(PathValue::Null);
    }
    if let [IndexKey::Key(key)] = keys {
        return keyed(current, key);
    }

    let single = matches!(keys, [IndexKey::Position(_)]);
    let (items, was_nodes, was_string) = match current {
        PathValue::List(items) => (items, false, false),
        PathValue::Nodes(nodes) => (nodes.into_iter().map(PathValue::Node).collect(), true, false),
        PathValue::Node(node) => (vec![PathValue::Node(node)], true, false),
        PathValue::String(text) => (text.chars().map(PathValue::from).collect(), false, true),
        PathValue::Map(map) => {
            // Positional access on a map reads the entry whose key is the number
            return match keys {
                [IndexKey::Position(p)] => keyed(PathValue::Map(map), &p.to_string()),
                _ => Err(PathError::evaluation("Ranges cannot be applied to a map")),
            };
        }
        other => {
            return Err(PathError::evaluation(format!(
                "Cannot index into {}",
                other.type_name()
            )))
        }
    };

    let mut positions = Vec::new();
    for key in keys {
        match key {
            IndexKey::Position(p) => match resolve(*p, items.len()) {
                Some(position) => positions.push(position),
                None if single => return Ok(PathValue::Null),
                None => {}
            },
            IndexKey::Range { from, to, inclusive } => {
                positions.extend(range_positions(*from, *to, *inclusive, items.len()));
            }
            IndexKey::Key(key) => {
                return Err(PathError::evaluation(format!(
                    "Cannot mix key '{key}' with positional selectors"
                )))
            }
        }
    }

    if single {
        return Ok(positions
            .first()
            .and_then(|p| items.get(*p).cloned())
            .unwrap_or_default());
    }
    let selected: Vec<PathValue> = positions.into_iter().filter_map(|p| items.get(p).cloned()).collect();
    if was_string {
        return Ok(PathValue::String(selected.iter().map(PathValue::text).collect()));
    }
    Ok(rebuild(was_nodes, selected))
}

fn keyed(current: PathValue, key: &str) -> PathResult<PathValue> {
    match current {
        PathValue::Map(mut map) => Ok(map.swap_remove(key).unwrap_or_default()),
        other => property(other, key),
    }
}

/// `receiver.**`: the receiver and everything below it in pre-order
pub(crate) fn depth_first(current: PathValue) -> PathValue {
    fn collect(value: PathValue, out: &mut Vec<PathValue>) {
        match value {
            PathValue::Map(map) => {
                out.push(PathValue::Map(map.clone()));
                for (_, value) in map {
                    collect(value, out);
                }
            }
            PathValue::List(items) => {
                for item in items {
                    collect(item, out);
                }
            }
            other => out.push(other),
        }
    }

    match current {
        PathValue::Null => PathValue::Null,
        PathValue::Node(node) => PathValue::Nodes(node.depth_first()),
        PathValue::Nodes(nodes) => PathValue::Nodes(nodes.iter().flat_map(Node::depth_first).collect()),
        other => {
            let mut out = Vec::new();
            collect(other, &mut out);
            PathValue::List(out)
        }
    }
}

/// `receiver.*`: direct children
pub(crate) fn children(current: PathValue) -> PathValue {
    match current {
        PathValue::Node(node) => PathValue::Nodes(node.child_elements().collect()),
        PathValue::Nodes(nodes) => {
            PathValue::Nodes(nodes.iter().flat_map(|node| node.child_elements().collect::<Vec<_>>()).collect())
        }
        PathValue::Map(map) => PathValue::List(map.into_values().collect()),
        PathValue::List(items) => PathValue::List(items),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn value(json: serde_json::Value) -> PathValue {
        PathValue::from(json)
    }

    #[test]
    fn property_spreads_over_lists_and_skips_nulls() {
        let list = value(json!([{"a": 1}, null, {"b": 2}]));
        let result = property(list, "a").expect("list spread");
        assert_eq!(result, value(json!([1, null])));
    }

    #[test]
    fn property_of_scalar_is_missing() {
        let err = property(PathValue::from(5), "x").expect_err("scalar has no properties");
        assert!(err.is_missing_property());
    }

    #[test]
    fn negative_and_out_of_range_positions() {
        let list = value(json!([1, 2, 3]));
        assert_eq!(index(list.clone(), &[IndexKey::Position(-1)]).expect("index"), PathValue::from(3));
        assert_eq!(index(list, &[IndexKey::Position(7)]).expect("index"), PathValue::Null);
    }

    #[test]
    fn ranges_clip_and_reverse() {
        let list = value(json!([0, 1, 2, 3, 4]));
        let range = IndexKey::Range { from: 3, to: 1, inclusive: true };
        assert_eq!(index(list.clone(), &[range]).expect("range"), value(json!([3, 2, 1])));
        let exclusive = IndexKey::Range { from: 0, to: 2, inclusive: false };
        assert_eq!(index(list, &[exclusive]).expect("range"), value(json!([0, 1])));
    }

    #[test]
    fn extreme_bounds_clip_without_expanding() {
        assert_eq!(range_positions(0, 2_000_000_000, true, 3), vec![0, 1, 2]);
        assert_eq!(range_positions(i64::MAX, i64::MIN, true, 3), vec![2, 1, 0]);
        assert_eq!(range_positions(i64::MIN, i64::MIN, false, 3), Vec::<usize>::new());
        assert_eq!(range_positions(-1, i64::MAX, false, 3), vec![2]);
        assert_eq!(range_positions(5, 9, true, 3), Vec::<usize>::new());
        assert_eq!(range_positions(0, 4, true, 0), Vec::<usize>::new());
    }

    #[test]
    fn depth_first_includes_maps_and_leaves() {
        let tree = value(json!({"a": {"b": 1}}));
        let PathValue::List(all) = depth_first(tree) else {
            panic!("depth first yields a list");
        };
        assert_eq!(all.len(), 3);
        assert_eq!(all[2], PathValue::from(1));
    }
}
