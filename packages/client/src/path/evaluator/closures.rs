//! Methods that take a closure: `find`, `findAll`, `collect` and friends

use std::cmp::Ordering;

use indexmap::IndexMap;

use crate::path::{
    ast::Closure,
    error::{PathError, PathResult},
};
use crate::value::PathValue;

use super::engine::{Context, Evaluator};
use super::methods::{sort_values, sum};
use super::navigation::{members, rebuild};
use super::operators::compare;

/// Invoke `name(args) { closure }` on `receiver`
pub(crate) fn call(
    evaluator: &Evaluator<'_>,
    receiver: PathValue,
    name: &str,
    args: &[PathValue],
    closure: &Closure,
    ctx: &Context<'_>,
) -> PathResult<PathValue> {
    let was_nodes = matches!(receiver, PathValue::Nodes(_));
    let was_map = matches!(receiver, PathValue::Map(_));
    let type_name = receiver.type_name();
    let items = members(receiver);
    let apply = |item: &PathValue| evaluator.invoke(closure, item.clone(), ctx);

    let value = match name {
        "find" => {
            for item in items {
                if apply(&item)?.truthy() {
                    return Ok(item);
                }
            }
            PathValue::Null
        }
        "findAll" | "grep" => {
            let mut kept = Vec::new();
            for item in items {
                if apply(&item)?.truthy() {
                    kept.push(item);
                }
            }
            if was_map {
                entries_to_map(kept)
            } else {
                rebuild(was_nodes, kept)
            }
        }
        "collect" => {
            let mut out = args.first().map_or_else(Vec::new, |initial| members(initial.clone()));
            for item in &items {
                out.push(apply(item)?);
            }
            PathValue::List(out)
        }
        "collectMany" | "collectNested" => {
            let mut out = Vec::new();
            for item in &items {
                out.extend(members(apply(item)?));
            }
            PathValue::List(out)
        }
        "any" => {
            for item in &items {
                if apply(item)?.truthy() {
                    return Ok(PathValue::Bool(true));
                }
            }
            PathValue::Bool(false)
        }
        "every" => {
            for item in &items {
                if !apply(item)?.truthy() {
                    return Ok(PathValue::Bool(false));
                }
            }
            PathValue::Bool(true)
        }
        "count" => {
            let mut count = 0usize;
            for item in &items {
                if apply(item)?.truthy() {
                    count += 1;
                }
            }
            PathValue::from(count)
        }
        "sum" => {
            let mapped = items.iter().map(apply).collect::<PathResult<Vec<_>>>()?;
            sum(mapped)?
        }
        "max" | "min" => {
            let wanted = if name == "max" { Ordering::Greater } else { Ordering::Less };
            let mut best: Option<(PathValue, PathValue)> = None;
            for item in items {
                let key = apply(&item)?;
                best = Some(match best {
                    None => (key, item),
                    Some((best_key, _)) if compare(&key, &best_key)? == wanted => (key, item),
                    Some(current) => current,
                });
            }
            best.map(|(_, item)| item).unwrap_or_default()
        }
        "sort" | "sortBy" => {
            let keyed = items
                .into_iter()
                .map(|item| apply(&item).map(|key| (key, item)))
                .collect::<PathResult<Vec<_>>>()?;
            rebuild(was_nodes, sort_values(keyed)?)
        }
        "groupBy" => {
            let mut groups: IndexMap<String, Vec<PathValue>> = IndexMap::new();
            for item in items {
                let key = apply(&item)?.text();
                groups.entry(key).or_default().push(item);
            }
            PathValue::Map(groups.into_iter().map(|(k, v)| (k, PathValue::List(v))).collect())
        }
        "each" => {
            for item in &items {
                apply(item)?;
            }
            rebuild(was_nodes, items)
        }
        _ => return Err(PathError::unsupported_method(name, type_name)),
    };
    Ok(value)
}

fn entries_to_map(entries: Vec<PathValue>) -> PathValue {
    let mut map = IndexMap::with_capacity(entries.len());
    for entry in entries {
        if let PathValue::Map(mut entry) = entry {
            let key = entry.swap_remove("key").unwrap_or_default().text();
            map.insert(key, entry.swap_remove("value").unwrap_or_default());
        }
    }
    PathValue::Map(map)
}
