//! XML documents, element handles and the [`XmlPath`] query API

pub mod node;
mod parser;
mod path;

pub use node::{Node, NodeChildren};
pub use path::XmlPath;

pub(crate) use parser::parse_document;

use crate::value::PathValue;

/// Collapse an evaluation result into what callers see
///
/// Empty node sets become null, a node with child elements stays a [`Node`],
/// a leaf becomes its text and larger node sets become lists converted the
/// same way member by member.
#[must_use]
pub fn convert_result(value: PathValue) -> PathValue {
    match value {
        PathValue::Node(node) => convert_node(node),
        PathValue::Nodes(mut nodes) => match nodes.len() {
            0 => PathValue::Null,
            1 => convert_node(nodes.remove(0)),
            _ => PathValue::List(nodes.into_iter().map(convert_node).collect()),
        },
        PathValue::List(items) => PathValue::List(items.into_iter().map(convert_result).collect()),
        other => other,
    }
}

fn convert_node(node: Node) -> PathValue {
    if node.has_element_children() {
        PathValue::Node(node)
    } else {
        PathValue::String(node.value())
    }
}
