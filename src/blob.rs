//! Breadth-first search over embedded hydration JSON.
//!
//! Server-rendered pages ship their client state as one big JSON tree with no
//! stable schema. The article body sits somewhere inside it, usually a few
//! levels down, so we walk the tree level by level and stop at the first node
//! that looks right.

use serde_json::Value;
use std::collections::VecDeque;

/// Key under which the article node keeps its list of content blocks.
pub const CONTENT_KEY: &str = "content";

/// Return the first node, in breadth-first order, for which `predicate` holds.
///
/// Object values and array elements are both children, visited in the order
/// they appear. The root itself is tested first. Scalars are tested but have
/// no children, so a scalar root that fails the predicate yields `None`.
pub fn locate<'a, P>(root: &'a Value, predicate: P) -> Option<&'a Value>
where
    P: Fn(&Value) -> bool,
{
    let mut queue = VecDeque::from([root]);

    while let Some(node) = queue.pop_front() {
        if predicate(node) {
            return Some(node);
        }
        match node {
            Value::Object(map) => queue.extend(map.values()),
            Value::Array(items) => queue.extend(items.iter()),
            _ => {}
        }
    }

    None
}

/// True for an object whose [`CONTENT_KEY`] field holds an array.
pub fn is_article_node(node: &Value) -> bool {
    matches!(
        node,
        Value::Object(map) if map.get(CONTENT_KEY).is_some_and(Value::is_array)
    )
}
