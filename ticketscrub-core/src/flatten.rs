//! Path-based flattening of JSON trees.
//!
//! Object members extend the path with `.key` (or just `key` at the root) and
//! array elements with `[i]`. Every scalar leaf becomes one entry. Empty
//! objects and arrays have no leaves and therefore vanish from the record.

use serde_json::{Map, Value};

/// Structural path to scalar value, in document order.
pub type FlatRecord = Map<String, Value>;

/// Flattens `value` with every path rooted at `prefix`.
///
/// Works on an explicit stack, so nesting depth is bounded by memory rather
/// than by the call stack.
pub fn flatten(value: &Value, prefix: &str) -> FlatRecord {
    let mut record = FlatRecord::new();
    // Children are pushed in reverse so they pop in document order.
    let mut pending: Vec<(&Value, String)> = vec![(value, prefix.to_string())];

    while let Some((node, path)) = pending.pop() {
        match node {
            Value::Object(entries) => {
                for (key, child) in entries.iter().rev() {
                    let child_path = if path.is_empty() {
                        key.clone()
                    } else {
                        format!("{path}.{key}")
                    };
                    pending.push((child, child_path));
                }
            }
            Value::Array(items) => {
                for (index, child) in items.iter().enumerate().rev() {
                    pending.push((child, format!("{path}[{index}]")));
                }
            }
            Value::Null | Value::Bool(_) | Value::Number(_) | Value::String(_) => {
                record.insert(path, node.clone());
            }
        }
    }
    record
}
