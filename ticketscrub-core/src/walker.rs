//! Structure-preserving redaction of JSON trees.
//!
//! Objects keep their key set and key order, arrays keep their length, and
//! only string leaves go through the cascade. Keys found in the directive
//! table are replaced wholesale. Traversal uses an explicit stack, so nesting
//! depth is bounded by heap, not by the native call stack.

use serde_json::{map, Map, Value};
use std::slice;

use crate::directives::DirectiveTable;
use crate::engine::SanitizationEngine;
use crate::redaction_match::RedactionSummary;

/// A container whose children are still being visited.
enum Frame<'a> {
    Object {
        entries: map::Iter<'a>,
        out: Map<String, Value>,
        pending_key: Option<String>,
    },
    Array {
        items: slice::Iter<'a, Value>,
        out: Vec<Value>,
    },
}

impl<'a> Frame<'a> {
    /// Stores a finished child under the key or index it was taken from.
    fn accept(&mut self, value: Value) {
        match self {
            Frame::Object { out, pending_key, .. } => {
                if let Some(key) = pending_key.take() {
                    out.insert(key, value);
                }
            }
            Frame::Array { out, .. } => out.push(value),
        }
    }

    /// Returns the next child that needs visiting.
    ///
    /// Directive-matched entries are resolved here and never returned.
    fn next_child(&mut self, directives: &DirectiveTable) -> Option<&'a Value> {
        match self {
            Frame::Object { entries, out, pending_key } => {
                for (key, value) in entries {
                    match directives.lookup(key) {
                        Some(policy) => {
                            out.insert(key.clone(), policy.substitute());
                        }
                        None => {
                            *pending_key = Some(key.clone());
                            return Some(value);
                        }
                    }
                }
                None
            }
            Frame::Array { items, .. } => items.next(),
        }
    }

    fn finish(self) -> Value {
        match self {
            Frame::Object { out, .. } => Value::Object(out),
            Frame::Array { out, .. } => Value::Array(out),
        }
    }
}

/// What visiting a single value produced.
enum Visit<'a> {
    Leaf(Value),
    Container(Frame<'a>),
}

/// Applies a [`SanitizationEngine`] and a [`DirectiveTable`] to a JSON tree.
pub struct TreeWalker<'e> {
    engine: &'e dyn SanitizationEngine,
    directives: &'e DirectiveTable,
}

impl<'e> TreeWalker<'e> {
    pub fn new(engine: &'e dyn SanitizationEngine, directives: &'e DirectiveTable) -> Self {
        Self { engine, directives }
    }

    /// Returns a redacted copy of `value`. The input is left untouched.
    pub fn redact_value(&self, value: &Value) -> Value {
        let mut summary = RedactionSummary::new();
        self.redact_value_tracked(value, &mut summary)
    }

    /// Like [`TreeWalker::redact_value`], also accumulating per-rule hit counts.
    pub fn redact_value_tracked(&self, root: &Value, summary: &mut RedactionSummary) -> Value {
        let mut stack: Vec<Frame<'_>> = Vec::new();
        let mut finished = match self.visit(root, summary) {
            Visit::Leaf(value) => return value,
            Visit::Container(frame) => {
                stack.push(frame);
                None
            }
        };

        loop {
            let Some(frame) = stack.last_mut() else {
                return finished.unwrap_or(Value::Null);
            };
            if let Some(value) = finished.take() {
                frame.accept(value);
            }
            match frame.next_child(self.directives) {
                Some(child) => match self.visit(child, summary) {
                    Visit::Leaf(value) => finished = Some(value),
                    Visit::Container(child_frame) => stack.push(child_frame),
                },
                None => finished = stack.pop().map(Frame::finish),
            }
        }
    }

    fn visit<'a>(&self, value: &'a Value, summary: &mut RedactionSummary) -> Visit<'a> {
        match value {
            Value::Object(entries) => Visit::Container(Frame::Object {
                entries: entries.iter(),
                out: Map::with_capacity(entries.len()),
                pending_key: None,
            }),
            Value::Array(items) => Visit::Container(Frame::Array {
                items: items.iter(),
                out: Vec::with_capacity(items.len()),
            }),
            Value::String(text) => Visit::Leaf(Value::String(self.engine.redact_text_tracked(text, summary))),
            Value::Null | Value::Bool(_) | Value::Number(_) => Visit::Leaf(value.clone()),
        }
    }
}
