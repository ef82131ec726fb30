//! Sensitive field directives.
//!
//! Some object keys always hold sensitive data regardless of their content
//! (IP addresses, coordinates). The tree walker consults this table before
//! descending into a value: a matching key gets a fixed substitute and its
//! original value is never inspected.

use serde_json::{Number, Value};
use std::collections::HashMap;

use crate::config::{DirectivePolicy, FieldDirective, RedactionConfig};

impl DirectivePolicy {
    /// The value written in place of the original.
    pub fn substitute(&self) -> Value {
        match self {
            DirectivePolicy::Literal { value } => Value::String(value.clone()),
            DirectivePolicy::Zero => Number::from_f64(0.0).map_or(Value::Null, Value::Number),
        }
    }
}

/// Exact, case-sensitive key lookup for field directives.
#[derive(Debug, Clone, Default)]
pub struct DirectiveTable {
    policies: HashMap<String, DirectivePolicy>,
}

impl DirectiveTable {
    pub fn new(directives: &[FieldDirective]) -> Self {
        let policies = directives
            .iter()
            .map(|d| (d.key.clone(), d.policy.clone()))
            .collect();
        Self { policies }
    }

    pub fn from_config(config: &RedactionConfig) -> Self {
        Self::new(&config.directives)
    }

    pub fn lookup(&self, key: &str) -> Option<&DirectivePolicy> {
        self.policies.get(key)
    }

    pub fn len(&self) -> usize {
        self.policies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.policies.is_empty()
    }
}
