//! Configuration management for `ticketscrub-core`.
//!
//! This module defines the core data structures for redaction rules and
//! sensitive-field directives. The built-in configuration is embedded in the
//! binary as YAML and parsed once at start-up; it is validated before any rule
//! is compiled.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::errors::ScrubError;

/// Maximum allowed length for a regex pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

lazy_static! {
    static ref CAPTURE_REFERENCE: Regex = Regex::new(r"\$\{?(\d+)\}?").expect("static regex is valid");
}

/// A single step of the redaction cascade.
///
/// Rules are applied in list order and each one rewrites the output of the
/// previous one. `replace_with` may re-insert capture groups using `$N` or
/// `${N}`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(default)]
pub struct RedactionRule {
    /// Unique identifier for the rule (e.g., "email").
    pub name: String,
    /// Human-readable description of what the rule targets.
    pub description: Option<String>,
    /// The regex pattern string.
    pub pattern: Option<String>,
    /// The string to replace matches with.
    pub replace_with: String,
    /// Explicit override for enabling/disabling the rule.
    pub enabled: Option<bool>,
}

impl Default for RedactionRule {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: None,
            pattern: None,
            replace_with: "[REDACTED]".to_string(),
            enabled: None,
        }
    }
}

/// What to emit in place of a sensitive field's value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DirectivePolicy {
    /// Replace the value with a fixed marker string.
    Literal { value: String },
    /// Replace the value with the number `0.0`.
    Zero,
}

/// Binds an exact object key to a [`DirectivePolicy`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct FieldDirective {
    pub key: String,
    pub policy: DirectivePolicy,
}

/// Represents the top-level configuration structure for ticketscrub.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
pub struct RedactionConfig {
    /// The ordered redaction cascade.
    pub rules: Vec<RedactionRule>,
    /// Per-key overrides applied by the tree walker.
    #[serde(default)]
    pub directives: Vec<FieldDirective>,
}

impl RedactionConfig {
    /// Loads the built-in cascade and directive table from the embedded configuration.
    pub fn load_default_rules() -> Result<Self> {
        debug!("Loading default rules from embedded string...");
        let default_yaml = include_str!("../config/default_rules.yaml");
        let config = Self::from_yaml_str(default_yaml).context("Failed to parse default rules")?;

        debug!(
            "Loaded {} default rules and {} field directives.",
            config.rules.len(),
            config.directives.len()
        );
        Ok(config)
    }

    /// Parses and validates a configuration document.
    pub fn from_yaml_str(text: &str) -> Result<Self> {
        let config: RedactionConfig =
            serde_yml::from_str(text).context("Failed to parse redaction configuration")?;
        validate_config(&config)?;
        Ok(config)
    }

    /// Removes the named rules from the cascade, keeping the order of the rest.
    pub fn set_active_rules(&mut self, disable_rules: &[String]) {
        let disable_set: HashSet<&str> = disable_rules.iter().map(String::as_str).collect();
        let all_rule_names: HashSet<&str> = self.rules.iter().map(|r| r.name.as_str()).collect();

        for rule_name in disable_set.difference(&all_rule_names) {
            warn!("Rule '{}' in `disable_rules` list does not exist.", rule_name);
        }

        debug!("Initial rules count before filtering: {}", self.rules.len());
        self.rules.retain(|rule| !disable_set.contains(rule.name.as_str()));
        debug!("Final active rules count after filtering: {}", self.rules.len());
    }
}

/// Validates rule and directive integrity.
///
/// Every problem is collected so a broken configuration is reported in one go.
fn validate_config(config: &RedactionConfig) -> Result<()> {
    let mut rule_names = HashSet::new();
    let mut errors = Vec::new();

    for rule in &config.rules {
        if rule.name.is_empty() {
            errors.push("A rule has an empty `name` field.".to_string());
        } else if !rule_names.insert(rule.name.as_str()) {
            errors.push(format!("Duplicate rule name found: '{}'.", rule.name));
        }

        let pattern = match &rule.pattern {
            Some(p) if !p.is_empty() => p,
            Some(_) => {
                errors.push(format!("Rule '{}' has an empty `pattern` field.", rule.name));
                continue;
            }
            None => {
                errors.push(format!("Rule '{}' is missing the `pattern` field.", rule.name));
                continue;
            }
        };

        if pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Rule '{}': pattern length ({}) exceeds maximum allowed ({}).",
                rule.name,
                pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }

        let regex = match Regex::new(pattern) {
            Ok(regex) => regex,
            Err(e) => {
                errors.push(format!("Rule '{}' has an invalid regex pattern: {}", rule.name, e));
                continue;
            }
        };

        // captures_len counts the implicit whole-match group 0.
        let group_count = regex.captures_len() - 1;
        for cap in CAPTURE_REFERENCE.captures_iter(&rule.replace_with) {
            if let Ok(group_num) = cap[1].parse::<usize>() {
                if group_num > group_count {
                    errors.push(format!(
                        "Rule '{}': replacement references non-existent capture group '${}'.",
                        rule.name, group_num
                    ));
                }
            }
        }
    }

    let mut directive_keys = HashSet::new();
    for directive in &config.directives {
        if directive.key.is_empty() {
            errors.push("A field directive has an empty `key`.".to_string());
        } else if !directive_keys.insert(directive.key.as_str()) {
            errors.push(format!("Duplicate field directive for key '{}'.", directive.key));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ScrubError::InvalidConfig(errors.join("\n")).into())
    }
}
