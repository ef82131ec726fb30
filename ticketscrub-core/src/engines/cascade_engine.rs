//! A `SanitizationEngine` that applies the compiled rules as an ordered cascade.
//!
//! Each rule rewrites the output of the previous rule, never the original
//! input, so earlier high-precision rules claim text before the broad name
//! and address heuristics see it. The cascade is not idempotent: a broad rule
//! can match text that only became adjacent after an earlier rewrite.
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use regex::Captures;
use std::sync::Arc;

use crate::config::RedactionConfig;
use crate::engine::SanitizationEngine;
use crate::redaction_match::{log_redaction_action, RedactionSummary};
use crate::sanitizers::compiler::{get_or_compile_rules, CompiledRule, CompiledRules};

#[derive(Debug)]
pub struct CascadeEngine {
    compiled_rules: Arc<CompiledRules>,
    config: RedactionConfig,
}

impl CascadeEngine {
    pub fn new(config: RedactionConfig) -> Result<Self> {
        let compiled_rules = get_or_compile_rules(&config)
            .context("Failed to compile redaction rules for CascadeEngine")?;

        Ok(Self { compiled_rules, config })
    }

    /// Builds an engine from the embedded default configuration.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(RedactionConfig::load_default_rules()?)
    }

    /// Applies one rule to every non-overlapping match in `text`.
    ///
    /// Returns `None` when the rule did not match, so the caller can keep the
    /// current string without reallocating.
    fn apply_rule(rule: &CompiledRule, text: &str, summary: &mut RedactionSummary) -> Option<String> {
        let mut hits = 0usize;
        let replaced = rule.regex.replace_all(text, |caps: &Captures| {
            hits += 1;
            let mut replacement = String::new();
            caps.expand(&rule.replace_with, &mut replacement);
            log_redaction_action(&rule.name, &caps[0], &replacement);
            replacement
        });
        summary.record(&rule.name, hits);

        if hits == 0 {
            None
        } else {
            Some(replaced.into_owned())
        }
    }
}

impl SanitizationEngine for CascadeEngine {
    fn redact_text_tracked(&self, content: &str, summary: &mut RedactionSummary) -> String {
        let mut text = content.to_string();
        for rule in &self.compiled_rules.rules {
            if let Some(rewritten) = Self::apply_rule(rule, &text, summary) {
                text = rewritten;
            }
        }
        text
    }

    fn get_rules(&self) -> &RedactionConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RedactionRule;

    fn rule(name: &str, pattern: &str, replace_with: &str) -> RedactionRule {
        RedactionRule {
            name: name.to_string(),
            pattern: Some(pattern.to_string()),
            replace_with: replace_with.to_string(),
            ..Default::default()
        }
    }

    fn engine(rules: Vec<RedactionRule>) -> CascadeEngine {
        CascadeEngine::new(RedactionConfig { rules, directives: Vec::new() }).unwrap()
    }

    #[test]
    fn later_rules_see_earlier_output() {
        let engine = engine(vec![
            rule("first", "secret", "[HIDDEN]"),
            rule("second", r"\[HIDDEN\]", "<gone>"),
        ]);
        assert_eq!(engine.redact_text("a secret here"), "a <gone> here");
    }

    #[test]
    fn order_decides_which_rule_claims_text() {
        let specific_first = engine(vec![
            rule("specific", "John Smith", "[KNOWN]"),
            rule("broad", "[A-Z][a-z]+ [A-Z][a-z]+", "[NAME]"),
        ]);
        let broad_first = engine(vec![
            rule("broad", "[A-Z][a-z]+ [A-Z][a-z]+", "[NAME]"),
            rule("specific", "John Smith", "[KNOWN]"),
        ]);
        assert_eq!(specific_first.redact_text("John Smith"), "[KNOWN]");
        assert_eq!(broad_first.redact_text("John Smith"), "[NAME]");
    }

    #[test]
    fn capture_groups_are_reinserted() {
        let engine = engine(vec![rule("path", r"(/var/www)/[a-z]+", "${1}/[X]")]);
        assert_eq!(engine.redact_text("at /var/www/site/index"), "at /var/www/[X]/index");
    }

    #[test]
    fn counts_hits_per_rule() {
        let engine = engine(vec![rule("digit", r"\d", "#"), rule("never", "zzz", "")]);
        let mut summary = RedactionSummary::new();
        let out = engine.redact_text_tracked("a1b2c3", &mut summary);

        assert_eq!(out, "a#b#c#");
        assert_eq!(summary.occurrences_of("digit"), 3);
        assert_eq!(summary.items().len(), 1);
    }

    #[test]
    fn empty_string_is_returned_unchanged() {
        let engine = CascadeEngine::with_default_rules().unwrap();
        assert_eq!(engine.redact_text(""), "");
    }
}
