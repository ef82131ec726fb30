//! Per-rule redaction accounting and PII-safe debug logging.
//!
//! The cascade engine records how often each rule fired into a
//! [`RedactionSummary`]; the tree walker accumulates one summary per document.

use lazy_static::lazy_static;
use log::trace;
use serde::{Deserialize, Serialize};

lazy_static! {
    /// Whether matched originals may appear in debug logs.
    static ref PII_DEBUG_ALLOWED: bool = {
        std::env::var("TICKETSCRUB_ALLOW_DEBUG_PII")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// Number of replacements a single rule made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummaryItem {
    pub rule_name: String,
    pub occurrences: usize,
}

/// Replacement counts per rule, listed in the order rules first fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionSummary {
    items: Vec<RedactionSummaryItem>,
}

impl RedactionSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `occurrences` hits for `rule_name`. Zero counts are ignored.
    pub fn record(&mut self, rule_name: &str, occurrences: usize) {
        if occurrences == 0 {
            return;
        }
        match self.items.iter_mut().find(|item| item.rule_name == rule_name) {
            Some(item) => item.occurrences += occurrences,
            None => self.items.push(RedactionSummaryItem {
                rule_name: rule_name.to_string(),
                occurrences,
            }),
        }
    }

    pub fn items(&self) -> &[RedactionSummaryItem] {
        &self.items
    }

    pub fn occurrences_of(&self, rule_name: &str) -> usize {
        self.items
            .iter()
            .find(|item| item.rule_name == rule_name)
            .map_or(0, |item| item.occurrences)
    }

    pub fn total(&self) -> usize {
        self.items.iter().map(|item| item.occurrences).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

pub fn redact_sensitive(s: &str) -> String {
    const MAX_LEN: usize = 8;
    if s.len() <= MAX_LEN {
        "[REDACTED]".to_string()
    } else {
        format!("[REDACTED: {} chars]", s.len())
    }
}

fn get_loggable_content(sensitive_content: &str) -> String {
    if *PII_DEBUG_ALLOWED {
        sensitive_content.to_string()
    } else {
        redact_sensitive(sensitive_content)
    }
}

pub fn log_redaction_action(rule_name: &str, original_sensitive_content: &str, sanitized_replacement: &str) {
    trace!(
        "Redaction action: Original='{}', Redacted='{}' for rule '{}'",
        get_loggable_content(original_sensitive_content),
        sanitized_replacement,
        rule_name
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact_sensitive_short_string() {
        assert_eq!(redact_sensitive("abc"), "[REDACTED]".to_string());
    }

    #[test]
    fn test_redact_sensitive_long_string() {
        assert_eq!(redact_sensitive("123456789"), "[REDACTED: 9 chars]".to_string());
    }

    #[test]
    fn summary_accumulates_in_first_seen_order() {
        let mut summary = RedactionSummary::new();
        summary.record("email", 2);
        summary.record("phone_us", 1);
        summary.record("full_name", 0);
        summary.record("email", 1);

        let names: Vec<&str> = summary.items().iter().map(|i| i.rule_name.as_str()).collect();
        assert_eq!(names, vec!["email", "phone_us"]);
        assert_eq!(summary.occurrences_of("email"), 3);
        assert_eq!(summary.occurrences_of("full_name"), 0);
        assert_eq!(summary.total(), 4);
    }

    #[test]
    fn new_summary_is_empty() {
        let mut summary = RedactionSummary::new();
        assert!(summary.is_empty());
        summary.record("email", 1);
        assert!(!summary.is_empty());
    }
}
