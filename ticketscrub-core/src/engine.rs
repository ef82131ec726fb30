// ticketscrub-core/src/engine.rs
//! Defines the core `SanitizationEngine` trait.
//!
//! The trait is the seam between the string-level redaction logic and
//! everything that walks documents: the tree walker only needs something that
//! turns one string into its redacted form.
//!
//! License: MIT OR APACHE 2.0

use crate::config::RedactionConfig;
use crate::redaction_match::RedactionSummary;

/// A pure string-to-string redaction step.
///
/// Implementations must be deterministic and total: every input string has a
/// redacted form and no call fails.
pub trait SanitizationEngine: Send + Sync {
    /// Redacts `content`, adding per-rule hit counts to `summary`.
    fn redact_text_tracked(&self, content: &str, summary: &mut RedactionSummary) -> String;

    /// Redacts `content`, discarding the hit counts.
    fn redact_text(&self, content: &str) -> String {
        let mut summary = RedactionSummary::new();
        self.redact_text_tracked(content, &mut summary)
    }

    /// Returns the configuration the engine was built from.
    fn get_rules(&self) -> &RedactionConfig;
}
