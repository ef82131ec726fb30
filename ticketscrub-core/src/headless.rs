// ticketscrub-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the core without any UI.
//!
//! [`Scrubber`] bundles a cascade engine with its directive table so callers
//! can build it once and redact many documents. The free functions are
//! one-shot helpers on top of the built-in configuration.

use anyhow::Result;
use log::warn;
use serde_json::Value;

use crate::config::RedactionConfig;
use crate::directives::DirectiveTable;
use crate::engine::SanitizationEngine;
use crate::engines::cascade_engine::CascadeEngine;
use crate::redaction_match::RedactionSummary;
use crate::walker::TreeWalker;

/// A ready-to-use cascade plus directive table.
#[derive(Debug)]
pub struct Scrubber {
    engine: CascadeEngine,
    directives: DirectiveTable,
}

impl Scrubber {
    pub fn new(config: RedactionConfig) -> Result<Self> {
        let directives = DirectiveTable::from_config(&config);
        if directives.is_empty() {
            warn!("No field directives configured; every key will be redacted as text.");
        }
        let engine = CascadeEngine::new(config)?;
        Ok(Self { engine, directives })
    }

    /// Builds a scrubber from the embedded default configuration.
    pub fn with_default_rules() -> Result<Self> {
        Self::new(RedactionConfig::load_default_rules()?)
    }

    pub fn redact_text(&self, content: &str) -> String {
        self.engine.redact_text(content)
    }

    pub fn redact_value(&self, value: &Value) -> Value {
        self.walker().redact_value(value)
    }

    /// Redacts a whole document and reports which rules fired.
    pub fn redact_document(&self, document: &Value) -> (Value, RedactionSummary) {
        let mut summary = RedactionSummary::new();
        let redacted = self.walker().redact_value_tracked(document, &mut summary);
        (redacted, summary)
    }

    pub fn walker(&self) -> TreeWalker<'_> {
        TreeWalker::new(&self.engine, &self.directives)
    }

    pub fn engine(&self) -> &CascadeEngine {
        &self.engine
    }

    pub fn directives(&self) -> &DirectiveTable {
        &self.directives
    }
}

/// Redacts a single string with the built-in cascade.
pub fn headless_redact_text(content: &str) -> Result<String> {
    Ok(Scrubber::with_default_rules()?.redact_text(content))
}

/// Redacts a JSON value with the built-in cascade and directives.
pub fn headless_redact_value(value: &Value) -> Result<Value> {
    Ok(Scrubber::with_default_rules()?.redact_value(value))
}
