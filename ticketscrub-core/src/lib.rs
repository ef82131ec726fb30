// ticketscrub-core/src/lib.rs
//! # ticketscrub Core Library
//!
//! `ticketscrub-core` sanitizes arbitrary nested JSON documents (typically
//! support-ticket exports) by replacing personally identifiable or
//! confidential substrings with fixed markers, and can re-express the result
//! as a flat table.
//!
//! The library is pure and stateless: every transform is a function of its
//! input value. Only [`export_to_csv`] touches the filesystem.
//!
//! ## Modules
//!
//! * `config`: `RedactionRule`s, `FieldDirective`s and the embedded default configuration.
//! * `sanitizers`: compiles rules into regular expressions, preserving cascade order.
//! * `engine`: the `SanitizationEngine` trait (string in, redacted string out).
//! * `engines`: the `CascadeEngine` implementation.
//! * `directives`: exact-key overrides applied instead of descending into a value.
//! * `walker`: structure-preserving redaction of a whole JSON tree.
//! * `flatten`: nested value to `path -> scalar` record.
//! * `export`: item selection, column union and CSV output.
//! * `redaction_match`: per-rule hit counts and PII-safe debug logging.
//! * `headless`: the `Scrubber` bundle and one-shot helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use ticketscrub_core::Scrubber;
//! use serde_json::json;
//! use anyhow::Result;
//!
//! fn main() -> Result<()> {
//!     let scrubber = Scrubber::with_default_rules()?;
//!
//!     let ticket = json!({
//!         "ip_address": "10.0.0.7",
//!         "latitude": 12.34,
//!         "body": "Contact me at john.doe@example.com"
//!     });
//!     let redacted = scrubber.redact_value(&ticket);
//!
//!     assert_eq!(redacted["ip_address"], "[REDACTED IP]");
//!     assert_eq!(redacted["latitude"], 0.0);
//!     assert_eq!(redacted["body"], "Contact me at [REDACTED EMAIL]");
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! Configuration loading and engine construction return `anyhow::Result`.
//! File-scoped failures are reported as [`ScrubError`] variants carrying the
//! offending path. Redaction and flattening themselves cannot fail.

pub mod config;
pub mod directives;
pub mod engine;
pub mod engines;
pub mod errors;
pub mod export;
pub mod flatten;
pub mod headless;
pub mod redaction_match;
pub mod sanitizers;
pub mod walker;

/// Re-exports the public configuration types.
pub use config::{DirectivePolicy, FieldDirective, RedactionConfig, RedactionRule, MAX_PATTERN_LENGTH};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ScrubError;

pub use engine::SanitizationEngine;
pub use engines::cascade_engine::CascadeEngine;
pub use directives::DirectiveTable;
pub use walker::TreeWalker;
pub use flatten::{flatten, FlatRecord};
pub use export::{export_to_csv, field_universe, render_cell, select_items, TabularExport};
pub use redaction_match::{redact_sensitive, RedactionSummary, RedactionSummaryItem};
pub use headless::{headless_redact_text, headless_redact_value, Scrubber};
pub use sanitizers::compiler::{compile_rules, CompiledRule, CompiledRules};
