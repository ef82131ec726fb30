//! This file defines the command-line interface (CLI) for the ticketscrub application.
//! License: MIT OR Apache-2.0

use clap::{ArgGroup, Parser};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "ticketscrub",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Redact PII from JSON files",
    long_about = "ticketscrub replaces emails, phone numbers, addresses, names, credential-bearing links and company identifiers in exported JSON documents with fixed markers. Each input is written next to the original as redacted_<name>.json, optionally together with a flattened CSV.",
    arg_required_else_help = true,
    group(ArgGroup::new("input").required(true).args(["file", "directory"])),
)]
pub struct Cli {
    /// Path to JSON file(s) to process; repeat the flag for several files.
    #[arg(long, short = 'f', value_name = "FILE", help = "Path to JSON file(s) to process.")]
    pub file: Vec<PathBuf>,

    /// Directory whose *.json files are processed (non-recursive).
    #[arg(long, short = 'd', value_name = "DIR", help = "Path to directory containing JSON files to process (non-recursive).")]
    pub directory: Option<PathBuf>,

    /// Also export each redacted document as CSV.
    #[arg(long, help = "Export redacted data to CSV format.")]
    pub csv: bool,

    /// Rules to leave out of the cascade (comma-separated rule names).
    #[arg(long, short = 'x', value_delimiter = ',', value_name = "RULES", help = "Disable these rule names (comma-separated).")]
    pub disable: Vec<String>,

    /// Suppress the per-file redaction summary.
    #[arg(long = "no-summary", help = "Suppress the per-file redaction summary.")]
    pub no_summary: bool,

    /// Disable informational messages
    #[arg(long, short = 'q', help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,
}
