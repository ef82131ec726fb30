//! Renders a per-rule redaction summary as a table.

use comfy_table::Table;
use std::io::{self, Write};
use ticketscrub_core::RedactionSummary;

/// Writes the rule / occurrence table for one document.
///
/// A document no rule fired on gets a single line instead of a table.
pub fn print_summary<W: Write>(summary: &RedactionSummary, source: &str, writer: &mut W) -> io::Result<()> {
    if summary.is_empty() {
        return writeln!(writer, "No redactions applied to {source}.");
    }

    let mut table = Table::new();
    table.set_header(vec!["Rule", "Occurrences"]);
    for item in summary.items() {
        table.add_row(vec![item.rule_name.clone(), item.occurrences.to_string()]);
    }

    writeln!(writer, "Redaction summary for {source} ({} total):", summary.total())?;
    writeln!(writer, "{table}")
}
