//! Terminal output helpers for the ticketscrub CLI.

pub mod output_format;
pub mod redaction_summary;
