// ticketscrub/src/lib.rs
//! # ticketscrub CLI
//!
//! Batch front end for `ticketscrub-core`: argument parsing, logging setup,
//! terminal output and the per-file driver that reads exports, redacts them
//! and writes `redacted_*` siblings (plus optional CSV).

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;

pub use commands::scrub::{run_scrub, BatchInput, BatchReport, ScrubOptions};
