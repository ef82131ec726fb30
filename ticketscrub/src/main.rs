//! ticketscrub entry point.
//!
//! Parses arguments, builds the scrubber once and hands the inputs to the
//! batch driver. Only invocation errors produce a non-zero exit status.

use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, LevelFilter};

use ticketscrub::cli::Cli;
use ticketscrub::logger;
use ticketscrub::{run_scrub, BatchInput, ScrubOptions};
use ticketscrub_core::{RedactionConfig, SanitizationEngine, Scrubber};

fn main() -> Result<()> {
    let args = Cli::parse();

    let level = if args.quiet {
        Some(LevelFilter::Off)
    } else if args.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let mut config = RedactionConfig::load_default_rules()?;
    if !args.disable.is_empty() {
        config.set_active_rules(&args.disable);
    }
    let scrubber = Scrubber::new(config).context("Failed to build the redaction cascade")?;
    debug!(
        "Cascade ready with {} rules and {} field directives",
        scrubber.engine().get_rules().rules.len(),
        scrubber.directives().len()
    );

    let input = match args.directory {
        Some(dir) => BatchInput::Directory(dir),
        None => BatchInput::Files(args.file),
    };
    let opts = ScrubOptions {
        export_csv: args.csv,
        show_summary: !args.no_summary,
        quiet: args.quiet,
    };

    run_scrub(&scrubber, &input, &opts);
    Ok(())
}
