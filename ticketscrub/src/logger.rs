// ticketscrub/src/logger.rs
//! Logger initialization for the `ticketscrub` binary.

use env_logger::{Builder, Env, Target};
use log::LevelFilter;

/// Installs the global logger.
///
/// `RUST_LOG` is honoured (default `warn`) unless `level_override` is given.
/// Safe to call more than once; later calls are ignored, which lets tests
/// initialize logging freely.
pub fn init_logger(level_override: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level_override {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(Target::Stderr);
    let _ = builder.try_init();
}
