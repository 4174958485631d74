// autoreg/src/logger.rs
//! Logging setup for the `autoreg` binary.
//!
//! License: MIT OR Apache-2.0

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initializes `env_logger`.
///
/// `RUST_LOG` is honored unless `level` is given, in which case it wins.
/// Without either, only warnings and errors are shown. Calling this more than
/// once is harmless.
pub fn init_logger(level: Option<LevelFilter>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));
    if let Some(level) = level {
        builder.filter_level(level);
    }
    builder.format_timestamp(None).target(env_logger::Target::Stderr);
    // A logger may already be installed, e.g. by a test harness.
    builder.try_init().ok();
}

/// Maps the global CLI flags onto an explicit level override.
pub fn level_from_flags(quiet: bool, debug: bool) -> Option<LevelFilter> {
    if quiet {
        Some(LevelFilter::Off)
    } else if debug {
        Some(LevelFilter::Debug)
    } else {
        None
    }
}
