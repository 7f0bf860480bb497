//! Clipmark CLI library
//!
//! This library provides the command-line interface around the
//! clipmark-core parsing and deduplication engine: locating the clippings
//! export, scanning prior output for emitted hashes, book selection, and
//! the Markdown writer.

pub mod commands;
pub mod config;
pub mod error;
pub mod input;
pub mod output;
pub mod progress;
pub mod scan;
pub mod select;

pub use error::{CliError, CliResult};

/// Initialize logging based on the verbosity level
pub fn init_logging(quiet: bool, verbose: u8) {
    let log_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    if !quiet {
        let _ = env_logger::Builder::from_env(
            env_logger::Env::default().default_filter_or(log_level),
        )
        .try_init();
    }
}
