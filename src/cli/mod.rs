//! Command-line interface for the ledger importer
//!
//! Wraps clap argument parsing: the input CSV path, the sync/async strategy
//! choice, and the batch tuning flags that feed `BatchConfig`.

mod args;

pub use args::{CliArgs, StrategyType};

use clap::Parser;

/// Parse command-line arguments
///
/// On invalid or missing arguments (or `--help`), clap prints its message
/// and exits the process, so callers only ever see valid arguments.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
