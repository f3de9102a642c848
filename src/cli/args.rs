use crate::strategy::BatchConfig;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Arguments for the fee-ledger importer
///
/// One positional argument (the ledger CSV) plus the strategy switch and the
/// two batch tuning knobs, which only matter in async mode.
#[derive(Parser, Debug)]
#[command(name = "fee-ledger")]
#[command(about = "Import a school fee ledger and report per-student balances", long_about = None)]
pub struct CliArgs {
    /// Ledger CSV with fee and payment rows
    #[arg(value_name = "INPUT", help = "Path to the input CSV file")]
    pub input_file: PathBuf,

    #[arg(
        long = "strategy",
        value_name = "STRATEGY",
        default_value = "async",
        help = "Import strategy: 'sync' for synchronous or 'async' for asynchronous"
    )]
    pub strategy: StrategyType,

    /// Entries per batch (async mode only)
    #[arg(
        long = "batch-size",
        value_name = "SIZE",
        help = "Number of entries per batch (default: 1000)"
    )]
    pub batch_size: Option<usize>,

    /// Worker parallelism (async mode only)
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of batches processing concurrently (default: CPU cores)"
    )]
    pub max_concurrent_batches: Option<usize>,
}

#[derive(Clone, Debug, ValueEnum)]
pub enum StrategyType {
    Sync,
    Async,
}

impl CliArgs {
    /// Build the async pipeline's BatchConfig from the tuning flags
    ///
    /// Flags the user left unset fall back to the defaults, and zero values
    /// are rejected with a warning inside `BatchConfig::new`.
    pub fn to_batch_config(&self) -> BatchConfig {
        if self.batch_size.is_some() || self.max_concurrent_batches.is_some() {
            let default = BatchConfig::default();
            BatchConfig::new(
                self.batch_size.unwrap_or(default.batch_size),
                self.max_concurrent_batches
                    .unwrap_or(default.max_concurrent_batches),
            )
        } else {
            BatchConfig::default()
        }
    }
}
