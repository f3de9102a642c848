//! Fee Ledger CLI
//!
//! Command-line interface for importing school fee ledgers from CSV files.
//!
//! # Usage
//!
//! ```bash
//! cargo run -- ledger.csv > balances.csv
//! cargo run -- --strategy sync ledger.csv > balances.csv
//! cargo run -- --strategy async ledger.csv > balances.csv
//! cargo run -- --strategy async --batch-size 2000 --max-concurrent 8 ledger.csv > balances.csv
//! ```
//!
//! The program reads fee and payment entries from the input CSV file, applies
//! them through the ledger engine using the selected import strategy, and
//! outputs the per-student balance summary to stdout. Diagnostics go to
//! stderr so the summary can be piped cleanly.
//!
//! # Import Strategies
//!
//! - **sync**: Synchronous CSV parsing with single-threaded processing
//! - **async**: Asynchronous batch processing with multi-threaded parallelism (default)
//!
//! # Exit Codes
//!
//! - 0: Success
//! - 1: Error (missing arguments, file not found, file not readable, etc.)

use fee_ledger::cli;
use fee_ledger::strategy;
use std::process;
use tracing_subscriber::EnvFilter;

fn main() {
    // Diagnostics to stderr, level via RUST_LOG
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = cli::parse_args();

    // Create the appropriate import strategy based on CLI arguments
    let strategy = {
        let config = if matches!(args.strategy, cli::StrategyType::Async) {
            Some(args.to_batch_config())
        } else {
            None
        };
        strategy::create_strategy(args.strategy, config)
    };

    // Summary goes to stdout
    let mut output = std::io::stdout();
    if let Err(e) = strategy.process(&args.input_file, &mut output) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
