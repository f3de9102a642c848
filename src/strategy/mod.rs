//! Import strategy module for ledger processing
//!
//! This module defines the Strategy pattern for complete ledger import pipelines,
//! encompassing both CSV parsing and ledger engine processing. This allows different
//! processing implementations (synchronous, asynchronous batch) to be selected at runtime.

use crate::cli::StrategyType;
use std::io::Write;
use std::path::Path;

pub mod r#async;
pub mod sync;

pub use self::r#async::{AsyncImportStrategy, BatchConfig};
pub use sync::SyncImportStrategy;

/// Import strategy trait for complete ledger import pipelines
///
/// This trait defines the interface for different import implementations.
/// Each strategy must be able to read ledger entries from a CSV file, apply
/// them through the ledger engine, and write the per-student summary to output.
pub trait ImportStrategy: Send + Sync {
    /// Import entries from input file and write the summary to output
    ///
    /// This method reads ledger entries from the specified CSV file, applies
    /// them through the ledger engine, and writes the final per-student
    /// summary to the provided output writer.
    ///
    /// # Returns
    ///
    /// * `Ok(())` if all processing completed successfully (or with recoverable errors)
    /// * `Err(String)` if a fatal error occurred (file not found, I/O error, etc.)
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The input file cannot be opened (file not found, permission denied)
    /// - A fatal I/O error occurs during reading or writing
    /// - Output cannot be written
    ///
    /// Individual entry failures are logged but do not cause this method to
    /// return an error. Processing continues with the next entry.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String>;
}

/// Create an import strategy based on the specified strategy type
///
/// This factory function implements the Strategy pattern by selecting and
/// instantiating the appropriate import implementation at runtime based on
/// the provided strategy type and optional configuration.
///
/// # Returns
///
/// A boxed trait object implementing the ImportStrategy trait
pub fn create_strategy(
    strategy_type: StrategyType,
    config: Option<BatchConfig>,
) -> Box<dyn ImportStrategy> {
    match strategy_type {
        StrategyType::Sync => Box::new(SyncImportStrategy),
        StrategyType::Async => {
            let config = config.unwrap_or_default();
            Box::new(AsyncImportStrategy::new(config))
        }
    }
}
