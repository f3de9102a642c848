//! Asynchronous batch import strategy
//!
//! This module provides an asynchronous, multi-threaded implementation of the
//! ImportStrategy trait. It applies ledger entries in batches using thread-based
//! parallelism with student-based partitioning.
//!
//! # Architecture
//!
//! ```text
//! AsyncImportStrategy
//!     ├── BatchConfig (batch_size, max_concurrent_batches)
//!     ├── AsyncReader (batch CSV reading)
//!     ├── BatchProcessor (student partitioning + threading)
//!     └── LedgerEngine (thread-safe allocation)
//!         ├── FeeStore (thread-safe fee records)
//!         └── PaymentLog (thread-safe reference dedup)
//! ```
//!
//! # Thread-Based Parallelism
//!
//! This strategy uses true thread-based parallelism:
//! - Processes batches sequentially to maintain per-student ordering across the entire file
//! - Within each batch, partitions by student id for parallel processing
//! - Spawns worker tasks via tokio multi-threaded runtime
//! - Uses Arc + DashMap for thread-safe shared state

use crate::io::async_reader::AsyncReader;
use crate::io::csv_format::write_summary_csv;
use crate::ledger::{BatchProcessor, FeeStore, LedgerEngine, PaymentLog};
use crate::strategy::ImportStrategy;
use chrono::Utc;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

/// Configuration for batch processing
///
/// Controls how entries are batched and the number of worker threads
/// for parallel processing within each batch.
#[derive(Clone, Debug)]
pub struct BatchConfig {
    /// Number of entries per batch
    pub batch_size: usize,
    /// Maximum number of batches processing concurrently
    pub max_concurrent_batches: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            batch_size: 1000,
            max_concurrent_batches: num_cpus::get(),
        }
    }
}

impl BatchConfig {
    /// Create a new BatchConfig with custom values
    pub fn new(batch_size: usize, max_concurrent_batches: usize) -> Self {
        let default = Self::default();

        let batch_size = if batch_size == 0 {
            tracing::warn!(
                "Invalid batch_size ({}), using default ({})",
                batch_size,
                default.batch_size
            );
            default.batch_size
        } else {
            batch_size
        };

        let max_concurrent_batches = if max_concurrent_batches == 0 {
            tracing::warn!(
                "Invalid max_concurrent_batches ({}), using default ({})",
                max_concurrent_batches,
                default.max_concurrent_batches
            );
            default.max_concurrent_batches
        } else {
            max_concurrent_batches
        };

        Self {
            batch_size,
            max_concurrent_batches,
        }
    }
}

/// Asynchronous batch import strategy
///
/// Implements the ImportStrategy trait using multi-threaded, asynchronous
/// batch processing. Entries are read in batches and applied sequentially
/// (batch-by-batch) to maintain ordering guarantees. Within each batch,
/// entries are partitioned by student id and applied in parallel across
/// multiple worker tasks.
///
/// # Thread Safety
///
/// AsyncImportStrategy is Send + Sync and uses thread-safe components
/// internally (Arc-wrapped LedgerEngine with DashMap-based state).
///
/// # Configuration
///
/// The strategy accepts a BatchConfig with:
/// - `batch_size`: Number of entries per batch (default: 1000)
/// - `max_concurrent_batches`: Number of worker threads (default: CPU cores)
#[derive(Debug, Clone)]
pub struct AsyncImportStrategy {
    /// Batch processing configuration
    config: BatchConfig,
}

impl AsyncImportStrategy {
    /// Create a new AsyncImportStrategy with the specified configuration
    pub fn new(config: BatchConfig) -> Self {
        Self { config }
    }
}

impl ImportStrategy for AsyncImportStrategy {
    /// Import entries from input file and write the summary to output
    ///
    /// This method implements the complete asynchronous batch import pipeline:
    /// 1. Creates thread-safe engine components (FeeStore, PaymentLog, LedgerEngine)
    /// 2. Creates a BatchProcessor for student-based partitioning
    /// 3. Creates a tokio multi-threaded runtime
    /// 4. Reads entries in batches from CSV using AsyncReader
    /// 5. Applies each batch sequentially (waits for completion before next batch)
    /// 6. Within each batch, applies different students' entries in parallel
    /// 7. Computes per-student summaries as of today
    /// 8. Writes the summary to output using csv_format module
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors, runtime errors) are returned
    /// immediately. Individual entry errors are logged and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        // Use multi-threaded runtime with configured number of worker threads
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(self.config.max_concurrent_batches)
            .build()
            .map_err(|e| format!("Failed to create tokio runtime: {}", e))?;

        runtime.block_on(async {
            // Create thread-safe engine components
            let fee_store = Arc::new(FeeStore::new());
            let payment_log = Arc::new(PaymentLog::new());
            let engine = Arc::new(LedgerEngine::new(
                Arc::clone(&fee_store),
                Arc::clone(&payment_log),
            ));

            let processor = BatchProcessor::new(Arc::clone(&engine));

            let file = tokio::fs::File::open(input_path)
                .await
                .map_err(|e| format!("Failed to open file '{}': {}", input_path.display(), e))?;

            // Wrap tokio file in a compatibility layer for csv-async
            let compat_file = tokio_util::compat::TokioAsyncReadCompatExt::compat(file);

            let mut reader = AsyncReader::new(compat_file);

            // Process batches sequentially to maintain per-student ordering
            // across the entire file. Each batch is still processed in
            // parallel across different students.
            loop {
                let batch = reader.read_batch(self.config.batch_size).await;

                if batch.is_empty() {
                    break;
                }

                // Wait for completion before reading the next batch so a
                // student's entries spanning batches stay in file order
                let results = processor.process_batch(batch).await;
                for failed in results.iter().filter(|r| r.result.is_err()) {
                    if let Err(e) = &failed.result {
                        tracing::warn!("Entry processing error: {}", e);
                    }
                }
            }

            let summaries = engine.student_summaries(Utc::now().date_naive());
            write_summary_csv(&summaries, output)?;

            Ok(())
        })
    }
}
