//! Synchronous import strategy
//!
//! This module provides a synchronous, single-threaded implementation of the
//! ImportStrategy trait. It orchestrates the import by coordinating between
//! the SyncReader (for CSV input) and LedgerEngine (for business logic).
//!
//! # Design
//!
//! The SyncImportStrategy focuses on orchestration, delegating:
//! - CSV parsing to `SyncReader` (iterator interface)
//! - Entry application to `LedgerEngine` (business logic)
//! - CSV output to `csv_format::write_summary_csv` (format handling)
//!
//! This separation of concerns makes the code more maintainable and testable.
//!
//! # Memory Efficiency
//!
//! This strategy maintains constant memory usage:
//! - Processes CSV rows one at a time (streaming via iterator)
//! - Does not load entire file into memory
//! - Memory usage is O(fee_records), not O(all_rows)

use crate::io::csv_format::write_summary_csv;
use crate::io::sync_reader::SyncReader;
use crate::ledger::LedgerEngine;
use crate::strategy::ImportStrategy;
use chrono::Utc;
use std::io::Write;
use std::path::Path;

/// Synchronous import strategy
///
/// Implements the ImportStrategy trait using single-threaded, synchronous
/// processing. Orchestrates the flow between CSV reading, entry application,
/// and summary output.
///
/// # Examples
///
/// ```no_run
/// use fee_ledger::strategy::{ImportStrategy, SyncImportStrategy};
/// use std::path::Path;
/// use std::io;
///
/// let strategy = SyncImportStrategy;
/// let mut output = io::stdout();
///
/// strategy.process(Path::new("ledger.csv"), &mut output)
///     .expect("Import failed");
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SyncImportStrategy;

impl ImportStrategy for SyncImportStrategy {
    /// Import entries from input file and write the summary to output
    ///
    /// This method orchestrates the complete synchronous import pipeline:
    /// 1. Creates a SyncReader to stream ledger entries from the CSV file
    /// 2. Creates a LedgerEngine to apply entries
    /// 3. Iterates through entries, applying each through the engine
    /// 4. Computes per-student summaries as of today
    /// 5. Writes the summary to output using csv_format::write_summary_csv
    ///
    /// # Error Handling
    ///
    /// Fatal errors (file not found, I/O errors) are returned immediately.
    /// Individual entry errors are logged as warnings and processing continues.
    fn process(&self, input_path: &Path, output: &mut dyn Write) -> Result<(), String> {
        let engine = LedgerEngine::default();

        let reader = SyncReader::new(input_path)?;

        // Apply one entry at a time; bad rows never abort the import
        for result in reader {
            match result {
                Ok(entry) => {
                    if let Err(e) = engine.apply(entry) {
                        tracing::warn!("Entry processing error: {}", e);
                    }
                }
                Err(e) => {
                    tracing::warn!("CSV parsing error: {}", e);
                }
            }
        }

        let summaries = engine.student_summaries(Utc::now().date_naive());
        write_summary_csv(&summaries, output)?;

        Ok(())
    }
}
