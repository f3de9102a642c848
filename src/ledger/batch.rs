//! Concurrent batch application of imported ledger entries
//!
//! Splits a batch of entries by student and applies each student's entries
//! on its own tokio task. Entries for one student keep their file order so
//! fees exist before the payments that settle them; different students
//! proceed in parallel.

use crate::ledger::engine::LedgerEngine;
use crate::types::{LedgerEntry, LedgerError, StudentId};
use std::collections::HashMap;
use std::sync::Arc;

/// Result of applying a single imported entry
#[derive(Debug)]
pub struct ImportResult {
    pub entry: LedgerEntry,
    pub result: Result<(), LedgerError>,
}

/// Applies batches of ledger entries concurrently, one task per student
#[derive(Debug, Clone)]
pub struct BatchProcessor {
    engine: Arc<LedgerEngine>,
}

impl BatchProcessor {
    pub fn new(engine: Arc<LedgerEngine>) -> Self {
        Self { engine }
    }

    /// Group entries by student, preserving order within each student
    fn partition_by_student(
        entries: Vec<LedgerEntry>,
    ) -> HashMap<StudentId, Vec<LedgerEntry>> {
        let mut partitioned: HashMap<StudentId, Vec<LedgerEntry>> = HashMap::new();
        for entry in entries {
            partitioned.entry(entry.student()).or_default().push(entry);
        }
        partitioned
    }

    /// Apply one student's entries in order
    async fn process_student_entries(
        engine: Arc<LedgerEngine>,
        entries: Vec<LedgerEntry>,
    ) -> Vec<ImportResult> {
        entries
            .into_iter()
            .map(|entry| {
                let result = engine.apply(entry.clone());
                ImportResult { entry, result }
            })
            .collect()
    }

    /// Apply a batch of entries, one spawned task per student
    ///
    /// Returns one `ImportResult` per entry. Entry-level failures are
    /// reported in the results, not returned as an error; only a panicked
    /// worker task is logged and its entries dropped from the results.
    pub async fn process_batch(&self, entries: Vec<LedgerEntry>) -> Vec<ImportResult> {
        let partitioned = Self::partition_by_student(entries);

        let mut handles = Vec::with_capacity(partitioned.len());
        for (student, student_entries) in partitioned {
            let engine = Arc::clone(&self.engine);
            handles.push((
                student,
                tokio::spawn(Self::process_student_entries(engine, student_entries)),
            ));
        }

        let mut results = Vec::new();
        for (student, handle) in handles {
            match handle.await {
                Ok(student_results) => results.extend(student_results),
                Err(error) => {
                    tracing::error!(student, %error, "batch worker task failed");
                }
            }
        }
        results
    }
}
