//! Synchronous CSV reader with iterator interface
//!
//! Provides a streaming iterator over ledger entries from a CSV file.
//! Delegates CSV format concerns to the csv_format module.
//!
//! # Design
//!
//! The SyncReader uses csv::Reader to read and deserialize CSV records sequentially,
//! delegating parsing and conversion to the csv_format module. It maintains streaming
//! behavior by processing CSV records one at a time without loading the entire file
//! into memory.
//!
//! # Iterator Interface
//!
//! SyncReader implements the Iterator trait, yielding Result<LedgerEntry, String>
//! for each CSV row. This allows for idiomatic Rust iteration patterns:
//!
//! ```no_run
//! use fee_ledger::io::sync_reader::SyncReader;
//! use std::path::Path;
//!
//! let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
//! for result in reader {
//!     match result {
//!         Ok(entry) => println!("Applying entry: {:?}", entry),
//!         Err(e) => eprintln!("Error: {}", e),
//!     }
//! }
//! ```
//!
//! # Error Handling
//!
//! - Fatal errors (file not found, I/O errors) are returned from `new()`
//! - Individual record parsing errors are yielded as Err variants in the iterator
//! - Line numbers are included in error messages for debugging
//!
//! # Memory Efficiency
//!
//! The reader maintains streaming behavior:
//! - Reads CSV records one at a time
//! - Does not load entire file into memory
//! - Memory usage is O(1) per record, not O(file_size)

use crate::io::csv_format::{convert_csv_record, LedgerCsvRecord};
use crate::types::LedgerEntry;
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::path::Path;

/// Synchronous CSV reader
///
/// Provides an iterator interface over ledger entries.
/// Maintains streaming behavior with constant memory usage.
///
/// # Examples
///
/// ```no_run
/// use fee_ledger::io::sync_reader::SyncReader;
/// use std::path::Path;
///
/// let reader = SyncReader::new(Path::new("ledger.csv")).unwrap();
/// let entries: Vec<_> = reader.filter_map(Result::ok).collect();
/// println!("Successfully parsed {} entries", entries.len());
/// ```
#[derive(Debug)]
pub struct SyncReader {
    reader: csv::Reader<File>,
    line_num: usize,
}

impl SyncReader {
    /// Create a new SyncReader from a file path
    ///
    /// Opens the CSV file and prepares it for streaming iteration.
    /// The CSV reader is configured to:
    /// - Trim whitespace from all fields
    /// - Allow flexible field counts (fee and payment rows use different columns)
    /// - Use an 8KB buffer for efficient I/O
    ///
    /// # Returns
    ///
    /// * `Ok(SyncReader)` if file opened successfully
    /// * `Err(String)` if file could not be opened
    pub fn new(path: &Path) -> Result<Self, String> {
        let file = File::open(path)
            .map_err(|e| format!("Failed to open file '{}': {}", path.display(), e))?;

        let reader = ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .buffer_capacity(8 * 1024)
            .from_reader(file);

        Ok(Self {
            reader,
            line_num: 0,
        })
    }
}

impl Iterator for SyncReader {
    type Item = Result<LedgerEntry, String>;

    /// Get the next ledger entry from the CSV file
    ///
    /// This method:
    /// 1. Reads the next CSV row and deserializes it to LedgerCsvRecord
    /// 2. Converts the record to a LedgerEntry using csv_format::convert_csv_record
    /// 3. Includes line numbers in error messages for debugging
    ///
    /// # Returns
    ///
    /// * `Some(Ok(LedgerEntry))` - Successfully parsed entry
    /// * `Some(Err(String))` - Parse or conversion error with line number
    /// * `None` - End of file reached
    fn next(&mut self) -> Option<Self::Item> {
        // Get next CSV record
        let mut deserializer = self.reader.deserialize::<LedgerCsvRecord>();

        match deserializer.next()? {
            Ok(csv_record) => {
                self.line_num += 1;
                // Add line number context to any conversion errors
                Some(
                    convert_csv_record(csv_record)
                        .map_err(|e| format!("Line {}: {}", self.line_num + 1, e)),
                )
            }
            Err(e) => {
                self.line_num += 1;
                Some(Err(format!(
                    "Line {}: CSV parse error: {}",
                    self.line_num + 1,
                    e
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PaymentMethod;
    use rust_decimal::Decimal;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "type,student,amount,description,due_date,method,reference\n";

    /// Helper function to create a temporary CSV file for testing
    fn create_temp_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().expect("Failed to create temp file");
        file.write_all(content.as_bytes())
            .expect("Failed to write to temp file");
        file.flush().expect("Failed to flush temp file");
        file
    }

    #[test]
    fn test_sync_reader_new_opens_file() {
        let csv_content = format!("{}fee,1,100.00,Tuition,2025-09-01,,\n", HEADER);
        let file = create_temp_csv(&csv_content);

        let result = SyncReader::new(file.path());
        assert!(result.is_ok());
    }

    #[test]
    fn test_sync_reader_new_fails_on_missing_file() {
        let result = SyncReader::new(Path::new("nonexistent.csv"));
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("Failed to open file"));
    }

    #[test]
    fn test_sync_reader_iterates_valid_fee() {
        let csv_content = format!("{}fee,1,100.00,Term 1 tuition,2025-09-01,,\n", HEADER);
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 1);
        match entries[0].as_ref().unwrap() {
            LedgerEntry::Fee(fee) => {
                assert_eq!(fee.student, 1);
                assert_eq!(fee.amount, Decimal::new(10000, 2));
                assert_eq!(fee.description, "Term 1 tuition");
            }
            other => panic!("expected fee entry, got {:?}", other),
        }
    }

    #[test]
    fn test_sync_reader_iterates_mixed_entries() {
        let csv_content = format!(
            "{}fee,1,100.00,Tuition,2025-09-01,,\n\
             payment,1,60.00,,,card,TXN-1\n\
             payment,1,40.00,,,cash,\n",
            HEADER
        );
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 3);
        assert!(entries.iter().all(Result::is_ok));

        match entries[1].as_ref().unwrap() {
            LedgerEntry::Payment(payment) => {
                assert_eq!(payment.method, PaymentMethod::Card);
                assert_eq!(payment.reference.as_deref(), Some("TXN-1"));
            }
            other => panic!("expected payment entry, got {:?}", other),
        }
        match entries[2].as_ref().unwrap() {
            LedgerEntry::Payment(payment) => {
                assert_eq!(payment.reference, None);
            }
            other => panic!("expected payment entry, got {:?}", other),
        }
    }

    #[test]
    fn test_sync_reader_handles_malformed_record() {
        let csv_content = format!("{}fee,1,invalid,Tuition,2025-09-01,,\n", HEADER);
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 1);
        assert!(entries[0].is_err());
        let error = entries[0].as_ref().unwrap_err();
        assert!(error.contains("Line 2"));
        assert!(error.contains("Invalid amount"));
    }

    #[test]
    fn test_sync_reader_includes_line_numbers_in_errors() {
        let csv_content = format!(
            "{}fee,1,100.00,Tuition,2025-09-01,,\n\
             fee,2,invalid,Tuition,2025-09-01,,\n\
             fee,3,50.00,Library,2025-09-01,,\n",
            HEADER
        );
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_ok());
        assert!(entries[1].is_err());
        assert!(entries[2].is_ok());

        let error = entries[1].as_ref().unwrap_err();
        assert!(error.contains("Line 3")); // Line 3 because of header
    }

    #[test]
    fn test_sync_reader_handles_whitespace() {
        let csv_content = format!(
            "{}  fee  ,  1  ,  100.00  ,  Tuition  ,  2025-09-01  ,,\n",
            HEADER
        );
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 1);
        match entries[0].as_ref().unwrap() {
            LedgerEntry::Fee(fee) => {
                assert_eq!(fee.student, 1);
                assert_eq!(fee.amount, Decimal::new(10000, 2));
            }
            other => panic!("expected fee entry, got {:?}", other),
        }
    }

    #[test]
    fn test_sync_reader_handles_empty_file_after_header() {
        let file = create_temp_csv(HEADER);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 0);
    }

    #[test]
    fn test_sync_reader_continues_after_error() {
        let csv_content = format!(
            "{}fee,1,100.00,Tuition,2025-09-01,,\n\
             refund,2,50.00,,,,\n\
             fee,3,75.00,Library,2025-09-01,,\n",
            HEADER
        );
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 3);
        assert!(entries[0].is_ok());
        assert!(entries[1].is_err());
        assert!(entries[2].is_ok());
    }

    #[test]
    fn test_sync_reader_filter_map_pattern() {
        let csv_content = format!(
            "{}fee,1,100.00,Tuition,2025-09-01,,\n\
             fee,2,invalid,Tuition,2025-09-01,,\n\
             fee,3,50.00,Library,2025-09-01,,\n",
            HEADER
        );
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let valid_entries: Vec<_> = reader.filter_map(Result::ok).collect();

        assert_eq!(valid_entries.len(), 2);
        assert_eq!(valid_entries[0].student(), 1);
        assert_eq!(valid_entries[1].student(), 3);
    }

    #[test]
    fn test_sync_reader_short_payment_rows() {
        // Payment rows may omit trailing columns entirely
        let csv_content = format!(
            "{}fee,1,100.00,Tuition,2025-09-01\npayment,1,60.00,,,card\n",
            HEADER
        );
        let file = create_temp_csv(&csv_content);

        let reader = SyncReader::new(file.path()).unwrap();
        let entries: Vec<_> = reader.collect();

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(Result::is_ok));
    }
}
