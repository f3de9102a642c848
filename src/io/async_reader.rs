//! Asynchronous CSV reader with stream interface
//!
//! Provides a streaming interface over ledger entries from a CSV file.
//! Supports batch reading for efficient async processing.
//!
//! # Design
//!
//! The AsyncReader uses:
//! - csv-async for streaming CSV parsing
//! - tokio for async runtime and concurrency primitives
//! - Batch reading for efficient processing
//!
//! # Architecture
//!
//! ```text
//! CSV Reader → AsyncReader → Batches of LedgerEntries
//!                  ↓
//!           csv_format module
//!           (LedgerCsvRecord, convert_csv_record)
//! ```

use crate::io::csv_format::{convert_csv_record, LedgerCsvRecord};
use crate::types::LedgerEntry;
use csv_async::AsyncReaderBuilder;
use futures::io::AsyncRead;
use futures::stream::StreamExt;

/// Asynchronous CSV reader
///
/// Provides batch reading interface over ledger entries.
/// Maintains streaming behavior with constant memory usage.
pub struct AsyncReader<R: AsyncRead + Unpin> {
    csv_reader: csv_async::AsyncDeserializer<R>,
}

impl<R: AsyncRead + Unpin + Send + 'static> AsyncReader<R> {
    /// Create a new AsyncReader from an async reader
    pub fn new(reader: R) -> Self {
        let csv_reader = AsyncReaderBuilder::new()
            .flexible(true)
            .trim(csv_async::Trim::All)
            .create_deserializer(reader);

        Self { csv_reader }
    }

    /// Read a batch of ledger entries
    ///
    /// This method reads up to `batch_size` rows from the CSV file,
    /// converting them to LedgerEntries. Invalid rows are logged as
    /// warnings and skipped.
    ///
    /// # Returns
    ///
    /// A vector of successfully converted entries.
    /// Returns an empty vector when the end of the file is reached.
    pub async fn read_batch(&mut self, batch_size: usize) -> Vec<LedgerEntry> {
        let mut batch = Vec::with_capacity(batch_size);
        let mut records = self.csv_reader.deserialize::<LedgerCsvRecord>();

        while batch.len() < batch_size {
            match records.next().await {
                Some(Ok(csv_record)) => match convert_csv_record(csv_record) {
                    Ok(entry) => batch.push(entry),
                    Err(e) => tracing::warn!("Record conversion error: {}", e),
                },
                Some(Err(e)) => tracing::warn!("CSV parse error: {}", e),
                None => break,
            }
        }

        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures::io::Cursor;
    use rust_decimal::Decimal;

    const HEADER: &str = "type,student,amount,description,due_date,method,reference\n";

    fn content(rows: &str) -> String {
        format!("{}{}", HEADER, rows)
    }

    #[tokio::test]
    async fn test_async_reader_read_batch() {
        let csv_content = content(
            "fee,1,100.00,Tuition,2025-09-01,,\n\
             payment,1,60.00,,,card,TXN-1\n\
             fee,2,200.00,Boarding,2025-09-01,,\n",
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 2);
        assert_eq!(batch[0].student(), 1);
        assert!(matches!(batch[0], LedgerEntry::Fee(_)));
        assert!(matches!(batch[1], LedgerEntry::Payment(_)));

        let batch = async_reader.read_batch(2).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].student(), 2);
    }

    #[tokio::test]
    async fn test_async_reader_empty_csv() {
        let reader = Cursor::new(HEADER.as_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 0);
    }

    #[tokio::test]
    async fn test_async_reader_invalid_record_skipped() {
        let csv_content = content(
            "refund,1,100.00,,,,\n\
             fee,1,50.00,Library,2025-09-01,,\n",
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        // First row fails conversion (unknown type), second succeeds
        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        match &batch[0] {
            LedgerEntry::Fee(fee) => assert_eq!(fee.amount, Decimal::new(5000, 2)),
            other => panic!("expected fee entry, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_async_reader_batch_size_larger_than_rows() {
        let csv_content = content("fee,1,100.00,Tuition,2025-09-01,,\n");
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(100).await;
        assert_eq!(batch.len(), 1);
    }

    #[tokio::test]
    async fn test_async_reader_multiple_batches() {
        let csv_content = content(
            "fee,1,100.00,Tuition,2025-09-01,,\n\
             fee,2,200.00,Tuition,2025-09-01,,\n\
             fee,3,300.00,Tuition,2025-09-01,,\n\
             fee,4,400.00,Tuition,2025-09-01,,\n\
             fee,5,500.00,Tuition,2025-09-01,,\n",
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch1 = async_reader.read_batch(2).await;
        assert_eq!(batch1.len(), 2);
        assert_eq!(batch1[0].student(), 1);
        assert_eq!(batch1[1].student(), 2);

        let batch2 = async_reader.read_batch(2).await;
        assert_eq!(batch2.len(), 2);
        assert_eq!(batch2[0].student(), 3);
        assert_eq!(batch2[1].student(), 4);

        let batch3 = async_reader.read_batch(2).await;
        assert_eq!(batch3.len(), 1);
        assert_eq!(batch3[0].student(), 5);

        let batch4 = async_reader.read_batch(2).await;
        assert_eq!(batch4.len(), 0);
    }

    #[tokio::test]
    async fn test_async_reader_whitespace_handling() {
        let csv_content = content("  fee  ,  1  ,  100.00  ,  Tuition  ,  2025-09-01  ,,\n");
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].student(), 1);
    }

    #[tokio::test]
    async fn test_async_reader_case_insensitive_type() {
        let csv_content = content(
            "FEE,1,100.00,Tuition,2025-09-01,,\n\
             Payment,1,50.00,,,CASH,\n",
        );
        let reader = Cursor::new(csv_content.into_bytes());
        let mut async_reader = AsyncReader::new(reader);

        let batch = async_reader.read_batch(10).await;
        assert_eq!(batch.len(), 2);
    }
}
