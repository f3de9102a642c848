//! Fee Ledger Library
//! # Overview
//!
//! This library provides a fee ledger and payment allocation engine for a
//! school administration portal, with streaming CSV import in both a sync
//! and an async strategy
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Fee, PaymentRecord, errors, API views)
//! - [`cli`] - CLI arguments parsing
//! - [`ledger`] - Business logic components:
//!   - [`ledger::engine`] - Fee and payment orchestration
//!   - [`ledger::fee_store`] - Thread-safe fee record storage
//!   - [`ledger::payment_log`] - Payment reference deduplication
//!   - [`ledger::allocator`] - Oldest-due-first payment allocation
//!   - [`ledger::status`] - Derived per-student status
//!   - [`ledger::summary`] - Ledger-wide aggregation
//! - [`io`] - I/O handling with pluggable parsing strategies
//! - [`strategy`] - Sync and async import pipelines
//!
//! # Ledger Entries
//!
//! The import pipeline supports two entry types:
//!
//! - **Fee**: Create a fee record for a student (amount, description, due date)
//! - **Payment**: Allocate money across a student's outstanding fees,
//!   oldest due date first
//!
//! # Fee Records
//!
//! Each fee tracks:
//! - `amount`: The billed amount
//! - `amount_paid`: Cumulative money allocated so far
//! - `status`: pending, partial, or paid, derived from the two amounts
//! - `due_date`: Drives allocation order and overdue detection

// Module declarations
pub mod cli;
pub mod io;
pub mod ledger;
pub mod strategy;
pub mod types;

pub use io::write_summary_csv;
pub use ledger::{BatchProcessor, FeeStore, LedgerEngine, PaymentLog, StudentSummary};
pub use types::{
    Fee, FeeId, FeeStatus, LedgerEntry, LedgerError, NewFee, PaymentMethod, PaymentRecord,
    StudentId, StudentStatus,
};
