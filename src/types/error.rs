//! Error types for the fee ledger
//!
//! This module defines all error types that can occur while maintaining fee
//! records and allocating payments. Errors are designed to be descriptive and
//! user-friendly for CLI and API output.
//!
//! # Error Categories
//!
//! - **File I/O Errors**: File not found, permission denied, etc.
//! - **CSV Parsing Errors**: Malformed CSV, invalid data types, etc.
//! - **Validation Errors**: Non-positive amounts, missing description, etc.
//! - **Conflict Errors**: Duplicate payment references, deleting fees with
//!   payment history
//! - **Arithmetic Errors**: Overflow in balance calculations

use rust_decimal::Decimal;
use thiserror::Error;

use super::fee::{FeeId, StudentId};

/// Main error type for the fee ledger
///
/// This enum represents all possible errors that can occur during fee and
/// payment processing. Each variant includes relevant context to help
/// diagnose and resolve the issue.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// I/O error occurred while reading or writing files
    ///
    /// This is typically a fatal error (file permissions, disk full, etc.).
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// CSV parsing error occurred
    ///
    /// This is a recoverable error - the malformed record is skipped
    /// and processing continues with the next record.
    #[error("CSV parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// Fee amount is zero or negative
    ///
    /// Fee amounts are fixed at creation and must be positive.
    #[error("Fee amount must be positive for student {student}, got {amount}")]
    InvalidFeeAmount {
        /// Student the fee was being created for
        student: StudentId,
        /// The rejected amount
        amount: Decimal,
    },

    /// Fee description is empty
    #[error("Fee for student {student} requires a description")]
    MissingDescription {
        /// Student the fee was being created for
        student: StudentId,
    },

    /// Payment amount is zero or negative
    #[error("Payment amount must be positive for student {student}, got {amount}")]
    InvalidPaymentAmount {
        /// Student the payment was for
        student: StudentId,
        /// The rejected amount
        amount: Decimal,
    },

    /// Student has no fee records on file
    ///
    /// Payments and status queries require the student to exist in the
    /// ledger; this is the not-found case.
    #[error("Student {student} has no fee records")]
    StudentNotFound {
        /// The unknown student
        student: StudentId,
    },

    /// Fee does not exist
    #[error("Fee {fee} not found")]
    FeeNotFound {
        /// The fee id that was not found
        fee: FeeId,
    },

    /// Fee has payment history and cannot be deleted
    ///
    /// Deleting a fee with recorded payments would silently lose money
    /// from the books, so the delete is rejected.
    #[error("Fee {fee} has {amount_paid} already paid and cannot be deleted")]
    PaymentHistoryConflict {
        /// The fee that was targeted
        fee: FeeId,
        /// How much has been paid against it
        amount_paid: Decimal,
    },

    /// Payment reference was already recorded
    ///
    /// Replaying the same reference would double-apply the payment, so the
    /// duplicate is rejected.
    #[error("Payment reference '{reference}' already recorded for student {student}")]
    DuplicateReference {
        /// The duplicated reference
        reference: String,
        /// Student of the original payment
        student: StudentId,
    },

    /// Arithmetic overflow would occur
    ///
    /// The allocation is rejected to maintain ledger integrity.
    #[error("Arithmetic overflow in {operation} for student {student}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: String,
        /// Student whose fees were being updated
        student: StudentId,
    },
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error to LedgerError
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        // Extract line number if available
        let line = error.position().map(|pos| pos.line());

        LedgerError::ParseError {
            line,
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create an InvalidFeeAmount error
    pub fn invalid_fee_amount(student: StudentId, amount: Decimal) -> Self {
        LedgerError::InvalidFeeAmount { student, amount }
    }

    /// Create a MissingDescription error
    pub fn missing_description(student: StudentId) -> Self {
        LedgerError::MissingDescription { student }
    }

    /// Create an InvalidPaymentAmount error
    pub fn invalid_payment_amount(student: StudentId, amount: Decimal) -> Self {
        LedgerError::InvalidPaymentAmount { student, amount }
    }

    /// Create a StudentNotFound error
    pub fn student_not_found(student: StudentId) -> Self {
        LedgerError::StudentNotFound { student }
    }

    /// Create a FeeNotFound error
    pub fn fee_not_found(fee: FeeId) -> Self {
        LedgerError::FeeNotFound { fee }
    }

    /// Create a PaymentHistoryConflict error
    pub fn payment_history_conflict(fee: FeeId, amount_paid: Decimal) -> Self {
        LedgerError::PaymentHistoryConflict { fee, amount_paid }
    }

    /// Create a DuplicateReference error
    pub fn duplicate_reference(reference: &str, student: StudentId) -> Self {
        LedgerError::DuplicateReference {
            reference: reference.to_string(),
            student,
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &str, student: StudentId) -> Self {
        LedgerError::ArithmeticOverflow {
            operation: operation.to_string(),
            student,
        }
    }
}
