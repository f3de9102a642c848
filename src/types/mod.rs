//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `fee`: Fee records, fee status, per-student status
//! - `payment`: Payment records, methods, allocation outcomes
//! - `api`: Portal-facing request/response shapes
//! - `error`: Error types for the fee ledger

pub mod api;
pub mod error;
pub mod fee;
pub mod payment;

pub use api::{CreateFeeRequest, DashboardStats, FeeView, PaymentRequest, PaymentResponse};
pub use error::LedgerError;
pub use fee::{Fee, FeeId, FeeStatus, NewFee, StudentId, StudentStatus};
pub use payment::{AllocationOutcome, LedgerEntry, PaymentMethod, PaymentRecord, RecordedPayment};
