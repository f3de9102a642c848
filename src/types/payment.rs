//! Payment-related types for the fee ledger
//!
//! Defines the payment input record, the recorded payment kept for duplicate
//! detection, the allocation outcome returned to callers, and the ledger
//! entry enum used by the CSV import pipeline.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::fee::{Fee, NewFee, StudentId};

/// How a payment was made
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    Cash,
    Card,
    BankTransfer,
    Cheque,
    Online,
}

impl FromStr for PaymentMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cash" => Ok(PaymentMethod::Cash),
            "card" => Ok(PaymentMethod::Card),
            "bank_transfer" => Ok(PaymentMethod::BankTransfer),
            "cheque" => Ok(PaymentMethod::Cheque),
            "online" => Ok(PaymentMethod::Online),
            other => Err(format!("Invalid payment method: '{}'", other)),
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Card => "card",
            PaymentMethod::BankTransfer => "bank_transfer",
            PaymentMethod::Cheque => "cheque",
            PaymentMethod::Online => "online",
        };
        f.write_str(s)
    }
}

/// A payment to be allocated across a student's fees
///
/// The reference is optional; when absent the engine generates one. A
/// caller-supplied reference that was already recorded is rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRecord {
    /// The student the payment is for
    pub student: StudentId,

    /// Amount received, must be positive
    pub amount: Decimal,

    /// How the payment was made
    pub method: PaymentMethod,

    /// External payment reference, if the caller has one
    pub reference: Option<String>,
}

/// A payment accepted into the ledger, kept keyed by reference
///
/// Stored so that a replayed reference can be detected and rejected.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedPayment {
    pub student: StudentId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub received_at: DateTime<Utc>,
}

/// Result of allocating one payment
///
/// `updated_fees` holds post-allocation snapshots of every fee the payment
/// touched, in allocation order. `remainder` is whatever was left after all
/// outstanding fees were settled; it is surfaced, never discarded.
#[derive(Debug, Clone, PartialEq)]
pub struct AllocationOutcome {
    pub updated_fees: Vec<Fee>,
    pub remainder: Decimal,
    pub reference: String,
}

/// One row of the import ledger, either a fee or a payment
#[derive(Debug, Clone, PartialEq)]
pub enum LedgerEntry {
    Fee(NewFee),
    Payment(PaymentRecord),
}

impl LedgerEntry {
    /// The student this entry applies to
    pub fn student(&self) -> StudentId {
        match self {
            LedgerEntry::Fee(fee) => fee.student,
            LedgerEntry::Payment(payment) => payment.student,
        }
    }
}
