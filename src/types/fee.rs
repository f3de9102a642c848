//! Fee-related types for the fee ledger
//!
//! This module defines the Fee structure, its status model, and the derived
//! per-student status used by the dashboard.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::payment::PaymentMethod;

/// Student identifier
///
/// Supports student IDs from 0 to 4,294,967,295
pub type StudentId = u32;

/// Fee identifier
///
/// Assigned by the store at creation time and never reused.
pub type FeeId = Uuid;

/// Status of a single fee
///
/// Always a pure function of `amount_paid` versus `amount`. The status is
/// recomputed whenever a payment touches the fee and is never set directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeStatus {
    /// No payment has been applied yet
    Pending,

    /// Some payment applied, balance still outstanding
    Partial,

    /// The balance due has reached zero
    Paid,
}

impl FeeStatus {
    /// Derive the status from the paid and total amounts
    ///
    /// `paid` is expected to stay within `0..=amount`; callers enforce that
    /// invariant with checked arithmetic before recomputing the status.
    pub fn from_amounts(paid: Decimal, amount: Decimal) -> Self {
        if paid >= amount {
            FeeStatus::Paid
        } else if paid > Decimal::ZERO {
            FeeStatus::Partial
        } else {
            FeeStatus::Pending
        }
    }
}

/// Aggregate status of a student across all of their fees
///
/// Derived on demand from the student's fee records plus the current date,
/// never stored. Priority: NoDues, Overdue, Paid, Partial, Pending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudentStatus {
    /// No fee records on file
    NoDues,

    /// At least one fee with an outstanding balance past its due date
    Overdue,

    /// Every fee fully paid
    Paid,

    /// At least one fee partially paid, none overdue
    Partial,

    /// Fees exist but nothing has been paid
    Pending,
}

impl std::fmt::Display for StudentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            StudentStatus::NoDues => "no_dues",
            StudentStatus::Overdue => "overdue",
            StudentStatus::Paid => "paid",
            StudentStatus::Partial => "partial",
            StudentStatus::Pending => "pending",
        };
        f.write_str(s)
    }
}

/// A single fee record
///
/// `id`, `student`, `amount`, and `due_date` are fixed at creation.
/// `amount_paid` only ever grows, and `status` tracks it. The payment stamp
/// fields reflect the most recent allocation that touched this fee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    /// Fee identifier, assigned at creation
    pub id: FeeId,

    /// The student this fee belongs to
    pub student: StudentId,

    /// What the fee is for ("Term 1 tuition", "Lab deposit", ...)
    pub description: String,

    /// The full amount owed, fixed at creation and always positive
    pub amount: Decimal,

    /// Cumulative amount applied by payments, starts at zero
    pub amount_paid: Decimal,

    /// Calendar date the fee falls due
    pub due_date: NaiveDate,

    /// Current status, a pure function of `amount_paid` vs `amount`
    pub status: FeeStatus,

    /// When the most recent payment touched this fee
    pub paid_date: Option<DateTime<Utc>>,

    /// Method of the most recent payment touching this fee
    pub payment_method: Option<PaymentMethod>,

    /// Reference of the most recent payment touching this fee
    pub transaction_id: Option<String>,
}

impl Fee {
    /// Create a fresh fee with a new id and zero paid
    pub fn new(student: StudentId, description: String, amount: Decimal, due_date: NaiveDate) -> Self {
        Fee {
            id: Uuid::new_v4(),
            student,
            description,
            amount,
            amount_paid: Decimal::ZERO,
            due_date,
            status: FeeStatus::Pending,
            paid_date: None,
            payment_method: None,
            transaction_id: None,
        }
    }

    /// Amount still owed on this fee
    pub fn balance_due(&self) -> Decimal {
        self.amount - self.amount_paid
    }

    /// Whether any balance remains
    pub fn is_outstanding(&self) -> bool {
        self.balance_due() > Decimal::ZERO
    }
}

/// Input for creating a fee
///
/// Carries only the caller-supplied fields; the store assigns the id and
/// initializes the payment state.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewFee {
    pub student: StudentId,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}
