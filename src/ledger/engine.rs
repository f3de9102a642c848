//! Core ledger engine
//!
//! This module contains the `LedgerEngine` struct, the heart of the fee
//! ledger. Fee creation, payment recording, status queries, and reporting
//! all go through it.
//!
//! # Design
//!
//! The engine composes the fee store and the payment log behind `Arc`s, so
//! clones are cheap and share state. Payment recording is the one compound
//! operation: the reference is claimed in the payment log first, then the
//! money is allocated under the student's store lock, and a failed
//! allocation releases the claim so the reference can be retried.

use crate::ledger::allocator::allocate_payment;
use crate::ledger::fee_store::FeeStore;
use crate::ledger::payment_log::PaymentLog;
use crate::ledger::status::derive_status;
use crate::ledger::summary::{self, StudentSummary};
use crate::types::{
    AllocationOutcome, DashboardStats, Fee, FeeId, LedgerEntry, LedgerError, NewFee,
    PaymentRecord, RecordedPayment, StudentId, StudentStatus,
};
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

/// The fee ledger engine
///
/// Cloning produces a handle onto the same shared state.
#[derive(Debug, Clone)]
pub struct LedgerEngine {
    fee_store: Arc<FeeStore>,
    payment_log: Arc<PaymentLog>,
}

impl Default for LedgerEngine {
    fn default() -> Self {
        Self::new(Arc::new(FeeStore::new()), Arc::new(PaymentLog::new()))
    }
}

impl LedgerEngine {
    /// Create an engine over existing stores
    pub fn new(fee_store: Arc<FeeStore>, payment_log: Arc<PaymentLog>) -> Self {
        Self {
            fee_store,
            payment_log,
        }
    }

    /// Create a fee record for a student
    pub fn create_fee(&self, new_fee: NewFee) -> Result<Fee, LedgerError> {
        self.fee_store.insert(new_fee)
    }

    /// Look up a single fee by id
    pub fn fee(&self, fee_id: FeeId) -> Option<Fee> {
        self.fee_store.get(fee_id)
    }

    /// All fee records for a student
    ///
    /// An unknown student yields an empty list; absence of records is not an
    /// error for listing.
    pub fn list_fees(&self, student: StudentId) -> Vec<Fee> {
        self.fee_store.fees_for(student)
    }

    /// Delete a fee record
    ///
    /// Fees with payment history are refused.
    pub fn delete_fee(&self, fee_id: FeeId) -> Result<Fee, LedgerError> {
        self.fee_store.delete(fee_id)
    }

    /// Record a payment and allocate it across the student's fees
    ///
    /// The payment's reference is claimed before any fee is touched; a
    /// duplicate reference is rejected without changing the ledger. If the
    /// caller supplied no reference, one is generated, so only
    /// caller-supplied references participate in duplicate detection.
    ///
    /// # Returns
    ///
    /// * `Ok(AllocationOutcome)` - updated fees, unallocated remainder, and
    ///   the reference under which the payment was recorded
    /// * `Err(LedgerError::InvalidPaymentAmount)` - amount was zero or negative
    /// * `Err(LedgerError::StudentNotFound)` - student has no fee records
    /// * `Err(LedgerError::DuplicateReference)` - reference already recorded
    pub fn record_payment(
        &self,
        payment: PaymentRecord,
    ) -> Result<AllocationOutcome, LedgerError> {
        if payment.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_payment_amount(
                payment.student,
                payment.amount,
            ));
        }
        if !self.fee_store.has_student(payment.student) {
            return Err(LedgerError::student_not_found(payment.student));
        }

        let reference = payment
            .reference
            .clone()
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let now = Utc::now();

        self.payment_log.claim(
            &reference,
            RecordedPayment {
                student: payment.student,
                amount: payment.amount,
                method: payment.method,
                received_at: now,
            },
        )?;

        let outcome = self.fee_store.with_student_mut(payment.student, |fees| {
            allocate_payment(fees, payment.amount, payment.method, &reference, now)
        });

        match outcome {
            Ok(outcome) => Ok(outcome),
            Err(error) => {
                // Roll the claim back so the reference stays usable
                self.payment_log.release(&reference);
                Err(error)
            }
        }
    }

    /// Derived status for one student as of `today`
    ///
    /// A student with no fee records derives `NoDues`; absence of records is
    /// only an error on the payment path.
    pub fn student_status(&self, student: StudentId, today: NaiveDate) -> StudentStatus {
        derive_status(&self.fee_store.fees_for(student), today)
    }

    /// Headline ledger numbers
    pub fn dashboard(&self) -> DashboardStats {
        summary::dashboard_stats(&self.fee_store)
    }

    /// Per-student summary rows as of `today`, sorted by student id
    pub fn student_summaries(&self, today: NaiveDate) -> Vec<StudentSummary> {
        summary::student_summaries(&self.fee_store, today)
    }

    /// Apply one imported ledger entry
    ///
    /// Fee entries create records; payment entries are recorded and
    /// allocated, with any unallocated remainder logged as a warning since
    /// the batch caller has nowhere to return the money to.
    pub fn apply(&self, entry: LedgerEntry) -> Result<(), LedgerError> {
        match entry {
            LedgerEntry::Fee(new_fee) => {
                self.create_fee(new_fee)?;
                Ok(())
            }
            LedgerEntry::Payment(payment) => {
                let student = payment.student;
                let outcome = self.record_payment(payment)?;
                if outcome.remainder > Decimal::ZERO {
                    tracing::warn!(
                        student,
                        remainder = %outcome.remainder,
                        reference = %outcome.reference,
                        "payment exceeds outstanding fees, remainder unallocated"
                    );
                }
                Ok(())
            }
        }
    }
}
