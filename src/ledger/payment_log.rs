//! Thread-safe payment reference log
//!
//! Records every accepted payment under its reference string. The log doubles
//! as the idempotency barrier: claiming a reference that is already on file
//! fails, so a client retrying a payment submission cannot charge a student
//! twice.
//!
//! # Thread Safety
//!
//! Claim-or-reject is a single atomic operation on the reference's map entry,
//! so two concurrent submissions of the same reference race safely: exactly
//! one wins.

use crate::types::{LedgerError, RecordedPayment};
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

/// Thread-safe log of accepted payments, keyed by reference
#[derive(Debug, Default)]
pub struct PaymentLog {
    payments: DashMap<String, RecordedPayment>,
}

impl PaymentLog {
    /// Create a new empty PaymentLog
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim a payment reference
    ///
    /// First claim wins. A reference already on file is rejected with the
    /// student recorded for the original payment, and the stored record is
    /// left untouched.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - reference claimed and payment recorded
    /// * `Err(LedgerError::DuplicateReference)` - reference already on file
    pub fn claim(&self, reference: &str, payment: RecordedPayment) -> Result<(), LedgerError> {
        match self.payments.entry(reference.to_string()) {
            Entry::Occupied(existing) => Err(LedgerError::duplicate_reference(
                reference,
                existing.get().student,
            )),
            Entry::Vacant(slot) => {
                slot.insert(payment);
                Ok(())
            }
        }
    }

    /// Release a claimed reference
    ///
    /// Used to roll the claim back when allocation fails after the reference
    /// was reserved, so the caller can retry with the same reference.
    pub fn release(&self, reference: &str) {
        self.payments.remove(reference);
    }

    /// Look up a recorded payment by reference
    pub fn get(&self, reference: &str) -> Option<RecordedPayment> {
        self.payments.get(reference).map(|entry| entry.clone())
    }

    /// Number of payments on file
    pub fn len(&self) -> usize {
        self.payments.len()
    }

    /// Whether no payments are on file
    pub fn is_empty(&self) -> bool {
        self.payments.is_empty()
    }
}
