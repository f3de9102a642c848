//! Thread-safe fee record storage
//!
//! This module provides the `FeeStore` struct, which holds every fee record
//! keyed by student using concurrent data structures to enable safe
//! multi-threaded access.
//!
//! # Design
//!
//! Fees are sharded by student: a `DashMap<StudentId, Vec<Fee>>` holds each
//! student's records, and a secondary `DashMap<FeeId, StudentId>` index maps
//! fee ids back to their owner for id-based lookups. Because all of a
//! student's fees live in one map entry, holding that entry is an exclusive
//! lock over the student's whole fee set. That is the unit of mutation the
//! allocator relies on: read, allocate, and write back happen under a single
//! entry lock.
//!
//! # Thread Safety
//!
//! All operations are thread-safe and prevent data races through DashMap's
//! internal synchronization. Operations on different students proceed in
//! parallel; operations on the same student are serialized.

use crate::types::{Fee, FeeId, LedgerError, NewFee, StudentId};
use dashmap::DashMap;
use rust_decimal::Decimal;

/// Thread-safe store of fee records, sharded by student
///
/// Multiple threads can safely work on different students simultaneously,
/// while all mutations of one student's fee set are serialized through the
/// student's map entry.
#[derive(Debug, Default)]
pub struct FeeStore {
    /// All fee records for each student, in creation order
    fees: DashMap<StudentId, Vec<Fee>>,

    /// Reverse index from fee id to the owning student
    index: DashMap<FeeId, StudentId>,
}

impl FeeStore {
    /// Create a new empty FeeStore
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fee record
    ///
    /// Validates that the amount is positive and the description non-empty,
    /// assigns a fresh fee id, and stores the record under the student.
    ///
    /// # Returns
    ///
    /// * `Ok(Fee)` - the stored fee, including its assigned id
    /// * `Err(LedgerError::InvalidFeeAmount)` - amount was zero or negative
    /// * `Err(LedgerError::MissingDescription)` - description was blank
    pub fn insert(&self, new_fee: NewFee) -> Result<Fee, LedgerError> {
        if new_fee.amount <= Decimal::ZERO {
            return Err(LedgerError::invalid_fee_amount(
                new_fee.student,
                new_fee.amount,
            ));
        }
        if new_fee.description.trim().is_empty() {
            return Err(LedgerError::missing_description(new_fee.student));
        }

        let fee = Fee::new(
            new_fee.student,
            new_fee.description,
            new_fee.amount,
            new_fee.due_date,
        );

        self.index.insert(fee.id, fee.student);
        self.fees
            .entry(fee.student)
            .or_default()
            .push(fee.clone());

        Ok(fee)
    }

    /// Look up a single fee by id
    ///
    /// Returns a snapshot clone; concurrent payments may change the stored
    /// record after this returns.
    pub fn get(&self, fee_id: FeeId) -> Option<Fee> {
        let student = *self.index.get(&fee_id)?;
        self.fees
            .get(&student)
            .and_then(|fees| fees.iter().find(|f| f.id == fee_id).cloned())
    }

    /// All fee records for a student, in creation order
    ///
    /// Returns an empty vector for students with no records. The result is a
    /// snapshot; no lock is held after the call returns.
    pub fn fees_for(&self, student: StudentId) -> Vec<Fee> {
        self.fees
            .get(&student)
            .map(|fees| fees.clone())
            .unwrap_or_default()
    }

    /// Whether the student has any fee records on file
    pub fn has_student(&self, student: StudentId) -> bool {
        self.fees
            .get(&student)
            .map(|fees| !fees.is_empty())
            .unwrap_or(false)
    }

    /// Number of distinct students holding fee records
    pub fn student_count(&self) -> usize {
        self.fees.iter().filter(|entry| !entry.value().is_empty()).count()
    }

    /// Snapshot of every student's fee records
    ///
    /// Used by the aggregation layer for full-ledger scans. Each entry is a
    /// clone taken while briefly holding that student's shard; the snapshot
    /// as a whole is not a point-in-time view across students.
    pub fn snapshot(&self) -> Vec<(StudentId, Vec<Fee>)> {
        self.fees
            .iter()
            .filter(|entry| !entry.value().is_empty())
            .map(|entry| (*entry.key(), entry.value().clone()))
            .collect()
    }

    /// Run a closure against a student's fee set under its entry lock
    ///
    /// This is the exclusive mutation path for payment allocation. The
    /// closure receives the student's full fee vector and holds the entry
    /// lock until it returns, so read-then-write sequences inside it are
    /// atomic with respect to other payments for the same student.
    ///
    /// # Returns
    ///
    /// * `Ok(T)` - whatever the closure returned
    /// * `Err(LedgerError::StudentNotFound)` - student has no fee records
    /// * `Err(...)` - the closure's error, stored state left as the closure
    ///   left it
    pub fn with_student_mut<T, F>(&self, student: StudentId, f: F) -> Result<T, LedgerError>
    where
        F: FnOnce(&mut Vec<Fee>) -> Result<T, LedgerError>,
    {
        match self.fees.get_mut(&student) {
            Some(mut entry) if !entry.value().is_empty() => f(entry.value_mut()),
            _ => Err(LedgerError::student_not_found(student)),
        }
    }

    /// Update a single fee with a closure
    ///
    /// The closure runs under the owning student's entry lock.
    ///
    /// # Returns
    ///
    /// * `Ok(Fee)` - post-update snapshot of the fee
    /// * `Err(LedgerError::FeeNotFound)` - no such fee id
    /// * `Err(...)` - the closure's error
    pub fn update<F>(&self, fee_id: FeeId, f: F) -> Result<Fee, LedgerError>
    where
        F: FnOnce(&mut Fee) -> Result<(), LedgerError>,
    {
        let student = self
            .index
            .get(&fee_id)
            .map(|entry| *entry)
            .ok_or_else(|| LedgerError::fee_not_found(fee_id))?;

        self.with_student_mut(student, |fees| {
            let fee = fees
                .iter_mut()
                .find(|f| f.id == fee_id)
                .ok_or_else(|| LedgerError::fee_not_found(fee_id))?;
            f(fee)?;
            Ok(fee.clone())
        })
    }

    /// Delete a fee record
    ///
    /// Fees that have payment history are never deleted; removing them would
    /// lose recorded money from the books.
    ///
    /// # Returns
    ///
    /// * `Ok(Fee)` - the removed fee
    /// * `Err(LedgerError::FeeNotFound)` - no such fee id
    /// * `Err(LedgerError::PaymentHistoryConflict)` - fee has `amount_paid > 0`
    pub fn delete(&self, fee_id: FeeId) -> Result<Fee, LedgerError> {
        let student = self
            .index
            .get(&fee_id)
            .map(|entry| *entry)
            .ok_or_else(|| LedgerError::fee_not_found(fee_id))?;

        let removed = self.with_student_mut(student, |fees| {
            let pos = fees
                .iter()
                .position(|f| f.id == fee_id)
                .ok_or_else(|| LedgerError::fee_not_found(fee_id))?;
            if fees[pos].amount_paid > Decimal::ZERO {
                return Err(LedgerError::payment_history_conflict(
                    fee_id,
                    fees[pos].amount_paid,
                ));
            }
            Ok(fees.remove(pos))
        })?;

        self.index.remove(&fee_id);
        Ok(removed)
    }
}
