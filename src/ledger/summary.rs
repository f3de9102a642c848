//! Finance aggregation over the fee store
//!
//! Ledger-wide rollups for reporting: dashboard totals, status breakdowns,
//! and the per-student summary rows emitted by the import pipeline. All of
//! these work from a store snapshot and never hold locks across students.

use crate::ledger::fee_store::FeeStore;
use crate::ledger::status::derive_status;
use crate::types::{DashboardStats, Fee, FeeStatus, StudentId, StudentStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::HashMap;

/// One student's rolled-up position in the ledger
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentSummary {
    pub student: StudentId,
    pub total_due: Decimal,
    pub total_paid: Decimal,
    pub balance: Decimal,
    pub status: StudentStatus,
}

/// Total collected revenue: the amount paid of every fully settled fee
///
/// Partial payments on open fees do not count as revenue until the fee is
/// settled.
pub fn total_revenue(store: &FeeStore) -> Decimal {
    sum_fees(store, |fee| {
        if fee.status == FeeStatus::Paid {
            fee.amount_paid
        } else {
            Decimal::ZERO
        }
    })
}

/// Total outstanding money: the remaining balance of every open fee
pub fn total_pending(store: &FeeStore) -> Decimal {
    sum_fees(store, |fee| {
        if fee.is_outstanding() {
            fee.balance_due()
        } else {
            Decimal::ZERO
        }
    })
}

fn sum_fees<F>(store: &FeeStore, f: F) -> Decimal
where
    F: Fn(&Fee) -> Decimal,
{
    store
        .snapshot()
        .iter()
        .flat_map(|(_, fees)| fees.iter().map(&f))
        .sum()
}

/// Count students by derived status
///
/// Only statuses held by at least one student appear in the map.
pub fn count_by_status(store: &FeeStore, today: NaiveDate) -> HashMap<StudentStatus, usize> {
    let mut counts = HashMap::new();
    for (_, fees) in store.snapshot() {
        *counts.entry(derive_status(&fees, today)).or_insert(0) += 1;
    }
    counts
}

/// Headline numbers for the admin dashboard
pub fn dashboard_stats(store: &FeeStore) -> DashboardStats {
    let snapshot = store.snapshot();

    let mut total_revenue = Decimal::ZERO;
    let mut pending_fees = Decimal::ZERO;
    let mut paid_fees_count = 0;

    for (_, fees) in &snapshot {
        for fee in fees {
            if fee.status == FeeStatus::Paid {
                total_revenue += fee.amount_paid;
                paid_fees_count += 1;
            } else {
                pending_fees += fee.balance_due();
            }
        }
    }

    DashboardStats {
        total_revenue,
        pending_fees,
        paid_fees_count,
        total_students: snapshot.len(),
    }
}

/// Per-student summary rows, sorted by student id
pub fn student_summaries(store: &FeeStore, today: NaiveDate) -> Vec<StudentSummary> {
    let mut summaries: Vec<StudentSummary> = store
        .snapshot()
        .into_iter()
        .map(|(student, fees)| {
            let total_due: Decimal = fees.iter().map(|f| f.amount).sum();
            let total_paid: Decimal = fees.iter().map(|f| f.amount_paid).sum();
            StudentSummary {
                student,
                total_due,
                total_paid,
                balance: total_due - total_paid,
                status: derive_status(&fees, today),
            }
        })
        .collect();

    summaries.sort_by_key(|s| s.student);
    summaries
}
