//! Payment allocation across a student's outstanding fees
//!
//! A payment is one amount for one student; the allocator decides how it
//! lands. Outstanding fees are settled oldest due date first (ties broken by
//! fee id so the order is stable), each fee absorbing up to its balance
//! before the remainder flows to the next. Anything left after every fee is
//! settled is returned to the caller as unallocated remainder.

use crate::types::{AllocationOutcome, Fee, FeeStatus, LedgerError, PaymentMethod};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Allocate a payment amount across a student's fees
///
/// Mutates the touched fees in place: `amount_paid` grows, `status` is
/// re-derived, and the payment's method, reference, and timestamp are
/// stamped onto each fee the money reached. Fees with no outstanding balance
/// are skipped.
///
/// The slice is expected to be one student's full fee set, held under that
/// student's store lock for the duration of the call.
///
/// # Returns
///
/// * `Ok(AllocationOutcome)` - clones of every updated fee, the unallocated
///   remainder, and the reference echoed back
/// * `Err(LedgerError::ArithmeticOverflow)` - a running total overflowed;
///   fees already touched keep their updates
pub fn allocate_payment(
    fees: &mut [Fee],
    amount: Decimal,
    method: PaymentMethod,
    reference: &str,
    now: DateTime<Utc>,
) -> Result<AllocationOutcome, LedgerError> {
    // Settle oldest due date first, fee id as the stable tie-break
    let mut order: Vec<usize> = (0..fees.len())
        .filter(|&i| fees[i].is_outstanding())
        .collect();
    order.sort_by_key(|&i| (fees[i].due_date, fees[i].id));

    let mut remaining = amount;
    let mut updated_fees = Vec::new();

    for i in order {
        if remaining <= Decimal::ZERO {
            break;
        }

        let fee = &mut fees[i];
        let applied = remaining.min(fee.balance_due());

        fee.amount_paid = fee
            .amount_paid
            .checked_add(applied)
            .ok_or_else(|| LedgerError::arithmetic_overflow("allocation", fee.student))?;
        fee.status = FeeStatus::from_amounts(fee.amount_paid, fee.amount);
        fee.paid_date = Some(now);
        fee.payment_method = Some(method);
        fee.transaction_id = Some(reference.to_string());

        remaining = remaining
            .checked_sub(applied)
            .ok_or_else(|| LedgerError::arithmetic_overflow("allocation", fee.student))?;

        updated_fees.push(fee.clone());
    }

    Ok(AllocationOutcome {
        updated_fees,
        remainder: remaining,
        reference: reference.to_string(),
    })
}
