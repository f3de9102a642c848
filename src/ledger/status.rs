//! Student status derivation
//!
//! A student's status is a pure function of their fee records and the
//! current date. It is derived on demand rather than stored, so it can never
//! drift from the underlying fees.

use crate::types::{Fee, StudentStatus};
use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Derive a student's overall status from their fee records
///
/// Priority order: no records at all means `NoDues`; any outstanding fee
/// past its due date means `Overdue`. Otherwise the status comes from the
/// sums over all fees: nothing left to pay means `Paid`, money paid against
/// an open balance means `Partial`, and no payment made yet means `Pending`.
pub fn derive_status(fees: &[Fee], today: NaiveDate) -> StudentStatus {
    if fees.is_empty() {
        return StudentStatus::NoDues;
    }

    if fees
        .iter()
        .any(|f| f.is_outstanding() && f.due_date < today)
    {
        return StudentStatus::Overdue;
    }

    let total_paid: Decimal = fees.iter().map(|f| f.amount_paid).sum();
    let total_balance: Decimal = fees.iter().map(|f| f.balance_due()).sum();

    if total_balance <= Decimal::ZERO {
        return StudentStatus::Paid;
    }

    if total_paid > Decimal::ZERO {
        return StudentStatus::Partial;
    }

    StudentStatus::Pending
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FeeStatus;
    use rstest::rstest;

    const TODAY: (i32, u32, u32) = (2025, 6, 15);

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(TODAY.0, TODAY.1, TODAY.2).unwrap()
    }

    fn fee(amount: i64, paid: i64, year: i32, month: u32, day: u32) -> Fee {
        let mut f = Fee::new(
            1,
            "Tuition".to_string(),
            Decimal::new(amount, 2),
            NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        );
        f.amount_paid = Decimal::new(paid, 2);
        f.status = FeeStatus::from_amounts(f.amount_paid, f.amount);
        f
    }

    #[test]
    fn test_no_records_is_no_dues() {
        assert_eq!(derive_status(&[], today()), StudentStatus::NoDues);
    }

    #[rstest]
    #[case::unpaid_past_due(fee(10000, 0, 2025, 1, 1), StudentStatus::Overdue)]
    #[case::partial_past_due(fee(10000, 5000, 2025, 1, 1), StudentStatus::Overdue)]
    #[case::unpaid_future_due(fee(10000, 0, 2025, 12, 1), StudentStatus::Pending)]
    #[case::partial_future_due(fee(10000, 5000, 2025, 12, 1), StudentStatus::Partial)]
    #[case::fully_paid(fee(10000, 10000, 2025, 1, 1), StudentStatus::Paid)]
    fn test_single_fee_status(#[case] fee: Fee, #[case] expected: StudentStatus) {
        assert_eq!(derive_status(&[fee], today()), expected);
    }

    #[test]
    fn test_due_today_is_not_overdue() {
        let fees = vec![fee(10000, 0, TODAY.0, TODAY.1, TODAY.2)];
        assert_eq!(derive_status(&fees, today()), StudentStatus::Pending);
    }

    #[test]
    fn test_overdue_beats_partial_and_paid() {
        let fees = vec![
            fee(10000, 10000, 2025, 1, 1),
            fee(5000, 2500, 2025, 12, 1),
            fee(2000, 0, 2025, 2, 1),
        ];
        assert_eq!(derive_status(&fees, today()), StudentStatus::Overdue);
    }

    #[test]
    fn test_paid_overdue_fee_does_not_count() {
        // A fee settled after its due date is not overdue
        let fees = vec![fee(10000, 10000, 2025, 1, 1)];
        assert_eq!(derive_status(&fees, today()), StudentStatus::Paid);
    }

    #[test]
    fn test_partial_beats_pending() {
        let fees = vec![
            fee(10000, 0, 2025, 12, 1),
            fee(5000, 2500, 2025, 12, 1),
        ];
        assert_eq!(derive_status(&fees, today()), StudentStatus::Partial);
    }

    #[test]
    fn test_paid_fee_with_untouched_fee_is_partial() {
        // Money has been paid and money is still owed, so the student is
        // partial even though no single fee is
        let fees = vec![
            fee(10000, 10000, 2025, 1, 1),
            fee(5000, 0, 2025, 12, 1),
        ];
        assert_eq!(derive_status(&fees, today()), StudentStatus::Partial);
    }

    #[test]
    fn test_no_payment_yet_is_pending() {
        let fees = vec![
            fee(10000, 0, 2025, 12, 1),
            fee(5000, 0, 2026, 1, 1),
        ];
        assert_eq!(derive_status(&fees, today()), StudentStatus::Pending);
    }
}
