//! CSV format handling for ledger entries and summary output
//!
//! This module centralizes all CSV format concerns, providing:
//! - LedgerCsvRecord structure for deserialization
//! - Conversion from CSV records to domain types
//! - Per-student summary serialization
//!
//! All functions are pure (no I/O) for easy testing.

use crate::ledger::StudentSummary;
use crate::types::{LedgerEntry, NewFee, PaymentMethod, PaymentRecord, StudentId};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Write;
use std::str::FromStr;

/// CSV record structure for deserialization
///
/// Matches the input CSV format with columns:
/// type, student, amount, description, due_date, method, reference
/// Every column after `student` is optional because fee and payment rows
/// each use a different subset.
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct LedgerCsvRecord {
    #[serde(rename = "type")]
    pub entry_type: String,
    pub student: StudentId,
    pub amount: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<String>,
    pub method: Option<String>,
    pub reference: Option<String>,
}

/// Convert a LedgerCsvRecord to a LedgerEntry
///
/// Fee rows require an amount, a description, and a `YYYY-MM-DD` due date.
/// Payment rows require an amount and a method; the reference is optional.
///
/// # Returns
///
/// Result containing either:
/// - Ok(LedgerEntry) - Successfully converted record
/// - Err(String) - Error message describing the conversion failure
pub fn convert_csv_record(csv_record: LedgerCsvRecord) -> Result<LedgerEntry, String> {
    let student = csv_record.student;

    let amount = match csv_record.amount {
        Some(amount_str) if !amount_str.trim().is_empty() => {
            Decimal::from_str(amount_str.trim())
                .map_err(|_| format!("Invalid amount '{}' for student {}", amount_str, student))?
        }
        _ => {
            return Err(format!(
                "{} row for student {} requires an amount",
                csv_record.entry_type, student
            ))
        }
    };

    match csv_record.entry_type.to_lowercase().as_str() {
        "fee" => {
            let description = match csv_record.description {
                Some(description) if !description.trim().is_empty() => {
                    description.trim().to_string()
                }
                _ => {
                    return Err(format!(
                        "Fee row for student {} requires a description",
                        student
                    ))
                }
            };

            let due_date = match csv_record.due_date {
                Some(date_str) if !date_str.trim().is_empty() => {
                    NaiveDate::parse_from_str(date_str.trim(), "%Y-%m-%d").map_err(|_| {
                        format!(
                            "Invalid due date '{}' for student {}",
                            date_str, student
                        )
                    })?
                }
                _ => {
                    return Err(format!(
                        "Fee row for student {} requires a due date",
                        student
                    ))
                }
            };

            Ok(LedgerEntry::Fee(NewFee {
                student,
                description,
                amount,
                due_date,
            }))
        }
        "payment" => {
            let method = match csv_record.method {
                Some(method_str) if !method_str.trim().is_empty() => {
                    PaymentMethod::from_str(method_str.trim())
                        .map_err(|e| format!("{} for student {}", e, student))?
                }
                _ => {
                    return Err(format!(
                        "Payment row for student {} requires a method",
                        student
                    ))
                }
            };

            let reference = csv_record
                .reference
                .filter(|r| !r.trim().is_empty())
                .map(|r| r.trim().to_string());

            Ok(LedgerEntry::Payment(PaymentRecord {
                student,
                amount,
                method,
                reference,
            }))
        }
        other => Err(format!(
            "Invalid entry type: '{}' for student {}",
            other, student
        )),
    }
}

/// Write per-student summaries to CSV format
///
/// Writes summaries with columns: student, total_due, total_paid, balance, status
/// Rows are sorted by student id for deterministic output, amounts always
/// carry two decimal places.
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(String)` if a write error occurred
pub fn write_summary_csv(
    summaries: &[StudentSummary],
    output: &mut dyn Write,
) -> Result<(), String> {
    use csv::Writer;

    let mut writer = Writer::from_writer(output);

    writer
        .write_record(["student", "total_due", "total_paid", "balance", "status"])
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    let mut sorted_summaries = summaries.to_vec();
    sorted_summaries.sort_by_key(|summary| summary.student);

    for summary in sorted_summaries {
        writer
            .write_record(&[
                summary.student.to_string(),
                format!("{:.2}", summary.total_due),
                format!("{:.2}", summary.total_paid),
                format!("{:.2}", summary.balance),
                summary.status.to_string(),
            ])
            .map_err(|e| format!("Failed to write summary record: {}", e))?;
    }

    writer
        .flush()
        .map_err(|e| format!("Failed to flush output: {}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StudentStatus;
    use rstest::rstest;
    use rust_decimal::Decimal;

    fn record(
        entry_type: &str,
        amount: Option<&str>,
        description: Option<&str>,
        due_date: Option<&str>,
        method: Option<&str>,
        reference: Option<&str>,
    ) -> LedgerCsvRecord {
        LedgerCsvRecord {
            entry_type: entry_type.to_string(),
            student: 1,
            amount: amount.map(String::from),
            description: description.map(String::from),
            due_date: due_date.map(String::from),
            method: method.map(String::from),
            reference: reference.map(String::from),
        }
    }

    #[rstest]
    #[case("fee")]
    #[case("FEE")] // case insensitive
    #[case("Fee")]
    fn test_convert_fee_row(#[case] entry_type: &str) {
        let csv_record = record(
            entry_type,
            Some("100.00"),
            Some("Term 1 tuition"),
            Some("2025-09-01"),
            None,
            None,
        );

        let entry = convert_csv_record(csv_record).unwrap();
        match entry {
            LedgerEntry::Fee(fee) => {
                assert_eq!(fee.student, 1);
                assert_eq!(fee.amount, Decimal::new(10000, 2));
                assert_eq!(fee.description, "Term 1 tuition");
                assert_eq!(
                    fee.due_date,
                    NaiveDate::from_ymd_opt(2025, 9, 1).unwrap()
                );
            }
            other => panic!("expected fee entry, got {:?}", other),
        }
    }

    #[rstest]
    #[case(Some("TXN-001"), Some("TXN-001"))]
    #[case(Some("  TXN-001  "), Some("TXN-001"))] // whitespace trimming
    #[case(Some(""), None)]
    #[case(None, None)]
    fn test_convert_payment_row(
        #[case] reference: Option<&str>,
        #[case] expected_reference: Option<&str>,
    ) {
        let csv_record = record(
            "payment",
            Some("50.00"),
            None,
            None,
            Some("card"),
            reference,
        );

        let entry = convert_csv_record(csv_record).unwrap();
        match entry {
            LedgerEntry::Payment(payment) => {
                assert_eq!(payment.student, 1);
                assert_eq!(payment.amount, Decimal::new(5000, 2));
                assert_eq!(payment.method, PaymentMethod::Card);
                assert_eq!(payment.reference.as_deref(), expected_reference);
            }
            other => panic!("expected payment entry, got {:?}", other),
        }
    }

    #[rstest]
    #[case::invalid_type(
        record("refund", Some("10.00"), None, None, None, None),
        "Invalid entry type"
    )]
    #[case::missing_amount(
        record("fee", None, Some("Tuition"), Some("2025-09-01"), None, None),
        "requires an amount"
    )]
    #[case::empty_amount(
        record("fee", Some("  "), Some("Tuition"), Some("2025-09-01"), None, None),
        "requires an amount"
    )]
    #[case::bad_amount(
        record("fee", Some("lots"), Some("Tuition"), Some("2025-09-01"), None, None),
        "Invalid amount"
    )]
    #[case::fee_missing_description(
        record("fee", Some("10.00"), None, Some("2025-09-01"), None, None),
        "requires a description"
    )]
    #[case::fee_missing_due_date(
        record("fee", Some("10.00"), Some("Tuition"), None, None, None),
        "requires a due date"
    )]
    #[case::fee_bad_due_date(
        record("fee", Some("10.00"), Some("Tuition"), Some("01/09/2025"), None, None),
        "Invalid due date"
    )]
    #[case::payment_missing_method(
        record("payment", Some("10.00"), None, None, None, None),
        "requires a method"
    )]
    #[case::payment_bad_method(
        record("payment", Some("10.00"), None, None, Some("barter"), None),
        "Invalid payment method"
    )]
    fn test_convert_csv_record_errors(
        #[case] csv_record: LedgerCsvRecord,
        #[case] expected_error: &str,
    ) {
        let result = convert_csv_record(csv_record);
        assert!(result.is_err());
        assert!(result.unwrap_err().contains(expected_error));
    }

    #[rstest]
    #[case("  100.00  ", Decimal::new(10000, 2))] // whitespace trimming
    #[case("100.5", Decimal::new(1005, 1))]
    fn test_amount_parsing(#[case] amount_str: &str, #[case] expected: Decimal) {
        let csv_record = record(
            "payment",
            Some(amount_str),
            None,
            None,
            Some("cash"),
            None,
        );

        match convert_csv_record(csv_record).unwrap() {
            LedgerEntry::Payment(payment) => assert_eq!(payment.amount, expected),
            other => panic!("expected payment entry, got {:?}", other),
        }
    }

    fn summary(
        student: StudentId,
        due: i64,
        paid: i64,
        status: StudentStatus,
    ) -> StudentSummary {
        StudentSummary {
            student,
            total_due: Decimal::new(due, 2),
            total_paid: Decimal::new(paid, 2),
            balance: Decimal::new(due - paid, 2),
            status,
        }
    }

    #[rstest]
    #[case::single_student(
        vec![summary(1, 15000, 12000, StudentStatus::Partial)],
        "student,total_due,total_paid,balance,status\n1,150.00,120.00,30.00,partial\n"
    )]
    #[case::sorted_by_student(
        vec![
            summary(3, 2000, 0, StudentStatus::Pending),
            summary(1, 10000, 10000, StudentStatus::Paid),
        ],
        "student,total_due,total_paid,balance,status\n1,100.00,100.00,0.00,paid\n3,20.00,0.00,20.00,pending\n"
    )]
    #[case::overdue_status(
        vec![summary(2, 5000, 0, StudentStatus::Overdue)],
        "student,total_due,total_paid,balance,status\n2,50.00,0.00,50.00,overdue\n"
    )]
    #[case::empty(
        vec![],
        "student,total_due,total_paid,balance,status\n"
    )]
    fn test_write_summary_csv(
        #[case] summaries: Vec<StudentSummary>,
        #[case] expected_output: &str,
    ) {
        let mut output = Vec::new();
        let result = write_summary_csv(&summaries, &mut output);
        assert!(result.is_ok());

        let output_str = String::from_utf8(output).unwrap();
        assert_eq!(output_str, expected_output);
    }
}
