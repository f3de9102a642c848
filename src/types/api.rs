//! Portal-facing request and response shapes
//!
//! The school portal's controllers exchange JSON bodies with camelCase field
//! names; these serde types pin that wire format down in one place. No HTTP
//! server lives in this crate, the shapes are just the contract.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::fee::{Fee, FeeId, FeeStatus, StudentId};
use super::payment::{AllocationOutcome, PaymentMethod, PaymentRecord};

/// Body of a fee creation request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFeeRequest {
    pub student: StudentId,
    pub description: String,
    pub amount: Decimal,
    pub due_date: NaiveDate,
}

/// Body of a payment request
///
/// `transaction_id` is the caller's external reference; the engine generates
/// one when it is omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub student: StudentId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl From<PaymentRequest> for PaymentRecord {
    fn from(req: PaymentRequest) -> Self {
        PaymentRecord {
            student: req.student,
            amount: req.amount,
            method: req.method,
            reference: req.transaction_id,
        }
    }
}

/// A fee as presented to the portal, with the derived balance included
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeView {
    pub id: FeeId,
    pub student: StudentId,
    pub description: String,
    pub amount: Decimal,
    pub amount_paid: Decimal,
    pub balance_due: Decimal,
    pub due_date: NaiveDate,
    pub status: FeeStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paid_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
}

impl From<&Fee> for FeeView {
    fn from(fee: &Fee) -> Self {
        FeeView {
            id: fee.id,
            student: fee.student,
            description: fee.description.clone(),
            amount: fee.amount,
            amount_paid: fee.amount_paid,
            balance_due: fee.balance_due(),
            due_date: fee.due_date,
            status: fee.status,
            paid_date: fee.paid_date,
            payment_method: fee.payment_method,
            transaction_id: fee.transaction_id.clone(),
        }
    }
}

/// Response to a payment request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub updated_fees: Vec<FeeView>,
    pub remainder: Decimal,
    pub transaction_id: String,
}

impl From<AllocationOutcome> for PaymentResponse {
    fn from(outcome: AllocationOutcome) -> Self {
        PaymentResponse {
            updated_fees: outcome.updated_fees.iter().map(FeeView::from).collect(),
            remainder: outcome.remainder,
            transaction_id: outcome.reference,
        }
    }
}

/// Headline numbers for the finance dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of amounts paid on fully paid fees
    pub total_revenue: Decimal,

    /// Sum of balances still due on pending and partial fees
    pub pending_fees: Decimal,

    /// Number of fully paid fee records
    pub paid_fees_count: usize,

    /// Number of distinct students with fee records
    pub total_students: usize,
}
