//! Ledger core: storage, allocation, status, and aggregation

pub mod allocator;
pub mod batch;
pub mod engine;
pub mod fee_store;
pub mod payment_log;
pub mod status;
pub mod summary;

pub use allocator::allocate_payment;
pub use batch::{BatchProcessor, ImportResult};
pub use engine::LedgerEngine;
pub use fee_store::FeeStore;
pub use payment_log::PaymentLog;
pub use status::derive_status;
pub use summary::{
    count_by_status, dashboard_stats, student_summaries, total_pending, total_revenue,
    StudentSummary,
};
