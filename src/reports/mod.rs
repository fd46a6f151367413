//! reporting views over bookings and the payment ledger

pub mod dues;
pub mod excess;
pub mod ledger_view;

pub use dues::{DueRow, DuesFilter, DuesKind, DuesReport};
pub use excess::{
    excess_report, reconcile, BalanceStatus, BookingReconciliation, CategoryPosition, Remediation,
};
pub use ledger_view::{CustomerLedger, LedgerRow, LedgerTotals};
