pub mod allocation;
pub mod booking;
pub mod config;
pub mod dates;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod ledger;
pub mod reports;
pub mod schedule;
pub mod types;

// re-export key types
pub use decimal::Money;
pub use errors::{EngineError, Result};
pub use events::{Event, EventStore};
pub use allocation::{
    allocate, net_due, propose_allocation, AllocationRequest, AllocationResult, OpenSlot,
    PartPosition,
};
pub use booking::{Booking, BookingStore, PaidSnapshot};
pub use config::ScheduleConfig;
pub use ledger::{Payment, PaymentDetails, PaymentLedger};
pub use reports::{
    excess_report, reconcile, BookingReconciliation, CustomerLedger, DuesFilter, DuesKind,
    DuesReport, Remediation,
};
pub use schedule::{InstallmentSchedule, InstallmentSlot};
pub use types::{BookingStatus, Category, InstallmentPart, PaymentMode, PlotStatus};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
