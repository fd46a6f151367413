pub mod allocator;
pub mod net_due;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::{Booking, PaidSnapshot};
use crate::config::ScheduleConfig;
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::events::{Event, EventStore};
use crate::ledger::PaymentLedger;
use crate::schedule::InstallmentSchedule;
use crate::types::{Category, InstallmentPart, PaymentMode};

pub use allocator::{allocate, allocate_detailed, SlotAllocation};
pub use net_due::{net_due, PartPosition};

/// one installment slot offered to the allocator
///
/// Carries everything the sort needs: the due date, the underlying booking
/// date for tie-breaking, and the plot number as the final deterministic key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenSlot {
    pub plot_no: String,
    pub receipt_no: String,
    pub booking_date: Option<NaiveDate>,
    pub part: InstallmentPart,
    pub gross: Money,
    /// amount already soaked up by earlier payments (spill-over)
    pub already_absorbed: Money,
    pub due_date: Option<NaiveDate>,
}

impl OpenSlot {
    pub fn net_due(&self) -> Money {
        (self.gross - self.already_absorbed).max(Money::ZERO)
    }

    /// build the open slots of one booking for one category
    ///
    /// Derives the schedule, spreads the cumulative paid amount over it with
    /// spill-over, and returns all three parts; the allocator drops the ones
    /// with nothing due.
    pub fn for_booking(
        booking: &Booking,
        paid: &PaidSnapshot,
        category: Category,
        config: &ScheduleConfig,
    ) -> Vec<OpenSlot> {
        let schedule = InstallmentSchedule::for_booking(booking, category, config);
        let positions = net_due(&schedule.gross_parts(), paid.paid(category));

        schedule
            .slots
            .iter()
            .zip(positions)
            .map(|(slot, pos)| OpenSlot {
                plot_no: booking.plot_no.clone(),
                receipt_no: booking.receipt_no.clone(),
                booking_date: booking.booking_date,
                part: slot.part,
                gross: slot.gross,
                already_absorbed: pos.absorbed,
                due_date: slot.due_date,
            })
            .collect()
    }
}

/// transient request to spread one lump payment across plots
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRequest {
    pub total_amount: Money,
    pub mode: PaymentMode,
}

impl AllocationRequest {
    pub fn new(total_amount: Money, mode: PaymentMode) -> Result<Self> {
        if !total_amount.is_positive() {
            return Err(EngineError::InvalidPaymentAmount {
                amount: total_amount,
            });
        }
        Ok(Self { total_amount, mode })
    }

    pub fn category(&self) -> Category {
        self.mode.category()
    }
}

/// proposed per-plot share of a lump payment; the caller persists these as
/// ledger rows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub plot_no: String,
    pub receipt_no: String,
    pub amount: Money,
    pub category: Category,
}

/// run the allocator over a set of bookings and announce the outcome
///
/// Gathers the open slots of every selected booking for the request's
/// category, allocates, and emits AllocationProposed (or AllocationUnmatched
/// when nothing was due anywhere).
pub fn propose_allocation(
    request: &AllocationRequest,
    bookings: &[&Booking],
    ledger: &PaymentLedger,
    config: &ScheduleConfig,
    events: &mut EventStore,
) -> Vec<AllocationResult> {
    let category = request.category();
    let mut candidates = Vec::new();
    for booking in bookings.iter().filter(|b| b.is_active()) {
        let paid = ledger.paid_snapshot(booking);
        candidates.extend(OpenSlot::for_booking(booking, &paid, category, config));
    }

    let results = allocate(request, &candidates, config);
    if results.is_empty() {
        events.emit(Event::AllocationUnmatched {
            total_amount: request.total_amount,
            category,
        });
    } else {
        events.emit(Event::AllocationProposed {
            total_amount: request.total_amount,
            category,
            plot_count: results.len(),
        });
    }
    results
}
