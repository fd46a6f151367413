use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::allocation::AllocationResult;
use crate::booking::{Booking, PaidSnapshot};
use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::events::{Event, EventStore};
use crate::types::{Category, PaymentMode};

/// one ledger row; immutable once written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub receipt_no: String,
    pub plot_no: String,
    pub amount: Money,
    pub category: Category,
    pub mode: PaymentMode,
    pub date: NaiveDate,
    pub reference: Option<String>,
    pub recorded_by: Option<String>,
}

/// shared fields of a payment entry, supplied once for a whole allocation
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentDetails {
    pub date: NaiveDate,
    pub mode: PaymentMode,
    pub reference: Option<String>,
    pub recorded_by: Option<String>,
}

/// append-only payment ledger
///
/// Rows are only ever appended; cancelling a booking leaves its payment
/// history untouched. Every derived figure (paid, net due, excess) is
/// recomputed from this stream plus the booking's token.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentLedger {
    entries: Vec<Payment>,
}

impl PaymentLedger {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn entries(&self) -> &[Payment] {
        &self.entries
    }

    /// append one payment; the category follows from the mode
    pub fn record(
        &mut self,
        booking: &Booking,
        amount: Money,
        details: &PaymentDetails,
        events: &mut EventStore,
    ) -> Result<Uuid> {
        if !amount.is_positive() {
            return Err(EngineError::InvalidPaymentAmount { amount });
        }

        let payment = Payment {
            id: Uuid::new_v4(),
            receipt_no: booking.receipt_no.clone(),
            plot_no: booking.plot_no.clone(),
            amount,
            category: details.mode.category(),
            mode: details.mode,
            date: details.date,
            reference: details.reference.clone(),
            recorded_by: details.recorded_by.clone(),
        };
        events.emit(Event::PaymentRecorded {
            payment_id: payment.id,
            receipt_no: payment.receipt_no.clone(),
            plot_no: payment.plot_no.clone(),
            amount,
            category: payment.category,
            mode: payment.mode,
            date: payment.date,
        });
        let id = payment.id;
        self.entries.push(payment);
        Ok(id)
    }

    /// persist an allocator output as one ledger row per plot
    ///
    /// All-or-nothing: every allocation is resolved and validated before the
    /// first row or event is written, so a failure never leaves the
    /// append-only stream half-written.
    pub fn persist_allocation(
        &mut self,
        bookings: &[Booking],
        allocations: &[AllocationResult],
        details: &PaymentDetails,
        events: &mut EventStore,
    ) -> Result<Vec<Uuid>> {
        let mut resolved = Vec::with_capacity(allocations.len());
        for alloc in allocations {
            let booking = bookings
                .iter()
                .find(|b| b.receipt_no == alloc.receipt_no)
                .ok_or_else(|| EngineError::UnknownBooking {
                    receipt_no: alloc.receipt_no.clone(),
                })?;
            if !alloc.amount.is_positive() {
                return Err(EngineError::InvalidPaymentAmount {
                    amount: alloc.amount,
                });
            }
            resolved.push((booking, alloc.amount));
        }

        let mut ids = Vec::with_capacity(resolved.len());
        for (booking, amount) in resolved {
            ids.push(self.record(booking, amount, details, events)?);
        }
        Ok(ids)
    }

    /// sum of ledger payments for one booking and category; the token amount
    /// is not a ledger row and is folded in by paid_snapshot
    pub fn category_paid(&self, receipt_no: &str, category: Category) -> Money {
        self.entries
            .iter()
            .filter(|p| p.receipt_no == receipt_no)
            .filter(|p| match category {
                Category::BR => true,
                other => p.category == other,
            })
            .map(|p| p.amount)
            .sum()
    }

    /// cumulative paid position of a booking: token plus ledger stream
    pub fn paid_snapshot(&self, booking: &Booking) -> PaidSnapshot {
        let mut snap = PaidSnapshot::default();
        match booking.token_mode.category() {
            Category::CR => snap.cr_paid += booking.token_amount,
            _ => snap.rr_paid += booking.token_amount,
        }
        snap.rr_paid += self.category_paid(&booking.receipt_no, Category::RR);
        snap.cr_paid += self.category_paid(&booking.receipt_no, Category::CR);
        snap
    }
}
