use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{EngineError, Result};
use crate::events::{Event, EventStore};
use crate::types::{BookingStatus, Category, PaymentMode, PlotStatus};

/// a confirmed plot booking
///
/// Core fields are set at creation and never change; only the status moves,
/// Active → Cancelled. CR is derived as BR − RR at construction so the
/// category split invariant cannot be violated later.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub receipt_no: String,
    pub plot_no: String,
    pub customer_id: String,
    pub customer_name: String,
    pub phone: Option<String>,
    /// None when the recorded date string could not be parsed
    pub booking_date: Option<NaiveDate>,
    pub br_amount: Money,
    pub rr_amount: Money,
    pub cr_amount: Money,
    /// token collected at booking time, attributed by its mode
    pub token_amount: Money,
    pub token_mode: PaymentMode,
    pub status: BookingStatus,
}

impl Booking {
    /// create a booking, deriving CR = BR − RR
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        receipt_no: impl Into<String>,
        plot_no: impl Into<String>,
        customer_id: impl Into<String>,
        customer_name: impl Into<String>,
        booking_date: Option<NaiveDate>,
        br_amount: Money,
        rr_amount: Money,
        token_amount: Money,
        token_mode: PaymentMode,
    ) -> Result<Self> {
        if br_amount.is_negative() {
            return Err(EngineError::NegativeCategoryAmount {
                category: Category::BR.to_string(),
                amount: br_amount,
            });
        }
        if rr_amount.is_negative() {
            return Err(EngineError::NegativeCategoryAmount {
                category: Category::RR.to_string(),
                amount: rr_amount,
            });
        }
        let cr_amount = br_amount - rr_amount;
        if cr_amount.is_negative() {
            return Err(EngineError::CategorySplitMismatch {
                br: br_amount,
                rr: rr_amount,
                cr: cr_amount,
            });
        }
        if token_amount.is_negative() {
            return Err(EngineError::InvalidPaymentAmount {
                amount: token_amount,
            });
        }

        Ok(Self {
            receipt_no: receipt_no.into(),
            plot_no: plot_no.into(),
            customer_id: customer_id.into(),
            customer_name: customer_name.into(),
            phone: None,
            booking_date,
            br_amount,
            rr_amount,
            cr_amount,
            token_amount,
            token_mode,
            status: BookingStatus::Active,
        })
    }

    /// total agreed for a category
    pub fn amount(&self, category: Category) -> Money {
        match category {
            Category::BR => self.br_amount,
            Category::RR => self.rr_amount,
            Category::CR => self.cr_amount,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == BookingStatus::Active
    }

    /// cancel the booking; prior payments stay on the ledger as history
    pub fn cancel(&mut self, events: &mut EventStore) -> Result<()> {
        if self.status != BookingStatus::Active {
            return Err(EngineError::BookingNotActive {
                receipt_no: self.receipt_no.clone(),
                status: self.status,
            });
        }
        self.status = BookingStatus::Cancelled;
        events.emit(Event::BookingCancelled {
            receipt_no: self.receipt_no.clone(),
            plot_no: self.plot_no.clone(),
        });
        Ok(())
    }
}

/// in-memory booking store keyed by receipt number
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingStore {
    bookings: Vec<Booking>,
}

impl BookingStore {
    pub fn new() -> Self {
        Self {
            bookings: Vec::new(),
        }
    }

    pub fn bookings(&self) -> &[Booking] {
        &self.bookings
    }

    /// register a booking and announce it
    pub fn create(&mut self, booking: Booking, events: &mut EventStore) -> Result<()> {
        if self.find(&booking.receipt_no).is_some() {
            return Err(EngineError::DuplicateReceipt {
                receipt_no: booking.receipt_no.clone(),
            });
        }
        events.emit(Event::BookingCreated {
            receipt_no: booking.receipt_no.clone(),
            plot_no: booking.plot_no.clone(),
            customer_id: booking.customer_id.clone(),
            booking_date: booking.booking_date,
            br_amount: booking.br_amount,
        });
        self.bookings.push(booking);
        Ok(())
    }

    pub fn find(&self, receipt_no: &str) -> Option<&Booking> {
        self.bookings.iter().find(|b| b.receipt_no == receipt_no)
    }

    pub fn get(&self, receipt_no: &str) -> Result<&Booking> {
        self.find(receipt_no).ok_or_else(|| EngineError::UnknownBooking {
            receipt_no: receipt_no.to_string(),
        })
    }

    pub fn cancel(&mut self, receipt_no: &str, events: &mut EventStore) -> Result<()> {
        let booking = self
            .bookings
            .iter_mut()
            .find(|b| b.receipt_no == receipt_no)
            .ok_or_else(|| EngineError::UnknownBooking {
                receipt_no: receipt_no.to_string(),
            })?;
        booking.cancel(events)
    }

    pub fn active(&self) -> impl Iterator<Item = &Booking> {
        self.bookings.iter().filter(|b| b.is_active())
    }

    pub fn for_customer(&self, customer_id: &str) -> Vec<&Booking> {
        self.bookings
            .iter()
            .filter(|b| b.customer_id == customer_id)
            .collect()
    }

    /// a plot is Booked while any active booking holds it; cancellation
    /// releases it back to Available
    pub fn plot_status(&self, plot_no: &str) -> PlotStatus {
        if self.active().any(|b| b.plot_no == plot_no) {
            PlotStatus::Booked
        } else {
            PlotStatus::Available
        }
    }
}

/// cumulative paid position of one booking, per category
///
/// The token amount is already folded in: it counts against RR unless the
/// token was cash, in which case it counts against CR. BR paid is always the
/// sum of the two.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PaidSnapshot {
    pub rr_paid: Money,
    pub cr_paid: Money,
}

impl PaidSnapshot {
    pub fn br_paid(&self) -> Money {
        self.rr_paid + self.cr_paid
    }

    pub fn paid(&self, category: Category) -> Money {
        match category {
            Category::BR => self.br_paid(),
            Category::RR => self.rr_paid,
            Category::CR => self.cr_paid,
        }
    }

    /// outstanding balance for a category, floored at zero
    pub fn balance(&self, booking: &Booking, category: Category) -> Money {
        (booking.amount(category) - self.paid(category)).max(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_date_in;

    fn booking() -> Booking {
        Booking::new(
            "PG-2025-000042",
            "17B",
            "CUST-9",
            "A. Deshmukh",
            parse_date_in("01/01/2024"),
            Money::from_rupees(500_000),
            Money::from_rupees(300_000),
            Money::from_rupees(25_000),
            PaymentMode::Upi,
        )
        .unwrap()
    }

    #[test]
    fn test_cr_is_derived() {
        let b = booking();
        assert_eq!(b.cr_amount, Money::from_rupees(200_000));
        assert_eq!(b.amount(Category::CR), Money::from_rupees(200_000));
    }

    #[test]
    fn test_rr_exceeding_br_rejected() {
        let err = Booking::new(
            "PG-2025-000043",
            "18A",
            "CUST-9",
            "A. Deshmukh",
            None,
            Money::from_rupees(100_000),
            Money::from_rupees(150_000),
            Money::ZERO,
            PaymentMode::Cash,
        );
        assert!(matches!(err, Err(EngineError::CategorySplitMismatch { .. })));
    }

    #[test]
    fn test_cancel_only_once() {
        let mut b = booking();
        let mut events = EventStore::new();
        b.cancel(&mut events).unwrap();
        assert_eq!(b.status, BookingStatus::Cancelled);
        assert!(b.cancel(&mut events).is_err());
        assert_eq!(events.events().len(), 1);
    }

    #[test]
    fn test_store_create_and_cancel() {
        let mut store = BookingStore::new();
        let mut events = EventStore::new();
        store.create(booking(), &mut events).unwrap();

        assert!(matches!(
            store.create(booking(), &mut events),
            Err(EngineError::DuplicateReceipt { .. })
        ));
        assert_eq!(store.active().count(), 1);
        assert_eq!(store.for_customer("CUST-9").len(), 1);

        assert_eq!(store.plot_status("17B"), PlotStatus::Booked);
        store.cancel("PG-2025-000042", &mut events).unwrap();
        assert_eq!(store.active().count(), 0);
        assert_eq!(store.plot_status("17B"), PlotStatus::Available);
        assert!(store.cancel("no-such-receipt", &mut events).is_err());

        let taken = events.take_events();
        assert!(matches!(taken[0], Event::BookingCreated { .. }));
        assert!(matches!(taken[1], Event::BookingCancelled { .. }));
    }

    #[test]
    fn test_paid_snapshot_totals() {
        let b = booking();
        let snap = PaidSnapshot {
            rr_paid: Money::from_rupees(120_000),
            cr_paid: Money::from_rupees(50_000),
        };
        assert_eq!(snap.br_paid(), Money::from_rupees(170_000));
        assert_eq!(snap.balance(&b, Category::RR), Money::from_rupees(180_000));
        assert_eq!(snap.balance(&b, Category::CR), Money::from_rupees(150_000));
        assert_eq!(snap.balance(&b, Category::BR), Money::from_rupees(330_000));
    }
}
