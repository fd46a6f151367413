use serde::{Deserialize, Serialize};

use crate::booking::{Booking, PaidSnapshot};
use crate::config::ScheduleConfig;
use crate::decimal::Money;
use crate::ledger::PaymentLedger;
use crate::schedule::InstallmentSchedule;
use crate::types::{BookingStatus, Category};

/// one booking's full position: totals, paid, balances and the schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerRow {
    pub receipt_no: String,
    pub plot_no: String,
    pub status: BookingStatus,
    pub paid: PaidSnapshot,
    pub br_balance: Money,
    pub rr_balance: Money,
    pub cr_balance: Money,
    pub br_schedule: InstallmentSchedule,
    pub rr_schedule: InstallmentSchedule,
    pub cr_schedule: InstallmentSchedule,
}

impl LedgerRow {
    pub fn build(booking: &Booking, ledger: &PaymentLedger, config: &ScheduleConfig) -> Self {
        let paid = ledger.paid_snapshot(booking);
        Self {
            receipt_no: booking.receipt_no.clone(),
            plot_no: booking.plot_no.clone(),
            status: booking.status,
            paid,
            br_balance: paid.balance(booking, Category::BR),
            rr_balance: paid.balance(booking, Category::RR),
            cr_balance: paid.balance(booking, Category::CR),
            br_schedule: InstallmentSchedule::for_booking(booking, Category::BR, config),
            rr_schedule: InstallmentSchedule::for_booking(booking, Category::RR, config),
            cr_schedule: InstallmentSchedule::for_booking(booking, Category::CR, config),
        }
    }
}

/// grand totals across one customer's bookings
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub br_amount: Money,
    pub br_paid: Money,
    pub br_balance: Money,
    pub rr_amount: Money,
    pub rr_paid: Money,
    pub rr_balance: Money,
    pub cr_amount: Money,
    pub cr_paid: Money,
    pub cr_balance: Money,
}

/// customer ledger: every booking of one customer with grand totals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerLedger {
    pub customer_name: String,
    pub rows: Vec<LedgerRow>,
    pub totals: LedgerTotals,
}

impl CustomerLedger {
    /// build from the customer's bookings (as supplied by the booking store)
    pub fn build(
        customer_name: impl Into<String>,
        bookings: &[&Booking],
        ledger: &PaymentLedger,
        config: &ScheduleConfig,
    ) -> Self {
        let rows: Vec<LedgerRow> = bookings
            .iter()
            .map(|b| LedgerRow::build(b, ledger, config))
            .collect();

        let mut totals = LedgerTotals::default();
        for (booking, row) in bookings.iter().zip(&rows) {
            totals.br_amount += booking.br_amount;
            totals.rr_amount += booking.rr_amount;
            totals.cr_amount += booking.cr_amount;
            totals.br_paid += row.paid.br_paid();
            totals.rr_paid += row.paid.rr_paid;
            totals.cr_paid += row.paid.cr_paid;
            totals.br_balance += row.br_balance;
            totals.rr_balance += row.rr_balance;
            totals.cr_balance += row.cr_balance;
        }

        Self {
            customer_name: customer_name.into(),
            rows,
            totals,
        }
    }

    pub fn active_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.status == BookingStatus::Active)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dates::parse_date_in;
    use crate::events::EventStore;
    use crate::ledger::PaymentDetails;
    use crate::types::PaymentMode;

    fn booking(receipt: &str, plot: &str, br: i64, rr: i64) -> Booking {
        Booking::new(
            receipt,
            plot,
            "CUST-2",
            "R. Joshi",
            parse_date_in("01/01/2024"),
            Money::from_rupees(br),
            Money::from_rupees(rr),
            Money::from_rupees(10_000),
            PaymentMode::NeftRtgs,
        )
        .unwrap()
    }

    #[test]
    fn test_customer_ledger_totals() {
        let b1 = booking("R1", "2A", 100_000, 60_000);
        let b2 = booking("R2", "7B", 200_000, 120_000);
        let mut ledger = PaymentLedger::new();
        let mut events = EventStore::new();

        ledger
            .record(
                &b1,
                Money::from_rupees(15_000),
                &PaymentDetails {
                    date: parse_date_in("10/01/2024").unwrap(),
                    mode: PaymentMode::Cash,
                    reference: None,
                    recorded_by: None,
                },
                &mut events,
            )
            .unwrap();

        let view = CustomerLedger::build(
            "R. Joshi",
            &[&b1, &b2],
            &ledger,
            &ScheduleConfig::standard(),
        );

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.active_count(), 2);
        assert_eq!(view.totals.br_amount, Money::from_rupees(300_000));
        assert_eq!(view.totals.rr_amount, Money::from_rupees(180_000));
        assert_eq!(view.totals.cr_amount, Money::from_rupees(120_000));
        // two 10,000 tokens (non-cash → RR) plus one 15,000 cash payment
        assert_eq!(view.totals.rr_paid, Money::from_rupees(20_000));
        assert_eq!(view.totals.cr_paid, Money::from_rupees(15_000));
        assert_eq!(view.totals.br_paid, Money::from_rupees(35_000));
        assert_eq!(view.totals.br_balance, Money::from_rupees(265_000));
    }

    #[test]
    fn test_row_carries_schedule() {
        let b = booking("R1", "2A", 100_000, 60_000);
        let row = LedgerRow::build(&b, &PaymentLedger::new(), &ScheduleConfig::standard());
        assert_eq!(row.br_schedule.slots[0].gross, Money::from_rupees(35_000));
        assert_eq!(row.rr_schedule.slots[0].gross, Money::from_rupees(21_000));
        assert_eq!(row.cr_schedule.slots[2].gross, Money::from_rupees(12_000));
        assert_eq!(row.rr_balance, Money::from_rupees(50_000));
    }
}
