use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::Money;
use crate::types::{Category, PaymentMode};

/// all events emitted by the booking store and payment ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    BookingCreated {
        receipt_no: String,
        plot_no: String,
        customer_id: String,
        booking_date: Option<NaiveDate>,
        br_amount: Money,
    },
    BookingCancelled {
        receipt_no: String,
        plot_no: String,
    },
    PaymentRecorded {
        payment_id: Uuid,
        receipt_no: String,
        plot_no: String,
        amount: Money,
        category: Category,
        mode: PaymentMode,
        date: NaiveDate,
    },
    AllocationProposed {
        total_amount: Money,
        category: Category,
        plot_count: usize,
    },
    AllocationUnmatched {
        total_amount: Money,
        category: Category,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_emit_and_take() {
        let mut store = EventStore::new();
        store.emit(Event::BookingCancelled {
            receipt_no: "PG-2025-000001".to_string(),
            plot_no: "12A".to_string(),
        });
        assert_eq!(store.events().len(), 1);

        let taken = store.take_events();
        assert_eq!(taken.len(), 1);
        assert!(store.events().is_empty());
    }
}
