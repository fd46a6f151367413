use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::booking::Booking;
use crate::config::ScheduleConfig;
use crate::dates::add_days;
use crate::decimal::Money;
use crate::types::{Category, InstallmentPart};

/// one derived installment slot; recomputed on demand, never persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentSlot {
    pub category: Category,
    pub part: InstallmentPart,
    pub gross: Money,
    /// None when the booking date was unparseable
    pub due_date: Option<NaiveDate>,
}

/// three-part due schedule for one category of one booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallmentSchedule {
    pub category: Category,
    pub total: Money,
    pub slots: [InstallmentSlot; 3],
}

impl InstallmentSchedule {
    /// derive the schedule from a category total and booking date
    ///
    /// Parts 1 and 2 are rounded to whole rupees; part 3 takes the remainder
    /// so the three parts always sum to the total exactly. A zero total still
    /// yields three dated zero slots.
    pub fn generate(
        category: Category,
        total: Money,
        booking_date: Option<NaiveDate>,
        config: &ScheduleConfig,
    ) -> Self {
        let part1 = (total * config.first_fraction).round_rupee();
        let part2 = (total * config.second_fraction).round_rupee();
        let part3 = total - part1 - part2;

        let gross = [part1, part2, part3];
        let slots = std::array::from_fn(|i| InstallmentSlot {
            category,
            part: InstallmentPart::ALL[i],
            gross: gross[i],
            due_date: add_days(booking_date, config.due_offsets_days[i]),
        });

        Self {
            category,
            total,
            slots,
        }
    }

    /// schedule for one category of a booking
    pub fn for_booking(booking: &Booking, category: Category, config: &ScheduleConfig) -> Self {
        Self::generate(
            category,
            booking.amount(category),
            booking.booking_date,
            config,
        )
    }

    pub fn gross_parts(&self) -> [Money; 3] {
        [
            self.slots[0].gross,
            self.slots[1].gross,
            self.slots[2].gross,
        ]
    }
}
