use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::{EngineError, Result};

/// installment plan configuration
///
/// Single source of truth for the 35/35/30 split, the due-date offsets and
/// the allocation epsilon. Part 3 takes whatever the first two fractions
/// leave, so only the first two are configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// fraction of the category total due in part 1
    pub first_fraction: Decimal,
    /// fraction of the category total due in part 2
    pub second_fraction: Decimal,
    /// calendar-day offsets from the booking date for parts 1, 2, 3
    pub due_offsets_days: [i64; 3],
    /// residue below this is treated as fully allocated
    pub epsilon: Decimal,
}

impl ScheduleConfig {
    /// the standard 35/35/30 plan due at +10, +75 and +165 days
    pub fn standard() -> Self {
        Self {
            first_fraction: dec!(0.35),
            second_fraction: dec!(0.35),
            due_offsets_days: [10, 75, 165],
            epsilon: dec!(0.5),
        }
    }

    /// validate fractions and offsets
    pub fn validate(&self) -> Result<()> {
        if self.first_fraction < Decimal::ZERO || self.second_fraction < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                message: "installment fractions must be non-negative".to_string(),
            });
        }
        if self.first_fraction + self.second_fraction > Decimal::ONE {
            return Err(EngineError::InvalidConfiguration {
                message: "first two installment fractions exceed the whole".to_string(),
            });
        }
        if self.due_offsets_days[0] > self.due_offsets_days[1]
            || self.due_offsets_days[1] > self.due_offsets_days[2]
        {
            return Err(EngineError::InvalidConfiguration {
                message: "due-date offsets must be non-decreasing".to_string(),
            });
        }
        if self.epsilon < Decimal::ZERO {
            return Err(EngineError::InvalidConfiguration {
                message: "epsilon must be non-negative".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self::standard()
    }
}
