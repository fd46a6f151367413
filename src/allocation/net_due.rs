use serde::{Deserialize, Serialize};

use crate::decimal::Money;

/// net position of one installment part after spill-over
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PartPosition {
    pub gross: Money,
    pub absorbed: Money,
    pub net_due: Money,
}

/// spread a cumulative paid amount over ordered installment parts
///
/// A payment always satisfies the earliest unpaid part before any later one,
/// regardless of when the underlying payments actually arrived; only the
/// cumulative sum matters, never the per-payment order. Over-payment leaves
/// every part with net_due zero — the surplus is the excess reporter's
/// business, not this function's.
pub fn net_due(parts: &[Money], total_paid: Money) -> Vec<PartPosition> {
    let mut remaining = total_paid.max(Money::ZERO);
    parts
        .iter()
        .map(|&gross| {
            let absorbed = remaining.min(gross);
            remaining -= absorbed;
            PartPosition {
                gross,
                absorbed,
                net_due: (gross - absorbed).max(Money::ZERO),
            }
        })
        .collect()
}
