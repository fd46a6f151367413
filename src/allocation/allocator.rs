use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::ScheduleConfig;
use crate::decimal::Money;
use crate::types::InstallmentPart;

use super::{AllocationRequest, AllocationResult, OpenSlot};

/// per-slot share of a lump payment, before per-plot aggregation
///
/// The payment-entry preview shows this level of detail; `allocate` folds it
/// into one row per plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotAllocation {
    pub plot_no: String,
    pub receipt_no: String,
    pub part: InstallmentPart,
    pub due_date: Option<NaiveDate>,
    pub net_due: Money,
    pub amount: Money,
}

/// distribute a lump payment across open installment slots
///
/// Slots are served in due-date order; slots sharing a due date split the
/// money in proportion to their net dues. The sum of all returned amounts
/// equals the rounded input exactly — rounding drift is corrected inside
/// each group and any over-payment rides on the last slot rather than being
/// dropped. An empty candidate set yields an empty result; the caller
/// reports the money as unallocated.
pub fn allocate(
    request: &AllocationRequest,
    candidates: &[OpenSlot],
    config: &ScheduleConfig,
) -> Vec<AllocationResult> {
    let detailed = allocate_detailed(request, candidates, config);

    let mut results: Vec<AllocationResult> = Vec::new();
    for d in &detailed {
        match results
            .iter_mut()
            .find(|r| r.receipt_no == d.receipt_no && r.plot_no == d.plot_no)
        {
            Some(r) => r.amount += d.amount,
            None => results.push(AllocationResult {
                plot_no: d.plot_no.clone(),
                receipt_no: d.receipt_no.clone(),
                amount: d.amount,
                category: request.category(),
            }),
        }
    }
    results.retain(|r| r.amount.is_positive());
    results
}

/// same distribution, one row per installment slot
pub fn allocate_detailed(
    request: &AllocationRequest,
    candidates: &[OpenSlot],
    config: &ScheduleConfig,
) -> Vec<SlotAllocation> {
    struct Work<'a> {
        slot: &'a OpenSlot,
        net_due: Money,
        allocated: Money,
    }

    let mut work: Vec<Work> = candidates
        .iter()
        .filter(|s| s.net_due().is_positive())
        .map(|s| Work {
            slot: s,
            net_due: s.net_due(),
            allocated: Money::ZERO,
        })
        .collect();
    if work.is_empty() {
        return Vec::new();
    }

    // due date first (unparseable dates last), older booking wins ties,
    // plot number as the final deterministic key
    work.sort_by(|a, b| {
        cmp_nulls_last(a.slot.due_date, b.slot.due_date)
            .then_with(|| cmp_nulls_last(a.slot.booking_date, b.slot.booking_date))
            .then_with(|| a.slot.plot_no.cmp(&b.slot.plot_no))
    });

    let mut groups: Vec<std::ops::Range<usize>> = Vec::new();
    let mut start = 0;
    for i in 1..=work.len() {
        if i == work.len() || work[i].slot.due_date != work[start].slot.due_date {
            groups.push(start..i);
            start = i;
        }
    }

    let mut remaining = request.total_amount;
    for range in groups {
        if remaining.as_decimal() <= config.epsilon {
            break;
        }
        let group = &mut work[range];
        let group_due: Money = group.iter().map(|w| w.net_due).sum();
        let to_group = remaining.min(group_due);
        remaining -= to_group;

        if group.len() == 1 {
            group[0].allocated = to_group;
        } else {
            // proportional to net due, capped at each slot's own need
            let mut overflow = Money::ZERO;
            for w in group.iter_mut() {
                let share = to_group.prorate(w.net_due, group_due).round_rupee();
                let capped = share.min(w.net_due);
                overflow += share - capped;
                w.allocated = capped;
            }
            // a capped slot's surplus belongs to group mates with unmet need
            for w in group.iter_mut() {
                if !overflow.is_positive() {
                    break;
                }
                let headroom = w.net_due - w.allocated;
                if headroom.is_positive() {
                    let give = overflow.min(headroom);
                    w.allocated += give;
                    overflow -= give;
                }
            }
        }

        // pin the group total to round(to_group); drift lands on the first
        // slot that received anything
        let allocated_sum: Money = group.iter().map(|w| w.allocated).sum();
        let diff = to_group.round_rupee() - allocated_sum;
        if !diff.is_zero() {
            match group.iter_mut().find(|w| w.allocated.is_positive()) {
                Some(w) => w.allocated += diff,
                None => group[0].allocated += diff,
            }
        }
    }

    // over-payment: the leftover rides on the last slot, never dropped
    if remaining.as_decimal() > config.epsilon {
        if let Some(last) = work.last_mut() {
            last.allocated += remaining.round_rupee();
        }
    }

    work.iter()
        .map(|w| SlotAllocation {
            plot_no: w.slot.plot_no.clone(),
            receipt_no: w.slot.receipt_no.clone(),
            part: w.slot.part,
            due_date: w.slot.due_date,
            net_due: w.net_due,
            amount: w.allocated,
        })
        .collect()
}

fn cmp_nulls_last(a: Option<NaiveDate>, b: Option<NaiveDate>) -> Ordering {
    match (a, b) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
