use serde::{Deserialize, Serialize};

use crate::booking::{Booking, PaidSnapshot};
use crate::decimal::Money;
use crate::ledger::PaymentLedger;
use crate::types::Category;

/// how a category's paid amount compares to its total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BalanceStatus {
    Balanced,
    Excess,
    Short,
}

/// per-category position of one booking
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CategoryPosition {
    pub category: Category,
    pub total: Money,
    pub paid: Money,
    /// paid − total; positive means excess, negative means short
    pub balance: Money,
    pub status: BalanceStatus,
}

impl CategoryPosition {
    pub fn classify(category: Category, total: Money, paid: Money) -> Self {
        let balance = paid - total;
        let status = if balance.is_positive() {
            BalanceStatus::Excess
        } else if balance.is_negative() {
            BalanceStatus::Short
        } else {
            BalanceStatus::Balanced
        };
        Self {
            category,
            total,
            paid,
            balance,
            status,
        }
    }

    pub fn excess(&self) -> Money {
        self.balance.max(Money::ZERO)
    }

    pub fn shortfall(&self) -> Money {
        (Money::ZERO - self.balance).max(Money::ZERO)
    }
}

/// suggested corrective action for a booking out of balance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Remediation {
    /// move an excess from one category to a short one before refunding
    Reallocate {
        from: Category,
        to: Category,
        amount: Money,
    },
    Refund {
        category: Category,
        amount: Money,
    },
    /// BR-level surplus needs a manual refund or price adjustment
    RefundOrAdjust {
        category: Category,
        amount: Money,
    },
}

/// full per-category reconciliation of one booking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingReconciliation {
    pub receipt_no: String,
    pub plot_no: String,
    pub customer_name: String,
    pub br: CategoryPosition,
    pub rr: CategoryPosition,
    pub cr: CategoryPosition,
    pub remediations: Vec<Remediation>,
}

impl BookingReconciliation {
    pub fn position(&self, category: Category) -> &CategoryPosition {
        match category {
            Category::BR => &self.br,
            Category::RR => &self.rr,
            Category::CR => &self.cr,
        }
    }

    pub fn has_excess(&self) -> bool {
        Category::ALL
            .iter()
            .any(|&c| self.position(c).status == BalanceStatus::Excess)
    }

    pub fn is_settled(&self) -> bool {
        Category::ALL
            .iter()
            .all(|&c| self.position(c).status == BalanceStatus::Balanced)
    }
}

/// classify one booking against its paid snapshot
pub fn reconcile(booking: &Booking, paid: &PaidSnapshot) -> BookingReconciliation {
    let br = CategoryPosition::classify(Category::BR, booking.br_amount, paid.br_paid());
    let rr = CategoryPosition::classify(Category::RR, booking.rr_amount, paid.rr_paid);
    let cr = CategoryPosition::classify(Category::CR, booking.cr_amount, paid.cr_paid);

    let mut remediations = Vec::new();
    if cr.excess().is_positive() {
        if rr.shortfall().is_positive() {
            remediations.push(Remediation::Reallocate {
                from: Category::CR,
                to: Category::RR,
                amount: cr.excess(),
            });
        } else {
            remediations.push(Remediation::Refund {
                category: Category::CR,
                amount: cr.excess(),
            });
        }
    }
    if rr.excess().is_positive() {
        if cr.shortfall().is_positive() {
            remediations.push(Remediation::Reallocate {
                from: Category::RR,
                to: Category::CR,
                amount: rr.excess(),
            });
        } else {
            remediations.push(Remediation::Refund {
                category: Category::RR,
                amount: rr.excess(),
            });
        }
    }
    if br.excess().is_positive() {
        remediations.push(Remediation::RefundOrAdjust {
            category: Category::BR,
            amount: br.excess(),
        });
    }

    BookingReconciliation {
        receipt_no: booking.receipt_no.clone(),
        plot_no: booking.plot_no.clone(),
        customer_name: booking.customer_name.clone(),
        br,
        rr,
        cr,
        remediations,
    }
}

/// reconcile every booking and keep the ones with an excess anywhere
pub fn excess_report(bookings: &[Booking], ledger: &PaymentLedger) -> Vec<BookingReconciliation> {
    bookings
        .iter()
        .map(|b| reconcile(b, &ledger.paid_snapshot(b)))
        .filter(|r| r.has_excess())
        .collect()
}
