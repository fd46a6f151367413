use serde::{Deserialize, Serialize};
use std::fmt;

/// price category of a booking amount or payment
///
/// BR is the full agreed price, RR the registered portion, CR the cash
/// portion. CR = BR − RR always.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    BR,
    RR,
    CR,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::BR, Category::RR, Category::CR];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::BR => "BR",
            Category::RR => "RR",
            Category::CR => "CR",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// payment mode as collected at the counter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMode {
    Cash,
    NeftRtgs,
    Upi,
    Cheque,
    DemandDraft,
}

impl PaymentMode {
    /// cash counts against CR, every other mode against RR
    pub fn category(&self) -> Category {
        match self {
            PaymentMode::Cash => Category::CR,
            _ => Category::RR,
        }
    }

    /// manual receipt books 1–2000 are the cash books; a receipt number in
    /// that range suggests cash mode, anything else is inconclusive
    pub fn suggest_for_receipt(receipt_no: &str) -> Option<PaymentMode> {
        match receipt_no.trim().parse::<u32>() {
            Ok(n) if (1..=2000).contains(&n) => Some(PaymentMode::Cash),
            _ => None,
        }
    }
}

impl From<PaymentMode> for Category {
    fn from(mode: PaymentMode) -> Self {
        mode.category()
    }
}

impl fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::NeftRtgs => "NEFT / RTGS",
            PaymentMode::Upi => "UPI",
            PaymentMode::Cheque => "Cheque",
            PaymentMode::DemandDraft => "DD",
        };
        f.write_str(s)
    }
}

/// booking status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    Active,
    Cancelled,
}

/// plot availability in the layout, derived from active bookings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotStatus {
    Available,
    Booked,
}

/// one of the three scheduled sub-payments of a category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum InstallmentPart {
    First,
    Second,
    Third,
}

impl InstallmentPart {
    pub const ALL: [InstallmentPart; 3] = [
        InstallmentPart::First,
        InstallmentPart::Second,
        InstallmentPart::Third,
    ];

    pub fn number(&self) -> u8 {
        match self {
            InstallmentPart::First => 1,
            InstallmentPart::Second => 2,
            InstallmentPart::Third => 3,
        }
    }

    /// display label, e.g. "Part 1 · 35%"
    pub fn label(&self) -> &'static str {
        match self {
            InstallmentPart::First => "Part 1 · 35%",
            InstallmentPart::Second => "Part 2 · 35%",
            InstallmentPart::Third => "Part 3 · 30%",
        }
    }
}

impl fmt::Display for InstallmentPart {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}
