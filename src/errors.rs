use thiserror::Error;

use crate::decimal::Money;
use crate::types::BookingStatus;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("invalid payment amount: {amount}")]
    InvalidPaymentAmount {
        amount: Money,
    },

    #[error("negative category amount: {category} is {amount}")]
    NegativeCategoryAmount {
        category: String,
        amount: Money,
    },

    #[error("category split mismatch: BR {br} minus RR {rr} is not CR {cr}")]
    CategorySplitMismatch {
        br: Money,
        rr: Money,
        cr: Money,
    },

    #[error("booking not active: {receipt_no} is {status:?}")]
    BookingNotActive {
        receipt_no: String,
        status: BookingStatus,
    },

    #[error("unknown booking: {receipt_no}")]
    UnknownBooking {
        receipt_no: String,
    },

    #[error("duplicate receipt no: {receipt_no}")]
    DuplicateReceipt {
        receipt_no: String,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },
}

pub type Result<T> = std::result::Result<T, EngineError>;
