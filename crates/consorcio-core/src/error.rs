//! Error types for the Consorcio engine.
//!
//! Precondition violations on the primitive inputs (dates, amounts, term
//! classes) are reported through [`ConsorcioError`].

use rust_decimal::Decimal;
use thiserror::Error;

/// A specialized Result type for core operations.
pub type ConsorcioResult<T> = Result<T, ConsorcioError>;

/// The main error type for core operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsorcioError {
    /// Error in date calculations or invalid date.
    #[error("Invalid date: {message}")]
    InvalidDate {
        /// Description of the date error.
        message: String,
    },

    /// Term length outside the supported set of term classes.
    #[error("Unsupported term class: {months} months (supported: 200, 220, 240)")]
    InvalidTermClass {
        /// The rejected installment count.
        months: u32,
    },

    /// Due day of month outside 1..=31.
    #[error("Invalid due day of month: {day}")]
    InvalidDueDay {
        /// The rejected day.
        day: u32,
    },

    /// Monetary amount that cannot be used (negative, for instance).
    #[error("Invalid amount: {value} - {reason}")]
    InvalidAmount {
        /// The rejected amount.
        value: Decimal,
        /// Reason for invalidity.
        reason: String,
    },
}

impl ConsorcioError {
    /// Creates an invalid date error.
    #[must_use]
    pub fn invalid_date(message: impl Into<String>) -> Self {
        Self::InvalidDate {
            message: message.into(),
        }
    }

    /// Creates an invalid amount error.
    #[must_use]
    pub fn invalid_amount(value: Decimal, reason: impl Into<String>) -> Self {
        Self::InvalidAmount {
            value,
            reason: reason.into(),
        }
    }
}
