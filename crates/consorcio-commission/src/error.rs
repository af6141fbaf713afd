//! Error types for commission reconciliation.

use consorcio_core::ConsorcioError;
use consorcio_fees::FeeError;
use thiserror::Error;

/// Result type for commission operations.
pub type CommissionResult<T> = Result<T, CommissionError>;

/// Errors that prevent a contract from being reconciled.
///
/// Data-integrity findings on individual records are not errors; they are
/// reported as [`IntegrityWarning`](crate::reconcile::IntegrityWarning)s.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CommissionError {
    /// Fee table lookup failed.
    #[error(transparent)]
    Fee(#[from] FeeError),

    /// Precondition violation on a primitive input.
    #[error(transparent)]
    Core(#[from] ConsorcioError),
}
