//! Error types for fee tables and installment composition.

use consorcio_core::{ConsorcioError, TermClass};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::catalog::ProductType;

/// Result type for fee operations.
pub type FeeResult<T> = Result<T, FeeError>;

/// Errors raised while selecting fee tables or composing installments.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FeeError {
    /// No fee table covers the requested credit amount.
    #[error("No fee table for {product} covers credit amount {credit_amount}")]
    NoMatchingFeeTable {
        /// Product whose tables were searched.
        product: String,
        /// The requested credit amount.
        credit_amount: Decimal,
    },

    /// Two fee tables of the same product cover overlapping credit ranges.
    #[error("Fee tables '{first}' and '{second}' have overlapping credit ranges")]
    OverlappingFeeTables {
        /// Name of the first table.
        first: String,
        /// Name of the second table.
        second: String,
    },

    /// A fee table does not price the requested term class.
    #[error("Fee table '{table}' has no admin fee for a term of {term}")]
    MissingAdminFee {
        /// Name of the table.
        table: String,
        /// The requested term class.
        term: TermClass,
    },

    /// The catalog has no definition for a product type.
    #[error("Unknown product type: {product}")]
    UnknownProduct {
        /// The requested product.
        product: ProductType,
    },

    /// One or more validation rules failed.
    #[error("Validation failed: {}", format_validation(.0))]
    Validation(Vec<ValidationError>),

    /// Catalog data could not be parsed.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Precondition violation on a primitive input.
    #[error(transparent)]
    Core(#[from] ConsorcioError),
}

impl FeeError {
    /// Creates a no-matching-table error.
    #[must_use]
    pub fn no_matching_table(product: impl Into<String>, credit_amount: Decimal) -> Self {
        Self::NoMatchingFeeTable {
            product: product.into(),
            credit_amount,
        }
    }
}

impl From<serde_json::Error> for FeeError {
    fn from(err: serde_json::Error) -> Self {
        FeeError::Deserialization(err.to_string())
    }
}

impl From<toml::de::Error> for FeeError {
    fn from(err: toml::de::Error) -> Self {
        FeeError::Deserialization(err.to_string())
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

fn format_validation(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
