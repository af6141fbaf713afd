//! Payment reduction schemes.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Scheme reducing the common-fund base of an installment.
///
/// The multiplier applies to the credit amount before the common fund is
/// computed. Fee percentages always apply to the original credit amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentReduction {
    /// Full common fund (multiplier 1.0).
    #[default]
    Full,
    /// Half common fund (multiplier 0.5).
    Half,
    /// Quarter-reduced common fund (multiplier 0.75).
    QuarterReduced,
}

impl PaymentReduction {
    /// Multiplier applied to the credit amount for the common-fund base.
    #[must_use]
    pub fn multiplier(&self) -> Decimal {
        match self {
            PaymentReduction::Full => Decimal::ONE,
            PaymentReduction::Half => dec!(0.5),
            PaymentReduction::QuarterReduced => dec!(0.75),
        }
    }

    /// The reduced common-fund base for `credit_amount`, unrounded.
    #[must_use]
    pub fn apply(&self, credit_amount: Decimal) -> Decimal {
        credit_amount * self.multiplier()
    }
}

impl fmt::Display for PaymentReduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentReduction::Full => "Full",
            PaymentReduction::Half => "Half",
            PaymentReduction::QuarterReduced => "Quarter-Reduced",
        };
        write!(f, "{name}")
    }
}
