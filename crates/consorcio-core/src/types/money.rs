//! Monetary rounding and percentage types.
//!
//! Money is `rust_decimal::Decimal` throughout the engine. Every monetary
//! component is rounded to cents with [`round_money`] as soon as it is
//! produced, so sums of components are exact and repeated recomputation never
//! drifts.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One cent (0.01).
pub const CENT: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Number of fraction digits kept for monetary values.
pub const MONEY_SCALE: u32 = 2;

/// Rounds a monetary value to cents, half away from zero.
///
/// # Example
///
/// ```rust
/// use consorcio_core::types::round_money;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(round_money(dec!(416.6666)), dec!(416.67));
/// assert_eq!(round_money(dec!(17.045)), dec!(17.05));
/// ```
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(MONEY_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// A percentage expressed in percentage points (`20` means 20%).
///
/// # Example
///
/// ```rust
/// use consorcio_core::types::Percent;
/// use rust_decimal_macros::dec;
///
/// let admin = Percent::new(dec!(20));
/// assert_eq!(admin.of(dec!(100000)), dec!(20000));
/// assert_eq!(admin.as_fraction(), dec!(0.2));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Percent(Decimal);

impl Percent {
    /// Zero percent.
    pub const ZERO: Percent = Percent(Decimal::ZERO);

    /// Creates a percentage from percentage points.
    #[must_use]
    pub fn new(points: Decimal) -> Self {
        Self(points)
    }

    /// Returns the value in percentage points.
    #[must_use]
    pub fn as_points(&self) -> Decimal {
        self.0
    }

    /// Returns the value as a fraction (20% = 0.2).
    #[must_use]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Applies the percentage to `amount`, unrounded.
    #[must_use]
    pub fn of(&self, amount: Decimal) -> Decimal {
        amount * self.0 / Decimal::ONE_HUNDRED
    }

    /// Returns true if the percentage is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}
