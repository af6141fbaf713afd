//! Supported consortium term classes.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ConsorcioError, ConsorcioResult};

/// Number of leading installments that carry a spread anticipated fee.
pub const FIRST_TIER_INSTALLMENTS: u32 = 12;

/// Installment-count variants of a consortium product.
///
/// Serialized as the plain installment count, so `200` in a catalog file
/// deserializes to [`TermClass::Months200`] and `210` is rejected.
///
/// # Example
///
/// ```rust
/// use consorcio_core::types::TermClass;
///
/// let term = TermClass::from_months(220).unwrap();
/// assert_eq!(term, TermClass::Months220);
/// assert_eq!(term.remaining_installments(), 208);
/// assert!(TermClass::from_months(180).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum TermClass {
    /// 200 monthly installments.
    Months200,
    /// 220 monthly installments.
    Months220,
    /// 240 monthly installments.
    Months240,
}

impl TermClass {
    /// All supported term classes, shortest first.
    pub const ALL: [TermClass; 3] = [
        TermClass::Months200,
        TermClass::Months220,
        TermClass::Months240,
    ];

    /// Resolves an installment count to a term class.
    ///
    /// # Errors
    ///
    /// Returns `ConsorcioError::InvalidTermClass` for any count outside the
    /// supported set. Counts are never rounded to the nearest class.
    pub fn from_months(months: u32) -> ConsorcioResult<Self> {
        match months {
            200 => Ok(TermClass::Months200),
            220 => Ok(TermClass::Months220),
            240 => Ok(TermClass::Months240),
            _ => Err(ConsorcioError::InvalidTermClass { months }),
        }
    }

    /// Returns the number of monthly installments.
    #[must_use]
    pub fn months(&self) -> u32 {
        match self {
            TermClass::Months200 => 200,
            TermClass::Months220 => 220,
            TermClass::Months240 => 240,
        }
    }

    /// Installments after the first twelve.
    #[must_use]
    pub fn remaining_installments(&self) -> u32 {
        self.months() - FIRST_TIER_INSTALLMENTS
    }

    /// Returns true if `installment` is a valid 1-based installment number.
    #[must_use]
    pub fn contains(&self, installment: u32) -> bool {
        (1..=self.months()).contains(&installment)
    }
}

impl TryFrom<u32> for TermClass {
    type Error = ConsorcioError;

    fn try_from(months: u32) -> Result<Self, Self::Error> {
        Self::from_months(months)
    }
}

impl From<TermClass> for u32 {
    fn from(term: TermClass) -> Self {
        term.months()
    }
}

impl fmt::Display for TermClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}
