//! Fee tables and credit-range selection.

use consorcio_core::types::{Percent, TermClass};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::commission::CommissionSchedule;
use crate::error::{FeeError, FeeResult, ValidationError};

/// How the anticipated fee is collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnticipatedFeeMode {
    /// Divided evenly over the first twelve installments.
    #[default]
    SpreadFirstTwelve,
    /// Charged in full with the first installment.
    FirstInstallment,
}

impl fmt::Display for AnticipatedFeeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AnticipatedFeeMode::SpreadFirstTwelve => "Spread over first 12",
            AnticipatedFeeMode::FirstInstallment => "First installment",
        };
        write!(f, "{name}")
    }
}

/// Inclusive range of credit amounts a fee table applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditRange {
    /// Smallest credit amount covered.
    pub min: Decimal,
    /// Largest credit amount covered.
    pub max: Decimal,
}

impl CreditRange {
    /// Creates an inclusive range.
    #[must_use]
    pub fn new(min: Decimal, max: Decimal) -> Self {
        Self { min, max }
    }

    /// Returns true if `amount` lies within the range.
    #[must_use]
    pub fn contains(&self, amount: Decimal) -> bool {
        self.min <= amount && amount <= self.max
    }

    /// Returns true if the two ranges share at least one amount.
    #[must_use]
    pub fn overlaps(&self, other: &CreditRange) -> bool {
        self.min <= other.max && other.min <= self.max
    }
}

impl fmt::Display for CreditRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

/// Administrative fee percentage per term class.
///
/// A term class without a percentage is not offered by the table; quoting it
/// is an error rather than a 0% fee.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct AdminFeeByTerm {
    /// Admin fee for 200-month contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_200: Option<Percent>,
    /// Admin fee for 220-month contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_220: Option<Percent>,
    /// Admin fee for 240-month contracts.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub months_240: Option<Percent>,
}

impl AdminFeeByTerm {
    /// The same admin fee for every term class.
    #[must_use]
    pub fn flat(percent: Percent) -> Self {
        Self {
            months_200: Some(percent),
            months_220: Some(percent),
            months_240: Some(percent),
        }
    }

    /// Admin fee for a term class, if the table offers it.
    #[must_use]
    pub fn for_term(&self, term: TermClass) -> Option<Percent> {
        match term {
            TermClass::Months200 => self.months_200,
            TermClass::Months220 => self.months_220,
            TermClass::Months240 => self.months_240,
        }
    }

    /// Returns a copy with the admin fee for `term` set.
    #[must_use]
    pub fn with(mut self, term: TermClass, percent: Percent) -> Self {
        let slot = match term {
            TermClass::Months200 => &mut self.months_200,
            TermClass::Months220 => &mut self.months_220,
            TermClass::Months240 => &mut self.months_240,
        };
        *slot = Some(percent);
        self
    }

    fn entries(&self) -> [(&'static str, Option<Percent>); 3] {
        [
            ("admin_fee.months_200", self.months_200),
            ("admin_fee.months_220", self.months_220),
            ("admin_fee.months_240", self.months_240),
        ]
    }
}

/// One consortium product variant.
///
/// Every percentage is explicit: there are no implicit defaults inside the
/// calculation functions.
///
/// # Example
///
/// ```rust
/// use consorcio_core::types::{Percent, TermClass};
/// use consorcio_fees::table::{AnticipatedFeeMode, CreditRange, FeeTable};
/// use rust_decimal_macros::dec;
///
/// let table = FeeTable::new("Imóvel A", CreditRange::new(dec!(80000), dec!(300000)))
///     .with_admin_fee(TermClass::Months200, Percent::new(dec!(20)))
///     .with_reserve_fund(Percent::new(dec!(2)))
///     .with_life_insurance(Percent::new(dec!(0.2)))
///     .with_anticipated_fee(Percent::new(dec!(5)), AnticipatedFeeMode::SpreadFirstTwelve);
///
/// assert_eq!(table.admin_fee_for_term(TermClass::Months200), Ok(Percent::new(dec!(20))));
/// assert!(table.admin_fee_for_term(TermClass::Months240).is_err());
/// assert!(table.validate().is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeeTable {
    /// Table name, unique within a product.
    pub name: String,
    /// Credit amounts this table applies to.
    pub credit_range: CreditRange,
    /// Administrative fee per term class.
    pub admin_fee: AdminFeeByTerm,
    /// Reserve fund percentage.
    pub reserve_fund: Percent,
    /// Monthly life insurance percentage.
    pub life_insurance: Percent,
    /// Anticipated fee percentage.
    pub anticipated_fee: Percent,
    /// How the anticipated fee is collected.
    pub anticipated_fee_mode: AnticipatedFeeMode,
    /// Sales commission schedule.
    #[serde(default)]
    pub commission: CommissionSchedule,
}

impl FeeTable {
    /// Creates a table with no admin fee for any term and every other
    /// percentage at zero.
    #[must_use]
    pub fn new(name: impl Into<String>, credit_range: CreditRange) -> Self {
        Self {
            name: name.into(),
            credit_range,
            admin_fee: AdminFeeByTerm::default(),
            reserve_fund: Percent::ZERO,
            life_insurance: Percent::ZERO,
            anticipated_fee: Percent::ZERO,
            anticipated_fee_mode: AnticipatedFeeMode::default(),
            commission: CommissionSchedule::default(),
        }
    }

    /// Sets the admin fee for one term class.
    #[must_use]
    pub fn with_admin_fee(mut self, term: TermClass, percent: Percent) -> Self {
        self.admin_fee = self.admin_fee.with(term, percent);
        self
    }

    /// Sets the admin fee for every term class.
    #[must_use]
    pub fn with_admin_fees(mut self, admin_fee: AdminFeeByTerm) -> Self {
        self.admin_fee = admin_fee;
        self
    }

    /// Sets the reserve fund percentage.
    #[must_use]
    pub fn with_reserve_fund(mut self, percent: Percent) -> Self {
        self.reserve_fund = percent;
        self
    }

    /// Sets the life insurance percentage.
    #[must_use]
    pub fn with_life_insurance(mut self, percent: Percent) -> Self {
        self.life_insurance = percent;
        self
    }

    /// Sets the anticipated fee and how it is collected.
    #[must_use]
    pub fn with_anticipated_fee(mut self, percent: Percent, mode: AnticipatedFeeMode) -> Self {
        self.anticipated_fee = percent;
        self.anticipated_fee_mode = mode;
        self
    }

    /// Sets the commission schedule.
    #[must_use]
    pub fn with_commission(mut self, commission: CommissionSchedule) -> Self {
        self.commission = commission;
        self
    }

    /// Admin fee percentage for a term class.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::MissingAdminFee` if the table has no admin fee for
    /// `term`.
    pub fn admin_fee_for_term(&self, term: TermClass) -> FeeResult<Percent> {
        self.admin_fee
            .for_term(term)
            .ok_or_else(|| FeeError::MissingAdminFee {
                table: self.name.clone(),
                term,
            })
    }

    /// Checks names, ranges, percentages, and the commission schedule.
    pub fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        if self.credit_range.min.is_sign_negative() || self.credit_range.min > self.credit_range.max {
            errors.push(ValidationError::with_rule(
                "credit_range",
                format!("Range {} is not a valid non-negative interval", self.credit_range),
                "valid_range",
            ));
        }

        let admin_fees = self
            .admin_fee
            .entries()
            .into_iter()
            .filter_map(|(field, percent)| percent.map(|p| (field, p)));
        let percents = [
            ("reserve_fund", self.reserve_fund),
            ("life_insurance", self.life_insurance),
            ("anticipated_fee", self.anticipated_fee),
        ];
        for (field, percent) in admin_fees.chain(percents) {
            if percent.is_negative() {
                errors.push(ValidationError::with_rule(
                    field,
                    format!("Percentage {percent} is negative"),
                    "non_negative",
                ));
            }
        }

        errors.extend(self.commission.validate("commission"));
        errors
    }
}

/// The fee tables of one product, with non-overlapping credit ranges.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct FeeTableSet {
    tables: Vec<FeeTable>,
}

impl FeeTableSet {
    /// Builds a set after validating every table and checking ranges.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::Validation` if a table is malformed, or
    /// `FeeError::OverlappingFeeTables` if two credit ranges overlap.
    pub fn new(tables: Vec<FeeTable>) -> FeeResult<Self> {
        let errors: Vec<ValidationError> = tables
            .iter()
            .flat_map(|table| {
                table.validate().into_iter().map(|mut err| {
                    err.field = format!("{}.{}", table.name, err.field);
                    err
                })
            })
            .collect();
        if !errors.is_empty() {
            return Err(FeeError::Validation(errors));
        }

        for (i, first) in tables.iter().enumerate() {
            if let Some(second) = tables[i + 1..]
                .iter()
                .find(|other| first.credit_range.overlaps(&other.credit_range))
            {
                return Err(FeeError::OverlappingFeeTables {
                    first: first.name.clone(),
                    second: second.name.clone(),
                });
            }
        }

        Ok(Self { tables })
    }

    /// The tables in declaration order.
    #[must_use]
    pub fn tables(&self) -> &[FeeTable] {
        &self.tables
    }

    /// Number of tables.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tables.len()
    }

    /// Returns true if there are no tables.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// First table whose range contains `credit_amount`.
    ///
    /// Never falls back to a default table: an uncovered amount is an error
    /// the caller must handle.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::NoMatchingFeeTable` if no range contains the amount.
    pub fn select(&self, credit_amount: Decimal) -> FeeResult<&FeeTable> {
        self.tables
            .iter()
            .find(|table| table.credit_range.contains(credit_amount))
            .ok_or_else(|| FeeError::no_matching_table("this product", credit_amount))
    }
}

impl<'de> Deserialize<'de> for FeeTableSet {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let tables = Vec::<FeeTable>::deserialize(deserializer)?;
        FeeTableSet::new(tables).map_err(serde::de::Error::custom)
    }
}
