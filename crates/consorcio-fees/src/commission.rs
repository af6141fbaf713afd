//! Sales commission schedules attached to fee tables.

use consorcio_core::types::{round_money, Percent};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A run of installments paying the same commission percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionTier {
    /// First installment of the tier (1-based, inclusive).
    pub from_installment: u32,
    /// Last installment of the tier (inclusive).
    pub to_installment: u32,
    /// Commission per installment, as a percentage of the original credit amount.
    pub percent: Percent,
}

impl CommissionTier {
    /// Creates a tier covering `from..=to`.
    #[must_use]
    pub fn new(from_installment: u32, to_installment: u32, percent: Percent) -> Self {
        Self {
            from_installment,
            to_installment,
            percent,
        }
    }

    /// Returns true if the tier covers `installment`.
    #[must_use]
    pub fn covers(&self, installment: u32) -> bool {
        (self.from_installment..=self.to_installment).contains(&installment)
    }

    fn len(&self) -> u32 {
        self.to_installment.saturating_sub(self.from_installment) + 1
    }
}

/// Per-installment commission percentages of a fee table.
///
/// Installments not covered by any tier pay no commission.
///
/// # Example
///
/// ```rust
/// use consorcio_core::types::Percent;
/// use consorcio_fees::commission::{CommissionSchedule, CommissionTier};
/// use rust_decimal_macros::dec;
///
/// let schedule = CommissionSchedule::new(vec![
///     CommissionTier::new(1, 1, Percent::new(dec!(1.5))),
///     CommissionTier::new(2, 4, Percent::new(dec!(0.5))),
/// ]);
///
/// assert_eq!(schedule.commission_for(dec!(100000), 1), dec!(1500));
/// assert_eq!(schedule.commission_for(dec!(100000), 3), dec!(500));
/// assert_eq!(schedule.commission_for(dec!(100000), 5), dec!(0));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommissionSchedule {
    tiers: Vec<CommissionTier>,
}

impl CommissionSchedule {
    /// Creates a schedule from its tiers.
    #[must_use]
    pub fn new(tiers: Vec<CommissionTier>) -> Self {
        Self { tiers }
    }

    /// The tiers in declaration order.
    #[must_use]
    pub fn tiers(&self) -> &[CommissionTier] {
        &self.tiers
    }

    /// Commission percentage for a 1-based installment number.
    #[must_use]
    pub fn rate_for(&self, installment: u32) -> Percent {
        self.tiers
            .iter()
            .find(|tier| tier.covers(installment))
            .map_or(Percent::ZERO, |tier| tier.percent)
    }

    /// Commission owed on `installment`, rounded to cents.
    ///
    /// A pure function of its arguments: it never looks at other
    /// installments.
    #[must_use]
    pub fn commission_for(&self, credit_amount: Decimal, installment: u32) -> Decimal {
        round_money(self.rate_for(installment).of(credit_amount))
    }

    /// Sum of the percentages over every covered installment.
    #[must_use]
    pub fn total_percent(&self) -> Percent {
        let points = self
            .tiers
            .iter()
            .map(|tier| tier.percent.as_points() * Decimal::from(tier.len()))
            .sum();
        Percent::new(points)
    }

    /// Last installment that pays commission, if any.
    #[must_use]
    pub fn last_paying_installment(&self) -> Option<u32> {
        self.tiers.iter().map(|tier| tier.to_installment).max()
    }

    /// Checks tier bounds, percentages, and overlaps.
    pub fn validate(&self, field: &str) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        for (index, tier) in self.tiers.iter().enumerate() {
            let tier_field = format!("{field}[{index}]");
            if tier.from_installment == 0 {
                errors.push(ValidationError::with_rule(
                    &tier_field,
                    "Installments are numbered from 1",
                    "one_based",
                ));
            }
            if tier.from_installment > tier.to_installment {
                errors.push(ValidationError::with_rule(
                    &tier_field,
                    format!(
                        "Tier starts at {} but ends at {}",
                        tier.from_installment, tier.to_installment
                    ),
                    "ordered_bounds",
                ));
            }
            if tier.percent.is_negative() {
                errors.push(ValidationError::with_rule(
                    &tier_field,
                    format!("Commission {} is negative", tier.percent),
                    "non_negative",
                ));
            }
        }

        for (i, first) in self.tiers.iter().enumerate() {
            for second in &self.tiers[i + 1..] {
                if first.from_installment <= second.to_installment
                    && second.from_installment <= first.to_installment
                {
                    errors.push(ValidationError::with_rule(
                        field,
                        format!(
                            "Tiers {}..={} and {}..={} overlap",
                            first.from_installment,
                            first.to_installment,
                            second.from_installment,
                            second.to_installment
                        ),
                        "disjoint_tiers",
                    ));
                }
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn schedule() -> CommissionSchedule {
        CommissionSchedule::new(vec![
            CommissionTier::new(1, 1, Percent::new(dec!(1.2))),
            CommissionTier::new(2, 6, Percent::new(dec!(0.3333))),
        ])
    }

    #[test]
    fn test_rate_for() {
        let s = schedule();
        assert_eq!(s.rate_for(0), Percent::ZERO);
        assert_eq!(s.rate_for(1), Percent::new(dec!(1.2)));
        assert_eq!(s.rate_for(6), Percent::new(dec!(0.3333)));
        assert_eq!(s.rate_for(7), Percent::ZERO);
    }

    #[test]
    fn test_commission_is_rounded() {
        // 0.3333% of 123456.78 = 411.4814...
        assert_eq!(schedule().commission_for(dec!(123456.78), 2), dec!(411.48));
    }

    #[test]
    fn test_total_percent() {
        assert_eq!(schedule().total_percent(), Percent::new(dec!(2.8665)));
        assert_eq!(CommissionSchedule::default().total_percent(), Percent::ZERO);
    }

    #[test]
    fn test_last_paying_installment() {
        assert_eq!(schedule().last_paying_installment(), Some(6));
        assert_eq!(CommissionSchedule::default().last_paying_installment(), None);
    }

    #[test]
    fn test_validate_ok() {
        assert!(schedule().validate("commission").is_empty());
    }

    #[test]
    fn test_validate_overlap_and_bounds() {
        let s = CommissionSchedule::new(vec![
            CommissionTier::new(0, 3, Percent::new(dec!(1))),
            CommissionTier::new(3, 2, Percent::new(dec!(-1))),
        ]);
        let errors = s.validate("commission");
        let rules: Vec<_> = errors.iter().filter_map(|e| e.rule.as_deref()).collect();
        assert!(rules.contains(&"one_based"));
        assert!(rules.contains(&"ordered_bounds"));
        assert!(rules.contains(&"non_negative"));
        assert!(rules.contains(&"disjoint_tiers"));
    }
}
