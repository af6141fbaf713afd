//! Per-contract commission reconciliation.
//!
//! Persisted commission records are compared against the canonical formula.
//! Records that deviate by more than one cent are reported as corrections;
//! everything else is left alone. Applying the corrections is the caller's
//! job, and re-running the pass on corrected records reports nothing.

use std::collections::BTreeMap;
use std::fmt;

use consorcio_core::types::{TermClass, CENT};
use consorcio_core::ConsorcioError;
use consorcio_fees::{ProductCatalog, ProductType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::CommissionResult;
use crate::formula::canonical_commission;

/// Absolute tolerance under which a stored commission is considered correct.
pub const MATERIALITY_THRESHOLD: Decimal = CENT;

/// Returns true if `stored` differs from `canonical` by more than one cent.
#[must_use]
pub fn is_material(stored: Decimal, canonical: Decimal) -> bool {
    (stored - canonical).abs() > MATERIALITY_THRESHOLD
}

/// A persisted commission value for one installment of a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionRecord {
    /// 1-based installment number.
    pub installment: u32,
    /// Stored commission value.
    pub value: Decimal,
}

impl CommissionRecord {
    /// Creates a record.
    #[must_use]
    pub fn new(installment: u32, value: Decimal) -> Self {
        Self { installment, value }
    }
}

/// A stored value that must be replaced.
///
/// Records are identified by position, so two records sharing an installment
/// number are corrected independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommissionCorrection {
    /// Index of the record in the reconciled slice.
    pub record_index: usize,
    /// Installment number of the record.
    pub installment: u32,
    /// Value currently stored.
    pub old_value: Decimal,
    /// Canonical value to store instead.
    pub new_value: Decimal,
}

impl CommissionCorrection {
    /// Signed change `new_value - old_value`.
    #[must_use]
    pub fn delta(&self) -> Decimal {
        self.new_value - self.old_value
    }
}

/// Data-integrity findings on stored records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IntegrityWarning {
    /// The installment number lies outside `1..=term_months`.
    OutOfRange {
        /// The offending installment number.
        installment: u32,
        /// Number of installments of the contract.
        term_months: u32,
    },
    /// Several records share one installment number.
    DuplicateInstallment {
        /// The repeated installment number.
        installment: u32,
        /// How many records carry it.
        occurrences: usize,
    },
}

impl fmt::Display for IntegrityWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegrityWarning::OutOfRange {
                installment,
                term_months,
            } => write!(
                f,
                "Installment {installment} is outside the contract term of {term_months} months"
            ),
            IntegrityWarning::DuplicateInstallment {
                installment,
                occurrences,
            } => write!(f, "Installment {installment} has {occurrences} commission records"),
        }
    }
}

/// The decision set of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Number of records that must be updated.
    pub updated_count: usize,
    /// Sum of the stored values of the records to update.
    pub before: Decimal,
    /// Sum of the canonical values of the records to update.
    pub after: Decimal,
    /// One entry per record to update, in record order.
    pub corrections: Vec<CommissionCorrection>,
    /// Integrity findings, in record order.
    pub warnings: Vec<IntegrityWarning>,
}

impl ReconciliationReport {
    /// Returns true if nothing needs updating and nothing looked wrong.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.corrections.is_empty() && self.warnings.is_empty()
    }

    /// Net change in total commission, `after - before`.
    #[must_use]
    pub fn delta(&self) -> Decimal {
        self.after - self.before
    }

    /// Returns `records` with every correction applied.
    ///
    /// `records` must be the slice the report was built from. Records
    /// without a correction are returned unchanged and in the same order.
    #[must_use]
    pub fn apply(&self, records: &[CommissionRecord]) -> Vec<CommissionRecord> {
        let mut corrected = records.to_vec();
        for correction in &self.corrections {
            if let Some(record) = corrected.get_mut(correction.record_index) {
                record.value = correction.new_value;
            }
        }
        corrected
    }

    fn warn_once(&mut self, warning: IntegrityWarning, product: ProductType, credit_amount: Decimal) {
        if !self.warnings.contains(&warning) {
            tracing::warn!(product = %product, credit_amount = %credit_amount, "{warning}");
            self.warnings.push(warning);
        }
    }
}

/// Reconciles the stored commissions of one contract.
///
/// Each record with an installment number in `1..=term.months()` is compared
/// with the canonical commission for its installment. Out-of-range records
/// are reported as warnings and left alone. Duplicated installment numbers
/// are reported once and every copy is still reconciled.
///
/// # Errors
///
/// Returns `CommissionError::Fee` if no fee table applies to the contract and
/// `CommissionError::Core` for a negative credit amount.
///
/// # Example
///
/// ```rust
/// use consorcio_commission::reconcile::{reconcile, CommissionRecord};
/// use consorcio_core::types::{Percent, TermClass};
/// use consorcio_fees::commission::{CommissionSchedule, CommissionTier};
/// use consorcio_fees::table::{CreditRange, FeeTable, FeeTableSet};
/// use consorcio_fees::{ProductCatalog, ProductType};
/// use rust_decimal_macros::dec;
///
/// let table = FeeTable::new("Serviços", CreditRange::new(dec!(0), dec!(100000)))
///     .with_commission(CommissionSchedule::new(vec![
///         CommissionTier::new(1, 2, Percent::new(dec!(1))),
///     ]));
/// let catalog = ProductCatalog::new()
///     .with_product(ProductType::Services, FeeTableSet::new(vec![table]).unwrap());
///
/// let stored = [
///     CommissionRecord::new(1, dec!(500.00)),
///     CommissionRecord::new(2, dec!(480.00)),
/// ];
/// let report = reconcile(&catalog, dec!(50000), ProductType::Services, TermClass::Months200, &stored)
///     .unwrap();
///
/// assert_eq!(report.updated_count, 1);
/// assert_eq!(report.before, dec!(480.00));
/// assert_eq!(report.after, dec!(500.00));
///
/// let fixed = report.apply(&stored);
/// let again = reconcile(&catalog, dec!(50000), ProductType::Services, TermClass::Months200, &fixed)
///     .unwrap();
/// assert_eq!(again.updated_count, 0);
/// ```
pub fn reconcile(
    catalog: &ProductCatalog,
    credit_amount: Decimal,
    product: ProductType,
    term: TermClass,
    records: &[CommissionRecord],
) -> CommissionResult<ReconciliationReport> {
    if credit_amount.is_sign_negative() && !credit_amount.is_zero() {
        return Err(ConsorcioError::invalid_amount(
            credit_amount,
            "credit amount must not be negative",
        )
        .into());
    }

    let table = catalog.select(product, credit_amount)?;

    let mut occurrences: BTreeMap<u32, usize> = BTreeMap::new();
    for record in records {
        *occurrences.entry(record.installment).or_default() += 1;
    }

    let mut report = ReconciliationReport::default();
    for (record_index, record) in records.iter().enumerate() {
        let k = record.installment;

        if !term.contains(k) {
            let warning = IntegrityWarning::OutOfRange {
                installment: k,
                term_months: term.months(),
            };
            report.warn_once(warning, product, credit_amount);
            continue;
        }

        let count = occurrences.get(&k).copied().unwrap_or(1);
        if count > 1 {
            let warning = IntegrityWarning::DuplicateInstallment {
                installment: k,
                occurrences: count,
            };
            report.warn_once(warning, product, credit_amount);
        }

        let canonical = canonical_commission(table, credit_amount, k);
        if is_material(record.value, canonical) {
            report.before += record.value;
            report.after += canonical;
            report.corrections.push(CommissionCorrection {
                record_index,
                installment: k,
                old_value: record.value,
                new_value: canonical,
            });
        }
    }
    report.updated_count = report.corrections.len();

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CommissionError;
    use consorcio_core::types::Percent;
    use consorcio_fees::commission::{CommissionSchedule, CommissionTier};
    use consorcio_fees::table::{CreditRange, FeeTable, FeeTableSet};
    use rust_decimal_macros::dec;

    fn catalog() -> ProductCatalog {
        let table = FeeTable::new("veículos", CreditRange::new(dec!(10000), dec!(300000)))
            .with_commission(CommissionSchedule::new(vec![
                CommissionTier::new(1, 1, Percent::new(dec!(1.5))),
                CommissionTier::new(2, 6, Percent::new(dec!(0.25))),
            ]));
        ProductCatalog::new().with_product(
            ProductType::Vehicle,
            FeeTableSet::new(vec![table]).unwrap(),
        )
    }

    fn run(records: &[CommissionRecord]) -> ReconciliationReport {
        reconcile(
            &catalog(),
            dec!(80000),
            ProductType::Vehicle,
            TermClass::Months200,
            records,
        )
        .unwrap()
    }

    #[test]
    fn test_materiality_is_absolute_cent() {
        assert!(!is_material(dec!(100.00), dec!(100.01)));
        assert!(!is_material(dec!(100.01), dec!(100.00)));
        assert!(is_material(dec!(100.00), dec!(100.011)));
        assert!(is_material(dec!(0), dec!(0.02)));
    }

    #[test]
    fn test_correct_records_untouched() {
        // 1.5% and 0.25% of 80000
        let records = [
            CommissionRecord::new(1, dec!(1200.00)),
            CommissionRecord::new(2, dec!(200.00)),
            CommissionRecord::new(7, dec!(0)),
        ];
        let report = run(&records);
        assert!(report.is_clean());
        assert_eq!(report.updated_count, 0);
        assert_eq!(report.before, Decimal::ZERO);
        assert_eq!(report.after, Decimal::ZERO);
    }

    #[test]
    fn test_within_tolerance_untouched() {
        let report = run(&[CommissionRecord::new(2, dec!(200.01))]);
        assert_eq!(report.updated_count, 0);
    }

    #[test]
    fn test_material_deviation_corrected() {
        let records = [
            CommissionRecord::new(1, dec!(1000.00)),
            CommissionRecord::new(2, dec!(200.00)),
            CommissionRecord::new(3, dec!(199.98)),
            CommissionRecord::new(10, dec!(50.00)),
        ];
        let report = run(&records);

        assert_eq!(report.updated_count, 3);
        assert_eq!(
            report.corrections,
            vec![
                CommissionCorrection {
                    record_index: 0,
                    installment: 1,
                    old_value: dec!(1000.00),
                    new_value: dec!(1200.00),
                },
                CommissionCorrection {
                    record_index: 2,
                    installment: 3,
                    old_value: dec!(199.98),
                    new_value: dec!(200.00),
                },
                CommissionCorrection {
                    record_index: 3,
                    installment: 10,
                    old_value: dec!(50.00),
                    new_value: dec!(0),
                },
            ]
        );
        assert_eq!(report.before, dec!(1249.98));
        assert_eq!(report.after, dec!(1400.00));
        assert_eq!(report.delta(), dec!(150.02));
    }

    #[test]
    fn test_apply_then_rerun_is_clean() {
        let records = vec![
            CommissionRecord::new(1, dec!(0)),
            CommissionRecord::new(4, dec!(12.34)),
            CommissionRecord::new(150, dec!(9.99)),
        ];
        let first = run(&records);
        assert_eq!(first.updated_count, 3);

        let fixed = first.apply(&records);
        assert_eq!(fixed.len(), records.len());
        assert_eq!(fixed[0], CommissionRecord::new(1, dec!(1200.00)));

        let second = run(&fixed);
        assert_eq!(second.updated_count, 0);
        assert!(second.corrections.is_empty());
    }

    #[test]
    fn test_out_of_range_warns() {
        let records = [
            CommissionRecord::new(0, dec!(10)),
            CommissionRecord::new(201, dec!(10)),
            CommissionRecord::new(200, dec!(10)),
            CommissionRecord::new(0, dec!(10)),
        ];
        let report = run(&records);

        assert_eq!(
            report.warnings,
            vec![
                IntegrityWarning::OutOfRange {
                    installment: 0,
                    term_months: 200
                },
                IntegrityWarning::OutOfRange {
                    installment: 201,
                    term_months: 200
                },
            ]
        );
        // Installment 200 is in range and earns nothing
        assert_eq!(report.updated_count, 1);
        assert_eq!(report.corrections[0].installment, 200);
        assert_eq!(report.corrections[0].record_index, 2);
        assert_eq!(report.apply(&records)[0], records[0]);
    }

    #[test]
    fn test_duplicates_warn_once_and_are_each_corrected() {
        // 0.25% of 80000 = 200 for installment 2
        let records = [
            CommissionRecord::new(2, dec!(0)),
            CommissionRecord::new(2, dec!(999)),
            CommissionRecord::new(2, dec!(200.00)),
        ];
        let report = run(&records);

        assert_eq!(
            report.warnings,
            vec![IntegrityWarning::DuplicateInstallment {
                installment: 2,
                occurrences: 3
            }]
        );
        assert_eq!(report.updated_count, 2);
        let indices: Vec<_> = report.corrections.iter().map(|c| c.record_index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(report.before, dec!(999));
        assert_eq!(report.after, dec!(400.00));

        let fixed = report.apply(&records);
        assert!(fixed.iter().all(|r| r.value == dec!(200.00)));

        let second = run(&fixed);
        assert_eq!(second.updated_count, 0);
        assert_eq!(second.warnings, report.warnings);
    }

    #[test]
    fn test_empty_records() {
        assert_eq!(run(&[]), ReconciliationReport::default());
    }

    #[test]
    fn test_negative_credit_rejected() {
        let result = reconcile(
            &catalog(),
            dec!(-5),
            ProductType::Vehicle,
            TermClass::Months200,
            &[],
        );
        assert!(matches!(result, Err(CommissionError::Core(_))));
    }

    #[test]
    fn test_uncovered_credit_is_error() {
        let result = reconcile(
            &catalog(),
            dec!(5000),
            ProductType::Vehicle,
            TermClass::Months200,
            &[CommissionRecord::new(1, dec!(1))],
        );
        assert!(matches!(result, Err(CommissionError::Fee(_))));
    }

    #[test]
    fn test_warning_display() {
        let warning = IntegrityWarning::OutOfRange {
            installment: 230,
            term_months: 220,
        };
        assert_eq!(
            warning.to_string(),
            "Installment 230 is outside the contract term of 220 months"
        );
    }
}
