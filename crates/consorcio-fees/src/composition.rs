//! Installment composition.
//!
//! Splits a credit amount into the monetary components of one installment.
//! Each component is rounded to cents independently, right after it is
//! computed; tiers and totals are then exact sums of rounded components.

use consorcio_core::types::{round_money, Percent, TermClass, FIRST_TIER_INSTALLMENTS};
use consorcio_core::ConsorcioError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::FeeResult;
use crate::reduction::PaymentReduction;
use crate::table::{AnticipatedFeeMode, FeeTable};

/// Monetary decomposition of a contract's installments.
///
/// Every intermediate component is exposed so commission and display layers
/// can consume them independently.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentBreakdown {
    /// Original credit amount.
    pub credit_amount: Decimal,
    /// Term class of the contract.
    pub term: TermClass,
    /// Reduction scheme applied to the common fund.
    pub reduction: PaymentReduction,
    /// Credit amount after the reduction multiplier (unrounded).
    pub credit_base: Decimal,
    /// Common fund per installment.
    pub common_fund: Decimal,
    /// Admin fee percentage used for this term class.
    pub admin_fee_percent: Percent,
    /// Admin fee per installment.
    pub admin_fee: Decimal,
    /// Reserve fund per installment.
    pub reserve_fund: Decimal,
    /// Life insurance premium per installment (zero when not included).
    pub life_insurance: Decimal,
    /// Sum of the four components above.
    pub base_installment: Decimal,
    /// Total anticipated fee.
    pub anticipated_fee: Decimal,
    /// How the anticipated fee is collected.
    pub anticipated_fee_mode: AnticipatedFeeMode,
    /// Anticipated fee added to each of the first twelve installments
    /// (zero when the fee is charged in the first installment).
    pub anticipated_fee_share: Decimal,
    /// Installment amount for months 1 to 12.
    pub installment_1_to_12: Decimal,
    /// Installment amount for the remaining months.
    pub installment_remaining: Decimal,
    /// Total payable over the term.
    pub total_paid: Decimal,
}

impl InstallmentBreakdown {
    /// Installment amount for a 1-based installment number, excluding any
    /// anticipated fee charged separately with the first installment.
    ///
    /// Returns `None` outside `1..=term.months()`.
    #[must_use]
    pub fn installment_amount(&self, installment: u32) -> Option<Decimal> {
        if !self.term.contains(installment) {
            return None;
        }
        if installment <= FIRST_TIER_INSTALLMENTS {
            Some(self.installment_1_to_12)
        } else {
            Some(self.installment_remaining)
        }
    }

    /// Anticipated fee charged on its own with `installment`.
    ///
    /// Non-zero only for installment 1 in
    /// [`AnticipatedFeeMode::FirstInstallment`] mode.
    #[must_use]
    pub fn separate_charge(&self, installment: u32) -> Decimal {
        match self.anticipated_fee_mode {
            AnticipatedFeeMode::FirstInstallment if installment == 1 => self.anticipated_fee,
            _ => Decimal::ZERO,
        }
    }
}

/// Computes the installment breakdown of a contract.
///
/// The admin fee, reserve fund, and anticipated fee apply to the original
/// credit amount; only the common fund uses the reduced base.
///
/// # Errors
///
/// Returns `ConsorcioError::InvalidAmount` (wrapped) for a negative credit
/// amount and `FeeError::MissingAdminFee` if the table does not price `term`.
///
/// # Example
///
/// ```rust
/// use consorcio_core::types::{Percent, TermClass};
/// use consorcio_fees::composition::compute_installment;
/// use consorcio_fees::reduction::PaymentReduction;
/// use consorcio_fees::table::{AnticipatedFeeMode, CreditRange, FeeTable};
/// use rust_decimal_macros::dec;
///
/// let table = FeeTable::new("Imóvel", CreditRange::new(dec!(0), dec!(500000)))
///     .with_admin_fee(TermClass::Months200, Percent::new(dec!(20)))
///     .with_reserve_fund(Percent::new(dec!(2)))
///     .with_life_insurance(Percent::new(dec!(0.2)))
///     .with_anticipated_fee(Percent::new(dec!(5)), AnticipatedFeeMode::SpreadFirstTwelve);
///
/// let b = compute_installment(dec!(100000), TermClass::Months200, &table, PaymentReduction::Full, true)
///     .unwrap();
///
/// assert_eq!(b.installment_1_to_12, dec!(1266.67));
/// assert_eq!(b.installment_remaining, dec!(850.00));
/// assert_eq!(b.total_paid, dec!(175000.04));
/// ```
pub fn compute_installment(
    credit_amount: Decimal,
    term: TermClass,
    table: &FeeTable,
    reduction: PaymentReduction,
    include_insurance: bool,
) -> FeeResult<InstallmentBreakdown> {
    if credit_amount.is_sign_negative() && !credit_amount.is_zero() {
        return Err(ConsorcioError::invalid_amount(
            credit_amount,
            "credit amount must not be negative",
        )
        .into());
    }

    let months = Decimal::from(term.months());

    let credit_base = reduction.apply(credit_amount);
    let common_fund = round_money(credit_base / months);

    let admin_fee_percent = table.admin_fee_for_term(term)?;
    let admin_fee_total = admin_fee_percent.of(credit_amount);
    let admin_fee = round_money(admin_fee_total / months);

    let reserve_fund = round_money(table.reserve_fund.of(credit_amount) / months);

    let life_insurance = if include_insurance {
        let insurance_base = credit_amount + admin_fee_total;
        round_money(table.life_insurance.of(insurance_base))
    } else {
        Decimal::ZERO
    };

    let base_installment = common_fund + admin_fee + reserve_fund + life_insurance;

    let anticipated_fee = round_money(table.anticipated_fee.of(credit_amount));
    let first_tier = Decimal::from(FIRST_TIER_INSTALLMENTS);
    let remaining = Decimal::from(term.remaining_installments());

    // The two modes total differently: only the first-installment mode adds
    // the fee on top of the tiers.
    let (anticipated_fee_share, total_extra) = match table.anticipated_fee_mode {
        AnticipatedFeeMode::SpreadFirstTwelve => {
            (round_money(anticipated_fee / first_tier), Decimal::ZERO)
        }
        AnticipatedFeeMode::FirstInstallment => (Decimal::ZERO, anticipated_fee),
    };

    let installment_1_to_12 = base_installment + anticipated_fee_share;
    let installment_remaining = base_installment;
    let total_paid =
        installment_1_to_12 * first_tier + installment_remaining * remaining + total_extra;

    Ok(InstallmentBreakdown {
        credit_amount,
        term,
        reduction,
        credit_base,
        common_fund,
        admin_fee_percent,
        admin_fee,
        reserve_fund,
        life_insurance,
        base_installment,
        anticipated_fee,
        anticipated_fee_mode: table.anticipated_fee_mode,
        anticipated_fee_share,
        installment_1_to_12,
        installment_remaining,
        total_paid,
    })
}
