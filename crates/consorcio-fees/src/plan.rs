//! Installment plans: due dates paired with installment amounts.

use consorcio_core::calendars::Calendar;
use consorcio_core::schedule::DueDateSchedule;
use consorcio_core::types::{Date, TermClass};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::composition::{compute_installment, InstallmentBreakdown};
use crate::error::FeeResult;
use crate::reduction::PaymentReduction;
use crate::table::FeeTable;

/// Contract parameters that drive the installment amounts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractTerms {
    /// Credit amount of the quota.
    pub credit_amount: Decimal,
    /// Number of installments.
    pub term: TermClass,
    /// Common-fund reduction scheme.
    pub reduction: PaymentReduction,
    /// Whether life insurance is charged.
    pub include_insurance: bool,
}

impl ContractTerms {
    /// Terms with full payment and insurance included.
    #[must_use]
    pub fn new(credit_amount: Decimal, term: TermClass) -> Self {
        Self {
            credit_amount,
            term,
            reduction: PaymentReduction::Full,
            include_insurance: true,
        }
    }

    /// Sets the reduction scheme.
    #[must_use]
    pub fn with_reduction(mut self, reduction: PaymentReduction) -> Self {
        self.reduction = reduction;
        self
    }

    /// Sets whether life insurance is charged.
    #[must_use]
    pub fn with_insurance(mut self, include_insurance: bool) -> Self {
        self.include_insurance = include_insurance;
        self
    }
}

/// One row of an installment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedInstallment {
    /// 1-based installment number.
    pub number: u32,
    /// Business-day-resolved due date.
    pub due_date: Date,
    /// Installment amount from the breakdown tiers.
    pub amount: Decimal,
    /// Anticipated fee charged separately with this installment.
    pub anticipated_fee_charge: Decimal,
    /// Canonical sales commission for this installment.
    pub commission: Decimal,
}

impl PlannedInstallment {
    /// Amount due on this installment's date.
    #[must_use]
    pub fn total_due(&self) -> Decimal {
        self.amount + self.anticipated_fee_charge
    }
}

/// A complete installment plan.
///
/// Immutable once built; different inputs produce a new plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstallmentPlan {
    breakdown: InstallmentBreakdown,
    installments: Vec<PlannedInstallment>,
    coincident_dates: Vec<(u32, u32)>,
}

impl InstallmentPlan {
    /// Builds the plan for a contract.
    ///
    /// # Errors
    ///
    /// Returns the errors of [`compute_installment`] and of due-date
    /// generation (invalid due day, out-of-range dates).
    pub fn build<C: Calendar + ?Sized>(
        calendar: &C,
        contract_date: Date,
        due_day: u32,
        terms: &ContractTerms,
        table: &FeeTable,
    ) -> FeeResult<Self> {
        let breakdown = compute_installment(
            terms.credit_amount,
            terms.term,
            table,
            terms.reduction,
            terms.include_insurance,
        )?;
        let schedule = DueDateSchedule::generate(calendar, contract_date, due_day, terms.term.months())?;

        let installments = schedule
            .entries()
            .iter()
            .map(|entry| PlannedInstallment {
                number: entry.installment,
                due_date: entry.due_date,
                amount: breakdown
                    .installment_amount(entry.installment)
                    .unwrap_or(Decimal::ZERO),
                anticipated_fee_charge: breakdown.separate_charge(entry.installment),
                commission: table
                    .commission
                    .commission_for(terms.credit_amount, entry.installment),
            })
            .collect();

        Ok(Self {
            breakdown,
            installments,
            coincident_dates: schedule.coincident_dates(),
        })
    }

    /// The monetary breakdown the plan was built from.
    #[must_use]
    pub fn breakdown(&self) -> &InstallmentBreakdown {
        &self.breakdown
    }

    /// The installments in order.
    #[must_use]
    pub fn installments(&self) -> &[PlannedInstallment] {
        &self.installments
    }

    /// A 1-based installment.
    #[must_use]
    pub fn installment(&self, number: u32) -> Option<&PlannedInstallment> {
        let index = number.checked_sub(1)? as usize;
        self.installments.get(index)
    }

    /// Installment pairs whose due dates are not strictly increasing.
    #[must_use]
    pub fn coincident_dates(&self) -> &[(u32, u32)] {
        &self.coincident_dates
    }

    /// Sum of all amounts due; equals the breakdown's `total_paid`.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.installments.iter().map(PlannedInstallment::total_due).sum()
    }

    /// Sum of all canonical commissions.
    #[must_use]
    pub fn total_commission(&self) -> Decimal {
        self.installments.iter().map(|i| i.commission).sum()
    }
}
