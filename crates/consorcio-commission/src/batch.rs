//! Reconciliation across many contracts.
//!
//! Contracts are independent, so a batch is a plain map over
//! [`reconcile`]. A failing contract is reported in its outcome and never
//! stops the rest of the batch.

use consorcio_core::types::TermClass;
use consorcio_fees::{ProductCatalog, ProductType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::config::ReconcileConfig;
use crate::error::CommissionResult;
use crate::reconcile::{reconcile, CommissionRecord, ReconciliationReport};

/// The stored commission records of one contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecords {
    /// Caller-side contract identifier, echoed in the outcome.
    pub contract_id: String,
    /// Product line of the contract.
    pub product: ProductType,
    /// Credit amount of the quota.
    pub credit_amount: Decimal,
    /// Number of installments.
    pub term: TermClass,
    /// Persisted commission values.
    pub records: Vec<CommissionRecord>,
}

impl ContractRecords {
    /// Creates an entry with no records.
    #[must_use]
    pub fn new(
        contract_id: impl Into<String>,
        product: ProductType,
        credit_amount: Decimal,
        term: TermClass,
    ) -> Self {
        Self {
            contract_id: contract_id.into(),
            product,
            credit_amount,
            term,
            records: Vec::new(),
        }
    }

    /// Sets the stored records.
    #[must_use]
    pub fn with_records(mut self, records: Vec<CommissionRecord>) -> Self {
        self.records = records;
        self
    }
}

/// Result of reconciling one contract.
#[derive(Debug, Clone, PartialEq)]
pub struct ContractOutcome {
    /// Identifier of the contract.
    pub contract_id: String,
    /// The report, or why the contract could not be reconciled.
    pub result: CommissionResult<ReconciliationReport>,
}

/// Outcomes of a batch, in input order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchReconciliation {
    /// One outcome per contract.
    pub outcomes: Vec<ContractOutcome>,
}

impl BatchReconciliation {
    /// Reports of the contracts that were reconciled.
    pub fn reports(&self) -> impl Iterator<Item = (&str, &ReconciliationReport)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(report) => Some((o.contract_id.as_str(), report)),
            Err(_) => None,
        })
    }

    /// Contracts that could not be reconciled.
    pub fn failures(&self) -> impl Iterator<Item = &ContractOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Total number of records to update across the batch.
    #[must_use]
    pub fn updated_count(&self) -> usize {
        self.reports().map(|(_, r)| r.updated_count).sum()
    }

    /// Total number of integrity warnings across the batch.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.reports().map(|(_, r)| r.warnings.len()).sum()
    }

    /// Sum of the stored values of every record to update.
    #[must_use]
    pub fn before(&self) -> Decimal {
        self.reports().map(|(_, r)| r.before).sum()
    }

    /// Sum of the canonical values of every record to update.
    #[must_use]
    pub fn after(&self) -> Decimal {
        self.reports().map(|(_, r)| r.after).sum()
    }
}

/// Runs `f` over every contract, on the rayon pool when `config` says the
/// batch is large enough. Results keep the order of `contracts`.
fn map_contracts<U, F>(contracts: &[ContractRecords], config: &ReconcileConfig, f: F) -> Vec<U>
where
    U: Send,
    F: Fn(&ContractRecords) -> U + Sync + Send,
{
    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        if config.runs_in_parallel(contracts.len()) {
            return contracts.par_iter().map(f).collect();
        }
    }
    #[cfg(not(feature = "parallel"))]
    let _ = config;

    contracts.iter().map(f).collect()
}

/// Reconciles every contract of a batch.
///
/// Output order matches input order whether or not the batch runs in
/// parallel.
pub fn reconcile_batch(
    catalog: &ProductCatalog,
    contracts: &[ContractRecords],
    config: &ReconcileConfig,
) -> BatchReconciliation {
    let outcomes = map_contracts(contracts, config, |contract| ContractOutcome {
        contract_id: contract.contract_id.clone(),
        result: reconcile(
            catalog,
            contract.credit_amount,
            contract.product,
            contract.term,
            &contract.records,
        ),
    });
    let batch = BatchReconciliation { outcomes };

    tracing::info!(
        contracts = contracts.len(),
        failed = batch.failures().count(),
        updated = batch.updated_count(),
        warnings = batch.warning_count(),
        before = %batch.before(),
        after = %batch.after(),
        parallel = config.runs_in_parallel(contracts.len()),
        "Commission reconciliation complete"
    );

    batch
}
