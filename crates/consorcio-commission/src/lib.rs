//! # Consorcio Commission
//!
//! Canonical sales commissions and their reconciliation against persisted
//! values.
//!
//! The commission of an installment is derived from the same fee table that
//! drives installment composition, so it is a pure function of the credit
//! amount, the product, and the installment number. That makes it possible
//! to replay it at any time and correct stored values that have drifted.
//!
//! ## Design Philosophy
//!
//! - **Decisions, not side effects**: a pass returns what should change;
//!   persisting it is up to the caller
//! - **Idempotent**: applying a report and reconciling again yields no updates
//! - **Config-driven parallelism**: Optional rayon support for large batches
//!
//! ## Example
//!
//! ```rust
//! use consorcio_commission::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let table = FeeTable::new("Auto", CreditRange::new(dec!(10000), dec!(200000)))
//!     .with_commission(CommissionSchedule::new(vec![
//!         CommissionTier::new(1, 1, Percent::new(dec!(2))),
//!     ]));
//! let catalog = ProductCatalog::new()
//!     .with_product(ProductType::Vehicle, FeeTableSet::new(vec![table]).unwrap());
//!
//! let contracts = vec![
//!     ContractRecords::new("C-001", ProductType::Vehicle, dec!(40000), TermClass::Months200)
//!         .with_records(vec![CommissionRecord::new(1, dec!(750))]),
//! ];
//! let batch = reconcile_batch(&catalog, &contracts, &ReconcileConfig::default());
//!
//! assert_eq!(batch.updated_count(), 1);
//! assert_eq!(batch.after(), dec!(800));
//! ```
//!
//! ## Feature Flags
//!
//! - `parallel`: Reconcile large batches on the rayon thread pool

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod batch;
pub mod config;
pub mod error;
pub mod formula;
pub mod reconcile;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::batch::{reconcile_batch, BatchReconciliation, ContractOutcome, ContractRecords};
    pub use crate::config::ReconcileConfig;
    pub use crate::error::{CommissionError, CommissionResult};
    pub use crate::formula::commission_formula;
    pub use crate::reconcile::{
        is_material, reconcile, CommissionCorrection, CommissionRecord, IntegrityWarning,
        ReconciliationReport, MATERIALITY_THRESHOLD,
    };
    pub use consorcio_fees::prelude::*;
}

pub use batch::{reconcile_batch, BatchReconciliation, ContractRecords};
pub use config::ReconcileConfig;
pub use error::{CommissionError, CommissionResult};
pub use formula::commission_formula;
pub use reconcile::{reconcile, CommissionRecord, ReconciliationReport};
