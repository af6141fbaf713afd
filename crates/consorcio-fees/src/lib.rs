//! # Consorcio Fees
//!
//! Fee tables and installment composition for consortium products.
//!
//! A product is described by one or more [`FeeTable`]s, each covering a
//! credit range. Selecting the table for a credit amount and feeding it to
//! [`compute_installment`] yields the full monetary breakdown of the
//! contract's installments.
//!
//! ## Features
//!
//! - **Catalogs**: Product fee tables loaded from JSON or TOML and validated up front
//! - **Composition**: Common fund, admin fee, reserve fund, life insurance,
//!   and the anticipated fee, each rounded to cents independently
//! - **Commission schedules**: Per-installment sales commission tiers
//! - **Plans**: Due dates paired with amounts and commissions
//!
//! ## Example
//!
//! ```rust
//! use consorcio_fees::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let table = FeeTable::new("Imóvel", CreditRange::new(dec!(50000), dec!(500000)))
//!     .with_admin_fee(TermClass::Months220, Percent::new(dec!(22)))
//!     .with_reserve_fund(Percent::new(dec!(2.5)))
//!     .with_life_insurance(Percent::new(dec!(0.25)))
//!     .with_anticipated_fee(Percent::new(dec!(4)), AnticipatedFeeMode::FirstInstallment);
//!
//! let b = compute_installment(dec!(150000), TermClass::Months220, &table, PaymentReduction::Half, true)
//!     .unwrap();
//!
//! assert_eq!(b.common_fund, dec!(340.91));
//! assert_eq!(b.base_installment, dec!(965.46));
//! assert_eq!(b.total_paid, dec!(218401.20));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::return_self_not_must_use)]

pub mod catalog;
pub mod commission;
pub mod composition;
pub mod error;
pub mod plan;
pub mod reduction;
pub mod table;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::catalog::{ProductCatalog, ProductDefinition, ProductType};
    pub use crate::commission::{CommissionSchedule, CommissionTier};
    pub use crate::composition::{compute_installment, InstallmentBreakdown};
    pub use crate::error::{FeeError, FeeResult, ValidationError};
    pub use crate::plan::{ContractTerms, InstallmentPlan, PlannedInstallment};
    pub use crate::reduction::PaymentReduction;
    pub use crate::table::{AdminFeeByTerm, AnticipatedFeeMode, CreditRange, FeeTable, FeeTableSet};
    pub use consorcio_core::prelude::*;
}

pub use catalog::{ProductCatalog, ProductType};
pub use composition::{compute_installment, InstallmentBreakdown};
pub use error::{FeeError, FeeResult};
pub use reduction::PaymentReduction;
pub use table::{AnticipatedFeeMode, FeeTable, FeeTableSet};
