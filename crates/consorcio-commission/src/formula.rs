//! The canonical per-installment commission.

use consorcio_fees::{FeeTable, ProductCatalog, ProductType};
use rust_decimal::Decimal;

use crate::error::CommissionResult;

/// Canonical commission of installment `installment` for a contract.
///
/// Selects the product's fee table for `credit_amount` exactly as installment
/// composition does, then applies that table's commission schedule. The
/// result depends on nothing but the arguments.
///
/// # Errors
///
/// Returns `CommissionError::Fee` if the product is unknown or no fee table
/// covers the credit amount.
///
/// # Example
///
/// ```rust
/// use consorcio_commission::formula::commission_formula;
/// use consorcio_fees::{FeeTable, ProductCatalog, ProductType};
/// use rust_decimal_macros::dec;
///
/// let catalog = ProductCatalog::from_json_str(r#"{"products": [{
///     "product": "vehicle",
///     "fee_tables": [{
///         "name": "Auto",
///         "credit_range": {"min": "10000", "max": "200000"},
///         "admin_fee": {"months_200": "15", "months_220": "15", "months_240": "15"},
///         "reserve_fund": "1", "life_insurance": "0.1", "anticipated_fee": "2",
///         "anticipated_fee_mode": "spread_first_twelve",
///         "commission": [{"from_installment": 1, "to_installment": 3, "percent": "0.4"}]
///     }]
/// }]}"#).unwrap();
///
/// assert_eq!(commission_formula(&catalog, dec!(50000), ProductType::Vehicle, 2).unwrap(), dec!(200));
/// assert_eq!(commission_formula(&catalog, dec!(50000), ProductType::Vehicle, 4).unwrap(), dec!(0));
/// ```
pub fn commission_formula(
    catalog: &ProductCatalog,
    credit_amount: Decimal,
    product: ProductType,
    installment: u32,
) -> CommissionResult<Decimal> {
    let table = catalog.select(product, credit_amount)?;
    Ok(canonical_commission(table, credit_amount, installment))
}

/// Canonical commission of `installment` under an already-selected table.
///
/// [`commission_formula`] and the reconciliation pass both go through here.
#[must_use]
pub fn canonical_commission(table: &FeeTable, credit_amount: Decimal, installment: u32) -> Decimal {
    table.commission.commission_for(credit_amount, installment)
}
