//! Product catalogs: the fee tables of every product type.
//!
//! Catalogs are plain data handed in by the caller, typically parsed from a
//! JSON or TOML document. The engine never reads them from the environment.
//!
//! ```toml
//! [[products]]
//! product = "real_estate"
//!
//! [[products.fee_tables]]
//! name = "Imóvel até 300k"
//! credit_range = { min = "80000", max = "300000" }
//! admin_fee = { months_200 = "20", months_220 = "22", months_240 = "24" }
//! reserve_fund = "2"
//! life_insurance = "0.2"
//! anticipated_fee = "5"
//! anticipated_fee_mode = "spread_first_twelve"
//! commission = [{ from_installment = 1, to_installment = 4, percent = "0.5" }]
//! ```

use std::collections::BTreeMap;
use std::fmt;

use consorcio_core::types::TermClass;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::composition::{compute_installment, InstallmentBreakdown};
use crate::error::{FeeError, FeeResult, ValidationError};
use crate::reduction::PaymentReduction;
use crate::table::{FeeTable, FeeTableSet};

/// Consortium product lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// Real estate (imóvel).
    RealEstate,
    /// Cars and light vehicles.
    Vehicle,
    /// Trucks, buses, and agricultural machinery.
    HeavyVehicle,
    /// Services.
    Services,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProductType::RealEstate => "real_estate",
            ProductType::Vehicle => "vehicle",
            ProductType::HeavyVehicle => "heavy_vehicle",
            ProductType::Services => "services",
        };
        write!(f, "{name}")
    }
}

/// Serialized form of one catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductDefinition {
    /// The product line.
    pub product: ProductType,
    /// Its fee tables.
    pub fee_tables: Vec<FeeTable>,
}

#[derive(Debug, Serialize, Deserialize)]
struct CatalogDocument {
    products: Vec<ProductDefinition>,
}

/// Fee tables indexed by product type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductCatalog {
    products: BTreeMap<ProductType, FeeTableSet>,
}

impl ProductCatalog {
    /// Creates an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) the tables of a product.
    #[must_use]
    pub fn with_product(mut self, product: ProductType, tables: FeeTableSet) -> Self {
        self.products.insert(product, tables);
        self
    }

    /// Builds a catalog from product definitions.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::Validation` for duplicated products or malformed
    /// tables, and `FeeError::OverlappingFeeTables` for overlapping ranges.
    pub fn from_definitions(definitions: Vec<ProductDefinition>) -> FeeResult<Self> {
        let mut products = BTreeMap::new();
        for definition in definitions {
            if products.contains_key(&definition.product) {
                return Err(FeeError::Validation(vec![ValidationError::with_rule(
                    "products",
                    format!("Product {} is defined more than once", definition.product),
                    "unique_products",
                )]));
            }
            let tables = FeeTableSet::new(definition.fee_tables)?;
            products.insert(definition.product, tables);
        }
        Ok(Self { products })
    }

    /// Parses and validates a JSON catalog document.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::Deserialization` for malformed JSON, otherwise the
    /// errors of [`ProductCatalog::from_definitions`].
    pub fn from_json_str(json: &str) -> FeeResult<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::from_definitions(document.products)
    }

    /// Parses and validates a TOML catalog document.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::Deserialization` for malformed TOML, otherwise the
    /// errors of [`ProductCatalog::from_definitions`].
    pub fn from_toml_str(text: &str) -> FeeResult<Self> {
        let document: CatalogDocument = toml::from_str(text)?;
        Self::from_definitions(document.products)
    }

    /// Serializes the catalog as pretty JSON.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::Deserialization` if serialization fails.
    pub fn to_json_string(&self) -> FeeResult<String> {
        let document = CatalogDocument {
            products: self
                .products
                .iter()
                .map(|(product, tables)| ProductDefinition {
                    product: *product,
                    fee_tables: tables.tables().to_vec(),
                })
                .collect(),
        };
        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Product types present in the catalog.
    pub fn products(&self) -> impl Iterator<Item = ProductType> + '_ {
        self.products.keys().copied()
    }

    /// Fee tables of a product.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::UnknownProduct` if the product is not in the catalog.
    pub fn fee_tables(&self, product: ProductType) -> FeeResult<&FeeTableSet> {
        self.products
            .get(&product)
            .ok_or(FeeError::UnknownProduct { product })
    }

    /// Selects the fee table of `product` covering `credit_amount`.
    ///
    /// # Errors
    ///
    /// Returns `FeeError::UnknownProduct` or `FeeError::NoMatchingFeeTable`.
    pub fn select(&self, product: ProductType, credit_amount: Decimal) -> FeeResult<&FeeTable> {
        let table = self
            .fee_tables(product)?
            .select(credit_amount)
            .map_err(|_| FeeError::no_matching_table(product.to_string(), credit_amount))?;

        tracing::debug!(
            product = %product,
            credit_amount = %credit_amount,
            table = %table.name,
            "Selected fee table"
        );
        Ok(table)
    }

    /// Selects the fee table for the contract and computes its installment.
    ///
    /// # Errors
    ///
    /// Returns the selection errors of [`ProductCatalog::select`] and the
    /// precondition errors of [`compute_installment`].
    pub fn quote(
        &self,
        product: ProductType,
        credit_amount: Decimal,
        term: TermClass,
        reduction: PaymentReduction,
        include_insurance: bool,
    ) -> FeeResult<InstallmentBreakdown> {
        let table = self.select(product, credit_amount)?;
        compute_installment(credit_amount, term, table, reduction, include_insurance)
    }
}
