//! End-to-end installment composition scenarios.
//!
//! Each scenario goes through a catalog document, fee table selection, and
//! composition, and checks the published figures to the cent.

use consorcio_fees::prelude::*;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const CATALOG_TOML: &str = r#"
[[products]]
product = "real_estate"

[[products.fee_tables]]
name = "Imóvel até 100k"
credit_range = { min = "30000", max = "100000" }
admin_fee = { months_200 = "20", months_220 = "21", months_240 = "23" }
reserve_fund = "2"
life_insurance = "0.2"
anticipated_fee = "5"
anticipated_fee_mode = "spread_first_twelve"
commission = [
    { from_installment = 1, to_installment = 1, percent = "1" },
    { from_installment = 2, to_installment = 4, percent = "0.5" },
]

[[products.fee_tables]]
name = "Imóvel acima de 100k"
credit_range = { min = "100000.01", max = "1000000" }
admin_fee = { months_200 = "20", months_220 = "22", months_240 = "24" }
reserve_fund = "2.5"
life_insurance = "0.25"
anticipated_fee = "4"
anticipated_fee_mode = "first_installment"

[[products]]
product = "vehicle"

[[products.fee_tables]]
name = "Auto"
credit_range = { min = "15000", max = "250000" }
admin_fee = { months_200 = "15", months_220 = "15", months_240 = "15" }
reserve_fund = "1"
life_insurance = "0.1"
anticipated_fee = "2"
anticipated_fee_mode = "spread_first_twelve"
"#;

fn catalog() -> ProductCatalog {
    ProductCatalog::from_toml_str(CATALOG_TOML).unwrap()
}

// ============================================================================
// Published scenarios
// ============================================================================

#[test]
fn half_scheme_first_installment_scenario() {
    let b = catalog()
        .quote(
            ProductType::RealEstate,
            dec!(150000),
            TermClass::Months220,
            PaymentReduction::Half,
            true,
        )
        .unwrap();

    assert_eq!(b.credit_base, dec!(75000));
    assert_eq!(b.common_fund, dec!(340.91));
    assert_eq!(b.admin_fee_percent, Percent::new(dec!(22)));
    assert_eq!(b.admin_fee, dec!(150.00));
    assert_eq!(b.reserve_fund, dec!(17.05));
    // (150000 + 33000) * 0.25%
    assert_eq!(b.life_insurance, dec!(457.50));
    assert_eq!(b.base_installment, dec!(965.46));
    assert_eq!(b.anticipated_fee, dec!(6000));
    assert_eq!(b.anticipated_fee_share, Decimal::ZERO);
    assert_eq!(b.installment_1_to_12, dec!(965.46));
    assert_eq!(b.installment_remaining, dec!(965.46));
    assert_eq!(b.total_paid, dec!(218401.20));
}

#[test]
fn full_scheme_spread_scenario() {
    let b = catalog()
        .quote(
            ProductType::RealEstate,
            dec!(100000),
            TermClass::Months200,
            PaymentReduction::Full,
            true,
        )
        .unwrap();

    assert_eq!(b.common_fund, dec!(500.00));
    assert_eq!(b.admin_fee, dec!(100.00));
    assert_eq!(b.reserve_fund, dec!(10.00));
    assert_eq!(b.life_insurance, dec!(240.00));
    assert_eq!(b.anticipated_fee_share, dec!(416.67));
    assert_eq!(b.installment_1_to_12, dec!(1266.67));
    assert_eq!(b.installment_remaining, dec!(850.00));
    assert_eq!(b.total_paid, dec!(175000.04));
}

#[test]
fn range_boundaries_select_distinct_tables() {
    let catalog = catalog();
    assert_eq!(
        catalog.select(ProductType::RealEstate, dec!(100000)).unwrap().name,
        "Imóvel até 100k"
    );
    assert_eq!(
        catalog
            .select(ProductType::RealEstate, dec!(100000.01))
            .unwrap()
            .name,
        "Imóvel acima de 100k"
    );
    assert!(matches!(
        catalog.select(ProductType::RealEstate, dec!(29999.99)),
        Err(FeeError::NoMatchingFeeTable { .. })
    ));
    assert!(matches!(
        catalog.select(ProductType::Services, dec!(50000)),
        Err(FeeError::UnknownProduct { .. })
    ));
}

#[test]
fn overlapping_catalog_is_rejected() {
    let text = r#"
[[products]]
product = "services"

[[products.fee_tables]]
name = "A"
credit_range = { min = "0", max = "50000" }
admin_fee = { months_200 = "10", months_220 = "10", months_240 = "10" }
reserve_fund = "1"
life_insurance = "0"
anticipated_fee = "0"
anticipated_fee_mode = "spread_first_twelve"

[[products.fee_tables]]
name = "B"
credit_range = { min = "50000", max = "90000" }
admin_fee = { months_200 = "10", months_220 = "10", months_240 = "10" }
reserve_fund = "1"
life_insurance = "0"
anticipated_fee = "0"
anticipated_fee_mode = "spread_first_twelve"
"#;
    assert!(matches!(
        ProductCatalog::from_toml_str(text),
        Err(FeeError::OverlappingFeeTables { .. })
    ));
}

#[test]
fn unpriced_term_is_a_typed_error() {
    let text = r#"
[[products]]
product = "heavy_vehicle"

[[products.fee_tables]]
name = "Pesados 240"
credit_range = { min = "100000", max = "900000" }
admin_fee = { months_240 = "16" }
reserve_fund = "1"
life_insurance = "0.1"
anticipated_fee = "3"
anticipated_fee_mode = "spread_first_twelve"
"#;
    let catalog = ProductCatalog::from_toml_str(text).unwrap();
    let quote = |term| {
        catalog.quote(
            ProductType::HeavyVehicle,
            dec!(300000),
            term,
            PaymentReduction::Full,
            false,
        )
    };

    assert!(quote(TermClass::Months240).is_ok());
    assert_eq!(
        quote(TermClass::Months200),
        Err(FeeError::MissingAdminFee {
            table: "Pesados 240".to_string(),
            term: TermClass::Months200,
        })
    );
}

#[test]
fn plan_total_equals_breakdown_total() {
    let catalog = catalog();
    let terms = ContractTerms::new(dec!(150000), TermClass::Months220)
        .with_reduction(PaymentReduction::Half);
    let table = catalog.select(ProductType::RealEstate, terms.credit_amount).unwrap();
    let contract = Date::from_ymd(2025, 6, 20).unwrap();

    let plan = InstallmentPlan::build(&BrazilCalendar, contract, 31, &terms, table).unwrap();

    assert_eq!(plan.installments().len(), 220);
    assert_eq!(plan.total(), dec!(218401.20));
    assert_eq!(plan.installment(1).unwrap().total_due(), dec!(6965.46));
    for window in plan.installments().windows(2) {
        assert!(window[0].due_date < window[1].due_date);
    }
}

#[test]
fn plan_commissions_follow_table() {
    let catalog = catalog();
    let terms = ContractTerms::new(dec!(80000), TermClass::Months240).with_insurance(false);
    let table = catalog.select(ProductType::RealEstate, terms.credit_amount).unwrap();
    let contract = Date::from_ymd(2026, 1, 5).unwrap();

    let plan = InstallmentPlan::build(&BrazilCalendar, contract, 5, &terms, table).unwrap();

    assert_eq!(plan.installment(1).unwrap().commission, dec!(800));
    assert_eq!(plan.installment(4).unwrap().commission, dec!(400));
    assert_eq!(plan.installment(5).unwrap().commission, Decimal::ZERO);
    assert_eq!(plan.total_commission(), dec!(2000));
}

// ============================================================================
// Properties
// ============================================================================

fn reduction_strategy() -> impl Strategy<Value = PaymentReduction> {
    prop_oneof![
        Just(PaymentReduction::Full),
        Just(PaymentReduction::Half),
        Just(PaymentReduction::QuarterReduced),
    ]
}

fn term_strategy() -> impl Strategy<Value = TermClass> {
    prop_oneof![
        Just(TermClass::Months200),
        Just(TermClass::Months220),
        Just(TermClass::Months240),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    #[test]
    fn components_are_whole_cents(
        cents in 1_500_000i64..25_000_000i64,
        term in term_strategy(),
        reduction in reduction_strategy(),
        insurance in any::<bool>(),
    ) {
        let credit = Decimal::new(cents, 2);
        let b = catalog()
            .quote(ProductType::Vehicle, credit, term, reduction, insurance)
            .unwrap();

        for value in [b.common_fund, b.admin_fee, b.reserve_fund, b.life_insurance, b.anticipated_fee] {
            prop_assert_eq!(round_money(value), value);
        }
        prop_assert_eq!(
            b.base_installment,
            b.common_fund + b.admin_fee + b.reserve_fund + b.life_insurance
        );
    }

    #[test]
    fn composition_is_deterministic(
        cents in 1_500_000i64..25_000_000i64,
        term in term_strategy(),
        reduction in reduction_strategy(),
    ) {
        let credit = Decimal::new(cents, 2);
        let catalog = catalog();
        let first = catalog.quote(ProductType::Vehicle, credit, term, reduction, true).unwrap();
        let second = catalog.quote(ProductType::Vehicle, credit, term, reduction, true).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn reduction_never_raises_the_installment(
        cents in 1_500_000i64..25_000_000i64,
        term in term_strategy(),
    ) {
        let credit = Decimal::new(cents, 2);
        let catalog = catalog();
        let full = catalog
            .quote(ProductType::Vehicle, credit, term, PaymentReduction::Full, true)
            .unwrap();
        let half = catalog
            .quote(ProductType::Vehicle, credit, term, PaymentReduction::Half, true)
            .unwrap();

        prop_assert!(half.common_fund <= full.common_fund);
        prop_assert_eq!(half.admin_fee, full.admin_fee);
        prop_assert_eq!(half.reserve_fund, full.reserve_fund);
        prop_assert_eq!(half.life_insurance, full.life_insurance);
    }
}
