//! Property-based tests for the deal financial model.
//!
//! These tests verify that the model's invariants hold across all valid
//! inputs, using the `proptest` crate for random test case generation.

use proptest::prelude::*;
use rentcalc_core::deals::{compute, DealInputs, FieldKind};
use rentcalc_core::reports::{format_report, format_value};
use rust_decimal::Decimal;

// =============================================================================
// Generators
// =============================================================================

/// Whole currency amount up to `max`.
fn arb_amount(max: u64) -> impl Strategy<Value = Decimal> {
    (0..=max).prop_map(Decimal::from)
}

/// Percentage between 0 and 100 with two decimals.
fn arb_percent() -> impl Strategy<Value = Decimal> {
    (0i64..=10_000).prop_map(|basis_points| Decimal::new(basis_points, 2))
}

/// Annual rate between 0% and 20% with three decimals.
fn arb_rate() -> impl Strategy<Value = Decimal> {
    (0i64..=20_000).prop_map(|millis| Decimal::new(millis, 3))
}

prop_compose! {
    fn arb_deal_inputs()(
        (sale_price, closing_costs, upfront_repairs, insurance, hoa) in (
            arb_amount(5_000_000),
            arb_amount(100_000),
            arb_amount(250_000),
            arb_amount(20_000),
            arb_amount(20_000),
        ),
        (rent, maintenance, capex, management) in (
            arb_amount(50_000),
            arb_amount(5_000),
            arb_amount(5_000),
            arb_amount(5_000),
        ),
        (down_payment_percent, mortgage_rate, pmi_rate, tax_rate, vacancy) in (
            arb_percent(),
            arb_rate(),
            arb_rate(),
            arb_rate(),
            arb_percent(),
        ),
        loan_term_years in 1u32..=50,
        horizon in 0u32..=40,
        appreciation in (-10_000i64..=10_000).prop_map(|v| Decimal::new(v, 2)),
    ) -> DealInputs {
        DealInputs {
            sale_price,
            down_payment_percent,
            mortgage_rate,
            loan_term_years,
            closing_costs,
            pmi_rate,
            property_tax_rate: tax_rate,
            annual_homeowners_insurance: insurance,
            annual_hoa_fees: hoa,
            upfront_repairs,
            projected_monthly_rent: rent,
            vacancy_rate_annual: vacancy,
            monthly_maintenance_and_repairs: maintenance,
            capex,
            monthly_management_fees: management,
            horizon,
            annualized_appreciation: appreciation,
        }
    }
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Computing twice yields identical metrics.
    #[test]
    fn prop_compute_is_deterministic(inputs in arb_deal_inputs()) {
        let first = compute(&inputs).unwrap();
        let second = compute(&inputs).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Cash flow is exactly rent minus expenses.
    #[test]
    fn prop_cashflow_is_rent_minus_expenses(inputs in arb_deal_inputs()) {
        let metrics = compute(&inputs).unwrap();
        prop_assert_eq!(
            metrics.monthly_cashflow,
            inputs.projected_monthly_rent - metrics.monthly_expenses
        );
    }

    /// PMI is waived whenever at least 20% is put down.
    #[test]
    fn prop_pmi_waived_at_twenty_percent_down(
        inputs in arb_deal_inputs(),
        down in (2_000i64..=10_000).prop_map(|v| Decimal::new(v, 2)),
    ) {
        let inputs = DealInputs { down_payment_percent: down, ..inputs };
        prop_assert_eq!(compute(&inputs).unwrap().pmi_payment, Decimal::ZERO);
    }

    /// A zero rate spreads the principal evenly over the payments.
    #[test]
    fn prop_zero_rate_is_straight_line(inputs in arb_deal_inputs()) {
        let inputs = DealInputs { mortgage_rate: Decimal::ZERO, ..inputs };
        let metrics = compute(&inputs).unwrap();
        let payments = Decimal::from(12 * inputs.loan_term_years);
        prop_assert_eq!(metrics.mortgage_payment, metrics.mortgage_principal / payments);
    }

    /// Principal and down payment always add back up to the price.
    #[test]
    fn prop_principal_plus_down_payment_is_price(inputs in arb_deal_inputs()) {
        let metrics = compute(&inputs).unwrap();
        prop_assert_eq!(metrics.mortgage_principal + metrics.down_payment, inputs.sale_price);
        prop_assert!(metrics.mortgage_payment >= Decimal::ZERO);
    }

    /// Every report renders the same five sections regardless of inputs.
    #[test]
    fn prop_report_layout_is_fixed(inputs in arb_deal_inputs()) {
        let metrics = compute(&inputs).unwrap();
        let sections = format_report(&inputs, &metrics);
        let counts: Vec<usize> = sections.iter().map(|s| s.rows.len()).collect();
        prop_assert_eq!(counts, vec![8, 3, 5, 6, 3]);
    }

    /// Negative currency is parenthesized, non-negative is not.
    #[test]
    fn prop_currency_sign_formatting(cents in -10_000_000i64..=10_000_000) {
        let value = Decimal::new(cents, 2);
        let formatted = format_value(FieldKind::Currency, value);
        prop_assert!(formatted.starts_with('$'));
        prop_assert_eq!(formatted.contains('('), value < Decimal::ZERO);
    }
}
