//! Financial model: derives monthly deal metrics from [`DealInputs`].

use log::debug;
use rust_decimal::Decimal;

use super::deals_model::{DealInputs, DerivedMetrics};
use crate::constants::{MONTHS_PER_YEAR, PERCENT_DIVISOR, PMI_WAIVER_DOWN_PAYMENT_PERCENT};
use crate::errors::{ComputationError, Result};

/// Validates `inputs` and computes every derived metric.
///
/// Fields are evaluated in dependency order; the result depends on nothing
/// but `inputs`.
pub fn compute(inputs: &DealInputs) -> Result<DerivedMetrics> {
    inputs.validate()?;
    let metrics = evaluate(inputs)?;
    debug!(
        "Computed deal metrics: principal={}, mortgage_payment={}, monthly_cashflow={}",
        metrics.mortgage_principal, metrics.mortgage_payment, metrics.monthly_cashflow
    );
    Ok(metrics)
}

fn evaluate(inputs: &DealInputs) -> std::result::Result<DerivedMetrics, ComputationError> {
    let down_payment = inputs.down_payment_percent * inputs.sale_price / PERCENT_DIVISOR;
    let mortgage_principal = inputs.sale_price - down_payment;
    let total_upfront_costs = down_payment + inputs.closing_costs + inputs.upfront_repairs;

    let mortgage_payment = amortized_payment(
        mortgage_principal,
        inputs.mortgage_rate,
        inputs.loan_term_years,
    )?;

    let pmi_payment = if inputs.down_payment_percent >= PMI_WAIVER_DOWN_PAYMENT_PERCENT {
        Decimal::ZERO
    } else {
        mortgage_principal * inputs.pmi_rate / PERCENT_DIVISOR / MONTHS_PER_YEAR
    };

    let property_tax_payment =
        inputs.sale_price * inputs.property_tax_rate / PERCENT_DIVISOR / MONTHS_PER_YEAR;
    let homeowners_insurance_payment = inputs.annual_homeowners_insurance / MONTHS_PER_YEAR;
    let hoa_fees_payment = inputs.annual_hoa_fees / MONTHS_PER_YEAR;

    let vacancy_cost_monthly =
        inputs.vacancy_rate_annual / PERCENT_DIVISOR * inputs.projected_monthly_rent;
    let variable_expenses = vacancy_cost_monthly
        + inputs.monthly_maintenance_and_repairs
        + inputs.capex
        + inputs.monthly_management_fees;

    let monthly_expenses = mortgage_payment
        + property_tax_payment
        + homeowners_insurance_payment
        + variable_expenses
        + pmi_payment
        + hoa_fees_payment;
    let monthly_cashflow = inputs.projected_monthly_rent - monthly_expenses;

    Ok(DerivedMetrics {
        down_payment,
        mortgage_principal,
        total_upfront_costs,
        mortgage_payment,
        pmi_payment,
        property_tax_payment,
        homeowners_insurance_payment,
        hoa_fees_payment,
        vacancy_cost_monthly,
        variable_expenses,
        monthly_expenses,
        monthly_cashflow,
    })
}

/// Fixed monthly payment that fully repays `principal` over `term_years`
/// at `annual_rate_percent`.
///
/// Uses `P*r / (1 - (1+r)^-n)` with `r` the monthly rate and `n` the number of
/// monthly payments; a zero rate falls back to the limit `P/n`.
pub fn amortized_payment(
    principal: Decimal,
    annual_rate_percent: Decimal,
    term_years: u32,
) -> std::result::Result<Decimal, ComputationError> {
    if term_years == 0 {
        return Err(ComputationError::InvalidTerm(term_years));
    }
    let periods = term_years
        .checked_mul(12)
        .ok_or(ComputationError::Overflow("number of payments"))?;
    let monthly_rate = monthly_rate(annual_rate_percent);

    if monthly_rate.is_zero() {
        return Ok(principal / (MONTHS_PER_YEAR * Decimal::from(term_years)));
    }

    let growth = compound(Decimal::ONE + monthly_rate, periods)
        .ok_or(ComputationError::Overflow("mortgage_payment"))?;
    let discount = Decimal::ONE
        .checked_div(growth)
        .ok_or(ComputationError::Overflow("mortgage_payment"))?;
    (principal * monthly_rate)
        .checked_div(Decimal::ONE - discount)
        .ok_or(ComputationError::Overflow("mortgage_payment"))
}

/// Converts an annual percentage rate into a monthly fraction.
pub fn monthly_rate(annual_rate_percent: Decimal) -> Decimal {
    annual_rate_percent / PERCENT_DIVISOR / MONTHS_PER_YEAR
}

/// `factor^periods` by repeated multiplication, `None` on overflow.
fn compound(factor: Decimal, periods: u32) -> Option<Decimal> {
    let mut result = Decimal::ONE;
    for _ in 0..periods {
        result = result.checked_mul(factor)?;
    }
    Some(result)
}
