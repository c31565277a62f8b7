//! Deal domain models.

use std::collections::HashMap;
use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::fields::{
    input_descriptors, normalize_field_key, Field, FieldDescriptor, INPUT_FIELD_COUNT,
};
use crate::errors::{Result, ValidationError};

/// User-supplied parameters of a rental deal. Rates and percentages are given
/// in percent (6 means 6%), currency amounts in whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DealInputs {
    pub sale_price: Decimal,
    pub down_payment_percent: Decimal,
    pub mortgage_rate: Decimal,
    pub loan_term_years: u32,
    pub closing_costs: Decimal,
    pub pmi_rate: Decimal,
    pub property_tax_rate: Decimal,
    pub annual_homeowners_insurance: Decimal,
    pub annual_hoa_fees: Decimal,
    pub upfront_repairs: Decimal,
    pub projected_monthly_rent: Decimal,
    pub vacancy_rate_annual: Decimal,
    pub monthly_maintenance_and_repairs: Decimal,
    pub capex: Decimal,
    pub monthly_management_fees: Decimal,
    /// Holding period in years. Carried with the deal, not used by the model.
    pub horizon: u32,
    /// Not used by the model.
    pub annualized_appreciation: Decimal,
}

/// Metrics derived from [`DealInputs`]. Monthly amounts unless the name says
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedMetrics {
    pub down_payment: Decimal,
    pub mortgage_principal: Decimal,
    pub total_upfront_costs: Decimal,
    pub mortgage_payment: Decimal,
    pub pmi_payment: Decimal,
    pub property_tax_payment: Decimal,
    pub homeowners_insurance_payment: Decimal,
    pub hoa_fees_payment: Decimal,
    pub vacancy_cost_monthly: Decimal,
    pub variable_expenses: Decimal,
    pub monthly_expenses: Decimal,
    pub monthly_cashflow: Decimal,
}

impl DealInputs {
    /// Value of an input field, or `None` for a derived field.
    pub fn value(&self, field: Field) -> Option<Decimal> {
        let value = match field {
            Field::SalePrice => self.sale_price,
            Field::DownPaymentPercent => self.down_payment_percent,
            Field::MortgageRate => self.mortgage_rate,
            Field::LoanTermYears => Decimal::from(self.loan_term_years),
            Field::ClosingCosts => self.closing_costs,
            Field::PmiRate => self.pmi_rate,
            Field::PropertyTaxRate => self.property_tax_rate,
            Field::AnnualHomeownersInsurance => self.annual_homeowners_insurance,
            Field::AnnualHoaFees => self.annual_hoa_fees,
            Field::UpfrontRepairs => self.upfront_repairs,
            Field::ProjectedMonthlyRent => self.projected_monthly_rent,
            Field::VacancyRateAnnual => self.vacancy_rate_annual,
            Field::MonthlyMaintenanceAndRepairs => self.monthly_maintenance_and_repairs,
            Field::Capex => self.capex,
            Field::MonthlyManagementFees => self.monthly_management_fees,
            Field::Horizon => Decimal::from(self.horizon),
            Field::AnnualizedAppreciation => self.annualized_appreciation,
            _ => return None,
        };
        Some(value)
    }

    /// Checks every input against its descriptor's range and integrality.
    pub fn validate(&self) -> Result<()> {
        for descriptor in input_descriptors() {
            if let Some(value) = self.value(descriptor.field) {
                check_value(descriptor, value)?;
            }
        }
        Ok(())
    }

    /// Builds inputs from a loosely keyed JSON object, as submitted by an
    /// input form or found in an exported report.
    ///
    /// Keys are normalized with [`normalize_field_key`], values may be numbers
    /// or numeric strings, and keys that are not deal inputs are ignored.
    pub fn from_json_value(payload: &Value) -> Result<Self> {
        let object = payload.as_object().ok_or_else(|| {
            ValidationError::InvalidInput("Deal inputs must be a JSON object".to_string())
        })?;
        let normalized: HashMap<String, &Value> = object
            .iter()
            .map(|(key, value)| (normalize_field_key(key), value))
            .collect();

        let mut values = [Decimal::ZERO; INPUT_FIELD_COUNT];
        for descriptor in input_descriptors() {
            let raw = normalized
                .get(descriptor.name)
                .ok_or_else(|| ValidationError::MissingField(descriptor.name.to_string()))?;
            let value = parse_field_value(descriptor, raw)?;
            check_value(descriptor, value)?;
            values[descriptor.field as usize] = value;
        }

        let get = |field: Field| values[field as usize];
        let inputs = DealInputs {
            sale_price: get(Field::SalePrice),
            down_payment_percent: get(Field::DownPaymentPercent),
            mortgage_rate: get(Field::MortgageRate),
            loan_term_years: to_count(Field::LoanTermYears, get(Field::LoanTermYears))?,
            closing_costs: get(Field::ClosingCosts),
            pmi_rate: get(Field::PmiRate),
            property_tax_rate: get(Field::PropertyTaxRate),
            annual_homeowners_insurance: get(Field::AnnualHomeownersInsurance),
            annual_hoa_fees: get(Field::AnnualHoaFees),
            upfront_repairs: get(Field::UpfrontRepairs),
            projected_monthly_rent: get(Field::ProjectedMonthlyRent),
            vacancy_rate_annual: get(Field::VacancyRateAnnual),
            monthly_maintenance_and_repairs: get(Field::MonthlyMaintenanceAndRepairs),
            capex: get(Field::Capex),
            monthly_management_fees: get(Field::MonthlyManagementFees),
            horizon: to_count(Field::Horizon, get(Field::Horizon))?,
            annualized_appreciation: get(Field::AnnualizedAppreciation),
        };
        inputs.validate()?;
        Ok(inputs)
    }
}

impl DerivedMetrics {
    /// Rebuilds metrics from per-field values, failing on the first derived
    /// field `lookup` has no value for.
    pub fn from_values<F>(mut lookup: F) -> Result<Self>
    where
        F: FnMut(Field) -> Option<Decimal>,
    {
        let mut get = |field: Field| {
            lookup(field)
                .ok_or_else(|| ValidationError::MissingField(field.name().to_string()))
        };
        Ok(DerivedMetrics {
            down_payment: get(Field::DownPayment)?,
            mortgage_principal: get(Field::MortgagePrincipal)?,
            total_upfront_costs: get(Field::TotalUpfrontCosts)?,
            mortgage_payment: get(Field::MortgagePayment)?,
            pmi_payment: get(Field::PmiPayment)?,
            property_tax_payment: get(Field::PropertyTaxPayment)?,
            homeowners_insurance_payment: get(Field::HomeownersInsurancePayment)?,
            hoa_fees_payment: get(Field::HoaFeesPayment)?,
            vacancy_cost_monthly: get(Field::VacancyCostMonthly)?,
            variable_expenses: get(Field::VariableExpenses)?,
            monthly_expenses: get(Field::MonthlyExpenses)?,
            monthly_cashflow: get(Field::MonthlyCashflow)?,
        })
    }

    /// Value of a derived field, or `None` for an input field.
    pub fn value(&self, field: Field) -> Option<Decimal> {
        let value = match field {
            Field::DownPayment => self.down_payment,
            Field::MortgagePrincipal => self.mortgage_principal,
            Field::TotalUpfrontCosts => self.total_upfront_costs,
            Field::MortgagePayment => self.mortgage_payment,
            Field::PmiPayment => self.pmi_payment,
            Field::PropertyTaxPayment => self.property_tax_payment,
            Field::HomeownersInsurancePayment => self.homeowners_insurance_payment,
            Field::HoaFeesPayment => self.hoa_fees_payment,
            Field::VacancyCostMonthly => self.vacancy_cost_monthly,
            Field::VariableExpenses => self.variable_expenses,
            Field::MonthlyExpenses => self.monthly_expenses,
            Field::MonthlyCashflow => self.monthly_cashflow,
            _ => return None,
        };
        Some(value)
    }
}

fn check_value(descriptor: &FieldDescriptor, value: Decimal) -> Result<()> {
    if descriptor.integral && !value.fract().is_zero() {
        return Err(ValidationError::NotIntegral {
            field: descriptor.name.to_string(),
            value,
        }
        .into());
    }
    let below = descriptor.min.is_some_and(|min| value < min);
    let above = descriptor.max.is_some_and(|max| value > max);
    if below || above {
        return Err(ValidationError::OutOfRange {
            field: descriptor.name.to_string(),
            value,
            min: bound_to_string(descriptor.min),
            max: bound_to_string(descriptor.max),
        }
        .into());
    }
    Ok(())
}

fn bound_to_string(bound: Option<Decimal>) -> String {
    bound
        .map(|b| b.normalize().to_string())
        .unwrap_or_else(|| "unbounded".to_string())
}

fn parse_field_value(descriptor: &FieldDescriptor, raw: &Value) -> Result<Decimal> {
    let text = match raw {
        Value::Number(number) => number.to_string(),
        Value::String(s) if !s.trim().is_empty() => s.trim().to_string(),
        Value::Null | Value::String(_) => {
            return Err(ValidationError::MissingField(descriptor.name.to_string()).into())
        }
        other => {
            return Err(ValidationError::InvalidNumber {
                field: descriptor.name.to_string(),
                value: other.to_string(),
            }
            .into())
        }
    };
    Decimal::from_str(&text)
        .or_else(|_| Decimal::from_scientific(&text))
        .map_err(|_| {
            ValidationError::InvalidNumber {
                field: descriptor.name.to_string(),
                value: text.clone(),
            }
            .into()
        })
}

fn to_count(field: Field, value: Decimal) -> Result<u32> {
    let descriptor = field.descriptor();
    value.to_u32().ok_or_else(|| {
        ValidationError::OutOfRange {
            field: descriptor.name.to_string(),
            value,
            min: bound_to_string(descriptor.min),
            max: bound_to_string(descriptor.max),
        }
        .into()
    })
}
