//! Field schema shared by the financial model, the table formatter and any
//! presentation layer that builds input forms.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::{MAX_CURRENCY_AMOUNT, MAX_HORIZON_YEARS, MAX_LOAN_TERM_YEARS};

/// How a field's value is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldKind {
    Currency,
    Percentage,
}

/// Every field of a report record: the 17 deal inputs followed by the 12
/// derived metrics. The discriminant indexes [`FIELD_DESCRIPTORS`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    // Inputs
    SalePrice,
    DownPaymentPercent,
    MortgageRate,
    LoanTermYears,
    ClosingCosts,
    PmiRate,
    PropertyTaxRate,
    AnnualHomeownersInsurance,
    AnnualHoaFees,
    UpfrontRepairs,
    ProjectedMonthlyRent,
    VacancyRateAnnual,
    MonthlyMaintenanceAndRepairs,
    Capex,
    MonthlyManagementFees,
    Horizon,
    AnnualizedAppreciation,
    // Derived
    DownPayment,
    MortgagePrincipal,
    TotalUpfrontCosts,
    MortgagePayment,
    PmiPayment,
    PropertyTaxPayment,
    HomeownersInsurancePayment,
    HoaFeesPayment,
    VacancyCostMonthly,
    VariableExpenses,
    MonthlyExpenses,
    MonthlyCashflow,
}

/// Static description of one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub field: Field,
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    /// Computed by the model rather than supplied by the user.
    pub derived: bool,
    /// Only whole numbers are accepted.
    pub integral: bool,
    pub min: Option<Decimal>,
    pub max: Option<Decimal>,
}

pub const INPUT_FIELD_COUNT: usize = 17;
pub const DERIVED_FIELD_COUNT: usize = 12;

const ZERO: Option<Decimal> = Some(dec!(0));
const HUNDRED: Option<Decimal> = Some(dec!(100));

const fn currency(field: Field, name: &'static str, label: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        name,
        label,
        kind: FieldKind::Currency,
        derived: false,
        integral: true,
        min: ZERO,
        max: Some(MAX_CURRENCY_AMOUNT),
    }
}

const fn percentage(field: Field, name: &'static str, label: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        name,
        label,
        kind: FieldKind::Percentage,
        derived: false,
        integral: false,
        min: ZERO,
        max: HUNDRED,
    }
}

const fn years(
    field: Field,
    name: &'static str,
    label: &'static str,
    min: u32,
    max: u32,
) -> FieldDescriptor {
    FieldDescriptor {
        field,
        name,
        label,
        kind: FieldKind::Currency,
        derived: false,
        integral: true,
        min: Some(Decimal::from_parts(min, 0, 0, false, 0)),
        max: Some(Decimal::from_parts(max, 0, 0, false, 0)),
    }
}

const fn derived(field: Field, name: &'static str, label: &'static str) -> FieldDescriptor {
    FieldDescriptor {
        field,
        name,
        label,
        kind: FieldKind::Currency,
        derived: true,
        integral: false,
        min: None,
        max: None,
    }
}

/// Hand-maintained schema, in [`Field`] discriminant order.
pub static FIELD_DESCRIPTORS: [FieldDescriptor; INPUT_FIELD_COUNT + DERIVED_FIELD_COUNT] = [
    currency(Field::SalePrice, "sale_price", "Sale price"),
    percentage(
        Field::DownPaymentPercent,
        "down_payment_percent",
        "Down payment percent",
    ),
    percentage(Field::MortgageRate, "mortgage_rate", "Mortgage rate"),
    years(
        Field::LoanTermYears,
        "loan_term_years",
        "Loan term years",
        1,
        MAX_LOAN_TERM_YEARS,
    ),
    currency(Field::ClosingCosts, "closing_costs", "Closing costs"),
    percentage(Field::PmiRate, "pmi_rate", "Pmi rate"),
    percentage(Field::PropertyTaxRate, "property_tax_rate", "Property tax rate"),
    currency(
        Field::AnnualHomeownersInsurance,
        "annual_homeowners_insurance",
        "Annual homeowners insurance",
    ),
    currency(Field::AnnualHoaFees, "annual_hoa_fees", "Annual hoa fees"),
    currency(Field::UpfrontRepairs, "upfront_repairs", "Upfront repairs"),
    currency(
        Field::ProjectedMonthlyRent,
        "projected_monthly_rent",
        "Projected monthly rent",
    ),
    percentage(
        Field::VacancyRateAnnual,
        "vacancy_rate_annual",
        "Vacancy rate annual",
    ),
    currency(
        Field::MonthlyMaintenanceAndRepairs,
        "monthly_maintenance_and_repairs",
        "Monthly maintenance and repairs",
    ),
    currency(Field::Capex, "capex", "Capex"),
    currency(
        Field::MonthlyManagementFees,
        "monthly_management_fees",
        "Monthly management fees",
    ),
    years(Field::Horizon, "horizon", "Horizon", 0, MAX_HORIZON_YEARS),
    FieldDescriptor {
        min: Some(dec!(-100)),
        ..percentage(
            Field::AnnualizedAppreciation,
            "annualized_appreciation",
            "Annualized appreciation",
        )
    },
    derived(Field::DownPayment, "down_payment", "Down payment"),
    derived(
        Field::MortgagePrincipal,
        "mortgage_principal",
        "Mortgage principal",
    ),
    derived(
        Field::TotalUpfrontCosts,
        "total_upfront_costs",
        "Total upfront costs",
    ),
    derived(Field::MortgagePayment, "mortgage_payment", "Mortgage payment"),
    derived(Field::PmiPayment, "pmi_payment", "Pmi payment"),
    derived(
        Field::PropertyTaxPayment,
        "property_tax_payment",
        "Property tax payment",
    ),
    derived(
        Field::HomeownersInsurancePayment,
        "homeowners_insurance_payment",
        "Homeowners insurance payment",
    ),
    derived(Field::HoaFeesPayment, "hoa_fees_payment", "Hoa fees payment"),
    derived(
        Field::VacancyCostMonthly,
        "vacancy_cost_monthly",
        "Vacancy cost monthly",
    ),
    derived(Field::VariableExpenses, "variable_expenses", "Variable expenses"),
    derived(Field::MonthlyExpenses, "monthly_expenses", "Monthly expenses"),
    derived(Field::MonthlyCashflow, "monthly_cashflow", "Monthly cashflow"),
];

impl Field {
    pub fn descriptor(self) -> &'static FieldDescriptor {
        &FIELD_DESCRIPTORS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.descriptor().name
    }

    pub fn label(self) -> &'static str {
        self.descriptor().label
    }

    pub fn kind(self) -> FieldKind {
        self.descriptor().kind
    }

    pub fn from_name(name: &str) -> Option<Field> {
        FIELD_DESCRIPTORS
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.field)
    }
}

/// Descriptors of the user-supplied fields, in form order.
pub fn input_descriptors() -> &'static [FieldDescriptor] {
    &FIELD_DESCRIPTORS[..INPUT_FIELD_COUNT]
}

/// Descriptors of the computed fields, in evaluation order.
pub fn derived_descriptors() -> &'static [FieldDescriptor] {
    &FIELD_DESCRIPTORS[INPUT_FIELD_COUNT..]
}

/// Normalizes a loosely written field key ("Sale Price", "pmi_rate (%)")
/// to the snake_case name used by the schema.
pub fn normalize_field_key(key: &str) -> String {
    key.trim()
        .replace(' ', "_")
        .replace(['(', ')'], "")
        .to_lowercase()
}
