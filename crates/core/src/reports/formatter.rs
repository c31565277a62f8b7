//! Table formatter: groups a deal record into display sections.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::PERCENT_DISPLAY_PRECISION;
use crate::deals::{DealInputs, DerivedMetrics, Field, FieldKind};

/// A labelled, formatted value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

/// A titled group of rows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

/// Which fields a section shows, in display order.
#[derive(Debug, Clone, Copy)]
pub struct SectionLayout {
    pub title: &'static str,
    pub fields: &'static [Field],
}

pub const REPORT_SECTIONS: [SectionLayout; 5] = [
    SectionLayout {
        title: "Deal terms",
        fields: &[
            Field::SalePrice,
            Field::DownPaymentPercent,
            Field::MortgageRate,
            Field::LoanTermYears,
            Field::ClosingCosts,
            Field::PmiRate,
            Field::PropertyTaxRate,
            Field::AnnualHomeownersInsurance,
        ],
    },
    SectionLayout {
        title: "Upfront costs",
        fields: &[
            Field::UpfrontRepairs,
            Field::MortgagePrincipal,
            Field::TotalUpfrontCosts,
        ],
    },
    SectionLayout {
        title: "Monthly payment breakdown",
        fields: &[
            Field::MortgagePayment,
            Field::PmiPayment,
            Field::PropertyTaxPayment,
            Field::HomeownersInsurancePayment,
            Field::HoaFeesPayment,
        ],
    },
    SectionLayout {
        title: "Operating expenses",
        fields: &[
            Field::VacancyRateAnnual,
            Field::VacancyCostMonthly,
            Field::MonthlyMaintenanceAndRepairs,
            Field::MonthlyManagementFees,
            Field::Capex,
            Field::VariableExpenses,
        ],
    },
    SectionLayout {
        title: "Cash flow summary",
        fields: &[
            Field::ProjectedMonthlyRent,
            Field::MonthlyExpenses,
            Field::MonthlyCashflow,
        ],
    },
];

/// Formats the combined input/metric record into the fixed report sections.
pub fn format_report(inputs: &DealInputs, metrics: &DerivedMetrics) -> Vec<ReportSection> {
    REPORT_SECTIONS
        .iter()
        .map(|layout| ReportSection {
            title: layout.title.to_string(),
            rows: layout
                .fields
                .iter()
                .map(|&field| {
                    let value = inputs
                        .value(field)
                        .or_else(|| metrics.value(field))
                        .unwrap_or_default();
                    ReportRow {
                        label: field.label().to_string(),
                        value: format_value(field.kind(), value),
                    }
                })
                .collect(),
        })
        .collect()
}

/// Formats a value for display according to its kind.
///
/// Percentages keep two decimals (`6` → `6.00%`). Currency is rounded to whole
/// units with thousands separators, negatives in parentheses (`-150` → `$(150)`).
pub fn format_value(kind: FieldKind, value: Decimal) -> String {
    match kind {
        FieldKind::Percentage => format_percentage(value),
        FieldKind::Currency => format_currency(value),
    }
}

fn format_percentage(value: Decimal) -> String {
    let rounded = value.round_dp(PERCENT_DISPLAY_PRECISION);
    format!("{:.2}%", rounded)
}

fn format_currency(value: Decimal) -> String {
    let whole = group_thousands(&value.abs().round_dp(0).to_string());
    if value.is_sign_negative() && !value.is_zero() {
        format!("$({})", whole)
    } else {
        format!("${}", whole)
    }
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}
