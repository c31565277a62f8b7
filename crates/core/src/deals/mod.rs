//! Deals module - deal inputs, derived metrics, field schema and the financial model.

mod calculator;
mod deals_model;
mod fields;


#[cfg(test)]
mod deals_model_tests;

pub use calculator::{amortized_payment, compute, monthly_rate};
pub use deals_model::{DealInputs, DerivedMetrics};
pub use fields::{
    derived_descriptors, input_descriptors, normalize_field_key, Field, FieldDescriptor,
    FieldKind, DERIVED_FIELD_COUNT, FIELD_DESCRIPTORS, INPUT_FIELD_COUNT,
};
