//! rentcalc core - deal model, report formatting, services, and traits.
//!
//! This crate contains the business logic for rental deal reports.
//! It is database-agnostic and defines the report store trait that is
//! implemented by the `storage-sqlite` crate.

pub mod constants;
pub mod deals;
pub mod errors;
pub mod reports;

pub use deals::{compute, DealInputs, DerivedMetrics};
pub use reports::{format_report, ReportService, ReportServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
