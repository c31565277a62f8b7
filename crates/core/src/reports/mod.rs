//! Reports module - report models, the table formatter, services, and traits.

mod formatter;
mod reports_model;
mod reports_service;
mod reports_traits;


pub use formatter::{
    format_report, format_value, ReportRow, ReportSection, SectionLayout, REPORT_SECTIONS,
};
pub use reports_model::{
    clean_description, validate_report_name, NewReport, Report, ReportMetadata, ReportPreview,
    ReportRecord, ReportTables, ReportUpdate,
};
pub use reports_service::ReportService;
pub use reports_traits::{ReportRepositoryTrait, ReportServiceTrait};
