use crate::deals::{DealInputs, FieldDescriptor};
use crate::errors::Result;
use crate::reports::reports_model::{
    NewReport, Report, ReportMetadata, ReportPreview, ReportRecord, ReportTables, ReportUpdate,
};
use async_trait::async_trait;

/// Trait for report store operations
#[async_trait]
pub trait ReportRepositoryTrait: Send + Sync {
    /// Loads a report by name.
    fn get(&self, name: &str) -> Result<Option<Report>>;
    /// Stores a new report and returns its location. Fails with
    /// `DatabaseError::UniqueViolation` when `record.name` is taken.
    async fn put(&self, record: ReportRecord) -> Result<String>;
    /// Supersedes the report stored under `record.name`, keeping its id and
    /// location. Fails with `DatabaseError::NotFound` when there is none.
    async fn replace(&self, record: ReportRecord) -> Result<String>;
    /// Lists the metadata index, oldest report first.
    fn list(&self) -> Result<Vec<ReportMetadata>>;
}

/// Trait for report service operations
#[async_trait]
pub trait ReportServiceTrait: Send + Sync {
    fn list_reports(&self) -> Result<Vec<ReportMetadata>>;
    fn get_report(&self, name: &str) -> Result<Report>;
    async fn create_report(&self, new_report: NewReport) -> Result<Report>;
    async fn update_report(&self, name: &str, update: ReportUpdate) -> Result<Report>;
    fn get_report_tables(&self, name: &str) -> Result<ReportTables>;
    fn preview(&self, inputs: &DealInputs) -> Result<ReportPreview>;
    fn field_descriptors(&self) -> &'static [FieldDescriptor];
}
