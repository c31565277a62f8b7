use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, info};

use super::formatter::format_report;
use super::reports_model::{
    clean_description, validate_report_name, NewReport, Report, ReportMetadata, ReportPreview,
    ReportRecord, ReportTables, ReportUpdate,
};
use super::reports_traits::{ReportRepositoryTrait, ReportServiceTrait};
use crate::deals::{compute, DealInputs, FieldDescriptor, FIELD_DESCRIPTORS};
use crate::errors::{DatabaseError, Error, Result};

pub struct ReportService {
    repository: Arc<dyn ReportRepositoryTrait>,
}

impl ReportService {
    pub fn new(repository: Arc<dyn ReportRepositoryTrait>) -> Self {
        ReportService { repository }
    }

    fn load(&self, name: &str) -> Result<Report> {
        self.repository.get(name)?.ok_or_else(|| {
            Error::Database(DatabaseError::NotFound(format!("Report '{}'", name)))
        })
    }
}

fn name_taken(name: &str) -> Error {
    Error::ConstraintViolation(format!(
        "Report name '{}' already exists. Please choose a different name.",
        name
    ))
}

#[async_trait]
impl ReportServiceTrait for ReportService {
    fn list_reports(&self) -> Result<Vec<ReportMetadata>> {
        self.repository.list()
    }

    fn get_report(&self, name: &str) -> Result<Report> {
        self.load(name)
    }

    async fn create_report(&self, new_report: NewReport) -> Result<Report> {
        let name = validate_report_name(&new_report.name)?;
        if self.repository.get(&name)?.is_some() {
            return Err(name_taken(&name));
        }

        let metrics = compute(&new_report.inputs)?;
        let location = self
            .repository
            .put(ReportRecord {
                name: name.clone(),
                description: clean_description(new_report.description),
                inputs: new_report.inputs,
                metrics,
            })
            .await
            .map_err(|e| match e {
                // Lost a race with a concurrent create of the same name.
                Error::Database(DatabaseError::UniqueViolation(_)) => name_taken(&name),
                other => other,
            })?;
        info!("Saved report '{}' at {}", name, location);
        self.load(&name)
    }

    async fn update_report(&self, name: &str, update: ReportUpdate) -> Result<Report> {
        let existing = self.load(name)?;
        let metrics = compute(&update.inputs)?;
        let description = clean_description(update.description).or(existing.description);

        let location = self
            .repository
            .replace(ReportRecord {
                name: existing.name.clone(),
                description,
                inputs: update.inputs,
                metrics,
            })
            .await?;
        info!("Updated report '{}' at {}", existing.name, location);
        self.load(&existing.name)
    }

    /// Stored metrics are informational; tables are always rendered from
    /// metrics recomputed from the stored inputs.
    fn get_report_tables(&self, name: &str) -> Result<ReportTables> {
        let report = self.load(name)?;
        let metrics = compute(&report.inputs)?;
        if metrics != report.metrics {
            debug!("Stored metrics for '{}' differ from recomputed ones", name);
        }
        Ok(ReportTables {
            sections: format_report(&report.inputs, &metrics),
            name: report.name,
            description: report.description,
        })
    }

    fn preview(&self, inputs: &DealInputs) -> Result<ReportPreview> {
        let metrics = compute(inputs)?;
        Ok(ReportPreview {
            sections: format_report(inputs, &metrics),
            metrics,
        })
    }

    fn field_descriptors(&self) -> &'static [FieldDescriptor] {
        &FIELD_DESCRIPTORS
    }
}
