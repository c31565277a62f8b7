//! Report domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use super::formatter::ReportSection;
use crate::constants::MAX_REPORT_NAME_LEN;
use crate::deals::{DealInputs, DerivedMetrics};
use crate::errors::{Result, ValidationError};

/// A named, stored pair of deal inputs and the metrics computed from them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    /// Where the store keeps the report.
    pub location: String,
    pub inputs: DealInputs,
    pub metrics: DerivedMetrics,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Index entry for a stored report.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReportMetadata {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
}

/// What the store persists on `put`.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportRecord {
    pub name: String,
    pub description: Option<String>,
    pub inputs: DealInputs,
    pub metrics: DerivedMetrics,
}

/// Input model for creating a new report
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReport {
    pub name: String,
    pub description: Option<String>,
    pub inputs: DealInputs,
}

/// Input model for replacing a report's inputs
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdate {
    /// Keeps the current description when `None`.
    pub description: Option<String>,
    pub inputs: DealInputs,
}

/// A stored report rendered as display tables.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportTables {
    pub name: String,
    pub description: Option<String>,
    pub sections: Vec<ReportSection>,
}

/// Metrics and tables for inputs that are not stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    pub metrics: DerivedMetrics,
    pub sections: Vec<ReportSection>,
}

/// Trims a report name and checks it can be used as a store key.
pub fn validate_report_name(name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::MissingField("name".to_string()).into());
    }
    if trimmed.chars().count() > MAX_REPORT_NAME_LEN {
        return Err(ValidationError::InvalidInput(format!(
            "Report name must be at most {} characters",
            MAX_REPORT_NAME_LEN
        ))
        .into());
    }
    if trimmed.contains('/') {
        return Err(
            ValidationError::InvalidInput("Report name must not contain '/'".to_string()).into(),
        );
    }
    Ok(trimmed.to_string())
}

/// Normalizes an optional description, dropping blank values.
pub fn clean_description(description: Option<String>) -> Option<String> {
    description
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
}
