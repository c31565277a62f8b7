use chrono::NaiveDateTime;
use rentcalc_core::deals::{DealInputs, DerivedMetrics};
use rentcalc_core::errors::Error as CoreError;
use rentcalc_core::reports as core_reports;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub name: String,
    pub description: Option<String>,
    pub location: String,
}

impl From<core_reports::ReportMetadata> for ReportSummary {
    fn from(m: core_reports::ReportMetadata) -> Self {
        Self {
            name: m.name,
            description: m.description,
            location: m.location,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub location: String,
    #[schema(value_type = Object)]
    pub inputs: DealInputs,
    #[schema(value_type = Object)]
    pub metrics: DerivedMetrics,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<core_reports::Report> for Report {
    fn from(r: core_reports::Report) -> Self {
        Self {
            id: r.id,
            name: r.name,
            description: r.description,
            location: r.location,
            inputs: r.inputs,
            metrics: r.metrics,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportRow {
    pub label: String,
    pub value: String,
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportSection {
    pub title: String,
    pub rows: Vec<ReportRow>,
}

impl From<core_reports::ReportSection> for ReportSection {
    fn from(s: core_reports::ReportSection) -> Self {
        Self {
            title: s.title,
            rows: s
                .rows
                .into_iter()
                .map(|r| ReportRow {
                    label: r.label,
                    value: r.value,
                })
                .collect(),
        }
    }
}

fn sections_from(sections: Vec<core_reports::ReportSection>) -> Vec<ReportSection> {
    sections.into_iter().map(ReportSection::from).collect()
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportTables {
    pub name: String,
    pub description: Option<String>,
    pub sections: Vec<ReportSection>,
}

impl From<core_reports::ReportTables> for ReportTables {
    fn from(t: core_reports::ReportTables) -> Self {
        Self {
            name: t.name,
            description: t.description,
            sections: sections_from(t.sections),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportPreview {
    #[schema(value_type = Object)]
    pub metrics: DerivedMetrics,
    pub sections: Vec<ReportSection>,
}

impl From<core_reports::ReportPreview> for ReportPreview {
    fn from(p: core_reports::ReportPreview) -> Self {
        Self {
            metrics: p.metrics,
            sections: sections_from(p.sections),
        }
    }
}

/// Deal inputs arrive as a loose JSON object (form keys, numbers or numeric
/// strings) and are normalized by the core model.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct NewReportRequest {
    pub name: String,
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub inputs: Value,
}

impl TryFrom<NewReportRequest> for core_reports::NewReport {
    type Error = CoreError;

    fn try_from(req: NewReportRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            name: req.name,
            description: req.description,
            inputs: DealInputs::from_json_value(&req.inputs)?,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ReportUpdateRequest {
    pub description: Option<String>,
    #[schema(value_type = Object)]
    pub inputs: Value,
}

impl TryFrom<ReportUpdateRequest> for core_reports::ReportUpdate {
    type Error = CoreError;

    fn try_from(req: ReportUpdateRequest) -> Result<Self, Self::Error> {
        Ok(Self {
            description: req.description,
            inputs: DealInputs::from_json_value(&req.inputs)?,
        })
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PreviewRequest {
    #[schema(value_type = Object)]
    pub inputs: Value,
}
