//! Database models for reports.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDateTime;
use diesel::prelude::*;
use rentcalc_core::deals::{
    derived_descriptors, input_descriptors, DealInputs, DerivedMetrics, Field, FieldDescriptor,
};
use rentcalc_core::errors::{DatabaseError, Error};
use rentcalc_core::reports::{Report, ReportMetadata, ReportRecord};
use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::StorageError;

/// Database model for reports. Inputs and metrics are JSON objects keyed by
/// field name with decimal strings as values, so no precision is lost.
#[derive(Queryable, Identifiable, Insertable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReportDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub inputs: String,
    pub metrics: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Columns rewritten when an existing report is replaced.
#[derive(AsChangeset, Debug, Clone)]
#[diesel(table_name = crate::schema::reports)]
#[diesel(treat_none_as_null = true)]
pub struct ReportChangesDB {
    pub description: Option<String>,
    pub inputs: String,
    pub metrics: String,
    pub updated_at: NaiveDateTime,
}

fn encode_fields<F>(descriptors: &[FieldDescriptor], value: F) -> Result<String, StorageError>
where
    F: Fn(Field) -> Option<Decimal>,
{
    let encoded: BTreeMap<&str, String> = descriptors
        .iter()
        .filter_map(|d| value(d.field).map(|v| (d.name, v.to_string())))
        .collect();
    Ok(serde_json::to_string(&encoded)?)
}

pub fn encode_inputs(inputs: &DealInputs) -> Result<String, StorageError> {
    encode_fields(input_descriptors(), |field| inputs.value(field))
}

pub fn encode_metrics(metrics: &DerivedMetrics) -> Result<String, StorageError> {
    encode_fields(derived_descriptors(), |field| metrics.value(field))
}

fn corrupt(column: &str, err: impl std::fmt::Display) -> Error {
    Error::Database(DatabaseError::Internal(format!(
        "Stored report {} could not be read: {}",
        column, err
    )))
}

pub fn decode_inputs(raw: &str) -> Result<DealInputs, Error> {
    let value: Value = serde_json::from_str(raw).map_err(|e| corrupt("inputs", e))?;
    DealInputs::from_json_value(&value).map_err(|e| corrupt("inputs", e))
}

pub fn decode_metrics(raw: &str) -> Result<DerivedMetrics, Error> {
    let values: BTreeMap<String, String> =
        serde_json::from_str(raw).map_err(|e| corrupt("metrics", e))?;
    DerivedMetrics::from_values(|field| {
        values
            .get(field.name())
            .and_then(|v| Decimal::from_str(v).ok())
    })
    .map_err(|e| corrupt("metrics", e))
}

impl ReportDB {
    pub fn from_record(
        id: String,
        record: &ReportRecord,
        now: NaiveDateTime,
    ) -> Result<Self, StorageError> {
        Ok(ReportDB {
            id,
            name: record.name.clone(),
            description: record.description.clone(),
            inputs: encode_inputs(&record.inputs)?,
            metrics: encode_metrics(&record.metrics)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl ReportChangesDB {
    pub fn from_record(record: &ReportRecord, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(ReportChangesDB {
            description: record.description.clone(),
            inputs: encode_inputs(&record.inputs)?,
            metrics: encode_metrics(&record.metrics)?,
            updated_at: now,
        })
    }
}

/// Where a stored report lives, derived from its id.
pub fn report_location(id: &str) -> String {
    format!("reports/{}", id)
}

impl TryFrom<ReportDB> for Report {
    type Error = Error;

    fn try_from(db: ReportDB) -> Result<Self, Self::Error> {
        Ok(Report {
            location: report_location(&db.id),
            inputs: decode_inputs(&db.inputs)?,
            metrics: decode_metrics(&db.metrics)?,
            id: db.id,
            name: db.name,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        })
    }
}

/// Projection used for the report index.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = crate::schema::reports)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ReportIndexDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
}

impl From<ReportIndexDB> for ReportMetadata {
    fn from(db: ReportIndexDB) -> Self {
        ReportMetadata {
            location: report_location(&db.id),
            name: db.name,
            description: db.description,
        }
    }
}
