use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use uuid::Uuid;

use rentcalc_core::reports::{Report, ReportMetadata, ReportRecord, ReportRepositoryTrait};
use rentcalc_core::errors::{DatabaseError, Error, Result};

use super::model::{report_location, ReportChangesDB, ReportDB, ReportIndexDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::reports;

/// Report store backed by the `reports` table. Reads use the pool, writes go
/// through the single writer.
pub struct ReportRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl ReportRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        ReportRepository { pool, writer }
    }
}

#[async_trait]
impl ReportRepositoryTrait for ReportRepository {
    fn get(&self, report_name: &str) -> Result<Option<Report>> {
        let mut conn = get_connection(&self.pool)?;
        let row = reports::table
            .filter(reports::name.eq(report_name))
            .select(ReportDB::as_select())
            .first::<ReportDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;

        row.map(Report::try_from).transpose()
    }

    /// Inserts a new report. The `UNIQUE(name)` constraint rejects a name
    /// that is already stored.
    async fn put(&self, record: ReportRecord) -> Result<String> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<String> {
                let row = ReportDB::from_record(
                    Uuid::new_v4().to_string(),
                    &record,
                    Utc::now().naive_utc(),
                )?;
                diesel::insert_into(reports::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!("Inserted report '{}' ({})", record.name, row.id);
                Ok(report_location(&row.id))
            })
            .await
    }

    /// Rewrites the stored inputs and metrics of an existing report, keeping
    /// its id and creation time.
    async fn replace(&self, record: ReportRecord) -> Result<String> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<String> {
                let changes = ReportChangesDB::from_record(&record, Utc::now().naive_utc())?;
                let report_id = diesel::update(reports::table)
                    .filter(reports::name.eq(&record.name))
                    .set(&changes)
                    .returning(reports::id)
                    .get_result::<String>(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        Error::Database(DatabaseError::NotFound(format!(
                            "Report '{}'",
                            record.name
                        )))
                    })?;
                debug!("Replaced report '{}' ({})", record.name, report_id);
                Ok(report_location(&report_id))
            })
            .await
    }

    fn list(&self) -> Result<Vec<ReportMetadata>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = reports::table
            .order((reports::created_at.asc(), reports::name.asc()))
            .select(ReportIndexDB::as_select())
            .load::<ReportIndexDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(ReportMetadata::from).collect())
    }
}
