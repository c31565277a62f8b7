use std::sync::Arc;

use crate::config::Config;
use rentcalc_core::reports::{ReportService, ReportServiceTrait};
use rentcalc_storage_sqlite::{db, reports::ReportRepository};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub report_service: Arc<dyn ReportServiceTrait + Send + Sync>,
}

pub fn init_tracing() {
    let log_format = std::env::var("RC_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

/// Opens the report store and wires the report service over it.
pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.db_path)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer(&pool)?;

    let report_repository = Arc::new(ReportRepository::new(pool.clone(), writer));
    let report_service = Arc::new(ReportService::new(report_repository));

    Ok(Arc::new(AppState { report_service }))
}
