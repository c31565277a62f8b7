use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use rentcalc_core::reports::{NewReport, ReportUpdate};

use crate::{
    error::ApiResult,
    main_lib::AppState,
    models::{NewReportRequest, Report, ReportSummary, ReportTables, ReportUpdateRequest},
};

#[utoipa::path(get, path = "/api/v1/reports", responses((status = 200, body = [ReportSummary])))]
pub(crate) async fn list_reports(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Vec<ReportSummary>>> {
    let reports = state.report_service.list_reports()?;
    Ok(Json(reports.into_iter().map(ReportSummary::from).collect()))
}

#[utoipa::path(
    post,
    path = "/api/v1/reports",
    request_body = NewReportRequest,
    responses((status = 201, body = Report), (status = 400), (status = 409))
)]
pub(crate) async fn create_report(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<NewReportRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Report>)> {
    let Json(payload) = payload?;
    let new_report = NewReport::try_from(payload)?;
    let created = state.report_service.create_report(new_report).await?;
    Ok((StatusCode::CREATED, Json(Report::from(created))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{name}",
    params(("name" = String, Path, description = "Report name")),
    responses((status = 200, body = Report), (status = 404))
)]
pub(crate) async fn get_report(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<Report>> {
    let report = state.report_service.get_report(&name)?;
    Ok(Json(Report::from(report)))
}

#[utoipa::path(
    put,
    path = "/api/v1/reports/{name}",
    params(("name" = String, Path, description = "Report name")),
    request_body = ReportUpdateRequest,
    responses((status = 200, body = Report), (status = 400), (status = 404))
)]
pub(crate) async fn update_report(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ReportUpdateRequest>, JsonRejection>,
) -> ApiResult<Json<Report>> {
    let Json(payload) = payload?;
    let update = ReportUpdate::try_from(payload)?;
    let updated = state.report_service.update_report(&name, update).await?;
    Ok(Json(Report::from(updated)))
}

#[utoipa::path(
    get,
    path = "/api/v1/reports/{name}/tables",
    params(("name" = String, Path, description = "Report name")),
    responses((status = 200, body = ReportTables), (status = 404))
)]
pub(crate) async fn get_report_tables(
    Path(name): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<ReportTables>> {
    let tables = state.report_service.get_report_tables(&name)?;
    Ok(Json(ReportTables::from(tables)))
}

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/reports", get(list_reports).post(create_report))
        .route("/reports/{name}", get(get_report).put(update_report))
        .route("/reports/{name}/tables", get(get_report_tables))
}
