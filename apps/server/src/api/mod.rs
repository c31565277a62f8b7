use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::HeaderValue,
    routing::{get, post},
    Json, Router,
};
use rentcalc_core::deals::{DealInputs, FieldDescriptor};
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use utoipa::OpenApi;

use crate::{
    config::Config,
    error::ApiResult,
    main_lib::AppState,
    models::{
        NewReportRequest, PreviewRequest, Report, ReportPreview, ReportRow, ReportSection,
        ReportSummary, ReportTables, ReportUpdateRequest,
    },
};

mod reports;

#[utoipa::path(get, path = "/api/v1/healthz", responses((status = 200, description = "Health")))]
pub async fn healthz() -> &'static str {
    "ok"
}

/// Ready once the report store answers a read.
#[utoipa::path(get, path = "/api/v1/readyz", responses((status = 200, description = "Ready")))]
pub async fn readyz(State(state): State<Arc<AppState>>) -> ApiResult<&'static str> {
    state.report_service.list_reports()?;
    Ok("ok")
}

#[utoipa::path(get, path = "/api/v1/fields", responses((status = 200, description = "Field descriptors, inputs first")))]
async fn list_fields(State(state): State<Arc<AppState>>) -> Json<&'static [FieldDescriptor]> {
    Json(state.report_service.field_descriptors())
}

#[utoipa::path(post, path = "/api/v1/preview", request_body = PreviewRequest, responses((status = 200, body = ReportPreview), (status = 400)))]
async fn preview(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<PreviewRequest>, JsonRejection>,
) -> ApiResult<Json<ReportPreview>> {
    let Json(payload) = payload?;
    let inputs = DealInputs::from_json_value(&payload.inputs)?;
    let preview = state.report_service.preview(&inputs)?;
    Ok(Json(ReportPreview::from(preview)))
}

#[derive(OpenApi)]
#[openapi(
    paths(
        healthz,
        readyz,
        list_fields,
        preview,
        reports::list_reports,
        reports::create_report,
        reports::get_report,
        reports::update_report,
        reports::get_report_tables
    ),
    components(schemas(
        ReportSummary,
        Report,
        ReportTables,
        ReportSection,
        ReportRow,
        ReportPreview,
        NewReportRequest,
        ReportUpdateRequest,
        PreviewRequest
    )),
    tags((name = "rentcalc"))
)]
pub struct ApiDoc;

pub fn app_router(state: Arc<AppState>, config: &Config) -> anyhow::Result<Router> {
    let cors = if config.cors_allow.iter().any(|o| o == "*") {
        CorsLayer::new().allow_origin(Any)
    } else {
        let origins = config
            .cors_allow
            .iter()
            .map(|o| {
                o.parse::<HeaderValue>()
                    .with_context(|| format!("Invalid CORS origin '{}'", o))
            })
            .collect::<anyhow::Result<Vec<_>>>()?;
        CorsLayer::new().allow_origin(origins)
    };

    let openapi = ApiDoc::openapi();

    let api = Router::new()
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        .route("/fields", get(list_fields))
        .route("/preview", post(preview))
        .merge(reports::router());

    Ok(Router::new()
        .nest("/api/v1", api)
        .route("/openapi.json", get(|| async { Json(openapi) }))
        .with_state(state)
        .layer(cors)
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TimeoutLayer::new(config.request_timeout))
        .layer(TraceLayer::new_for_http()))
}
