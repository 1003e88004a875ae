mod cli;
mod form;

use axum::{
    Router,
    extract::{
        Json, Query,
        rejection::{JsonRejection, QueryRejection},
    },
    http::{HeaderValue, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use chrono::Datelike;
use log::{error, info};
use serde::Serialize;
use std::net::SocketAddr;
use tokio::net::TcpListener;

pub use cli::{Cli, run_cli, write_report};
pub use form::{
    AdjustmentKind, FieldAdjustment, FieldBounds, FieldValue, PlanField, PlanPayload, Planner,
};

use crate::core::report::{GUIDANCE_MESSAGES, REPORT_FILE_NAME, share_text};
use crate::core::{DisplaySummary, PlanInputs, PlanReport, PlanResults};
use crate::{NiveshError, Result};

const INDEX_HTML: &str = include_str!("../../web/index.html");
const STYLES_CSS: &str = include_str!("../../web/styles.css");
const APP_JS: &str = include_str!("../../web/app.js");

/// Calendar year the projection series starts from.
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanResponse {
    pub inputs: PlanInputs,
    pub results: PlanResults,
    pub summary: DisplaySummary,
    pub guidance: [&'static str; 5],
    pub share_text: String,
    pub adjustments: Vec<FieldAdjustment>,
}

impl PlanResponse {
    pub fn new(planner: &Planner, adjustments: Vec<FieldAdjustment>) -> Self {
        let inputs = *planner.inputs();
        let results = planner.results().clone();
        Self {
            summary: DisplaySummary::new(&inputs, &results),
            share_text: share_text(&results),
            guidance: GUIDANCE_MESSAGES,
            inputs,
            results,
            adjustments,
        }
    }
}

#[derive(Debug, Serialize)]
struct ShareResponse {
    title: &'static str,
    text: String,
}

#[derive(Debug, Serialize)]
struct ErrorResponse {
    error: String,
}

pub async fn run_http_server(port: u16) -> Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let app = Router::new()
        .route("/", get(index_handler))
        .route("/index.html", get(index_handler))
        .route("/styles.css", get(styles_handler))
        .route("/app.js", get(app_js_handler))
        .route("/api/plan", get(plan_get_handler).post(plan_post_handler))
        .route(
            "/api/report",
            get(report_get_handler).post(report_post_handler),
        )
        .route("/api/share", get(share_get_handler).post(share_post_handler))
        .fallback(not_found_handler);

    let listener = TcpListener::bind(addr).await?;
    info!("retirement planner listening on http://{addr}");
    info!("local access: http://127.0.0.1:{port}/");

    axum::serve(listener, app).await?;
    Ok(())
}

async fn index_handler() -> impl IntoResponse {
    with_cache_control(Html(INDEX_HTML))
}

async fn styles_handler() -> impl IntoResponse {
    with_cache_control((
        [(header::CONTENT_TYPE, "text/css; charset=utf-8")],
        STYLES_CSS,
    ))
}

async fn app_js_handler() -> impl IntoResponse {
    with_cache_control((
        [(
            header::CONTENT_TYPE,
            "application/javascript; charset=utf-8",
        )],
        APP_JS,
    ))
}

async fn not_found_handler() -> Response {
    error_response(StatusCode::NOT_FOUND, "Not found")
}

async fn plan_get_handler(
    query: std::result::Result<Query<PlanPayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => plan_handler_impl(payload),
        Err(rejection) => payload_error(rejection.body_text()),
    }
}

async fn plan_post_handler(
    body: std::result::Result<Json<PlanPayload>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(payload)) => plan_handler_impl(payload),
        Err(rejection) => payload_error(rejection.body_text()),
    }
}

async fn report_get_handler(
    query: std::result::Result<Query<PlanPayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => report_handler_impl(payload),
        Err(rejection) => payload_error(rejection.body_text()),
    }
}

async fn report_post_handler(
    body: std::result::Result<Json<PlanPayload>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(payload)) => report_handler_impl(payload),
        Err(rejection) => payload_error(rejection.body_text()),
    }
}

async fn share_get_handler(
    query: std::result::Result<Query<PlanPayload>, QueryRejection>,
) -> Response {
    match query {
        Ok(Query(payload)) => share_handler_impl(payload),
        Err(rejection) => payload_error(rejection.body_text()),
    }
}

async fn share_post_handler(
    body: std::result::Result<Json<PlanPayload>, JsonRejection>,
) -> Response {
    match body {
        Ok(Json(payload)) => share_handler_impl(payload),
        Err(rejection) => payload_error(rejection.body_text()),
    }
}

fn planner_from_payload(payload: &PlanPayload) -> (Planner, Vec<FieldAdjustment>) {
    let mut planner = Planner::default_for_year(current_year());
    let adjustments = planner.apply(payload);
    (planner, adjustments)
}

fn plan_handler_impl(payload: PlanPayload) -> Response {
    let (planner, adjustments) = planner_from_payload(&payload);
    json_response(StatusCode::OK, PlanResponse::new(&planner, adjustments))
}

fn report_handler_impl(payload: PlanPayload) -> Response {
    let (planner, _) = planner_from_payload(&payload);
    let report = PlanReport::new(planner.inputs(), planner.results());
    let body = match report.to_pretty_json() {
        Ok(body) => body,
        Err(e) => {
            let err = NiveshError::from(e);
            error!("failed to serialize report: {err}");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, &err.to_string());
        }
    };

    let disposition = format!("attachment; filename=\"{REPORT_FILE_NAME}\"");
    let mut response = with_cache_control((
        [(header::CONTENT_TYPE, "application/json")],
        body,
    ));
    if let Ok(value) = HeaderValue::from_str(&disposition) {
        response
            .headers_mut()
            .insert(header::CONTENT_DISPOSITION, value);
    }
    response
}

fn share_handler_impl(payload: PlanPayload) -> Response {
    let (planner, _) = planner_from_payload(&payload);
    json_response(
        StatusCode::OK,
        ShareResponse {
            title: "My Retirement Plan",
            text: share_text(planner.results()),
        },
    )
}

fn payload_error(detail: String) -> Response {
    let err = NiveshError::InvalidPayload(detail);
    error_response(StatusCode::BAD_REQUEST, &err.to_string())
}

fn with_cache_control<R: IntoResponse>(response: R) -> Response {
    let mut response = response.into_response();
    response
        .headers_mut()
        .insert(header::CACHE_CONTROL, HeaderValue::from_static("no-store"));
    response
}

fn json_response<T: Serialize>(status: StatusCode, body: T) -> Response {
    with_cache_control((status, Json(body)))
}

fn error_response(status: StatusCode, msg: &str) -> Response {
    json_response(
        status,
        ErrorResponse {
            error: msg.to_string(),
        },
    )
}
