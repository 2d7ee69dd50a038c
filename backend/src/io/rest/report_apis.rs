//! # REST API for Pool Figures
//!
//! Payout, paid-in, profit and ROI for a period, the best period to win, and
//! a pool summary. Everything is recomputed from the bid log per request.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use shared::BestPeriodQuery;
use tracing::info;

use crate::domain::dates::parse_any_date;
use crate::domain::optimizer::OptimizeMetric;
use crate::io::rest::error_response;
use crate::io::rest::mappers::report_mapper::ReportMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pools/:id/periods/:period", get(get_period_outcome))
        .route("/pools/:id/best", get(get_best_period))
        .route("/pools/:id/summary", get(get_summary))
}

#[derive(Debug, Deserialize, Default)]
pub struct SummaryQuery {
    /// Evaluate as of this date instead of today
    pub as_of: Option<String>,
}

pub async fn get_period_outcome(
    State(state): State<AppState>,
    Path((pool_id, period)): Path<(u64, u32)>,
) -> impl IntoResponse {
    info!("GET /api/pools/{}/periods/{}", pool_id, period);

    match state.report_service.period_outcome(pool_id, period) {
        Ok(result) => (StatusCode::OK, Json(ReportMapper::to_outcome_response(result))).into_response(),
        Err(e) => error_response("Failed to compute period outcome", e),
    }
}

pub async fn get_best_period(
    State(state): State<AppState>,
    Path(pool_id): Path<u64>,
    Query(query): Query<BestPeriodQuery>,
) -> Response {
    info!("GET /api/pools/{}/best - query: {:?}", pool_id, query);

    let metric = match query.metric.as_deref().map(OptimizeMetric::parse).transpose() {
        Ok(metric) => metric.unwrap_or_default(),
        Err(e) => return error_response("Invalid metric", e.into()),
    };

    match state.report_service.best_period(pool_id, metric) {
        Ok(result) => (StatusCode::OK, Json(ReportMapper::to_best_response(result))).into_response(),
        Err(e) => error_response("Failed to find best period", e),
    }
}

pub async fn get_summary(
    State(state): State<AppState>,
    Path(pool_id): Path<u64>,
    Query(query): Query<SummaryQuery>,
) -> Response {
    info!("GET /api/pools/{}/summary - query: {:?}", pool_id, query);

    let today: NaiveDate = match query.as_of.as_deref().map(parse_any_date).transpose() {
        Ok(date) => date.unwrap_or_else(|| Local::now().date_naive()),
        Err(e) => return error_response("Invalid as_of date", e.into()),
    };

    match state.report_service.summary(pool_id, today) {
        Ok(result) => (StatusCode::OK, Json(ReportMapper::to_summary_response(result))).into_response(),
        Err(e) => error_response("Failed to summarize pool", e),
    }
}
