//! # REST API for Report Settings
//!
//! Where reminders and the monthly report are sent, and at what hour.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::{ReportSettings, UpdateReportSettingsRequest};
use tracing::info;

use crate::domain::commands::config::UpdateReportSettingsCommand;
use crate::domain::dates::format_iso_date;
use crate::io::rest::error_response;
use crate::storage::csv::GlobalConfig;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/config/report", get(get_report_settings).put(update_report_settings))
}

fn to_settings(config: GlobalConfig) -> ReportSettings {
    ReportSettings {
        report_target: config.report_target,
        report_hour: config.report_hour,
        last_monthly_report_on: config.last_monthly_report_on.map(format_iso_date),
    }
}

pub async fn get_report_settings(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/config/report");

    match state.reminder_service.report_settings() {
        Ok(config) => (StatusCode::OK, Json(to_settings(config))).into_response(),
        Err(e) => error_response("Failed to load report settings", e),
    }
}

pub async fn update_report_settings(
    State(state): State<AppState>,
    Json(request): Json<UpdateReportSettingsRequest>,
) -> impl IntoResponse {
    info!("PUT /api/config/report - request: {:?}", request);

    let command = UpdateReportSettingsCommand {
        report_target: request.report_target,
        report_hour: request.report_hour,
    };
    match state.reminder_service.update_report_settings(command) {
        Ok(config) => (StatusCode::OK, Json(to_settings(config))).into_response(),
        Err(e) => error_response("Failed to update report settings", e),
    }
}
