//! # REST API for One-Message Forms
//!
//! `GET /forms/:kind` returns the fill-in template; `POST /forms/:kind` takes
//! the whole reply in one message and runs the matching operation. The client
//! owns the conversation; the server keeps no form state.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use chrono::Local;
use shared::{FormReplyRequest, FormResponse, FormTemplateResponse};
use tracing::info;

use crate::domain::form_service::{FormKind, FormOutcome};
use crate::io::rest::error_response;
use crate::io::rest::mappers::bid_mapper::BidMapper;
use crate::io::rest::mappers::pool_mapper::PoolMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/forms/:kind", get(get_form_template).post(submit_form))
}

pub async fn get_form_template(State(state): State<AppState>, Path(kind): Path<String>) -> Response {
    info!("GET /api/forms/{}", kind);

    let kind = match FormKind::parse(&kind) {
        Ok(kind) => kind,
        Err(e) => return error_response("Unknown form", e.into()),
    };
    let session = state.form_service.open(kind);

    let response = FormTemplateResponse {
        kind: kind.as_str().to_string(),
        expected_fields: session.expected_fields.iter().map(|field| field.to_string()).collect(),
        template: session.template(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

pub async fn submit_form(
    State(state): State<AppState>,
    Path(kind): Path<String>,
    Json(request): Json<FormReplyRequest>,
) -> Response {
    info!("POST /api/forms/{} - request: {:?}", kind, request);

    let kind = match FormKind::parse(&kind) {
        Ok(kind) => kind,
        Err(e) => return error_response("Unknown form", e.into()),
    };
    let session = state.form_service.open(kind);
    let today = Local::now().date_naive();

    match state.form_service.submit(&session, &request.reply, today) {
        Ok(FormOutcome::PoolCreated(result)) => (
            StatusCode::CREATED,
            Json(FormResponse::PoolCreated(PoolMapper::to_create_response(result))),
        )
            .into_response(),
        Ok(FormOutcome::BidSubmitted(result)) => (
            StatusCode::OK,
            Json(FormResponse::BidSubmitted(BidMapper::to_submit_response(result))),
        )
            .into_response(),
        Err(e) => error_response("Failed to submit form", e),
    }
}
