//! # REST API for Pool Management
//!
//! Create, list, inspect, close and delete pools, and set their reminder time.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use shared::{CreatePoolRequest, SetReminderRequest};
use tracing::info;

use crate::domain::commands::pool::SetReminderCommand;
use crate::io::rest::error_response;
use crate::io::rest::mappers::pool_mapper::PoolMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/pools", get(list_pools).post(create_pool))
        .route("/pools/:id", get(get_pool).delete(delete_pool))
        .route("/pools/:id/close", post(close_pool))
        .route("/pools/:id/reminder", put(set_reminder))
}

pub async fn list_pools(State(state): State<AppState>) -> impl IntoResponse {
    info!("GET /api/pools");

    match state.pool_service.list_pools() {
        Ok(result) => (StatusCode::OK, Json(PoolMapper::to_list_response(result))).into_response(),
        Err(e) => error_response("Failed to list pools", e),
    }
}

pub async fn create_pool(
    State(state): State<AppState>,
    Json(request): Json<CreatePoolRequest>,
) -> impl IntoResponse {
    info!("POST /api/pools - request: {:?}", request);

    let command = PoolMapper::to_create_command(request);
    match state.pool_service.create_pool(command) {
        Ok(result) => (StatusCode::CREATED, Json(PoolMapper::to_create_response(result))).into_response(),
        Err(e) => error_response("Failed to create pool", e),
    }
}

pub async fn get_pool(State(state): State<AppState>, Path(pool_id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/pools/{}", pool_id);

    match state.pool_service.get_pool(pool_id) {
        Ok(pool) => (StatusCode::OK, Json(PoolMapper::to_dto(pool))).into_response(),
        Err(e) => error_response("Failed to get pool", e),
    }
}

pub async fn delete_pool(State(state): State<AppState>, Path(pool_id): Path<u64>) -> impl IntoResponse {
    info!("DELETE /api/pools/{}", pool_id);

    match state.pool_service.delete_pool(pool_id) {
        Ok(result) => (StatusCode::OK, Json(PoolMapper::to_delete_response(result))).into_response(),
        Err(e) => error_response("Failed to delete pool", e),
    }
}

pub async fn close_pool(State(state): State<AppState>, Path(pool_id): Path<u64>) -> impl IntoResponse {
    info!("POST /api/pools/{}/close", pool_id);

    match state.pool_service.close_pool(pool_id) {
        Ok(result) => (StatusCode::OK, Json(PoolMapper::to_close_response(result))).into_response(),
        Err(e) => error_response("Failed to close pool", e),
    }
}

pub async fn set_reminder(
    State(state): State<AppState>,
    Path(pool_id): Path<u64>,
    Json(request): Json<SetReminderRequest>,
) -> impl IntoResponse {
    info!("PUT /api/pools/{}/reminder - request: {:?}", pool_id, request);

    let command = SetReminderCommand {
        pool_id,
        time: request.time,
    };
    match state.pool_service.set_reminder(command) {
        Ok(result) => (StatusCode::OK, Json(PoolMapper::to_dto(result.pool))).into_response(),
        Err(e) => error_response("Failed to set reminder", e),
    }
}
