//! # REST API for Bids
//!
//! Record the winning bid of a period (overwriting any earlier one) and list
//! the bid log of a pool.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::get,
    Router,
};
use shared::SubmitBidRequest;
use tracing::info;

use crate::io::rest::error_response;
use crate::io::rest::mappers::bid_mapper::BidMapper;
use crate::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pools/:id/bids", get(list_bids).post(submit_bid))
}

pub async fn list_bids(State(state): State<AppState>, Path(pool_id): Path<u64>) -> impl IntoResponse {
    info!("GET /api/pools/{}/bids", pool_id);

    match state.bid_service.list_bids(pool_id) {
        Ok(result) => (StatusCode::OK, Json(BidMapper::to_list_response(result))).into_response(),
        Err(e) => error_response("Failed to list bids", e),
    }
}

pub async fn submit_bid(
    State(state): State<AppState>,
    Path(pool_id): Path<u64>,
    Json(request): Json<SubmitBidRequest>,
) -> impl IntoResponse {
    info!("POST /api/pools/{}/bids - request: {:?}", pool_id, request);

    let command = BidMapper::to_submit_command(pool_id, request);
    match state.bid_service.submit_bid(command) {
        Ok(result) => (StatusCode::OK, Json(BidMapper::to_submit_response(result))).into_response(),
        Err(e) => error_response("Failed to submit bid", e),
    }
}

#[cfg(test)]
mod tests {
    use crate::io::rest::test_support::test_app;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_submit_and_overwrite_bid() {
        let app = test_app();
        let id = app.create_sample_pool().await;
        let uri = format!("/api/pools/{}/bids", id);

        let (status, body) = app
            .send(Method::POST, &uri, Some(json!({ "period": 1, "amount": "800k", "date": "10-10-2025" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bid"]["amount"], 800_000);
        assert_eq!(body["bid"]["date"], "2025-10-10");
        assert!(body["replaced_previous"].is_null());

        let (_, body) = app
            .send(Method::POST, &uri, Some(json!({ "period": 1, "amount": "1tr" })))
            .await;
        assert_eq!(body["replaced_previous"], 800_000);

        let (status, body) = app.send(Method::GET, &uri, None).await;
        assert_eq!(status, StatusCode::OK);
        let bids = body["bids"].as_array().unwrap();
        assert_eq!(bids.len(), 1);
        assert_eq!(bids[0]["amount"], 1_000_000);
    }

    #[tokio::test]
    async fn test_bid_without_date_reports_period_date() {
        let app = test_app();
        let id = app.create_sample_pool().await;
        let uri = format!("/api/pools/{}/bids", id);

        let (status, body) = app
            .send(Method::POST, &uri, Some(json!({ "period": 2, "amount": "1tr" })))
            .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["bid"]["date"], "2025-10-17");

        let (_, body) = app.send(Method::GET, &uri, None).await;
        assert_eq!(body["bids"][0]["date"], "2025-10-17");
    }

    #[tokio::test]
    async fn test_bid_errors_map_to_statuses() {
        let app = test_app();
        let id = app.create_sample_pool().await;
        let uri = format!("/api/pools/{}/bids", id);

        let (status, body) = app
            .send(Method::POST, &uri, Some(json!({ "period": 1, "amount": "799999" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["kind"], "range_error");
        assert!(body["error"].as_str().unwrap().contains("800000"));

        let (status, _) = app
            .send(Method::POST, &uri, Some(json!({ "period": 13, "amount": "1tr" })))
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = app
            .send(Method::POST, "/api/pools/42/bids", Some(json!({ "period": 1, "amount": "1tr" })))
            .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        app.send(Method::POST, &format!("/api/pools/{}/close", id), None).await;
        let (status, body) = app
            .send(Method::POST, &uri, Some(json!({ "period": 1, "amount": "1tr" })))
            .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["kind"], "pool_closed");
    }
}
