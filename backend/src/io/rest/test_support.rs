//! Router harness for handler tests.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

use crate::storage::csv::test_utils::TestEnvironment;
use crate::{create_router, AppState};

pub struct TestApp {
    _env: TestEnvironment,
    pub router: Router,
}

pub fn test_app() -> TestApp {
    let env = TestEnvironment::new().expect("Failed to create test environment");
    let router = create_router(AppState::new(env.shared_connection()));
    TestApp { _env: env, router }
}

impl TestApp {
    pub async fn send(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(match body {
                Some(json) => Body::from(json.to_string()),
                None => Body::empty(),
            })
            .unwrap();

        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    /// Weekly 12-leg pool of 10tr from 10-10-2025, floor 8%, cap 20%, no fee
    pub async fn create_sample_pool(&self) -> u64 {
        let (status, body) = self
            .send(
                Method::POST,
                "/api/pools",
                Some(serde_json::json!({
                    "name": "Hui10tr",
                    "period_kind": "tuan",
                    "start_date": "10-10-2025",
                    "leg_count": 12,
                    "face_value": "10tr",
                    "floor_rate": 8,
                    "cap_rate": 20,
                    "fee_rate": 0
                })),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "{}", body);
        body["pool"]["id"].as_u64().unwrap()
    }
}
