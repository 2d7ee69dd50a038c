//! # REST API Interface Layer
//!
//! JSON endpoints under `/api`. Each `*_apis` module exposes a `router()` with
//! absolute paths; `api_router` merges them.
//!
//! Domain errors are recovered from `anyhow::Error` and mapped to status codes:
//!
//! | `HuiError` | Status |
//! |---|---|
//! | `Parse`, range and configuration errors | 400 |
//! | `PoolNotFound` | 404 |
//! | `PoolClosed` | 409 |
//! | anything else | 500 |

pub mod bid_apis;
pub mod config_apis;
pub mod form_apis;
pub mod mappers;
pub mod pool_apis;
pub mod report_apis;

#[cfg(test)]
pub(crate) mod test_support;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    Router,
};
use shared::ErrorResponse;
use tracing::{error, warn};

use crate::domain::error::HuiError;
use crate::AppState;

pub fn api_router() -> Router<AppState> {
    Router::new()
        .merge(pool_apis::router())
        .merge(bid_apis::router())
        .merge(report_apis::router())
        .merge(form_apis::router())
        .merge(config_apis::router())
}

pub fn status_for(err: &HuiError) -> StatusCode {
    match err {
        HuiError::Parse { .. }
        | HuiError::BidOutOfRange { .. }
        | HuiError::PeriodOutOfRange { .. }
        | HuiError::InvalidRates { .. }
        | HuiError::InvalidConfig { .. } => StatusCode::BAD_REQUEST,
        HuiError::PoolNotFound { .. } => StatusCode::NOT_FOUND,
        HuiError::PoolClosed { .. } => StatusCode::CONFLICT,
    }
}

/// Turn a service failure into a JSON error response
pub fn error_response(context: &str, err: anyhow::Error) -> Response {
    match err.downcast_ref::<HuiError>() {
        Some(domain_error) => {
            warn!("{}: {}", context, domain_error);
            let body = ErrorResponse {
                error: domain_error.to_string(),
                kind: domain_error.kind().to_string(),
            };
            (status_for(domain_error), Json(body)).into_response()
        }
        None => {
            error!("{}: {:?}", context, err);
            let body = ErrorResponse {
                error: format!("{}: {}", context, err),
                kind: "internal".to_string(),
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
        }
    }
}
