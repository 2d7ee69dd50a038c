//! # Hụi pool backend
//!
//! Accounting for rotating savings pools: pool configuration, the per-period
//! bid log, payout/profit/ROI figures, the best period to win, and daily
//! reminders. Served as a JSON API under `/api`.

pub mod config;
pub mod domain;
pub mod io;
pub mod scheduler;
pub mod storage;

use anyhow::Result;
use axum::{http::Method, Router};
use log::info;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

use crate::config::BackendConfig;
use crate::domain::{BidService, FormService, PoolService, ReminderService, ReportService};
use crate::storage::CsvConnection;

#[derive(Clone)]
pub struct AppState {
    pub pool_service: PoolService,
    pub bid_service: BidService,
    pub report_service: ReportService,
    pub reminder_service: ReminderService,
    pub form_service: FormService,
}

impl AppState {
    /// Wire every service onto one data directory
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        let pool_service = PoolService::new(csv_conn.clone());
        let bid_service = BidService::new(csv_conn.clone(), pool_service.clone());
        let report_service = ReportService::new(csv_conn.clone(), pool_service.clone());
        let reminder_service = ReminderService::new(csv_conn, pool_service.clone(), report_service.clone());
        let form_service = FormService::new(pool_service.clone(), bid_service.clone());

        Self {
            pool_service,
            bid_service,
            report_service,
            reminder_service,
            form_service,
        }
    }
}

pub fn initialize_backend(config: &BackendConfig) -> Result<AppState> {
    info!("Setting up data directory at {:?}", config.data_dir);
    let csv_conn = Arc::new(CsvConnection::new(&config.data_dir)?);

    info!("Setting up application state");
    Ok(AppState::new(csv_conn))
}

pub fn create_router(app_state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .nest("/api", io::rest::api_router())
        .layer(cors)
        .with_state(app_state)
}
