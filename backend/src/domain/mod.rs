//! # Domain Module
//!
//! Business logic for hụi pools: a fixed group of legs each pays the face
//! value every period, and one leg per period takes the pot by bidding a
//! discount.
//!
//! ## Module Organization
//!
//! - **money / dates**: normalization of user-typed amounts (`2.5tr`, `750k`)
//!   and day-first dates
//! - **payout**: payout, paid-in, profit and ROI for a winning period
//! - **optimizer**: the best period to win by ROI or profit
//! - **bid_validation**: floor/cap band and period range checks
//! - **lifecycle**: finished detection and closing
//! - **formatting**: text rendering of pools, outcomes and summaries
//! - **\*_service**: orchestration over storage, one service per concern
//!
//! ## Business Rules
//!
//! - Every payout is reduced by a fixed fee of `fee%` of the face value
//! - A bid must lie within `[floor% × M, cap% × M]`
//! - Re-submitting a bid for a period overwrites it
//! - Closed pools accept no new bids
//! - Figures are recomputed from the bid log on every read

pub mod bid_service;
pub mod bid_validation;
pub mod commands;
pub mod dates;
pub mod error;
pub mod form_service;
pub mod formatting;
pub mod lifecycle;
pub mod models;
pub mod money;
pub mod optimizer;
pub mod payout;
pub mod pool_service;
pub mod reminder_service;
pub mod report_service;

pub use bid_service::BidService;
pub use error::HuiError;
pub use form_service::{FormKind, FormOutcome, FormService, FormSession};
pub use optimizer::{BestPeriod, OptimizeMetric};
pub use payout::{PayoutEngine, PeriodOutcome};
pub use pool_service::PoolService;
pub use reminder_service::{LogNotifier, Notifier, ReminderService};
pub use report_service::ReportService;
