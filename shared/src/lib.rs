//! Types exchanged over the HTTP API.
//!
//! Amounts are integer VND. Dates travel as canonical `YYYY-MM-DD` strings,
//! with a day-first `*_display` companion where a client shows them as-is.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    Monthly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoolStatus {
    Open,
    Closed,
}

/// What the best-period search maximizes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum OptimizeMetric {
    #[default]
    Roi,
    Profit,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: u64,
    pub name: String,
    pub period_kind: PeriodKind,
    /// Canonical date of period 1
    pub start_date: String,
    pub leg_count: u32,
    /// Face value M per leg per period
    pub face_value: i64,
    pub floor_rate: f64,
    pub cap_rate: f64,
    pub fee_rate: f64,
    /// Fixed deduction from every payout, `fee_rate`% of M
    pub fee_amount: i64,
    pub floor_amount: i64,
    pub cap_amount: i64,
    pub status: PoolStatus,
    /// `HH:MM`
    pub reminder_time: String,
    pub last_reminded_on: Option<String>,
    pub created_at: String,
    /// One-line human-readable rendering
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bid {
    pub pool_id: u64,
    pub period: u32,
    pub amount: i64,
    pub date: Option<String>,
}

/// Figures for a leg that wins at `period`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodOutcome {
    pub period: u32,
    /// Calendar date of the period
    pub date: String,
    pub payout: i64,
    /// Contributions paid in before winning
    pub paid: i64,
    pub profit: i64,
    /// Profit over the paid-in base (or M when nothing was paid in yet), as a ratio
    pub roi: f64,
    /// `12.34%`
    pub roi_display: String,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePoolRequest {
    pub name: String,
    /// `tuan`/`weekly` or `thang`/`monthly`
    pub period_kind: String,
    /// `DD-MM-YYYY`, `D-M-YY` or `YYYY-MM-DD`
    pub start_date: String,
    pub leg_count: u32,
    /// Money shorthand accepted, e.g. `10tr`
    pub face_value: String,
    pub floor_rate: f64,
    pub cap_rate: f64,
    #[serde(default)]
    pub fee_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePoolResponse {
    pub pool: Pool,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolListResponse {
    pub pools: Vec<Pool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClosePoolResponse {
    pub pool: Pool,
    /// False when the pool had already been closed
    pub newly_closed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePoolResponse {
    pub pool_id: u64,
    pub deleted_bids: usize,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SetReminderRequest {
    /// `HH:MM`
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitBidRequest {
    pub period: u32,
    /// Money shorthand accepted, e.g. `2tr`
    pub amount: String,
    #[serde(default)]
    pub date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubmitBidResponse {
    pub bid: Bid,
    /// Amount this submission overwrote, if the period already had a bid
    pub replaced_previous: Option<i64>,
    pub success_message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BidListResponse {
    pub pool_id: u64,
    pub bids: Vec<Bid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodOutcomeResponse {
    pub pool_id: u64,
    /// Bid on record for the period, if any
    pub bid: Option<i64>,
    pub outcome: PeriodOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BestPeriodQuery {
    #[serde(default)]
    pub metric: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestPeriodResponse {
    pub pool_id: u64,
    pub metric: OptimizeMetric,
    pub best: PeriodOutcome,
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolSummaryResponse {
    pub pool: Pool,
    pub bids: Vec<Bid>,
    pub current_period: u32,
    pub current: PeriodOutcome,
    pub best: PeriodOutcome,
    pub finished: bool,
    pub remaining_periods: u32,
    /// Multi-line rendering for chat-style clients
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormTemplateResponse {
    pub kind: String,
    pub expected_fields: Vec<String>,
    pub template: String,
}

/// A whole form answered in one message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormReplyRequest {
    pub reply: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FormResponse {
    PoolCreated(CreatePoolResponse),
    BidSubmitted(SubmitBidResponse),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    /// Where reminders and monthly reports are delivered
    pub report_target: Option<String>,
    /// Hour (0-23) on the 1st of the month when the report goes out
    pub report_hour: u32,
    pub last_monthly_report_on: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateReportSettingsRequest {
    #[serde(default)]
    pub report_target: Option<String>,
    pub report_hour: u32,
}

/// Body of every non-2xx response
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    /// `parse_error`, `range_error`, `not_found`, `pool_closed` or `internal`
    pub kind: String,
}
