//! Domain-level command and query types.
//!
//! Services take and return these; the REST layer maps the public DTOs from
//! the `shared` crate onto them and back.

pub mod pool {
    use crate::domain::models::Pool;

    /// Raw pool parameters as a user typed them.
    ///
    /// Period kind, start date and face value are normalized by the service.
    #[derive(Debug, Clone)]
    pub struct CreatePoolCommand {
        pub name: String,
        pub period_kind: String,
        pub start_date: String,
        pub leg_count: u32,
        pub face_value: String,
        pub floor_rate: f64,
        pub cap_rate: f64,
        pub fee_rate: f64,
    }

    #[derive(Debug, Clone)]
    pub struct CreatePoolResult {
        pub pool: Pool,
    }

    #[derive(Debug, Clone)]
    pub struct ListPoolsResult {
        pub pools: Vec<Pool>,
    }

    #[derive(Debug, Clone)]
    pub struct ClosePoolResult {
        pub pool: Pool,
        /// False when the pool was already closed
        pub newly_closed: bool,
    }

    #[derive(Debug, Clone)]
    pub struct DeletePoolResult {
        pub pool_id: u64,
        pub deleted_bids: usize,
    }

    #[derive(Debug, Clone)]
    pub struct SetReminderCommand {
        pub pool_id: u64,
        /// `HH:MM`
        pub time: String,
    }

    #[derive(Debug, Clone)]
    pub struct SetReminderResult {
        pub pool: Pool,
    }
}

pub mod bid {
    use crate::domain::models::{Bid, Pool};

    #[derive(Debug, Clone)]
    pub struct SubmitBidCommand {
        pub pool_id: u64,
        pub period: u32,
        /// Money shorthand, e.g. `2tr`
        pub amount: String,
        /// Day-first or canonical date; `None` or blank records the period's own date
        pub date: Option<String>,
    }

    #[derive(Debug, Clone)]
    pub struct SubmitBidResult {
        pub bid: Bid,
        /// The bid this submission overwrote, if any
        pub replaced: Option<Bid>,
    }

    #[derive(Debug, Clone)]
    pub struct ListBidsResult {
        pub pool: Pool,
        pub bids: Vec<Bid>,
    }
}

pub mod report {
    use chrono::NaiveDate;

    use crate::domain::models::{Bid, Pool};
    use crate::domain::optimizer::BestPeriod;
    use crate::domain::payout::PeriodOutcome;

    #[derive(Debug, Clone)]
    pub struct PeriodOutcomeResult {
        pub pool: Pool,
        pub outcome: PeriodOutcome,
        pub date: NaiveDate,
        /// Bid on record for the period, if any
        pub bid: Option<i64>,
    }

    #[derive(Debug, Clone)]
    pub struct BestPeriodResult {
        pub pool: Pool,
        pub best: BestPeriod,
    }

    #[derive(Debug, Clone)]
    pub struct PoolSummaryResult {
        pub pool: Pool,
        pub bids: Vec<Bid>,
        /// Estimated current period: one past the number of recorded bids, clamped to 1..=N
        pub current_period: u32,
        pub current: PeriodOutcome,
        pub best: BestPeriod,
        pub finished: bool,
        pub remaining_periods: u32,
    }
}

pub mod reminder {
    use chrono::NaiveDate;

    use crate::domain::models::ReminderTime;

    /// One pool that should be nudged today
    #[derive(Debug, Clone, PartialEq)]
    pub struct ReminderNotice {
        pub pool_id: u64,
        pub pool_name: String,
        pub reminder: ReminderTime,
        /// First period without a recorded bid, `None` when every period has one
        pub next_period: Option<u32>,
        pub next_period_date: Option<NaiveDate>,
    }

    #[derive(Debug, Clone)]
    pub struct MonthlyReport {
        pub generated_on: NaiveDate,
        /// Destination configured in the global settings
        pub target: Option<String>,
        pub open_pools: usize,
        pub text: String,
    }

    /// What one scheduler tick delivered
    #[derive(Debug, Clone, Default, PartialEq, Eq)]
    pub struct DispatchSummary {
        pub reminders_sent: usize,
        pub monthly_report_sent: bool,
    }
}

pub mod config {
    /// Replaces the report settings wholesale; `None` clears the target
    #[derive(Debug, Clone)]
    pub struct UpdateReportSettingsCommand {
        pub report_target: Option<String>,
        pub report_hour: u32,
    }
}
