//! Domain model for a rotating savings pool ("dây hụi").

use chrono::{DateTime, Days, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::error::HuiError;
use crate::domain::money::percent_of;

/// Contribution cadence of a pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Weekly,
    Monthly,
}

impl PeriodKind {
    /// Length of one period in days. Monthly pools run on a fixed 30-day cycle.
    pub fn days(&self) -> u32 {
        match self {
            PeriodKind::Weekly => 7,
            PeriodKind::Monthly => 30,
        }
    }

    pub fn parse(input: &str) -> Result<Self, HuiError> {
        match input.trim().to_lowercase().as_str() {
            "tuan" | "tuần" | "week" | "weekly" | "w" => Ok(PeriodKind::Weekly),
            "thang" | "tháng" | "month" | "monthly" => Ok(PeriodKind::Monthly),
            _ => Err(HuiError::parse(input, "period must be weekly (tuan) or monthly (thang)")),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodKind::Weekly => "weekly",
            PeriodKind::Monthly => "monthly",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PoolStatus {
    Open,
    Closed,
}

/// Daily reminder time-of-day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReminderTime {
    pub hour: u32,
    pub minute: u32,
}

impl ReminderTime {
    pub fn new(hour: u32, minute: u32) -> Result<Self, HuiError> {
        if hour > 23 || minute > 59 {
            return Err(HuiError::InvalidConfig {
                reason: format!("reminder time {:02}:{:02} must be within 00:00..23:59", hour, minute),
            });
        }
        Ok(Self { hour, minute })
    }

    /// Parse `HH:MM`
    pub fn parse(input: &str) -> Result<Self, HuiError> {
        let (hour, minute) = input
            .trim()
            .split_once(':')
            .ok_or_else(|| HuiError::parse(input, "expected HH:MM"))?;
        let hour = hour
            .trim()
            .parse::<u32>()
            .map_err(|_| HuiError::parse(input, "hour is not a number"))?;
        let minute = minute
            .trim()
            .parse::<u32>()
            .map_err(|_| HuiError::parse(input, "minute is not a number"))?;
        Self::new(hour, minute)
    }
}

impl Default for ReminderTime {
    fn default() -> Self {
        Self { hour: 8, minute: 0 }
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

/// Largest pool accepted at creation
pub const MAX_LEG_COUNT: u32 = 1_000;

/// One rotating savings pool.
///
/// Everything except `status`, `reminder` and `last_reminded_on` is fixed at
/// creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pool {
    pub id: u64,
    pub name: String,
    pub period_kind: PeriodKind,
    /// Calendar date of period 1
    pub start_date: NaiveDate,
    /// Number of legs N, which is also the number of periods
    pub leg_count: u32,
    /// Face value M each leg contributes per period
    pub face_value: i64,
    /// Minimum bid, percent of M
    pub floor_rate: f64,
    /// Maximum bid, percent of M
    pub cap_rate: f64,
    /// Operator fee deducted from every payout, percent of M
    pub fee_rate: f64,
    pub status: PoolStatus,
    pub reminder: ReminderTime,
    pub last_reminded_on: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Pool {
    /// Check the configuration invariants:
    /// 1 <= N <= MAX_LEG_COUNT, M > 0, N·M fits in i64, the final period date
    /// exists, 0 <= floor <= cap <= 100, 0 <= fee <= 100.
    pub fn validate_config(&self) -> Result<(), HuiError> {
        if !(1..=MAX_LEG_COUNT).contains(&self.leg_count) {
            return Err(HuiError::InvalidConfig {
                reason: format!("leg count must be within 1..={}, got {}", MAX_LEG_COUNT, self.leg_count),
            });
        }
        if self.face_value <= 0 {
            return Err(HuiError::InvalidConfig {
                reason: format!("face value must be positive, got {}", self.face_value),
            });
        }
        // Every payout and paid-in total is bounded by N·M
        if self.face_value.checked_mul(i64::from(self.leg_count)).is_none() {
            return Err(HuiError::InvalidConfig {
                reason: format!(
                    "face value {} is too large for {} legs",
                    self.face_value, self.leg_count
                ),
            });
        }
        if self.checked_period_date(self.leg_count).is_none() {
            return Err(HuiError::InvalidConfig {
                reason: format!(
                    "final period of a pool starting {} falls outside the calendar",
                    self.start_date
                ),
            });
        }
        let rates_ok = 0.0 <= self.floor_rate
            && self.floor_rate <= self.cap_rate
            && self.cap_rate <= 100.0
            && (0.0..=100.0).contains(&self.fee_rate);
        if !rates_ok {
            return Err(HuiError::InvalidRates {
                floor_rate: self.floor_rate,
                cap_rate: self.cap_rate,
                fee_rate: self.fee_rate,
            });
        }
        Ok(())
    }

    pub fn period_days(&self) -> u32 {
        self.period_kind.days()
    }

    /// Date implied for period `k`: start + (k-1) × period length.
    ///
    /// Saturates at `NaiveDate::MAX` for pools that never passed
    /// `validate_config`.
    pub fn period_date(&self, period: u32) -> NaiveDate {
        self.checked_period_date(period).unwrap_or(NaiveDate::MAX)
    }

    fn checked_period_date(&self, period: u32) -> Option<NaiveDate> {
        let offset = u64::from(period.saturating_sub(1)) * u64::from(self.period_days());
        self.start_date.checked_add_days(Days::new(offset))
    }

    pub fn final_period_date(&self) -> NaiveDate {
        self.period_date(self.leg_count)
    }

    pub fn contains_period(&self, period: u32) -> bool {
        (1..=self.leg_count).contains(&period)
    }

    /// Fixed fee D deducted from every payout
    pub fn fee_amount(&self) -> i64 {
        percent_of(self.face_value, self.fee_rate)
    }

    /// Lowest acceptable bid
    pub fn floor_amount(&self) -> i64 {
        percent_of(self.face_value, self.floor_rate)
    }

    /// Highest acceptable bid
    pub fn cap_amount(&self) -> i64 {
        percent_of(self.face_value, self.cap_rate)
    }

    pub fn is_closed(&self) -> bool {
        self.status == PoolStatus::Closed
    }
}
