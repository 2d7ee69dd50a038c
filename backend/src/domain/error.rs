//! Domain error taxonomy.
//!
//! Every variant is a local validation failure raised before any state is
//! touched. Services wrap these in `anyhow::Error`; the REST layer recovers
//! them with `downcast_ref::<HuiError>()` to pick a status code.

/// Errors produced by normalization, validation and pool lookups.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum HuiError {
    /// Malformed user input (money, date, period kind, reminder time, form reply)
    #[error("Cannot understand '{input}': {reason}")]
    Parse { input: String, reason: String },

    /// Bid outside the pool's floor/cap band
    #[error("Bid {bid} must be within [{floor} .. {cap}]")]
    BidOutOfRange { bid: i64, floor: i64, cap: i64 },

    /// Period index outside 1..=legs
    #[error("Period {period} is outside 1..={legs}")]
    PeriodOutOfRange { period: u32, legs: u32 },

    /// Floor/cap/fee configuration outside [0, 100] or floor > cap
    #[error("Invalid rates: floor {floor_rate}%, cap {cap_rate}%, fee {fee_rate}% (need 0 <= floor <= cap <= 100 and 0 <= fee <= 100)")]
    InvalidRates {
        floor_rate: f64,
        cap_rate: f64,
        fee_rate: f64,
    },

    /// Other configuration bound violated (leg count, face value, reminder time)
    #[error("Invalid configuration: {reason}")]
    InvalidConfig { reason: String },

    #[error("Pool {pool_id} not found")]
    PoolNotFound { pool_id: u64 },

    #[error("Pool {pool_id} is closed and no longer accepts bids")]
    PoolClosed { pool_id: u64 },
}

impl HuiError {
    pub fn parse(input: impl Into<String>, reason: impl Into<String>) -> Self {
        HuiError::Parse {
            input: input.into(),
            reason: reason.into(),
        }
    }

    /// Stable machine-readable name, used in API error bodies
    pub fn kind(&self) -> &'static str {
        match self {
            HuiError::Parse { .. } => "parse_error",
            HuiError::BidOutOfRange { .. }
            | HuiError::PeriodOutOfRange { .. }
            | HuiError::InvalidRates { .. }
            | HuiError::InvalidConfig { .. } => "range_error",
            HuiError::PoolNotFound { .. } => "not_found",
            HuiError::PoolClosed { .. } => "pool_closed",
        }
    }
}
