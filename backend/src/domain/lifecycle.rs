//! Pool lifecycle.
//!
//! A pool is finished once it has been closed explicitly or once today has
//! reached the date of its final period. Closing is one-way.

use chrono::NaiveDate;

use crate::domain::models::{Pool, PoolStatus};

pub fn is_finished(pool: &Pool, today: NaiveDate) -> bool {
    pool.is_closed() || today >= pool.final_period_date()
}

/// Move the pool to CLOSED. Returns false when it was already closed.
pub fn close(pool: &mut Pool) -> bool {
    if pool.is_closed() {
        return false;
    }
    pool.status = PoolStatus::Closed;
    true
}

/// Number of periods left to run as of `today`, counting today's period
pub fn remaining_periods(pool: &Pool, today: NaiveDate) -> u32 {
    if is_finished(pool, today) {
        return 0;
    }
    if today < pool.start_date {
        return pool.leg_count;
    }
    let elapsed_days = (today - pool.start_date).num_days();
    let current = u32::try_from(elapsed_days / i64::from(pool.period_days())).unwrap_or(u32::MAX);
    pool.leg_count.saturating_sub(current)
}
