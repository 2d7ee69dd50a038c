//! Bid acceptance rules.

use crate::domain::error::HuiError;
use crate::domain::models::Pool;

/// Accept a bid of `amount` for `period` iff the period is within 1..=N and
/// the amount lies within the pool's floor/cap band (both ends inclusive).
///
/// Whether the period already has a bid does not matter: resubmission
/// overwrites.
pub fn validate_bid(pool: &Pool, period: u32, amount: i64) -> Result<(), HuiError> {
    if !pool.contains_period(period) {
        return Err(HuiError::PeriodOutOfRange {
            period,
            legs: pool.leg_count,
        });
    }

    let floor = pool.floor_amount();
    let cap = pool.cap_amount();
    if amount < floor || amount > cap {
        return Err(HuiError::BidOutOfRange {
            bid: amount,
            floor,
            cap,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::pool::test_support::sample_pool;

    #[test]
    fn test_band_boundaries() {
        let pool = sample_pool();
        assert!(validate_bid(&pool, 1, 800_000).is_ok());
        assert!(validate_bid(&pool, 1, 2_000_000).is_ok());
        assert_eq!(
            validate_bid(&pool, 1, 799_999),
            Err(HuiError::BidOutOfRange { bid: 799_999, floor: 800_000, cap: 2_000_000 })
        );
        assert_eq!(
            validate_bid(&pool, 1, 2_000_001),
            Err(HuiError::BidOutOfRange { bid: 2_000_001, floor: 800_000, cap: 2_000_000 })
        );
    }

    #[test]
    fn test_period_bounds() {
        let pool = sample_pool();
        assert!(validate_bid(&pool, 12, 1_000_000).is_ok());
        assert_eq!(
            validate_bid(&pool, 0, 1_000_000),
            Err(HuiError::PeriodOutOfRange { period: 0, legs: 12 })
        );
        assert_eq!(
            validate_bid(&pool, 13, 1_000_000),
            Err(HuiError::PeriodOutOfRange { period: 13, legs: 12 })
        );
    }

    #[test]
    fn test_period_is_checked_before_amount() {
        let pool = sample_pool();
        assert!(matches!(
            validate_bid(&pool, 20, 1),
            Err(HuiError::PeriodOutOfRange { .. })
        ));
    }

    #[test]
    fn test_zero_width_band() {
        let pool = crate::domain::models::Pool { floor_rate: 10.0, cap_rate: 10.0, ..sample_pool() };
        assert!(validate_bid(&pool, 3, 1_000_000).is_ok());
        assert!(validate_bid(&pool, 3, 1_000_001).is_err());
    }
}
