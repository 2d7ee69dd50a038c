//! Payout engine.
//!
//! For a pool of N legs with face value M and fixed fee D, a leg winning
//! period k with bid T_k receives
//!
//! ```text
//! Payout(k) = (k-1)·M + (N-k)·(M - T_k) - D
//! ```
//!
//! having paid in `Paid(k) = Σ_{j<k} (M - T_j)` beforehand. Unrecorded bids
//! count as 0. Profit is `Payout - Paid` and ROI is profit over `Paid`, or over
//! M when nothing has been paid yet.
//!
//! Nothing here is cached. Every figure is recomputed from the bid snapshot the
//! caller hands in.

use crate::domain::error::HuiError;
use crate::domain::models::{BidMap, Pool};

/// Figures for a leg that wins at one specific period
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodOutcome {
    pub period: u32,
    pub payout: i64,
    /// Contributions made over periods 1..k-1
    pub paid: i64,
    pub profit: i64,
    /// Profit divided by the contribution base, as a ratio
    pub roi: f64,
}

/// Read-only view over one pool and a snapshot of its bids
#[derive(Debug, Clone, Copy)]
pub struct PayoutEngine<'a> {
    pool: &'a Pool,
    bids: &'a BidMap,
}

impl<'a> PayoutEngine<'a> {
    pub fn new(pool: &'a Pool, bids: &'a BidMap) -> Self {
        Self { pool, bids }
    }

    pub fn pool(&self) -> &'a Pool {
        self.pool
    }

    /// Fixed fee D, independent of period and bid
    pub fn fee(&self) -> i64 {
        self.pool.fee_amount()
    }

    fn bid_at(&self, period: u32) -> i64 {
        self.bids.get(&period).copied().unwrap_or(0)
    }

    fn check_period(&self, period: u32) -> Result<(), HuiError> {
        if self.pool.contains_period(period) {
            Ok(())
        } else {
            Err(HuiError::PeriodOutOfRange {
                period,
                legs: self.pool.leg_count,
            })
        }
    }

    /// Amount the winner of `period` receives
    pub fn payout(&self, period: u32) -> Result<i64, HuiError> {
        self.check_period(period)?;
        Ok(self.payout_unchecked(period))
    }

    /// Cumulative contribution before `period` of a leg that wins at `period`
    pub fn paid_before(&self, period: u32) -> Result<i64, HuiError> {
        self.check_period(period)?;
        Ok(self.paid_unchecked(period))
    }

    pub fn outcome(&self, period: u32) -> Result<PeriodOutcome, HuiError> {
        self.check_period(period)?;
        Ok(self.outcome_unchecked(period))
    }

    /// Outcomes for every period 1..=N in order.
    ///
    /// Paid-in carries over from one period to the next, so a full pass is
    /// linear in N.
    pub fn outcomes(&self) -> impl Iterator<Item = PeriodOutcome> + '_ {
        let face = self.pool.face_value;
        (1..=self.pool.leg_count).scan(0_i64, move |paid, period| {
            let outcome = self.outcome_with_paid(period, *paid);
            *paid += face - self.bid_at(period);
            Some(outcome)
        })
    }

    fn payout_unchecked(&self, period: u32) -> i64 {
        let face = self.pool.face_value;
        let received_full = i64::from(period - 1) * face;
        let received_discounted = i64::from(self.pool.leg_count - period) * (face - self.bid_at(period));
        received_full + received_discounted - self.fee()
    }

    fn paid_unchecked(&self, period: u32) -> i64 {
        let face = self.pool.face_value;
        (1..period).map(|earlier| face - self.bid_at(earlier)).sum()
    }

    fn outcome_unchecked(&self, period: u32) -> PeriodOutcome {
        self.outcome_with_paid(period, self.paid_unchecked(period))
    }

    fn outcome_with_paid(&self, period: u32, paid: i64) -> PeriodOutcome {
        let payout = self.payout_unchecked(period);
        let profit = payout - paid;
        let base = if paid > 0 { paid } else { self.pool.face_value };
        let roi = if base != 0 { profit as f64 / base as f64 } else { 0.0 };

        PeriodOutcome {
            period,
            payout,
            paid,
            profit,
            roi,
        }
    }
}
