//! Best-period search.
//!
//! A linear scan over 1..=N. The first period seeds the running best and a
//! later period only replaces it when strictly better, so ties resolve to the
//! earliest period.

use chrono::NaiveDate;

use crate::domain::error::HuiError;
use crate::domain::payout::{PayoutEngine, PeriodOutcome};

/// Objective to maximize
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OptimizeMetric {
    #[default]
    Roi,
    Profit,
}

impl OptimizeMetric {
    pub fn parse(input: &str) -> Result<Self, HuiError> {
        match input.trim().to_lowercase().as_str() {
            "roi" => Ok(OptimizeMetric::Roi),
            "profit" | "lai" | "lãi" => Ok(OptimizeMetric::Profit),
            _ => Err(HuiError::parse(input, "metric must be roi or profit")),
        }
    }

    fn value_of(&self, outcome: &PeriodOutcome) -> f64 {
        match self {
            OptimizeMetric::Roi => outcome.roi,
            OptimizeMetric::Profit => outcome.profit as f64,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestPeriod {
    pub metric: OptimizeMetric,
    pub outcome: PeriodOutcome,
    /// Calendar date of the chosen period
    pub date: NaiveDate,
}

pub fn best_period(engine: &PayoutEngine<'_>, metric: OptimizeMetric) -> Result<BestPeriod, HuiError> {
    let mut outcomes = engine.outcomes();
    let mut best = outcomes.next().ok_or(HuiError::PeriodOutOfRange {
        period: 1,
        legs: engine.pool().leg_count,
    })?;
    for candidate in outcomes {
        if metric.value_of(&candidate) > metric.value_of(&best) {
            best = candidate;
        }
    }

    Ok(BestPeriod {
        metric,
        outcome: best,
        date: engine.pool().period_date(best.period),
    })
}
