//! Text rendering for pools, outcomes and summaries.
//!
//! Currency is grouped with commas, ROI is shown as a percentage with two
//! decimals and dates are shown day-first.

use crate::domain::commands::reminder::ReminderNotice;
use crate::domain::commands::report::PoolSummaryResult;
use crate::domain::dates::format_user_date;
use crate::domain::models::{Bid, Pool, PoolStatus};
use crate::domain::money::{format_roi, format_vnd, format_vnd_label};
use crate::domain::optimizer::{BestPeriod, OptimizeMetric};
use crate::domain::payout::PeriodOutcome;

pub fn format_rate(rate: f64) -> String {
    format!("{:.2}%", rate)
}

pub fn status_label(status: PoolStatus) -> &'static str {
    match status {
        PoolStatus::Open => "OPEN",
        PoolStatus::Closed => "CLOSED",
    }
}

pub fn metric_label(metric: OptimizeMetric) -> &'static str {
    match metric {
        OptimizeMetric::Roi => "ROI",
        OptimizeMetric::Profit => "profit",
    }
}

/// One line per pool for listings
pub fn pool_list_line(pool: &Pool) -> String {
    format!(
        "#{} · {} · {} · opens {} · {} legs · M {} · floor {} · cap {} · fee {} · reminder {} · {}",
        pool.id,
        pool.name,
        pool.period_kind.as_str(),
        format_user_date(pool.start_date),
        pool.leg_count,
        format_vnd_label(pool.face_value),
        format_rate(pool.floor_rate),
        format_rate(pool.cap_rate),
        format_rate(pool.fee_rate),
        pool.reminder,
        status_label(pool.status),
    )
}

/// `k1:800,000, k2:1,000,000`, or `(none)` for an empty log
pub fn bid_list(bids: &[Bid]) -> String {
    if bids.is_empty() {
        return "(none)".to_string();
    }
    bids.iter()
        .map(|bid| format!("k{}:{}", bid.period, format_vnd(bid.amount)))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn outcome_line(outcome: &PeriodOutcome) -> String {
    format!(
        "Payout {} · Paid {} · Profit {} · ROI {}",
        format_vnd(outcome.payout),
        format_vnd(outcome.paid),
        format_vnd(outcome.profit),
        format_roi(outcome.roi),
    )
}

pub fn best_period_line(best: &BestPeriod) -> String {
    format!(
        "Best ({}): period {} · date {} · {}",
        metric_label(best.metric),
        best.outcome.period,
        format_user_date(best.date),
        outcome_line(&best.outcome),
    )
}

/// Multi-line summary of one pool
pub fn summary_text(summary: &PoolSummaryResult) -> String {
    let pool = &summary.pool;
    let mut lines = vec![
        format!("Pool #{} · {} · {}", pool.id, pool.name, pool.period_kind.as_str()),
        format!(
            "• Opens {} · {} legs · face value {} per period",
            format_user_date(pool.start_date),
            pool.leg_count,
            format_vnd_label(pool.face_value),
        ),
        format!(
            "• Floor {} · Cap {} · Fee {} (of face value) · Reminder {}",
            format_rate(pool.floor_rate),
            format_rate(pool.cap_rate),
            format_rate(pool.fee_rate),
            pool.reminder,
        ),
        format!("• Bids: {}", bid_list(&summary.bids)),
        format!(
            "• Estimated current period {} · {}",
            summary.current_period,
            outcome_line(&summary.current),
        ),
        best_period_line(&summary.best),
    ];

    if pool.is_closed() {
        lines.push("Pool is closed.".to_string());
    } else if summary.finished {
        lines.push("Pool has reached its final period; close it to archive.".to_string());
    }

    lines.join("\n")
}

pub fn reminder_text(notice: &ReminderNotice) -> String {
    match (notice.next_period, notice.next_period_date) {
        (Some(period), Some(date)) => format!(
            "Reminder for pool #{} ({}): period {} on {} has no bid yet",
            notice.pool_id,
            notice.pool_name,
            period,
            format_user_date(date),
        ),
        _ => format!(
            "Reminder for pool #{} ({}): every period has a bid",
            notice.pool_id, notice.pool_name,
        ),
    }
}
