use chrono::NaiveDate;
use shared::{
    BestPeriodResponse, OptimizeMetric, PeriodOutcome, PeriodOutcomeResponse, PoolSummaryResponse,
};

use crate::domain::commands::report::{BestPeriodResult, PeriodOutcomeResult, PoolSummaryResult};
use crate::domain::dates::format_iso_date;
use crate::domain::formatting::{best_period_line, outcome_line, summary_text};
use crate::domain::money::format_roi;
use crate::domain::optimizer::OptimizeMetric as DomainOptimizeMetric;
use crate::domain::payout::PeriodOutcome as DomainPeriodOutcome;
use crate::io::rest::mappers::bid_mapper::BidMapper;
use crate::io::rest::mappers::pool_mapper::PoolMapper;

pub struct ReportMapper;

impl ReportMapper {
    pub fn metric_to_dto(metric: DomainOptimizeMetric) -> OptimizeMetric {
        match metric {
            DomainOptimizeMetric::Roi => OptimizeMetric::Roi,
            DomainOptimizeMetric::Profit => OptimizeMetric::Profit,
        }
    }

    pub fn outcome_to_dto(outcome: DomainPeriodOutcome, date: NaiveDate) -> PeriodOutcome {
        PeriodOutcome {
            period: outcome.period,
            date: format_iso_date(date),
            payout: outcome.payout,
            paid: outcome.paid,
            profit: outcome.profit,
            roi: outcome.roi,
            roi_display: format_roi(outcome.roi),
            display: outcome_line(&outcome),
        }
    }

    pub fn to_outcome_response(result: PeriodOutcomeResult) -> PeriodOutcomeResponse {
        PeriodOutcomeResponse {
            pool_id: result.pool.id,
            bid: result.bid,
            outcome: Self::outcome_to_dto(result.outcome, result.date),
        }
    }

    pub fn to_best_response(result: BestPeriodResult) -> BestPeriodResponse {
        BestPeriodResponse {
            pool_id: result.pool.id,
            metric: Self::metric_to_dto(result.best.metric),
            display: best_period_line(&result.best),
            best: Self::outcome_to_dto(result.best.outcome, result.best.date),
        }
    }

    pub fn to_summary_response(result: PoolSummaryResult) -> PoolSummaryResponse {
        let text = summary_text(&result);
        let current_date = result.pool.period_date(result.current_period);
        PoolSummaryResponse {
            current: Self::outcome_to_dto(result.current, current_date),
            best: Self::outcome_to_dto(result.best.outcome, result.best.date),
            bids: BidMapper::to_dto_list(result.bids),
            pool: PoolMapper::to_dto(result.pool),
            current_period: result.current_period,
            finished: result.finished,
            remaining_periods: result.remaining_periods,
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_to_dto_formats_roi() {
        let outcome = DomainPeriodOutcome {
            period: 3,
            payout: 90_000_000,
            paid: 18_000_000,
            profit: 72_000_000,
            roi: 4.0,
        };
        let dto = ReportMapper::outcome_to_dto(outcome, NaiveDate::from_ymd_opt(2025, 10, 24).unwrap());
        assert_eq!(dto.date, "2025-10-24");
        assert_eq!(dto.roi_display, "400.00%");
        assert_eq!(dto.display, "Payout 90,000,000 · Paid 18,000,000 · Profit 72,000,000 · ROI 400.00%");
    }
}
