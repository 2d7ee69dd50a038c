use anyhow::Result;
use chrono::NaiveDate;
use log::info;
use std::sync::Arc;

use crate::domain::commands::report::{BestPeriodResult, PeriodOutcomeResult, PoolSummaryResult};
use crate::domain::lifecycle;
use crate::domain::models::to_bid_map;
use crate::domain::optimizer::{best_period, OptimizeMetric};
use crate::domain::payout::PayoutEngine;
use crate::domain::pool_service::PoolService;
use crate::storage::csv::{BidRepository, CsvConnection};
use crate::storage::traits::BidStorage;

/// Read-side figures: every call reloads the bid log and recomputes
#[derive(Clone)]
pub struct ReportService {
    bid_repository: BidRepository,
    pool_service: PoolService,
}

impl ReportService {
    pub fn new(csv_conn: Arc<CsvConnection>, pool_service: PoolService) -> Self {
        let bid_repository = BidRepository::new(csv_conn.as_ref().clone());
        Self {
            bid_repository,
            pool_service,
        }
    }

    pub fn period_outcome(&self, pool_id: u64, period: u32) -> Result<PeriodOutcomeResult> {
        info!("Computing outcome: pool={}, period={}", pool_id, period);

        let pool = self.pool_service.get_pool(pool_id)?;
        let bids = self.bid_repository.get_bid_map(pool_id)?;
        let outcome = PayoutEngine::new(&pool, &bids).outcome(period)?;

        Ok(PeriodOutcomeResult {
            date: pool.period_date(period),
            bid: bids.get(&period).copied(),
            pool,
            outcome,
        })
    }

    pub fn best_period(&self, pool_id: u64, metric: OptimizeMetric) -> Result<BestPeriodResult> {
        info!("Finding best period: pool={}, metric={:?}", pool_id, metric);

        let pool = self.pool_service.get_pool(pool_id)?;
        let bids = self.bid_repository.get_bid_map(pool_id)?;
        let best = best_period(&PayoutEngine::new(&pool, &bids), metric)?;

        info!("Best period for pool {} by {:?}: {}", pool_id, metric, best.outcome.period);
        Ok(BestPeriodResult { pool, best })
    }

    /// Snapshot of a pool as of `today`.
    ///
    /// The current period is estimated from how many bids are on record.
    pub fn summary(&self, pool_id: u64, today: NaiveDate) -> Result<PoolSummaryResult> {
        info!("Summarizing pool {} as of {}", pool_id, today);

        let pool = self.pool_service.get_pool(pool_id)?;
        let bids = self.bid_repository.list_bids(pool_id)?;
        let bid_map = to_bid_map(&bids);
        let engine = PayoutEngine::new(&pool, &bid_map);

        let recorded = u32::try_from(bids.len()).unwrap_or(u32::MAX);
        let current_period = recorded.saturating_add(1).clamp(1, pool.leg_count.max(1));
        let current = engine.outcome(current_period)?;
        let best = best_period(&engine, OptimizeMetric::Roi)?;

        Ok(PoolSummaryResult {
            finished: lifecycle::is_finished(&pool, today),
            remaining_periods: lifecycle::remaining_periods(&pool, today),
            pool,
            bids,
            current_period,
            current,
            best,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::bid_service::BidService;
    use crate::domain::commands::bid::SubmitBidCommand;
    use crate::domain::commands::pool::CreatePoolCommand;
    use crate::domain::error::HuiError;
    use crate::domain::pool_service::test_support::create_command;
    use crate::storage::csv::test_utils::TestEnvironment;

    struct Fixture {
        _env: TestEnvironment,
        pool_service: PoolService,
        bid_service: BidService,
        report_service: ReportService,
    }

    fn setup(create: CreatePoolCommand) -> Fixture {
        let env = TestEnvironment::new().unwrap();
        let pool_service = PoolService::new(env.shared_connection());
        let bid_service = BidService::new(env.shared_connection(), pool_service.clone());
        let report_service = ReportService::new(env.shared_connection(), pool_service.clone());
        pool_service.create_pool(create).unwrap();
        Fixture { _env: env, pool_service, bid_service, report_service }
    }

    fn submit(f: &Fixture, period: u32, amount: &str) {
        f.bid_service
            .submit_bid(SubmitBidCommand { pool_id: 1, period, amount: amount.to_string(), date: None })
            .unwrap();
    }

    fn no_fee() -> CreatePoolCommand {
        CreatePoolCommand { fee_rate: 0.0, ..create_command() }
    }

    #[test]
    fn test_period_outcome() {
        let f = setup(no_fee());
        submit(&f, 1, "800k");

        let result = f.report_service.period_outcome(1, 1).unwrap();
        assert_eq!(result.outcome.payout, 101_200_000);
        assert_eq!(result.outcome.paid, 0);
        assert_eq!(result.bid, Some(800_000));
        assert_eq!(result.date, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap());

        let err = f.report_service.period_outcome(1, 0).unwrap_err();
        assert!(matches!(err.downcast_ref::<HuiError>(), Some(HuiError::PeriodOutOfRange { .. })));
    }

    #[test]
    fn test_fee_lowers_every_payout() {
        let plain = setup(no_fee());
        let charged = setup(create_command());
        for f in [&plain, &charged] {
            submit(f, 1, "800k");
        }

        let without = plain.report_service.period_outcome(1, 1).unwrap().outcome.payout;
        let with = charged.report_service.period_outcome(1, 1).unwrap().outcome.payout;
        assert_eq!(without - with, 500_000);
    }

    #[test]
    fn test_outcome_reflects_latest_resubmission() {
        let f = setup(no_fee());
        submit(&f, 1, "800k");
        submit(&f, 1, "2tr");

        let outcome = f.report_service.period_outcome(1, 1).unwrap().outcome;
        assert_eq!(outcome.payout, 11 * 8_000_000);
    }

    #[test]
    fn test_best_period_carries_date() {
        let f = setup(no_fee());
        submit(&f, 1, "2tr");
        submit(&f, 2, "1.8tr");

        let result = f.report_service.best_period(1, OptimizeMetric::Profit).unwrap();
        let best = result.best;
        assert_eq!(best.metric, OptimizeMetric::Profit);
        assert_eq!(best.date, result.pool.period_date(best.outcome.period));
    }

    #[test]
    fn test_summary_estimates_current_period() {
        let f = setup(no_fee());
        let today = NaiveDate::from_ymd_opt(2025, 10, 20).unwrap();

        let empty = f.report_service.summary(1, today).unwrap();
        assert_eq!(empty.current_period, 1);
        assert!(!empty.finished);

        submit(&f, 1, "800k");
        submit(&f, 2, "1tr");
        let summary = f.report_service.summary(1, today).unwrap();
        assert_eq!(summary.current_period, 3);
        assert_eq!(summary.bids.len(), 2);
        assert_eq!(summary.current, f.report_service.period_outcome(1, 3).unwrap().outcome);
        assert_eq!(summary.best.metric, OptimizeMetric::Roi);
        assert_eq!(summary.remaining_periods, 11);
    }

    #[test]
    fn test_summary_current_period_is_clamped() {
        let f = setup(CreatePoolCommand { leg_count: 2, ..no_fee() });
        submit(&f, 1, "800k");
        submit(&f, 2, "800k");

        let summary = f.report_service.summary(1, NaiveDate::from_ymd_opt(2025, 10, 10).unwrap()).unwrap();
        assert_eq!(summary.current_period, 2);
    }

    #[test]
    fn test_summary_finished_flags() {
        let f = setup(CreatePoolCommand { leg_count: 4, ..no_fee() });
        let d0 = NaiveDate::from_ymd_opt(2025, 10, 10).unwrap();

        assert!(!f.report_service.summary(1, d0 + chrono::Duration::days(20)).unwrap().finished);
        assert!(f.report_service.summary(1, d0 + chrono::Duration::days(21)).unwrap().finished);

        f.pool_service.close_pool(1).unwrap();
        assert!(f.report_service.summary(1, d0).unwrap().finished);
    }
}
