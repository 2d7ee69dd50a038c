use anyhow::Result;
use log::{info, warn};
use std::sync::Arc;

use crate::domain::bid_validation::validate_bid;
use crate::domain::commands::bid::{ListBidsResult, SubmitBidCommand, SubmitBidResult};
use crate::domain::dates::parse_any_date;
use crate::domain::error::HuiError;
use crate::domain::models::Bid;
use crate::domain::money::parse_money;
use crate::domain::pool_service::PoolService;
use crate::storage::csv::{BidRepository, CsvConnection};
use crate::storage::traits::BidStorage;

/// Records the winning bid of each period
#[derive(Clone)]
pub struct BidService {
    bid_repository: BidRepository,
    pool_service: PoolService,
}

impl BidService {
    pub fn new(csv_conn: Arc<CsvConnection>, pool_service: PoolService) -> Self {
        let bid_repository = BidRepository::new(csv_conn.as_ref().clone());
        Self {
            bid_repository,
            pool_service,
        }
    }

    /// Validate and upsert one bid.
    ///
    /// Nothing is written unless every check passes. Closed pools refuse new
    /// bids; pools merely past their final date still accept them.
    pub fn submit_bid(&self, command: SubmitBidCommand) -> Result<SubmitBidResult> {
        info!(
            "Submitting bid: pool={}, period={}, amount={}, date={:?}",
            command.pool_id, command.period, command.amount, command.date
        );

        let pool = self.pool_service.get_pool(command.pool_id)?;
        if pool.is_closed() {
            warn!("Rejected bid for closed pool {}", pool.id);
            return Err(HuiError::PoolClosed { pool_id: pool.id }.into());
        }

        let amount = parse_money(&command.amount)?;
        let date = match command.date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(parse_any_date(text)?),
            _ => None,
        };
        validate_bid(&pool, command.period, amount)?;
        let date = Some(date.unwrap_or_else(|| pool.period_date(command.period)));

        let bid = Bid {
            pool_id: pool.id,
            period: command.period,
            amount,
            date,
        };
        let replaced = self.bid_repository.upsert_bid(&bid)?;

        Ok(SubmitBidResult { bid, replaced })
    }

    pub fn list_bids(&self, pool_id: u64) -> Result<ListBidsResult> {
        let pool = self.pool_service.get_pool(pool_id)?;
        let bids = self.bid_repository.list_bids(pool_id)?;
        info!("Found {} bids for pool {}", bids.len(), pool_id);
        Ok(ListBidsResult { pool, bids })
    }
}
