use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{info, warn};
use std::sync::Arc;

use crate::domain::commands::pool::{
    ClosePoolResult, CreatePoolCommand, CreatePoolResult, DeletePoolResult, ListPoolsResult,
    SetReminderCommand, SetReminderResult,
};
use crate::domain::dates::parse_any_date;
use crate::domain::error::HuiError;
use crate::domain::lifecycle;
use crate::domain::models::{PeriodKind, Pool, PoolStatus, ReminderTime};
use crate::domain::money::parse_money;
use crate::storage::csv::{BidRepository, CsvConnection, PoolRepository};
use crate::storage::traits::{BidStorage, PoolStorage};

/// Service for creating, looking up and retiring pools
#[derive(Clone)]
pub struct PoolService {
    pool_repository: PoolRepository,
    bid_repository: BidRepository,
}

impl PoolService {
    pub fn new(csv_conn: Arc<CsvConnection>) -> Self {
        let pool_repository = PoolRepository::new(csv_conn.as_ref().clone());
        let bid_repository = BidRepository::new(csv_conn.as_ref().clone());
        Self {
            pool_repository,
            bid_repository,
        }
    }

    /// Normalize the raw parameters, check the configuration invariants and
    /// store a new OPEN pool with the default 08:00 reminder.
    pub fn create_pool(&self, command: CreatePoolCommand) -> Result<CreatePoolResult> {
        info!(
            "Creating pool: name={}, period={}, start={}, legs={}, face_value={}",
            command.name, command.period_kind, command.start_date, command.leg_count, command.face_value
        );

        let name = command.name.trim();
        if name.is_empty() {
            return Err(HuiError::parse(&command.name, "pool name cannot be empty").into());
        }
        let period_kind = PeriodKind::parse(&command.period_kind)?;
        let start_date = parse_any_date(&command.start_date)?;
        let face_value = parse_money(&command.face_value)?;

        let mut pool = Pool {
            id: 0,
            name: name.to_string(),
            period_kind,
            start_date,
            leg_count: command.leg_count,
            face_value,
            floor_rate: command.floor_rate,
            cap_rate: command.cap_rate,
            fee_rate: command.fee_rate,
            status: PoolStatus::Open,
            reminder: ReminderTime::default(),
            last_reminded_on: None,
            created_at: Utc::now(),
        };
        pool.validate_config()?;

        pool.id = self.pool_repository.next_pool_id()?;
        self.pool_repository.store_pool(&pool)?;

        info!("Created pool #{} ({})", pool.id, pool.name);
        Ok(CreatePoolResult { pool })
    }

    /// Load a pool, failing with `PoolNotFound` when it does not exist
    pub fn get_pool(&self, pool_id: u64) -> Result<Pool> {
        match self.pool_repository.get_pool(pool_id)? {
            Some(pool) => Ok(pool),
            None => {
                warn!("Pool not found: {}", pool_id);
                Err(HuiError::PoolNotFound { pool_id }.into())
            }
        }
    }

    pub fn list_pools(&self) -> Result<ListPoolsResult> {
        let pools = self.pool_repository.list_pools()?;
        info!("Found {} pools", pools.len());
        Ok(ListPoolsResult { pools })
    }

    /// OPEN → CLOSED. Closing a closed pool is a no-op.
    pub fn close_pool(&self, pool_id: u64) -> Result<ClosePoolResult> {
        info!("Closing pool: {}", pool_id);

        let mut pool = self.get_pool(pool_id)?;
        let newly_closed = lifecycle::close(&mut pool);
        if newly_closed {
            self.pool_repository.update_pool(&pool)?;
            info!("Closed pool #{}", pool_id);
        } else {
            info!("Pool #{} was already closed", pool_id);
        }

        Ok(ClosePoolResult { pool, newly_closed })
    }

    /// Remove a pool and every bid recorded for it
    pub fn delete_pool(&self, pool_id: u64) -> Result<DeletePoolResult> {
        info!("Deleting pool: {}", pool_id);

        let pool = self.get_pool(pool_id)?;
        let deleted_bids = self.bid_repository.list_bids(pool_id)?.len();
        self.pool_repository.delete_pool(pool_id)?;

        info!("Deleted pool #{} ({}) with {} bids", pool.id, pool.name, deleted_bids);
        Ok(DeletePoolResult { pool_id, deleted_bids })
    }

    pub fn set_reminder(&self, command: SetReminderCommand) -> Result<SetReminderResult> {
        info!("Setting reminder for pool {}: {}", command.pool_id, command.time);

        let reminder = ReminderTime::parse(&command.time)?;
        let mut pool = self.get_pool(command.pool_id)?;
        pool.reminder = reminder;
        self.pool_repository.update_pool(&pool)?;

        Ok(SetReminderResult { pool })
    }

    /// Persist the date of the last reminder sent for a pool
    pub fn record_reminder_sent(&self, pool_id: u64, date: NaiveDate) -> Result<()> {
        let mut pool = self.get_pool(pool_id)?;
        pool.last_reminded_on = Some(date);
        self.pool_repository.update_pool(&pool)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::*;

    /// Weekly 12-leg pool of 10tr opening 10-10-2025, floor 8%, cap 20%, fee 5%
    pub fn create_command() -> CreatePoolCommand {
        CreatePoolCommand {
            name: "Hui10tr".to_string(),
            period_kind: "tuan".to_string(),
            start_date: "10-10-2025".to_string(),
            leg_count: 12,
            face_value: "10tr".to_string(),
            floor_rate: 8.0,
            cap_rate: 20.0,
            fee_rate: 5.0,
        }
    }
}
