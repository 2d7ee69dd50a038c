//! # Storage Traits
//!
//! Storage abstractions the domain services depend on.

use anyhow::Result;

use crate::domain::models::{to_bid_map, Bid, BidMap, Pool};

/// Pool configuration records
pub trait PoolStorage: Send + Sync {
    /// Id to assign to the next created pool. Ids are never reused.
    fn next_pool_id(&self) -> Result<u64>;

    /// Store a new pool; fails if the id is taken
    fn store_pool(&self, pool: &Pool) -> Result<()>;

    fn get_pool(&self, pool_id: u64) -> Result<Option<Pool>>;

    /// All pools, most recent (highest id) first
    fn list_pools(&self) -> Result<Vec<Pool>>;

    /// Overwrite an existing pool; fails if it does not exist
    fn update_pool(&self, pool: &Pool) -> Result<()>;

    /// Delete a pool together with its bids.
    /// Returns false when no such pool existed.
    fn delete_pool(&self, pool_id: u64) -> Result<bool>;
}

/// Per-period bid log, keyed by (pool id, period)
pub trait BidStorage: Send + Sync {
    /// Insert or overwrite the bid for `bid.period`, returning the bid it replaced
    fn upsert_bid(&self, bid: &Bid) -> Result<Option<Bid>>;

    /// Bids of one pool in ascending period order
    fn list_bids(&self, pool_id: u64) -> Result<Vec<Bid>>;

    fn get_bid_map(&self, pool_id: u64) -> Result<BidMap> {
        Ok(to_bid_map(&self.list_bids(pool_id)?))
    }
}
