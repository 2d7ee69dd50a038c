//! Domain model for a period bid ("thăm").

use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Period index → bid amount T_k for one pool
pub type BidMap = BTreeMap<u32, i64>;

/// The winning bid recorded for one period of a pool.
///
/// At most one bid exists per (pool, period); a resubmission overwrites it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bid {
    pub pool_id: u64,
    pub period: u32,
    pub amount: i64,
    /// Date given when the bid was entered, if any
    pub date: Option<NaiveDate>,
}

/// Collapse a bid list into the period → amount map the engine reads
pub fn to_bid_map(bids: &[Bid]) -> BidMap {
    bids.iter().map(|bid| (bid.period, bid.amount)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_bid_map_keeps_last_amount_per_period() {
        let bids = vec![
            Bid { pool_id: 1, period: 2, amount: 1_000_000, date: None },
            Bid { pool_id: 1, period: 1, amount: 800_000, date: None },
            Bid { pool_id: 1, period: 2, amount: 1_200_000, date: None },
        ];
        let map = to_bid_map(&bids);
        assert_eq!(map.len(), 2);
        assert_eq!(map[&1], 800_000);
        assert_eq!(map[&2], 1_200_000);
    }
}
