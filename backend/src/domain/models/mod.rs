pub mod bid;
pub mod pool;

pub use bid::{to_bid_map, Bid, BidMap};
pub use pool::{PeriodKind, Pool, PoolStatus, ReminderTime};
