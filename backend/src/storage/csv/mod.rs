//! # CSV Storage Module
//!
//! Pools are YAML documents, bids are one CSV file per pool and global
//! settings are a single YAML file at the data root.
//!
//! ```csv
//! period,amount,date
//! 1,800000,2025-10-10
//! 2,1000000,
//! ```

pub mod bid_repository;
pub mod connection;
pub mod global_config_repository;
pub mod pool_repository;

#[cfg(test)]
pub mod test_utils;

pub use bid_repository::BidRepository;
pub use connection::CsvConnection;
pub use global_config_repository::{GlobalConfig, GlobalConfigRepository, GlobalConfigStorage};
pub use pool_repository::PoolRepository;
