//! # Storage Module
//!
//! File-backed persistence for pools, bids and global settings. Services talk
//! to the traits in [`traits`]; the CSV/YAML implementation lives in [`csv`].
//!
//! ```text
//! {data}/
//! ├── global_config.yaml
//! └── pools/
//!     ├── last_id
//!     └── {pool_id}/
//!         ├── pool.yaml
//!         └── bids.csv
//! ```

pub mod csv;
pub mod traits;

pub use csv::{BidRepository, CsvConnection, GlobalConfig, GlobalConfigRepository, GlobalConfigStorage, PoolRepository};
pub use traits::{BidStorage, PoolStorage};
