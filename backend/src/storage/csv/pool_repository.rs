//! # CSV Pool Repository
//!
//! One YAML document per pool at `pools/{pool_id}/pool.yaml`. Deleting a pool
//! removes its whole directory, bids included.
//!
//! ## YAML Format
//!
//! ```yaml
//! id: 1
//! name: Hui10tr
//! period_kind: weekly
//! start_date: 2025-10-10
//! leg_count: 12
//! face_value: 10000000
//! floor_rate: 8.0
//! cap_rate: 20.0
//! fee_rate: 5.0
//! status: OPEN
//! reminder:
//!   hour: 8
//!   minute: 0
//! last_reminded_on: null
//! created_at: 2025-10-01T09:00:00Z
//! ```
//!
//! Issued ids are tracked in `pools/last_id` so a deleted pool's id is never
//! handed out again.

use anyhow::{bail, Context, Result};
use log::{debug, info, warn};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;
use crate::domain::models::Pool;
use crate::storage::traits::PoolStorage;

#[derive(Clone)]
pub struct PoolRepository {
    connection: CsvConnection,
}

impl PoolRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn last_id_path(&self) -> PathBuf {
        self.connection.pools_directory().join("last_id")
    }

    fn read_last_id(&self) -> Result<u64> {
        let path = self.last_id_path();
        if !path.exists() {
            return Ok(0);
        }
        let content = fs::read_to_string(&path)?;
        content
            .trim()
            .parse::<u64>()
            .with_context(|| format!("Corrupt pool id counter at {:?}", path))
    }

    fn record_issued_id(&self, pool_id: u64) -> Result<()> {
        if pool_id > self.read_last_id()? {
            self.connection
                .write_atomically(&self.last_id_path(), pool_id.to_string().as_bytes())?;
        }
        Ok(())
    }

    /// Ids of every pool directory on disk
    fn existing_ids(&self) -> Result<Vec<u64>> {
        let pools_dir = self.connection.pools_directory();
        if !pools_dir.exists() {
            return Ok(Vec::new());
        }

        let mut ids = Vec::new();
        for entry in fs::read_dir(&pools_dir)? {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().to_str().and_then(|name| name.parse::<u64>().ok()) {
                Some(id) => ids.push(id),
                None => debug!("Skipping non-pool directory {:?}", entry.path()),
            }
        }
        Ok(ids)
    }

    fn load_pool(&self, pool_id: u64) -> Result<Option<Pool>> {
        let path = self.connection.pool_file_path(pool_id);
        if !path.exists() {
            return Ok(None);
        }
        let yaml_content = fs::read_to_string(&path)?;
        let pool: Pool = serde_yaml::from_str(&yaml_content)
            .with_context(|| format!("Failed to parse pool file {:?}", path))?;
        Ok(Some(pool))
    }

    fn save_pool(&self, pool: &Pool) -> Result<()> {
        let yaml_content = serde_yaml::to_string(pool)?;
        self.connection
            .write_atomically(&self.connection.pool_file_path(pool.id), yaml_content.as_bytes())
    }
}

impl PoolStorage for PoolRepository {
    fn next_pool_id(&self) -> Result<u64> {
        let highest_on_disk = self.existing_ids()?.into_iter().max().unwrap_or(0);
        Ok(highest_on_disk.max(self.read_last_id()?) + 1)
    }

    fn store_pool(&self, pool: &Pool) -> Result<()> {
        if self.connection.pool_file_path(pool.id).exists() {
            bail!("Pool {} already exists", pool.id);
        }
        self.save_pool(pool)?;
        self.record_issued_id(pool.id)?;
        info!("Stored pool {} ({})", pool.id, pool.name);
        Ok(())
    }

    fn get_pool(&self, pool_id: u64) -> Result<Option<Pool>> {
        self.load_pool(pool_id)
    }

    fn list_pools(&self) -> Result<Vec<Pool>> {
        let mut pools = Vec::new();
        for pool_id in self.existing_ids()? {
            match self.load_pool(pool_id)? {
                Some(pool) => pools.push(pool),
                None => warn!("Pool directory {} has no pool.yaml, skipping", pool_id),
            }
        }
        pools.sort_by(|a, b| b.id.cmp(&a.id));
        debug!("Listed {} pools", pools.len());
        Ok(pools)
    }

    fn update_pool(&self, pool: &Pool) -> Result<()> {
        if !self.connection.pool_file_path(pool.id).exists() {
            bail!("Cannot update pool {}: not found", pool.id);
        }
        self.save_pool(pool)?;
        debug!("Updated pool {}", pool.id);
        Ok(())
    }

    fn delete_pool(&self, pool_id: u64) -> Result<bool> {
        let pool_dir = self.connection.pool_directory(pool_id);
        if !pool_dir.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&pool_dir)?;
        info!("Deleted pool {} and its bids", pool_id);
        Ok(true)
    }
}
