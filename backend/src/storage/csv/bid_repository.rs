//! # CSV Bid Repository
//!
//! Bids for a pool live in `pools/{pool_id}/bids.csv`, one row per period.
//! An upsert rewrites the whole file through a temp file so the log always
//! holds at most one row per period.

use anyhow::{bail, Context, Result};
use csv::{Reader, Writer};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;

use super::connection::CsvConnection;
use crate::domain::dates::{format_iso_date, parse_iso_date};
use crate::domain::models::Bid;
use crate::storage::traits::BidStorage;

/// CSV row for one period's bid
#[derive(Debug, Clone, Serialize, Deserialize)]
struct BidRecord {
    period: u32,
    amount: i64,
    /// Canonical `YYYY-MM-DD`, empty when none was given
    date: Option<String>,
}

impl From<&Bid> for BidRecord {
    fn from(bid: &Bid) -> Self {
        BidRecord {
            period: bid.period,
            amount: bid.amount,
            date: bid.date.map(format_iso_date),
        }
    }
}

impl BidRecord {
    fn into_domain(self, pool_id: u64) -> Result<Bid> {
        let date = match self.date.as_deref().map(str::trim) {
            Some(text) if !text.is_empty() => Some(
                parse_iso_date(text)
                    .with_context(|| format!("Bad date in bid for period {}", self.period))?,
            ),
            _ => None,
        };
        Ok(Bid {
            pool_id,
            period: self.period,
            amount: self.amount,
            date,
        })
    }
}

#[derive(Clone)]
pub struct BidRepository {
    connection: CsvConnection,
}

impl BidRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn read_records(&self, pool_id: u64) -> Result<Vec<BidRecord>> {
        let path = self.connection.bids_file_path(pool_id);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&path)?;
        let mut reader = Reader::from_reader(BufReader::new(file));
        let mut records = Vec::new();
        for row in reader.deserialize() {
            let record: BidRecord =
                row.with_context(|| format!("Failed to read bid row from {:?}", path))?;
            records.push(record);
        }
        Ok(records)
    }

    fn write_records(&self, pool_id: u64, records: &[BidRecord]) -> Result<()> {
        let mut writer = Writer::from_writer(Vec::new());
        for record in records {
            writer.serialize(record)?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| anyhow::anyhow!("Failed to flush bid rows: {}", e))?;

        self.connection
            .write_atomically(&self.connection.bids_file_path(pool_id), &bytes)
    }
}

impl BidStorage for BidRepository {
    fn upsert_bid(&self, bid: &Bid) -> Result<Option<Bid>> {
        if !self.connection.pool_directory(bid.pool_id).exists() {
            bail!("Cannot store bid: pool {} has no data directory", bid.pool_id);
        }

        let mut records = self.read_records(bid.pool_id)?;
        let replaced = match records.iter().position(|r| r.period == bid.period) {
            Some(index) => {
                let previous = std::mem::replace(&mut records[index], BidRecord::from(bid));
                Some(previous.into_domain(bid.pool_id)?)
            }
            None => {
                records.push(BidRecord::from(bid));
                None
            }
        };
        records.sort_by_key(|r| r.period);
        self.write_records(bid.pool_id, &records)?;

        if replaced.is_some() {
            info!("Overwrote bid for pool {} period {}: {}", bid.pool_id, bid.period, bid.amount);
        } else {
            info!("Stored bid for pool {} period {}: {}", bid.pool_id, bid.period, bid.amount);
        }
        Ok(replaced)
    }

    fn list_bids(&self, pool_id: u64) -> Result<Vec<Bid>> {
        let mut bids = self
            .read_records(pool_id)?
            .into_iter()
            .map(|record| record.into_domain(pool_id))
            .collect::<Result<Vec<_>>>()?;
        bids.sort_by_key(|bid| bid.period);
        debug!("Loaded {} bids for pool {}", bids.len(), pool_id);
        Ok(bids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::pool::test_support::sample_pool;
    use crate::storage::csv::pool_repository::PoolRepository;
    use crate::storage::csv::test_utils::TestEnvironment;
    use crate::storage::traits::PoolStorage;
    use chrono::NaiveDate;
    use std::fs;

    fn setup() -> Result<(TestEnvironment, BidRepository)> {
        let env = TestEnvironment::new()?;
        PoolRepository::new(env.connection.clone()).store_pool(&sample_pool())?;
        let repo = BidRepository::new(env.connection.clone());
        Ok((env, repo))
    }

    fn bid(period: u32, amount: i64) -> Bid {
        Bid { pool_id: 1, period, amount, date: None }
    }

    #[test]
    fn test_list_bids_empty_without_file() -> Result<()> {
        let (_env, repo) = setup()?;
        assert!(repo.list_bids(1)?.is_empty());
        assert!(repo.get_bid_map(1)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_bids_are_kept_in_period_order() -> Result<()> {
        let (_env, repo) = setup()?;
        repo.upsert_bid(&bid(3, 1_200_000))?;
        repo.upsert_bid(&bid(1, 800_000))?;
        repo.upsert_bid(&bid(2, 1_000_000))?;

        let periods: Vec<u32> = repo.list_bids(1)?.iter().map(|b| b.period).collect();
        assert_eq!(periods, vec![1, 2, 3]);
        Ok(())
    }

    #[test]
    fn test_resubmission_overwrites_instead_of_duplicating() -> Result<()> {
        let (env, repo) = setup()?;
        assert!(repo.upsert_bid(&bid(1, 800_000))?.is_none());

        let dated = Bid { date: NaiveDate::from_ymd_opt(2025, 10, 10), ..bid(1, 1_500_000) };
        let replaced = repo.upsert_bid(&dated)?;
        assert_eq!(replaced, Some(bid(1, 800_000)));

        let bids = repo.list_bids(1)?;
        assert_eq!(bids, vec![dated]);
        assert_eq!(repo.get_bid_map(1)?.get(&1), Some(&1_500_000));

        let csv = fs::read_to_string(env.connection.bids_file_path(1))?;
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.starts_with("period,amount,date"));
        Ok(())
    }

    #[test]
    fn test_dates_round_trip_through_csv() -> Result<()> {
        let (_env, repo) = setup()?;
        let dated = Bid { date: NaiveDate::from_ymd_opt(2024, 2, 29), ..bid(2, 900_000) };
        repo.upsert_bid(&dated)?;
        repo.upsert_bid(&bid(1, 800_000))?;

        let bids = repo.list_bids(1)?;
        assert_eq!(bids[0].date, None);
        assert_eq!(bids[1].date, NaiveDate::from_ymd_opt(2024, 2, 29));
        Ok(())
    }

    #[test]
    fn test_upsert_requires_pool_directory() -> Result<()> {
        let env = TestEnvironment::new()?;
        let repo = BidRepository::new(env.connection.clone());
        assert!(repo.upsert_bid(&bid(1, 800_000)).is_err());
        Ok(())
    }

    #[test]
    fn test_deleting_pool_removes_bids() -> Result<()> {
        let (env, repo) = setup()?;
        repo.upsert_bid(&bid(1, 800_000))?;
        PoolRepository::new(env.connection.clone()).delete_pool(1)?;
        assert!(repo.list_bids(1)?.is_empty());
        Ok(())
    }
}
