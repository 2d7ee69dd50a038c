//! Process configuration read from the environment.
//!
//! | Variable | Default |
//! |---|---|
//! | `HUI_DATA_DIR` | `./hui_data` |
//! | `HUI_BIND_ADDR` | `127.0.0.1:3000` |
//! | `HUI_REMINDER_TICK_SECS` | `60` |

use anyhow::{bail, Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DATA_DIR: &str = "./hui_data";
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
const DEFAULT_TICK_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub data_dir: PathBuf,
    pub bind_addr: SocketAddr,
    /// How often the scheduler looks for due reminders and reports
    pub reminder_tick: Duration,
}

impl BackendConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unset or blank keys take the default
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|value| value.trim().to_string()).filter(|value| !value.is_empty());

        let data_dir = PathBuf::from(get("HUI_DATA_DIR").unwrap_or_else(|| DEFAULT_DATA_DIR.to_string()));

        let bind_addr = get("HUI_BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse::<SocketAddr>()
            .context("HUI_BIND_ADDR must be host:port")?;

        let tick_secs = match get("HUI_REMINDER_TICK_SECS") {
            Some(value) => value
                .parse::<u64>()
                .context("HUI_REMINDER_TICK_SECS must be a whole number of seconds")?,
            None => DEFAULT_TICK_SECS,
        };
        if tick_secs == 0 {
            bail!("HUI_REMINDER_TICK_SECS must be at least 1");
        }

        Ok(Self {
            data_dir,
            bind_addr,
            reminder_tick: Duration::from_secs(tick_secs),
        })
    }
}
