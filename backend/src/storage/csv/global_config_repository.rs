//! # CSV Global Config Repository
//!
//! Process-wide settings in a single `global_config.yaml` at the root of the
//! data directory.
//!
//! ## YAML Format
//!
//! ```yaml
//! report_target: "-1001234567"
//! report_hour: 8
//! last_monthly_report_on: 2025-10-01
//! data_format_version: "1.0"
//! created_at: "2025-10-01T08:00:00+00:00"
//! updated_at: "2025-10-01T08:00:05+00:00"
//! ```
//!
//! The file is created with defaults on first read.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use super::connection::CsvConnection;

fn default_report_hour() -> u32 {
    8
}

/// Global configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalConfig {
    /// Where reminders and monthly reports are delivered (None until configured)
    #[serde(default)]
    pub report_target: Option<String>,
    /// Hour of day on the 1st of each month when the monthly report goes out
    #[serde(default = "default_report_hour")]
    pub report_hour: u32,
    #[serde(default)]
    pub last_monthly_report_on: Option<NaiveDate>,
    /// Data format version for future migrations
    pub data_format_version: String,
    pub created_at: String,
    pub updated_at: String,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        let now = Utc::now().to_rfc3339();
        Self {
            report_target: None,
            report_hour: default_report_hour(),
            last_monthly_report_on: None,
            data_format_version: "1.0".to_string(),
            created_at: now.clone(),
            updated_at: now,
        }
    }
}

/// Storage trait for global configuration operations
pub trait GlobalConfigStorage: Send + Sync {
    fn get_global_config(&self) -> Result<GlobalConfig>;

    /// Persist `config`, stamping `updated_at`
    fn update_global_config(&self, config: &GlobalConfig) -> Result<GlobalConfig>;
}

#[derive(Clone)]
pub struct GlobalConfigRepository {
    connection: CsvConnection,
}

impl GlobalConfigRepository {
    pub fn new(connection: CsvConnection) -> Self {
        Self { connection }
    }

    fn get_global_config_path(&self) -> PathBuf {
        self.connection.base_directory().join("global_config.yaml")
    }

    fn load_or_create_global_config(&self) -> Result<GlobalConfig> {
        let config_path = self.get_global_config_path();

        if config_path.exists() {
            let yaml_content = fs::read_to_string(&config_path)?;
            let config: GlobalConfig = serde_yaml::from_str(&yaml_content)?;
            debug!("Loaded global config from {:?}", config_path);
            Ok(config)
        } else {
            let config = GlobalConfig::default();
            self.save_global_config(&config)?;
            info!("Created default global config at {:?}", config_path);
            Ok(config)
        }
    }

    fn save_global_config(&self, config: &GlobalConfig) -> Result<()> {
        let yaml_content = serde_yaml::to_string(config)?;
        self.connection
            .write_atomically(&self.get_global_config_path(), yaml_content.as_bytes())
    }
}

impl GlobalConfigStorage for GlobalConfigRepository {
    fn get_global_config(&self) -> Result<GlobalConfig> {
        self.load_or_create_global_config()
    }

    fn update_global_config(&self, config: &GlobalConfig) -> Result<GlobalConfig> {
        let mut updated = config.clone();
        updated.updated_at = Utc::now().to_rfc3339();
        self.save_global_config(&updated)?;
        info!(
            "Updated global config: report_target={:?}, report_hour={}",
            updated.report_target, updated.report_hour
        );
        Ok(updated)
    }
}
