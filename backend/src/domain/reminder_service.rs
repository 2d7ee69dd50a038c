//! Daily reminders and the monthly report.
//!
//! Reminders fire once per pool per day, at or after the pool's reminder time,
//! for pools that are still open and not past their final period. The monthly
//! report goes out on the 1st of the month at or after the configured hour.

use anyhow::Result;
use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use log::{debug, info, warn};
use std::sync::Arc;

use crate::domain::commands::config::UpdateReportSettingsCommand;
use crate::domain::commands::reminder::{DispatchSummary, MonthlyReport, ReminderNotice};
use crate::domain::error::HuiError;
use crate::domain::formatting::{reminder_text, summary_text};
use crate::domain::lifecycle;
use crate::domain::models::Pool;
use crate::domain::pool_service::PoolService;
use crate::domain::report_service::ReportService;
use crate::storage::csv::{BidRepository, CsvConnection, GlobalConfig, GlobalConfigRepository, GlobalConfigStorage};
use crate::storage::traits::BidStorage;

/// Delivery channel for reminders and reports
pub trait Notifier: Send + Sync {
    fn notify(&self, target: Option<&str>, message: &str) -> Result<()>;
}

/// Writes notifications to the log
#[derive(Debug, Clone, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&self, target: Option<&str>, message: &str) -> Result<()> {
        info!("[notify -> {}] {}", target.unwrap_or("unset"), message);
        Ok(())
    }
}

#[derive(Clone)]
pub struct ReminderService {
    global_config_repository: GlobalConfigRepository,
    bid_repository: BidRepository,
    pool_service: PoolService,
    report_service: ReportService,
}

impl ReminderService {
    pub fn new(csv_conn: Arc<CsvConnection>, pool_service: PoolService, report_service: ReportService) -> Self {
        Self {
            global_config_repository: GlobalConfigRepository::new(csv_conn.as_ref().clone()),
            bid_repository: BidRepository::new(csv_conn.as_ref().clone()),
            pool_service,
            report_service,
        }
    }

    pub fn report_settings(&self) -> Result<GlobalConfig> {
        self.global_config_repository.get_global_config()
    }

    pub fn update_report_settings(&self, command: UpdateReportSettingsCommand) -> Result<GlobalConfig> {
        info!(
            "Updating report settings: target={:?}, hour={}",
            command.report_target, command.report_hour
        );
        if command.report_hour > 23 {
            return Err(HuiError::InvalidConfig {
                reason: format!("report hour {} must be within 0..=23", command.report_hour),
            }
            .into());
        }

        let mut config = self.global_config_repository.get_global_config()?;
        config.report_target = command
            .report_target
            .map(|target| target.trim().to_string())
            .filter(|target| !target.is_empty());
        config.report_hour = command.report_hour;
        self.global_config_repository.update_global_config(&config)
    }

    /// Pools whose reminder is due at `now` and has not been sent today
    pub fn due_reminders(&self, now: NaiveDateTime) -> Result<Vec<ReminderNotice>> {
        let today = now.date();
        let mut notices = Vec::new();

        for pool in self.pool_service.list_pools()?.pools {
            if lifecycle::is_finished(&pool, today) || pool.last_reminded_on == Some(today) {
                continue;
            }
            let Some(reminder_at) = reminder_time_of_day(&pool) else {
                warn!(
                    "Pool {} has invalid reminder time {:02}:{:02}, skipping",
                    pool.id, pool.reminder.hour, pool.reminder.minute
                );
                continue;
            };
            if now.time() < reminder_at {
                continue;
            }
            notices.push(self.notice_for(&pool)?);
        }

        debug!("{} reminders due at {}", notices.len(), now);
        Ok(notices)
    }

    fn notice_for(&self, pool: &Pool) -> Result<ReminderNotice> {
        let bids = self.bid_repository.get_bid_map(pool.id)?;
        let next_period = (1..=pool.leg_count).find(|period| !bids.contains_key(period));

        Ok(ReminderNotice {
            pool_id: pool.id,
            pool_name: pool.name.clone(),
            reminder: pool.reminder,
            next_period,
            next_period_date: next_period.map(|period| pool.period_date(period)),
        })
    }

    pub fn mark_reminded(&self, pool_id: u64, today: NaiveDate) -> Result<()> {
        self.pool_service.record_reminder_sent(pool_id, today)
    }

    pub fn monthly_report_due(&self, now: NaiveDateTime) -> Result<bool> {
        let config = self.global_config_repository.get_global_config()?;
        let today = now.date();
        Ok(today.day() == 1
            && now.hour() >= config.report_hour
            && config.last_monthly_report_on != Some(today))
    }

    /// Summaries of every open pool as of `today`
    pub fn build_monthly_report(&self, today: NaiveDate) -> Result<MonthlyReport> {
        let config = self.global_config_repository.get_global_config()?;
        let open_pools: Vec<Pool> = self
            .pool_service
            .list_pools()?
            .pools
            .into_iter()
            .filter(|pool| !pool.is_closed())
            .collect();

        let mut sections = vec![format!("Monthly report {:02}-{}", today.month(), today.year())];
        if open_pools.is_empty() {
            sections.push("No open pools.".to_string());
        }
        for pool in &open_pools {
            let summary = self.report_service.summary(pool.id, today)?;
            sections.push(summary_text(&summary));
        }

        Ok(MonthlyReport {
            generated_on: today,
            target: config.report_target,
            open_pools: open_pools.len(),
            text: sections.join("\n\n"),
        })
    }

    pub fn mark_monthly_report_sent(&self, today: NaiveDate) -> Result<()> {
        let mut config = self.global_config_repository.get_global_config()?;
        config.last_monthly_report_on = Some(today);
        self.global_config_repository.update_global_config(&config)?;
        Ok(())
    }

    /// Send whatever is due at `now` and record it so it is not sent again.
    ///
    /// A failed delivery is logged and left unmarked so the next tick retries.
    pub fn dispatch_due(&self, now: NaiveDateTime, notifier: &dyn Notifier) -> Result<DispatchSummary> {
        let today = now.date();
        let target = self.global_config_repository.get_global_config()?.report_target;
        let mut summary = DispatchSummary::default();

        for notice in self.due_reminders(now)? {
            match notifier.notify(target.as_deref(), &reminder_text(&notice)) {
                Ok(()) => {
                    self.mark_reminded(notice.pool_id, today)?;
                    summary.reminders_sent += 1;
                }
                Err(e) => warn!("Failed to deliver reminder for pool {}: {}", notice.pool_id, e),
            }
        }

        if self.monthly_report_due(now)? {
            let report = self.build_monthly_report(today)?;
            match notifier.notify(report.target.as_deref(), &report.text) {
                Ok(()) => {
                    self.mark_monthly_report_sent(today)?;
                    summary.monthly_report_sent = true;
                    info!("Sent monthly report covering {} open pools", report.open_pools);
                }
                Err(e) => warn!("Failed to deliver monthly report: {}", e),
            }
        }

        Ok(summary)
    }
}

/// `None` when the stored time is not a valid time of day
fn reminder_time_of_day(pool: &Pool) -> Option<NaiveTime> {
    NaiveTime::from_hms_opt(pool.reminder.hour, pool.reminder.minute, 0)
}
