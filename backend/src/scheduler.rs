//! Background loop that sends due reminders and the monthly report.

use chrono::Local;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use crate::domain::reminder_service::{Notifier, ReminderService};

/// Run `dispatch_due` every `tick` on the blocking pool until the task is aborted
pub fn spawn_reminder_loop(
    reminder_service: ReminderService,
    notifier: Arc<dyn Notifier>,
    tick: Duration,
) -> JoinHandle<()> {
    info!("Starting reminder loop, tick every {:?}", tick);

    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        loop {
            interval.tick().await;
            let service = reminder_service.clone();
            let notifier = notifier.clone();
            let now = Local::now().naive_local();

            let outcome = tokio::task::spawn_blocking(move || service.dispatch_due(now, notifier.as_ref())).await;
            match outcome {
                Ok(Ok(summary)) => {
                    if summary.reminders_sent > 0 || summary.monthly_report_sent {
                        info!(
                            "Dispatched {} reminders, monthly report sent: {}",
                            summary.reminders_sent, summary.monthly_report_sent
                        );
                    }
                }
                Ok(Err(e)) => error!("Reminder dispatch failed: {:?}", e),
                Err(e) => error!("Reminder task panicked: {:?}", e),
            }
        }
    })
}
