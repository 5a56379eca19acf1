use crate::reminder::sweep_overdue_reminders::{SweepOverdueRemindersUseCase, SweepReport};
use crate::shared::usecase::execute;
use actix_web::rt::task::JoinHandle;
use actix_web::rt::time::{interval, sleep};
use remindly_infra::RemindlyContext;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use std::time::Duration;
use tracing::{error, info, warn};

const DAY_MILLIS: i64 = 24 * 60 * 60 * 1000;
const HOUR_MILLIS: i64 = 60 * 60 * 1000;

/// Millis from `now_ts` until the next time the clock shows `hour`:00 UTC.
/// Exactly at the hour the next sweep is a full day away.
pub fn millis_until_next_sweep(now_ts: i64, hour: u32) -> i64 {
    let target = i64::from(hour) * HOUR_MILLIS;
    let millis_into_day = now_ts.rem_euclid(DAY_MILLIS);
    let until = target - millis_into_day;
    if until > 0 {
        until
    } else {
        until + DAY_MILLIS
    }
}

#[derive(Debug, PartialEq)]
pub enum SweepRun {
    Completed(SweepReport),
    Failed,
    /// The previous sweep is still running
    SkippedStillRunning,
}

/// Runs the overdue reminders sweep, at most one at a time
#[derive(Clone)]
pub struct SweepDriver {
    ctx: RemindlyContext,
    running: Arc<AtomicBool>,
}

struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SweepDriver {
    pub fn new(ctx: RemindlyContext) -> Self {
        Self {
            ctx,
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Runs one sweep with the current time of the context
    pub async fn fire(&self) -> SweepRun {
        if self
            .running
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            warn!("Previous sweep of overdue reminders is still running, skipping this one");
            return SweepRun::SkippedStillRunning;
        }
        let _guard = RunningGuard(&self.running);

        let usecase = SweepOverdueRemindersUseCase {
            now: self.ctx.sys.get_datetime(),
        };
        match execute(usecase, &self.ctx).await {
            Ok(report) => SweepRun::Completed(report),
            Err(_) => SweepRun::Failed,
        }
    }

    /// Schedules the sweep to run every day at `sweep_hour_utc`
    pub fn start(self) -> SweepHandle {
        let handle = actix_web::rt::spawn(async move {
            let now = self.ctx.sys.get_timestamp_millis();
            let hour = self.ctx.config.sweep_hour_utc;
            let millis_to_first_run = millis_until_next_sweep(now, hour);
            info!(
                "Sweep of overdue reminders scheduled daily at {}:00 UTC, first run in {} ms",
                hour, millis_to_first_run
            );

            sleep(Duration::from_millis(millis_to_first_run as u64)).await;
            let mut daily_interval = interval(Duration::from_millis(DAY_MILLIS as u64));
            loop {
                daily_interval.tick().await;
                let driver = self.clone();
                actix_web::rt::spawn(async move {
                    if let SweepRun::Failed = driver.fire().await {
                        error!("Sweep of overdue reminders failed");
                    }
                });
            }
        });

        SweepHandle { handle }
    }
}

pub struct SweepHandle {
    handle: JoinHandle<()>,
}

impl SweepHandle {
    /// Stops scheduling new sweeps
    pub fn stop(self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration as ChronoDuration, TimeZone, Utc};
    use remindly_domain::{OccurrenceRule, Reminder, ReminderType};
    use remindly_infra::StaticTimeSys;

    #[test]
    fn computes_delay_until_next_sweep() {
        let hour = HOUR_MILLIS;
        let midnight = Utc
            .with_ymd_and_hms(2021, 3, 1, 0, 0, 0)
            .unwrap()
            .timestamp_millis();

        assert_eq!(millis_until_next_sweep(midnight, 3), 3 * hour);
        assert_eq!(millis_until_next_sweep(midnight + 3 * hour, 3), DAY_MILLIS);
        assert_eq!(millis_until_next_sweep(midnight + 3 * hour - 1, 3), 1);
        assert_eq!(
            millis_until_next_sweep(midnight + 4 * hour, 3),
            DAY_MILLIS - hour
        );
        assert_eq!(millis_until_next_sweep(midnight, 0), DAY_MILLIS);
        assert_eq!(millis_until_next_sweep(midnight + 1, 23), 23 * hour - 1);
    }

    fn setup_driver() -> (SweepDriver, Reminder) {
        let now = Utc.with_ymd_and_hms(2020, 2, 1, 3, 0, 0).unwrap();
        let mut ctx = RemindlyContext::create_inmemory();
        ctx.sys = Arc::new(StaticTimeSys(now.timestamp_millis()));
        let remind_at = now - ChronoDuration::days(10);
        let reminder = Reminder {
            id: Default::default(),
            owner_id: Default::default(),
            title: "Take vitamins".into(),
            description: None,
            reminder_type: ReminderType::Event,
            occurrence: Some(OccurrenceRule::Daily),
            remind_at,
            created: remind_at,
            updated: remind_at,
        };
        (SweepDriver::new(ctx), reminder)
    }

    #[actix_web::main]
    #[test]
    async fn fires_sweep_with_context_time() {
        let (driver, reminder) = setup_driver();
        driver.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let run = driver.fire().await;
        assert_eq!(
            run,
            SweepRun::Completed(SweepReport {
                found: 1,
                advanced: 1,
                skipped: 0,
                failed: 0
            })
        );

        let stored = driver
            .ctx
            .repos
            .reminders
            .find(&reminder.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.remind_at, reminder.remind_at + ChronoDuration::days(1));

        // The latch is released after a run
        assert!(matches!(driver.fire().await, SweepRun::Completed(_)));
    }

    #[actix_web::main]
    #[test]
    async fn skips_sweep_while_previous_one_is_running() {
        let (driver, reminder) = setup_driver();
        driver.ctx.repos.reminders.insert(&reminder).await.unwrap();

        let other = driver.clone();
        other.running.store(true, Ordering::SeqCst);
        assert_eq!(driver.fire().await, SweepRun::SkippedStillRunning);

        let stored = driver
            .ctx
            .repos
            .reminders
            .find(&reminder.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.remind_at, reminder.remind_at);
    }
}
