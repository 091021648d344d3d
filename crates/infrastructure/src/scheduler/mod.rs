//! Collection loops
//!
//! Drives [`CollectorService`] cycles in one of two rhythms:
//! - every N minutes, starting immediately
//! - at the top of every hour in a configured timezone
//!
//! Each cycle runs as its own task. A failed or panicking cycle is logged
//! and the loop carries on with the next one.

use std::{str::FromStr, sync::Arc, time::Duration};

use application::CollectorService;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use cron::Schedule;
use domain::CollectionReport;
use thiserror::Error;
use tokio::{
    task::JoinError,
    time::{MissedTickBehavior, interval, sleep},
};
use tracing::{error, info, instrument};

/// Cron expression (with seconds) firing at minute 0 of every hour
pub const TOP_OF_HOUR: &str = "0 0 * * * *";

/// Scheduler errors
#[derive(Debug, Error)]
pub enum SchedulerError {
    /// Unknown IANA timezone name
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Invalid cron expression
    #[error("Invalid cron expression: {0}")]
    InvalidCronExpression(String),

    /// Interval of zero length
    #[error("Interval must be at least one minute")]
    InvalidInterval,

    /// The schedule produced no future run
    #[error("No upcoming run for schedule {0}")]
    NoUpcomingRun(String),

    /// A cycle returned an error
    #[error("Collection cycle failed: {0}")]
    CycleFailed(String),

    /// A cycle panicked or was cancelled
    #[error("Collection cycle aborted: {0}")]
    CycleAborted(String),
}

/// Settings of the hourly loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HourlySchedule {
    /// Timezone whose wall clock defines the top of the hour
    pub timezone: Tz,
    /// Pause after each cycle before computing the next wake-up
    pub post_run_pause: Duration,
    /// Run one cycle before the first wait
    pub run_first_immediately: bool,
}

/// Run one isolated collection cycle
///
/// The cycle runs in its own task so a panic inside it is contained.
/// Failures are logged here with full detail before being returned.
///
/// # Errors
///
/// Returns an error if the cycle failed or panicked.
#[instrument(skip(service))]
pub async fn run_cycle(
    service: &Arc<CollectorService>,
) -> Result<CollectionReport, SchedulerError> {
    let service = Arc::clone(service);
    let started = std::time::Instant::now();

    let outcome = tokio::spawn(async move { service.run_once().await }).await;
    let elapsed_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX);

    match outcome {
        Ok(Ok(report)) => {
            info!(elapsed_ms, routes = report.routes.len(), "Collection cycle completed");
            Ok(report)
        },
        Ok(Err(e)) => {
            error!(elapsed_ms, error = %e, details = ?e, "Collection cycle failed");
            Err(SchedulerError::CycleFailed(e.to_string()))
        },
        Err(e) => {
            let reason = describe_join_error(e);
            error!(elapsed_ms, %reason, "Collection cycle aborted");
            Err(SchedulerError::CycleAborted(reason))
        },
    }
}

/// Run a cycle immediately, then once per `period`, forever
///
/// Ticks missed while a slow cycle runs are not replayed.
///
/// # Errors
///
/// Returns [`SchedulerError::InvalidInterval`] for a zero period; never
/// returns otherwise.
pub async fn run_interval(
    service: Arc<CollectorService>,
    period: Duration,
) -> Result<(), SchedulerError> {
    if period.is_zero() {
        return Err(SchedulerError::InvalidInterval);
    }

    info!(period_secs = period.as_secs(), "Starting interval collection");

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        ticker.tick().await;
        // Failures are logged inside run_cycle
        let _ = run_cycle(&service).await;
    }
}

/// Run a cycle at every top of the hour in the schedule's timezone, forever
///
/// # Errors
///
/// Returns an error if no next run can be computed; never returns
/// otherwise.
pub async fn run_hourly(
    service: Arc<CollectorService>,
    schedule: HourlySchedule,
) -> Result<(), SchedulerError> {
    let cron = top_of_hour_schedule()?;

    info!(
        timezone = %schedule.timezone,
        run_first_immediately = schedule.run_first_immediately,
        "Starting hourly collection"
    );

    if schedule.run_first_immediately {
        info!("Running first cycle immediately");
        let _ = run_cycle(&service).await;
        sleep(schedule.post_run_pause).await;
    }

    loop {
        let now = Utc::now();
        let next = next_run(&cron, now, schedule.timezone)?;
        let wait = (next.with_timezone(&Utc) - now)
            .to_std()
            .unwrap_or_default();

        info!(next_run = %next, wait_secs = wait.as_secs(), "Waiting for top of the hour");
        sleep(wait).await;

        let _ = run_cycle(&service).await;
        sleep(schedule.post_run_pause).await;
    }
}

/// The first top of the hour strictly after `now`, on `timezone`'s clock
///
/// # Errors
///
/// Returns an error if the schedule yields no future run.
pub fn next_top_of_hour(now: DateTime<Utc>, timezone: Tz) -> Result<DateTime<Tz>, SchedulerError> {
    next_run(&top_of_hour_schedule()?, now, timezone)
}

fn top_of_hour_schedule() -> Result<Schedule, SchedulerError> {
    Schedule::from_str(TOP_OF_HOUR)
        .map_err(|e| SchedulerError::InvalidCronExpression(format!("{TOP_OF_HOUR}: {e}")))
}

fn next_run(
    schedule: &Schedule,
    now: DateTime<Utc>,
    timezone: Tz,
) -> Result<DateTime<Tz>, SchedulerError> {
    schedule
        .after(&now.with_timezone(&timezone))
        .next()
        .ok_or_else(|| SchedulerError::NoUpcomingRun(schedule.to_string()))
}

fn describe_join_error(err: JoinError) -> String {
    if !err.is_panic() {
        return err.to_string();
    }

    let payload = err.into_panic();
    payload
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| payload.downcast_ref::<String>().cloned())
        .map_or_else(|| "panic".to_string(), |msg| format!("panic: {msg}"))
}
