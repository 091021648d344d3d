//! Scheduler configuration

use std::time::Duration;

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::scheduler::{HourlySchedule, SchedulerError};

/// Timing of the interval and hourly loops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchedulerAppConfig {
    /// Minutes between cycles in interval mode (default: 10)
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,

    /// IANA timezone whose clock defines "top of the hour" (default: Asia/Seoul)
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// Pause after each hourly cycle in seconds (default: 60)
    #[serde(default = "default_post_run_pause_secs")]
    pub post_run_pause_secs: u64,

    /// Run one cycle right away before waiting for the first hour
    #[serde(default)]
    pub run_first_immediately: bool,
}

const fn default_interval_minutes() -> u64 {
    10
}

fn default_timezone() -> String {
    "Asia/Seoul".to_string()
}

const fn default_post_run_pause_secs() -> u64 {
    60
}

impl Default for SchedulerAppConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
            timezone: default_timezone(),
            post_run_pause_secs: default_post_run_pause_secs(),
            run_first_immediately: false,
        }
    }
}

impl SchedulerAppConfig {
    /// Parse the configured timezone
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidTimezone`] for unknown zone names.
    pub fn timezone(&self) -> Result<Tz, SchedulerError> {
        self.timezone
            .parse::<Tz>()
            .map_err(|_| SchedulerError::InvalidTimezone(self.timezone.clone()))
    }

    /// Period of the interval loop
    ///
    /// # Errors
    ///
    /// Returns [`SchedulerError::InvalidInterval`] when the interval is zero.
    pub fn interval(&self) -> Result<Duration, SchedulerError> {
        if self.interval_minutes == 0 {
            return Err(SchedulerError::InvalidInterval);
        }
        Ok(Duration::from_secs(self.interval_minutes.saturating_mul(60)))
    }

    /// Settings of the hourly loop
    ///
    /// # Errors
    ///
    /// Returns an error if the timezone is unknown.
    pub fn hourly_schedule(&self) -> Result<HourlySchedule, SchedulerError> {
        Ok(HourlySchedule {
            timezone: self.timezone()?,
            post_run_pause: Duration::from_secs(self.post_run_pause_secs),
            run_first_immediately: self.run_first_immediately,
        })
    }
}
