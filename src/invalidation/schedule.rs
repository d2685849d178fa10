//! Cache clear schedule and clock.

use std::str::FromStr;

use chrono::{DateTime, Utc};
use cron::Schedule;
use thiserror::Error;

/// Second 0 of every minute.
pub const DEFAULT_CLEAR_SCHEDULE: &str = "0 * * * * *";

#[derive(Debug, Error)]
#[error("invalid cache clear schedule '{expression}': {source}")]
pub struct ScheduleError {
    expression: String,
    source: cron::error::Error,
}

/// Cron schedule for the periodic cache clear.
///
/// Expressions use the six-field form with seconds first
/// (`sec min hour day-of-month month day-of-week`).
#[derive(Debug, Clone)]
pub struct ClearSchedule {
    expression: String,
    schedule: Schedule,
}

impl ClearSchedule {
    pub fn parse(expression: &str) -> Result<Self, ScheduleError> {
        let expression = expression.trim();
        let schedule = Schedule::from_str(expression).map_err(|source| ScheduleError {
            expression: expression.to_string(),
            source,
        })?;

        Ok(Self {
            expression: expression.to_string(),
            schedule,
        })
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    /// First occurrence strictly after `after`.
    pub fn next_after(&self, after: &DateTime<Utc>) -> Option<DateTime<Utc>> {
        self.schedule.after(after).next()
    }
}

/// Wall-clock source for the scheduler.
pub trait Clock: Send + Sync + 'static {
    fn now(&self) -> DateTime<Utc>;
}

/// The system wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, h, m, s).unwrap()
    }

    #[test]
    fn test_default_schedule_fires_on_minute_boundaries() {
        let schedule = ClearSchedule::parse(DEFAULT_CLEAR_SCHEDULE).unwrap();

        assert_eq!(schedule.next_after(&at(12, 0, 30)), Some(at(12, 1, 0)));
        assert_eq!(schedule.next_after(&at(12, 0, 59)), Some(at(12, 1, 0)));

        let midnight = Utc.with_ymd_and_hms(2024, 5, 2, 0, 0, 0).unwrap();
        assert_eq!(schedule.next_after(&at(23, 59, 1)), Some(midnight));
    }

    #[test]
    fn test_next_after_is_strictly_after() {
        let schedule = ClearSchedule::parse(DEFAULT_CLEAR_SCHEDULE).unwrap();
        assert_eq!(schedule.next_after(&at(12, 1, 0)), Some(at(12, 2, 0)));
    }

    #[test]
    fn test_custom_schedule() {
        let schedule = ClearSchedule::parse(" 0 0/5 * * * * ").unwrap();
        assert_eq!(schedule.expression(), "0 0/5 * * * *");
        assert_eq!(schedule.next_after(&at(12, 1, 0)), Some(at(12, 5, 0)));
    }

    #[test]
    fn test_invalid_schedule() {
        let err = ClearSchedule::parse("every minute").unwrap_err();
        assert!(err.to_string().contains("every minute"));
    }
}
