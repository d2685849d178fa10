//! Cache invalidation.
//!
//! Clears every named cache either on request (`GET /clearAllCaches`) or on a
//! cron schedule, by default at second 0 of every minute.

mod invalidator;
mod schedule;

pub use invalidator::CacheInvalidator;
pub use schedule::{ClearSchedule, Clock, DEFAULT_CLEAR_SCHEDULE, ScheduleError, SystemClock};
