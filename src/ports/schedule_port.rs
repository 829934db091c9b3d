//! Job schedule port trait.

use crate::domain::error::PowertradeError;
use chrono::NaiveDateTime;

/// A schedule policy mapping "current time" to "next time the job should run".
///
/// The fixed-interval policy lives in [`crate::domain::schedule::IntervalSchedule`];
/// other policies (business-hours-only, calendar-driven) implement the same
/// single operation and slot into the scheduler unchanged.
pub trait JobSchedule: Send + Sync {
    /// Next trigger time strictly after `current_time`.
    ///
    /// Fails when the schedule is not active yet at `current_time` or when the
    /// next time would leave the representable range.
    fn next_time(&self, current_time: NaiveDateTime) -> Result<NaiveDateTime, PowertradeError>;
}
