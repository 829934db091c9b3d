//! Fixed-interval schedule arithmetic.

use crate::domain::error::PowertradeError;
use crate::ports::schedule_port::JobSchedule;
use chrono::{Duration, NaiveDateTime};

/// Schedule that fires on the grid `start_time + k * interval`, `k >= 1`.
///
/// All arithmetic is done in integer nanoseconds. Floating-point time math is
/// not used anywhere: it silently loses ticks for large elapsed spans.
#[derive(Debug, Clone)]
pub struct IntervalSchedule {
    start_time: NaiveDateTime,
    interval: Duration,
    interval_nanos: i64,
}

impl IntervalSchedule {
    pub fn new(start_time: NaiveDateTime, interval: Duration) -> Result<Self, PowertradeError> {
        if interval <= Duration::zero() {
            return Err(PowertradeError::IntervalInvalid {
                reason: format!("interval must be positive, got {interval}"),
            });
        }
        let interval_nanos =
            interval
                .num_nanoseconds()
                .ok_or_else(|| PowertradeError::IntervalInvalid {
                    reason: format!("interval {interval} exceeds nanosecond range"),
                })?;
        Ok(Self {
            start_time,
            interval,
            interval_nanos,
        })
    }

    pub fn start_time(&self) -> NaiveDateTime {
        self.start_time
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }
}

impl JobSchedule for IntervalSchedule {
    fn next_time(&self, current_time: NaiveDateTime) -> Result<NaiveDateTime, PowertradeError> {
        let elapsed = current_time.signed_duration_since(self.start_time);
        if elapsed < Duration::zero() {
            return Err(PowertradeError::ScheduleBeforeStart {
                current: current_time,
                start: self.start_time,
            });
        }

        let elapsed_nanos =
            elapsed
                .num_nanoseconds()
                .ok_or(PowertradeError::ScheduleOverflow {
                    current: current_time,
                })?;

        // On a grid point (including start_time itself) the next tick is one
        // full interval away; otherwise step over the remainder of the
        // current interval.
        let past_tick = elapsed_nanos % self.interval_nanos;
        let step = if past_tick == 0 {
            self.interval
        } else {
            Duration::nanoseconds(self.interval_nanos - past_tick)
        };

        current_time
            .checked_add_signed(step)
            .ok_or(PowertradeError::ScheduleOverflow {
                current: current_time,
            })
    }
}
