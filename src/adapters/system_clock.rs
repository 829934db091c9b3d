//! Wall-clock adapter with a fixed UTC offset.

use crate::ports::clock_port::Clock;
use chrono::{FixedOffset, NaiveDateTime, Offset, Utc};

/// Clock reporting the current time shifted into a configured UTC offset.
///
/// The offset stands in for the original deployment's report time zone; the
/// schedule operates on the resulting naive wall-clock time.
pub struct SystemClock {
    offset: FixedOffset,
}

impl SystemClock {
    pub fn utc() -> Self {
        Self { offset: Utc.fix() }
    }

    pub fn with_offset(offset: FixedOffset) -> Self {
        Self { offset }
    }
}

impl Clock for SystemClock {
    fn current_time(&self) -> NaiveDateTime {
        Utc::now().with_timezone(&self.offset).naive_local()
    }
}
