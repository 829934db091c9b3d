//! Domain error types.

use chrono::NaiveDateTime;
use std::time::Duration;

/// Top-level error type for powertrade.
#[derive(Debug, thiserror::Error)]
pub enum PowertradeError {
    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("invalid schedule interval: {reason}")]
    IntervalInvalid { reason: String },

    #[error("current time {current} is before schedule start {start}")]
    ScheduleBeforeStart {
        current: NaiveDateTime,
        start: NaiveDateTime,
    },

    #[error("next schedule time is out of the supported range (current time {current})")]
    ScheduleOverflow { current: NaiveDateTime },

    #[error("trading platform error: {reason}")]
    Trading { reason: String },

    #[error("report write error: {reason}")]
    Report { reason: String },

    #[error("scheduler was already started")]
    SchedulerAlreadyStarted,

    #[error("scheduler is not running")]
    SchedulerNotRunning,

    #[error("scheduler loop panicked: {reason}")]
    SchedulerPanicked { reason: String },

    #[error("timed out after {timeout:?} waiting for the scheduler loop to finish")]
    StopTimeout { timeout: Duration },

    #[error("timed out after {timeout:?} waiting for {pending} in-flight job runs to finish")]
    DrainTimeout { timeout: Duration, pending: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&PowertradeError> for std::process::ExitCode {
    fn from(err: &PowertradeError) -> Self {
        let code: u8 = match err {
            PowertradeError::Io(_) | PowertradeError::Report { .. } => 1,
            PowertradeError::ConfigParse { .. }
            | PowertradeError::ConfigMissing { .. }
            | PowertradeError::ConfigInvalid { .. } => 2,
            PowertradeError::Trading { .. } => 3,
            PowertradeError::IntervalInvalid { .. }
            | PowertradeError::ScheduleBeforeStart { .. }
            | PowertradeError::ScheduleOverflow { .. } => 4,
            PowertradeError::SchedulerAlreadyStarted
            | PowertradeError::SchedulerNotRunning
            | PowertradeError::SchedulerPanicked { .. }
            | PowertradeError::StopTimeout { .. }
            | PowertradeError::DrainTimeout { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
