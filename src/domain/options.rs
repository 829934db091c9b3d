//! Report service configuration model.

use crate::domain::error::PowertradeError;
use crate::ports::config_port::ConfigPort;
use chrono::{Duration, FixedOffset};
use std::path::PathBuf;

const REPORT_SECTION: &str = "report";
const TRADING_SECTION: &str = "trading";

const DEFAULT_UTC_OFFSET: &str = "+00:00";
const DEFAULT_TRADE_COUNT: i64 = 10;

/// Options for the report extraction service, read from the `[report]` and
/// `[trading]` sections of an INI file.
#[derive(Debug, Clone)]
pub struct ReportOptions {
    /// Wall-clock offset the reports are produced in.
    pub utc_offset: FixedOffset,
    /// Output directory for CSV reports.
    pub directory: PathBuf,
    /// strftime pattern expanded with the report time to name each file.
    pub file_pattern: String,
    /// Extraction interval.
    pub interval: Duration,
    /// Number of trades the simulated platform returns per extraction.
    pub trade_count: usize,
}

impl ReportOptions {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, PowertradeError> {
        let directory = PathBuf::from(require(config, REPORT_SECTION, "directory")?);
        let file_pattern = require(config, REPORT_SECTION, "file_pattern")?;

        let interval_value = require(config, REPORT_SECTION, "interval")?;
        let interval = parse_interval(&interval_value).map_err(|reason| {
            PowertradeError::ConfigInvalid {
                section: REPORT_SECTION.into(),
                key: "interval".into(),
                reason,
            }
        })?;

        let offset_value = config
            .get_string(REPORT_SECTION, "utc_offset")
            .unwrap_or_else(|| DEFAULT_UTC_OFFSET.to_string());
        let utc_offset =
            offset_value
                .parse::<FixedOffset>()
                .map_err(|e| PowertradeError::ConfigInvalid {
                    section: REPORT_SECTION.into(),
                    key: "utc_offset".into(),
                    reason: e.to_string(),
                })?;

        let trade_count = config.get_int(TRADING_SECTION, "trade_count", DEFAULT_TRADE_COUNT);
        if trade_count < 0 {
            return Err(PowertradeError::ConfigInvalid {
                section: TRADING_SECTION.into(),
                key: "trade_count".into(),
                reason: format!("must not be negative, got {trade_count}"),
            });
        }

        Ok(Self {
            utc_offset,
            directory,
            file_pattern,
            interval,
            trade_count: trade_count as usize,
        })
    }
}

fn require(config: &dyn ConfigPort, section: &str, key: &str) -> Result<String, PowertradeError> {
    config
        .get_string(section, key)
        .ok_or_else(|| PowertradeError::ConfigMissing {
            section: section.into(),
            key: key.into(),
        })
}

/// Parse an interval given as `HH:MM:SS`, `D.HH:MM:SS`, or a bare number of
/// seconds. The result must be positive.
pub fn parse_interval(value: &str) -> Result<Duration, String> {
    let value = value.trim();
    let interval = match value.split(':').collect::<Vec<_>>().as_slice() {
        [seconds] => Duration::seconds(parse_component(seconds, "seconds")?),
        [hours_part, minutes, seconds] => {
            let (days, hours) = match hours_part.split_once('.') {
                Some((days, hours)) => (
                    parse_component(days, "days")?,
                    parse_component(hours, "hours")?,
                ),
                None => (0, parse_component(hours_part, "hours")?),
            };
            let minutes = parse_component(minutes, "minutes")?;
            let seconds = parse_component(seconds, "seconds")?;
            if !(0..60).contains(&minutes) || !(0..60).contains(&seconds) {
                return Err(format!("minutes and seconds must be within 0-59 in '{value}'"));
            }
            Duration::days(days)
                + Duration::hours(hours)
                + Duration::minutes(minutes)
                + Duration::seconds(seconds)
        }
        _ => return Err(format!("expected HH:MM:SS or seconds, got '{value}'")),
    };

    if interval <= Duration::zero() {
        return Err(format!("interval must be positive, got '{value}'"));
    }
    Ok(interval)
}

fn parse_component(raw: &str, what: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("invalid {what} component '{raw}'"))
}
