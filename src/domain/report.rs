//! Trading report model and aggregation.

use crate::domain::trade::Trade;
use chrono::NaiveDateTime;
use std::collections::BTreeMap;

/// Aggregated volume for one delivery period.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodSummary {
    pub period: u32,
    pub volume: f64,
}

/// One extracted position report.
#[derive(Debug, Clone, PartialEq)]
pub struct TradingReport {
    /// Report extraction time.
    pub report_time: NaiveDateTime,
    /// Per-period volume summaries, ordered by period number.
    pub summaries: Vec<PeriodSummary>,
}

/// Build a report from the trades returned by the trading platform.
///
/// Volumes are summed per period across all trades. No fixed period count is
/// assumed; periods appear in the output only if some trade covers them.
pub fn prepare_report(report_time: NaiveDateTime, trades: &[Trade]) -> TradingReport {
    let mut volumes: BTreeMap<u32, f64> = BTreeMap::new();

    for trade in trades {
        for period in &trade.periods {
            *volumes.entry(period.period).or_insert(0.0) += period.volume;
        }
    }

    TradingReport {
        report_time,
        summaries: volumes
            .into_iter()
            .map(|(period, volume)| PeriodSummary { period, volume })
            .collect(),
    }
}
