//! Trade models as delivered by the trading platform.

use chrono::NaiveDateTime;

/// Volume traded in one day-ahead delivery period.
#[derive(Debug, Clone, PartialEq)]
pub struct TradePeriod {
    /// Number of the delivery period within the trading day.
    pub period: u32,
    /// Traded volume for the period. Sells are negative.
    pub volume: f64,
}

/// One trade with its per-period volumes.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub trade_date: NaiveDateTime,
    pub periods: Vec<TradePeriod>,
}

impl Trade {
    pub fn new(trade_date: NaiveDateTime, periods: Vec<TradePeriod>) -> Self {
        Self {
            trade_date,
            periods,
        }
    }
}
