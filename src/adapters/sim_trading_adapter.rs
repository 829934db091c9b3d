//! Simulated trading platform adapter.

use crate::domain::error::PowertradeError;
use crate::domain::trade::{Trade, TradePeriod};
use crate::ports::trading_port::TradingPort;
use async_trait::async_trait;
use chrono::NaiveDateTime;
use rand::Rng;

/// Day-ahead delivery periods covered by every simulated trade.
pub const PERIODS_PER_DAY: u32 = 24;

/// In-process stand-in for the external trading platform: a fixed number of
/// trades per extraction, each covering all day-ahead periods with random
/// volumes in both directions.
pub struct SimulatedTradingAdapter {
    trade_count: usize,
    max_volume: f64,
}

impl SimulatedTradingAdapter {
    pub fn new(trade_count: usize) -> Self {
        Self {
            trade_count,
            max_volume: 500.0,
        }
    }
}

#[async_trait]
impl TradingPort for SimulatedTradingAdapter {
    async fn fetch_trades(
        &self,
        extraction_time: NaiveDateTime,
    ) -> Result<Vec<Trade>, PowertradeError> {
        let mut rng = rand::thread_rng();
        let trades = (0..self.trade_count)
            .map(|_| {
                let periods = (1..=PERIODS_PER_DAY)
                    .map(|period| TradePeriod {
                        period,
                        volume: rng.gen_range(-self.max_volume..self.max_volume),
                    })
                    .collect();
                Trade::new(extraction_time, periods)
            })
            .collect();
        Ok(trades)
    }
}
