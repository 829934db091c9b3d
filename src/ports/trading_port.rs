//! Trading platform access port trait.

use crate::domain::error::PowertradeError;
use crate::domain::trade::Trade;
use async_trait::async_trait;
use chrono::NaiveDateTime;

/// Source of trades for one report extraction.
#[async_trait]
pub trait TradingPort: Send + Sync {
    /// All trades known to the platform at `extraction_time`.
    async fn fetch_trades(
        &self,
        extraction_time: NaiveDateTime,
    ) -> Result<Vec<Trade>, PowertradeError>;
}
