//! Report output port trait.

use crate::domain::error::PowertradeError;
use crate::domain::report::TradingReport;
use async_trait::async_trait;

/// Sink for finished trading reports. Could be CSV, a database, or anything
/// else that can persist one report per extraction.
#[async_trait]
pub trait ReportPort: Send + Sync {
    async fn write(&self, report: &TradingReport) -> Result<(), PowertradeError>;
}
