//! The report extraction job.

use crate::domain::error::PowertradeError;
use crate::domain::report::prepare_report;
use crate::ports::clock_port::Clock;
use crate::ports::job_port::Job;
use crate::ports::report_port::ReportPort;
use crate::ports::trading_port::TradingPort;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

/// One extraction: read the clock, fetch trades, aggregate, write the report.
pub struct ReportExtractJob {
    trading: Arc<dyn TradingPort>,
    writer: Arc<dyn ReportPort>,
    clock: Arc<dyn Clock>,
}

impl ReportExtractJob {
    pub fn new(
        trading: Arc<dyn TradingPort>,
        writer: Arc<dyn ReportPort>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            trading,
            writer,
            clock,
        }
    }
}

#[async_trait]
impl Job for ReportExtractJob {
    async fn execute(&self) -> Result<(), PowertradeError> {
        let report_time = self.clock.current_time();
        debug!(%report_time, "extracting trading report");

        let trades = self.trading.fetch_trades(report_time).await?;
        debug!(trades = trades.len(), "received trades");

        let report = prepare_report(report_time, &trades);
        self.writer.write(&report).await?;
        Ok(())
    }
}
