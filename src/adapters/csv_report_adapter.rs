//! CSV report writer adapter.

use crate::domain::error::PowertradeError;
use crate::domain::report::TradingReport;
use crate::ports::report_port::ReportPort;
use async_trait::async_trait;
use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use tracing::debug;

/// Writes one CSV file per report under a fixed directory.
///
/// The file name is the report time expanded through a strftime pattern, so
/// consecutive extractions land in distinct files; an existing file is never
/// overwritten.
pub struct CsvReportWriter {
    directory: PathBuf,
    file_pattern: String,
}

impl CsvReportWriter {
    pub fn new(directory: PathBuf, file_pattern: String) -> Self {
        Self {
            directory,
            file_pattern,
        }
    }

    fn report_path(&self, report: &TradingReport) -> PathBuf {
        let file_name = report.report_time.format(&self.file_pattern).to_string();
        self.directory.join(file_name)
    }
}

#[async_trait]
impl ReportPort for CsvReportWriter {
    async fn write(&self, report: &TradingReport) -> Result<(), PowertradeError> {
        fs::create_dir_all(&self.directory)?;

        let path = self.report_path(report);
        debug!(path = %path.display(), "writing trading report");

        let file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)?;
        let mut writer = csv::Writer::from_writer(file);

        writer
            .write_record(["Date", "Periods", "Volume"])
            .map_err(|e| PowertradeError::Report {
                reason: format!("failed to write header: {e}"),
            })?;

        let report_date = report.report_time.format("%d-%b-%Y").to_string();
        for (row, summary) in report.summaries.iter().enumerate() {
            let date = if row == 0 { report_date.as_str() } else { "" };
            writer
                .write_record([
                    date.to_string(),
                    summary.period.to_string(),
                    summary.volume.to_string(),
                ])
                .map_err(|e| PowertradeError::Report {
                    reason: format!("failed to write row {row}: {e}"),
                })?;
        }

        writer.flush()?;
        debug!(path = %path.display(), "trading report written");
        Ok(())
    }
}
