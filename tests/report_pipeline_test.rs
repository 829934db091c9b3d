//! Report pipeline integration tests.
//!
//! Tests cover:
//! - Extract job end-to-end with a static trading feed and CSV output
//! - The aggregated in-memory report as seen by the report port
//! - The full service: scheduler + extract job + CSV writer on a tight
//!   interval producing one file per tick

mod common;

use common::*;
use chrono::{Duration as ChronoDuration, NaiveDate, NaiveDateTime};
use powertrade::adapters::csv_report_adapter::CsvReportWriter;
use powertrade::adapters::sim_trading_adapter::SimulatedTradingAdapter;
use powertrade::domain::extract_job::ReportExtractJob;
use powertrade::ports::job_port::Job;
use powertrade::scheduler::JobScheduler;
use std::fs;
use std::sync::Arc;
use std::time::Duration;

fn report_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2019, 9, 22)
        .unwrap()
        .and_hms_opt(11, 34, 54)
        .unwrap()
}

#[tokio::test]
async fn extract_job_writes_csv_from_the_trading_feed() {
    let dir = tempfile::tempdir().unwrap();
    let trading = Arc::new(StaticTradingPort {
        trades: vec![
            make_trade(report_time(), &[(1, 100.0), (2, 200.0)]),
            make_trade(report_time(), &[(1, 50.0), (3, -20.0)]),
        ],
    });
    let writer = Arc::new(CsvReportWriter::new(
        dir.path().to_path_buf(),
        "position_%Y%m%d_%H%M.csv".to_string(),
    ));
    let job = ReportExtractJob::new(trading, writer, Arc::new(FixedClock(report_time())));

    job.execute().await.unwrap();

    let content = fs::read_to_string(dir.path().join("position_20190922_1134.csv")).unwrap();
    assert_eq!(
        content.lines().collect::<Vec<_>>(),
        vec![
            "Date,Periods,Volume",
            "22-Sep-2019,1,150",
            ",2,200",
            ",3,-20",
        ]
    );
}

#[tokio::test]
async fn extract_job_reports_aggregated_periods_to_the_sink() {
    let trading = Arc::new(StaticTradingPort {
        trades: vec![
            make_trade(report_time(), &[(4, 10.0)]),
            make_trade(report_time(), &[(4, 15.0), (7, 1.0)]),
        ],
    });
    let writer = Arc::new(MemoryReportWriter::default());
    let job = ReportExtractJob::new(
        trading,
        writer.clone(),
        Arc::new(FixedClock(report_time())),
    );

    job.execute().await.unwrap();

    let reports = writer.reports.lock().unwrap();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].report_time, report_time());
    let rows: Vec<(u32, f64)> = reports[0]
        .summaries
        .iter()
        .map(|s| (s.period, s.volume))
        .collect();
    assert_eq!(rows, vec![(4, 25.0), (7, 1.0)]);
}

#[tokio::test]
async fn service_produces_one_report_per_tick() {
    let dir = tempfile::tempdir().unwrap();
    let clock = utc_clock();
    let schedule = schedule_starting_now(clock.as_ref(), ChronoDuration::milliseconds(50));

    let job = Arc::new(ReportExtractJob::new(
        Arc::new(SimulatedTradingAdapter::new(3)),
        Arc::new(CsvReportWriter::new(
            dir.path().to_path_buf(),
            "power_%H%M%S_%3f.csv".to_string(),
        )),
        Arc::clone(&clock) as Arc<dyn powertrade::ports::clock_port::Clock>,
    ));

    let mut scheduler = JobScheduler::new(schedule, job, clock);
    scheduler.start().unwrap();

    let report_count = || fs::read_dir(dir.path()).map(|d| d.count()).unwrap_or(0);
    assert!(wait_until(Duration::from_secs(10), || report_count() >= 2).await);
    scheduler.stop().await.unwrap();

    let count = report_count();
    assert!(count >= 2, "expected at least two reports, found {count}");
}
