#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{Duration, NaiveDateTime};
use powertrade::adapters::system_clock::SystemClock;
use powertrade::domain::error::PowertradeError;
use powertrade::domain::report::TradingReport;
use powertrade::domain::schedule::IntervalSchedule;
use powertrade::domain::trade::{Trade, TradePeriod};
use powertrade::ports::clock_port::Clock;
use powertrade::ports::job_port::Job;
use powertrade::ports::report_port::ReportPort;
use powertrade::ports::trading_port::TradingPort;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration as StdDuration;

/// Clock pinned to a fixed instant.
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn current_time(&self) -> NaiveDateTime {
        self.0
    }
}

pub fn utc_clock() -> Arc<SystemClock> {
    Arc::new(SystemClock::utc())
}

/// Interval schedule whose grid starts at the clock's current time.
pub fn schedule_starting_now(clock: &dyn Clock, interval: Duration) -> Arc<IntervalSchedule> {
    Arc::new(IntervalSchedule::new(clock.current_time(), interval).unwrap())
}

/// Behaviour of one scripted job invocation.
pub enum RunScript {
    Succeed,
    Fail,
    Panic,
    Sleep(StdDuration),
    Hang,
}

/// Job whose behaviour is scripted per invocation; invocations beyond the
/// end of the script succeed immediately.
pub struct ScriptedJob {
    script: Vec<RunScript>,
    started: AtomicUsize,
    completed: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ScriptedJob {
    pub fn new(script: Vec<RunScript>) -> Arc<Self> {
        Arc::new(Self {
            script,
            started: AtomicUsize::new(0),
            completed: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        })
    }

    /// Number of invocations begun.
    pub fn started(&self) -> usize {
        self.started.load(Ordering::SeqCst)
    }

    /// Number of invocations that ran to successful completion.
    pub fn completed(&self) -> usize {
        self.completed.load(Ordering::SeqCst)
    }

    /// Highest number of invocations observed executing concurrently.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Job for ScriptedJob {
    async fn execute(&self) -> Result<(), PowertradeError> {
        let call = self.started.fetch_add(1, Ordering::SeqCst);
        let now_active = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now_active, Ordering::SeqCst);

        match self.script.get(call) {
            Some(RunScript::Fail) => {
                self.active.fetch_sub(1, Ordering::SeqCst);
                return Err(PowertradeError::Trading {
                    reason: format!("scripted failure on run {call}"),
                });
            }
            Some(RunScript::Panic) => panic!("scripted panic on run {call}"),
            Some(RunScript::Sleep(pause)) => tokio::time::sleep(*pause).await,
            Some(RunScript::Hang) => std::future::pending::<()>().await,
            Some(RunScript::Succeed) | None => {}
        }

        self.completed.fetch_add(1, Ordering::SeqCst);
        self.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Poll `condition` until it holds or `deadline` passes.
pub async fn wait_until(deadline: StdDuration, mut condition: impl FnMut() -> bool) -> bool {
    let started = tokio::time::Instant::now();
    while started.elapsed() < deadline {
        if condition() {
            return true;
        }
        tokio::time::sleep(StdDuration::from_millis(10)).await;
    }
    condition()
}

pub fn make_trade(trade_date: NaiveDateTime, volumes: &[(u32, f64)]) -> Trade {
    Trade::new(
        trade_date,
        volumes
            .iter()
            .map(|&(period, volume)| TradePeriod { period, volume })
            .collect(),
    )
}

/// Trading port returning the same trades on every extraction.
pub struct StaticTradingPort {
    pub trades: Vec<Trade>,
}

#[async_trait]
impl TradingPort for StaticTradingPort {
    async fn fetch_trades(
        &self,
        _extraction_time: NaiveDateTime,
    ) -> Result<Vec<Trade>, PowertradeError> {
        Ok(self.trades.clone())
    }
}

/// Report sink collecting reports in memory.
#[derive(Default)]
pub struct MemoryReportWriter {
    pub reports: Mutex<Vec<TradingReport>>,
}

#[async_trait]
impl ReportPort for MemoryReportWriter {
    async fn write(&self, report: &TradingReport) -> Result<(), PowertradeError> {
        self.reports.lock().unwrap().push(report.clone());
        Ok(())
    }
}
