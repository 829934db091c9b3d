//! The interval scheduler loop.
//!
//! One dedicated tokio task owns every scheduling decision and the queue of
//! in-flight job runs. Runs are fire-and-forget tasks tracked only for
//! completion and fault observation; a run outliving the schedule interval
//! overlaps the next one. Stopping is cooperative: the loop is signalled,
//! then joined with a bounded timeout, and the loop itself drains in-flight
//! runs with the same bound before it exits.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, timeout};
use tracing::{debug, error, info};

use crate::domain::error::PowertradeError;
use crate::ports::clock_port::Clock;
use crate::ports::job_port::Job;
use crate::ports::schedule_port::JobSchedule;

/// Safety margin added to every wait so sub-tick rounding in the clock or the
/// schedule cannot wake the loop fractionally early.
const WAIT_DEVIATION: Duration = Duration::from_millis(200);

/// How long a failed scheduling cycle pauses before the next attempt.
const CYCLE_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Default bound for joining the loop task and draining in-flight runs.
const DEFAULT_STOP_TIMEOUT: Duration = Duration::from_secs(300);

/// Drives a [`Job`] on the trigger grid of a [`JobSchedule`].
///
/// Single-use: `start` may be called once, `stop` once after that. A stopped
/// scheduler cannot be restarted; construct a new one.
pub struct JobScheduler {
    schedule: Arc<dyn JobSchedule>,
    job: Arc<dyn Job>,
    clock: Arc<dyn Clock>,
    stop_timeout: Duration,
    stop_tx: watch::Sender<bool>,
    loop_handle: Option<JoinHandle<Result<(), PowertradeError>>>,
}

impl JobScheduler {
    pub fn new(schedule: Arc<dyn JobSchedule>, job: Arc<dyn Job>, clock: Arc<dyn Clock>) -> Self {
        Self::with_stop_timeout(schedule, job, clock, DEFAULT_STOP_TIMEOUT)
    }

    /// Like [`JobScheduler::new`] with a custom stop/drain bound.
    pub fn with_stop_timeout(
        schedule: Arc<dyn JobSchedule>,
        job: Arc<dyn Job>,
        clock: Arc<dyn Clock>,
        stop_timeout: Duration,
    ) -> Self {
        let (stop_tx, _) = watch::channel(false);
        Self {
            schedule,
            job,
            clock,
            stop_timeout,
            stop_tx,
            loop_handle: None,
        }
    }

    /// Spawn the scheduler loop. Returns without blocking; the first job run
    /// is launched from inside the loop before any wait occurs.
    pub fn start(&mut self) -> Result<(), PowertradeError> {
        if self.loop_handle.is_some() || *self.stop_tx.borrow() {
            return Err(PowertradeError::SchedulerAlreadyStarted);
        }

        let scheduler_loop = SchedulerLoop {
            schedule: Arc::clone(&self.schedule),
            job: Arc::clone(&self.job),
            clock: Arc::clone(&self.clock),
            stop_rx: self.stop_tx.subscribe(),
            stop_timeout: self.stop_timeout,
            in_flight: VecDeque::new(),
        };
        self.loop_handle = Some(tokio::spawn(scheduler_loop.run()));

        info!("scheduler started");
        Ok(())
    }

    /// Signal the loop to exit and wait for it, bounded by the stop timeout.
    ///
    /// On a clean exit the loop has already drained every in-flight run; a
    /// drain that exceeds the bound surfaces here as
    /// [`PowertradeError::DrainTimeout`], a loop that cannot be joined in time
    /// as [`PowertradeError::StopTimeout`]. Runs still executing after a
    /// timeout keep running detached; they are never aborted.
    pub async fn stop(&mut self) -> Result<(), PowertradeError> {
        let handle = self
            .loop_handle
            .take()
            .ok_or(PowertradeError::SchedulerNotRunning)?;

        info!("stopping scheduler");
        let _ = self.stop_tx.send(true);

        match timeout(self.stop_timeout, handle).await {
            Err(_) => Err(PowertradeError::StopTimeout {
                timeout: self.stop_timeout,
            }),
            Ok(Err(join_error)) => Err(PowertradeError::SchedulerPanicked {
                reason: join_error.to_string(),
            }),
            Ok(Ok(result)) => {
                if result.is_ok() {
                    info!("scheduler stopped");
                }
                result
            }
        }
    }
}

/// State owned by the loop task. The in-flight queue has a single
/// writer/reader (this task), so it needs no synchronization.
struct SchedulerLoop {
    schedule: Arc<dyn JobSchedule>,
    job: Arc<dyn Job>,
    clock: Arc<dyn Clock>,
    stop_rx: watch::Receiver<bool>,
    stop_timeout: Duration,
    in_flight: VecDeque<JoinHandle<()>>,
}

impl SchedulerLoop {
    async fn run(mut self) -> Result<(), PowertradeError> {
        debug!("scheduler loop started");
        self.launch_run();

        loop {
            if *self.stop_rx.borrow() {
                break;
            }

            self.reap_finished().await;

            let wait = match self.time_until_next_run() {
                Ok(wait) => wait,
                Err(e) => {
                    error!(error = %e, "scheduling cycle failed");
                    CYCLE_RETRY_DELAY
                }
            };

            debug!(?wait, "waiting for the next job run");
            let stop_requested = tokio::select! {
                changed = self.stop_rx.changed() => {
                    changed.is_err() || *self.stop_rx.borrow()
                }
                () = sleep(wait) => false,
            };
            if stop_requested {
                break;
            }
            self.launch_run();
        }

        self.drain().await
    }

    /// Spawn one job run and enqueue its handle. The run's own outcome is
    /// logged from inside the spawned task; a panic is contained by the task
    /// boundary and logged when the handle is reaped.
    fn launch_run(&mut self) {
        debug!("launching job run");
        let job = Arc::clone(&self.job);
        let run = tokio::spawn(async move {
            match job.execute().await {
                Ok(()) => debug!("job run completed"),
                Err(e) => error!(error = %e, "job run failed"),
            }
        });
        self.in_flight.push_back(run);
    }

    /// Pop finished runs off the front of the queue.
    ///
    /// Only the front is inspected, so a finished run parked behind a
    /// longer-running older one is reaped later; it is still awaited during
    /// the shutdown drain.
    async fn reap_finished(&mut self) {
        while self.in_flight.front().is_some_and(JoinHandle::is_finished) {
            if let Some(run) = self.in_flight.pop_front() {
                observe_run(run).await;
            }
        }
    }

    fn time_until_next_run(&self) -> Result<Duration, PowertradeError> {
        let current_time = self.clock.current_time();
        debug!(%current_time, "computing next run time");

        let next_time = self.schedule.next_time(current_time)?;
        debug!(%next_time, "next run time");

        // The schedule contract guarantees next_time > current_time.
        let left = (next_time - current_time).to_std().unwrap_or(Duration::ZERO);
        Ok(left + WAIT_DEVIATION)
    }

    async fn drain(mut self) -> Result<(), PowertradeError> {
        if self.in_flight.is_empty() {
            debug!("scheduler loop finished");
            return Ok(());
        }

        let pending = self.in_flight.len();
        info!(pending, "waiting for in-flight job runs to finish");

        let runs = std::mem::take(&mut self.in_flight);
        let await_all = async {
            for run in runs {
                observe_run(run).await;
            }
        };
        timeout(self.stop_timeout, await_all)
            .await
            .map_err(|_| PowertradeError::DrainTimeout {
                timeout: self.stop_timeout,
                pending,
            })?;

        debug!("scheduler loop finished");
        Ok(())
    }
}

/// Await one run handle, surfacing a panicked run in the log.
async fn observe_run(run: JoinHandle<()>) {
    if let Err(e) = run.await {
        error!(error = %e, "job run panicked");
    }
}
