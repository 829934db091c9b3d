//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use crate::adapters::csv_report_adapter::CsvReportWriter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::sim_trading_adapter::SimulatedTradingAdapter;
use crate::adapters::system_clock::SystemClock;
use crate::domain::error::PowertradeError;
use crate::domain::extract_job::ReportExtractJob;
use crate::domain::options::ReportOptions;
use crate::domain::schedule::IntervalSchedule;
use crate::ports::clock_port::Clock;
use crate::ports::job_port::Job;
use crate::scheduler::JobScheduler;

#[derive(Parser, Debug)]
#[command(name = "powertrade", about = "Scheduled power trading position reports")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the report scheduler until interrupted
    Run {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Extract a single report immediately and exit
    Extract {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Validate a configuration file
    Validate {
        #[arg(short, long)]
        config: PathBuf,
    },
}

pub async fn run(cli: Cli) -> ExitCode {
    init_tracing();

    match cli.command {
        Command::Run { config } => run_service(&config).await,
        Command::Extract { config } => run_extract(&config).await,
        Command::Validate { config } => run_validate(&config),
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "powertrade=info".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|e| {
        let err = PowertradeError::ConfigParse {
            file: path.display().to_string(),
            reason: e.to_string(),
        };
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn load_options(path: &PathBuf) -> Result<ReportOptions, ExitCode> {
    let adapter = load_config(path)?;
    ReportOptions::from_config(&adapter).map_err(|e| {
        eprintln!("error: {e}");
        ExitCode::from(&e)
    })
}

fn build_job(options: &ReportOptions, clock: Arc<dyn Clock>) -> Arc<dyn Job> {
    let trading = Arc::new(SimulatedTradingAdapter::new(options.trade_count));
    let writer = Arc::new(CsvReportWriter::new(
        options.directory.clone(),
        options.file_pattern.clone(),
    ));
    Arc::new(ReportExtractJob::new(trading, writer, clock))
}

async fn run_service(config_path: &PathBuf) -> ExitCode {
    let options = match load_options(config_path) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::with_offset(options.utc_offset));

    // The schedule grid starts at service startup, matching the deployment
    // convention of the original service.
    let start_time = clock.current_time();
    let schedule = match IntervalSchedule::new(start_time, options.interval) {
        Ok(schedule) => Arc::new(schedule),
        Err(e) => {
            eprintln!("error: {e}");
            return ExitCode::from(&e);
        }
    };
    info!(%start_time, interval = %options.interval, "report schedule configured");

    let job = build_job(&options, Arc::clone(&clock));
    let mut scheduler = JobScheduler::new(schedule, job, clock);
    if let Err(e) = scheduler.start() {
        eprintln!("error: {e}");
        return ExitCode::from(&e);
    }

    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "failed to listen for the shutdown signal");
    }
    info!("received shutdown signal");

    match scheduler.stop().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

async fn run_extract(config_path: &PathBuf) -> ExitCode {
    let options = match load_options(config_path) {
        Ok(options) => options,
        Err(code) => return code,
    };
    let clock: Arc<dyn Clock> = Arc::new(SystemClock::with_offset(options.utc_offset));
    let job = build_job(&options, clock);

    eprintln!("Extracting report to {}", options.directory.display());
    match job.execute().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(&e)
        }
    }
}

fn run_validate(config_path: &PathBuf) -> ExitCode {
    match load_options(config_path) {
        Ok(options) => {
            eprintln!(
                "Config OK: reports every {} to {}",
                options.interval,
                options.directory.display()
            );
            ExitCode::SUCCESS
        }
        Err(code) => code,
    }
}
