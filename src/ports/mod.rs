//! Port traits consumed by the scheduler core and the report pipeline.

pub mod clock_port;
pub mod config_port;
pub mod job_port;
pub mod report_port;
pub mod schedule_port;
pub mod trading_port;
