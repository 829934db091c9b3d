//! powertrade — scheduled power trading position reports.
//!
//! Hexagonal architecture: domain logic in [`domain`], port traits in [`ports`],
//! concrete implementations in [`adapters`]. The [`scheduler`] module owns the
//! recurring-extraction loop that drives everything.

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod scheduler;
pub mod cli;
