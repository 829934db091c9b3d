//! Job port trait.

use crate::domain::error::PowertradeError;
use async_trait::async_trait;

/// A single recurring unit of work for the scheduler.
///
/// `execute` must not monopolise the scheduler task for the full duration of
/// the work; long operations belong behind `.await` points so runs can overlap.
#[async_trait]
pub trait Job: Send + Sync {
    async fn execute(&self) -> Result<(), PowertradeError>;
}
