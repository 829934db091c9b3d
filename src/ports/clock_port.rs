//! Current-time access port trait.

use chrono::NaiveDateTime;

/// Abstraction over the current wall-clock time, so scheduling logic stays
/// deterministic under test.
pub trait Clock: Send + Sync {
    fn current_time(&self) -> NaiveDateTime;
}
