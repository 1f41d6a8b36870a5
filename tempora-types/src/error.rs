use crate::period::{Duration, Instant};
use thiserror::Error;

/// Errors raised while constructing period values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PeriodError {
    /// End lies before start
    #[error("Invalid period: end {end} is before start {start}")]
    InvalidRange { start: Instant, end: Instant },

    /// Durations must not be negative
    #[error("Negative duration: {0}")]
    NegativeDuration(Duration),

    /// Result can not be represented as an instant
    #[error("Instant out of range: {0}")]
    OutOfRange(String),
}
