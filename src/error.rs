//! Error types for tempora operations.

use tempora_types::{Instant, PeriodError};
use thiserror::Error;

/// Result type for tempora operations
pub type Result<T> = std::result::Result<T, TimeError>;

/// Errors raised at construction time or by a broken traversal contract.
///
/// A seek that finds nothing is not an error: it returns `Ok(None)`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeError {
    /// Period construction failed
    #[error(transparent)]
    Period(#[from] PeriodError),

    /// Invalid caller input
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A chain rejected a period that does not start at its tail
    #[error("Period {index} starts at {actual}, chain ends at {expected}")]
    NonContiguous {
        index: usize,
        expected: Instant,
        actual: Instant,
    },

    /// Calendar boundary not representable
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// A visit strategy asked to continue after it reported completion
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    /// The traversal touched more granules than the configured ceiling
    #[error("Visit limit of {limit} granules exceeded")]
    VisitLimitExceeded { limit: u64 },
}
