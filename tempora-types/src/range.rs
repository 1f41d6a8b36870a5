use crate::error::PeriodError;
use crate::period::{Duration, Instant, MAX_INSTANT, MIN_INSTANT, Period};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A period defined by its start and end instants.
///
/// # Invariants
/// `start <= end`. Every constructor validates this, including deserialization.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use tempora_types::{Period, TimeRange};
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let lesson = TimeRange::with_duration(start, TimeDelta::minutes(45))?;
/// assert_eq!(lesson.duration(), TimeDelta::minutes(45));
///
/// // End before start is rejected
/// assert!(TimeRange::new(lesson.end(), lesson.start()).is_err());
/// # Ok::<(), tempora_types::PeriodError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawTimeRange")]
pub struct TimeRange {
    start: Instant,
    end: Instant,
}

#[derive(Deserialize)]
struct RawTimeRange {
    start: Instant,
    end: Instant,
}

impl TryFrom<RawTimeRange> for TimeRange {
    type Error = PeriodError;

    fn try_from(raw: RawTimeRange) -> Result<Self, Self::Error> {
        TimeRange::new(raw.start, raw.end)
    }
}

impl TimeRange {
    /// The unbounded sentinel covering every representable instant.
    pub const ANYTIME: TimeRange = TimeRange {
        start: MIN_INSTANT,
        end: MAX_INSTANT,
    };

    /// Creates a range, rejecting `end < start`.
    pub fn new(start: Instant, end: Instant) -> Result<Self, PeriodError> {
        if end < start {
            return Err(PeriodError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// Creates a range from two instants in either order.
    pub fn spanning(a: Instant, b: Instant) -> Self {
        if a <= b {
            Self { start: a, end: b }
        } else {
            Self { start: b, end: a }
        }
    }

    /// A zero-length range at `moment`.
    pub fn moment(moment: Instant) -> Self {
        Self {
            start: moment,
            end: moment,
        }
    }

    pub fn anytime() -> Self {
        Self::ANYTIME
    }

    /// `[start, MAX]`
    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            end: MAX_INSTANT,
        }
    }

    /// `[MIN, end]`
    pub fn ending_at(end: Instant) -> Self {
        Self {
            start: MIN_INSTANT,
            end,
        }
    }

    pub fn with_duration(start: Instant, duration: Duration) -> Result<Self, PeriodError> {
        if duration < Duration::zero() {
            return Err(PeriodError::NegativeDuration(duration));
        }
        let end = start.checked_add_signed(duration).ok_or_else(|| {
            PeriodError::OutOfRange(format!("{} + {} overflows", start, duration))
        })?;
        Ok(Self { start, end })
    }

    pub(crate) fn from_trusted(start: Instant, end: Instant) -> Self {
        debug_assert!(start <= end);
        Self { start, end }
    }

    /// Moves both boundaries by `offset`.
    pub fn shift(&self, offset: Duration) -> Result<Self, PeriodError> {
        let overflow = || PeriodError::OutOfRange(format!("{} shifted by {}", self, offset));
        let start = self.start.checked_add_signed(offset).ok_or_else(overflow)?;
        let end = self.end.checked_add_signed(offset).ok_or_else(overflow)?;
        Ok(Self { start, end })
    }

    /// The smallest range covering both this range and `other`.
    pub fn expand_to<P: Period + ?Sized>(&self, other: &P) -> Self {
        Self {
            start: self.start.min(other.start()),
            end: self.end.max(other.end()),
        }
    }
}

impl Period for TimeRange {
    fn start(&self) -> Instant {
        self.start
    }

    fn end(&self) -> Instant {
        self.end
    }
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::ANYTIME
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}
