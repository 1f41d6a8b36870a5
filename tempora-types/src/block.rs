use crate::error::PeriodError;
use crate::period::{Duration, Instant, Period};
use crate::range::TimeRange;
use serde::{Deserialize, Serialize};

/// A period defined by its start and a non-negative duration.
///
/// The end is derived as `start + duration` once, at construction.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use tempora_types::{Period, TimeBlock};
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let lesson = TimeBlock::new(start, TimeDelta::minutes(45))?;
/// let pause = lesson.following(TimeDelta::minutes(15))?;
///
/// assert_eq!(lesson.end(), pause.start());
/// # Ok::<(), tempora_types::PeriodError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "TimeRange", try_from = "TimeRange")]
pub struct TimeBlock {
    start: Instant,
    duration: Duration,
    end: Instant,
}

impl TimeBlock {
    pub fn new(start: Instant, duration: Duration) -> Result<Self, PeriodError> {
        let range = TimeRange::with_duration(start, duration)?;
        Ok(Self {
            start,
            duration,
            end: range.end(),
        })
    }

    /// A block ending at `end` and lasting `duration`.
    pub fn ending_at(end: Instant, duration: Duration) -> Result<Self, PeriodError> {
        if duration < Duration::zero() {
            return Err(PeriodError::NegativeDuration(duration));
        }
        let start = end.checked_sub_signed(duration).ok_or_else(|| {
            PeriodError::OutOfRange(format!("{} - {} underflows", end, duration))
        })?;
        Ok(Self {
            start,
            duration,
            end,
        })
    }

    /// Same duration, new start.
    pub fn with_start(&self, start: Instant) -> Result<Self, PeriodError> {
        Self::new(start, self.duration)
    }

    /// Same start, new duration.
    pub fn with_duration(&self, duration: Duration) -> Result<Self, PeriodError> {
        Self::new(self.start, duration)
    }

    pub fn move_by(&self, offset: Duration) -> Result<Self, PeriodError> {
        let start = self.start.checked_add_signed(offset).ok_or_else(|| {
            PeriodError::OutOfRange(format!("{} moved by {}", self.start, offset))
        })?;
        self.with_start(start)
    }

    /// The block of `duration` starting where this one ends.
    pub fn following(&self, duration: Duration) -> Result<Self, PeriodError> {
        Self::new(self.end, duration)
    }

    /// The block of `duration` ending where this one starts.
    pub fn preceding(&self, duration: Duration) -> Result<Self, PeriodError> {
        Self::ending_at(self.start, duration)
    }
}

impl Period for TimeBlock {
    fn start(&self) -> Instant {
        self.start
    }

    fn end(&self) -> Instant {
        self.end
    }

    fn duration(&self) -> Duration {
        self.duration
    }
}

impl From<TimeBlock> for TimeRange {
    fn from(block: TimeBlock) -> Self {
        block.to_range()
    }
}

impl TryFrom<TimeRange> for TimeBlock {
    type Error = PeriodError;

    fn try_from(range: TimeRange) -> Result<Self, Self::Error> {
        Ok(Self {
            start: range.start(),
            duration: range.duration(),
            end: range.end(),
        })
    }
}
