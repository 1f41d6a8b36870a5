//! Contiguous chains of periods.

use crate::error::{Result, TimeError};
use crate::periods::collection::TimePeriodCollection;
use tempora_types::{Duration, Instant, Period, TimeBlock, TimeRange};

/// An ordered sequence of periods where each period starts exactly where the
/// previous one ends.
///
/// Contiguity is checked when periods are added, never later.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use tempora::{Period, TimeBlock, TimePeriodChain};
///
/// let start = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap().and_hms_opt(8, 0, 0).unwrap();
/// let lesson = TimeDelta::minutes(45);
/// let pause = TimeDelta::minutes(15);
///
/// let timetable = TimePeriodChain::<TimeBlock>::from_durations(start, [lesson, pause, lesson])?;
/// assert_eq!(timetable.len(), 3);
/// assert_eq!(timetable.duration(), TimeDelta::minutes(105));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimePeriodChain<P = TimeRange> {
    periods: Vec<P>,
}

impl<P: Period> TimePeriodChain<P> {
    pub fn new() -> Self {
        Self {
            periods: Vec::new(),
        }
    }

    /// Builds a chain, failing on the first non-contiguous period.
    pub fn from_periods<I: IntoIterator<Item = P>>(periods: I) -> Result<Self> {
        let mut chain = Self::new();
        for period in periods {
            chain.add(period)?;
        }
        Ok(chain)
    }

    /// Appends `period`, which must start where the chain currently ends.
    pub fn add(&mut self, period: P) -> Result<()> {
        if let Some(tail) = self.periods.last()
            && tail.end() != period.start()
        {
            return Err(TimeError::NonContiguous {
                index: self.periods.len(),
                expected: tail.end(),
                actual: period.start(),
            });
        }
        self.periods.push(period);
        Ok(())
    }

    /// Prepends `period`, which must end where the chain currently starts.
    pub fn push_front(&mut self, period: P) -> Result<()> {
        if let Some(head) = self.periods.first()
            && head.start() != period.end()
        {
            return Err(TimeError::NonContiguous {
                index: 0,
                expected: head.start(),
                actual: period.end(),
            });
        }
        self.periods.insert(0, period);
        Ok(())
    }

    pub fn pop_back(&mut self) -> Option<P> {
        self.periods.pop()
    }

    pub fn pop_front(&mut self) -> Option<P> {
        if self.periods.is_empty() {
            None
        } else {
            Some(self.periods.remove(0))
        }
    }

    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&P> {
        self.periods.get(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.periods.iter()
    }

    pub fn first(&self) -> Option<&P> {
        self.periods.first()
    }

    pub fn last(&self) -> Option<&P> {
        self.periods.last()
    }

    pub fn start(&self) -> Option<Instant> {
        self.periods.first().map(Period::start)
    }

    pub fn end(&self) -> Option<Instant> {
        self.periods.last().map(Period::end)
    }

    /// The range from the first start to the last end.
    pub fn span(&self) -> Option<TimeRange> {
        TimeRange::new(self.start()?, self.end()?).ok()
    }

    /// Total chain length; zero when empty.
    pub fn duration(&self) -> Duration {
        self.span().map_or_else(Duration::zero, |span| span.duration())
    }

    pub fn into_collection(self) -> TimePeriodCollection<P> {
        self.periods.into()
    }
}

impl TimePeriodChain<TimeBlock> {
    /// Lays out consecutive blocks of the given durations starting at `start`.
    pub fn from_durations<I>(start: Instant, durations: I) -> Result<Self>
    where
        I: IntoIterator<Item = Duration>,
    {
        let mut chain = Self::new();
        let mut cursor = start;
        for duration in durations {
            let block = TimeBlock::new(cursor, duration)?;
            cursor = block.end();
            chain.add(block)?;
        }
        Ok(chain)
    }

    /// Appends a block of `duration` at the tail.
    ///
    /// Fails with `InvalidArgument` on an empty chain, which has no tail.
    pub fn append(&mut self, duration: Duration) -> Result<&TimeBlock> {
        let tail = self.end().ok_or_else(|| {
            TimeError::InvalidArgument("can not append to an empty chain".to_string())
        })?;
        self.add(TimeBlock::new(tail, duration)?)?;
        self.periods
            .last()
            .ok_or_else(|| TimeError::InvariantViolation("chain lost its tail".to_string()))
    }
}

impl<P: Period> Default for TimePeriodChain<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Period> TryFrom<Vec<P>> for TimePeriodChain<P> {
    type Error = TimeError;

    fn try_from(periods: Vec<P>) -> Result<Self> {
        Self::from_periods(periods)
    }
}

impl<'a, P> IntoIterator for &'a TimePeriodChain<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}
