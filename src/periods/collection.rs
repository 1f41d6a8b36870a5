//! Insertion-ordered collection of periods.

use serde::{Deserialize, Serialize};
use tempora_types::{Duration, Instant, Period, Relation, TimeRange};

/// An ordered sequence of periods.
///
/// Order is whatever the caller inserted; nothing is re-sorted unless
/// [`sort_by_start`](TimePeriodCollection::sort_by_start) is called explicitly.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tempora::{Period, TimePeriodCollection, TimeRange};
///
/// let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
///
/// let mut holidays = TimePeriodCollection::new();
/// holidays.add(TimeRange::new(day(20), day(21))?);
/// holidays.add(TimeRange::new(day(1), day(2))?);
///
/// assert_eq!(holidays.min_start(), Some(day(1)));
/// assert_eq!(holidays.max_end(), Some(day(21)));
/// assert_eq!(holidays.get(0).unwrap().start(), day(20));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TimePeriodCollection<P = TimeRange> {
    periods: Vec<P>,
}

impl<P: Period> TimePeriodCollection<P> {
    pub fn new() -> Self {
        Self {
            periods: Vec::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            periods: Vec::with_capacity(capacity),
        }
    }

    /// Appends `period` at the end.
    pub fn add(&mut self, period: P) {
        self.periods.push(period);
    }

    /// Inserts at `index`, clamped to the current length.
    pub fn insert(&mut self, index: usize, period: P) {
        let index = index.min(self.periods.len());
        self.periods.insert(index, period);
    }

    pub fn remove(&mut self, index: usize) -> Option<P> {
        if index < self.periods.len() {
            Some(self.periods.remove(index))
        } else {
            None
        }
    }

    pub fn clear(&mut self) {
        self.periods.clear();
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

    pub fn as_slice(&self) -> &[P] {
        &self.periods
    }

    /// Earliest start across all periods.
    pub fn min_start(&self) -> Option<Instant> {
        self.periods.iter().map(Period::start).min()
    }

    /// Latest end across all periods.
    pub fn max_end(&self) -> Option<Instant> {
        self.periods.iter().map(Period::end).max()
    }

    /// `[min_start, max_end]`, or `None` when empty.
    pub fn span(&self) -> Option<TimeRange> {
        let start = self.min_start()?;
        let end = self.max_end()?;
        TimeRange::new(start, end).ok()
    }

    /// Sum of the individual durations; overlapping time is counted twice.
    ///
    /// Returns `None` if the sum overflows.
    pub fn total_duration(&self) -> Option<Duration> {
        self.periods
            .iter()
            .try_fold(Duration::zero(), |total, p| total.checked_add(&p.duration()))
    }

    /// Whether any period overlaps `period`.
    pub fn has_overlapping<Q: Period + ?Sized>(&self, period: &Q) -> bool {
        self.periods.iter().any(|p| p.overlaps(period))
    }

    /// Periods overlapping `period`, in collection order.
    pub fn overlapping<Q: Period + ?Sized>(&self, period: &Q) -> Vec<&P> {
        self.periods.iter().filter(|p| p.overlaps(period)).collect()
    }

    /// Periods intersecting `period`, touching ones included.
    pub fn intersecting<Q: Period + ?Sized>(&self, period: &Q) -> Vec<&P> {
        self.periods
            .iter()
            .filter(|p| p.intersects_with(period))
            .collect()
    }

    /// Periods whose relation to `reference` is `relation`.
    pub fn with_relation<Q: Period + ?Sized>(&self, reference: &Q, relation: Relation) -> Vec<&P> {
        self.periods
            .iter()
            .filter(|p| p.relation_to(reference) == relation)
            .collect()
    }

    /// True if at least two periods overlap each other.
    pub fn has_overlaps(&self) -> bool {
        let mut sorted: Vec<&P> = self.periods.iter().collect();
        sorted.sort_by_key(|p| (p.start(), p.end()));

        // Compare each period against the furthest-reaching one seen so far.
        let mut reach: Option<&P> = None;
        for period in sorted {
            match reach {
                Some(furthest) if furthest.overlaps(period) => return true,
                Some(furthest) if period.end() <= furthest.end() => {}
                _ => reach = Some(period),
            }
        }
        false
    }

    /// True if the union of all periods leaves a hole inside [`span`](Self::span).
    pub fn has_gaps(&self) -> bool {
        let mut sorted: Vec<&P> = self.periods.iter().collect();
        sorted.sort_by_key(|p| p.start());
        let mut covered_until: Option<Instant> = None;
        for period in sorted {
            match covered_until {
                Some(end) if period.start() > end => return true,
                Some(end) => covered_until = Some(end.max(period.end())),
                None => covered_until = Some(period.end()),
            }
        }
        false
    }

    /// Sorts by start, then end. Stable for equal periods.
    pub fn sort_by_start(&mut self) {
        self.periods.sort_by_key(|p| (p.start(), p.end()));
    }
}

impl<P: Period> Default for TimePeriodCollection<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Period> FromIterator<P> for TimePeriodCollection<P> {
    fn from_iter<I: IntoIterator<Item = P>>(iter: I) -> Self {
        Self {
            periods: iter.into_iter().collect(),
        }
    }
}

impl<P: Period> Extend<P> for TimePeriodCollection<P> {
    fn extend<I: IntoIterator<Item = P>>(&mut self, iter: I) {
        self.periods.extend(iter);
    }
}

impl<P> IntoIterator for TimePeriodCollection<P> {
    type Item = P;
    type IntoIter = std::vec::IntoIter<P>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.into_iter()
    }
}

impl<'a, P> IntoIterator for &'a TimePeriodCollection<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.periods.iter()
    }
}

impl<P> From<Vec<P>> for TimePeriodCollection<P> {
    fn from(periods: Vec<P>) -> Self {
        Self { periods }
    }
}
