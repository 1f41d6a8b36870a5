use crate::range::TimeRange;
use crate::relation::Relation;
use chrono::{NaiveDateTime, TimeDelta};

/// A single point in time. Zone-free; callers supply instants.
pub type Instant = NaiveDateTime;

/// A span of elapsed time.
pub type Duration = TimeDelta;

/// Smallest representable instant, used as the open start of `Anytime`.
pub const MIN_INSTANT: Instant = NaiveDateTime::MIN;

/// Largest representable instant, used as the open end of `Anytime`.
pub const MAX_INSTANT: Instant = NaiveDateTime::MAX;

/// The capability shared by every time interval.
///
/// Implementors only provide [`start`](Period::start) and [`end`](Period::end);
/// everything else is derived. Implementors must uphold `start() <= end()`.
///
/// Boundaries are treated as closed by the containment queries
/// ([`has_inside`](Period::has_inside), [`intersects_with`](Period::intersects_with)),
/// while [`overlaps`](Period::overlaps) is strict: two periods that only touch
/// at a boundary intersect but do not overlap.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tempora_types::{Period, TimeRange};
///
/// let at = |h| NaiveDate::from_ymd_opt(2020, 1, 10).unwrap().and_hms_opt(h, 0, 0).unwrap();
///
/// let morning = TimeRange::new(at(8), at(12))?;
/// let afternoon = TimeRange::new(at(12), at(17))?;
///
/// assert!(!morning.overlaps(&afternoon));
/// assert!(morning.intersects_with(&afternoon));
/// assert!(morning.intersects(&afternoon).unwrap().is_moment());
/// # Ok::<(), tempora_types::PeriodError>(())
/// ```
pub trait Period {
    fn start(&self) -> Instant;

    fn end(&self) -> Instant;

    fn duration(&self) -> Duration {
        self.end().signed_duration_since(self.start())
    }

    /// True when start and end coincide.
    fn is_moment(&self) -> bool {
        self.start() == self.end()
    }

    fn has_start(&self) -> bool {
        self.start() != MIN_INSTANT
    }

    fn has_end(&self) -> bool {
        self.end() != MAX_INSTANT
    }

    /// True for the unbounded `[MIN, MAX]` sentinel.
    fn is_anytime(&self) -> bool {
        !self.has_start() && !self.has_end()
    }

    /// Whether `moment` lies within the closed interval `[start, end]`.
    fn has_inside(&self, moment: Instant) -> bool {
        moment >= self.start() && moment <= self.end()
    }

    /// Whether `other` lies entirely within this period, boundaries included.
    fn has_inside_period<P: Period + ?Sized>(&self, other: &P) -> bool {
        self.has_inside(other.start()) && self.has_inside(other.end())
    }

    /// Start and end are both equal.
    fn is_same_period<P: Period + ?Sized>(&self, other: &P) -> bool {
        self.start() == other.start() && self.end() == other.end()
    }

    /// Strict overlap: the periods share more than a boundary.
    ///
    /// Agrees with [`Relation::is_overlapping`](crate::Relation::is_overlapping),
    /// so a moment overlaps only an identical moment.
    fn overlaps<P: Period + ?Sized>(&self, other: &P) -> bool {
        if self.is_same_period(other) {
            return true;
        }
        if self.is_moment() || other.is_moment() {
            return false;
        }
        self.start() < other.end() && other.start() < self.end()
    }

    /// Closed intersection test: touching periods intersect.
    fn intersects_with<P: Period + ?Sized>(&self, other: &P) -> bool {
        self.start() <= other.end() && other.start() <= self.end()
    }

    /// The common sub-range of both periods, or `None` when they are disjoint.
    ///
    /// Periods that only touch yield a moment at the shared boundary.
    fn intersects<P: Period + ?Sized>(&self, other: &P) -> Option<TimeRange> {
        if !self.intersects_with(other) {
            return None;
        }
        let start = self.start().max(other.start());
        let end = self.end().min(other.end());
        TimeRange::new(start, end).ok()
    }

    /// Classifies how `reference` stands relative to this period.
    ///
    /// See [`Relation`] for the exact classification order.
    fn relation_to<P: Period + ?Sized>(&self, reference: &P) -> Relation {
        Relation::classify(self, reference)
    }

    /// Copies the boundaries into a plain [`TimeRange`].
    fn to_range(&self) -> TimeRange {
        TimeRange::from_trusted(self.start(), self.end())
    }
}

impl<P: Period + ?Sized> Period for &P {
    fn start(&self) -> Instant {
        (**self).start()
    }

    fn end(&self) -> Instant {
        (**self).end()
    }
}
