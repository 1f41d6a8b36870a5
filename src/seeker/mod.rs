//! Offset searches over calendar granules.
//!
//! A seeker answers "which is the n-th matching day (or month) after this
//! one?". It is a [`VisitStrategy`](crate::visitor::VisitStrategy) that counts
//! accepted candidates in a [`SeekContext`] while the calendar visitor walks
//! from the start towards the filter's limits.

pub mod context;
pub mod day;
pub mod month;

pub use context::SeekContext;
pub use day::DaySeeker;
pub use month::MonthSeeker;

use crate::visitor::SeekDirection;
use tempora_types::{Period, TimeRange};

/// The range walked from `start` towards `limits` in `direction`.
///
/// Includes the start granule itself, which the seekers skip without counting.
/// `None` when the limits end before the start is reached.
pub(crate) fn search_range<P: Period + ?Sized>(
    start: &P,
    limits: &TimeRange,
    direction: SeekDirection,
) -> Option<TimeRange> {
    let range = match direction {
        SeekDirection::Forward => TimeRange::new(start.start(), limits.end()),
        SeekDirection::Backward => TimeRange::new(limits.start(), start.end()),
    };
    range.ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(d: u32) -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2020, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[test]
    fn test_search_range() {
        let start = TimeRange::new(at(4), at(5)).unwrap();
        let limits = TimeRange::new(at(1), at(10)).unwrap();

        let forward = search_range(&start, &limits, SeekDirection::Forward).unwrap();
        assert_eq!((forward.start(), forward.end()), (at(4), at(10)));

        let backward = search_range(&start, &limits, SeekDirection::Backward).unwrap();
        assert_eq!((backward.start(), backward.end()), (at(1), at(5)));

        let behind = TimeRange::new(at(1), at(3)).unwrap();
        assert!(search_range(&start, &behind, SeekDirection::Forward).is_none());
    }
}
