//! Hooks a traversal client plugs into the calendar visitor.

use crate::calendar::{DayRange, Granule, MonthRange, YearRange, YearRangeCollection};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};

/// The calendar level at which [`VisitStrategy::on_visit`] is called.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Month,
    #[default]
    Day,
    Hour,
}

/// Entry gates and the leaf visit hook driving a [`CalendarVisitor`](super::CalendarVisitor).
///
/// The strategy itself is shared (`&self`); everything that changes during a
/// walk lives in the per-call `Context`, which the visitor threads through every
/// hook explicitly.
///
/// Gates return `false` to prune the level below without visiting any of its
/// children. A strategy that is done must prune every gate and return `false`
/// from `on_visit`; returning `true` after `is_finished` reports `true` is an
/// invariant violation.
pub trait VisitStrategy {
    type Context;

    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn enter_years(&self, _years: &YearRangeCollection, _context: &Self::Context) -> bool {
        true
    }

    fn enter_months(&self, _year: &YearRange, _context: &Self::Context) -> bool {
        true
    }

    fn enter_days(&self, _month: &MonthRange, _context: &Self::Context) -> bool {
        true
    }

    fn enter_hours(&self, _day: &DayRange, _context: &Self::Context) -> bool {
        true
    }

    /// Called for every leaf candidate. `true` continues, `false` stops the walk.
    fn on_visit(&self, candidate: &Granule, context: &mut Self::Context) -> bool;

    /// Consulted between sibling subtrees so a finished walk ends early.
    fn is_finished(&self, _context: &Self::Context) -> bool {
        false
    }
}

impl<S: VisitStrategy + ?Sized> VisitStrategy for &S {
    type Context = S::Context;

    fn granularity(&self) -> Granularity {
        (**self).granularity()
    }

    fn enter_years(&self, years: &YearRangeCollection, context: &Self::Context) -> bool {
        (**self).enter_years(years, context)
    }

    fn enter_months(&self, year: &YearRange, context: &Self::Context) -> bool {
        (**self).enter_months(year, context)
    }

    fn enter_days(&self, month: &MonthRange, context: &Self::Context) -> bool {
        (**self).enter_days(month, context)
    }

    fn enter_hours(&self, day: &DayRange, context: &Self::Context) -> bool {
        (**self).enter_hours(day, context)
    }

    fn on_visit(&self, candidate: &Granule, context: &mut Self::Context) -> bool {
        (**self).on_visit(candidate, context)
    }

    fn is_finished(&self, context: &Self::Context) -> bool {
        (**self).is_finished(context)
    }
}

/// Wraps a strategy so an externally owned flag can abort the walk.
///
/// Once the flag is set every gate prunes and the next visit stops. The walk
/// then ends as `Pruned` or `Stopped` without touching the context.
///
/// ```
/// use chrono::NaiveDate;
/// use std::sync::atomic::{AtomicBool, Ordering};
/// use tempora::{DayRange, DaySeeker, RelationFilter, SeekDirection};
///
/// let cancel = AtomicBool::new(false);
/// let seeker = DaySeeker::new(RelationFilter::new(), SeekDirection::Forward);
/// let start = DayRange::new(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap())?;
///
/// assert_eq!(seeker.find_cancellable(&start, 1, &cancel)?, start.next());
///
/// cancel.store(true, Ordering::Relaxed);
/// assert_eq!(seeker.find_cancellable(&start, 1, &cancel)?, None);
/// # Ok::<(), tempora::TimeError>(())
/// ```
pub struct Cancellable<'a, S> {
    inner: S,
    cancelled: &'a AtomicBool,
}

impl<'a, S: VisitStrategy> Cancellable<'a, S> {
    pub fn new(inner: S, cancelled: &'a AtomicBool) -> Self {
        Self { inner, cancelled }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

impl<S: VisitStrategy> VisitStrategy for Cancellable<'_, S> {
    type Context = S::Context;

    fn granularity(&self) -> Granularity {
        self.inner.granularity()
    }

    fn enter_years(&self, years: &YearRangeCollection, context: &Self::Context) -> bool {
        !self.is_cancelled() && self.inner.enter_years(years, context)
    }

    fn enter_months(&self, year: &YearRange, context: &Self::Context) -> bool {
        !self.is_cancelled() && self.inner.enter_months(year, context)
    }

    fn enter_days(&self, month: &MonthRange, context: &Self::Context) -> bool {
        !self.is_cancelled() && self.inner.enter_days(month, context)
    }

    fn enter_hours(&self, day: &DayRange, context: &Self::Context) -> bool {
        !self.is_cancelled() && self.inner.enter_hours(day, context)
    }

    fn on_visit(&self, candidate: &Granule, context: &mut Self::Context) -> bool {
        !self.is_cancelled() && self.inner.on_visit(candidate, context)
    }

    fn is_finished(&self, context: &Self::Context) -> bool {
        self.inner.is_finished(context)
    }
}
