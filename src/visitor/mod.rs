//! Hierarchical calendar traversal.
//!
//! [`CalendarVisitor`] walks years, months, days and optionally hours covering
//! a range, depth-first, in the requested [`SeekDirection`]. It knows nothing
//! about filtering or counting: a [`VisitStrategy`] decides which subtrees to
//! enter and what to do with every leaf.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tempora::visitor::{CalendarVisitor, VisitOutcome, VisitStrategy};
//! use tempora::{Granule, SeekDirection, TimeRange};
//!
//! // Counts the days of a range.
//! struct DayCounter;
//!
//! impl VisitStrategy for DayCounter {
//!     type Context = u32;
//!
//!     fn on_visit(&self, _candidate: &Granule, count: &mut u32) -> bool {
//!         *count += 1;
//!         true
//!     }
//! }
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//! let range = TimeRange::new(day(1), day(11))?;
//!
//! let mut count = 0;
//! let report = CalendarVisitor::default().visit(&range, SeekDirection::Forward, &DayCounter, &mut count)?;
//! assert_eq!(count, 10);
//! assert_eq!(report.outcome, VisitOutcome::Exhausted);
//! # Ok::<(), tempora::TimeError>(())
//! ```

pub mod direction;
pub mod strategy;

pub use direction::{Ordered, SeekDirection};
pub use strategy::{Cancellable, Granularity, VisitStrategy};

use crate::calendar::{
    DayRange, GregorianCalendar, Granule, MonthRange, TimeCalendar, YearRange,
    YearRangeCollection,
};
use crate::error::{Result, TimeError};
use tempora_types::{Period, TimeRange};

/// Default ceiling on the number of granules a single walk may touch.
pub const DEFAULT_MAX_VISITS: u64 = 1_000_000;

/// How a walk, or one level of it, ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisitOutcome {
    /// The gate refused to enter the level
    Pruned,
    /// Every child was walked without the strategy finishing
    Exhausted,
    /// The strategy stopped the walk or reported it finished
    Stopped,
}

/// Per-level counters of a single walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VisitStats {
    pub years: u64,
    pub months: u64,
    pub days: u64,
    pub hours: u64,
    /// Leaf candidates handed to `on_visit`
    pub visits: u64,
    /// Subtrees refused by a gate
    pub pruned: u64,
}

impl VisitStats {
    /// Granules touched across all levels, the figure the visit ceiling applies to.
    pub fn touched(&self) -> u64 {
        self.years + self.months + self.days + self.hours
    }
}

/// Result of [`CalendarVisitor::visit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisitReport {
    pub outcome: VisitOutcome,
    pub stats: VisitStats,
}

/// Stateless, direction-aware calendar traversal engine.
///
/// One visitor can be shared freely: every walk keeps its progress in a local
/// walker and in the caller's context.
#[derive(Debug, Clone)]
pub struct CalendarVisitor<C = GregorianCalendar> {
    calendar: C,
    max_visits: Option<u64>,
}

impl<C: TimeCalendar> CalendarVisitor<C> {
    pub fn new(calendar: C) -> Self {
        Self {
            calendar,
            max_visits: Some(DEFAULT_MAX_VISITS),
        }
    }

    /// Sets the ceiling on touched granules; `None` removes it.
    pub fn with_max_visits(mut self, max_visits: Option<u64>) -> Self {
        self.max_visits = max_visits;
        self
    }

    pub fn calendar(&self) -> &C {
        &self.calendar
    }

    pub fn max_visits(&self) -> Option<u64> {
        self.max_visits
    }

    /// Walks every granule strictly overlapping `range` in `direction`.
    ///
    /// Returns `Err` only when the visit ceiling is exceeded or the strategy
    /// breaks its contract; a walk that simply finds nothing is `Exhausted`.
    pub fn visit<S>(
        &self,
        range: &TimeRange,
        direction: SeekDirection,
        strategy: &S,
        context: &mut S::Context,
    ) -> Result<VisitReport>
    where
        S: VisitStrategy + ?Sized,
    {
        let years = YearRangeCollection::covering(range, &self.calendar);
        let mut walker = Walker {
            calendar: &self.calendar,
            strategy,
            range: *range,
            direction,
            granularity: strategy.granularity(),
            max_visits: self.max_visits,
            stats: VisitStats::default(),
        };

        let outcome = walker.walk_years(&years, context)?;
        log::debug!(
            "visited {} {:?}: {:?} after {} granules, {} candidates",
            range,
            direction,
            outcome,
            walker.stats.touched(),
            walker.stats.visits
        );

        Ok(VisitReport {
            outcome,
            stats: walker.stats,
        })
    }
}

impl Default for CalendarVisitor<GregorianCalendar> {
    fn default() -> Self {
        Self::new(GregorianCalendar::default())
    }
}

/// State of one walk. Lives only for the duration of `visit`.
struct Walker<'a, C: ?Sized, S: ?Sized> {
    calendar: &'a C,
    strategy: &'a S,
    range: TimeRange,
    direction: SeekDirection,
    granularity: Granularity,
    max_visits: Option<u64>,
    stats: VisitStats,
}

impl<C, S> Walker<'_, C, S>
where
    C: TimeCalendar + ?Sized,
    S: VisitStrategy + ?Sized,
{
    /// Checked before each granule is counted, so at most `max_visits`
    /// granules are ever touched.
    fn touch(&self) -> Result<()> {
        if let Some(limit) = self.max_visits
            && self.stats.touched() >= limit
        {
            log::warn!(
                "calendar walk over {} exceeded {} granules; aborting",
                self.range,
                limit
            );
            return Err(TimeError::VisitLimitExceeded { limit });
        }
        Ok(())
    }

    /// Maps a finished child level onto the parent's next step.
    fn after_child(&self, outcome: VisitOutcome, context: &S::Context) -> Option<VisitOutcome> {
        match outcome {
            VisitOutcome::Stopped => Some(VisitOutcome::Stopped),
            _ if self.strategy.is_finished(context) => Some(VisitOutcome::Stopped),
            _ => None,
        }
    }

    fn walk_years(
        &mut self,
        years: &YearRangeCollection,
        context: &mut S::Context,
    ) -> Result<VisitOutcome> {
        if !self.strategy.enter_years(years, context) {
            self.stats.pruned += 1;
            return Ok(VisitOutcome::Pruned);
        }

        for number in self.direction.order(years.years()) {
            let Ok(year) = YearRange::new(number, self.calendar) else {
                continue;
            };
            if !year.overlaps(&self.range) {
                continue;
            }
            self.touch()?;
            self.stats.years += 1;

            let outcome = self.walk_months(&year, context)?;
            if let Some(exit) = self.after_child(outcome, context) {
                return Ok(exit);
            }
        }
        Ok(VisitOutcome::Exhausted)
    }

    fn walk_months(&mut self, year: &YearRange, context: &mut S::Context) -> Result<VisitOutcome> {
        if !self.strategy.enter_months(year, context) {
            log::trace!("pruned year {}", year.year());
            self.stats.pruned += 1;
            return Ok(VisitOutcome::Pruned);
        }

        let months = year.months(self.calendar);
        for month in self.direction.order(months.into_iter()) {
            if !month.overlaps(&self.range) {
                continue;
            }
            self.touch()?;
            self.stats.months += 1;

            let outcome = match self.granularity {
                Granularity::Month => self.visit_leaf(Granule::Month(month), context)?,
                Granularity::Day | Granularity::Hour => self.walk_days(&month, context)?,
            };
            if let Some(exit) = self.after_child(outcome, context) {
                return Ok(exit);
            }
        }
        Ok(VisitOutcome::Exhausted)
    }

    fn walk_days(&mut self, month: &MonthRange, context: &mut S::Context) -> Result<VisitOutcome> {
        if !self.strategy.enter_days(month, context) {
            log::trace!("pruned month {}", month);
            self.stats.pruned += 1;
            return Ok(VisitOutcome::Pruned);
        }

        let days = month.days(self.calendar);
        for day in self.direction.order(days.into_iter()) {
            if !day.overlaps(&self.range) {
                continue;
            }
            self.touch()?;
            self.stats.days += 1;

            let outcome = match self.granularity {
                Granularity::Hour => self.walk_hours(&day, context)?,
                Granularity::Day | Granularity::Month => {
                    self.visit_leaf(Granule::Day(day), context)?
                }
            };
            if let Some(exit) = self.after_child(outcome, context) {
                return Ok(exit);
            }
        }
        Ok(VisitOutcome::Exhausted)
    }

    fn walk_hours(&mut self, day: &DayRange, context: &mut S::Context) -> Result<VisitOutcome> {
        if !self.strategy.enter_hours(day, context) {
            self.stats.pruned += 1;
            return Ok(VisitOutcome::Pruned);
        }

        let hours = day.hours();
        for hour in self.direction.order(hours.into_iter()) {
            if !hour.overlaps(&self.range) {
                continue;
            }
            self.touch()?;
            self.stats.hours += 1;

            let outcome = self.visit_leaf(Granule::Hour(hour), context)?;
            if let Some(exit) = self.after_child(outcome, context) {
                return Ok(exit);
            }
        }
        Ok(VisitOutcome::Exhausted)
    }

    fn visit_leaf(&mut self, candidate: Granule, context: &mut S::Context) -> Result<VisitOutcome> {
        self.stats.visits += 1;
        let keep_going = self.strategy.on_visit(&candidate, context);

        if !keep_going {
            return Ok(VisitOutcome::Stopped);
        }
        if self.strategy.is_finished(context) {
            return Err(TimeError::InvariantViolation(format!(
                "visit of {} asked to continue after the strategy finished",
                candidate.to_range()
            )));
        }
        Ok(VisitOutcome::Exhausted)
    }
}
