//! Gathers every matching granule of a range.

use crate::calendar::{
    DayRange, GregorianCalendar, Granule, MonthRange, TimeCalendar, YearRange,
};
use crate::error::Result;
use crate::filter::RelationFilter;
use crate::periods::TimePeriodCollection;
use crate::visitor::{CalendarVisitor, Granularity, SeekDirection, VisitStrategy};
use tempora_types::{Period, TimeRange};

/// Collects the months, days or hours of a range that pass a filter.
///
/// The range is clipped to the filter's limits first. Results come in
/// traversal order, so a `Backward` collector yields the latest granule first.
///
/// ```
/// use chrono::NaiveDate;
/// use tempora::{CalendarPeriodCollector, Period, RelationFilter, SeekDirection, TimeRange};
///
/// let at = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let collector = CalendarPeriodCollector::new(RelationFilter::new().working_days(), SeekDirection::Forward);
///
/// let days = collector.collect_days(&TimeRange::new(at(6), at(20))?)?;
/// assert_eq!(days.len(), 10);
/// assert_eq!(days.get(5).map(|d| d.start()), Some(at(13)));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CalendarPeriodCollector<C = GregorianCalendar> {
    visitor: CalendarVisitor<C>,
    filter: RelationFilter,
    direction: SeekDirection,
}

impl CalendarPeriodCollector<GregorianCalendar> {
    pub fn new(filter: RelationFilter, direction: SeekDirection) -> Self {
        Self::with_calendar(GregorianCalendar::default(), filter, direction)
    }
}

impl<C: TimeCalendar> CalendarPeriodCollector<C> {
    pub fn with_calendar(calendar: C, filter: RelationFilter, direction: SeekDirection) -> Self {
        Self {
            visitor: CalendarVisitor::new(calendar),
            filter,
            direction,
        }
    }

    pub fn with_max_visits(mut self, max_visits: Option<u64>) -> Self {
        self.visitor = self.visitor.with_max_visits(max_visits);
        self
    }

    pub fn filter(&self) -> &RelationFilter {
        &self.filter
    }

    pub fn collect_months(&self, range: &TimeRange) -> Result<TimePeriodCollection<TimeRange>> {
        self.collect(range, Granularity::Month)
    }

    pub fn collect_days(&self, range: &TimeRange) -> Result<TimePeriodCollection<TimeRange>> {
        self.collect(range, Granularity::Day)
    }

    pub fn collect_hours(&self, range: &TimeRange) -> Result<TimePeriodCollection<TimeRange>> {
        self.collect(range, Granularity::Hour)
    }

    fn collect(
        &self,
        range: &TimeRange,
        granularity: Granularity,
    ) -> Result<TimePeriodCollection<TimeRange>> {
        let mut collected = TimePeriodCollection::new();
        let Some(clipped) = range.intersects(self.filter.limits()) else {
            return Ok(collected);
        };

        let strategy = Collect {
            filter: &self.filter,
            range: clipped,
            granularity,
        };
        let report = self
            .visitor
            .visit(&clipped, self.direction, &strategy, &mut collected)?;
        log::debug!(
            "collected {} {:?} granules of {} in {} visits",
            collected.len(),
            granularity,
            clipped,
            report.stats.visits
        );
        Ok(collected)
    }
}

struct Collect<'a> {
    filter: &'a RelationFilter,
    range: TimeRange,
    granularity: Granularity,
}

impl VisitStrategy for Collect<'_> {
    type Context = TimePeriodCollection<TimeRange>;

    fn granularity(&self) -> Granularity {
        self.granularity
    }

    fn enter_months(&self, year: &YearRange, _context: &Self::Context) -> bool {
        self.filter.matches_year(year)
    }

    fn enter_days(&self, month: &MonthRange, _context: &Self::Context) -> bool {
        self.filter.matches_month(month)
    }

    fn enter_hours(&self, day: &DayRange, _context: &Self::Context) -> bool {
        self.filter.matches_day(day)
    }

    fn on_visit(&self, candidate: &Granule, collected: &mut Self::Context) -> bool {
        if self.range.has_inside_period(candidate) && self.filter.accepts(candidate) {
            collected.add(candidate.to_range());
        }
        true
    }
}
