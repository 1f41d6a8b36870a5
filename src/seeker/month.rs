use super::{SeekContext, search_range};
use crate::calendar::{GregorianCalendar, Granule, MonthRange, TimeCalendar, YearRange};
use crate::error::Result;
use crate::filter::RelationFilter;
use crate::visitor::{CalendarVisitor, Granularity, SeekDirection, VisitStrategy};
use chrono::Month;
use tempora_types::Period;

/// Finds the n-th matching month relative to a start month.
///
/// Same contract as [`DaySeeker`](super::DaySeeker): the start is never
/// counted, a negative offset flips the direction and exhausted limits give
/// `Ok(None)`. Weekday, day-of-month and hour sets of the filter do not apply
/// to months.
#[derive(Debug, Clone)]
pub struct MonthSeeker<C = GregorianCalendar> {
    visitor: CalendarVisitor<C>,
    filter: RelationFilter,
    direction: SeekDirection,
}

impl MonthSeeker<GregorianCalendar> {
    pub fn new(filter: RelationFilter, direction: SeekDirection) -> Self {
        Self::with_calendar(GregorianCalendar::default(), filter, direction)
    }
}

impl<C: TimeCalendar> MonthSeeker<C> {
    pub fn with_calendar(calendar: C, filter: RelationFilter, direction: SeekDirection) -> Self {
        Self::with_visitor(CalendarVisitor::new(calendar), filter, direction)
    }

    pub fn with_visitor(
        visitor: CalendarVisitor<C>,
        filter: RelationFilter,
        direction: SeekDirection,
    ) -> Self {
        Self {
            visitor,
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

    pub fn direction(&self) -> SeekDirection {
        self.direction
    }

    pub fn calendar(&self) -> &C {
        self.visitor.calendar()
    }

    pub fn find(&self, start: &MonthRange, offset: i64) -> Result<Option<MonthRange>> {
        if offset == 0 {
            return Ok(Some(*start));
        }

        let direction = self.direction.for_offset(offset);
        let Some(range) = search_range(start, self.filter.limits(), direction) else {
            return Ok(None);
        };

        let mut context = SeekContext::new(*start, offset.unsigned_abs());
        let report = self.visitor.visit(&range, direction, self, &mut context)?;
        log::trace!(
            "month seek from {} by {}: {:?}",
            start,
            offset,
            report.outcome
        );
        Ok(context.into_found())
    }

    /// Seeks from `month` of calendar year `year`.
    pub fn find_month(&self, year: i32, month: Month, offset: i64) -> Result<Option<MonthRange>> {
        let start = MonthRange::new(year, month, self.calendar())?;
        self.find(&start, offset)
    }
}

impl<C: TimeCalendar> VisitStrategy for MonthSeeker<C> {
    type Context = SeekContext<MonthRange>;

    fn granularity(&self) -> Granularity {
        Granularity::Month
    }

    fn enter_months(&self, year: &YearRange, context: &Self::Context) -> bool {
        !context.is_finished() && self.filter.matches_year(year)
    }

    fn on_visit(&self, candidate: &Granule, context: &mut Self::Context) -> bool {
        if context.is_finished() {
            return false;
        }
        let Some(month) = candidate.as_month() else {
            return true;
        };
        if month.is_same_period(context.start_granule())
            || !self.filter.matches_month(month)
            || self.filter.is_excluded(month)
            || !self.filter.within_limits(month)
        {
            return true;
        }

        context.process_candidate(*month);
        !context.is_finished()
    }

    fn is_finished(&self, context: &Self::Context) -> bool {
        context.is_finished()
    }
}
