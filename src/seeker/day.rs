use super::{SeekContext, search_range};
use crate::calendar::{
    DayRange, GregorianCalendar, Granule, MonthRange, TimeCalendar, YearRange,
    YearRangeCollection,
};
use crate::error::Result;
use crate::filter::RelationFilter;
use crate::visitor::{CalendarVisitor, Cancellable, Granularity, SeekDirection, VisitStrategy};
use chrono::NaiveDate;
use std::sync::atomic::AtomicBool;
use tempora_types::Period;

/// Finds the n-th matching day relative to a start day.
///
/// The seeker holds only configuration. Every `find` builds its own
/// [`SeekContext`], so one instance can serve concurrent calls.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use tempora::{DaySeeker, RelationFilter, SeekDirection};
///
/// let seeker = DaySeeker::new(RelationFilter::new().working_days(), SeekDirection::Forward);
/// let friday = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
///
/// let next = seeker.find_date(friday, 1)?;
/// assert_eq!(next, NaiveDate::from_ymd_opt(2020, 1, 13));
///
/// let previous = seeker.find_date(friday, -5)?;
/// assert_eq!(previous, NaiveDate::from_ymd_opt(2020, 1, 3));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct DaySeeker<C = GregorianCalendar> {
    visitor: CalendarVisitor<C>,
    filter: RelationFilter,
    direction: SeekDirection,
}

impl DaySeeker<GregorianCalendar> {
    pub fn new(filter: RelationFilter, direction: SeekDirection) -> Self {
        Self::with_calendar(GregorianCalendar::default(), filter, direction)
    }
}

impl<C: TimeCalendar> DaySeeker<C> {
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

    /// Sets the visit ceiling of every walk; `None` removes it.
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

    /// The `offset`-th matching day after `start` in the seeker's direction.
    ///
    /// A negative offset searches the opposite way. `start` itself is never
    /// counted. Returns `Ok(None)` when the limits are exhausted first.
    pub fn find(&self, start: &DayRange, offset: i64) -> Result<Option<DayRange>> {
        self.seek(self, start, offset)
    }

    pub fn find_date(&self, start: NaiveDate, offset: i64) -> Result<Option<NaiveDate>> {
        let start = DayRange::new(start)?;
        Ok(self.find(&start, offset)?.map(|day| day.date()))
    }

    /// Like [`find`](Self::find), giving up with `Ok(None)` once `cancelled` is set.
    pub fn find_cancellable(
        &self,
        start: &DayRange,
        offset: i64,
        cancelled: &AtomicBool,
    ) -> Result<Option<DayRange>> {
        self.seek(&Cancellable::new(self, cancelled), start, offset)
    }

    fn seek<S>(&self, strategy: &S, start: &DayRange, offset: i64) -> Result<Option<DayRange>>
    where
        S: VisitStrategy<Context = SeekContext<DayRange>>,
    {
        if offset == 0 {
            return Ok(Some(*start));
        }

        let direction = self.direction.for_offset(offset);
        let Some(range) = search_range(start, self.filter.limits(), direction) else {
            log::debug!("day seek from {} starts outside the limits", start);
            return Ok(None);
        };

        let mut context = SeekContext::new(*start, offset.unsigned_abs());
        let report = self.visitor.visit(&range, direction, strategy, &mut context)?;
        log::trace!(
            "day seek from {} by {}: {:?}, {} candidates",
            start,
            offset,
            report.outcome,
            report.stats.visits
        );
        Ok(context.into_found())
    }
}

impl<C: TimeCalendar> VisitStrategy for DaySeeker<C> {
    type Context = SeekContext<DayRange>;

    fn granularity(&self) -> Granularity {
        Granularity::Day
    }

    fn enter_years(&self, _years: &YearRangeCollection, context: &Self::Context) -> bool {
        !context.is_finished()
    }

    fn enter_months(&self, year: &YearRange, context: &Self::Context) -> bool {
        !context.is_finished() && self.filter.matches_year(year)
    }

    fn enter_days(&self, month: &MonthRange, context: &Self::Context) -> bool {
        !context.is_finished() && self.filter.matches_month(month)
    }

    fn enter_hours(&self, _day: &DayRange, _context: &Self::Context) -> bool {
        false
    }

    fn on_visit(&self, candidate: &Granule, context: &mut Self::Context) -> bool {
        if context.is_finished() {
            return false;
        }
        let Some(day) = candidate.as_day() else {
            return true;
        };
        if day.is_same_period(context.start_granule()) {
            return true;
        }
        if !self.filter.matches_day(day)
            || self.filter.is_excluded(day)
            || !self.filter.within_limits(day)
        {
            return true;
        }

        context.process_candidate(*day);
        !context.is_finished()
    }

    fn is_finished(&self, context: &Self::Context) -> bool {
        context.is_finished()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimeError;
    use chrono::{Datelike, Month, Weekday};
    use tempora_types::TimeRange;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn day(y: i32, m: u32, d: u32) -> DayRange {
        DayRange::new(date(y, m, d)).unwrap()
    }

    fn limits(from: NaiveDate, to: NaiveDate) -> TimeRange {
        TimeRange::new(
            from.and_hms_opt(0, 0, 0).unwrap(),
            to.and_hms_opt(0, 0, 0).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn test_zero_offset_returns_start() {
        let seeker = DaySeeker::new(RelationFilter::new().working_days(), SeekDirection::Forward);
        // A Saturday is returned as-is even though it does not match
        let saturday = day(2020, 1, 11);
        assert_eq!(seeker.find(&saturday, 0).unwrap(), Some(saturday));
    }

    #[test]
    fn test_skips_weekend() {
        let seeker = DaySeeker::new(RelationFilter::new().working_days(), SeekDirection::Forward);
        assert_eq!(seeker.find(&day(2020, 1, 10), 1).unwrap(), Some(day(2020, 1, 13)));
        assert_eq!(seeker.find(&day(2020, 1, 13), -1).unwrap(), Some(day(2020, 1, 10)));
    }

    #[test]
    fn test_backward_direction_flips_with_negative_offset() {
        let seeker = DaySeeker::new(RelationFilter::new(), SeekDirection::Backward);
        assert_eq!(seeker.find(&day(2020, 3, 1), 1).unwrap(), Some(day(2020, 2, 29)));
        assert_eq!(seeker.find(&day(2020, 3, 1), -1).unwrap(), Some(day(2020, 3, 2)));
    }

    #[test]
    fn test_exhausted_limits_is_none() {
        let filter = RelationFilter::new().with_limits(limits(date(2020, 1, 1), date(2020, 1, 5)));
        let seeker = DaySeeker::new(filter, SeekDirection::Forward);
        assert_eq!(seeker.find(&day(2020, 1, 4), 2).unwrap(), None);
        assert_eq!(seeker.find(&day(2020, 1, 3), 1).unwrap(), Some(day(2020, 1, 4)));
    }

    #[test]
    fn test_start_outside_limits() {
        let filter = RelationFilter::new().with_limits(limits(date(2020, 1, 1), date(2020, 1, 5)));
        let seeker = DaySeeker::new(filter, SeekDirection::Forward);
        assert_eq!(seeker.find(&day(2020, 2, 1), 1).unwrap(), None);
        // Walking back into the limits finds their last day
        assert_eq!(seeker.find(&day(2020, 2, 1), -1).unwrap(), Some(day(2020, 1, 4)));
    }

    #[test]
    fn test_excluded_days_are_not_counted() {
        let filter = RelationFilter::new()
            .working_days()
            .exclude(&day(2020, 1, 13));
        let seeker = DaySeeker::new(filter, SeekDirection::Forward);
        assert_eq!(seeker.find(&day(2020, 1, 10), 1).unwrap(), Some(day(2020, 1, 14)));
    }

    #[test]
    fn test_month_gate_crosses_years() {
        let filter = RelationFilter::new().with_months([Month::February]);
        let seeker = DaySeeker::new(filter, SeekDirection::Forward);
        let found = seeker.find(&day(2020, 2, 28), 2).unwrap().unwrap();
        assert_eq!(found, day(2021, 2, 1));
    }

    #[test]
    fn test_crosses_fiscal_year_boundary() {
        let calendar = GregorianCalendar::default().with_year_base_month(Month::April);
        let filter = RelationFilter::new().with_days([1]);
        let seeker = DaySeeker::with_calendar(calendar, filter, SeekDirection::Forward);

        let found = seeker.find(&day(2021, 3, 15), 1).unwrap();
        assert_eq!(found, Some(day(2021, 4, 1)));
        let found = seeker.find(&day(2021, 4, 1), -2).unwrap();
        assert_eq!(found, Some(day(2021, 2, 1)));
    }

    #[test]
    fn test_never_matching_filter_hits_ceiling() {
        // No day is both the 31st and in February
        let filter = RelationFilter::new()
            .with_months([Month::February])
            .with_days([31]);
        let seeker =
            DaySeeker::new(filter, SeekDirection::Forward).with_max_visits(Some(10_000));
        assert_eq!(
            seeker.find(&day(2020, 1, 1), 1),
            Err(TimeError::VisitLimitExceeded { limit: 10_000 })
        );
    }

    #[test]
    fn test_cancelled_seek_finds_nothing() {
        let seeker = DaySeeker::new(RelationFilter::new(), SeekDirection::Forward);
        let cancelled = AtomicBool::new(true);
        assert_eq!(
            seeker.find_cancellable(&day(2020, 1, 1), 1, &cancelled).unwrap(),
            None
        );

        let running = AtomicBool::new(false);
        assert_eq!(
            seeker.find_cancellable(&day(2020, 1, 1), 1, &running).unwrap(),
            Some(day(2020, 1, 2))
        );
    }

    #[test]
    fn test_find_date_never_weekend() {
        let seeker = DaySeeker::new(RelationFilter::new().working_days(), SeekDirection::Forward);
        for offset in -12..=12 {
            let found = seeker.find_date(date(2020, 1, 11), offset).unwrap().unwrap();
            if offset != 0 {
                assert!(!matches!(found.weekday(), Weekday::Sat | Weekday::Sun));
            }
        }
    }
}
