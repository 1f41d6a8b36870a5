//! Candidate predicate shared by the seekers and the collector.

use crate::calendar::{DayRange, Granule, HourRange, MonthRange, YearRange};
use crate::error::{Result, TimeError};
use crate::periods::TimePeriodCollection;
use chrono::{Datelike, Month, NaiveDate, Weekday};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use tempora_types::{Duration, Period, TimeRange};

/// Which calendar granules a search may accept.
///
/// Every allowed set is empty by default, meaning "all allowed". Months are
/// matched by calendar year and month; weekday, day-of-month and hour sets only
/// apply to day and hour candidates. A candidate overlapping an excluded period
/// or reaching outside `limits` is rejected.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, Weekday};
/// use tempora::{DayRange, RelationFilter, TimeRange};
///
/// let filter = RelationFilter::new().working_days();
/// let saturday = DayRange::new(NaiveDate::from_ymd_opt(2020, 1, 11).unwrap())?;
/// assert!(!filter.matches_day(&saturday));
/// assert!(filter.matches_day(&saturday.previous().unwrap()));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RelationFilter {
    #[serde(default)]
    exclude_periods: TimePeriodCollection<TimeRange>,
    #[serde(default)]
    limits: TimeRange,
    #[serde(default)]
    weekdays: FxHashSet<Weekday>,
    #[serde(default)]
    months: FxHashSet<Month>,
    #[serde(default)]
    years: FxHashSet<i32>,
    /// Days of the month, 1-based
    #[serde(default)]
    days: FxHashSet<u32>,
    #[serde(default)]
    hours: FxHashSet<u32>,
}

impl RelationFilter {
    /// A filter accepting every granule of the representable calendar.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weekday(mut self, weekday: Weekday) -> Self {
        self.weekdays.insert(weekday);
        self
    }

    pub fn with_weekdays(mut self, weekdays: impl IntoIterator<Item = Weekday>) -> Self {
        self.weekdays.extend(weekdays);
        self
    }

    /// Monday through Friday.
    pub fn working_days(self) -> Self {
        self.with_weekdays([
            Weekday::Mon,
            Weekday::Tue,
            Weekday::Wed,
            Weekday::Thu,
            Weekday::Fri,
        ])
    }

    pub fn with_months(mut self, months: impl IntoIterator<Item = Month>) -> Self {
        self.months.extend(months);
        self
    }

    pub fn with_years(mut self, years: impl IntoIterator<Item = i32>) -> Self {
        self.years.extend(years);
        self
    }

    pub fn with_days(mut self, days: impl IntoIterator<Item = u32>) -> Self {
        self.days.extend(days);
        self
    }

    pub fn with_hours(mut self, hours: impl IntoIterator<Item = u32>) -> Self {
        self.hours.extend(hours);
        self
    }

    /// Rejects every candidate overlapping `period`.
    pub fn exclude<P: Period>(mut self, period: &P) -> Self {
        self.exclude_periods.add(period.to_range());
        self
    }

    pub fn with_limits(mut self, limits: TimeRange) -> Self {
        self.limits = limits;
        self
    }

    /// Bounds the search to the span of `periods`.
    pub fn with_limits_from<P: Period>(self, periods: &TimePeriodCollection<P>) -> Result<Self> {
        let limits = periods.span().ok_or_else(|| {
            TimeError::InvalidArgument("cannot derive limits from an empty collection".into())
        })?;
        Ok(self.with_limits(limits))
    }

    pub fn limits(&self) -> &TimeRange {
        &self.limits
    }

    pub fn exclude_periods(&self) -> &TimePeriodCollection<TimeRange> {
        &self.exclude_periods
    }

    pub fn weekdays(&self) -> &FxHashSet<Weekday> {
        &self.weekdays
    }

    pub fn months(&self) -> &FxHashSet<Month> {
        &self.months
    }

    pub fn years(&self) -> &FxHashSet<i32> {
        &self.years
    }

    pub fn days(&self) -> &FxHashSet<u32> {
        &self.days
    }

    pub fn hours(&self) -> &FxHashSet<u32> {
        &self.hours
    }

    /// Checks the allowed sets and limits for values no candidate could match.
    pub fn validate(&self) -> Result<()> {
        if self.limits.is_moment() {
            return Err(TimeError::InvalidArgument(format!(
                "limits must not be a moment, got {}",
                self.limits
            )));
        }
        if let Some(day) = self.days.iter().find(|day| !(1..=31).contains(*day)) {
            return Err(TimeError::InvalidArgument(format!(
                "day of month must be in 1..=31, got {}",
                day
            )));
        }
        if let Some(hour) = self.hours.iter().find(|hour| **hour > 23) {
            return Err(TimeError::InvalidArgument(format!(
                "hour must be in 0..=23, got {}",
                hour
            )));
        }
        Ok(())
    }

    fn allows_year(&self, year: i32) -> bool {
        self.years.is_empty() || self.years.contains(&year)
    }

    fn allows_date(&self, date: NaiveDate) -> bool {
        self.allows_year(date.year())
            && (self.months.is_empty()
                || Month::try_from(date.month() as u8).is_ok_and(|m| self.months.contains(&m)))
            && (self.days.is_empty() || self.days.contains(&date.day()))
            && (self.weekdays.is_empty() || self.weekdays.contains(&date.weekday()))
    }

    /// Whether any calendar year touched by `year` is allowed.
    ///
    /// Fiscal years span two calendar years, so both are consulted.
    pub fn matches_year(&self, year: &YearRange) -> bool {
        if self.years.is_empty() {
            return true;
        }
        let first = year.start().year();
        let last = year
            .end()
            .checked_sub_signed(Duration::nanoseconds(1))
            .map_or(first, |last| last.year());
        (first..=last).any(|y| self.years.contains(&y))
    }

    pub fn matches_month(&self, month: &MonthRange) -> bool {
        self.allows_year(month.year())
            && (self.months.is_empty() || self.months.contains(&month.month()))
    }

    pub fn matches_day(&self, day: &DayRange) -> bool {
        self.allows_date(day.date())
    }

    pub fn matches_hour(&self, hour: &HourRange) -> bool {
        self.allows_date(hour.date()) && (self.hours.is_empty() || self.hours.contains(&hour.hour()))
    }

    /// Calendar membership of any granule, without exclusions or limits.
    pub fn matches(&self, candidate: &Granule) -> bool {
        match candidate {
            Granule::Month(month) => self.matches_month(month),
            Granule::Day(day) => self.matches_day(day),
            Granule::Hour(hour) => self.matches_hour(hour),
        }
    }

    /// Whether `period` overlaps an excluded period. Touching is not excluded.
    pub fn is_excluded<P: Period + ?Sized>(&self, period: &P) -> bool {
        self.exclude_periods.has_overlapping(period)
    }

    /// Whether `period` lies entirely inside the limits.
    pub fn within_limits<P: Period + ?Sized>(&self, period: &P) -> bool {
        self.limits.has_inside_period(period)
    }

    /// The full candidate predicate: membership, exclusions and limits.
    pub fn accepts(&self, candidate: &Granule) -> bool {
        self.matches(candidate) && !self.is_excluded(candidate) && self.within_limits(candidate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::GregorianCalendar;

    fn day(y: i32, m: u32, d: u32) -> DayRange {
        DayRange::new(NaiveDate::from_ymd_opt(y, m, d).unwrap()).unwrap()
    }

    #[test]
    fn test_empty_filter_accepts_everything() {
        let filter = RelationFilter::new();
        assert!(filter.accepts(&Granule::Day(day(2020, 1, 11))));
        assert!(filter.validate().is_ok());
    }

    #[test]
    fn test_weekday_and_day_of_month() {
        let filter = RelationFilter::new()
            .with_weekday(Weekday::Fri)
            .with_days([10, 13]);
        // Friday the 10th
        assert!(filter.matches_day(&day(2020, 1, 10)));
        // Monday the 13th
        assert!(!filter.matches_day(&day(2020, 1, 13)));
        // Friday the 17th
        assert!(!filter.matches_day(&day(2020, 1, 17)));
    }

    #[test]
    fn test_months_and_years() {
        let calendar = GregorianCalendar::default();
        let filter = RelationFilter::new()
            .with_months([Month::March])
            .with_years([2021]);

        let march = MonthRange::new(2021, Month::March, &calendar).unwrap();
        assert!(filter.matches_month(&march));
        let march_2020 = MonthRange::new(2020, Month::March, &calendar).unwrap();
        assert!(!filter.matches_month(&march_2020));
        assert!(!filter.matches_day(&day(2021, 4, 1)));

        assert!(!filter.matches_year(&YearRange::new(2020, &calendar).unwrap()));
        let fiscal = calendar.with_year_base_month(Month::April);
        // Fiscal 2020 runs into calendar 2021
        assert!(filter.matches_year(&YearRange::new(2020, &fiscal).unwrap()));
    }

    #[test]
    fn test_hours() {
        let filter = RelationFilter::new().with_hours([9, 17]);
        let date = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
        assert!(filter.matches_hour(&HourRange::new(date, 9).unwrap()));
        assert!(!filter.matches_hour(&HourRange::new(date, 10).unwrap()));
    }

    #[test]
    fn test_exclusion_uses_strict_overlap() {
        let holiday = day(2020, 1, 1);
        let filter = RelationFilter::new().exclude(&holiday);
        assert!(filter.is_excluded(&holiday));
        assert!(!filter.is_excluded(&day(2020, 1, 2)));
        assert!(!filter.accepts(&Granule::Day(holiday)));
    }

    #[test]
    fn test_limits() {
        let limits = TimeRange::new(day(2020, 1, 1).start(), day(2020, 1, 5).start()).unwrap();
        let filter = RelationFilter::new().with_limits(limits);
        assert!(filter.within_limits(&day(2020, 1, 4)));
        assert!(!filter.within_limits(&day(2020, 1, 5)));
    }

    #[test]
    fn test_limits_from_collection() {
        let periods: TimePeriodCollection<DayRange> =
            [day(2020, 3, 1), day(2020, 1, 1)].into_iter().collect();
        let filter = RelationFilter::new().with_limits_from(&periods).unwrap();
        assert_eq!(filter.limits().start(), day(2020, 1, 1).start());
        assert_eq!(filter.limits().end(), day(2020, 3, 1).end());

        let empty = TimePeriodCollection::<TimeRange>::new();
        assert!(matches!(
            RelationFilter::new().with_limits_from(&empty),
            Err(TimeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_validate_rejects_impossible_values() {
        assert!(RelationFilter::new().with_days([0]).validate().is_err());
        assert!(RelationFilter::new().with_hours([24]).validate().is_err());
        let moment = TimeRange::moment(day(2020, 1, 1).start());
        assert!(RelationFilter::new().with_limits(moment).validate().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let filter = RelationFilter::new()
            .working_days()
            .with_months([Month::January])
            .exclude(&day(2020, 1, 1));
        let json = serde_json::to_string(&filter).unwrap();
        let back: RelationFilter = serde_json::from_str(&json).unwrap();
        assert_eq!(back, filter);

        let err = serde_json::from_str::<RelationFilter>(r#"{"colour": "red"}"#);
        assert!(err.is_err());
    }
}
