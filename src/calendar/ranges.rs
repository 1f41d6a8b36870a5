//! Year, month, day and hour periods.
//!
//! Each range carries its calendar coordinates plus the half-open period it
//! covers (`[start, start of next granule]`). Years and months are built
//! through a [`TimeCalendar`]; days and hours are fixed 24h/1h spans.

use super::TimeCalendar;
use crate::error::{Result, TimeError};
use chrono::{Datelike, Month, NaiveDate, Weekday};
use smallvec::SmallVec;
use std::fmt;
use std::ops::RangeInclusive;
use tempora_types::{Duration, Instant, Period, TimeRange};

fn out_of_range(what: impl fmt::Display) -> TimeError {
    TimeError::OutOfRange(format!("{} is not representable", what))
}

/// One calendar year, as delimited by the calendar's year base month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct YearRange {
    year: i32,
    period: TimeRange,
}

impl YearRange {
    pub fn new<C: TimeCalendar + ?Sized>(year: i32, calendar: &C) -> Result<Self> {
        let start = calendar
            .start_of_year(year)
            .ok_or_else(|| out_of_range(format_args!("year {}", year)))?;
        let end = calendar
            .end_of_year(year)
            .ok_or_else(|| out_of_range(format_args!("end of year {}", year)))?;
        Ok(Self {
            year,
            period: TimeRange::new(start, end)?,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    /// The representable months of this year, in ascending order.
    pub fn months<C: TimeCalendar + ?Sized>(&self, calendar: &C) -> SmallVec<[MonthRange; 12]> {
        calendar
            .months_of_year(self.year)
            .into_iter()
            .filter_map(|(year, month)| MonthRange::new(year, month, calendar).ok())
            .collect()
    }
}

impl Period for YearRange {
    fn start(&self) -> Instant {
        self.period.start()
    }

    fn end(&self) -> Instant {
        self.period.end()
    }
}

/// The span of years a traversal walks.
///
/// Years are produced lazily by the visitor, so an unbounded range does not
/// allocate one entry per year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRangeCollection {
    first_year: i32,
    last_year: i32,
    period: TimeRange,
}

impl YearRangeCollection {
    /// The years touched by `range` under `calendar`.
    pub fn covering<C: TimeCalendar + ?Sized>(range: &TimeRange, calendar: &C) -> Self {
        Self {
            first_year: calendar.year_of(range.start()),
            last_year: calendar.year_of(range.end()),
            period: *range,
        }
    }

    pub fn first_year(&self) -> i32 {
        self.first_year
    }

    pub fn last_year(&self) -> i32 {
        self.last_year
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.first_year..=self.last_year
    }

    pub fn len(&self) -> u64 {
        (i64::from(self.last_year) - i64::from(self.first_year) + 1) as u64
    }

    pub fn is_empty(&self) -> bool {
        self.last_year < self.first_year
    }
}

impl Period for YearRangeCollection {
    fn start(&self) -> Instant {
        self.period.start()
    }

    fn end(&self) -> Instant {
        self.period.end()
    }
}

/// One calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthRange {
    year: i32,
    month: Month,
    period: TimeRange,
}

impl MonthRange {
    pub fn new<C: TimeCalendar + ?Sized>(year: i32, month: Month, calendar: &C) -> Result<Self> {
        let start = calendar
            .start_of_month(year, month)
            .ok_or_else(|| out_of_range(format_args!("{} {}", month.name(), year)))?;
        let end = calendar
            .end_of_month(year, month)
            .ok_or_else(|| out_of_range(format_args!("end of {} {}", month.name(), year)))?;
        Ok(Self {
            year,
            month,
            period: TimeRange::new(start, end)?,
        })
    }

    /// The month containing `date`.
    pub fn containing<C: TimeCalendar + ?Sized>(date: NaiveDate, calendar: &C) -> Result<Self> {
        let month = Month::try_from(date.month() as u8)
            .map_err(|_| TimeError::InvalidArgument(format!("invalid month in {}", date)))?;
        Self::new(date.year(), month, calendar)
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> Month {
        self.month
    }

    pub fn first_day(&self) -> NaiveDate {
        self.period.start().date()
    }

    /// The representable days of this month, in ascending order.
    pub fn days<C: TimeCalendar + ?Sized>(&self, calendar: &C) -> SmallVec<[DayRange; 31]> {
        let first = self.first_day();
        (0..calendar.days_in_month(self.year, self.month))
            .filter_map(|offset| first.checked_add_signed(Duration::days(i64::from(offset))))
            .filter_map(|date| DayRange::new(date).ok())
            .collect()
    }
}

impl Period for MonthRange {
    fn start(&self) -> Instant {
        self.period.start()
    }

    fn end(&self) -> Instant {
        self.period.end()
    }
}

impl fmt::Display for MonthRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month.number_from_month())
    }
}

/// One day, midnight to midnight.
///
/// # Examples
///
/// ```
/// use chrono::{NaiveDate, TimeDelta, Weekday};
/// use tempora::{DayRange, Period};
///
/// let day = DayRange::new(NaiveDate::from_ymd_opt(2020, 1, 10).unwrap())?;
/// assert_eq!(day.weekday(), Weekday::Fri);
/// assert_eq!(day.duration(), TimeDelta::days(1));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayRange {
    date: NaiveDate,
    period: TimeRange,
}

impl DayRange {
    pub fn new(date: NaiveDate) -> Result<Self> {
        let start = date
            .and_hms_opt(0, 0, 0)
            .ok_or_else(|| out_of_range(date))?;
        let end = date
            .succ_opt()
            .and_then(|next| next.and_hms_opt(0, 0, 0))
            .ok_or_else(|| out_of_range(format_args!("day after {}", date)))?;
        Ok(Self {
            date,
            period: TimeRange::new(start, end)?,
        })
    }

    /// The day containing `moment`.
    pub fn containing(moment: Instant) -> Result<Self> {
        Self::new(moment.date())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn year(&self) -> i32 {
        self.date.year()
    }

    pub fn month(&self) -> Month {
        // `NaiveDate::month` is always 1..=12
        Month::try_from(self.date.month() as u8).unwrap_or(Month::January)
    }

    /// Day of month, starting at 1.
    pub fn day(&self) -> u32 {
        self.date.day()
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }

    pub fn next(&self) -> Option<DayRange> {
        Self::new(self.date.succ_opt()?).ok()
    }

    pub fn previous(&self) -> Option<DayRange> {
        Self::new(self.date.pred_opt()?).ok()
    }

    /// The 24 hours of this day, in ascending order.
    pub fn hours(&self) -> SmallVec<[HourRange; 24]> {
        (0..24)
            .filter_map(|hour| HourRange::new(self.date, hour).ok())
            .collect()
    }
}

impl Period for DayRange {
    fn start(&self) -> Instant {
        self.period.start()
    }

    fn end(&self) -> Instant {
        self.period.end()
    }
}

impl fmt::Display for DayRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.date)
    }
}

/// One hour of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HourRange {
    date: NaiveDate,
    hour: u32,
    period: TimeRange,
}

impl HourRange {
    pub fn new(date: NaiveDate, hour: u32) -> Result<Self> {
        if hour > 23 {
            return Err(TimeError::InvalidArgument(format!(
                "hour must be in 0..=23, got {}",
                hour
            )));
        }
        let start = date
            .and_hms_opt(hour, 0, 0)
            .ok_or_else(|| out_of_range(format_args!("{} {:02}:00", date, hour)))?;
        let end = start
            .checked_add_signed(Duration::hours(1))
            .ok_or_else(|| out_of_range(format_args!("end of {} {:02}:00", date, hour)))?;
        Ok(Self {
            date,
            hour,
            period: TimeRange::new(start, end)?,
        })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hour(&self) -> u32 {
        self.hour
    }

    pub fn weekday(&self) -> Weekday {
        self.date.weekday()
    }
}

impl Period for HourRange {
    fn start(&self) -> Instant {
        self.period.start()
    }

    fn end(&self) -> Instant {
        self.period.end()
    }
}

/// A leaf candidate handed to a visit strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Granule {
    Month(MonthRange),
    Day(DayRange),
    Hour(HourRange),
}

impl Granule {
    pub fn as_month(&self) -> Option<&MonthRange> {
        match self {
            Granule::Month(month) => Some(month),
            _ => None,
        }
    }

    pub fn as_day(&self) -> Option<&DayRange> {
        match self {
            Granule::Day(day) => Some(day),
            _ => None,
        }
    }

    pub fn as_hour(&self) -> Option<&HourRange> {
        match self {
            Granule::Hour(hour) => Some(hour),
            _ => None,
        }
    }
}

impl Period for Granule {
    fn start(&self) -> Instant {
        match self {
            Granule::Month(month) => month.start(),
            Granule::Day(day) => day.start(),
            Granule::Hour(hour) => hour.start(),
        }
    }

    fn end(&self) -> Instant {
        match self {
            Granule::Month(month) => month.end(),
            Granule::Day(day) => day.end(),
            Granule::Hour(hour) => hour.end(),
        }
    }
}
