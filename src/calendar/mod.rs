//! Calendar context and calendar range values.
//!
//! This module provides:
//! - `TimeCalendar`: the only boundary arithmetic the traversal engine uses
//! - `GregorianCalendar`: proleptic Gregorian calendar with a configurable
//!   year base month (fiscal years) and first day of week
//! - `ranges`: year, month, day and hour periods built through a calendar

pub mod ranges;

use crate::config::CalendarConfig;
use chrono::{Datelike, Month, NaiveDate, Weekday};
use smallvec::SmallVec;
use tempora_types::{Duration, Instant};

pub use ranges::{DayRange, Granule, HourRange, MonthRange, YearRange, YearRangeCollection};

/// Widest drift between a calendar's year numbering and chrono's.
const YEAR_SEARCH_STEPS: usize = 4;

const REFERENCE_YEAR: i32 = 2000;

fn month_of(moment: Instant) -> Option<Month> {
    Month::try_from(u8::try_from(moment.month()).ok()?).ok()
}

/// Calendar boundary functions.
///
/// Implementations must be pure: the same arguments always give the same
/// result, so one calendar can be shared across threads and calls. Boundary
/// functions return `None` where chrono can no longer represent the instant.
///
/// Years are named by the calendar year in which they start. With a
/// `year_base_month` of April, year 2020 runs from 2020-04-01 to 2021-04-01.
pub trait TimeCalendar {
    fn first_day_of_week(&self) -> Weekday;

    /// The month years start in. Derived from `start_of_year` unless
    /// overridden; the walk itself only follows `start_of_year`.
    fn year_base_month(&self) -> Month {
        self.start_of_year(REFERENCE_YEAR)
            .and_then(month_of)
            .unwrap_or(Month::January)
    }

    fn start_of_year(&self, year: i32) -> Option<Instant>;

    /// Exclusive end: the start of the following year.
    fn end_of_year(&self, year: i32) -> Option<Instant> {
        self.start_of_year(year.checked_add(1)?)
    }

    fn start_of_month(&self, year: i32, month: Month) -> Option<Instant>;

    fn days_in_month(&self, year: i32, month: Month) -> u32;

    /// Exclusive end: the start of the following month.
    fn end_of_month(&self, year: i32, month: Month) -> Option<Instant> {
        let days = i64::from(self.days_in_month(year, month));
        self.start_of_month(year, month)?
            .checked_add_signed(Duration::days(days))
    }

    /// The year whose range contains `moment`, located through
    /// `start_of_year` and `end_of_year`.
    fn year_of(&self, moment: Instant) -> i32 {
        let mut year = moment.year();
        for _ in 0..YEAR_SEARCH_STEPS {
            match (self.start_of_year(year), year.checked_sub(1)) {
                (Some(start), Some(previous)) if start > moment => year = previous,
                _ => break,
            }
        }
        for _ in 0..YEAR_SEARCH_STEPS {
            match (self.end_of_year(year), year.checked_add(1)) {
                (Some(end), Some(next)) if end <= moment => year = next,
                _ => break,
            }
        }
        year
    }

    /// The twelve `(calendar year, month)` pairs of `year`, in order,
    /// starting from the month `start_of_year` falls in.
    fn months_of_year(&self, year: i32) -> SmallVec<[(i32, Month); 12]> {
        let mut months = SmallVec::new();
        let Some(start) = self.start_of_year(year) else {
            return months;
        };
        let Some(mut month) = month_of(start) else {
            return months;
        };
        let mut calendar_year = start.year();
        for index in 0..12 {
            if index > 0 && month == Month::January {
                calendar_year += 1;
            }
            months.push((calendar_year, month));
            month = month.succ();
        }
        months
    }

    /// The first day of the week containing `date`.
    fn start_of_week(&self, date: NaiveDate) -> Option<NaiveDate> {
        let first = self.first_day_of_week().num_days_from_monday();
        let current = date.weekday().num_days_from_monday();
        let back = (current + 7 - first) % 7;
        date.checked_sub_signed(Duration::days(i64::from(back)))
    }
}

/// Proleptic Gregorian calendar.
///
/// # Examples
///
/// ```
/// use chrono::{Month, NaiveDate};
/// use tempora::{GregorianCalendar, TimeCalendar};
///
/// let fiscal = GregorianCalendar::default().with_year_base_month(Month::April);
/// let start = fiscal.start_of_year(2020).unwrap();
/// assert_eq!(start.date(), NaiveDate::from_ymd_opt(2020, 4, 1).unwrap());
/// assert_eq!(fiscal.days_in_month(2020, Month::February), 29);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GregorianCalendar {
    first_day_of_week: Weekday,
    year_base_month: Month,
}

impl GregorianCalendar {
    pub const fn new(first_day_of_week: Weekday, year_base_month: Month) -> Self {
        Self {
            first_day_of_week,
            year_base_month,
        }
    }

    pub fn from_config(config: &CalendarConfig) -> Self {
        Self::new(config.first_day_of_week, config.year_base_month)
    }

    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    pub fn with_year_base_month(mut self, month: Month) -> Self {
        self.year_base_month = month;
        self
    }
}

impl Default for GregorianCalendar {
    fn default() -> Self {
        Self::new(Weekday::Mon, Month::January)
    }
}

fn midnight(year: i32, month: Month, day: u32) -> Option<Instant> {
    NaiveDate::from_ymd_opt(year, month.number_from_month(), day)?.and_hms_opt(0, 0, 0)
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

impl TimeCalendar for GregorianCalendar {
    fn first_day_of_week(&self) -> Weekday {
        self.first_day_of_week
    }

    fn year_base_month(&self) -> Month {
        self.year_base_month
    }

    fn start_of_year(&self, year: i32) -> Option<Instant> {
        midnight(year, self.year_base_month, 1)
    }

    fn start_of_month(&self, year: i32, month: Month) -> Option<Instant> {
        midnight(year, month, 1)
    }

    fn days_in_month(&self, year: i32, month: Month) -> u32 {
        match month {
            Month::February if is_leap_year(year) => 29,
            Month::February => 28,
            Month::April | Month::June | Month::September | Month::November => 30,
            _ => 31,
        }
    }
}

impl<C: TimeCalendar + ?Sized> TimeCalendar for &C {
    fn first_day_of_week(&self) -> Weekday {
        (**self).first_day_of_week()
    }

    fn year_base_month(&self) -> Month {
        (**self).year_base_month()
    }

    fn start_of_year(&self, year: i32) -> Option<Instant> {
        (**self).start_of_year(year)
    }

    fn end_of_year(&self, year: i32) -> Option<Instant> {
        (**self).end_of_year(year)
    }

    fn start_of_month(&self, year: i32, month: Month) -> Option<Instant> {
        (**self).start_of_month(year, month)
    }

    fn days_in_month(&self, year: i32, month: Month) -> u32 {
        (**self).days_in_month(year, month)
    }

    fn end_of_month(&self, year: i32, month: Month) -> Option<Instant> {
        (**self).end_of_month(year, month)
    }

    fn year_of(&self, moment: Instant) -> i32 {
        (**self).year_of(moment)
    }

    fn months_of_year(&self, year: i32) -> SmallVec<[(i32, Month); 12]> {
        (**self).months_of_year(year)
    }

    fn start_of_week(&self, date: NaiveDate) -> Option<NaiveDate> {
        (**self).start_of_week(date)
    }
}
