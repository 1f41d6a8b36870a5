//! Seeker builder for flexible configuration
//!
//! Assembles seekers and collectors from a [`SeekerConfig`], or from
//! individual settings layered on top of the defaults.

use crate::calendar::GregorianCalendar;
use crate::collector::CalendarPeriodCollector;
use crate::config::{CalendarConfig, SeekerConfig};
use crate::error::Result;
use crate::filter::RelationFilter;
use crate::periods::TimePeriodCollection;
use crate::seeker::{DaySeeker, MonthSeeker};
use crate::visitor::{CalendarVisitor, SeekDirection};
use tempora_types::{Period, TimeRange};

/// Builder for seekers and collectors over a [`GregorianCalendar`].
///
/// ```rust
/// use chrono::NaiveDate;
/// use tempora::{SeekDirection, SeekerBuilder};
///
/// let seeker = SeekerBuilder::new()
///     .working_days()
///     .direction(SeekDirection::Backward)
///     .build_day_seeker()?;
///
/// let monday = NaiveDate::from_ymd_opt(2020, 1, 13).unwrap();
/// assert_eq!(seeker.find_date(monday, 1)?, NaiveDate::from_ymd_opt(2020, 1, 10));
/// # Ok::<(), tempora::TimeError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct SeekerBuilder {
    config: SeekerConfig,
}

impl SeekerBuilder {
    /// Create a new builder with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: SeekerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn direction(mut self, direction: SeekDirection) -> Self {
        self.config.direction = direction;
        self
    }

    pub fn max_visits(mut self, max_visits: Option<u64>) -> Self {
        self.config = self.config.with_max_visits(max_visits);
        self
    }

    pub fn calendar(mut self, calendar: CalendarConfig) -> Self {
        self.config.calendar = calendar;
        self
    }

    pub fn filter(mut self, filter: RelationFilter) -> Self {
        self.config.filter = filter;
        self
    }

    /// Restrict matches to Monday through Friday.
    pub fn working_days(mut self) -> Self {
        self.config.filter = self.config.filter.working_days();
        self
    }

    pub fn limits(mut self, limits: TimeRange) -> Self {
        self.config.filter = self.config.filter.with_limits(limits);
        self
    }

    /// Bound the search to the span of `periods`.
    pub fn limits_from<P: Period>(mut self, periods: &TimePeriodCollection<P>) -> Result<Self> {
        self.config.filter = self.config.filter.with_limits_from(periods)?;
        Ok(self)
    }

    pub fn exclude<P: Period>(mut self, period: &P) -> Self {
        self.config.filter = self.config.filter.exclude(period);
        self
    }

    fn visitor(&self) -> Result<CalendarVisitor<GregorianCalendar>> {
        self.config.validate()?;
        let calendar = GregorianCalendar::from_config(&self.config.calendar);
        Ok(CalendarVisitor::new(calendar).with_max_visits(self.config.max_visits))
    }

    /// Validate the configuration and build a day seeker.
    pub fn build_day_seeker(&self) -> Result<DaySeeker> {
        let visitor = self.visitor()?;
        Ok(DaySeeker::with_visitor(
            visitor,
            self.config.filter.clone(),
            self.config.direction,
        ))
    }

    /// Validate the configuration and build a month seeker.
    pub fn build_month_seeker(&self) -> Result<MonthSeeker> {
        let visitor = self.visitor()?;
        Ok(MonthSeeker::with_visitor(
            visitor,
            self.config.filter.clone(),
            self.config.direction,
        ))
    }

    /// Validate the configuration and build a collector.
    pub fn build_collector(&self) -> Result<CalendarPeriodCollector> {
        self.config.validate()?;
        let calendar = GregorianCalendar::from_config(&self.config.calendar);
        Ok(CalendarPeriodCollector::with_calendar(
            calendar,
            self.config.filter.clone(),
            self.config.direction,
        )
        .with_max_visits(self.config.max_visits))
    }
}
