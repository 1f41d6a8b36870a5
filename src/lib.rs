//! Calendar-aware time period arithmetic: period relations, contiguous
//! chains, and filtered offset searches over a pluggable calendar.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tempora::{DaySeeker, RelationFilter, SeekDirection};
//!
//! let holiday = tempora::DayRange::new(NaiveDate::from_ymd_opt(2020, 1, 13).unwrap())?;
//! let filter = RelationFilter::new().working_days().exclude(&holiday);
//! let seeker = DaySeeker::new(filter, SeekDirection::Forward);
//!
//! let friday = NaiveDate::from_ymd_opt(2020, 1, 10).unwrap();
//! assert_eq!(seeker.find_date(friday, 1)?, NaiveDate::from_ymd_opt(2020, 1, 14));
//! # Ok::<(), tempora::TimeError>(())
//! ```

pub mod builder;
pub mod calendar;
pub mod collector;
pub mod config;
pub mod error;
pub mod filter;
pub mod periods;
pub mod seeker;
pub mod visitor;

pub use builder::SeekerBuilder;
pub use error::{Result, TimeError};

pub use tempora_types::{
    Duration, Instant, Period, PeriodError, Relation, TimeBlock, TimeRange,
};

pub use periods::{TimePeriodChain, TimePeriodCollection};

pub use calendar::{
    DayRange, GregorianCalendar, Granule, HourRange, MonthRange, TimeCalendar, YearRange,
    YearRangeCollection,
};

pub use visitor::{
    CalendarVisitor, Cancellable, Granularity, SeekDirection, VisitOutcome, VisitReport,
    VisitStats, VisitStrategy,
};

pub use collector::CalendarPeriodCollector;
pub use config::{CalendarConfig, SeekerConfig};
pub use filter::RelationFilter;
pub use seeker::{DaySeeker, MonthSeeker, SeekContext};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{Result, SeekerBuilder, TimeError};

    pub use crate::{Period, Relation, TimeBlock, TimeRange};

    pub use crate::{TimePeriodChain, TimePeriodCollection};

    pub use crate::{DayRange, GregorianCalendar, MonthRange, TimeCalendar};

    pub use crate::{DaySeeker, MonthSeeker, RelationFilter, SeekDirection};

    pub use crate::{CalendarConfig, SeekerConfig};

    pub use chrono::{Month, NaiveDate, NaiveDateTime, TimeDelta, Weekday};
}
