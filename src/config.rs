//! Serializable configuration for calendars and seekers.

use crate::error::{Result, TimeError};
use crate::filter::RelationFilter;
use crate::visitor::{DEFAULT_MAX_VISITS, SeekDirection};
use chrono::{Month, Weekday};
use serde::de::Error;
use serde::{Deserialize, Serialize};

/// Visit ceilings above this are accepted but logged.
const LARGE_MAX_VISITS: u64 = 100_000_000;

/// Calendar parameters.
///
/// # Example
///
/// ```rust
/// use chrono::Month;
/// use tempora::CalendarConfig;
///
/// let json = r#"{ "year_base_month": "April" }"#;
/// let config = CalendarConfig::from_json(json).unwrap();
/// assert_eq!(config.year_base_month, Month::April);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CalendarConfig {
    /// First day of a calendar week (default: Monday)
    #[serde(default = "CalendarConfig::default_first_day_of_week")]
    pub first_day_of_week: Weekday,

    /// Month in which a year starts; anything but January gives fiscal years
    #[serde(default = "CalendarConfig::default_year_base_month")]
    pub year_base_month: Month,
}

impl CalendarConfig {
    const fn default_first_day_of_week() -> Weekday {
        Weekday::Mon
    }

    const fn default_year_base_month() -> Month {
        Month::January
    }

    pub fn with_first_day_of_week(mut self, day: Weekday) -> Self {
        self.first_day_of_week = day;
        self
    }

    pub fn with_year_base_month(mut self, month: Month) -> Self {
        self.year_base_month = month;
        self
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for CalendarConfig {
    fn default() -> Self {
        Self {
            first_day_of_week: Self::default_first_day_of_week(),
            year_base_month: Self::default_year_base_month(),
        }
    }
}

/// Everything needed to build a seeker or collector.
///
/// # Example
///
/// ```rust
/// use tempora::{SeekDirection, SeekerConfig};
///
/// let json = r#"{
///     "direction": "backward",
///     "max_visits": 50000,
///     "calendar": { "first_day_of_week": "Sun" },
///     "filter": { "weekdays": ["Mon", "Tue", "Wed", "Thu", "Fri"] }
/// }"#;
/// let config = SeekerConfig::from_json(json).unwrap();
/// assert_eq!(config.direction, SeekDirection::Backward);
/// assert_eq!(config.filter.weekdays().len(), 5);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeekerConfig {
    #[serde(default)]
    pub direction: SeekDirection,

    /// Ceiling on granules touched per walk (None disables it)
    #[serde(default = "SeekerConfig::default_max_visits")]
    pub max_visits: Option<u64>,

    #[serde(default)]
    pub calendar: CalendarConfig,

    #[serde(default)]
    pub filter: RelationFilter,
}

impl SeekerConfig {
    const fn default_max_visits() -> Option<u64> {
        Some(DEFAULT_MAX_VISITS)
    }

    pub fn with_direction(mut self, direction: SeekDirection) -> Self {
        self.direction = direction;
        self
    }

    pub fn with_max_visits(mut self, max_visits: Option<u64>) -> Self {
        match max_visits {
            None => log::warn!("visit ceiling disabled; unbounded searches may not terminate"),
            Some(limit) if limit > LARGE_MAX_VISITS => {
                log::warn!("visit ceiling of {} granules is very large", limit)
            }
            _ => {}
        }
        self.max_visits = max_visits;
        self
    }

    pub fn with_calendar(mut self, calendar: CalendarConfig) -> Self {
        self.calendar = calendar;
        self
    }

    pub fn with_filter(mut self, filter: RelationFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.max_visits == Some(0) {
            return Err(TimeError::InvalidArgument(
                "max_visits must be greater than zero".to_string(),
            ));
        }
        self.filter.validate()
    }

    /// Load configuration from JSON string
    pub fn from_json(json: &str) -> std::result::Result<Self, serde_json::Error> {
        let config: SeekerConfig = serde_json::from_str(json)?;
        if let Err(e) = config.validate() {
            return Err(Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as JSON string
    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> std::result::Result<Self, toml::de::Error> {
        let config: SeekerConfig = toml::from_str(toml_str)?;
        if let Err(e) = config.validate() {
            return Err(toml::de::Error::custom(e));
        }
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> std::result::Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }
}

impl Default for SeekerConfig {
    fn default() -> Self {
        Self {
            direction: SeekDirection::default(),
            max_visits: Self::default_max_visits(),
            calendar: CalendarConfig::default(),
            filter: RelationFilter::default(),
        }
    }
}
