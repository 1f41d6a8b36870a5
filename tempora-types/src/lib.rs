//! # tempora-types
//!
//! Core time period value types for the tempora calendar engine.
//!
//! This crate provides the leaf values every other tempora component is built on:
//!
//! - **Period capability**: the [`Period`] trait with overlap, intersection and
//!   relation queries
//! - **Period values**: [`TimeRange`] (start/end) and [`TimeBlock`] (start/duration)
//! - **Relations**: the 13-way [`Relation`] classification of two periods
//!
//! All values are immutable; operations that "modify" a period return a new one.
//!
//! ## Examples
//!
//! ```rust
//! use chrono::NaiveDate;
//! use tempora_types::{Period, Relation, TimeRange};
//!
//! let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap().and_hms_opt(0, 0, 0).unwrap();
//!
//! let reference = TimeRange::new(day(10), day(20))?;
//! let target = TimeRange::new(day(10), day(15))?;
//! assert_eq!(target.relation_to(&reference), Relation::EnclosingStartTouching);
//! # Ok::<(), tempora_types::PeriodError>(())
//! ```

pub mod block;
pub mod error;
pub mod period;
pub mod range;
pub mod relation;

pub use block::TimeBlock;
pub use error::PeriodError;
pub use period::{Duration, Instant, Period};
pub use range::TimeRange;
pub use relation::Relation;
