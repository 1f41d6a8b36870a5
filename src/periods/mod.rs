//! Containers of periods.
//!
//! - `TimePeriodCollection`: insertion-ordered bag of periods with span and
//!   overlap queries
//! - `TimePeriodChain`: contiguous sequence, each period starting where the
//!   previous one ends

pub mod chain;
pub mod collection;

pub use chain::TimePeriodChain;
pub use collection::TimePeriodCollection;
