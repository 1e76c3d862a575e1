//! # period-range
//!
//! Deterministic, calendar-aligned date ranges for relative period filters.
//!
//! Given a reference instant, a calendar unit, a signed number of periods
//! and whether the in-progress period counts, [`resolve`] returns the
//! inclusive `[start, end]` pair to filter a timestamp column with. The
//! caller supplies `now`; nothing here reads the clock or does I/O.
//!
//! ## Modules
//!
//! - [`unit`] — Calendar units, week-start convention, resolve options
//! - [`calendar`] — Shift instants by units, snap to start/end of a unit
//! - [`resolver`] — The range resolution algorithm and `this/next/last` helpers
//! - [`shortcut`] — Named shortcuts (`today`, `lastMonth`, ...) derived from the unit list
//! - [`filter`] — Filter configuration and column selection
//! - [`input`] — Parsing helpers for text front ends
//! - [`error`] — Error types

pub mod calendar;
pub mod error;
pub mod filter;
pub mod input;
pub mod resolver;
pub mod shortcut;
pub mod unit;

pub use error::PeriodError;
pub use filter::{PeriodColumn, PeriodFilter, RangePredicate, DEFAULT_PERIOD_COLUMN};
pub use resolver::{
    last_period, next_period, resolve, resolve_query, resolve_with_options, this_period,
    DateRange, PeriodQuery,
};
pub use shortcut::{Relation, Shortcut};
pub use unit::{CalendarUnit, ResolveOptions, WeekStartDay};
