//! Binding a resolved range to the column it filters.
//!
//! A [`PeriodFilter`] is the configuration-facing form of a period query:
//! named, independently optional fields, deserializable from JSON. The
//! column it applies to is either given explicitly or looked up through
//! [`PeriodColumn`], which falls back to the record's creation timestamp.

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::resolver::{resolve_with_options, DateRange, PeriodQuery};
use crate::unit::{CalendarUnit, ResolveOptions};

/// Column used when neither the filter nor the record type names one.
pub const DEFAULT_PERIOD_COLUMN: &str = "created_at";

/// Per-record-type choice of the timestamp column period filters apply to.
///
/// ```
/// use period_range::PeriodColumn;
///
/// struct User;
/// impl PeriodColumn for User {}
///
/// struct Invoice;
/// impl PeriodColumn for Invoice {
///     const PERIOD_COLUMN: Option<&'static str> = Some("issued_at");
/// }
///
/// assert_eq!(User::period_column_name(), "created_at");
/// assert_eq!(Invoice::period_column_name(), "issued_at");
/// ```
pub trait PeriodColumn {
    /// The record's creation-timestamp column.
    const CREATED_AT: &'static str = DEFAULT_PERIOD_COLUMN;

    /// Explicit override for period filters.
    const PERIOD_COLUMN: Option<&'static str> = None;

    fn period_column_name() -> &'static str {
        Self::PERIOD_COLUMN.unwrap_or(Self::CREATED_AT)
    }
}

/// A period filter as a caller configures it.
///
/// ```
/// use period_range::{CalendarUnit, PeriodFilter};
///
/// let filter: PeriodFilter = serde_json::from_str(r#"{"unit": "week", "count": -2}"#).unwrap();
/// assert_eq!(filter.unit, CalendarUnit::Week);
/// assert!(!filter.include_current);
/// assert_eq!(filter.column_or("created_at"), "created_at");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodFilter {
    pub unit: CalendarUnit,
    pub count: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<String>,
    #[serde(default)]
    pub include_current: bool,
}

impl PeriodFilter {
    pub fn new(unit: CalendarUnit, count: i64) -> Self {
        Self {
            unit,
            count,
            column: None,
            include_current: false,
        }
    }

    pub fn with_column(mut self, column: impl Into<String>) -> Self {
        self.column = Some(column.into());
        self
    }

    pub fn including_current(mut self, include_current: bool) -> Self {
        self.include_current = include_current;
        self
    }

    pub fn query(&self) -> PeriodQuery {
        PeriodQuery::new(self.unit, self.count, self.include_current)
    }

    /// The explicit column if set, otherwise `default`.
    pub fn column_or<'a>(&'a self, default: &'a str) -> &'a str {
        self.column.as_deref().unwrap_or(default)
    }

    /// Resolve against `now` and bind to a column, `default_column` unless
    /// the filter names its own.
    pub fn predicate<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        options: &ResolveOptions,
        default_column: &str,
    ) -> RangePredicate<Tz> {
        RangePredicate {
            column: self.column_or(default_column).to_string(),
            range: resolve_with_options(&self.query(), now, options),
        }
    }

    /// [`Self::predicate`] with the default column of record type `M`.
    pub fn predicate_for<M: PeriodColumn, Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        options: &ResolveOptions,
    ) -> RangePredicate<Tz> {
        self.predicate(now, options, M::period_column_name())
    }
}

impl From<PeriodQuery> for PeriodFilter {
    fn from(query: PeriodQuery) -> Self {
        PeriodFilter::new(query.unit, query.count).including_current(query.include_current)
    }
}

/// `column BETWEEN start AND end`, both ends inclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangePredicate<Tz: TimeZone> {
    pub column: String,
    pub range: DateRange<Tz>,
}

impl<Tz: TimeZone> RangePredicate<Tz> {
    pub fn matches<T: TimeZone>(&self, value: &DateTime<T>) -> bool {
        self.range.contains(value)
    }
}
