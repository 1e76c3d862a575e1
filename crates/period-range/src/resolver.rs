//! Resolution of relative period filters into inclusive date ranges.
//!
//! Given a reference instant, a [`CalendarUnit`], a signed count and whether
//! the in-progress period is included, produce the `[start, end]` pair to
//! apply as an inclusive range filter. All functions take `now` explicitly
//! (no system clock access), so results are deterministic.
//!
//! # Algorithm
//!
//! Two boundaries are computed independently and then ordered:
//!
//! - the **closer** boundary is `now` itself when the current period is
//!   included, otherwise `now` moved one unit in the query's direction (the
//!   adjacent period);
//! - the **further** boundary is `now` moved by the full signed count.
//!
//! Moving forward, the closer boundary snaps to the start of its unit and
//! the further one to the end; moving backward it is the other way round.
//! The range is then `(min, max)` of the two, so the sign of the count never
//! has to be reasoned about per case.

use std::cmp::{max, min};

use chrono::{DateTime, Duration, TimeZone};
use serde::{Deserialize, Serialize};

use crate::calendar::{boundary, Edge};
use crate::error::Result;
use crate::unit::{CalendarUnit, ResolveOptions};

// ── Query ───────────────────────────────────────────────────────────────────

/// What to resolve: a unit, a signed number of periods, and whether the
/// period containing `now` is part of the range.
///
/// A non-negative `count` looks forward, a negative one looks backward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodQuery {
    pub unit: CalendarUnit,
    pub count: i64,
    #[serde(default)]
    pub include_current: bool,
}

impl PeriodQuery {
    pub fn new(unit: CalendarUnit, count: i64, include_current: bool) -> Self {
        Self {
            unit,
            count,
            include_current,
        }
    }

    /// The period containing `now`.
    pub fn this(unit: CalendarUnit) -> Self {
        Self::new(unit, 0, true)
    }

    /// The single period after the current one.
    pub fn next(unit: CalendarUnit) -> Self {
        Self::new(unit, 1, false)
    }

    /// The single period before the current one.
    pub fn last(unit: CalendarUnit) -> Self {
        Self::new(unit, -1, false)
    }

    /// Whether the range lies at or after `now`. Zero counts as forward.
    pub fn is_forward(&self) -> bool {
        self.count >= 0
    }
}

// ── Range ───────────────────────────────────────────────────────────────────

/// An inclusive `[start, end]` range with `start <= end`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRange<Tz: TimeZone> {
    start: DateTime<Tz>,
    end: DateTime<Tz>,
}

impl<Tz: TimeZone> DateRange<Tz> {
    /// Build a range from two instants in either order.
    pub fn new(a: DateTime<Tz>, b: DateTime<Tz>) -> Self {
        Self {
            start: min(a.clone(), b.clone()),
            end: max(a, b),
        }
    }

    pub fn start(&self) -> &DateTime<Tz> {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Tz> {
        &self.end
    }

    /// Whether `instant` lies in the range, both ends included.
    pub fn contains<T: TimeZone>(&self, instant: &DateTime<T>) -> bool {
        let instant = instant.with_timezone(&self.start.timezone());
        self.start <= instant && instant <= self.end
    }

    /// Elapsed time from `start` to `end`.
    pub fn duration(&self) -> Duration {
        self.end.clone() - self.start.clone()
    }

    pub fn into_bounds(self) -> (DateTime<Tz>, DateTime<Tz>) {
        (self.start, self.end)
    }
}

// ── resolve ─────────────────────────────────────────────────────────────────

/// Resolve a relative period filter to an inclusive date range.
///
/// Uses ISO 8601 week start (Monday). For configurable week start, use
/// [`resolve_with_options`].
///
/// # Arguments
///
/// * `unit` — One of `"minute"`, `"hour"`, `"day"`, `"week"`, `"month"`, `"year"`
/// * `count` — Signed number of periods; negative looks into the past
/// * `include_current` — Whether the period containing `now` is included
/// * `now` — The reference instant; its zone is the calendar used for truncation
///
/// # Errors
///
/// Returns [`PeriodError::InvalidUnit`](crate::PeriodError::InvalidUnit) if `unit` is not one of the six
/// names. Every other input is accepted.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use period_range::resolve;
///
/// let now = Utc.with_ymd_and_hms(2010, 11, 11, 12, 25, 30).unwrap();
/// let range = resolve("year", -2, false, &now).unwrap();
/// assert_eq!(*range.start(), Utc.with_ymd_and_hms(2008, 1, 1, 0, 0, 0).unwrap());
/// assert_eq!(*range.end(), Utc.with_ymd_and_hms(2009, 12, 31, 23, 59, 59).unwrap());
///
/// assert!(resolve("fortnight", 1, false, &now).is_err());
/// ```
pub fn resolve<Tz: TimeZone>(
    unit: &str,
    count: i64,
    include_current: bool,
    now: &DateTime<Tz>,
) -> Result<DateRange<Tz>> {
    let unit: CalendarUnit = unit.parse()?;
    Ok(resolve_query(&PeriodQuery::new(unit, count, include_current), now))
}

/// [`resolve_with_options`] with default options.
pub fn resolve_query<Tz: TimeZone>(query: &PeriodQuery, now: &DateTime<Tz>) -> DateRange<Tz> {
    resolve_with_options(query, now, &ResolveOptions::default())
}

/// Resolve a typed query. Infallible: every [`PeriodQuery`] is valid.
pub fn resolve_with_options<Tz: TimeZone>(
    query: &PeriodQuery,
    now: &DateTime<Tz>,
    options: &ResolveOptions,
) -> DateRange<Tz> {
    let forward = query.is_forward();
    let (near_edge, far_edge) = if forward {
        (Edge::Start, Edge::End)
    } else {
        (Edge::End, Edge::Start)
    };
    let step = match (query.include_current, forward) {
        (true, _) => 0,
        (false, true) => 1,
        (false, false) => -1,
    };

    let closer = boundary(now, query.unit, step, near_edge, options.week_start);
    let further = boundary(now, query.unit, query.count, far_edge, options.week_start);
    let range = DateRange::new(closer, further);

    tracing::debug!(
        unit = %query.unit,
        count = query.count,
        include_current = query.include_current,
        start = ?range.start.naive_local(),
        end = ?range.end.naive_local(),
        "resolved period range"
    );

    range
}

// ── Convenience ─────────────────────────────────────────────────────────────

/// The period containing `now` (`today`, `thisMonth`, ...).
pub fn this_period<Tz: TimeZone>(unit: CalendarUnit, now: &DateTime<Tz>) -> DateRange<Tz> {
    resolve_query(&PeriodQuery::this(unit), now)
}

/// The period right after the current one (`tomorrow`, `nextMonth`, ...).
pub fn next_period<Tz: TimeZone>(unit: CalendarUnit, now: &DateTime<Tz>) -> DateRange<Tz> {
    resolve_query(&PeriodQuery::next(unit), now)
}

/// The period right before the current one (`yesterday`, `lastMonth`, ...).
pub fn last_period<Tz: TimeZone>(unit: CalendarUnit, now: &DateTime<Tz>) -> DateRange<Tz> {
    resolve_query(&PeriodQuery::last(unit), now)
}
