//! Calendar arithmetic on instants: shifting by whole units and snapping to
//! the start or end of the enclosing unit.
//!
//! All functions are total. Arithmetic that would leave chrono's
//! representable range saturates a year inside it, so a boundary computed
//! from an absurd count still truncates and localizes cleanly.
//!
//! # Local time
//!
//! Day, week, month and year arithmetic moves the local calendar date and
//! keeps the wall-clock time across DST changes. Minute and hour arithmetic
//! moves elapsed time, and their edges keep the offset of the instant they
//! were cut from. Day and larger edges are cut on the local wall clock, then
//! mapped back onto the zone:
//!
//! - a wall time inside a DST fold resolves to the earlier instant for a
//!   start edge and the later one for an end edge;
//! - a wall time inside a DST gap is pushed forward by the length of the gap.

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    Offset, TimeZone, Timelike,
};

use crate::unit::{CalendarUnit, WeekStartDay};

/// Which edge of a unit a boundary is snapped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Edge {
    Start,
    End,
}

/// Shift `instant` by `count` whole units (negative moves backward).
pub fn shift<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    count: i64,
) -> DateTime<Tz> {
    if unit.is_sub_day() {
        shift_elapsed(instant, unit, count)
    } else {
        localize(&instant.timezone(), &shift_calendar(instant, unit, count), Edge::Start)
    }
}

/// First representable second of the `unit` that contains `instant`.
pub fn start_of<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    week_start: WeekStartDay,
) -> DateTime<Tz> {
    boundary(instant, unit, 0, Edge::Start, week_start)
}

/// Last representable second of the `unit` that contains `instant`.
pub fn end_of<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    week_start: WeekStartDay,
) -> DateTime<Tz> {
    boundary(instant, unit, 0, Edge::End, week_start)
}

/// Shift `instant` by `count` units, then snap to `edge` of the unit it lands in.
///
/// Minute and hour edges are pinned inside the offset the shifted instant
/// already carries, so both edges of one minute or hour stay in the same
/// pass of a repeated wall-clock hour. Day and larger edges are localized
/// once, after truncation, so an intermediate wall time that happens to fall
/// into a DST gap does not leak into the result.
pub(crate) fn boundary<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    count: i64,
    edge: Edge,
    week_start: WeekStartDay,
) -> DateTime<Tz> {
    let tz = instant.timezone();
    if unit.is_sub_day() {
        let shifted = shift_elapsed(instant, unit, count);
        let offset = shifted.offset().fix();
        let truncated = truncate(shifted.naive_local(), unit, edge, week_start);
        tz.from_utc_datetime(&(truncated - offset))
    } else {
        let truncated = truncate(shift_calendar(instant, unit, count), unit, edge, week_start);
        localize(&tz, &truncated, edge)
    }
}

/// Minute and hour arithmetic on elapsed time.
fn shift_elapsed<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    count: i64,
) -> DateTime<Tz> {
    let step = match unit {
        CalendarUnit::Minute => 60,
        _ => 3600,
    };
    let utc = count
        .checked_mul(step)
        .and_then(Duration::try_seconds)
        .and_then(|delta| clamp(instant.naive_utc()).checked_add_signed(delta))
        .map(clamp)
        .unwrap_or_else(|| saturated(count));
    instant.timezone().from_utc_datetime(&utc)
}

/// Day, week, month and year arithmetic on the local calendar date; returns
/// the wall-clock time of the result.
fn shift_calendar<Tz: TimeZone>(
    instant: &DateTime<Tz>,
    unit: CalendarUnit,
    count: i64,
) -> NaiveDateTime {
    let local = clamp(instant.naive_local());
    let shifted = match unit {
        CalendarUnit::Day => Duration::try_days(count).and_then(|d| local.checked_add_signed(d)),
        CalendarUnit::Week => Duration::try_weeks(count).and_then(|d| local.checked_add_signed(d)),
        CalendarUnit::Month => add_months(local, count),
        _ => count.checked_mul(12).and_then(|months| add_months(local, months)),
    };
    shifted.map(clamp).unwrap_or_else(|| saturated(count))
}

fn saturated(count: i64) -> NaiveDateTime {
    if count >= 0 {
        upper_limit()
    } else {
        lower_limit()
    }
}

/// Month arithmetic; a day-of-month missing from the target month clamps to
/// that month's last day (Jan 31 + 1 month = Feb 28 or 29).
fn add_months(local: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        local.checked_add_months(magnitude)
    } else {
        local.checked_sub_months(magnitude)
    }
}

/// Snap a wall-clock time to `edge` of its enclosing `unit`.
///
/// Minute and hour only pin the fields below them; day and larger units go
/// to the canonical calendar edge. Sub-second precision is always cleared.
pub(crate) fn truncate(
    local: NaiveDateTime,
    unit: CalendarUnit,
    edge: Edge,
    week_start: WeekStartDay,
) -> NaiveDateTime {
    let (pin, day_edge) = match edge {
        Edge::Start => (0, time_of_day(0, 0, 0)),
        Edge::End => (59, time_of_day(23, 59, 59)),
    };
    let date = local.date();
    let time = local.time();

    match unit {
        CalendarUnit::Minute => date.and_time(time_of_day(time.hour(), time.minute(), pin)),
        CalendarUnit::Hour => date.and_time(time_of_day(time.hour(), pin, pin)),
        CalendarUnit::Day => date.and_time(day_edge),
        CalendarUnit::Week => {
            let first = date - Duration::days(week_start.days_since_start(date.weekday()));
            match edge {
                Edge::Start => first.and_time(day_edge),
                Edge::End => (first + Duration::days(6)).and_time(day_edge),
            }
        }
        CalendarUnit::Month => {
            let first = first_of_month(date);
            match edge {
                Edge::Start => first.and_time(day_edge),
                Edge::End => (first_of_month(first + Duration::days(31)) - Duration::days(1))
                    .and_time(day_edge),
            }
        }
        CalendarUnit::Year => {
            let first = first_of_year(date);
            match edge {
                Edge::Start => first.and_time(day_edge),
                Edge::End => (first_of_year(first + Duration::days(366)) - Duration::days(1))
                    .and_time(day_edge),
            }
        }
    }
}

/// Map a wall-clock time in `tz` onto an instant.
pub(crate) fn localize<Tz: TimeZone>(tz: &Tz, local: &NaiveDateTime, edge: Edge) -> DateTime<Tz> {
    match tz.from_local_datetime(local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, latest) => match edge {
            Edge::Start => earliest,
            Edge::End => latest,
        },
        LocalResult::None => {
            // Gap: read the wall time with the offset in force before the jump.
            let before = tz.offset_from_utc_datetime(&(*local - Duration::days(1))).fix();
            tz.from_utc_datetime(&(*local - before))
        }
    }
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.day0() as i64)
}

fn time_of_day(hour: u32, minute: u32, second: u32) -> NaiveTime {
    NaiveTime::MIN + Duration::seconds(i64::from(hour * 3600 + minute * 60 + second))
}

/// Earliest wall time arithmetic saturates to: Jan 1 of the year after
/// chrono's minimum, leaving room for week truncation and zone offsets.
fn lower_limit() -> NaiveDateTime {
    let first = NaiveDate::MIN + Duration::days(366);
    first_of_year(first).and_time(NaiveTime::MIN)
}

/// Latest wall time arithmetic saturates to: Dec 31 23:59:59 of the year
/// before chrono's maximum.
fn upper_limit() -> NaiveDateTime {
    let last = first_of_year(NaiveDate::MAX) - Duration::days(1);
    last.and_time(time_of_day(23, 59, 59))
}

fn first_of_year(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.ordinal0() as i64)
}

fn clamp(local: NaiveDateTime) -> NaiveDateTime {
    local.clamp(lower_limit(), upper_limit())
}
