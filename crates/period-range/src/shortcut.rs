//! Named period shortcuts: `today`, `lastMonth`, `nextWeek`, ...
//!
//! Shortcuts are not listed by hand. [`Shortcut::all`] is the cartesian
//! product of [`Relation::ALL`] and [`CalendarUnit::ALL`], and names are
//! derived from the pair, so adding a unit adds its three shortcuts.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone};
use serde::{Deserialize, Serialize};

use crate::error::PeriodError;
use crate::resolver::{resolve_with_options, DateRange, PeriodQuery};
use crate::unit::{CalendarUnit, ResolveOptions};

/// Where a shortcut sits relative to the current period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Relation {
    Last,
    This,
    Next,
}

impl Relation {
    pub const ALL: [Relation; 3] = [Relation::Last, Relation::This, Relation::Next];

    /// The query this relation stands for at `unit` granularity.
    pub fn query(&self, unit: CalendarUnit) -> PeriodQuery {
        match self {
            Relation::Last => PeriodQuery::last(unit),
            Relation::This => PeriodQuery::this(unit),
            Relation::Next => PeriodQuery::next(unit),
        }
    }

    fn prefix(&self) -> &'static str {
        match self {
            Relation::Last => "last",
            Relation::This => "this",
            Relation::Next => "next",
        }
    }
}

/// A fixed `(relation, unit)` pair with a camel-case name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Shortcut {
    pub relation: Relation,
    pub unit: CalendarUnit,
}

impl Shortcut {
    pub fn new(relation: Relation, unit: CalendarUnit) -> Self {
        Self { relation, unit }
    }

    /// Every shortcut, grouped by relation.
    pub fn all() -> impl Iterator<Item = Shortcut> {
        Relation::ALL.into_iter().flat_map(|relation| {
            CalendarUnit::ALL
                .into_iter()
                .map(move |unit| Shortcut::new(relation, unit))
        })
    }

    /// `yesterday`/`today`/`tomorrow` for days, `<relation><Unit>` otherwise.
    pub fn name(&self) -> String {
        match (self.relation, self.unit) {
            (Relation::Last, CalendarUnit::Day) => "yesterday".to_string(),
            (Relation::This, CalendarUnit::Day) => "today".to_string(),
            (Relation::Next, CalendarUnit::Day) => "tomorrow".to_string(),
            (relation, unit) => {
                let unit = unit.as_str();
                let mut name = String::with_capacity(relation.prefix().len() + unit.len());
                name.push_str(relation.prefix());
                name.push_str(&unit[..1].to_uppercase());
                name.push_str(&unit[1..]);
                name
            }
        }
    }

    pub fn query(&self) -> PeriodQuery {
        self.relation.query(self.unit)
    }

    pub fn resolve<Tz: TimeZone>(
        &self,
        now: &DateTime<Tz>,
        options: &ResolveOptions,
    ) -> DateRange<Tz> {
        resolve_with_options(&self.query(), now, options)
    }
}

impl fmt::Display for Shortcut {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// Parse a shortcut by the exact name [`Shortcut::name`] produces.
impl FromStr for Shortcut {
    type Err = PeriodError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Shortcut::all()
            .find(|shortcut| shortcut.name() == s)
            .ok_or_else(|| PeriodError::UnknownShortcut(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_unit_has_three_shortcuts() {
        assert_eq!(Shortcut::all().count(), 3 * CalendarUnit::ALL.len());
        for unit in CalendarUnit::ALL {
            assert_eq!(Shortcut::all().filter(|s| s.unit == unit).count(), 3);
        }
    }

    #[test]
    fn test_names_are_unique() {
        let names: HashSet<String> = Shortcut::all().map(|s| s.name()).collect();
        assert_eq!(names.len(), Shortcut::all().count());
    }

    #[test]
    fn test_known_names() {
        let names: Vec<String> = Shortcut::all().map(|s| s.name()).collect();
        for expected in [
            "lastMinute", "thisHour", "nextHour", "yesterday", "today", "tomorrow", "thisWeek",
            "nextWeek", "lastMonth", "thisYear", "nextYear",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn test_from_str_round_trips_every_name() {
        for shortcut in Shortcut::all() {
            assert_eq!(shortcut.name().parse::<Shortcut>(), Ok(shortcut));
        }
    }

    #[test]
    fn test_from_str_rejects_unknown() {
        assert_eq!(
            "thisDay".parse::<Shortcut>(),
            Err(PeriodError::UnknownShortcut("thisDay".to_string()))
        );
        assert!("nextyear".parse::<Shortcut>().is_err());
        assert!("lastFortnight".parse::<Shortcut>().is_err());
    }

    #[test]
    fn test_relation_queries() {
        assert_eq!(
            Relation::This.query(CalendarUnit::Month),
            PeriodQuery::new(CalendarUnit::Month, 0, true)
        );
        assert_eq!(
            Relation::Next.query(CalendarUnit::Hour),
            PeriodQuery::new(CalendarUnit::Hour, 1, false)
        );
        assert_eq!(
            Relation::Last.query(CalendarUnit::Year),
            PeriodQuery::new(CalendarUnit::Year, -1, false)
        );
    }

    #[test]
    fn test_tomorrow_resolves_to_next_day() {
        use chrono::Utc;

        let now = Utc.with_ymd_and_hms(2010, 11, 11, 12, 25, 30).unwrap();
        let tomorrow: Shortcut = "tomorrow".parse().unwrap();
        let range = tomorrow.resolve(&now, &ResolveOptions::default());
        assert_eq!(*range.start(), Utc.with_ymd_and_hms(2010, 11, 12, 0, 0, 0).unwrap());
        assert_eq!(*range.end(), Utc.with_ymd_and_hms(2010, 11, 12, 23, 59, 59).unwrap());
    }
}
