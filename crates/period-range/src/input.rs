//! Parsing helpers for front ends that receive instants and zones as text.
//!
//! The resolver never parses anything; these exist so every caller turns
//! strings into a `DateTime<Tz>` the same way.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;

use crate::calendar::{localize, Edge};
use crate::error::{PeriodError, Result};

/// Parse an IANA timezone string into `Tz`.
pub fn parse_timezone(s: &str) -> Result<Tz> {
    s.trim()
        .parse::<Tz>()
        .map_err(|_| PeriodError::InvalidTimezone(format!("'{}'", s)))
}

/// Parse an instant and express it in `tz`.
///
/// Accepts RFC 3339 (`2010-11-11T12:25:30Z`), which carries its own offset,
/// or a naive `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` / `YYYY-MM-DD`,
/// which is read as wall-clock time in `tz`.
pub fn parse_instant(s: &str, tz: &Tz) -> Result<DateTime<Tz>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(tz));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .or_else(|_| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d").map(|date| date.and_time(Default::default()))
        })
        .map_err(|e| PeriodError::InvalidDatetime(format!("'{}': {}", s, e)))?;

    Ok(localize(tz, &naive, Edge::Start))
}

/// Format an instant as RFC 3339 with whole seconds.
pub fn format_instant<T: TimeZone>(dt: &DateTime<T>) -> String
where
    T::Offset: std::fmt::Display,
{
    dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// The current instant. Only front ends call this; the library takes `now`
/// as an argument everywhere.
pub fn now_in(tz: &Tz) -> DateTime<Tz> {
    Utc::now().with_timezone(tz)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_timezone() {
        assert_eq!(parse_timezone("Europe/Paris").unwrap().name(), "Europe/Paris");
        let err = parse_timezone("Mars/Olympus").unwrap_err();
        assert!(matches!(err, PeriodError::InvalidTimezone(_)));
    }

    #[test]
    fn test_parsers_return_crate_result() {
        let zone: Result<Tz> = parse_timezone(" UTC ");
        assert_eq!(zone.map(|tz| tz.name().to_string()), Ok("UTC".to_string()));
        let instant: Result<DateTime<Tz>> = parse_instant("2010-13-01", &Tz::UTC);
        assert!(matches!(instant, Err(PeriodError::InvalidDatetime(_))));
    }

    #[test]
    fn test_parse_rfc3339_keeps_instant() {
        let tz = parse_timezone("America/New_York").unwrap();
        let dt = parse_instant("2010-11-11T12:25:30Z", &tz).unwrap();
        assert_eq!(dt.with_timezone(&Utc), Utc.with_ymd_and_hms(2010, 11, 11, 12, 25, 30).unwrap());
        assert_eq!(format_instant(&dt), "2010-11-11T07:25:30-05:00");
    }

    #[test]
    fn test_parse_naive_is_wall_clock_in_zone() {
        let tz = parse_timezone("Asia/Tokyo").unwrap();
        let dt = parse_instant("2010-11-11 12:25:30", &tz).unwrap();
        assert_eq!(format_instant(&dt), "2010-11-11T12:25:30+09:00");
        let date_only = parse_instant("2010-11-11", &tz).unwrap();
        assert_eq!(format_instant(&date_only), "2010-11-11T00:00:00+09:00");
    }

    #[test]
    fn test_parse_invalid_datetime() {
        let tz = parse_timezone("UTC").unwrap();
        let err = parse_instant("next tuesday", &tz).unwrap_err();
        assert!(err.to_string().contains("next tuesday"), "got: {err}");
    }

    #[test]
    fn test_format_utc_uses_z() {
        let dt = Utc.with_ymd_and_hms(2011, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(format_instant(&dt), "2011-01-01T00:00:00Z");
    }
}
