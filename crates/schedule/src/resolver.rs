//! Time-of-day parsing and next-occurrence resolution.
//!
//! A shutdown time is configured as a daily `HH:MM:SS` wall-clock time.
//! [`resolve_next`] maps it to the next absolute instant at or after "now",
//! rolling over to the next day when the time has already passed today.

use chrono::{DateTime, NaiveTime, Utc};

use crate::error::ScheduleError;

/// Parse a 24-hour `HH:MM:SS` time-of-day string.
///
/// Out-of-range fields and trailing garbage are rejected.
pub fn parse_time_of_day(input: &str) -> Result<NaiveTime, ScheduleError> {
    NaiveTime::parse_from_str(input.trim(), "%H:%M:%S").map_err(|e| {
        ScheduleError::InvalidTimeOfDay {
            input: input.to_string(),
            reason: e.to_string(),
        }
    })
}

/// Resolve the next instant at or after `now` matching `time_of_day`.
///
/// Combines `now`'s calendar date with the time-of-day; if that candidate
/// is at or before `now`, exactly one day is added. The result is always
/// strictly after `now` and at most 24h ahead.
pub fn resolve_next(now: DateTime<Utc>, time_of_day: NaiveTime) -> DateTime<Utc> {
    let candidate = now.date_naive().and_time(time_of_day).and_utc();
    if candidate <= now {
        candidate + chrono::Duration::days(1)
    } else {
        candidate
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn parse_valid_time() {
        let t = parse_time_of_day("04:30:15").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(4, 30, 15).unwrap());
    }

    #[test]
    fn parse_midnight() {
        let t = parse_time_of_day("00:00:00").unwrap();
        assert_eq!(t, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
    }

    #[test]
    fn parse_trims_whitespace() {
        assert!(parse_time_of_day(" 12:00:00 ").is_ok());
    }

    #[test]
    fn parse_rejects_out_of_range_hour() {
        let err = parse_time_of_day("25:00:00").unwrap_err();
        assert!(matches!(err, ScheduleError::InvalidTimeOfDay { .. }));
    }

    #[test]
    fn parse_rejects_out_of_range_minute() {
        assert!(parse_time_of_day("12:61:00").is_err());
    }

    #[test]
    fn parse_rejects_missing_seconds() {
        assert!(parse_time_of_day("12:00").is_err());
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_time_of_day("noonish").is_err());
        assert!(parse_time_of_day("").is_err());
        assert!(parse_time_of_day("12:00:00 tomorrow").is_err());
    }

    #[test]
    fn later_today_stays_on_same_day() {
        let now = utc(2026, 3, 10, 8, 0, 0);
        let target = resolve_next(now, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(target, utc(2026, 3, 10, 9, 0, 0));
    }

    #[test]
    fn already_passed_rolls_to_next_day() {
        // now = 10:00:00, time = 09:00:00 -> next day 09:00:00 (now + 23h)
        let now = utc(2026, 3, 10, 10, 0, 0);
        let target = resolve_next(now, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(target, utc(2026, 3, 11, 9, 0, 0));
        assert_eq!(target - now, chrono::Duration::hours(23));
    }

    #[test]
    fn midnight_just_before_day_boundary() {
        // now = 23:59:50, time = 00:00:00 -> ten seconds out
        let now = utc(2026, 3, 10, 23, 59, 50);
        let target = resolve_next(now, NaiveTime::from_hms_opt(0, 0, 0).unwrap());
        assert_eq!(target - now, chrono::Duration::seconds(10));
    }

    #[test]
    fn exact_match_rolls_a_full_day() {
        let now = utc(2026, 3, 10, 9, 0, 0);
        let target = resolve_next(now, NaiveTime::from_hms_opt(9, 0, 0).unwrap());
        assert_eq!(target - now, chrono::Duration::days(1));
    }

    #[test]
    fn result_is_always_future_and_within_a_day() {
        let now = utc(2026, 3, 10, 17, 42, 13);
        for (h, m, s) in [(0, 0, 0), (17, 42, 13), (17, 42, 14), (23, 59, 59)] {
            let tod = NaiveTime::from_hms_opt(h, m, s).unwrap();
            let target = resolve_next(now, tod);
            assert!(target > now, "target {target} not after {now}");
            assert!(target - now <= chrono::Duration::hours(24));
        }
    }
}
