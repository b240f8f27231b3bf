//! Time formatting and parsing helpers.
//!
//! Durations are whole seconds throughout; session timestamps are local wall
//! clock time truncated to the second.

use chrono::{Local, NaiveDateTime, Timelike};

/// Format used for session timestamps in storage and exports.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Current local time with the sub-second part dropped.
#[must_use]
pub fn now_local() -> NaiveDateTime {
    let now = Local::now().naive_local();
    now.with_nanosecond(0).unwrap_or(now)
}

/// Render a timestamp with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn format_timestamp(ts: &NaiveDateTime) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a timestamp written by [`format_timestamp`].
///
/// RFC 3339 strings are accepted too and converted to local time.
#[must_use]
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if let Ok(ts) = NaiveDateTime::parse_from_str(s, TIMESTAMP_FORMAT) {
        return Some(ts);
    }
    chrono::DateTime::parse_from_rfc3339(s)
        .ok()
        .map(|dt| dt.with_timezone(&Local).naive_local())
        .map(|ts| ts.with_nanosecond(0).unwrap_or(ts))
}

/// Format seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours, so 100 minutes renders as `100:00`.
#[must_use]
pub fn format_mmss(total_seconds: u32) -> String {
    let minutes = total_seconds / 60;
    let seconds = total_seconds % 60;
    format!("{minutes:02}:{seconds:02}")
}

/// Format seconds as a human-readable duration ("20 minutes", "1 hour, 5 minutes").
#[must_use]
pub fn format_duration(total_seconds: u32) -> String {
    let total_minutes = total_seconds / 60;

    if total_minutes < 1 {
        return format!("{} second{}", total_seconds, plural(total_seconds));
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    if hours > 0 {
        if minutes > 0 {
            format!(
                "{} hour{}, {} minute{}",
                hours,
                plural(hours),
                minutes,
                plural(minutes)
            )
        } else {
            format!("{} hour{}", hours, plural(hours))
        }
    } else {
        format!("{} minute{}", minutes, plural(minutes))
    }
}

const fn plural(n: u32) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

/// Parse a duration string like "20m", "1h30m", "90s" into seconds.
///
/// A bare number is taken as minutes.
#[must_use]
pub fn parse_duration(s: &str) -> Option<u32> {
    let s = s.trim().to_lowercase();

    if let Ok(minutes) = s.parse::<u32>() {
        return minutes.checked_mul(60).filter(|secs| *secs > 0);
    }

    let mut total_seconds: u32 = 0;
    let mut current_num = String::new();

    for c in s.chars() {
        if c.is_ascii_digit() {
            current_num.push(c);
        } else if !current_num.is_empty() {
            let num: u32 = current_num.parse().ok()?;
            current_num.clear();

            let unit = match c {
                'h' => 3600,
                'm' => 60,
                's' => 1,
                _ => return None,
            };
            total_seconds = total_seconds.checked_add(num.checked_mul(unit)?)?;
        } else if !c.is_whitespace() {
            return None;
        }
    }

    // Trailing number without a unit counts as minutes
    if !current_num.is_empty() {
        let num: u32 = current_num.parse().ok()?;
        total_seconds = total_seconds.checked_add(num.checked_mul(60)?)?;
    }

    if total_seconds > 0 {
        Some(total_seconds)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_format_mmss() {
        assert_eq!(format_mmss(1200), "20:00");
        assert_eq!(format_mmss(90), "01:30");
        assert_eq!(format_mmss(0), "00:00");
        assert_eq!(format_mmss(6000), "100:00");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(1200), "20 minutes");
        assert_eq!(format_duration(60), "1 minute");
        assert_eq!(format_duration(7200), "2 hours");
        assert_eq!(format_duration(5400), "1 hour, 30 minutes");
        assert_eq!(format_duration(45), "45 seconds");
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("20"), Some(1200));
        assert_eq!(parse_duration("20m"), Some(1200));
        assert_eq!(parse_duration("1h30m"), Some(5400));
        assert_eq!(parse_duration("90s"), Some(90));
        assert_eq!(parse_duration("1m30s"), Some(90));
    }

    #[test]
    fn test_parse_duration_invalid() {
        assert!(parse_duration("").is_none());
        assert!(parse_duration("abc").is_none());
        assert!(parse_duration("0").is_none());
        assert!(parse_duration("5x").is_none());
    }

    #[test]
    fn test_timestamp_roundtrip_format() {
        let ts = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        let text = format_timestamp(&ts);
        assert_eq!(text, "2024-03-09 14:05:07");
        assert_eq!(parse_timestamp(&text), Some(ts));
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage() {
        assert!(parse_timestamp("yesterday").is_none());
    }

    #[test]
    fn test_now_local_has_no_subseconds() {
        assert_eq!(now_local().nanosecond(), 0);
    }
}
