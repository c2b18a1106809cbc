//! Date-string normalization.
//!
//! Upstream producers are inconsistent about date formats, so a fixed,
//! ordered chain of parsing strategies is tried against the input text and
//! the first to succeed wins. Strict ISO forms come first; progressively
//! looser heuristics only run after every strict form has failed, so
//! ambiguous-but-parseable values are accepted without masking genuinely
//! malformed input. Exhaustion of the chain is the only give-up signal and
//! yields `None`, never an error; the caller substitutes a default or
//! leaves the field null.

use std::sync::OnceLock;

use chrono::{DateTime, FixedOffset, Local, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;

/// ISO calendar date followed by a trailing zone token.
fn zoned_iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4}-\d{2}-\d{2})(Z|z|UTC|GMT|UT|[+-]\d{2}:?\d{2})$").unwrap()
    })
}

/// Compact `yyyyMMdd` date followed by a trailing zone token.
fn zoned_compact_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{8})(Z|z|UTC|GMT|UT|[+-]\d{2}:?\d{2})$").unwrap())
}

/// Compact `yyyyMMddHHmmss` date-time followed by a trailing zone token.
fn zoned_compact_date_time_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{14})(Z|z|UTC|GMT|UT|[+-]\d{2}:?\d{2})$").unwrap())
}

/// Normalizes an arbitrary date/time string to a canonical UTC instant.
///
/// The strategies, in order:
///
/// 1. full ISO date-time with explicit offset
/// 2. ISO calendar date with trailing zone token → that day's 12:00 UTC
/// 3. compact `yyyyMMdd` with zone token → that day's 12:00 UTC
/// 4. compact `yyyyMMddHHmmss` with zone token
/// 5. ISO date-time lacking an offset, UTC assumed
/// 6. ISO calendar date alone, midnight UTC assumed
/// 7. compact `yyyyMMdd` alone, noon UTC assumed
/// 8. compact `yyyyMMddHHmmss` alone, UTC assumed
/// 9. `yyyy-MM-dd HH:mm:ss`, interpreted in the process-local time zone
/// 10. `yyyy-MM-dd'T'HH:mm:ss` carrying a literal `T00:00` zone marker,
///     interpreted in the process-local time zone
///
/// # Example
///
/// ```rust
/// use chrono::{TimeZone, Utc};
/// use recordpath::datetime::normalize;
///
/// let instant = normalize("2021-05-01T10:00:00+02:00").unwrap();
/// assert_eq!(instant, Utc.with_ymd_and_hms(2021, 5, 1, 8, 0, 0).unwrap());
///
/// assert!(normalize("not-a-date").is_none());
/// ```
pub fn normalize(text: &str) -> Option<DateTime<Utc>> {
    iso_date_time(text)
        .or_else(|| iso_date_with_zone(text))
        .or_else(|| compact_date(text))
        .or_else(|| compact_date_time(text))
        .or_else(|| iso_date_time_assumed_utc(text))
        .or_else(|| iso_date_assumed_midnight(text))
        .or_else(|| compact_date_assumed_noon(text))
        .or_else(|| compact_date_time_assumed_utc(text))
        .or_else(|| local_date_time(text))
        .or_else(|| zone_marker_date_time(text))
}

/// Strategy 1: strict ISO date-time with offset, second or minute precision.
fn iso_date_time(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
        return Some(parsed.with_timezone(&Utc));
    }
    DateTime::parse_from_str(text, "%Y-%m-%dT%H:%M%:z")
        .ok()
        .map(|parsed| parsed.with_timezone(&Utc))
}

/// Strategy 2: calendar date with a zone token, rewritten to 12:00 UTC.
fn iso_date_with_zone(text: &str) -> Option<DateTime<Utc>> {
    let captures = zoned_iso_date_re().captures(text)?;
    let date = NaiveDate::parse_from_str(&captures[1], "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0)?))
}

/// Strategy 3: compact date with a zone token, rewritten to 12:00 UTC.
fn compact_date(text: &str) -> Option<DateTime<Utc>> {
    let captures = zoned_compact_date_re().captures(text)?;
    let date = NaiveDate::parse_from_str(&captures[1], "%Y%m%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0)?))
}

/// Strategy 4: compact date-time with a zone token.
fn compact_date_time(text: &str) -> Option<DateTime<Utc>> {
    let captures = zoned_compact_date_time_re().captures(text)?;
    let local = NaiveDateTime::parse_from_str(&captures[1], "%Y%m%d%H%M%S").ok()?;
    let offset = zone_offset(&captures[2])?;
    Some(
        offset
            .from_local_datetime(&local)
            .single()?
            .with_timezone(&Utc),
    )
}

/// Strategy 5: ISO date-time lacking an offset, UTC assumed.
fn iso_date_time_assumed_utc(text: &str) -> Option<DateTime<Utc>> {
    iso_date_time(&format!("{text}Z"))
}

/// Strategy 6: calendar date lacking a time, midnight UTC assumed.
fn iso_date_assumed_midnight(text: &str) -> Option<DateTime<Utc>> {
    let date = NaiveDate::parse_from_str(text, "%Y-%m-%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?))
}

/// Strategy 7: compact date lacking a time, noon UTC assumed.
fn compact_date_assumed_noon(text: &str) -> Option<DateTime<Utc>> {
    if text.len() != 8 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let date = NaiveDate::parse_from_str(text, "%Y%m%d").ok()?;
    Some(Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0)?))
}

/// Strategy 8: compact date-time lacking a zone, UTC assumed.
fn compact_date_time_assumed_utc(text: &str) -> Option<DateTime<Utc>> {
    if text.len() != 14 || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let local = NaiveDateTime::parse_from_str(text, "%Y%m%d%H%M%S").ok()?;
    Some(Utc.from_utc_datetime(&local))
}

/// Strategy 9: space-separated date-time in the process-local time zone.
fn local_date_time(text: &str) -> Option<DateTime<Utc>> {
    let local = NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S").ok()?;
    Some(
        Local
            .from_local_datetime(&local)
            .earliest()?
            .with_timezone(&Utc),
    )
}

/// Strategy 10: ISO date-time carrying a literal `T00:00` zone marker,
/// interpreted in the process-local time zone.
fn zone_marker_date_time(text: &str) -> Option<DateTime<Utc>> {
    let local = NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%ST00:00").ok()?;
    Some(
        Local
            .from_local_datetime(&local)
            .earliest()?
            .with_timezone(&Utc),
    )
}

/// Interprets a trailing zone token: `Z`/`z`, the UTC aliases, `±HH:MM`
/// and `±HHMM`.
fn zone_offset(token: &str) -> Option<FixedOffset> {
    match token {
        "Z" | "z" | "UTC" | "GMT" | "UT" => FixedOffset::east_opt(0),
        _ => {
            let (sign, rest) = token.split_at(1);
            let digits = rest.replace(':', "");
            if digits.len() != 4 {
                return None;
            }
            let hours: i32 = digits[..2].parse().ok()?;
            let minutes: i32 = digits[2..].parse().ok()?;
            let seconds = hours * 3600 + minutes * 60;
            match sign {
                "+" => FixedOffset::east_opt(seconds),
                "-" => FixedOffset::west_opt(seconds),
                _ => None,
            }
        }
    }
}
