//! Field normalizers for call record uploads
//!
//! Pure functions with no shared state: phone numbers (including repair of
//! spreadsheet scientific notation), call timestamps, duration counters and
//! disposition classification.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, TimeZone, Utc};
use regex::Regex;
use std::sync::LazyLock;
use tracing::warn;

use crate::app::models::Disposition;

/// `1.2345E+11`, `-4e3`, `12E2`
static SCIENTIFIC_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([+-]?)(\d+)(?:\.(\d+))?[eE]([+-]?\d+)$").expect("Invalid scientific regex")
});

static LEADING_ZEROS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^0+(\d+)").expect("Invalid leading zeros regex"));

static WHITESPACE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// `M/D/YYYY H:MM[:SS]`, dashes also accepted between date parts
static MDY_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,2})[/\-](\d{1,2})[/\-](\d{4})\s+(\d{1,2}):(\d{2})(?::(\d{2}))?$")
        .expect("Invalid month/day/year regex")
});

/// ISO-like timestamps carrying a zone designator
const ZONED_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%#z",
    "%Y-%m-%dT%H:%M%#z",
    "%Y-%m-%d %H:%M:%S%.f%#z",
    "%Y-%m-%d %H:%M%#z",
];

/// ISO-like timestamps without a zone, read in the local offset
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

/// Largest integer a count may hold without losing precision upstream
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Exponents beyond this are left unexpanded
const MAX_EXPONENT: i64 = 100;

/// Mantissa digits of a scientific literal and where its decimal point lands
struct Scientific {
    sign: &'static str,
    digits: String,
    /// Index of the decimal point within `digits`; may fall outside it
    point: i64,
}

fn decode_scientific(trimmed: &str) -> Option<Scientific> {
    if !trimmed.contains(['e', 'E']) {
        return None;
    }
    let caps = SCIENTIFIC_REGEX.captures(trimmed)?;

    let exponent = caps[4].parse::<i64>().ok().filter(|exp| exp.abs() <= MAX_EXPONENT)?;
    let frac_part = caps.get(3).map_or("", |m| m.as_str());
    let digits = format!("{}{}", &caps[2], frac_part);
    let point = digits.len() as i64 - (frac_part.len() as i64 - exponent);

    Some(Scientific {
        sign: if &caps[1] == "-" { "-" } else { "" },
        digits,
        point,
    })
}

/// Expand scientific notation back to a plain digit string
///
/// Spreadsheets turn long phone numbers into `9.9890123E+11`; this rebuilds
/// the integer from the mantissa digits and exponent. Anything that is not
/// scientific notation is returned trimmed and otherwise unchanged.
pub fn expand_scientific_notation(value: &str) -> String {
    let trimmed = value.trim();
    let Some(Scientific { sign, digits, point }) = decode_scientific(trimmed) else {
        return trimmed.to_string();
    };

    let len = digits.len() as i64;
    if point >= len {
        let padding = "0".repeat((point - len) as usize);
        format!("{}{}{}", sign, digits, padding)
    } else if point > 0 {
        let (whole, fraction) = digits.split_at(point as usize);
        format!("{}{}.{}", sign, whole, fraction)
    } else {
        let padding = "0".repeat(point.unsigned_abs() as usize);
        format!("{}0.{}{}", sign, padding, digits)
    }
}

/// Phone flavour of [`expand_scientific_notation`]
///
/// A point before the first mantissa digit yields `.digits` with no zero
/// padding, so `1.5e-3` ends up as `15` once dots are removed.
fn expand_phone_scientific(value: &str) -> String {
    match decode_scientific(value.trim()) {
        Some(Scientific { sign, digits, point }) if point <= 0 => {
            format!("{}.{}", sign, digits)
        }
        _ => expand_scientific_notation(value),
    }
}

/// Normalize a phone number for validation and submission
///
/// Scientific notation is expanded first, then leading zeros are stripped
/// (a lone `0` survives), dots are removed and whitespace runs collapse to a
/// single space.
pub fn normalize_phone(raw: &str) -> String {
    let mut value = raw.trim().to_string();
    if value.is_empty() {
        return value;
    }

    let numeric_like = value
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '.' | '+' | '-' | 'e' | 'E'));
    if numeric_like && value.contains(['e', 'E']) {
        value = expand_phone_scientific(&value);
    }

    let value = LEADING_ZEROS_REGEX.replace(&value, "$1");
    let value = value.replace('.', "");
    WHITESPACE_REGEX.replace_all(&value, " ").into_owned()
}

/// Parse the explicit `M/D/YYYY H:MM[:SS]` form in the given offset
///
/// Out-of-range components (month 13, February 30th, hour 24) are rejected
/// rather than rolled over.
pub fn parse_mdy_datetime(value: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let caps = MDY_REGEX.captures(value.trim())?;

    let month: u32 = caps[1].parse().ok()?;
    let day: u32 = caps[2].parse().ok()?;
    let year: i32 = caps[3].parse().ok()?;
    let hour: u32 = caps[4].parse().ok()?;
    let minute: u32 = caps[5].parse().ok()?;
    let second: u32 = match caps.get(6) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0,
    };

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    local_to_utc(&naive, offset)
}

/// Parse an ISO-8601-like timestamp
///
/// Accepts `T` or a space between date and time, optional seconds and
/// fraction, and an optional zone (`Z`, `+05:00`, `+0500`). Timestamps without
/// a zone are read in `offset`; a bare date is midnight UTC.
pub fn parse_iso_datetime(value: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ZONED_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(value, format) {
            return Some(dt.with_timezone(&Utc));
        }
    }

    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return local_to_utc(&naive, offset);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parse a call timestamp: ISO form first, then the month/day/year form
pub fn parse_calldate(value: &str, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    parse_iso_datetime(value, offset).or_else(|| parse_mdy_datetime(value, offset))
}

/// Convert a call timestamp to the wire format
///
/// Tries the ISO form, then month/day/year, then the ISO form again with the
/// first space replaced by `T`. When nothing parses the input is returned
/// unchanged.
pub fn normalize_date_to_iso(value: &str, offset: &FixedOffset) -> String {
    if value.is_empty() {
        return String::new();
    }

    let parsed = parse_iso_datetime(value, offset)
        .or_else(|| parse_mdy_datetime(value, offset))
        .or_else(|| parse_iso_datetime(&value.replacen(' ', "T", 1), offset));

    match parsed {
        Some(dt) => format_iso_utc(&dt),
        None => {
            warn!("Passing through unparseable calldate '{}'", value);
            value.to_string()
        }
    }
}

/// `2023-01-31T12:34:56.000Z`
pub fn format_iso_utc(dt: &DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Parse a duration counter as a non-negative integer
///
/// Internal whitespace is ignored. Fractional, negative, non-finite and
/// non-numeric values yield `None`, as does an empty string.
pub fn parse_non_negative_integer(raw: &str) -> Option<u64> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return None;
    }

    let value: f64 = compact.parse().ok()?;
    if !value.is_finite() || value < 0.0 || value.fract() != 0.0 || value > MAX_SAFE_INTEGER {
        return None;
    }

    Some(value as u64)
}

/// Classify a free-form disposition into its canonical value
///
/// Case, underscores and hyphens are ignored. This is lossy: every value
/// that is neither answered nor unanswered becomes `OTHER`.
pub fn classify_disposition(value: &str) -> Disposition {
    let normalized = value.trim().to_lowercase().replace(['_', '-'], " ");

    if normalized.contains("answered") {
        Disposition::Answered
    } else if normalized.contains("no answer") || normalized.contains("noanswer") {
        Disposition::NoAnswer
    } else {
        Disposition::Other
    }
}

fn local_to_utc(naive: &NaiveDateTime, offset: &FixedOffset) -> Option<DateTime<Utc>> {
    offset
        .from_local_datetime(naive)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
}
