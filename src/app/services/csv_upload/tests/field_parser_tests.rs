//! Tests for field normalizers

use chrono::{FixedOffset, TimeZone, Utc};

use super::super::field_parsers::*;
use super::utc;
use crate::app::models::Disposition;

#[test]
fn test_expand_scientific_notation() {
    assert_eq!(expand_scientific_notation("9.98901234567E+11"), "998901234567");
    assert_eq!(expand_scientific_notation("1.23e4"), "12300");
    assert_eq!(expand_scientific_notation("12E2"), "1200");
    assert_eq!(expand_scientific_notation("1.2345e2"), "123.45");
    assert_eq!(expand_scientific_notation("1.5e-3"), "0.0015");
    assert_eq!(expand_scientific_notation("-4e3"), "-4000");
    assert_eq!(expand_scientific_notation(" 712345 "), "712345");
    assert_eq!(expand_scientific_notation("e5"), "e5");
}

#[test]
fn test_huge_exponent_left_alone() {
    assert_eq!(expand_scientific_notation("1e400"), "1e400");
}

#[test]
fn test_normalize_phone() {
    assert_eq!(normalize_phone("9.98901234567E+11"), "998901234567");
    assert_eq!(normalize_phone("00712345"), "712345");
    assert_eq!(normalize_phone("0"), "0");
    assert_eq!(normalize_phone("000"), "0");
    assert_eq!(normalize_phone("71.234.56"), "7123456");
    assert_eq!(normalize_phone("+998   90\t123"), "+998 90 123");
    assert_eq!(normalize_phone("  "), "");
}

#[test]
fn test_normalize_phone_negative_exponent_drops_padding() {
    assert_eq!(normalize_phone("1.5e-3"), "15");
    assert_eq!(normalize_phone("15e-2"), "15");
    assert_eq!(normalize_phone("-1.5e-3"), "-15");
    assert_eq!(normalize_phone("1.2345e2"), "12345");
}

#[test]
fn test_normalize_phone_does_not_expand_mixed_text() {
    // Letters other than e/E disable expansion
    assert_eq!(normalize_phone("ext 1e3"), "ext 1e3");
}

#[test]
fn test_normalize_phone_is_idempotent() {
    for raw in ["9.98901234567E+11", "00712345", "+998 (90) 123-45-67", "71.234.56", "1.5e-3"] {
        let once = normalize_phone(raw);
        assert_eq!(normalize_phone(&once), once, "not idempotent for {}", raw);
    }
}

#[test]
fn test_parse_iso_datetime_variants() {
    let offset = utc();
    let expected = Utc.with_ymd_and_hms(2023, 1, 31, 12, 34, 56).unwrap();

    assert_eq!(parse_iso_datetime("2023-01-31T12:34:56Z", &offset), Some(expected));
    assert_eq!(parse_iso_datetime("2023-01-31 12:34:56", &offset), Some(expected));
    assert_eq!(parse_iso_datetime("2023-01-31T17:34:56+05:00", &offset), Some(expected));
    assert_eq!(parse_iso_datetime("2023-01-31T17:34:56+0500", &offset), Some(expected));
    assert_eq!(
        parse_iso_datetime("2023-01-31", &offset),
        Some(Utc.with_ymd_and_hms(2023, 1, 31, 0, 0, 0).unwrap())
    );
    assert_eq!(parse_iso_datetime("not a date", &offset), None);
    assert_eq!(parse_iso_datetime("2023-13-01T00:00:00Z", &offset), None);
}

#[test]
fn test_naive_timestamp_uses_configured_offset() {
    let tashkent = FixedOffset::east_opt(5 * 3600).unwrap();
    assert_eq!(
        parse_iso_datetime("2023-01-31 17:34:56", &tashkent),
        Some(Utc.with_ymd_and_hms(2023, 1, 31, 12, 34, 56).unwrap())
    );
}

#[test]
fn test_parse_mdy_datetime() {
    let offset = utc();
    assert_eq!(
        parse_mdy_datetime("1/31/2023 12:34:56", &offset),
        Some(Utc.with_ymd_and_hms(2023, 1, 31, 12, 34, 56).unwrap())
    );
    assert_eq!(
        parse_mdy_datetime("01-31-2023 9:05", &offset),
        Some(Utc.with_ymd_and_hms(2023, 1, 31, 9, 5, 0).unwrap())
    );
    assert_eq!(
        parse_calldate("01/31/2023 12:34:56", &offset),
        Some(Utc.with_ymd_and_hms(2023, 1, 31, 12, 34, 56).unwrap())
    );
    assert_eq!(parse_calldate("not-a-date", &offset), None);
    assert_eq!(parse_mdy_datetime("13/01/2023 10:00", &offset), None);
    assert_eq!(parse_mdy_datetime("2/30/2023 10:00", &offset), None);
    assert_eq!(parse_mdy_datetime("1/31/2023", &offset), None);
}

#[test]
fn test_normalize_date_to_iso() {
    let offset = utc();
    assert_eq!(
        normalize_date_to_iso("2023-01-31T12:34:56Z", &offset),
        "2023-01-31T12:34:56.000Z"
    );
    assert_eq!(
        normalize_date_to_iso("1/31/2023 12:34:56", &offset),
        "2023-01-31T12:34:56.000Z"
    );
    assert_eq!(
        normalize_date_to_iso("2023-01-31 12:34:56.789", &offset),
        "2023-01-31T12:34:56.789Z"
    );
    assert_eq!(normalize_date_to_iso("", &offset), "");
    assert_eq!(normalize_date_to_iso("yesterday", &offset), "yesterday");
}

#[test]
fn test_parse_non_negative_integer() {
    assert_eq!(parse_non_negative_integer("60"), Some(60));
    assert_eq!(parse_non_negative_integer(" 1 200 "), Some(1200));
    assert_eq!(parse_non_negative_integer("60.0"), Some(60));
    assert_eq!(parse_non_negative_integer("1e3"), Some(1000));
    assert_eq!(parse_non_negative_integer("0"), Some(0));
    assert_eq!(parse_non_negative_integer("9007199254740991"), Some(9_007_199_254_740_991));

    assert_eq!(parse_non_negative_integer(""), None);
    assert_eq!(parse_non_negative_integer("-1"), None);
    assert_eq!(parse_non_negative_integer("1.5"), None);
    assert_eq!(parse_non_negative_integer("abc"), None);
    assert_eq!(parse_non_negative_integer("inf"), None);
    assert_eq!(parse_non_negative_integer("NaN"), None);
    assert_eq!(parse_non_negative_integer("1e20"), None);
}

#[test]
fn test_classify_disposition() {
    assert_eq!(classify_disposition("ANSWERED"), Disposition::Answered);
    assert_eq!(classify_disposition("answered "), Disposition::Answered);
    assert_eq!(classify_disposition("Answered"), Disposition::Answered);
    assert_eq!(classify_disposition("NO ANSWER"), Disposition::NoAnswer);
    assert_eq!(classify_disposition("no_answer"), Disposition::NoAnswer);
    assert_eq!(classify_disposition("No-Answer"), Disposition::NoAnswer);
    assert_eq!(classify_disposition("NoAnswer"), Disposition::NoAnswer);
    assert_eq!(classify_disposition("BUSY"), Disposition::Other);
    assert_eq!(classify_disposition(""), Disposition::Other);
}

#[test]
fn test_unanswered_counts_as_answered() {
    // Substring match: "unanswered" contains "answered"
    assert_eq!(classify_disposition("unanswered"), Disposition::Answered);
}
