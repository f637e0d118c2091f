//! Test utilities for the CSV upload pipeline
//!
//! Fixture builders shared by the pipeline test modules.

use chrono::FixedOffset;

use crate::app::models::{Field, FieldValues};
use crate::config::IngestConfig;

use super::parser::CsvUploadParser;

// Test modules
mod field_parser_tests;
mod stats_tests;

/// Canonical header row
pub const TEST_HEADER: &str = "calldate,src,dst,duration,billsec,disposition";

/// Helper to create a parser with default settings
pub fn create_test_parser() -> CsvUploadParser {
    CsvUploadParser::new(IngestConfig::default()).unwrap()
}

/// UTC offset used by default
pub fn utc() -> FixedOffset {
    FixedOffset::east_opt(0).unwrap()
}

/// Helper to create a clean upload with `rows` answered calls
pub fn create_clean_csv(rows: usize) -> String {
    let mut text = TEST_HEADER.to_string();
    for i in 0..rows {
        text.push_str(&format!(
            "\n2023-01-31T12:{:02}:00Z,99890123{:04},712345,{},{},ANSWERED",
            i % 60,
            i,
            60 + i,
            55 + i
        ));
    }
    text
}

/// Helper to create a valid mapped row
pub fn create_valid_values() -> FieldValues {
    FieldValues::new()
        .with(Field::Calldate, "2023-01-31T12:34:56Z")
        .with(Field::Src, "998901234567")
        .with(Field::Dst, "712345")
        .with(Field::Duration, "60")
        .with(Field::Billsec, "55")
        .with(Field::Disposition, "ANSWERED")
}
