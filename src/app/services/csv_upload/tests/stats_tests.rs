//! Tests for parse results and preview selection

use super::super::stats::{ParseResult, ParseStats};
use super::create_valid_values;
use crate::app::models::ParsedRow;

fn rows(bad_lines: &[usize], total: usize) -> Vec<ParsedRow> {
    (2..total + 2)
        .map(|line| {
            let errors = if bad_lines.contains(&line) {
                vec!["bad".to_string(), "worse".to_string()]
            } else {
                vec![]
            };
            ParsedRow::new(line, create_valid_values(), errors)
        })
        .collect()
}

#[test]
fn test_stats_counts() {
    let stats = ParseStats::from_rows(&rows(&[3, 5], 8));

    assert_eq!(stats.total_rows, 8);
    assert_eq!(stats.valid_rows, 6);
    assert_eq!(stats.invalid_rows, 2);
    assert_eq!(stats.error_count, 4);
    assert_eq!(stats.success_rate(), 75.0);
    assert!(!stats.is_submittable());
}

#[test]
fn test_empty_stats() {
    let stats = ParseStats::from_rows(&[]);
    assert_eq!(stats, ParseStats::default());
    assert_eq!(stats.success_rate(), 0.0);
    assert!(!stats.is_submittable());
}

#[test]
fn test_preview_prefers_bad_rows() {
    let result = ParseResult::new(vec![], rows(&[4, 9, 11], 12));
    let lines: Vec<usize> = result.preview_rows(5).iter().map(|row| row.line).collect();
    assert_eq!(lines, vec![4, 9, 11]);
}

#[test]
fn test_clean_preview_is_limited() {
    let result = ParseResult::new(vec![], rows(&[], 12));
    assert!(result.stats.is_submittable());
    let lines: Vec<usize> = result.preview_rows(5).iter().map(|row| row.line).collect();
    assert_eq!(lines, vec![2, 3, 4, 5, 6]);
}

#[test]
fn test_row_preview_text() {
    let row = ParsedRow::new(
        2,
        create_valid_values().with(crate::app::models::Field::Src, "9.98901234567E+11"),
        vec![],
    );
    assert_eq!(
        row.preview(),
        "2023-01-31T12:34:56Z · 998901234567 · 712345 · 60 · 55 · ANSWERED"
    );
}
