//! Parse results and counters for CSV uploads
//!
//! This module provides the result of running the pipeline over one file,
//! along with the counters and preview selection used for reporting.

use serde::{Deserialize, Serialize};

use crate::app::models::ParsedRow;

/// Outcome of parsing one uploaded file
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParseResult {
    /// Header cells as found in the file (trimmed, BOM removed)
    pub headers: Vec<String>,

    /// Every data row in file order, clean or not
    pub rows: Vec<ParsedRow>,

    /// Row counters
    pub stats: ParseStats,
}

impl ParseResult {
    pub fn new(headers: Vec<String>, rows: Vec<ParsedRow>) -> Self {
        let stats = ParseStats::from_rows(&rows);
        Self {
            headers,
            rows,
            stats,
        }
    }

    /// Check if any row blocks submission
    pub fn has_errors(&self) -> bool {
        self.stats.invalid_rows > 0
    }

    /// Rows with at least one validation message
    pub fn invalid_rows(&self) -> impl Iterator<Item = &ParsedRow> {
        self.rows.iter().filter(|row| !row.is_valid())
    }

    /// Rows worth showing: every bad row if there are any, else the first `limit`
    pub fn preview_rows(&self, limit: usize) -> Vec<&ParsedRow> {
        if self.has_errors() {
            self.invalid_rows().collect()
        } else {
            self.rows.iter().take(limit).collect()
        }
    }
}

/// Row counters for one parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseStats {
    /// Number of data rows (header excluded)
    pub total_rows: usize,

    /// Rows without validation messages
    pub valid_rows: usize,

    /// Rows with one or more validation messages
    pub invalid_rows: usize,

    /// Validation messages across all rows
    pub error_count: usize,
}

impl ParseStats {
    pub fn from_rows(rows: &[ParsedRow]) -> Self {
        let invalid_rows = rows.iter().filter(|row| !row.is_valid()).count();
        Self {
            total_rows: rows.len(),
            valid_rows: rows.len() - invalid_rows,
            invalid_rows,
            error_count: rows.iter().map(|row| row.errors.len()).sum(),
        }
    }

    /// Calculate the clean row share as a percentage
    pub fn success_rate(&self) -> f64 {
        if self.total_rows == 0 {
            0.0
        } else {
            (self.valid_rows as f64 / self.total_rows as f64) * 100.0
        }
    }

    /// Check if the batch can be submitted as a whole
    pub fn is_submittable(&self) -> bool {
        self.total_rows > 0 && self.invalid_rows == 0
    }
}
