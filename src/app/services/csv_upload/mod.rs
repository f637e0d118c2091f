//! CSV ingestion pipeline for call record uploads
//!
//! This module turns the raw text of an uploaded CSV export into validated
//! rows and, once every row is clean, into the payload accepted by the
//! records API. Row-level problems never abort the parse; they are collected
//! per row so a preview can show all of them at once.
//!
//! ## Architecture
//!
//! The pipeline is organized into logical components:
//! - [`tokenizer`] - Quote-aware splitting of text into rows of trimmed fields
//! - [`header`] - Header row normalization and logical column lookup
//! - [`field_parsers`] - Pure normalizers for phones, timestamps, counts and dispositions
//! - [`row_validator`] - Per-row checks producing human-readable messages
//! - [`parser`] - Orchestration of the phases and payload construction
//! - [`stats`] - Parse results, counters and preview selection
//!
//! ## Usage
//!
//! ```rust
//! use cdr_ingest::app::services::csv_upload::CsvUploadParser;
//! use cdr_ingest::IngestConfig;
//!
//! # fn example() -> cdr_ingest::Result<()> {
//! let parser = CsvUploadParser::new(IngestConfig::default())?;
//! let text = "calldate,src,dst,duration,billsec,disposition\n\
//!             2023-01-31T12:34:56Z,998901234567,712345,60,55,ANSWERED";
//! let result = parser.parse_text(text)?;
//! assert_eq!(result.stats.valid_rows, 1);
//!
//! let payload = parser.build_payload(&result.rows)?;
//! assert_eq!(payload.records[0].calldate, "2023-01-31T12:34:56.000Z");
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod field_parsers;
pub mod header;
pub mod parser;
pub mod row_validator;
pub mod stats;
pub mod tokenizer;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use header::HeaderMap;
pub use parser::CsvUploadParser;
pub use row_validator::RowValidator;
pub use stats::{ParseResult, ParseStats};
pub use tokenizer::tokenize;
