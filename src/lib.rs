//! Call Record Ingestion Library
//!
//! A Rust library for validating call detail record (CDR) CSV exports and
//! submitting them in bulk to a call records API.
//!
//! This library provides tools for:
//! - Tokenizing CSV text with quoted fields, BOM and mixed line endings
//! - Mapping header rows to logical columns independent of order and case
//! - Normalizing phone numbers, including spreadsheet scientific notation
//! - Validating timestamps, durations and dispositions row by row
//! - Building an all-or-nothing bulk payload once every row is clean
//! - Explaining server error responses with remediation hints

pub mod config;
pub mod constants;
pub mod error;

// Core application modules
pub mod app {
    pub mod models;
    pub mod services;
}

// CLI modules
pub mod cli {
    pub mod args;
    pub mod commands;
}

// Re-export commonly used types
pub use app::models::{
    BulkPayload, Disposition, Field, FieldValues, NormalizedRecord, ParsedRow, RawTable,
};
pub use config::{IngestConfig, Settings, UploadConfig};
pub use error::{IngestError, Result};
