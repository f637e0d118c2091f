//! Error handling for call record ingestion.
//!
//! Structural failures (empty file, missing column, blocked submission) carry
//! their user-facing text in `Display`, so callers can surface them directly.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum IngestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File is empty")]
    EmptyFile,

    #[error("Missing column: {column}")]
    MissingColumn { column: String },

    #[error("There are {count} row(s) with errors. Fix them before submitting.")]
    RowsWithErrors { count: usize },

    #[error("No rows to submit")]
    NoRows,

    #[error("Row {line} cannot be normalized: {reason}")]
    InvalidRecord { line: usize, reason: String },

    #[error("A submission is already in progress")]
    SubmissionInProgress,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl IngestError {
    pub fn missing_column(column: impl Into<String>) -> Self {
        Self::MissingColumn {
            column: column.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IngestError>;
