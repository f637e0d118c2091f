//! Core data structures for call record ingestion.
//!
//! Defines the closed set of logical CSV fields, the per-row records produced
//! during validation and the normalized records sent to the records API.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::app::services::csv_upload::field_parsers::normalize_phone;
use crate::constants::{PREVIEW_SEPARATOR, disposition};
use crate::error::IngestError;

/// Tokenized CSV content: rows of trimmed fields, header row first
pub type RawTable = Vec<Vec<String>>;

/// Logical column of a call record upload, independent of physical order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Calldate,
    Src,
    Dst,
    Duration,
    Billsec,
    Disposition,
}

impl Field {
    /// Number of logical fields
    pub const COUNT: usize = 6;

    /// All fields in canonical order
    pub const ALL: [Field; Field::COUNT] = [
        Field::Calldate,
        Field::Src,
        Field::Dst,
        Field::Duration,
        Field::Billsec,
        Field::Disposition,
    ];

    /// Lowercase column name as it appears in a header row
    pub fn name(&self) -> &'static str {
        match self {
            Field::Calldate => "calldate",
            Field::Src => "src",
            Field::Dst => "dst",
            Field::Duration => "duration",
            Field::Billsec => "billsec",
            Field::Disposition => "disposition",
        }
    }

    /// Position in canonical order
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Field {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Field::ALL
            .into_iter()
            .find(|field| field.name() == normalized)
            .ok_or_else(|| IngestError::configuration(format!("Unknown column name: '{}'", s)))
    }
}

/// Raw trimmed cell values of one data row, keyed by logical field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldValues {
    values: [String; Field::COUNT],
}

impl FieldValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw value for a field (empty when the column was absent)
    pub fn get(&self, field: Field) -> &str {
        &self.values[field.index()]
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values[field.index()] = value.into();
    }

    /// Builder-style setter, mainly for tests and fixtures
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, value);
        self
    }

    /// Iterate `(field, value)` pairs in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .into_iter()
            .map(move |field| (field, self.get(field)))
    }
}

impl Serialize for FieldValues {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(Field::COUNT))?;
        for (field, value) in self.iter() {
            map.serialize_entry(field.name(), value)?;
        }
        map.end()
    }
}

/// One validated data row of an upload
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParsedRow {
    /// 1-based row number, header row being line 1
    pub line: usize,

    /// Raw trimmed values per logical field
    pub mapped: FieldValues,

    /// Validation messages; empty means the row is clean
    pub errors: Vec<String>,
}

impl ParsedRow {
    pub fn new(line: usize, mapped: FieldValues, errors: Vec<String>) -> Self {
        Self {
            line,
            mapped,
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Single-line rendering of the row with phone numbers normalized
    pub fn preview(&self) -> String {
        Field::ALL
            .iter()
            .map(|&field| match field {
                Field::Src | Field::Dst => normalize_phone(self.mapped.get(field)),
                _ => self.mapped.get(field).to_string(),
            })
            .collect::<Vec<_>>()
            .join(PREVIEW_SEPARATOR)
    }
}

/// Canonical call outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Disposition {
    #[serde(rename = "ANSWERED")]
    Answered,
    #[serde(rename = "NO ANSWER")]
    NoAnswer,
    #[serde(rename = "OTHER")]
    Other,
}

impl Disposition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Answered => disposition::ANSWERED,
            Disposition::NoAnswer => disposition::NO_ANSWER,
            Disposition::Other => disposition::OTHER,
        }
    }
}

impl fmt::Display for Disposition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Wire representation of one call record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedRecord {
    /// ISO-8601 UTC timestamp with milliseconds
    pub calldate: String,
    pub src: String,
    pub dst: String,
    pub duration: u64,
    pub billsec: u64,
    pub disposition: Disposition,
}

/// Request body of the bulk create endpoint
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkPayload {
    pub records: Vec<NormalizedRecord>,
}

impl BulkPayload {
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
