//! Orchestration of the CSV upload pipeline
//!
//! Runs tokenize → header mapping → per-row validation over one file, and
//! builds the submission payload once every row is clean.

use chrono::FixedOffset;
use tracing::{debug, info};

use super::field_parsers::{
    classify_disposition, normalize_date_to_iso, normalize_phone, parse_non_negative_integer,
};
use super::header::HeaderMap;
use super::row_validator::RowValidator;
use super::stats::ParseResult;
use super::tokenizer::tokenize;
use crate::app::models::{BulkPayload, Field, NormalizedRecord, ParsedRow};
use crate::config::IngestConfig;
use crate::error::{IngestError, Result};

/// Call record CSV parser
///
/// Holds no per-upload state, so one parser can serve any number of files,
/// concurrently or in isolation.
#[derive(Debug, Clone)]
pub struct CsvUploadParser {
    config: IngestConfig,
    validator: RowValidator,
}

impl CsvUploadParser {
    /// Create a parser, validating the configuration up front
    pub fn new(config: IngestConfig) -> Result<Self> {
        config.validate()?;
        let validator = RowValidator::new(&config)?;
        Ok(Self { config, validator })
    }

    pub fn config(&self) -> &IngestConfig {
        &self.config
    }

    pub fn validator(&self) -> &RowValidator {
        &self.validator
    }

    /// Parse full file contents into validated rows
    ///
    /// Fails only on structural problems: an empty file or a missing required
    /// column. Row problems are recorded on the rows themselves.
    pub fn parse_text(&self, text: &str) -> Result<ParseResult> {
        let table = tokenize(text);
        let Some((header_row, data_rows)) = table.split_first() else {
            return Err(IngestError::EmptyFile);
        };

        let header_map = HeaderMap::build(header_row, &self.config.required_columns)?;
        debug!("Header row: {:?}", header_map.headers());

        let rows: Vec<ParsedRow> = data_rows
            .iter()
            .enumerate()
            .map(|(index, raw)| {
                // Header is line 1
                let line = index + 2;
                let mapped = header_map.map_row(raw);
                let errors = self.validator.validate(&mapped);
                if !errors.is_empty() {
                    debug!("Line {}: {}", line, errors.join("; "));
                }
                ParsedRow::new(line, mapped, errors)
            })
            .collect();

        let result = ParseResult::new(header_map.headers().to_vec(), rows);
        info!(
            "Parsed {} rows: {} ready, {} with errors",
            result.stats.total_rows, result.stats.valid_rows, result.stats.invalid_rows
        );

        Ok(result)
    }

    /// Build the submission payload from parsed rows
    ///
    /// All-or-nothing: a single bad row blocks the whole batch.
    pub fn build_payload(&self, rows: &[ParsedRow]) -> Result<BulkPayload> {
        let bad_rows = rows.iter().filter(|row| !row.is_valid()).count();
        if bad_rows > 0 {
            return Err(IngestError::RowsWithErrors { count: bad_rows });
        }
        if rows.is_empty() {
            return Err(IngestError::NoRows);
        }

        let records = rows
            .iter()
            .map(|row| self.normalize_row(row))
            .collect::<Result<Vec<_>>>()?;

        debug!("Built payload with {} records", records.len());
        Ok(BulkPayload { records })
    }

    /// Convert one clean row to its wire form
    pub fn normalize_row(&self, row: &ParsedRow) -> Result<NormalizedRecord> {
        if !row.is_valid() {
            return Err(IngestError::InvalidRecord {
                line: row.line,
                reason: row.errors.join("; "),
            });
        }

        let offset: &FixedOffset = self.validator.local_offset();
        let mapped = &row.mapped;

        Ok(NormalizedRecord {
            calldate: normalize_date_to_iso(mapped.get(Field::Calldate), offset),
            src: normalize_phone(mapped.get(Field::Src)),
            dst: normalize_phone(mapped.get(Field::Dst)),
            duration: parse_count(row.line, Field::Duration, mapped.get(Field::Duration))?,
            billsec: parse_count(row.line, Field::Billsec, mapped.get(Field::Billsec))?,
            disposition: classify_disposition(mapped.get(Field::Disposition)),
        })
    }
}

fn parse_count(line: usize, field: Field, value: &str) -> Result<u64> {
    if value.is_empty() {
        return Ok(0);
    }
    parse_non_negative_integer(value).ok_or_else(|| IngestError::InvalidRecord {
        line,
        reason: format!("{} '{}' is not a non-negative integer", field, value),
    })
}
