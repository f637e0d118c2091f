//! Header row normalization and logical column lookup
//!
//! Header names are matched case-insensitively after trimming, and a leading
//! byte-order mark on the first cell is ignored. Column order is irrelevant.

use crate::app::models::{Field, FieldValues};
use crate::constants::BOM;
use crate::error::{IngestError, Result};

/// Position of each logical field in the physical header row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderMap {
    /// Column index per field; `None` when the header does not contain it
    indices: [Option<usize>; Field::COUNT],

    /// Header cells as displayed: trimmed, BOM removed, original case
    headers: Vec<String>,
}

impl HeaderMap {
    /// Map the header row, failing on the first required column that is absent
    ///
    /// When a name appears more than once the rightmost column wins.
    pub fn build(header_row: &[String], required: &[Field]) -> Result<Self> {
        let headers: Vec<String> = header_row
            .iter()
            .enumerate()
            .map(|(index, cell)| display_header(cell, index == 0))
            .collect();

        let mut indices = [None; Field::COUNT];
        for (index, header) in headers.iter().enumerate() {
            if let Ok(field) = header.parse::<Field>() {
                indices[field.index()] = Some(index);
            }
        }

        if let Some(missing) = required
            .iter()
            .find(|field| indices[field.index()].is_none())
        {
            return Err(IngestError::missing_column(missing.name()));
        }

        Ok(Self { indices, headers })
    }

    /// Column index of a field, if present
    pub fn index_of(&self, field: Field) -> Option<usize> {
        self.indices[field.index()]
    }

    /// Check if the header row contains a field
    pub fn has_field(&self, field: Field) -> bool {
        self.index_of(field).is_some()
    }

    /// Header cells in physical order
    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    /// Pick the logical fields out of one data row
    ///
    /// Fields whose column is absent or beyond the end of a short row map to
    /// an empty string.
    pub fn map_row(&self, raw: &[String]) -> FieldValues {
        let mut mapped = FieldValues::new();
        for field in Field::ALL {
            let value = self
                .index_of(field)
                .and_then(|index| raw.get(index))
                .map(|cell| cell.trim())
                .unwrap_or_default();
            mapped.set(field, value);
        }
        mapped
    }
}

fn display_header(cell: &str, first: bool) -> String {
    let trimmed = cell.trim();
    if first {
        trimmed.trim_start_matches(BOM).trim().to_string()
    } else {
        trimmed.to_string()
    }
}
