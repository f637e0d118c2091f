//! Per-row validation of call record fields
//!
//! Every field is checked independently and every failure is reported, so a
//! single pass gives the user the complete list of problems in a row.

use chrono::FixedOffset;
use regex::Regex;

use super::field_parsers::{normalize_phone, parse_calldate, parse_non_negative_integer};
use crate::app::models::{Field, FieldValues};
use crate::config::IngestConfig;
use crate::constants::messages;
use crate::error::Result;

/// Stateless row checker built from an [`IngestConfig`]
#[derive(Debug, Clone)]
pub struct RowValidator {
    phone_regex: Regex,
    local_offset: FixedOffset,
}

impl RowValidator {
    /// Compile the configured patterns
    pub fn new(config: &IngestConfig) -> Result<Self> {
        Ok(Self {
            phone_regex: config.phone_regex()?,
            local_offset: config.local_offset()?,
        })
    }

    /// Offset used for timestamps without a zone
    pub fn local_offset(&self) -> &FixedOffset {
        &self.local_offset
    }

    /// Check if a normalized phone number has an acceptable shape
    pub fn is_valid_phone(&self, normalized: &str) -> bool {
        self.phone_regex.is_match(normalized)
    }

    /// Validate one row, returning its messages in field order
    ///
    /// An empty vector means the row is clean.
    pub fn validate(&self, mapped: &FieldValues) -> Vec<String> {
        let mut errors = Vec::new();

        for (field, value) in mapped.iter() {
            let failure = match field {
                Field::Calldate => self.check_calldate(value),
                Field::Src => {
                    self.check_phone(value, messages::SRC_REQUIRED, messages::SRC_INVALID)
                }
                Field::Dst => {
                    self.check_phone(value, messages::DST_REQUIRED, messages::DST_INVALID)
                }
                Field::Duration => {
                    check_count(value, messages::DURATION_EMPTY, messages::DURATION_INVALID)
                }
                Field::Billsec => {
                    check_count(value, messages::BILLSEC_EMPTY, messages::BILLSEC_INVALID)
                }
                // Any text classifies, blank included
                Field::Disposition => None,
            };

            if let Some(message) = failure {
                errors.push(message.to_string());
            }
        }

        errors
    }

    fn check_calldate(&self, value: &str) -> Option<&'static str> {
        if value.trim().is_empty() {
            Some(messages::CALLDATE_REQUIRED)
        } else if parse_calldate(value, &self.local_offset).is_none() {
            Some(messages::CALLDATE_INVALID)
        } else {
            None
        }
    }

    fn check_phone(
        &self,
        value: &str,
        required: &'static str,
        invalid: &'static str,
    ) -> Option<&'static str> {
        let normalized = normalize_phone(value);
        if normalized.is_empty() {
            Some(required)
        } else if !self.is_valid_phone(&normalized) {
            Some(invalid)
        } else {
            None
        }
    }
}

// TODO: empty duration/billsec may be meant to default to 0; confirm with the
// records API owners before relaxing this check.
fn check_count(value: &str, empty: &'static str, invalid: &'static str) -> Option<&'static str> {
    if value.is_empty() {
        Some(empty)
    } else if parse_non_negative_integer(value).is_none() {
        Some(invalid)
    } else {
        None
    }
}
