//! Configuration management and validation.
//!
//! Provides the validation settings used by the CSV pipeline and the
//! transport settings used when submitting to the records API. Both can be
//! loaded from a JSON file and overridden from the command line.

use crate::app::models::Field;
use crate::constants::{
    CONFIG_DIR_NAME, CONFIG_FILE_NAME, CSRF_COOKIE, DEFAULT_AUTH_SCHEME, DEFAULT_ENDPOINT,
    DEFAULT_PHONE_PATTERN, DEFAULT_PREVIEW_ROWS, DEFAULT_TIMEOUT_SECS, MAX_UTC_OFFSET_MINUTES,
    TOKEN_COOKIE,
};
use crate::error::{IngestError, Result};
use chrono::FixedOffset;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Settings for tokenizing and validating an upload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestConfig {
    /// Columns the header row must contain, checked in this order
    pub required_columns: Vec<Field>,

    /// Regular expression a normalized phone number must match
    pub phone_pattern: String,

    /// Offset applied to timestamps that carry no zone, in minutes east of UTC
    pub utc_offset_minutes: i32,

    /// Rows shown in a preview when no row has errors
    pub preview_rows: usize,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            required_columns: Field::ALL.to_vec(),
            phone_pattern: DEFAULT_PHONE_PATTERN.to_string(),
            utc_offset_minutes: 0,
            preview_rows: DEFAULT_PREVIEW_ROWS,
        }
    }
}

impl IngestConfig {
    /// Set the required column list
    pub fn with_required_columns(mut self, columns: Vec<Field>) -> Self {
        self.required_columns = columns;
        self
    }

    /// Set the phone validity pattern
    pub fn with_phone_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.phone_pattern = pattern.into();
        self
    }

    /// Set the offset used for naive timestamps
    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    /// Set the clean preview size
    pub fn with_preview_rows(mut self, rows: usize) -> Self {
        self.preview_rows = rows;
        self
    }

    /// Fixed offset for naive timestamps
    pub fn local_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(|| {
            IngestError::configuration(format!(
                "UTC offset of {} minutes is out of range",
                self.utc_offset_minutes
            ))
        })
    }

    /// Compile the phone pattern
    pub fn phone_regex(&self) -> Result<Regex> {
        Ok(Regex::new(&self.phone_pattern)?)
    }

    /// Check the configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.required_columns.is_empty() {
            return Err(IngestError::configuration(
                "At least one required column must be configured",
            ));
        }

        let mut seen = HashSet::new();
        for column in &self.required_columns {
            if !seen.insert(column) {
                return Err(IngestError::configuration(format!(
                    "Required column '{}' is listed more than once",
                    column
                )));
            }
        }

        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(IngestError::configuration(format!(
                "UTC offset must be within ±{} minutes, got {}",
                MAX_UTC_OFFSET_MINUTES, self.utc_offset_minutes
            )));
        }

        self.phone_regex()?;
        Ok(())
    }
}

/// Settings for sending a batch to the records API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Bulk create endpoint URL
    pub endpoint: String,

    /// Scheme placed before the token in the Authorization header
    pub auth_scheme: String,

    /// Cookie name holding the API token
    pub token_cookie: String,

    /// Cookie name holding the anti-forgery token
    pub csrf_cookie: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            auth_scheme: DEFAULT_AUTH_SCHEME.to_string(),
            token_cookie: TOKEN_COOKIE.to_string(),
            csrf_cookie: CSRF_COOKIE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UploadConfig {
    /// Set the endpoint URL
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Set the request timeout
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(IngestError::configuration("Endpoint URL must not be empty"));
        }
        if self.timeout_secs == 0 {
            return Err(IngestError::configuration("Timeout must be at least 1 second"));
        }
        Ok(())
    }
}

/// Complete on-disk configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ingest: IngestConfig,
    pub upload: UploadConfig,
}

impl Settings {
    /// Load settings from a JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&content)?;
        debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load from an explicit file, else the user config file, else defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// `<config_dir>/cdr-ingest/config.json`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn validate(&self) -> Result<()> {
        self.ingest.validate()?;
        self.upload.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_is_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.ingest.required_columns, Field::ALL.to_vec());
        assert_eq!(settings.upload.token_cookie, "auth_token");
        assert_eq!(settings.upload.csrf_cookie, "csrftoken");
    }

    #[test]
    fn test_duplicate_required_column_rejected() {
        let config =
            IngestConfig::default().with_required_columns(vec![Field::Src, Field::Dst, Field::Src]);
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("'src'"));
    }

    #[test]
    fn test_empty_required_columns_rejected() {
        let config = IngestConfig::default().with_required_columns(vec![]);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_phone_pattern_rejected() {
        let config = IngestConfig::default().with_phone_pattern("[0-9");
        assert!(matches!(config.validate(), Err(IngestError::Pattern(_))));
    }

    #[test]
    fn test_offset_bounds() {
        assert!(IngestConfig::default().with_utc_offset_minutes(300).validate().is_ok());
        assert!(IngestConfig::default().with_utc_offset_minutes(-900).validate().is_err());
        let offset = IngestConfig::default()
            .with_utc_offset_minutes(180)
            .local_offset()
            .unwrap();
        assert_eq!(offset.local_minus_utc(), 180 * 60);
    }

    #[test]
    fn test_upload_config_validation() {
        assert!(UploadConfig::default().with_endpoint("  ").validate().is_err());
        assert!(UploadConfig::default().with_timeout_secs(0).validate().is_err());
    }

    #[test]
    fn test_load_partial_settings_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{"ingest": {{"utc_offset_minutes": 300, "required_columns": ["src", "dst"]}},
                "upload": {{"endpoint": "https://calls.example.com/api/calls/bulk_create/"}}}}"#
        )
        .unwrap();

        let settings = Settings::load_or_default(Some(file.path())).unwrap();
        assert_eq!(settings.ingest.utc_offset_minutes, 300);
        assert_eq!(settings.ingest.required_columns, vec![Field::Src, Field::Dst]);
        assert_eq!(settings.ingest.preview_rows, 5);
        assert_eq!(
            settings.upload.endpoint,
            "https://calls.example.com/api/calls/bulk_create/"
        );
        assert_eq!(settings.upload.auth_scheme, "Token");
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let result = Settings::load(Path::new("/nonexistent/cdr-ingest/config.json"));
        assert!(matches!(result, Err(IngestError::Io(_))));
    }
}
