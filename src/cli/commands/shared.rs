//! Shared components for CLI commands
//!
//! This module contains common types, utilities, and functions used across
//! the command implementations: logging setup, settings loading and report
//! printing.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

use crate::app::models::{Field, ParsedRow};
use crate::app::services::csv_upload::ParseStats;
use crate::config::Settings;
use crate::constants::PREVIEW_SEPARATOR;

/// Summary of one command run, used for the exit status
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Number of data rows read
    pub total_rows: usize,
    /// Rows ready for submission
    pub valid_rows: usize,
    /// Rows with validation errors
    pub invalid_rows: usize,
    /// Records the API reported as created
    pub submitted: Option<usize>,
    /// Whether the command reached its goal
    pub succeeded: bool,
}

impl RunSummary {
    pub fn from_stats(stats: &ParseStats) -> Self {
        Self {
            total_rows: stats.total_rows,
            valid_rows: stats.valid_rows,
            invalid_rows: stats.invalid_rows,
            submitted: None,
            succeeded: false,
        }
    }

    pub fn failed() -> Self {
        Self::default()
    }

    pub fn exit_code(&self) -> i32 {
        if self.succeeded { 0 } else { 1 }
    }
}

/// Set up structured logging on stderr
pub fn setup_logging(log_level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    // Create filter
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("cdr_ingest={}", log_level)));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .with_level(true)
                .with_writer(std::io::stderr)
                .compact(),
        )
        .try_init();

    debug!("Logging initialized at level: {}", log_level);
}

/// Load settings from an explicit file, the user config file or defaults
pub fn load_settings(config_file: Option<&Path>) -> Result<Settings> {
    match config_file {
        Some(path) => info!("Using config file: {}", path.display()),
        None => info!("No config file given, checking the default location"),
    }

    let settings = Settings::load_or_default(config_file).context("Failed to load settings")?;
    settings.validate().context("Invalid settings")?;
    Ok(settings)
}

/// Read an upload as text, replacing invalid UTF-8 sequences
pub async fn read_upload(path: &Path) -> std::io::Result<String> {
    let bytes = tokio::fs::read(path).await?;
    debug!("Read {} bytes from {}", bytes.len(), path.display());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Display name for an input file
pub fn file_label(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Print the header line with row counts
pub fn print_summary(file: &str, total: usize, good: usize, bad: usize) {
    println!("{}", format!("File: {}", file).bold());
    println!(
        "  Rows: {}   Ready: {}   With errors: {}",
        total,
        good.to_string().green(),
        if bad > 0 {
            bad.to_string().red()
        } else {
            bad.to_string().normal()
        }
    );
}

/// Print preview rows, with their messages when a row has errors
pub fn print_rows(rows: &[&ParsedRow]) {
    if rows.is_empty() {
        return;
    }

    let columns: Vec<&str> = Field::ALL.iter().map(|field| field.name()).collect();
    println!();
    println!("  {:>8}  {}", "line", columns.join(PREVIEW_SEPARATOR).dimmed());
    for row in rows {
        let marker = if row.is_valid() {
            "ok".green()
        } else {
            "!!".red()
        };
        println!("  {} {:>5}  {}", marker, row.line, row.preview());
        for error in &row.errors {
            println!("           {}", error.yellow());
        }
    }
}

/// Print session-level messages as errors
pub fn print_messages(messages: &[String]) {
    for message in messages {
        eprintln!("{}", message.red());
    }
}

/// Create a spinner for an in-flight request
pub fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
