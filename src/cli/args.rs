//! Command-line argument definitions for the call record ingester
//!
//! This module defines the complete CLI interface using clap derive API.

use crate::{IngestError, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for the call record ingester
///
/// Validates call detail record CSV exports and uploads them in bulk to a
/// call records API.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "cdr_ingest",
    version,
    about = "Validate call record CSV exports and upload them to a call records API",
    long_about = "Reads a call detail record CSV export, checks every row (timestamps, phone \
                  numbers, durations, dispositions) and reports all problems at once. Clean \
                  files can be submitted to the records API as a single all-or-nothing batch."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Validate a CSV file and report problem rows
    Check(CheckArgs),
    /// Validate a CSV file and submit it to the records API
    Upload(UploadArgs),
}

/// Arguments for the check command
#[derive(Debug, Clone, Parser)]
pub struct CheckArgs {
    /// CSV file to validate
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Output format for the report
    #[arg(
        long = "format",
        value_enum,
        default_value = "human",
        help = "Output format for the report"
    )]
    pub output_format: OutputFormat,

    /// Path to configuration file
    ///
    /// JSON configuration file. If not specified, looks for
    /// <config dir>/cdr-ingest/config.json
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Arguments for the upload command
#[derive(Debug, Clone, Parser)]
pub struct UploadArgs {
    /// CSV file to validate and submit
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Bulk create endpoint, overriding the configured one
    #[arg(long = "endpoint", value_name = "URL", help = "Bulk create endpoint URL")]
    pub endpoint: Option<String>,

    /// API token sent in the Authorization header
    #[arg(
        long = "token",
        value_name = "TOKEN",
        help = "API token for the Authorization header"
    )]
    pub token: Option<String>,

    /// Anti-forgery token sent in the X-CSRFToken header
    #[arg(long = "csrf-token", value_name = "TOKEN", help = "Anti-forgery token")]
    pub csrf_token: Option<String>,

    /// Raw Cookie header to read tokens from
    ///
    /// Tokens given explicitly take precedence over cookie values.
    #[arg(
        long = "cookie",
        value_name = "STRING",
        help = "Cookie header string to read the API and anti-forgery tokens from"
    )]
    pub cookie: Option<String>,

    /// Print the payload instead of sending it
    #[arg(long = "dry-run", help = "Print the JSON payload instead of sending it")]
    pub dry_run: bool,

    /// Path to configuration file
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Path to configuration file (JSON format)"
    )]
    pub config_file: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(
        short = 'q',
        long = "quiet",
        help = "Suppress output except errors",
        conflicts_with = "verbose"
    )]
    pub quiet: bool,
}

/// Output format options for reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON format for scripting
    Json,
}

impl Args {
    /// Get the command if one was specified
    pub fn get_command(&self) -> Option<Commands> {
        self.command.clone()
    }
}

impl CheckArgs {
    pub fn validate(&self) -> Result<()> {
        validate_paths(&self.file, self.config_file.as_deref())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl UploadArgs {
    pub fn validate(&self) -> Result<()> {
        validate_paths(&self.file, self.config_file.as_deref())?;

        if let Some(endpoint) = &self.endpoint {
            if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
                return Err(IngestError::configuration(format!(
                    "Endpoint must be an http(s) URL: {}",
                    endpoint
                )));
            }
        }

        Ok(())
    }

    /// Determine the appropriate log level based on verbosity flags
    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }

    /// Check if we should show a spinner (not in quiet mode)
    pub fn show_progress(&self) -> bool {
        !self.quiet
    }
}

fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn validate_paths(file: &Path, config_file: Option<&Path>) -> Result<()> {
    if !file.exists() {
        return Err(IngestError::configuration(format!(
            "Input file does not exist: {}",
            file.display()
        )));
    }

    if !file.is_file() {
        return Err(IngestError::configuration(format!(
            "Input path is not a file: {}",
            file.display()
        )));
    }

    // Validate config file exists if specified
    if let Some(config_file) = config_file {
        if !config_file.exists() {
            return Err(IngestError::configuration(format!(
                "Config file does not exist: {}",
                config_file.display()
            )));
        }
    }

    Ok(())
}
