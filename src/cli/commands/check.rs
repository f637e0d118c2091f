//! Check command implementation
//!
//! Runs the validation pipeline over one file and reports the result without
//! contacting the records API.

use anyhow::Result;
use colored::Colorize;
use serde_json::json;
use tracing::{debug, info, warn};

use super::shared::{
    RunSummary, file_label, load_settings, print_rows, print_summary, read_upload, setup_logging,
};
use crate::app::services::csv_upload::{CsvUploadParser, ParseResult};
use crate::cli::args::{CheckArgs, OutputFormat};
use crate::constants::messages;
use crate::error::IngestError;

/// Check command runner
///
/// Exit status is a failure on structural problems and whenever a row has
/// errors or the file has no data rows.
pub async fn run_check(args: CheckArgs) -> Result<RunSummary> {
    setup_logging(args.get_log_level());
    debug!("Check arguments: {:?}", args);
    args.validate()?;

    let settings = load_settings(args.config_file.as_deref())?;
    let parser = CsvUploadParser::new(settings.ingest.clone())?;
    let label = file_label(&args.file);

    let text = match read_upload(&args.file).await {
        Ok(text) => text,
        Err(e) => {
            warn!("Failed to read {}: {}", args.file.display(), e);
            report_structural_error(&label, messages::READ_FAILED, args.output_format)?;
            return Ok(RunSummary::failed());
        }
    };

    let result = match parser.parse_text(&text) {
        Ok(result) => result,
        Err(e) => {
            report_structural_error(&label, &e.to_string(), args.output_format)?;
            return Ok(RunSummary::failed());
        }
    };

    let mut summary = RunSummary::from_stats(&result.stats);
    summary.succeeded = result.stats.is_submittable();

    match args.output_format {
        OutputFormat::Human => {
            print_human_report(&label, &result, settings.ingest.preview_rows, args.quiet)
        }
        OutputFormat::Json => print_json_report(&label, &result)?,
    }

    info!(
        "Checked {}: {} rows, {:.1}% ready",
        label,
        result.stats.total_rows,
        result.stats.success_rate()
    );
    Ok(summary)
}

fn report_structural_error(file: &str, message: &str, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Human => eprintln!("{} {}", format!("{}:", file).bold(), message.red()),
        OutputFormat::Json => {
            let report = json!({ "file": file, "error": message });
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }
    Ok(())
}

fn print_human_report(file: &str, result: &ParseResult, preview_rows: usize, quiet: bool) {
    let stats = &result.stats;

    if !quiet {
        print_summary(file, stats.total_rows, stats.valid_rows, stats.invalid_rows);
        print_rows(&result.preview_rows(preview_rows));
        println!();
    }

    if stats.invalid_rows > 0 {
        let blocked = IngestError::RowsWithErrors {
            count: stats.invalid_rows,
        };
        eprintln!("{}", blocked.to_string().red());
    } else if stats.total_rows == 0 {
        eprintln!("{}", IngestError::NoRows.to_string().red());
    } else if !quiet {
        println!("{}", format!("{} rows ready to submit", stats.valid_rows).green());
    }
}

fn print_json_report(file: &str, result: &ParseResult) -> Result<()> {
    let report = json!({
        "file": file,
        "headers": result.headers,
        "stats": result.stats,
        "rows": result.rows,
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
