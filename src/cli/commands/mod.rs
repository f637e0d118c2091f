//! Command implementations for the call record ingester CLI
//!
//! Each command is implemented in its own module; shared logging, settings
//! and report printing live in [`shared`].

pub mod check;
pub mod shared;
pub mod upload;

pub use shared::RunSummary;

use crate::cli::args::Commands;
use anyhow::Result;

/// Main command runner
///
/// Dispatches to the subcommand handler:
/// - `check`: validate a file and report problem rows
/// - `upload`: validate a file and submit it to the records API
pub async fn run(command: Commands) -> Result<RunSummary> {
    match command {
        Commands::Check(check_args) => check::run_check(check_args).await,
        Commands::Upload(upload_args) => upload::run_upload(upload_args).await,
    }
}
