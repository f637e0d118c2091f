use cdr_ingest::cli::{args::Args, commands};
use clap::{CommandFactory, Parser};
use std::process;

fn main() {
    // Parse command line arguments
    let args = Args::parse();

    // If no subcommand was provided, show help
    let Some(command) = args.get_command() else {
        let _ = Args::command().print_help();
        println!();
        process::exit(0);
    };

    // Create async runtime and run the command with Ctrl+C handling
    let runtime = tokio::runtime::Runtime::new().unwrap_or_else(|e| {
        eprintln!("Failed to create async runtime: {}", e);
        process::exit(1);
    });

    let result = runtime.block_on(async {
        tokio::select! {
            result = commands::run(command) => result,
            _ = tokio::signal::ctrl_c() => {
                eprintln!("\nReceived CTRL+C, shutting down...");
                Err(anyhow::anyhow!("Interrupted by user"))
            }
        }
    });

    match result {
        Ok(summary) => {
            // Report has already been printed by the command
            process::exit(summary.exit_code());
        }
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}
