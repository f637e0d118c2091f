//! Upload command implementation
//!
//! Drives an [`UploadSession`] end to end: read, validate, then submit the
//! batch over HTTP (or print it with `--dry-run`).

use anyhow::Result;
use colored::Colorize;
use tracing::{debug, info, warn};

use super::shared::{
    RunSummary, create_spinner, file_label, load_settings, print_messages, print_rows,
    print_summary, read_upload, setup_logging,
};
use crate::app::services::submission::{Credentials, HttpTransport, SubmitOutcome};
use crate::app::services::upload_session::UploadSession;
use crate::cli::args::UploadArgs;
use crate::config::UploadConfig;

/// Upload command runner
pub async fn run_upload(args: UploadArgs) -> Result<RunSummary> {
    setup_logging(args.get_log_level());
    debug!("Upload arguments: {:?}", args);
    args.validate()?;

    let mut settings = load_settings(args.config_file.as_deref())?;
    if let Some(endpoint) = &args.endpoint {
        settings.upload = settings.upload.with_endpoint(endpoint.clone());
    }
    settings.validate()?;

    let mut session = UploadSession::new(settings.ingest.clone())?;
    let label = file_label(&args.file);
    let generation = session.select_file(label.clone());

    match read_upload(&args.file).await {
        Ok(text) => {
            session.load_text(generation, &text);
        }
        Err(e) => {
            warn!("Failed to read {}: {}", args.file.display(), e);
            session.read_failed(generation);
        }
    }

    if !session.messages().is_empty() {
        print_messages(session.messages());
        return Ok(RunSummary::failed());
    }

    let mut summary = RunSummary {
        total_rows: session.rows().len(),
        valid_rows: session.good_count(),
        invalid_rows: session.bad_count(),
        ..RunSummary::default()
    };

    if !args.quiet {
        print_summary(
            &label,
            summary.total_rows,
            summary.valid_rows,
            summary.invalid_rows,
        );
        print_rows(&session.preview());
        println!();
    }

    if args.dry_run {
        match session.payload() {
            Ok(payload) => {
                println!("{}", serde_json::to_string_pretty(&payload)?);
                summary.succeeded = true;
            }
            Err(e) => print_messages(&[e.to_string()]),
        }
        return Ok(summary);
    }

    let transport = HttpTransport::new(settings.upload.clone())?;
    let credentials = resolve_credentials(&args, &settings.upload);
    if credentials.token.is_none() {
        warn!("No API token given; the request will be sent without authorization");
    }

    let spinner = args.show_progress().then(|| {
        create_spinner(&format!(
            "Submitting {} records to {}",
            session.good_count(),
            transport.endpoint()
        ))
    });

    let result = session.submit(&transport, &credentials).await;

    if let Some(pb) = &spinner {
        pb.finish_and_clear();
    }

    match result {
        Ok(SubmitOutcome::Created { created }) => {
            if let Some(message) = session.success_message() {
                println!("{}", message.green());
            }
            summary.submitted = Some(created);
            summary.succeeded = true;
            info!("Submitted {} as {} records", label, created);
        }
        Ok(_) | Err(_) => print_messages(session.messages()),
    }

    Ok(summary)
}

/// Explicit tokens first, then whatever the cookie string provides
fn resolve_credentials(args: &UploadArgs, config: &UploadConfig) -> Credentials {
    let from_cookie = args
        .cookie
        .as_deref()
        .map(|cookie| Credentials::from_cookie_header(cookie, config))
        .unwrap_or_default();

    Credentials::new(args.token.clone(), args.csrf_token.clone()).or(from_cookie)
}
