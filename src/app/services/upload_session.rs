//! Stateful upload workflow for one file at a time
//!
//! Tracks the selected file, its parsed rows and the messages produced along
//! the way. A new selection invalidates any parse still running for an older
//! one through a generation counter, so late results never overwrite newer
//! state.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use cdr_ingest::app::services::submission::{Credentials, HttpTransport};
//! use cdr_ingest::app::services::upload_session::UploadSession;
//! use cdr_ingest::{IngestConfig, UploadConfig};
//!
//! # async fn example() -> cdr_ingest::Result<()> {
//! let mut session = UploadSession::new(IngestConfig::default())?;
//! let generation = session.select_file("calls.csv");
//! session.load_text(generation, "calldate,src,dst,duration,billsec,disposition\n");
//!
//! if session.can_submit() {
//!     let transport = HttpTransport::new(UploadConfig::default())?;
//!     let outcome = session.submit(&transport, &Credentials::default()).await?;
//!     println!("{:?}", outcome);
//! }
//! # Ok(())
//! # }
//! ```

use tracing::{debug, info, warn};

use super::csv_upload::CsvUploadParser;
use super::submission::{Credentials, SubmitOutcome, Transport, submit_payload};
use crate::app::models::{BulkPayload, ParsedRow};
use crate::config::IngestConfig;
use crate::constants::messages;
use crate::error::{IngestError, Result};

/// Token identifying one file selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

/// Where the session is in the upload workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Parsing,
    Parsed,
    Submitting,
}

/// Holds the session in `Submitting` until dropped
///
/// Dropping the submit future mid-request still lands back in `Parsed`.
struct SubmittingGuard<'a> {
    phase: &'a mut Phase,
}

impl<'a> SubmittingGuard<'a> {
    fn enter(phase: &'a mut Phase) -> Self {
        *phase = Phase::Submitting;
        Self { phase }
    }
}

impl Drop for SubmittingGuard<'_> {
    fn drop(&mut self) {
        *self.phase = Phase::Parsed;
    }
}

/// One user's upload workflow
#[derive(Debug)]
pub struct UploadSession {
    parser: CsvUploadParser,
    file_name: Option<String>,
    headers: Vec<String>,
    rows: Vec<ParsedRow>,
    phase: Phase,
    messages: Vec<String>,
    success: Option<String>,
    generation: u64,
}

impl UploadSession {
    pub fn new(config: IngestConfig) -> Result<Self> {
        Ok(Self::with_parser(CsvUploadParser::new(config)?))
    }

    pub fn with_parser(parser: CsvUploadParser) -> Self {
        Self {
            parser,
            file_name: None,
            headers: Vec::new(),
            rows: Vec::new(),
            phase: Phase::Idle,
            messages: Vec::new(),
            success: None,
            generation: 0,
        }
    }

    /// Start working on a new file, discarding everything about the previous one
    pub fn select_file(&mut self, name: impl Into<String>) -> Generation {
        self.generation += 1;
        self.file_name = Some(name.into());
        self.clear_file_state();
        self.messages.clear();
        self.success = None;
        self.phase = Phase::Parsing;
        debug!("Selected {:?} (generation {})", self.file_name, self.generation);
        Generation(self.generation)
    }

    /// Feed the contents read for a selection
    ///
    /// Returns `false` when the selection has been superseded and the text was
    /// ignored.
    pub fn load_text(&mut self, generation: Generation, text: &str) -> bool {
        if !self.is_current(generation) {
            debug!("Ignoring stale parse for generation {}", generation.0);
            return false;
        }

        match self.parser.parse_text(text) {
            Ok(result) => {
                self.headers = result.headers;
                self.rows = result.rows;
            }
            Err(e) => {
                warn!("Could not parse {:?}: {}", self.file_name, e);
                self.clear_file_state();
                self.messages = vec![e.to_string()];
            }
        }
        self.phase = Phase::Parsed;
        true
    }

    /// Record that the selected file could not be read
    pub fn read_failed(&mut self, generation: Generation) -> bool {
        if !self.is_current(generation) {
            return false;
        }
        self.clear_file_state();
        self.messages = vec![messages::READ_FAILED.to_string()];
        self.phase = Phase::Parsed;
        true
    }

    fn is_current(&self, generation: Generation) -> bool {
        generation.0 == self.generation
    }

    fn clear_file_state(&mut self) {
        self.headers.clear();
        self.rows.clear();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn file_name(&self) -> Option<&str> {
        self.file_name.as_deref()
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[ParsedRow] {
        &self.rows
    }

    /// Session-level messages (structural errors, submission results)
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn success_message(&self) -> Option<&str> {
        self.success.as_deref()
    }

    pub fn good_count(&self) -> usize {
        self.rows.iter().filter(|row| row.is_valid()).count()
    }

    pub fn bad_count(&self) -> usize {
        self.rows.len() - self.good_count()
    }

    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Parsed && self.bad_count() == 0 && self.good_count() > 0
    }

    /// Every bad row if there are any, else the first few rows
    pub fn preview(&self) -> Vec<&ParsedRow> {
        if self.bad_count() > 0 {
            self.rows.iter().filter(|row| !row.is_valid()).collect()
        } else {
            self.rows
                .iter()
                .take(self.parser.config().preview_rows)
                .collect()
        }
    }

    /// The batch that [`submit`](Self::submit) would send
    pub fn payload(&self) -> Result<BulkPayload> {
        self.parser.build_payload(&self.rows)
    }

    /// Send the parsed rows as one batch
    ///
    /// Gate failures (submission in flight, bad rows, nothing to send) are
    /// returned as errors and also recorded as the session message. Anything
    /// that happens once the request is sent is reported through the outcome.
    pub async fn submit<T: Transport>(
        &mut self,
        transport: &T,
        credentials: &Credentials,
    ) -> Result<SubmitOutcome> {
        if self.phase == Phase::Submitting {
            return Err(IngestError::SubmissionInProgress);
        }

        self.messages.clear();
        self.success = None;

        let payload = match self.payload() {
            Ok(payload) => payload,
            Err(e) => {
                self.messages = vec![e.to_string()];
                return Err(e);
            }
        };

        let outcome = {
            let _submitting = SubmittingGuard::enter(&mut self.phase);
            submit_payload(transport, &payload, credentials).await
        };

        match &outcome {
            SubmitOutcome::Created { .. } => {
                self.success = outcome.success_message();
                self.file_name = None;
                self.clear_file_state();
                self.phase = Phase::Idle;
                info!("Upload complete");
            }
            SubmitOutcome::Rejected { .. } | SubmitOutcome::Failed { .. } => {
                self.messages = outcome.messages().to_vec();
            }
        }

        Ok(outcome)
    }
}
