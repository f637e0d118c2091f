//! Sending a payload and turning the reply into user-facing results

use tracing::{info, warn};

use super::credentials::Credentials;
use super::interpreter::interpret_server_errors;
use super::transport::Transport;
use crate::app::models::BulkPayload;
use crate::constants::messages;

/// What happened to one submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The API accepted the batch
    Created { created: usize },

    /// The API answered with a non-success status
    Rejected { status: u16, messages: Vec<String> },

    /// The request never produced a response
    Failed { messages: Vec<String> },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, SubmitOutcome::Created { .. })
    }

    /// Success text, if the batch was created
    pub fn success_message(&self) -> Option<String> {
        match self {
            SubmitOutcome::Created { created } => {
                Some(format!("Success: created {} records", created))
            }
            _ => None,
        }
    }

    /// Error messages, empty on success
    pub fn messages(&self) -> &[String] {
        match self {
            SubmitOutcome::Created { .. } => &[],
            SubmitOutcome::Rejected { messages, .. } | SubmitOutcome::Failed { messages } => {
                messages
            }
        }
    }
}

/// Send a payload and classify the result
///
/// Never fails: transport errors become [`SubmitOutcome::Failed`] with the
/// network guidance messages.
pub async fn submit_payload<T: Transport>(
    transport: &T,
    payload: &BulkPayload,
    credentials: &Credentials,
) -> SubmitOutcome {
    match transport.post_records(payload, credentials).await {
        Ok(response) if response.is_success() => {
            let created = response.created_count().unwrap_or(payload.len());
            info!("Records API created {} records", created);
            SubmitOutcome::Created { created }
        }
        Ok(response) => {
            warn!("Records API rejected the batch with status {}", response.status);
            SubmitOutcome::Rejected {
                status: response.status,
                messages: interpret_server_errors(response.status, response.body.as_ref()),
            }
        }
        Err(e) => {
            warn!("Submission failed: {}", e);
            SubmitOutcome::Failed {
                messages: network_messages(&e.to_string()),
            }
        }
    }
}

/// Guidance for a request that never got an answer
pub fn network_messages(reason: &str) -> Vec<String> {
    vec![
        format!("Network error: {}", reason),
        messages::NETWORK_CONNECTIVITY.to_string(),
        messages::NETWORK_INSPECT.to_string(),
    ]
}
