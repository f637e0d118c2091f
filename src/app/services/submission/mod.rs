//! Submission of validated batches to the records API
//!
//! This module covers everything after a clean parse:
//! - [`credentials`] - API and anti-forgery tokens, optionally read from cookies
//! - [`transport`] - The [`Transport`] seam and its reqwest implementation
//! - [`outcome`] - Sending a payload and classifying the reply
//! - [`interpreter`] - User-facing explanations of error responses

pub mod credentials;
pub mod interpreter;
pub mod outcome;
pub mod transport;

#[cfg(test)]
pub mod tests;

// Re-export main types for easy access
pub use credentials::Credentials;
pub use interpreter::interpret_server_errors;
pub use outcome::{SubmitOutcome, submit_payload};
pub use transport::{HttpTransport, Transport, TransportResponse};
