//! Test utilities and mock transport for submission testing

use serde_json::Value;
use std::sync::Mutex;

use super::credentials::Credentials;
use super::transport::{Transport, TransportResponse};
use crate::app::models::{BulkPayload, Disposition, NormalizedRecord};
use crate::error::{IngestError, Result};

mod outcome_tests;

/// Scripted reply for [`MockTransport`]
#[derive(Debug, Clone)]
pub enum MockReply {
    Respond(u16, Option<Value>),
    Fail(String),
}

/// In-memory transport that records what it was asked to send
#[derive(Debug)]
pub struct MockTransport {
    reply: MockReply,
    sent: Mutex<Vec<(BulkPayload, Credentials)>>,
}

impl MockTransport {
    pub fn responding(status: u16, body: Option<Value>) -> Self {
        Self {
            reply: MockReply::Respond(status, body),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(reason: &str) -> Self {
        Self {
            reply: MockReply::Fail(reason.to_string()),
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn sent(&self) -> Vec<(BulkPayload, Credentials)> {
        self.sent.lock().unwrap().clone()
    }
}

impl Transport for MockTransport {
    async fn post_records(
        &self,
        payload: &BulkPayload,
        credentials: &Credentials,
    ) -> Result<TransportResponse> {
        self.sent
            .lock()
            .unwrap()
            .push((payload.clone(), credentials.clone()));

        match &self.reply {
            MockReply::Respond(status, body) => Ok(TransportResponse::new(*status, body.clone())),
            MockReply::Fail(reason) => Err(IngestError::configuration(reason.clone())),
        }
    }
}

/// Helper to build a payload of `count` identical answered calls
pub fn create_test_payload(count: usize) -> BulkPayload {
    let record = NormalizedRecord {
        calldate: "2023-01-31T12:34:56.000Z".to_string(),
        src: "998901234567".to_string(),
        dst: "712345".to_string(),
        duration: 60,
        billsec: 55,
        disposition: Disposition::Answered,
    };
    BulkPayload {
        records: vec![record; count],
    }
}
