//! Transport boundary for bulk submissions
//!
//! The pipeline only needs the status code and decoded body back; how the
//! request travels is behind the [`Transport`] trait. [`HttpTransport`] is the
//! reqwest implementation used by the command-line tool.

use reqwest::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info};

use super::credentials::Credentials;
use crate::app::models::BulkPayload;
use crate::config::UploadConfig;
use crate::constants::CSRF_HEADER;
use crate::error::{IngestError, Result};

/// Status code and decoded JSON body (`None` when absent or not JSON)
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<Value>,
}

impl TransportResponse {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Numeric `created` count reported by the API, if any
    pub fn created_count(&self) -> Option<usize> {
        self.body
            .as_ref()
            .and_then(|body| body.get("created"))
            .and_then(Value::as_f64)
            .filter(|count| *count >= 0.0)
            .map(|count| count as usize)
    }
}

/// Sends one bulk payload and reports what came back
pub trait Transport {
    fn post_records(
        &self,
        payload: &BulkPayload,
        credentials: &Credentials,
    ) -> impl Future<Output = Result<TransportResponse>> + Send;
}

/// reqwest-backed transport for the records API
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    config: UploadConfig,
}

impl HttpTransport {
    pub fn new(config: UploadConfig) -> Result<Self> {
        config.validate()?;
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    fn headers(&self, credentials: &Credentials) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(csrf) = &credentials.csrf_token {
            headers.insert(HeaderName::from_static(CSRF_HEADER), header_value(csrf)?);
        }
        if let Some(token) = &credentials.token {
            let value = format!("{} {}", self.config.auth_scheme, token);
            headers.insert(AUTHORIZATION, header_value(&value)?);
        }

        Ok(headers)
    }
}

impl Transport for HttpTransport {
    async fn post_records(
        &self,
        payload: &BulkPayload,
        credentials: &Credentials,
    ) -> Result<TransportResponse> {
        let headers = self.headers(credentials)?;
        info!(
            "Submitting {} records to {}",
            payload.len(),
            self.config.endpoint
        );

        let response = self
            .client
            .post(&self.config.endpoint)
            .headers(headers)
            .json(payload)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.json::<Value>().await.ok();
        debug!("Records API answered {} (body present: {})", status, body.is_some());

        Ok(TransportResponse { status, body })
    }
}

fn header_value(value: &str) -> Result<HeaderValue> {
    HeaderValue::from_str(value).map_err(|e| {
        IngestError::configuration(format!("Credential is not a valid header value: {}", e))
    })
}
