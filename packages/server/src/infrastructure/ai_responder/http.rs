//! HTTP client for the external prediction endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::domain::{AiResponder, AiResponderError};

use super::normalize::normalize_answer;

/// Request body expected by the prediction endpoint
#[derive(Debug, Serialize)]
struct PredictionRequest<'a> {
    question: &'a str,
}

/// AI responder backed by a single HTTP prediction endpoint.
#[derive(Debug, Clone)]
pub struct HttpAiResponder {
    /// HTTP client with the request timeout applied.
    client: Client,
    /// Full URL of the prediction endpoint.
    endpoint: String,
    /// Timeout in milliseconds, kept for error reporting.
    timeout_ms: u64,
}

impl HttpAiResponder {
    /// Create a new responder.
    ///
    /// # Arguments
    ///
    /// * `endpoint` - URL the question is POSTed to
    /// * `timeout` - Upper bound for one request, including reading the body
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, AiResponderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AiResponderError::Request(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: endpoint.into(),
            timeout_ms: u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn map_transport_error(&self, err: reqwest::Error) -> AiResponderError {
        if err.is_timeout() {
            AiResponderError::Timeout(self.timeout_ms)
        } else if err.is_decode() {
            AiResponderError::InvalidBody(err.to_string())
        } else {
            AiResponderError::Request(err.to_string())
        }
    }
}

#[async_trait]
impl AiResponder for HttpAiResponder {
    async fn ask(&self, text: &str) -> Result<String, AiResponderError> {
        tracing::debug!("Asking AI backend at {}", self.endpoint);

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictionRequest { question: text })
            .send()
            .await
            .map_err(|e| self.map_transport_error(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AiResponderError::Status(status.as_u16()));
        }

        let reply: serde_json::Value = response
            .json()
            .await
            .map_err(|e| self.map_transport_error(e))?;
        tracing::debug!("AI backend reply: {}", reply);

        Ok(normalize_answer(&reply))
    }
}
