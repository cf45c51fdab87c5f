// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for Groq's OpenAI-compatible chat-completions API.
//!
//! Handles bearer authentication, request construction, and a bounded retry
//! on transient status codes (429, 500, 503).

use std::time::Duration;

use intake_core::IntakeError;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiErrorResponse, ChatRequest, ChatResponse};

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for Groq API communication.
#[derive(Debug)]
pub struct GroqClient {
    client: reqwest::Client,
    api_key: SecretString,
    endpoint: String,
    timeout: Duration,
    max_retries: u32,
}

impl GroqClient {
    /// Creates a client posting to `{base_url}/chat/completions`.
    pub fn new(
        api_key: SecretString,
        base_url: &str,
        timeout: Duration,
        max_retries: u32,
    ) -> Result<Self, IntakeError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IntakeError::ModelUnavailable {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            api_key,
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            timeout,
            max_retries,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Sends a completion request and returns the parsed response.
    ///
    /// Transient errors are retried up to `max_retries` times after a short delay.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, IntakeError> {
        let mut last_error = None;

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying completion request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(self.api_key.expose_secret())
                .json(request)
                .send()
                .await
                .map_err(|e| self.request_error(e))?;

            let status = response.status();
            debug!(status = %status, attempt, "completion response received");

            if status.is_success() {
                let body = response.text().await.map_err(|e| self.request_error(e))?;
                return serde_json::from_str::<ChatResponse>(&body).map_err(|e| {
                    IntakeError::ModelUnavailable {
                        message: format!("failed to parse Groq response: {e}"),
                        source: Some(Box::new(e)),
                    }
                });
            }

            let body = response.text().await.unwrap_or_default();
            let message = describe_error(status, &body);

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient Groq error, will retry");
                last_error = Some(IntakeError::model_unavailable(message));
                continue;
            }

            return Err(IntakeError::model_unavailable(message));
        }

        Err(last_error
            .unwrap_or_else(|| IntakeError::model_unavailable("completion failed after retries")))
    }

    fn request_error(&self, e: reqwest::Error) -> IntakeError {
        if e.is_timeout() {
            IntakeError::Timeout {
                duration: self.timeout,
            }
        } else {
            IntakeError::ModelUnavailable {
                message: format!("HTTP request failed: {e}"),
                source: Some(Box::new(e)),
            }
        }
    }
}

/// The API's own error message when the body carries one, else the raw body.
fn describe_error(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api) => match api.error.type_ {
            Some(kind) => format!("Groq API error ({kind}): {}", api.error.message),
            None => format!("Groq API error: {}", api.error.message),
        },
        Err(_) => format!("Groq returned {status}: {body}"),
    }
}

fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
