// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Shared HTTP plumbing for tracker adapters: client construction, secret
//! resolution, and turning failed responses into user-facing detail.

use std::time::Duration;

use intake_core::IntakeError;
use secrecy::SecretString;
use serde_json::Value;

/// Builds the HTTP client used by one tracker adapter.
pub(crate) fn build_client(timeout: Duration) -> Result<reqwest::Client, IntakeError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| IntakeError::Tracker {
            message: format!("failed to build HTTP client: {e}"),
            source: Some(Box::new(e)),
        })
}

/// A required, non-empty setting from configuration.
pub(crate) fn required(value: &Option<String>, key: &str) -> Result<String, IntakeError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .ok_or_else(|| IntakeError::Config(format!("{key} must be set")))
}

/// A secret from configuration, else from `env_var`. `None` if neither is set.
pub(crate) fn optional_secret(value: &Option<String>, env_var: &str) -> Option<SecretString> {
    value
        .clone()
        .filter(|v| !v.is_empty())
        .or_else(|| std::env::var(env_var).ok().filter(|v| !v.is_empty()))
        .map(SecretString::from)
}

/// Like [`optional_secret`], but missing secrets are a configuration error.
pub(crate) fn required_secret(
    value: &Option<String>,
    key: &str,
    env_var: &str,
) -> Result<SecretString, IntakeError> {
    optional_secret(value, env_var).ok_or_else(|| {
        IntakeError::Config(format!(
            "{key} not found. Set it in config or the {env_var} environment variable."
        ))
    })
}

/// Maps a transport failure to a tracker error.
pub(crate) fn request_failed(tracker: &str, e: reqwest::Error) -> IntakeError {
    let message = if e.is_timeout() {
        format!("{tracker} request timed out")
    } else {
        format!("{tracker} request failed: {e}")
    };
    IntakeError::Tracker {
        message,
        source: Some(Box::new(e)),
    }
}

/// Reads a failed response into `"{tracker} returned {status}: {detail}"`.
pub(crate) async fn response_failed(tracker: &str, response: reqwest::Response) -> IntakeError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let detail = api_error_detail(&body).unwrap_or_else(|| body.trim().to_string());
    tracing::warn!(tracker, status = %status, "tracker rejected ticket");
    IntakeError::tracker(format!("{tracker} returned {status}: {detail}"))
}

/// Pulls the human-readable message out of the common tracker error bodies:
/// `{"message"}`, `{"error"}`, `{"error": {"message"}}`, and Jira's
/// `{"errorMessages": [..], "errors": {field: msg}}`.
pub(crate) fn api_error_detail(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    if let Some(message) = value.get("message").and_then(Value::as_str) {
        return Some(message.to_string());
    }

    match value.get("error") {
        Some(Value::String(s)) => return Some(s.clone()),
        Some(Value::Object(obj)) => {
            if let Some(message) = obj.get("message").and_then(Value::as_str) {
                return Some(message.to_string());
            }
        }
        _ => {}
    }

    let mut parts: Vec<String> = value
        .get("errorMessages")
        .and_then(Value::as_array)
        .map(|msgs| {
            msgs.iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();
    if let Some(fields) = value.get("errors").and_then(Value::as_object) {
        for (field, msg) in fields {
            if let Some(msg) = msg.as_str() {
                parts.push(format!("{field}: {msg}"));
            }
        }
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("; "))
    }
}

/// Appends the requester's contact line to a ticket body.
pub(crate) fn with_contact(description: &str, email: &str) -> String {
    format!("{description}\n\nContact: {email}")
}
