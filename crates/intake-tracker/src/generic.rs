// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Generic REST ticketing endpoint.
//!
//! `POST {base_url}/tickets` with `{subject, description, email, priority}`;
//! the ticket id is read from `id`, `ticket_id` or `key` in the response.

use std::time::Duration;

use async_trait::async_trait;
use intake_config::model::GenericTrackerConfig;
use intake_core::{
    AdapterType, HealthStatus, IntakeError, PluginAdapter, TicketRequest, TrackerAdapter,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::http;

/// Environment variable consulted when `tracker.generic.api_token` is unset.
pub const API_TOKEN_ENV: &str = "TRACKER_API_TOKEN";

const NAME: &str = "generic";

#[derive(Debug, Serialize)]
struct CreateTicket<'a> {
    subject: &'a str,
    description: &'a str,
    email: &'a str,
    priority: &'a str,
}

/// Files tickets against a generic JSON ticketing API.
#[derive(Debug)]
pub struct GenericTracker {
    client: reqwest::Client,
    endpoint: String,
    token: Option<SecretString>,
}

impl GenericTracker {
    pub fn new(config: &GenericTrackerConfig, timeout: Duration) -> Result<Self, IntakeError> {
        let base_url = http::required(&config.base_url, "tracker.generic.base_url")?;
        Ok(Self {
            client: http::build_client(timeout)?,
            endpoint: format!("{}/tickets", base_url.trim_end_matches('/')),
            token: http::optional_secret(&config.api_token, API_TOKEN_ENV),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PluginAdapter for GenericTracker {
    fn name(&self) -> &str {
        NAME
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Tracker
    }

    async fn health_check(&self) -> Result<HealthStatus, IntakeError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), IntakeError> {
        Ok(())
    }
}

#[async_trait]
impl TrackerAdapter for GenericTracker {
    async fn create_ticket(&self, ticket: &TicketRequest) -> Result<String, IntakeError> {
        let body = CreateTicket {
            subject: &ticket.subject,
            description: &ticket.description,
            email: &ticket.contact_email,
            priority: &ticket.priority_label,
        };

        let mut request = self.client.post(&self.endpoint).json(&body);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| http::request_failed(NAME, e))?;
        if !response.status().is_success() {
            return Err(http::response_failed(NAME, response).await);
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| http::request_failed(NAME, e))?;
        debug!(endpoint = %self.endpoint, "generic tracker accepted ticket");
        ticket_identifier(&value).ok_or_else(|| {
            IntakeError::tracker(format!("{NAME} response had no ticket id: {value}"))
        })
    }
}

/// Ticket id from `id`, `ticket_id` or `key`, as a string or number.
fn ticket_identifier(value: &Value) -> Option<String> {
    ["id", "ticket_id", "key"]
        .iter()
        .filter_map(|k| value.get(*k))
        .find_map(|v| match v {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
}
