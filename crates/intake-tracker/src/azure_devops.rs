// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Azure DevOps work items.
//!
//! Creates a work item with a JSON Patch document:
//! `POST {base}/{org}/{project}/_apis/wit/workitems/${type}?api-version=7.1`.
//! Authenticates with basic auth, an empty user name, and a personal access token.

use std::time::Duration;

use async_trait::async_trait;
use intake_config::model::AzureDevopsConfig;
use intake_core::{
    AdapterType, HealthStatus, IntakeError, PluginAdapter, TicketRequest, TrackerAdapter,
};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::http;

/// Environment variable consulted when `personal_access_token` is unset.
pub const PAT_ENV: &str = "AZURE_DEVOPS_PAT";

const NAME: &str = "azure_devops";
const API_VERSION: &str = "7.1";
const JSON_PATCH: &str = "application/json-patch+json";

#[derive(Debug, Serialize)]
struct PatchOp {
    op: &'static str,
    path: &'static str,
    value: Value,
}

impl PatchOp {
    fn add(path: &'static str, value: impl Into<Value>) -> Self {
        Self {
            op: "add",
            path,
            value: value.into(),
        }
    }
}

/// Files tickets as Azure DevOps work items.
#[derive(Debug)]
pub struct AzureDevopsTracker {
    client: reqwest::Client,
    endpoint: String,
    token: SecretString,
}

impl AzureDevopsTracker {
    pub fn new(config: &AzureDevopsConfig, timeout: Duration) -> Result<Self, IntakeError> {
        let organization = http::required(&config.organization, "tracker.azure_devops.organization")?;
        let project = http::required(&config.project, "tracker.azure_devops.project")?;
        let token = http::required_secret(
            &config.personal_access_token,
            "tracker.azure_devops.personal_access_token",
            PAT_ENV,
        )?;

        let endpoint = format!(
            "{}/{}/{}/_apis/wit/workitems/${}?api-version={API_VERSION}",
            config.base_url.trim_end_matches('/'),
            encode_segment(&organization),
            encode_segment(&project),
            encode_segment(&config.work_item_type),
        );

        Ok(Self {
            client: http::build_client(timeout)?,
            endpoint,
            token,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Azure DevOps priority for a tracker label: highest/high 1, medium 2, low 3, lowest 4.
pub fn priority_value(label: &str) -> u8 {
    match label.trim().to_ascii_lowercase().as_str() {
        "highest" | "high" => 1,
        "medium" => 2,
        "low" => 3,
        "lowest" => 4,
        _ => 2,
    }
}

/// Percent-encodes spaces in a path segment (`Product Backlog Item`).
fn encode_segment(segment: &str) -> String {
    segment.trim().replace(' ', "%20")
}

fn patch_document(ticket: &TicketRequest) -> Vec<PatchOp> {
    vec![
        PatchOp::add("/fields/System.Title", ticket.subject.as_str()),
        PatchOp::add(
            "/fields/System.Description",
            http::with_contact(&ticket.description, &ticket.contact_email),
        ),
        PatchOp::add(
            "/fields/Microsoft.VSTS.Common.Priority",
            priority_value(&ticket.priority_label),
        ),
    ]
}

#[async_trait]
impl PluginAdapter for AzureDevopsTracker {
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
impl TrackerAdapter for AzureDevopsTracker {
    async fn create_ticket(&self, ticket: &TicketRequest) -> Result<String, IntakeError> {
        let body = serde_json::to_vec(&patch_document(ticket)).map_err(|e| IntakeError::Tracker {
            message: format!("failed to encode work item: {e}"),
            source: Some(Box::new(e)),
        })?;

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth("", Some(self.token.expose_secret()))
            .header(reqwest::header::CONTENT_TYPE, JSON_PATCH)
            .body(body)
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
        let id = value
            .get("id")
            .and_then(Value::as_i64)
            .ok_or_else(|| IntakeError::tracker(format!("{NAME} response had no work item id")))?;
        debug!(work_item = id, "work item created");
        Ok(id.to_string())
    }
}
