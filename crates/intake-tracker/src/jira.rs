// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Jira issues via `POST {base_url}/rest/api/2/issue`, basic auth `email:api_token`.

use std::time::Duration;

use async_trait::async_trait;
use intake_config::model::JiraConfig;
use intake_core::{
    AdapterType, HealthStatus, IntakeError, PluginAdapter, TicketRequest, TrackerAdapter,
};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::http;

/// Environment variable consulted when `tracker.jira.api_token` is unset.
pub const API_TOKEN_ENV: &str = "JIRA_API_TOKEN";

const NAME: &str = "jira";

#[derive(Debug, Serialize)]
struct CreateIssue<'a> {
    fields: IssueFields<'a>,
}

#[derive(Debug, Serialize)]
struct IssueFields<'a> {
    project: KeyRef<'a>,
    summary: &'a str,
    description: String,
    issuetype: NameRef<'a>,
    priority: NameRef<'a>,
}

#[derive(Debug, Serialize)]
struct KeyRef<'a> {
    key: &'a str,
}

#[derive(Debug, Serialize)]
struct NameRef<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct CreatedIssue {
    key: String,
}

/// Files tickets as Jira issues.
#[derive(Debug)]
pub struct JiraTracker {
    client: reqwest::Client,
    endpoint: String,
    project_key: String,
    issue_type: String,
    email: String,
    token: SecretString,
}

impl JiraTracker {
    pub fn new(config: &JiraConfig, timeout: Duration) -> Result<Self, IntakeError> {
        let base_url = http::required(&config.base_url, "tracker.jira.base_url")?;
        Ok(Self {
            client: http::build_client(timeout)?,
            endpoint: format!("{}/rest/api/2/issue", base_url.trim_end_matches('/')),
            project_key: http::required(&config.project_key, "tracker.jira.project_key")?,
            issue_type: config.issue_type.clone(),
            email: http::required(&config.email, "tracker.jira.email")?,
            token: http::required_secret(&config.api_token, "tracker.jira.api_token", API_TOKEN_ENV)?,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl PluginAdapter for JiraTracker {
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
impl TrackerAdapter for JiraTracker {
    async fn create_ticket(&self, ticket: &TicketRequest) -> Result<String, IntakeError> {
        let body = CreateIssue {
            fields: IssueFields {
                project: KeyRef {
                    key: &self.project_key,
                },
                summary: &ticket.subject,
                description: http::with_contact(&ticket.description, &ticket.contact_email),
                issuetype: NameRef {
                    name: &self.issue_type,
                },
                priority: NameRef {
                    name: &ticket.priority_label,
                },
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .basic_auth(&self.email, Some(self.token.expose_secret()))
            .json(&body)
            .send()
            .await
            .map_err(|e| http::request_failed(NAME, e))?;
        if !response.status().is_success() {
            return Err(http::response_failed(NAME, response).await);
        }

        let created: CreatedIssue = response
            .json()
            .await
            .map_err(|e| http::request_failed(NAME, e))?;
        debug!(key = %created.key, "jira issue created");
        Ok(created.key)
    }
}
