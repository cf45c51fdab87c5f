// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock ticket tracker that records every request it receives.

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_core::{
    AdapterType, HealthStatus, IntakeError, PluginAdapter, TicketRequest, TrackerAdapter,
};

/// Records ticket requests and either assigns sequential ids or fails.
pub struct MockTracker {
    requests: Mutex<Vec<TicketRequest>>,
    failure: Option<String>,
}

impl MockTracker {
    /// A tracker that succeeds with ids `TCK-1`, `TCK-2`, ...
    pub fn new() -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: None,
        }
    }

    /// A tracker that rejects every ticket with `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            failure: Some(detail.into()),
        }
    }

    pub async fn requests(&self) -> Vec<TicketRequest> {
        self.requests.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockTracker {
    fn name(&self) -> &str {
        "mock-tracker"
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
impl TrackerAdapter for MockTracker {
    async fn create_ticket(&self, ticket: &TicketRequest) -> Result<String, IntakeError> {
        let mut requests = self.requests.lock().await;
        requests.push(ticket.clone());

        match &self.failure {
            Some(detail) => Err(IntakeError::tracker(detail.clone())),
            None => Ok(format!("TCK-{}", requests.len())),
        }
    }
}
