// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock language model for deterministic testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use intake_core::{AdapterType, HealthStatus, IntakeError, LanguageModelAdapter, PluginAdapter};

/// A language model that answers from a FIFO queue.
///
/// An empty queue answers with plain prose, which the suggestion parser
/// treats as unusable. A failing model errors on every call.
pub struct MockLanguageModel {
    responses: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
    failing: bool,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Pre-loaded with `responses`, returned in order.
    pub fn with_responses(responses: Vec<String>) -> Self {
        Self {
            responses: Mutex::new(VecDeque::from(responses)),
            prompts: Mutex::new(Vec::new()),
            failing: false,
        }
    }

    /// A model whose every call fails with `ModelUnavailable`.
    pub fn failing() -> Self {
        Self {
            failing: true,
            ..Self::new()
        }
    }

    pub async fn add_response(&self, text: impl Into<String>) {
        self.responses.lock().await.push_back(text.into());
    }

    /// Every prompt received so far.
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.prompts.lock().await.len()
    }
}

impl Default for MockLanguageModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockLanguageModel {
    fn name(&self) -> &str {
        "mock-model"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LanguageModel
    }

    async fn health_check(&self) -> Result<HealthStatus, IntakeError> {
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), IntakeError> {
        Ok(())
    }
}

#[async_trait]
impl LanguageModelAdapter for MockLanguageModel {
    async fn invoke(&self, prompt: &str) -> Result<String, IntakeError> {
        self.prompts.lock().await.push(prompt.to_string());

        if self.failing {
            return Err(IntakeError::model_unavailable("mock model is offline"));
        }

        Ok(self
            .responses
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| "mock response".to_string()))
    }
}
