// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Groq language-model adapter for the intake agent.
//!
//! Implements [`LanguageModelAdapter`] over Groq's OpenAI-compatible
//! chat-completions endpoint. Each prompt is sent as a single user message.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use intake_config::model::GroqConfig;
use intake_core::{AdapterType, HealthStatus, IntakeError, LanguageModelAdapter, PluginAdapter};
use secrecy::SecretString;
use tracing::{debug, info};

use crate::client::GroqClient;
use crate::types::{ChatMessage, ChatRequest};

/// Environment variable consulted when `groq.api_key` is unset.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";

/// Groq provider implementing [`LanguageModelAdapter`].
///
/// API key resolution order: config -> `GROQ_API_KEY` env var -> error.
pub struct GroqProvider {
    client: GroqClient,
    model: String,
    temperature: f64,
    max_tokens: u32,
}

impl GroqProvider {
    pub fn new(config: &GroqConfig) -> Result<Self, IntakeError> {
        let api_key = resolve_api_key(&config.api_key)?;
        let client = GroqClient::new(
            api_key,
            &config.base_url,
            Duration::from_secs(config.timeout_secs),
            config.max_retries,
        )?;

        info!(model = %config.model, "Groq provider initialized");
        Ok(Self {
            client,
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn to_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::user(prompt)],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }
}

#[async_trait]
impl PluginAdapter for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::LanguageModel
    }

    async fn health_check(&self) -> Result<HealthStatus, IntakeError> {
        // No probe call: completions are billed.
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), IntakeError> {
        debug!("Groq provider shutting down");
        Ok(())
    }
}

#[async_trait]
impl LanguageModelAdapter for GroqProvider {
    async fn invoke(&self, prompt: &str) -> Result<String, IntakeError> {
        let response = self.client.complete(&self.to_request(prompt)).await?;

        if let Some(choice) = response.choices.first() {
            debug!(
                finish_reason = choice.finish_reason.as_deref().unwrap_or("unknown"),
                "Groq completion finished"
            );
        }

        response
            .first_text()
            .map(str::to_string)
            .ok_or_else(|| IntakeError::model_unavailable("Groq response contained no message content"))
    }
}

/// Resolves the API key: non-empty config value, else `GROQ_API_KEY`.
fn resolve_api_key(config_key: &Option<String>) -> Result<SecretString, IntakeError> {
    if let Some(key) = config_key
        && !key.is_empty()
    {
        return Ok(SecretString::from(key.clone()));
    }

    std::env::var(API_KEY_ENV)
        .ok()
        .filter(|k| !k.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| {
            IntakeError::Config(format!(
                "Groq API key not found. Set groq.api_key in config or the {API_KEY_ENV} environment variable."
            ))
        })
}
