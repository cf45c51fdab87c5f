// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Language-model adapter trait (Groq, or any chat-completion service).

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::traits::adapter::PluginAdapter;

/// Adapter for a text-in, text-out language model.
#[async_trait]
pub trait LanguageModelAdapter: PluginAdapter {
    /// Sends `prompt` and returns the raw completion text.
    ///
    /// Fails with [`IntakeError::ModelUnavailable`] when the service call
    /// cannot complete (network error, auth error, timeout).
    async fn invoke(&self, prompt: &str) -> Result<String, IntakeError>;
}
