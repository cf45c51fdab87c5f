// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the intake agent.

use thiserror::Error;

use crate::types::Stage;

/// The primary error type used across adapter traits and the conversation engine.
#[derive(Debug, Error)]
pub enum IntakeError {
    /// Configuration errors (missing tracker settings, unresolvable secrets).
    #[error("configuration error: {0}")]
    Config(String),

    /// The language model could not produce a completion (network, auth, timeout).
    #[error("language model unavailable: {message}")]
    ModelUnavailable {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The ticket tracker rejected or failed the ticket creation call.
    ///
    /// `message` is the detail shown to the user.
    #[error("tracker error: {message}")]
    Tracker {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Chat surface errors (bind failure, readline failure).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No session with the given id exists in the session store.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The session store is at capacity.
    #[error("session limit reached ({max} active sessions)")]
    SessionLimit { max: usize },

    /// A draft transition was attempted from the wrong stage.
    #[error("invalid stage: expected {expected}, draft is at {actual}")]
    InvalidStage { expected: Stage, actual: Stage },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntakeError {
    /// Convenience constructor for a tracker failure without an underlying source.
    pub fn tracker(message: impl Into<String>) -> Self {
        IntakeError::Tracker {
            message: message.into(),
            source: None,
        }
    }

    /// Convenience constructor for a model failure without an underlying source.
    pub fn model_unavailable(message: impl Into<String>) -> Self {
        IntakeError::ModelUnavailable {
            message: message.into(),
            source: None,
        }
    }

    /// The user-facing detail for this error.
    ///
    /// Tracker failures expose the raw detail without the `tracker error:` prefix.
    pub fn detail(&self) -> String {
        match self {
            IntakeError::Tracker { message, .. } => message.clone(),
            IntakeError::ModelUnavailable { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}
