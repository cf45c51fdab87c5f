// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end conversation tests.
//!
//! `TestHarness` wires a [`ConversationEngine`] to an in-memory session store
//! and the mock adapters, and drives sessions through `open()` / `say()`.

use std::sync::Arc;

use intake_core::{ConversationSession, IntakeError, PriorityScale, SessionId, SessionStore};
use intake_engine::{ConversationEngine, InMemorySessionStore, PriorityMapper, TurnReply};

use crate::mock_model::MockLanguageModel;
use crate::mock_tracker::MockTracker;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    responses: Vec<String>,
    model_offline: bool,
    tracker_failure: Option<String>,
    scale: PriorityScale,
    max_sessions: usize,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            responses: Vec::new(),
            model_offline: false,
            tracker_failure: None,
            scale: PriorityScale::ThreeTier,
            max_sessions: 16,
        }
    }

    /// Model responses, returned in order.
    pub fn with_model_responses(mut self, responses: Vec<String>) -> Self {
        self.responses = responses;
        self
    }

    /// Every model call fails.
    pub fn with_model_offline(mut self) -> Self {
        self.model_offline = true;
        self
    }

    /// Every tracker call fails with `detail`.
    pub fn with_tracker_failure(mut self, detail: impl Into<String>) -> Self {
        self.tracker_failure = Some(detail.into());
        self
    }

    pub fn with_scale(mut self, scale: PriorityScale) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_max_sessions(mut self, max: usize) -> Self {
        self.max_sessions = max;
        self
    }

    pub fn build(self) -> TestHarness {
        let model = Arc::new(if self.model_offline {
            MockLanguageModel::failing()
        } else {
            MockLanguageModel::with_responses(self.responses)
        });
        let tracker = Arc::new(match self.tracker_failure {
            Some(detail) => MockTracker::failing(detail),
            None => MockTracker::new(),
        });
        let engine = ConversationEngine::new(
            model.clone(),
            tracker.clone(),
            PriorityMapper::new(self.scale),
        )
        .with_agent_name("test-agent");

        TestHarness {
            engine: Arc::new(engine),
            store: Arc::new(InMemorySessionStore::new(self.max_sessions)),
            model,
            tracker,
        }
    }
}

/// A complete conversation stack backed by mocks.
pub struct TestHarness {
    pub engine: Arc<ConversationEngine>,
    pub store: Arc<InMemorySessionStore>,
    pub model: Arc<MockLanguageModel>,
    pub tracker: Arc<MockTracker>,
}

impl TestHarness {
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Opens a session and returns its id.
    pub async fn open(&self) -> Result<SessionId, IntakeError> {
        Ok(self.engine.open_session(self.store.as_ref()).await?.session_id)
    }

    /// Sends one message on session `id`.
    pub async fn say(&self, id: &SessionId, text: &str) -> Result<TurnReply, IntakeError> {
        self.engine.handle_turn(self.store.as_ref(), id, text).await
    }

    /// Sends each message in turn, returning the last reply.
    pub async fn say_all(&self, id: &SessionId, texts: &[&str]) -> Result<TurnReply, IntakeError> {
        let mut last = None;
        for text in texts {
            last = Some(self.say(id, text).await?);
        }
        last.ok_or_else(|| IntakeError::Internal("no messages sent".to_string()))
    }

    /// Current stored state of session `id`.
    pub async fn session(&self, id: &SessionId) -> Result<ConversationSession, IntakeError> {
        self.store
            .load(id)
            .await?
            .ok_or_else(|| IntakeError::SessionNotFound(id.to_string()))
    }
}
