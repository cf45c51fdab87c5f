// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session store trait: the surface-owned holder of per-session conversation state.

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ConversationSession, SessionId};

/// Holds the draft and chat history of every live session.
///
/// The store owns expiry and capacity policy; the conversation engine only
/// loads and saves through it.
#[async_trait]
pub trait SessionStore: PluginAdapter {
    /// Inserts a new session. Fails with [`IntakeError::SessionLimit`] at capacity.
    async fn create(&self, session: ConversationSession) -> Result<(), IntakeError>;

    /// Returns a copy of the session, if present.
    async fn load(&self, id: &SessionId) -> Result<Option<ConversationSession>, IntakeError>;

    /// Replaces the stored session with `session`.
    async fn save(&self, session: &ConversationSession) -> Result<(), IntakeError>;

    /// Removes a session. Returns whether it existed.
    async fn remove(&self, id: &SessionId) -> Result<bool, IntakeError>;

    /// Lists the ids of all stored sessions.
    async fn list(&self) -> Result<Vec<SessionId>, IntakeError>;
}
