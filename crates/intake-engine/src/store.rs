// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory session store backed by a concurrent map.

use std::sync::Mutex;

use async_trait::async_trait;
use dashmap::DashMap;
use intake_core::{
    AdapterType, ConversationSession, HealthStatus, IntakeError, PluginAdapter, SessionId,
    SessionStore,
};

/// Holds sessions for the lifetime of the process, up to a fixed capacity.
#[derive(Debug)]
pub struct InMemorySessionStore {
    sessions: DashMap<SessionId, ConversationSession>,
    max_sessions: usize,
    /// Serializes the capacity check with the insert in `create`.
    admission: Mutex<()>,
}

impl InMemorySessionStore {
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions,
            admission: Mutex::new(()),
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[async_trait]
impl PluginAdapter for InMemorySessionStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::SessionStore
    }

    async fn health_check(&self) -> Result<HealthStatus, IntakeError> {
        if self.sessions.len() >= self.max_sessions {
            Ok(HealthStatus::Degraded(format!(
                "at capacity ({} sessions)",
                self.max_sessions
            )))
        } else {
            Ok(HealthStatus::Healthy)
        }
    }

    async fn shutdown(&self) -> Result<(), IntakeError> {
        self.sessions.clear();
        Ok(())
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    /// Inserts `session` unless the store is full. Concurrent creates never
    /// push the count past `max_sessions`.
    async fn create(&self, session: ConversationSession) -> Result<(), IntakeError> {
        let _admission = self
            .admission
            .lock()
            .map_err(|_| IntakeError::Internal("session admission lock poisoned".into()))?;
        if self.sessions.len() >= self.max_sessions {
            tracing::warn!(max = self.max_sessions, "session limit reached");
            return Err(IntakeError::SessionLimit {
                max: self.max_sessions,
            });
        }
        self.sessions.insert(session.id.clone(), session);
        Ok(())
    }

    async fn load(&self, id: &SessionId) -> Result<Option<ConversationSession>, IntakeError> {
        Ok(self.sessions.get(id).map(|entry| entry.value().clone()))
    }

    async fn save(&self, session: &ConversationSession) -> Result<(), IntakeError> {
        match self.sessions.get_mut(&session.id) {
            Some(mut entry) => {
                *entry = session.clone();
                Ok(())
            }
            None => Err(IntakeError::SessionNotFound(session.id.to_string())),
        }
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, IntakeError> {
        Ok(self.sessions.remove(id).is_some())
    }

    async fn list(&self) -> Result<Vec<SessionId>, IntakeError> {
        let mut ids: Vec<SessionId> = self.sessions.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        Ok(ids)
    }
}
