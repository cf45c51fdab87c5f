// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Router,
};
use dashmap::DashMap;
use intake_config::model::GatewayConfig;
use intake_core::{IntakeError, SessionId, SessionStore};
use intake_engine::ConversationEngine;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub engine: Arc<ConversationEngine>,
    pub store: Arc<dyn SessionStore>,
    /// One gate per session; a turn holds it until the reply is saved.
    turn_gates: Arc<DashMap<SessionId, Arc<Mutex<()>>>>,
    /// Process start time for uptime calculation.
    pub start_time: Instant,
}

impl GatewayState {
    pub fn new(engine: Arc<ConversationEngine>, store: Arc<dyn SessionStore>) -> Self {
        Self {
            engine,
            store,
            turn_gates: Arc::new(DashMap::new()),
            start_time: Instant::now(),
        }
    }

    /// Claims the turn gate for `id`, or `None` if a turn is already running.
    pub fn try_begin_turn(&self, id: &SessionId) -> Option<OwnedMutexGuard<()>> {
        let gate = self
            .turn_gates
            .entry(id.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        gate.try_lock_owned().ok()
    }

    pub(crate) fn forget_session(&self, id: &SessionId) {
        self.turn_gates.remove(id);
    }

    /// Number of sessions currently holding a turn gate entry.
    pub fn turn_gate_count(&self) -> usize {
        self.turn_gates.len()
    }
}

/// Builds the gateway router.
///
/// - GET /health
/// - POST /v1/sessions, GET /v1/sessions
/// - GET /v1/sessions/{id}, DELETE /v1/sessions/{id}
/// - POST /v1/sessions/{id}/messages
/// - POST /v1/sessions/{id}/restart
pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_health))
        .route(
            "/v1/sessions",
            post(handlers::create_session).get(handlers::list_sessions),
        )
        .route(
            "/v1/sessions/{id}",
            get(handlers::get_session).delete(handlers::delete_session),
        )
        .route("/v1/sessions/{id}/messages", post(handlers::post_message))
        .route("/v1/sessions/{id}/restart", post(handlers::restart_session))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Binds to the configured host:port and serves until `shutdown` is cancelled.
pub async fn start_server(
    config: &GatewayConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), IntakeError> {
    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| IntakeError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await
        .map_err(|e| IntakeError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use intake_test_utils::TestHarness;

    fn state() -> GatewayState {
        let h = TestHarness::builder().build();
        GatewayState::new(h.engine.clone(), h.store.clone())
    }

    #[test]
    fn turn_gate_is_exclusive_per_session() {
        let state = state();
        let a = SessionId::from("a");
        let guard = state.try_begin_turn(&a).expect("first turn gets the gate");
        assert!(state.try_begin_turn(&a).is_none());
        assert!(state.try_begin_turn(&SessionId::from("b")).is_some());
        drop(guard);
        assert!(state.try_begin_turn(&a).is_some());
    }

    #[test]
    fn clones_share_gates() {
        let state = state();
        let cloned = state.clone();
        let _guard = cloned.try_begin_turn(&SessionId::from("x"));
        assert!(state.try_begin_turn(&SessionId::from("x")).is_none());

        state.forget_session(&SessionId::from("x"));
        assert!(state.turn_gates.is_empty());
    }
}
