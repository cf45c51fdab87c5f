// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use intake_core::{
    ChatTurn, HealthStatus, IntakeError, SessionId, Stage, TicketSubmissionResult,
};
use serde::{Deserialize, Serialize};

use crate::server::GatewayState;

/// Request body for POST /v1/sessions/{id}/messages.
#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    /// Message text, passed to the engine verbatim.
    pub content: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_secs: u64,
}

/// Response body for GET /v1/sessions.
#[derive(Debug, Serialize)]
pub struct SessionListResponse {
    pub sessions: Vec<SessionId>,
}

/// Response body for GET /v1/sessions/{id}.
#[derive(Debug, Serialize)]
pub struct SessionDetail {
    pub session_id: SessionId,
    pub stage: Stage,
    pub history: Vec<ChatTurn>,
    pub last_submission: Option<TicketSubmissionResult>,
    pub created_at: String,
    pub updated_at: String,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Maps engine and store errors onto HTTP statuses.
fn engine_error(err: IntakeError) -> Response {
    let status = match &err {
        IntakeError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        IntakeError::SessionLimit { .. } => StatusCode::SERVICE_UNAVAILABLE,
        IntakeError::InvalidStage { .. } => StatusCode::CONFLICT,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
        tracing::error!(error = %err, "gateway request failed");
    }
    error_response(status, err.to_string())
}

/// Like [`engine_error`], but drops the turn gate claimed for a session that
/// does not exist so unknown ids leave nothing behind.
fn turn_error(state: &GatewayState, id: &SessionId, err: IntakeError) -> Response {
    if matches!(err, IntakeError::SessionNotFound(_)) {
        state.forget_session(id);
    }
    engine_error(err)
}

fn busy(id: &SessionId) -> Response {
    error_response(
        StatusCode::CONFLICT,
        format!("session {id} is already processing a message"),
    )
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    let status = match state.store.health_check().await {
        Ok(HealthStatus::Healthy) => "ok",
        Ok(HealthStatus::Degraded(_)) => "degraded",
        Ok(HealthStatus::Unhealthy(_)) | Err(_) => "unhealthy",
    };
    Json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}

/// POST /v1/sessions
///
/// Opens a session and returns the greeting.
pub async fn create_session(State(state): State<GatewayState>) -> Response {
    match state.engine.open_session(state.store.as_ref()).await {
        Ok(reply) => (StatusCode::CREATED, Json(reply)).into_response(),
        Err(e) => engine_error(e),
    }
}

/// GET /v1/sessions
pub async fn list_sessions(State(state): State<GatewayState>) -> Response {
    match state.store.list().await {
        Ok(sessions) => Json(SessionListResponse { sessions }).into_response(),
        Err(e) => engine_error(e),
    }
}

/// GET /v1/sessions/{id}
pub async fn get_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    let id = SessionId(id);
    match state.store.load(&id).await {
        Ok(Some(session)) => Json(SessionDetail {
            session_id: session.id,
            stage: session.draft.stage(),
            history: session.history.turns().to_vec(),
            last_submission: session.last_submission,
            created_at: session.created_at,
            updated_at: session.updated_at,
        })
        .into_response(),
        Ok(None) => engine_error(IntakeError::SessionNotFound(id.to_string())),
        Err(e) => engine_error(e),
    }
}

/// POST /v1/sessions/{id}/messages
///
/// Runs one conversation turn. A second message for a session that is
/// still mid-turn gets 409 instead of being queued.
pub async fn post_message(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<MessageRequest>,
) -> Response {
    let id = SessionId(id);
    let Some(_turn) = state.try_begin_turn(&id) else {
        return busy(&id);
    };

    match state
        .engine
        .handle_turn(state.store.as_ref(), &id, &body.content)
        .await
    {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => turn_error(&state, &id, e),
    }
}

/// POST /v1/sessions/{id}/restart
pub async fn restart_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    let id = SessionId(id);
    let Some(_turn) = state.try_begin_turn(&id) else {
        return busy(&id);
    };

    match state.engine.restart_session(state.store.as_ref(), &id).await {
        Ok(reply) => Json(reply).into_response(),
        Err(e) => turn_error(&state, &id, e),
    }
}

/// DELETE /v1/sessions/{id}
pub async fn delete_session(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Response {
    let id = SessionId(id);
    match state.store.remove(&id).await {
        Ok(true) => {
            state.forget_session(&id);
            tracing::info!(session_id = %id, "session deleted");
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(false) => engine_error(IntakeError::SessionNotFound(id.to_string())),
        Err(e) => engine_error(e),
    }
}
