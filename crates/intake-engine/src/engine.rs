// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The conversation state machine.
//!
//! Each call consumes one user message, advances the session's draft by at
//! most one stage, appends exactly one chat turn, and returns the bot reply.
//! Only two transitions touch the network: `AskProblem` calls the language
//! model, and an accepted `Confirm` calls the tracker once.

use std::sync::Arc;

use intake_core::{
    ChatTurn, ConversationSession, IntakeError, LanguageModelAdapter, SessionId, SessionStore,
    Stage, SuggestionResult, TicketDraft, TicketRequest, TicketSubmissionResult, TrackerAdapter,
};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::parser::{default_suggestion, parse_suggestion};
use crate::priority::PriorityMapper;
use crate::prompts;

/// Inputs accepted as confirmation (compared trimmed, case-insensitively).
pub const CONFIRM_YES: &[&str] = &["yes", "y", "correct"];

/// Inputs accepted as rejection (compared trimmed, case-insensitively).
pub const CONFIRM_NO: &[&str] = &["no", "n", "incorrect"];

const DEFAULT_CONTEXT_TURNS: usize = 6;
const DEFAULT_AGENT_NAME: &str = "intake";

/// Outcome of one turn, as shown to a chat surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TurnReply {
    pub session_id: SessionId,
    pub reply: String,
    pub stage: Stage,
    /// Set only on the turn that submitted a ticket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<TicketSubmissionResult>,
}

enum Confirmation {
    Yes,
    No,
    Unclear,
}

fn classify(input: &str) -> Confirmation {
    let answer = input.trim();
    if CONFIRM_YES.iter().any(|w| w.eq_ignore_ascii_case(answer)) {
        Confirmation::Yes
    } else if CONFIRM_NO.iter().any(|w| w.eq_ignore_ascii_case(answer)) {
        Confirmation::No
    } else {
        Confirmation::Unclear
    }
}

/// Drives intake conversations against a language model and a tracker.
pub struct ConversationEngine {
    model: Arc<dyn LanguageModelAdapter>,
    tracker: Arc<dyn TrackerAdapter>,
    priorities: PriorityMapper,
    agent_name: String,
    context_turns: usize,
}

impl ConversationEngine {
    pub fn new(
        model: Arc<dyn LanguageModelAdapter>,
        tracker: Arc<dyn TrackerAdapter>,
        priorities: PriorityMapper,
    ) -> Self {
        Self {
            model,
            tracker,
            priorities,
            agent_name: DEFAULT_AGENT_NAME.to_string(),
            context_turns: DEFAULT_CONTEXT_TURNS,
        }
    }

    /// Name used in the greeting.
    pub fn with_agent_name(mut self, name: impl Into<String>) -> Self {
        self.agent_name = name.into();
        self
    }

    /// Number of recent turns passed to the model alongside the problem.
    pub fn with_context_turns(mut self, turns: usize) -> Self {
        self.context_turns = turns;
        self
    }

    pub fn priorities(&self) -> &PriorityMapper {
        &self.priorities
    }

    pub fn model(&self) -> &Arc<dyn LanguageModelAdapter> {
        &self.model
    }

    pub fn tracker(&self) -> &Arc<dyn TrackerAdapter> {
        &self.tracker
    }

    pub fn greeting(&self) -> String {
        prompts::greeting(&self.agent_name)
    }

    /// A fresh session at `AskName` whose history holds the greeting.
    pub fn start_session(&self, id: SessionId) -> ConversationSession {
        let mut session =
            ConversationSession::new(id, TicketDraft::new(self.priorities.default_priority()));
        session.history.push(ChatTurn::bot_only(self.greeting()));
        session
    }

    /// Discards the draft and starts over at `AskName`. History is kept.
    pub fn restart(&self, session: &mut ConversationSession) -> TurnReply {
        session.draft = TicketDraft::new(self.priorities.default_priority());
        let greeting = self.greeting();
        session.history.push(ChatTurn::bot_only(greeting.clone()));
        session.touch();
        info!(session_id = %session.id, "session restarted");

        TurnReply {
            session_id: session.id.clone(),
            reply: greeting,
            stage: session.draft.stage(),
            submission: None,
        }
    }

    /// Processes one user message against an in-hand session.
    pub async fn handle_input(
        &self,
        session: &mut ConversationSession,
        input: &str,
    ) -> Result<TurnReply, IntakeError> {
        let from = session.draft.stage();
        let mut submission = None;

        let reply = match from {
            Stage::AskName => {
                session.draft.record_name(input)?;
                prompts::ask_email(input)
            }
            Stage::AskEmail => {
                session.draft.record_email(input)?;
                prompts::ASK_PROBLEM.to_string()
            }
            Stage::AskProblem => {
                let suggestion = self.suggest(session, input).await;
                session.draft.record_problem(input, suggestion)?;
                prompts::confirm_suggestion(
                    session.draft.subject(),
                    self.priorities.label(session.draft.priority()),
                )
            }
            Stage::Confirm => match classify(input) {
                Confirmation::Yes => {
                    let result = self.submit(session).await;
                    session.draft.close(self.priorities.default_priority())?;
                    let reply = match (&result.identifier, &result.error_detail) {
                        (Some(id), _) => prompts::ticket_created(id),
                        (None, Some(detail)) => prompts::ticket_failed(detail),
                        (None, None) => prompts::ticket_failed("unknown error"),
                    };
                    session.last_submission = Some(result.clone());
                    submission = Some(result);
                    reply
                }
                Confirmation::No => {
                    session
                        .draft
                        .reject_suggestion(self.priorities.default_priority())?;
                    prompts::ASK_REDESCRIBE.to_string()
                }
                Confirmation::Unclear => prompts::ASK_YES_NO.to_string(),
            },
            Stage::Done => prompts::REQUEST_CLOSED.to_string(),
        };

        session.history.push(ChatTurn::exchange(input, reply.clone()));
        session.touch();

        let stage = session.draft.stage();
        debug!(session_id = %session.id, %from, to = %stage, "turn handled");

        Ok(TurnReply {
            session_id: session.id.clone(),
            reply,
            stage,
            submission,
        })
    }

    /// Loads the session from `store`, processes one message, and saves it back.
    pub async fn handle_turn(
        &self,
        store: &dyn SessionStore,
        id: &SessionId,
        input: &str,
    ) -> Result<TurnReply, IntakeError> {
        let mut session = store
            .load(id)
            .await?
            .ok_or_else(|| IntakeError::SessionNotFound(id.to_string()))?;
        let reply = self.handle_input(&mut session, input).await?;
        store.save(&session).await?;
        Ok(reply)
    }

    /// Creates and stores a new session, returning its greeting.
    pub async fn open_session(&self, store: &dyn SessionStore) -> Result<TurnReply, IntakeError> {
        let session = self.start_session(SessionId::generate());
        let reply = TurnReply {
            session_id: session.id.clone(),
            reply: self.greeting(),
            stage: session.draft.stage(),
            submission: None,
        };
        store.create(session).await?;
        info!(session_id = %reply.session_id, "session opened");
        Ok(reply)
    }

    /// Restarts a stored session.
    pub async fn restart_session(
        &self,
        store: &dyn SessionStore,
        id: &SessionId,
    ) -> Result<TurnReply, IntakeError> {
        let mut session = store
            .load(id)
            .await?
            .ok_or_else(|| IntakeError::SessionNotFound(id.to_string()))?;
        let reply = self.restart(&mut session);
        store.save(&session).await?;
        Ok(reply)
    }

    /// Asks the model for a suggestion. Any failure yields the default suggestion.
    async fn suggest(&self, session: &ConversationSession, problem: &str) -> SuggestionResult {
        let scale = self.priorities.scale();
        let conversation = session.history.transcript(self.context_turns);
        let prompt = prompts::build_suggestion_prompt(problem, &conversation, scale);

        match self.model.invoke(&prompt).await {
            Ok(raw) => parse_suggestion(&raw, problem, scale),
            Err(e) => {
                warn!(
                    session_id = %session.id,
                    error = %e,
                    "language model unavailable, using default suggestion"
                );
                default_suggestion(problem, scale)
            }
        }
    }

    /// Files the drafted ticket. Called exactly once per accepted confirmation.
    async fn submit(&self, session: &ConversationSession) -> TicketSubmissionResult {
        let draft = &session.draft;
        let request = TicketRequest {
            subject: draft.subject().to_string(),
            description: draft.description().to_string(),
            contact_email: draft.user_email().to_string(),
            priority_label: self.priorities.label(draft.priority()).to_string(),
        };

        match self.tracker.create_ticket(&request).await {
            Ok(identifier) => {
                info!(
                    session_id = %session.id,
                    tracker = self.tracker.name(),
                    %identifier,
                    "ticket created"
                );
                TicketSubmissionResult::success(identifier)
            }
            Err(e) => {
                warn!(
                    session_id = %session.id,
                    tracker = self.tracker.name(),
                    error = %e,
                    "ticket submission failed"
                );
                TicketSubmissionResult::failure(e.detail())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn confirmation_words_are_trimmed_and_case_insensitive() {
        assert!(matches!(classify("  YES "), Confirmation::Yes));
        assert!(matches!(classify("y"), Confirmation::Yes));
        assert!(matches!(classify("Correct"), Confirmation::Yes));
        assert!(matches!(classify("No"), Confirmation::No));
        assert!(matches!(classify("INCORRECT"), Confirmation::No));
        assert!(matches!(classify("yes please"), Confirmation::Unclear));
        assert!(matches!(classify(""), Confirmation::Unclear));
    }

    #[test]
    fn confirmation_sets_are_disjoint() {
        for yes in CONFIRM_YES {
            assert!(!CONFIRM_NO.contains(yes));
        }
    }
}
