// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the adapters, the conversation engine, and the chat surfaces.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::error::IntakeError;

/// Unique identifier for a conversation session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a fresh random session id.
    pub fn generate() -> Self {
        SessionId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SessionId {
    fn from(value: &str) -> Self {
        SessionId(value.to_string())
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    LanguageModel,
    Tracker,
    SessionStore,
}

/// Position of a session within the intake dialogue.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    AskName,
    AskEmail,
    AskProblem,
    Confirm,
    Done,
}

/// Priority scale of the target tracker.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum PriorityScale {
    /// `1 = Low, 2 = Medium, 3 = High`.
    ThreeTier,
    /// `1 = Highest .. 5 = Lowest`.
    FiveTier,
}

impl PriorityScale {
    /// Number of tiers on this scale.
    pub fn tiers(self) -> i64 {
        match self {
            PriorityScale::ThreeTier => 3,
            PriorityScale::FiveTier => 5,
        }
    }

    /// Inclusive valid range.
    pub fn range(self) -> std::ops::RangeInclusive<i64> {
        1..=self.tiers()
    }

    /// Default priority: the midpoint of the range.
    pub fn midpoint(self) -> i64 {
        (1 + self.tiers()) / 2
    }

    /// Clamps `priority` into the valid range.
    pub fn clamp(self, priority: i64) -> i64 {
        priority.clamp(1, self.tiers())
    }
}

/// The in-progress ticket fields collected from a user.
///
/// Fields can only be written through the stage-guarded transition methods,
/// which enforce the order name -> email -> problem -> suggestion -> confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketDraft {
    user_name: String,
    user_email: String,
    problem_description: String,
    subject: String,
    description: String,
    priority: i64,
    stage: Stage,
}

impl TicketDraft {
    /// Creates an empty draft at [`Stage::AskName`].
    pub fn new(default_priority: i64) -> Self {
        Self {
            user_name: String::new(),
            user_email: String::new(),
            problem_description: String::new(),
            subject: String::new(),
            description: String::new(),
            priority: default_priority,
            stage: Stage::AskName,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn user_name(&self) -> &str {
        &self.user_name
    }

    pub fn user_email(&self) -> &str {
        &self.user_email
    }

    pub fn problem_description(&self) -> &str {
        &self.problem_description
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    fn expect_stage(&self, expected: Stage) -> Result<(), IntakeError> {
        if self.stage == expected {
            Ok(())
        } else {
            Err(IntakeError::InvalidStage {
                expected,
                actual: self.stage,
            })
        }
    }

    /// `AskName -> AskEmail`.
    pub fn record_name(&mut self, name: &str) -> Result<(), IntakeError> {
        self.expect_stage(Stage::AskName)?;
        self.user_name = name.to_string();
        self.stage = Stage::AskEmail;
        Ok(())
    }

    /// `AskEmail -> AskProblem`.
    pub fn record_email(&mut self, email: &str) -> Result<(), IntakeError> {
        self.expect_stage(Stage::AskEmail)?;
        self.user_email = email.to_string();
        self.stage = Stage::AskProblem;
        Ok(())
    }

    /// `AskProblem -> Confirm`. Stores the problem together with its derived suggestion.
    ///
    /// `description` falls back to the problem text when the suggestion has none.
    pub fn record_problem(
        &mut self,
        problem: &str,
        suggestion: SuggestionResult,
    ) -> Result<(), IntakeError> {
        self.expect_stage(Stage::AskProblem)?;
        self.problem_description = problem.to_string();
        self.subject = suggestion.subject;
        self.description = suggestion
            .description
            .unwrap_or_else(|| problem.to_string());
        self.priority = suggestion.priority;
        self.stage = Stage::Confirm;
        Ok(())
    }

    /// `Confirm -> AskProblem`. Keeps name and email, discards everything derived.
    pub fn reject_suggestion(&mut self, default_priority: i64) -> Result<(), IntakeError> {
        self.expect_stage(Stage::Confirm)?;
        self.problem_description.clear();
        self.subject.clear();
        self.description.clear();
        self.priority = default_priority;
        self.stage = Stage::AskProblem;
        Ok(())
    }

    /// `Confirm -> Done`. Clears the submitted fields.
    pub fn close(&mut self, default_priority: i64) -> Result<(), IntakeError> {
        self.expect_stage(Stage::Confirm)?;
        *self = TicketDraft::new(default_priority);
        self.stage = Stage::Done;
        Ok(())
    }
}

/// One exchange in the chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub user_text: Option<String>,
    pub bot_text: Option<String>,
}

impl ChatTurn {
    /// A completed user/bot exchange.
    pub fn exchange(user_text: impl Into<String>, bot_text: impl Into<String>) -> Self {
        Self {
            user_text: Some(user_text.into()),
            bot_text: Some(bot_text.into()),
        }
    }

    /// A bot message with no user message (greetings).
    pub fn bot_only(bot_text: impl Into<String>) -> Self {
        Self {
            user_text: None,
            bot_text: Some(bot_text.into()),
        }
    }
}

/// Append-only, chronologically ordered record of chat turns.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatHistoryLog {
    turns: Vec<ChatTurn>,
}

impl ChatHistoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, turn: ChatTurn) {
        self.turns.push(turn);
    }

    pub fn turns(&self) -> &[ChatTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn last(&self) -> Option<&ChatTurn> {
        self.turns.last()
    }

    /// Renders the most recent `max_turns` turns as `User:` / `Assistant:` lines.
    pub fn transcript(&self, max_turns: usize) -> String {
        let start = self.turns.len().saturating_sub(max_turns);
        let mut out = String::new();
        for turn in &self.turns[start..] {
            if let Some(ref user) = turn.user_text {
                out.push_str(&format!("User: {user}\n"));
            }
            if let Some(ref bot) = turn.bot_text {
                out.push_str(&format!("Assistant: {bot}\n"));
            }
        }
        out
    }
}

/// A structured ticket suggestion derived from language-model output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionResult {
    pub subject: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub priority: i64,
}

/// Outcome of a ticket submission, returned to the chat surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketSubmissionResult {
    pub succeeded: bool,
    pub identifier: Option<String>,
    pub error_detail: Option<String>,
}

impl TicketSubmissionResult {
    pub fn success(identifier: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            identifier: Some(identifier.into()),
            error_detail: None,
        }
    }

    pub fn failure(detail: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            identifier: None,
            error_detail: Some(detail.into()),
        }
    }
}

/// The ticket handed to a tracker adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketRequest {
    pub subject: String,
    pub description: String,
    pub contact_email: String,
    /// Tracker-native priority label, e.g. `"High"`.
    pub priority_label: String,
}

/// Everything a chat surface keeps for one user session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    pub id: SessionId,
    pub draft: TicketDraft,
    pub history: ChatHistoryLog,
    pub last_submission: Option<TicketSubmissionResult>,
    pub created_at: String,
    pub updated_at: String,
}

impl ConversationSession {
    pub fn new(id: SessionId, draft: TicketDraft) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        Self {
            id,
            draft,
            history: ChatHistoryLog::new(),
            last_submission: None,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Bumps `updated_at` to now.
    pub fn touch(&mut self) {
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }
}
