// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the intake agent.
//!
//! This crate provides the adapter traits, the error type, and the domain
//! types (draft, stage, chat history, submission result) used throughout the
//! workspace. Every external collaborator implements a trait defined here.

pub mod error;
pub mod traits;
pub mod types;

pub use error::IntakeError;
pub use types::{
    AdapterType, ChatHistoryLog, ChatTurn, ConversationSession, HealthStatus, PriorityScale,
    SessionId, Stage, SuggestionResult, TicketDraft, TicketRequest, TicketSubmissionResult,
};

pub use traits::{LanguageModelAdapter, PluginAdapter, SessionStore, TrackerAdapter};

#[cfg(test)]
mod tests {
    use super::*;

    fn suggestion(subject: &str, priority: i64) -> SuggestionResult {
        SuggestionResult {
            subject: subject.to_string(),
            description: None,
            priority,
        }
    }

    #[test]
    fn stage_display_round_trip() {
        use std::str::FromStr;

        let stages = [
            Stage::AskName,
            Stage::AskEmail,
            Stage::AskProblem,
            Stage::Confirm,
            Stage::Done,
        ];
        for stage in stages {
            let s = stage.to_string();
            assert_eq!(Stage::from_str(&s).expect("should parse back"), stage);
        }
        assert_eq!(Stage::AskProblem.to_string(), "ask_problem");
    }

    #[test]
    fn stage_serializes_snake_case() {
        let json = serde_json::to_string(&Stage::AskEmail).unwrap();
        assert_eq!(json, "\"ask_email\"");
    }

    #[test]
    fn priority_scale_midpoints() {
        assert_eq!(PriorityScale::ThreeTier.midpoint(), 2);
        assert_eq!(PriorityScale::FiveTier.midpoint(), 3);
        assert_eq!(PriorityScale::ThreeTier.clamp(9), 3);
        assert_eq!(PriorityScale::FiveTier.clamp(-4), 1);
        assert!(PriorityScale::FiveTier.range().contains(&5));
    }

    #[test]
    fn draft_fills_fields_in_order() {
        let mut draft = TicketDraft::new(2);
        assert_eq!(draft.stage(), Stage::AskName);

        draft.record_name("Alice").unwrap();
        assert_eq!(draft.stage(), Stage::AskEmail);
        draft.record_email("alice@x.com").unwrap();
        assert_eq!(draft.stage(), Stage::AskProblem);
        draft
            .record_problem("Printer is jammed", suggestion("Printer jam", 3))
            .unwrap();

        assert_eq!(draft.stage(), Stage::Confirm);
        assert_eq!(draft.user_name(), "Alice");
        assert_eq!(draft.user_email(), "alice@x.com");
        assert_eq!(draft.subject(), "Printer jam");
        // No derived description: falls back to the problem text.
        assert_eq!(draft.description(), "Printer is jammed");
        assert_eq!(draft.priority(), 3);
    }

    #[test]
    fn draft_rejects_out_of_order_writes() {
        let mut draft = TicketDraft::new(2);
        let err = draft.record_email("early@x.com").unwrap_err();
        assert!(matches!(
            err,
            IntakeError::InvalidStage {
                expected: Stage::AskEmail,
                actual: Stage::AskName
            }
        ));
        assert!(draft.user_email().is_empty());

        let err = draft.record_problem("p", suggestion("s", 1)).unwrap_err();
        assert!(matches!(err, IntakeError::InvalidStage { .. }));
        assert!(draft.close(2).is_err());
    }

    #[test]
    fn reject_keeps_contact_and_resets_priority() {
        let mut draft = TicketDraft::new(3);
        draft.record_name("Bob").unwrap();
        draft.record_email("bob@x.com").unwrap();
        draft.record_problem("VPN down", suggestion("VPN", 1)).unwrap();

        draft.reject_suggestion(3).unwrap();
        assert_eq!(draft.stage(), Stage::AskProblem);
        assert_eq!(draft.user_name(), "Bob");
        assert_eq!(draft.user_email(), "bob@x.com");
        assert!(draft.problem_description().is_empty());
        assert!(draft.subject().is_empty());
        assert_eq!(draft.priority(), 3);
    }

    #[test]
    fn close_clears_fields_and_lands_on_done() {
        let mut draft = TicketDraft::new(2);
        draft.record_name("Bob").unwrap();
        draft.record_email("bob@x.com").unwrap();
        draft.record_problem("VPN down", suggestion("VPN", 1)).unwrap();
        draft.close(2).unwrap();

        assert_eq!(draft.stage(), Stage::Done);
        assert!(draft.user_name().is_empty());
        assert!(draft.subject().is_empty());
        assert_eq!(draft.priority(), 2);
    }

    #[test]
    fn history_transcript_respects_window() {
        let mut log = ChatHistoryLog::new();
        log.push(ChatTurn::bot_only("Hi! What's your name?"));
        log.push(ChatTurn::exchange("Alice", "Thanks Alice. Your email?"));
        log.push(ChatTurn::exchange("alice@x.com", "Describe the problem."));

        assert_eq!(log.len(), 3);
        let full = log.transcript(10);
        assert!(full.starts_with("Assistant: Hi! What's your name?\n"));
        assert!(full.contains("User: Alice\n"));

        let recent = log.transcript(1);
        assert_eq!(recent, "User: alice@x.com\nAssistant: Describe the problem.\n");
    }

    #[test]
    fn submission_result_constructors() {
        let ok = TicketSubmissionResult::success("TCK-1");
        assert!(ok.succeeded);
        assert_eq!(ok.identifier.as_deref(), Some("TCK-1"));
        assert!(ok.error_detail.is_none());

        let failed = TicketSubmissionResult::failure("401 Unauthorized");
        assert!(!failed.succeeded);
        assert!(failed.identifier.is_none());
        assert_eq!(failed.error_detail.as_deref(), Some("401 Unauthorized"));
    }

    #[test]
    fn tracker_error_detail_has_no_prefix() {
        let err = IntakeError::tracker("jira returned 400: project required");
        assert_eq!(err.detail(), "jira returned 400: project required");
        assert_eq!(
            err.to_string(),
            "tracker error: jira returned 400: project required"
        );
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::generate(), SessionId::generate());
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_plugin_adapter<T: PluginAdapter>() {}
        fn _assert_language_model<T: LanguageModelAdapter>() {}
        fn _assert_tracker<T: TrackerAdapter>() {}
        fn _assert_session_store<T: SessionStore>() {}
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn clamp_always_lands_in_range(p in any::<i64>(), five in any::<bool>()) {
                let scale = if five { PriorityScale::FiveTier } else { PriorityScale::ThreeTier };
                prop_assert!(scale.range().contains(&scale.clamp(p)));
            }
        }
    }
}
