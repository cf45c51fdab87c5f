// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation engine for the intake agent.
//!
//! Owns the per-session ticket-draft state machine, translating user
//! messages into draft transitions, model calls and tracker submissions.
//! Chat surfaces hand it a [`SessionStore`](intake_core::SessionStore) and
//! a session id per message; the engine holds no session state itself.

pub mod engine;
pub mod parser;
pub mod priority;
pub mod prompts;
pub mod store;

pub use engine::{ConversationEngine, TurnReply, CONFIRM_NO, CONFIRM_YES};
pub use parser::{default_suggestion, parse_suggestion};
pub use priority::PriorityMapper;
pub use store::InMemorySessionStore;
