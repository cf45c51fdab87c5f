// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! JSON-over-HTTP surface for intake conversations.
//!
//! Every session is driven by the same [`intake_engine::ConversationEngine`]
//! as the interactive shell, so both surfaces share stage handling,
//! suggestions, and ticket submission.

pub mod handlers;
pub mod server;

pub use server::{router, start_server, GatewayState};
