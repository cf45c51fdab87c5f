// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt template and bot reply text.

use intake_core::PriorityScale;

/// Builds the suggestion prompt for `problem`, including recent chat context.
///
/// The template is filled in one pass, so braces typed by the user are never
/// expanded as placeholders.
pub fn build_suggestion_prompt(problem: &str, conversation: &str, scale: PriorityScale) -> String {
    let max = scale.tiers();
    let scale_hint = match scale {
        PriorityScale::ThreeTier => "1 is low, 2 is medium and 3 is high urgency",
        PriorityScale::FiveTier => "1 is the most urgent and 5 the least urgent",
    };
    let conversation = if conversation.trim().is_empty() {
        "(none)\n"
    } else {
        conversation
    };

    format!(
        r#"You are a help-desk assistant turning a user's problem report into a support ticket.

Return a single JSON object with these keys:
- "subject": a short ticket title, at most 60 characters
- "description": one or two sentences restating the problem for a support engineer
- "priority": an integer from 1 to {max}, where {scale_hint}

Recent conversation:
{conversation}
Problem description:
{problem}

Output the JSON object only, no explanation:"#
    )
}

pub fn greeting(agent_name: &str) -> String {
    format!(
        "Hi, I'm {agent_name}. I'll help you open a support ticket. What's your name?"
    )
}

pub fn ask_email(name: &str) -> String {
    format!("Thanks, {name}. What email address should we use to contact you?")
}

pub const ASK_PROBLEM: &str = "Please describe the problem you're running into.";

pub fn confirm_suggestion(subject: &str, priority_label: &str) -> String {
    format!(
        "Here's the ticket I'll file:\n  Subject: {subject}\n  Priority: {priority_label}\nIs this correct? (yes/no)"
    )
}

pub const ASK_REDESCRIBE: &str =
    "No problem. Please describe the problem again, with as much detail as you can.";

pub const ASK_YES_NO: &str = "Please answer yes or no: should I file this ticket?";

pub fn ticket_created(identifier: &str) -> String {
    format!("Your ticket has been created. Reference: {identifier}")
}

pub fn ticket_failed(detail: &str) -> String {
    format!("Sorry, I couldn't create your ticket: {detail}")
}

pub const REQUEST_CLOSED: &str =
    "This request is already closed. Start a new conversation to report another problem.";
