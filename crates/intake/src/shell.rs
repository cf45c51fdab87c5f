// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `intake shell` command implementation.
//!
//! Runs a single conversation in the terminal with readline history.
//! The session lives in memory for the lifetime of the process.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use intake_config::IntakeConfig;
use intake_core::{ConversationSession, IntakeError, SessionId, Stage};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use tracing::debug;

/// Runs the `intake shell` interactive REPL.
pub async fn run_shell(config: IntakeConfig) -> Result<(), IntakeError> {
    crate::init_tracing("warn".to_string());

    let engine = crate::build_engine(&config)?;
    let mut session = engine.start_session(SessionId::generate());
    debug!(session_id = %session.id, "shell session started");

    let mut rl = DefaultEditor::new().map_err(|e| IntakeError::Channel {
        message: format!("failed to initialize readline: {e}"),
        source: Some(Box::new(e)),
    })?;

    let bot = config.agent.name.as_str();
    println!("{}", format!("{bot} shell").bold().green());
    println!(
        "Type {} to exit, {} to start over, {} to review the conversation.\n",
        "/quit".yellow(),
        "/restart".yellow(),
        "/history".yellow()
    );
    print_reply(bot, &engine.greeting());

    let prompt = format!("{}> ", "you".green());
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                match line.trim() {
                    "/quit" | "/exit" => break,
                    "/restart" => {
                        let reply = engine.restart(&mut session);
                        print_reply(bot, &reply.reply);
                        continue;
                    }
                    "/history" => {
                        print_history(bot, &session);
                        continue;
                    }
                    "" => continue,
                    _ => {}
                }

                let _ = rl.add_history_entry(&line);

                let spinner = spinner_for(session.draft.stage());
                let result = engine.handle_input(&mut session, &line).await;
                if let Some(spinner) = spinner {
                    spinner.finish_and_clear();
                }

                match result {
                    Ok(reply) => {
                        print_reply(bot, &reply.reply);
                        if reply.stage == Stage::Done && reply.submission.is_some() {
                            println!(
                                "{}",
                                "Type /restart to open another ticket.".dimmed()
                            );
                        }
                    }
                    Err(e) => eprintln!("{}: {e}", "error".red()),
                }
            }
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("{}: {e}", "error".red());
                break;
            }
        }
    }

    Ok(())
}

/// A spinner for the stages that wait on the network.
fn spinner_for(stage: Stage) -> Option<ProgressBar> {
    let message = match stage {
        Stage::AskProblem => "drafting ticket...",
        Stage::Confirm => "working...",
        _ => return None,
    };
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message(message);
    spinner.enable_steady_tick(Duration::from_millis(100));
    Some(spinner)
}

fn print_reply(bot: &str, text: &str) {
    println!("{} {text}\n", format!("{bot}>").cyan().bold());
}

fn print_history(bot: &str, session: &ConversationSession) {
    if session.history.is_empty() {
        println!("{}", "(no messages yet)".dimmed());
        return;
    }
    for turn in session.history.turns() {
        if let Some(user) = &turn.user_text {
            println!("{} {user}", "you>".green());
        }
        if let Some(reply) = &turn.bot_text {
            println!("{} {reply}", format!("{bot}>").cyan());
        }
    }
    println!();
}
