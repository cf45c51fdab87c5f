// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Intake - a conversational support-ticket intake agent.
//!
//! This is the binary entry point: an interactive shell, an HTTP gateway,
//! and configuration inspection.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

mod serve;
mod shell;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, Subcommand};
use colored::Colorize;
use intake_config::{ConfigError, IntakeConfig};
use intake_core::IntakeError;
use intake_engine::{ConversationEngine, PriorityMapper};
use intake_groq::GroqProvider;

/// Intake - a conversational support-ticket intake agent.
#[derive(Parser, Debug)]
#[command(name = "intake", version, about, long_about = None)]
struct Cli {
    /// Read configuration from this file instead of the XDG hierarchy.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Open a ticket interactively in the terminal (the default).
    Shell,
    /// Serve conversations over the HTTP gateway.
    Serve,
    /// Inspect the effective configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigAction {
    /// Validate the configuration and print the resolved tracker.
    Check,
    /// Print the effective configuration with secrets redacted.
    Show,
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = match load_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(errors) => {
            intake_config::render_errors(&errors);
            std::process::exit(1);
        }
    };

    let result = match cli.command {
        Some(Commands::Shell) | None => shell::run_shell(config).await,
        Some(Commands::Serve) => serve::run_serve(config).await,
        Some(Commands::Config { action }) => run_config(action, &config),
    };

    if let Err(e) = result {
        eprintln!("{}: {e}", "error".red());
        std::process::exit(1);
    }
}

fn load_config(path: Option<&Path>) -> Result<IntakeConfig, Vec<ConfigError>> {
    match path {
        Some(path) => intake_config::load_and_validate_path(path),
        None => intake_config::load_and_validate(),
    }
}

fn run_config(action: ConfigAction, config: &IntakeConfig) -> Result<(), IntakeError> {
    match action {
        ConfigAction::Check => {
            println!("{}", "configuration ok".green());
            println!("{}", describe_config(config));
        }
        ConfigAction::Show => {
            let rendered = toml::to_string_pretty(&config.redacted())
                .map_err(|e| IntakeError::Internal(format!("failed to render config: {e}")))?;
            print!("{rendered}");
        }
    }
    Ok(())
}

/// One line per resolved setting that `config check` reports.
fn describe_config(config: &IntakeConfig) -> String {
    let priorities = PriorityMapper::from_config(config);
    format!(
        "agent:    {}\ntracker:  {}\npriority: {} ({})\nmodel:    {}",
        config.agent.name,
        config.tracker.kind,
        priorities.scale(),
        priorities.labels().join(", "),
        config.groq.model,
    )
}

/// Wires the Groq model, the configured tracker, and the priority mapper
/// into a conversation engine.
pub(crate) fn build_engine(config: &IntakeConfig) -> Result<Arc<ConversationEngine>, IntakeError> {
    let model = Arc::new(GroqProvider::new(&config.groq)?);
    let tracker = intake_tracker::build_tracker(&config.tracker)?;
    let engine = ConversationEngine::new(model, tracker, PriorityMapper::from_config(config))
        .with_agent_name(config.agent.name.clone())
        .with_context_turns(config.groq.context_turns);
    Ok(Arc::new(engine))
}

/// Installs the tracing subscriber. `RUST_LOG` wins over `default_filter`.
pub(crate) fn init_tracing(default_filter: String) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Only jemalloc answers epoch/stats queries.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn cli_parses_subcommands() {
        let cli = Cli::try_parse_from(["intake", "config", "check"]).unwrap();
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Check
            })
        ));

        let cli = Cli::try_parse_from(["intake", "serve", "--config", "/tmp/x.toml"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Serve)));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));

        let cli = Cli::try_parse_from(["intake"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn describe_config_reports_tracker_and_scale() {
        let config = intake_config::load_and_validate_str(
            "[tracker]\nkind = \"jira\"\n",
        )
        .unwrap();
        let text = describe_config(&config);
        assert!(text.contains("tracker:  jira"), "{text}");
        assert!(text.contains("five_tier"), "{text}");
        assert!(text.contains("Highest, High, Medium, Low, Lowest"), "{text}");
    }

    #[test]
    fn build_engine_requires_tracker_settings() {
        let config = intake_config::load_and_validate_str(
            "[groq]\napi_key = \"gsk-test\"\n\n[tracker]\nkind = \"azure_devops\"\n",
        )
        .unwrap();
        let err = build_engine(&config).err().unwrap();
        assert!(matches!(err, IntakeError::Config(_)));
    }

    #[test]
    fn build_engine_applies_agent_name() {
        let config = intake_config::load_and_validate_str(
            "[agent]\nname = \"helpdesk\"\n\n[groq]\napi_key = \"gsk-test\"\n\n\
             [tracker.generic]\nbase_url = \"http://127.0.0.1:9\"\n",
        )
        .unwrap();
        let engine = build_engine(&config).unwrap();
        assert!(engine.greeting().contains("helpdesk"));
    }
}
