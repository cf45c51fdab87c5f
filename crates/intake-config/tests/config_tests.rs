// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the intake configuration system.

use std::io::Write;

use intake_config::diagnostic::ConfigError;
use intake_config::model::{IntakeConfig, REDACTED};
use intake_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_str, TrackerKind,
};
use intake_core::PriorityScale;

/// Valid TOML with every section deserializes successfully.
#[test]
fn full_toml_deserializes() {
    let toml = r#"
[agent]
name = "helpdesk"
max_sessions = 5
log_level = "debug"

[groq]
api_key = "gsk-123"
model = "llama-3.3-70b-versatile"
temperature = 0.2
max_tokens = 256
context_turns = 4

[tracker]
kind = "jira"
timeout_secs = 10

[tracker.jira]
base_url = "https://example.atlassian.net"
project_key = "HELP"
email = "bot@example.com"
api_token = "jira-secret"

[priority]
labels = ["Blocker", "Critical", "Major", "Minor", "Trivial"]

[gateway]
host = "0.0.0.0"
port = 9000
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helpdesk");
    assert_eq!(config.agent.max_sessions, 5);
    assert_eq!(config.groq.api_key.as_deref(), Some("gsk-123"));
    assert_eq!(config.groq.model, "llama-3.3-70b-versatile");
    assert_eq!(config.groq.context_turns, 4);
    assert_eq!(config.tracker.kind, TrackerKind::Jira);
    assert_eq!(config.tracker.timeout_secs, 10);
    assert_eq!(config.tracker.jira.project_key.as_deref(), Some("HELP"));
    assert_eq!(config.tracker.jira.issue_type, "Task");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.priority_scale(), PriorityScale::FiveTier);
}

/// Empty TOML yields compiled defaults.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");
    assert_eq!(config.agent.name, "intake");
    assert_eq!(config.agent.max_sessions, 100);
    assert_eq!(config.groq.model, "llama-3.1-8b-instant");
    assert!((config.groq.temperature - 0.7).abs() < f64::EPSILON);
    assert_eq!(config.groq.base_url, "https://api.groq.com/openai/v1");
    assert_eq!(config.tracker.kind, TrackerKind::Generic);
    assert_eq!(config.tracker.azure_devops.work_item_type, "Issue");
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.priority_scale(), PriorityScale::ThreeTier);
}

/// Explicit `priority.scale` wins over the tracker's default.
#[test]
fn explicit_scale_overrides_tracker_default() {
    let toml = r#"
[tracker]
kind = "azure_devops"

[priority]
scale = "five_tier"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.tracker.kind, TrackerKind::AzureDevops);
    assert_eq!(config.priority_scale(), PriorityScale::FiveTier);
}

/// A typo in a nested tracker section is reported with a suggestion and a span.
#[test]
fn typo_in_nested_section_gets_suggestion() {
    let toml = r#"
[tracker]
kind = "jira"

[tracker.jira]
projct_key = "HELP"
"#;

    let errors = load_and_validate_str(toml).expect_err("typo should fail");
    assert_eq!(errors.len(), 1);
    match &errors[0] {
        ConfigError::UnknownKey {
            key,
            suggestion,
            span,
            ..
        } => {
            assert_eq!(key, "projct_key");
            assert_eq!(suggestion.as_deref(), Some("project_key"));
            assert!(span.is_some(), "inline source should be located");
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Unknown tracker kinds are rejected at deserialization.
#[test]
fn unknown_tracker_kind_rejected() {
    let toml = r#"
[tracker]
kind = "bugzilla"
"#;
    assert!(load_config_from_str(toml).is_err());
}

/// A wrong value type produces an InvalidType diagnostic.
#[test]
fn wrong_type_is_reported() {
    let toml = r#"
[gateway]
port = "eighty"
"#;
    let errors = load_and_validate_str(toml).expect_err("bad type should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_errors_surface_from_str() {
    let toml = r#"
[groq]
temperature = 4.0
"#;
    let errors = load_and_validate_str(toml).expect_err("temperature out of range");
    assert_eq!(errors.len(), 1);
    assert!(matches!(errors[0], ConfigError::Validation { .. }));
}

/// Config files on disk are loaded and validated.
#[test]
fn loads_config_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "[tracker]\nkind = \"generic\"\n\n[tracker.generic]\nbase_url = \"http://tickets.local\""
    )
    .unwrap();

    let config = load_and_validate_path(file.path()).expect("file config should load");
    assert_eq!(
        config.tracker.generic.base_url.as_deref(),
        Some("http://tickets.local")
    );
}

/// Typos in a file are located against that file's contents.
#[test]
fn file_typo_points_into_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[agent]\nmax_sesions = 3").unwrap();

    let errors = load_and_validate_path(file.path()).expect_err("typo should fail");
    match &errors[0] {
        ConfigError::UnknownKey {
            suggestion, span, ..
        } => {
            assert_eq!(suggestion.as_deref(), Some("max_sessions"));
            assert!(span.is_some());
        }
        other => panic!("expected UnknownKey, got {other:?}"),
    }
}

/// Redaction hides every secret but leaves other fields intact.
#[test]
fn redacted_hides_secrets() {
    let mut config = IntakeConfig::default();
    config.groq.api_key = Some("gsk-live".into());
    config.tracker.jira.api_token = Some("jira-live".into());
    config.tracker.jira.email = Some("bot@example.com".into());

    let shown = config.redacted();
    assert_eq!(shown.groq.api_key.as_deref(), Some(REDACTED));
    assert_eq!(shown.tracker.jira.api_token.as_deref(), Some(REDACTED));
    assert_eq!(shown.tracker.jira.email.as_deref(), Some("bot@example.com"));
    assert!(shown.tracker.generic.api_token.is_none());

    let rendered = toml::to_string(&shown).expect("redacted config serializes");
    assert!(!rendered.contains("gsk-live"));
    assert!(!rendered.contains("jira-live"));
}

/// Diagnostics carry stable miette codes.
#[test]
fn diagnostics_have_codes() {
    use miette::Diagnostic;

    let err = ConfigError::Validation {
        message: "x".into(),
    };
    let code = err.code().map(|c| c.to_string());
    assert_eq!(code.as_deref(), Some("intake::config::validation"));
}
