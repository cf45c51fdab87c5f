// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Checks semantic constraints serde attributes cannot express: ranges,
//! non-empty strings, and priority label overrides matching the scale.

use std::collections::HashSet;

use crate::diagnostic::ConfigError;
use crate::model::IntakeConfig;

/// Upper bound on `groq.context_turns`.
pub const MAX_CONTEXT_TURNS: usize = 50;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns every violation found rather than stopping at the first.
pub fn validate_config(config: &IntakeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if config.agent.name.trim().is_empty() {
        fail("agent.name must not be empty".to_string());
    }

    if config.agent.max_sessions == 0 {
        fail("agent.max_sessions must be at least 1".to_string());
    }

    let temperature = config.groq.temperature;
    if !(0.0..=2.0).contains(&temperature) {
        fail(format!(
            "groq.temperature must be between 0.0 and 2.0, got {temperature}"
        ));
    }

    if config.groq.max_tokens == 0 {
        fail("groq.max_tokens must be at least 1".to_string());
    }

    if config.groq.context_turns > MAX_CONTEXT_TURNS {
        fail(format!(
            "groq.context_turns must be at most {MAX_CONTEXT_TURNS}, got {}",
            config.groq.context_turns
        ));
    }

    if config.gateway.host.trim().is_empty() {
        fail("gateway.host must not be empty".to_string());
    }

    if let Some(labels) = &config.priority.labels {
        let scale = config.priority_scale();
        let tiers = scale.tiers() as usize;
        if labels.len() != tiers {
            fail(format!(
                "priority.labels has {} entries but the {scale} scale needs {tiers}",
                labels.len()
            ));
        }

        if labels.iter().any(|l| l.trim().is_empty()) {
            fail("priority.labels must not contain empty labels".to_string());
        }

        let mut seen = HashSet::new();
        for label in labels {
            if !seen.insert(label.to_lowercase()) {
                fail(format!("priority.labels contains duplicate label `{label}`"));
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(config: &IntakeConfig) -> Vec<String> {
        validate_config(config)
            .unwrap_err()
            .iter()
            .map(|e| e.to_string())
            .collect()
    }

    #[test]
    fn defaults_are_valid() {
        assert!(validate_config(&IntakeConfig::default()).is_ok());
    }

    #[test]
    fn collects_every_violation() {
        let mut config = IntakeConfig::default();
        config.agent.name = "  ".to_string();
        config.agent.max_sessions = 0;
        config.groq.temperature = 3.5;
        config.groq.max_tokens = 0;
        config.groq.context_turns = 51;
        config.gateway.host = String::new();

        let errors = messages(&config);
        assert_eq!(errors.len(), 6, "got: {errors:?}");
        assert!(errors.iter().any(|e| e.contains("groq.temperature")));
    }

    #[test]
    fn label_override_must_match_tier_count() {
        let mut config = IntakeConfig::default();
        config.priority.labels = Some(vec!["P3".into(), "P2".into()]);

        let errors = messages(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("needs 3"));
    }

    #[test]
    fn label_override_follows_tracker_scale() {
        let mut config = IntakeConfig::default();
        config.tracker.kind = crate::model::TrackerKind::Jira;
        config.priority.labels = Some(
            ["P1", "P2", "P3", "P4", "P5"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        );
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn duplicate_and_empty_labels_rejected() {
        let mut config = IntakeConfig::default();
        config.priority.labels = Some(vec!["Low".into(), "low".into(), " ".into()]);

        let errors = messages(&config);
        assert!(errors.iter().any(|e| e.contains("duplicate label `low`")));
        assert!(errors.iter().any(|e| e.contains("empty labels")));
    }
}
