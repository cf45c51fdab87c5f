// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./intake.toml` > `~/.config/intake/intake.toml` > `/etc/intake/intake.toml`
//! with environment variable overrides via `INTAKE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::IntakeConfig;

/// System-wide config file.
pub const SYSTEM_CONFIG_PATH: &str = "/etc/intake/intake.toml";

/// Local config file, relative to the working directory.
pub const LOCAL_CONFIG_FILE: &str = "intake.toml";

/// Env var suffix prefixes and the config section each maps to.
///
/// Longer prefixes come first so `tracker_jira_*` wins over `tracker_*`.
const ENV_SECTIONS: &[(&str, &str)] = &[
    ("tracker_azure_devops_", "tracker.azure_devops."),
    ("tracker_generic_", "tracker.generic."),
    ("tracker_jira_", "tracker.jira."),
    ("tracker_", "tracker."),
    ("agent_", "agent."),
    ("groq_", "groq."),
    ("priority_", "priority."),
    ("gateway_", "gateway."),
];

/// Path of the per-user config file, if a config directory exists.
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("intake").join(LOCAL_CONFIG_FILE))
}

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/intake/intake.toml` (system-wide)
/// 3. `~/.config/intake/intake.toml` (user XDG config)
/// 4. `./intake.toml` (local directory)
/// 5. `INTAKE_*` environment variables
pub fn load_config() -> Result<IntakeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<IntakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IntakeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<IntakeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(IntakeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(IntakeConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG_PATH))
        .merge(Toml::file(user_config_path().unwrap_or_default()))
        .merge(Toml::file(LOCAL_CONFIG_FILE))
        .merge(env_provider())
}

/// Maps a lowercased, prefix-stripped env var name onto its dotted config key.
///
/// `tracker_jira_api_token` becomes `tracker.jira.api_token`; names outside a
/// known section pass through unchanged so figment reports them as unknown keys.
pub fn map_env_key(key: &str) -> String {
    for (prefix, section) in ENV_SECTIONS {
        if let Some(rest) = key.strip_prefix(prefix) {
            return format!("{section}{rest}");
        }
    }
    key.to_string()
}

/// Create the environment variable provider with explicit section mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")`: `INTAKE_GROQ_API_KEY` must map to
/// `groq.api_key`, not `groq.api.key`.
fn env_provider() -> Env {
    Env::prefixed("INTAKE_").map(|key| map_env_key(key.as_str()).into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_map_to_sections() {
        assert_eq!(map_env_key("groq_api_key"), "groq.api_key");
        assert_eq!(map_env_key("agent_max_sessions"), "agent.max_sessions");
        assert_eq!(map_env_key("tracker_kind"), "tracker.kind");
        assert_eq!(map_env_key("tracker_jira_api_token"), "tracker.jira.api_token");
        assert_eq!(
            map_env_key("tracker_azure_devops_personal_access_token"),
            "tracker.azure_devops.personal_access_token"
        );
        assert_eq!(map_env_key("gateway_port"), "gateway.port");
    }

    #[test]
    fn unknown_env_sections_pass_through() {
        assert_eq!(map_env_key("mystery_value"), "mystery_value");
    }

    #[test]
    fn user_config_path_ends_with_intake_toml() {
        if let Some(path) = user_config_path() {
            assert!(path.ends_with("intake/intake.toml"));
        }
    }
}
