// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the intake agent.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use intake_core::PriorityScale;
use serde::{Deserialize, Serialize};

/// Placeholder written over secrets by [`IntakeConfig::redacted`].
pub const REDACTED: &str = "[redacted]";

/// Top-level intake configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct IntakeConfig {
    /// Agent identity and session limits.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Groq language-model settings.
    #[serde(default)]
    pub groq: GroqConfig,

    /// Ticket tracker selection and credentials.
    #[serde(default)]
    pub tracker: TrackerConfig,

    /// Priority scale and labels.
    #[serde(default)]
    pub priority: PriorityConfig,

    /// HTTP gateway settings for `intake serve`.
    #[serde(default)]
    pub gateway: GatewayConfig,
}

impl IntakeConfig {
    /// The priority scale in effect: explicit `priority.scale`, else the tracker's default.
    pub fn priority_scale(&self) -> PriorityScale {
        self.priority
            .scale
            .unwrap_or_else(|| self.tracker.kind.default_scale())
    }

    /// Returns a copy with every secret replaced by [`REDACTED`].
    pub fn redacted(&self) -> Self {
        fn hide(secret: &mut Option<String>) {
            if secret.is_some() {
                *secret = Some(REDACTED.to_string());
            }
        }

        let mut copy = self.clone();
        hide(&mut copy.groq.api_key);
        hide(&mut copy.tracker.generic.api_token);
        hide(&mut copy.tracker.azure_devops.personal_access_token);
        hide(&mut copy.tracker.jira.api_token);
        copy
    }
}

/// Agent identity configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name used in greetings.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Maximum number of live sessions held by the session store.
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            max_sessions: default_max_sessions(),
            log_level: default_log_level(),
        }
    }
}

fn default_agent_name() -> String {
    "intake".to_string()
}

fn default_max_sessions() -> usize {
    100
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Groq chat-completion configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GroqConfig {
    /// Groq API key. `None` falls back to the `GROQ_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used to derive ticket suggestions.
    #[serde(default = "default_groq_model")]
    pub model: String,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Maximum tokens to generate per suggestion.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// OpenAI-compatible API base URL.
    #[serde(default = "default_groq_base_url")]
    pub base_url: String,

    /// HTTP timeout for a single completion call.
    #[serde(default = "default_groq_timeout_secs")]
    pub timeout_secs: u64,

    /// Retries on transient HTTP status codes (429, 500, 503).
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Number of recent chat turns included in the suggestion prompt.
    #[serde(default = "default_context_turns")]
    pub context_turns: usize,
}

impl Default for GroqConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_groq_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            base_url: default_groq_base_url(),
            timeout_secs: default_groq_timeout_secs(),
            max_retries: default_max_retries(),
            context_turns: default_context_turns(),
        }
    }
}

fn default_groq_model() -> String {
    "llama-3.1-8b-instant".to_string()
}

fn default_temperature() -> f64 {
    0.7
}

fn default_max_tokens() -> u32 {
    512
}

fn default_groq_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_groq_timeout_secs() -> u64 {
    60
}

fn default_max_retries() -> u32 {
    1
}

fn default_context_turns() -> usize {
    6
}

/// Which issue tracker receives tickets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerKind {
    /// A generic REST ticketing endpoint.
    #[default]
    Generic,
    /// Azure DevOps work items.
    AzureDevops,
    /// Jira issues.
    Jira,
}

impl TrackerKind {
    /// The priority scale each tracker uses unless overridden.
    pub fn default_scale(self) -> PriorityScale {
        match self {
            TrackerKind::Generic | TrackerKind::AzureDevops => PriorityScale::ThreeTier,
            TrackerKind::Jira => PriorityScale::FiveTier,
        }
    }
}

impl std::fmt::Display for TrackerKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TrackerKind::Generic => write!(f, "generic"),
            TrackerKind::AzureDevops => write!(f, "azure_devops"),
            TrackerKind::Jira => write!(f, "jira"),
        }
    }
}

/// Tracker selection plus per-tracker settings.
///
/// Only the section matching `kind` is read; the others may stay empty.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct TrackerConfig {
    /// Tracker that receives tickets.
    #[serde(default)]
    pub kind: TrackerKind,

    /// HTTP timeout for ticket creation.
    #[serde(default = "default_tracker_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub generic: GenericTrackerConfig,

    #[serde(default)]
    pub azure_devops: AzureDevopsConfig,

    #[serde(default)]
    pub jira: JiraConfig,
}

fn default_tracker_timeout_secs() -> u64 {
    30
}

/// Generic REST ticketing endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenericTrackerConfig {
    /// Base URL; tickets are POSTed to `{base_url}/tickets`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Optional bearer token. Falls back to `TRACKER_API_TOKEN`.
    #[serde(default)]
    pub api_token: Option<String>,
}

/// Azure DevOps work-item settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AzureDevopsConfig {
    /// Organization name (`dev.azure.com/{organization}`).
    #[serde(default)]
    pub organization: Option<String>,

    /// Project name.
    #[serde(default)]
    pub project: Option<String>,

    /// Work item type to create.
    #[serde(default = "default_work_item_type")]
    pub work_item_type: String,

    /// Personal access token. Falls back to `AZURE_DEVOPS_PAT`.
    #[serde(default)]
    pub personal_access_token: Option<String>,

    /// Service root, overridable for on-prem servers.
    #[serde(default = "default_azure_devops_base_url")]
    pub base_url: String,
}

impl Default for AzureDevopsConfig {
    fn default() -> Self {
        Self {
            organization: None,
            project: None,
            work_item_type: default_work_item_type(),
            personal_access_token: None,
            base_url: default_azure_devops_base_url(),
        }
    }
}

fn default_work_item_type() -> String {
    "Issue".to_string()
}

fn default_azure_devops_base_url() -> String {
    "https://dev.azure.com".to_string()
}

/// Jira issue settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct JiraConfig {
    /// Site URL, e.g. `https://example.atlassian.net`.
    #[serde(default)]
    pub base_url: Option<String>,

    /// Project key, e.g. `HELP`.
    #[serde(default)]
    pub project_key: Option<String>,

    /// Issue type name.
    #[serde(default = "default_issue_type")]
    pub issue_type: String,

    /// Account email used for basic auth.
    #[serde(default)]
    pub email: Option<String>,

    /// API token. Falls back to `JIRA_API_TOKEN`.
    #[serde(default)]
    pub api_token: Option<String>,
}

impl Default for JiraConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            project_key: None,
            issue_type: default_issue_type(),
            email: None,
            api_token: None,
        }
    }
}

fn default_issue_type() -> String {
    "Task".to_string()
}

/// Priority scale and optional label overrides.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PriorityConfig {
    /// `three_tier` or `five_tier`. `None` follows the tracker kind.
    #[serde(default)]
    pub scale: Option<PriorityScale>,

    /// Labels for tiers `1..=N`, replacing the preset labels.
    #[serde(default)]
    pub labels: Option<Vec<String>>,
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}
