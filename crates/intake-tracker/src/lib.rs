// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ticket tracker adapters for the intake agent.
//!
//! Each adapter implements [`TrackerAdapter`] for one service. Failed calls
//! become [`IntakeError::Tracker`] with the message
//! `"{tracker} returned {status}: {detail}"`; nothing is retried.

pub mod azure_devops;
pub mod generic;
mod http;
pub mod jira;

use std::sync::Arc;
use std::time::Duration;

use intake_config::model::{TrackerConfig, TrackerKind};
use intake_core::{IntakeError, TrackerAdapter};
use tracing::info;

pub use azure_devops::AzureDevopsTracker;
pub use generic::GenericTracker;
pub use jira::JiraTracker;

/// Builds the tracker adapter selected by `config.kind`.
///
/// Fails with [`IntakeError::Config`] when the selected tracker's settings
/// or credentials are missing.
pub fn build_tracker(config: &TrackerConfig) -> Result<Arc<dyn TrackerAdapter>, IntakeError> {
    let timeout = Duration::from_secs(config.timeout_secs);
    let tracker: Arc<dyn TrackerAdapter> = match config.kind {
        TrackerKind::Generic => Arc::new(GenericTracker::new(&config.generic, timeout)?),
        TrackerKind::AzureDevops => {
            Arc::new(AzureDevopsTracker::new(&config.azure_devops, timeout)?)
        }
        TrackerKind::Jira => Arc::new(JiraTracker::new(&config.jira, timeout)?),
    };
    info!(tracker = %config.kind, "ticket tracker initialized");
    Ok(tracker)
}
