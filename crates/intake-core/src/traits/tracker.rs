// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tracker adapter trait for issue-tracking services (generic REST, Azure DevOps, Jira).

use async_trait::async_trait;

use crate::error::IntakeError;
use crate::traits::adapter::PluginAdapter;
use crate::types::TicketRequest;

/// Adapter that files tickets against an external issue tracker.
#[async_trait]
pub trait TrackerAdapter: PluginAdapter {
    /// Creates a ticket and returns its tracker identifier.
    ///
    /// Failures are reported as [`IntakeError::Tracker`] whose message is the
    /// detail to show to the user. Callers never retry.
    async fn create_ticket(&self, ticket: &TicketRequest) -> Result<String, IntakeError>;
}
