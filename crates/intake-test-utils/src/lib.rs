// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for intake integration tests.
//!
//! Provides mock adapters and a harness for fast, deterministic tests
//! without network access.
//!
//! # Components
//!
//! - [`MockLanguageModel`] - scripted model responses, optional failure
//! - [`MockTracker`] - records ticket requests, succeeds or fails on demand
//! - [`TestHarness`] - engine plus in-memory store wired to both mocks

pub mod harness;
pub mod mock_model;
pub mod mock_tracker;

pub use harness::TestHarness;
pub use mock_model::MockLanguageModel;
pub use mock_tracker::MockTracker;
