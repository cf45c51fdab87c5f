// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait and use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod language_model;
pub mod session_store;
pub mod tracker;

pub use adapter::PluginAdapter;
pub use language_model::LanguageModelAdapter;
pub use session_store::SessionStore;
pub use tracker::TrackerAdapter;
