// SPDX-FileCopyrightText: 2026 Intake Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `intake serve` command implementation.
//!
//! Builds the conversation engine and an in-memory session store, then
//! serves the HTTP gateway until SIGINT or SIGTERM.

use std::sync::Arc;

use intake_config::IntakeConfig;
use intake_core::{IntakeError, PluginAdapter};
use intake_engine::InMemorySessionStore;
use intake_gateway::GatewayState;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Runs the `intake serve` command.
pub async fn run_serve(config: IntakeConfig) -> Result<(), IntakeError> {
    crate::init_tracing(format!("intake={},warn", config.agent.log_level));

    info!(
        tracker = %config.tracker.kind,
        scale = %config.priority_scale(),
        "starting intake serve"
    );

    let engine = crate::build_engine(&config)?;
    let store = Arc::new(InMemorySessionStore::new(config.agent.max_sessions));
    let state = GatewayState::new(engine.clone(), store.clone());

    log_memory_baseline();

    let shutdown = install_signal_handler();
    let result = intake_gateway::start_server(&config.gateway, state, shutdown).await;

    report_shutdown(engine.model().name(), engine.model().shutdown().await);
    report_shutdown(engine.tracker().name(), engine.tracker().shutdown().await);
    report_shutdown(store.name(), store.shutdown().await);

    info!("intake stopped");
    result
}

fn report_shutdown(adapter: &str, result: Result<(), IntakeError>) {
    if let Err(e) = result {
        warn!(adapter, error = %e, "adapter shutdown failed");
    }
}

/// Returns a token cancelled on Ctrl+C or SIGTERM.
fn install_signal_handler() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();

    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};
            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = tokio::signal::ctrl_c() => {
                            info!("received SIGINT (Ctrl+C), initiating shutdown");
                        }
                        _ = sigterm.recv() => {
                            info!("received SIGTERM, initiating shutdown");
                        }
                    }
                }
                Err(e) => {
                    warn!(error = %e, "SIGTERM handler unavailable, waiting for Ctrl+C only");
                    if tokio::signal::ctrl_c().await.is_err() {
                        return;
                    }
                    info!("received SIGINT (Ctrl+C), initiating shutdown");
                }
            }
        }

        #[cfg(not(unix))]
        {
            if tokio::signal::ctrl_c().await.is_err() {
                return;
            }
            info!("received Ctrl+C, initiating shutdown");
        }

        trigger.cancel();
    });

    token
}

#[cfg(not(target_env = "msvc"))]
fn log_memory_baseline() {
    let _ = tikv_jemalloc_ctl::epoch::advance();
    let allocated = tikv_jemalloc_ctl::stats::allocated::read().unwrap_or(0);
    let resident = tikv_jemalloc_ctl::stats::resident::read().unwrap_or(0);
    debug!(
        allocated_mb = allocated / (1024 * 1024),
        resident_mb = resident / (1024 * 1024),
        "memory baseline"
    );
}

#[cfg(target_env = "msvc")]
fn log_memory_baseline() {}
