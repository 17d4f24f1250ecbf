// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! HTTP server for the playground.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────┐
//! │            RestServer (axum)             │
//! │  SetRequestId → Trace → Cors → routes    │
//! ├──────────┬──────────┬──────────┬─────────┤
//! │schrodinger│ dynamics │operators │ spin …  │
//! └──────────┴──────────┴──────────┴─────────┘
//!          every handler: validate → spawn_blocking(kernel) → JSON
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use qm_playground::config::Config;
//! use qm_playground::server::run_server;
//!
//! let config = Config::load(None)?;
//! run_server(config).await?;
//! ```

pub mod rest;
pub mod routes;
pub mod wire;

pub use rest::{build_router, RestServer};

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::Result;

/// Shared state for request handlers.
pub struct ServerState {
    /// Effective configuration, fixed for the lifetime of the server
    pub config: Config,

    /// Shutdown signal sender
    shutdown_tx: watch::Sender<bool>,

    /// Shutdown signal receiver
    shutdown_rx: watch::Receiver<bool>,
}

impl ServerState {
    /// Create new server state.
    pub fn new(config: Config) -> Self {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        Self {
            config,
            shutdown_tx,
            shutdown_rx,
        }
    }

    /// Get a shutdown receiver.
    pub fn shutdown_receiver(&self) -> watch::Receiver<bool> {
        self.shutdown_rx.clone()
    }

    /// Signal shutdown.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

/// Run the REST server until Ctrl-C.
pub async fn run_server(config: Config) -> Result<()> {
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_sec);
    let server_config = config.server.clone();
    let state = Arc::new(ServerState::new(config));

    info!(
        host = %server_config.host,
        port = server_config.port,
        strict_validation = state.config.validation.strict,
        "Starting playground server"
    );

    let state_for_signal = state.clone();
    tokio::spawn(async move {
        if let Ok(()) = tokio::signal::ctrl_c().await {
            info!("Received shutdown signal, initiating graceful shutdown");
            state_for_signal.shutdown();
        }
    });

    let server = RestServer::new(state.clone());
    let mut shutdown_rx = state.shutdown_receiver();
    let serving = server.serve(&server_config);
    tokio::pin!(serving);

    tokio::select! {
        result = &mut serving => result,
        _ = async {
            let _ = shutdown_rx.changed().await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            warn!(
                timeout_secs = server_config.shutdown_timeout_sec,
                "In-flight requests did not finish before the shutdown timeout"
            );
            Ok(())
        }
    }
}
