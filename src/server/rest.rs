// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! REST API server implementation using axum.
//!
//! # Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /api/version` - Server version
//! - `POST /api/schrodinger/{spectrum,time-evolution}`
//! - `POST /api/operators/{observable,basis-change}`
//! - `POST /api/dynamics/{schrodinger,heisenberg,ehrenfest}`
//! - `POST /api/spin/{dynamics,coupling,spin-orbit}`
//! - `POST /api/symmetry/{rotation,parity,time-reversal}`
//! - `POST /api/variational/{oscillator,helium}`
//! - `POST /api/wkb/tunneling`

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{HeaderValue, Method, Request},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use uuid::Uuid;

use super::routes;
use super::ServerState;
use crate::config::{CorsConfig, ServerConfig};
use crate::error::{Error, Result};

/// REST server for the playground.
pub struct RestServer {
    state: Arc<ServerState>,
}

impl RestServer {
    /// Create a new REST server.
    pub fn new(state: Arc<ServerState>) -> Self {
        Self { state }
    }

    /// Start the REST server.
    pub async fn serve(self, config: &ServerConfig) -> Result<()> {
        let addr: SocketAddr = format!("{}:{}", config.host, config.port)
            .parse()
            .map_err(|e| Error::Config(format!("Invalid listen address: {}", e)))?;

        info!(address = %addr, "Starting REST server");

        let app = build_router(self.state.clone());
        let mut shutdown_rx = self.state.shutdown_receiver();

        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|e| Error::Server(format!("Failed to bind REST server: {}", e)))?;

        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.changed().await;
                info!("REST server shutting down");
            })
            .await
            .map_err(|e| Error::Server(format!("REST server error: {}", e)))?;

        Ok(())
    }
}

/// Assemble the full application router with its middleware stack.
pub fn build_router(state: Arc<ServerState>) -> Router {
    let cors = cors_layer(&state.config.server.cors);

    Router::new()
        .route("/", get(root))
        .route("/api/version", get(get_version))
        .nest("/api/schrodinger", routes::schrodinger::router())
        .nest("/api/operators", routes::operators::router())
        .nest("/api/dynamics", routes::dynamics::router())
        .nest("/api/spin", routes::spin::router())
        .nest("/api/symmetry", routes::symmetry::router())
        .nest("/api/variational", routes::variational::router())
        .nest("/api/wkb", routes::wkb::router())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(cors)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get("x-request-id")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(SetRequestIdLayer::x_request_id(RequestUuid))
        .with_state(state)
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    if cors.allow_all {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring unparsable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Generates a UUID v4 for requests that arrive without `x-request-id`.
#[derive(Debug, Clone, Copy, Default)]
struct RequestUuid;

impl MakeRequestId for RequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

// =============================================================================
// Request/Response types
// =============================================================================

/// Root banner response.
#[derive(Debug, Serialize)]
struct RootResponse {
    message: &'static str,
}

/// Version response.
#[derive(Debug, Serialize)]
struct VersionResponse {
    name: &'static str,
    version: &'static str,
}

// =============================================================================
// Handlers
// =============================================================================

async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        message: "Quantum Mechanics Playground API",
    })
}

/// Get version endpoint.
async fn get_version() -> Json<VersionResponse> {
    Json(VersionResponse {
        name: env!("CARGO_PKG_NAME"),
        version: crate::VERSION,
    })
}
