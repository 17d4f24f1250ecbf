// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Variational energy scan endpoints.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::schrodinger::PotentialParams;
use crate::server::ServerState;
use crate::validation::{validate_array, validate_scalar};
use crate::variational::{helium, oscillator, oscillator_exact_ground, HELIUM_REFERENCE_ENERGY};

const DEFAULT_OMEGA: f64 = 1.0;

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/oscillator", post(scan_oscillator))
        .route("/helium", post(scan_helium))
}

fn default_potential_type() -> String {
    "harmonic".into()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OscillatorRequest {
    pub alpha_array: Vec<f64>,
    /// Accepted for compatibility; only the harmonic well is modelled.
    #[serde(default = "default_potential_type")]
    pub potential_type: String,
    #[serde(default)]
    pub potential_params: PotentialParams,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OscillatorResponse {
    pub alpha_array: Vec<f64>,
    pub energies: Vec<f64>,
    pub min_index: usize,
    pub exact_energy: f64,
}

#[derive(Debug, Deserialize)]
pub struct HeliumRequest {
    #[serde(rename = "ZArray")]
    pub z_array: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct HeliumResponse {
    #[serde(rename = "ZArray")]
    pub z_array: Vec<f64>,
    pub energies: Vec<f64>,
    #[serde(rename = "minIndex")]
    pub min_index: usize,
    #[serde(rename = "refEnergy")]
    pub ref_energy: f64,
}

async fn scan_oscillator(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<OscillatorRequest>,
) -> Result<Json<OscillatorResponse>> {
    validate_array("alphaArray", &req.alpha_array, &state.config.validation)?;
    let omega = req.potential_params.omega.unwrap_or(DEFAULT_OMEGA);
    validate_scalar("potentialParams.omega", omega)?;

    let scan = oscillator(&req.alpha_array, omega)?;
    Ok(Json(OscillatorResponse {
        alpha_array: req.alpha_array,
        energies: scan.energies,
        min_index: scan.min_index,
        exact_energy: oscillator_exact_ground(omega),
    }))
}

async fn scan_helium(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<HeliumRequest>,
) -> Result<Json<HeliumResponse>> {
    validate_array("ZArray", &req.z_array, &state.config.validation)?;

    let scan = helium(&req.z_array)?;
    Ok(Json(HeliumResponse {
        z_array: req.z_array,
        energies: scan.energies,
        min_index: scan.min_index,
        ref_energy: HELIUM_REFERENCE_ENERGY,
    }))
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{floats, post_json, test_router};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_oscillator_endpoint() {
        let body = json!({
            "alphaArray": [0.5, 1.0, 1.5, 2.0],
            "potentialType": "harmonic",
            "potentialParams": {"omega": 1.0}
        });
        let (status, resp) = post_json(test_router(), "/api/variational/oscillator", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["minIndex"], 1);
        assert_eq!(resp["exactEnergy"], 0.5);
        assert_eq!(floats(&resp["alphaArray"]), vec![0.5, 1.0, 1.5, 2.0]);
    }

    #[tokio::test]
    async fn test_oscillator_default_omega() {
        let body = json!({"alphaArray": [1.0, 3.0]});
        let (status, resp) = post_json(test_router(), "/api/variational/oscillator", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(floats(&resp["energies"])[0], 1.0);
    }

    #[tokio::test]
    async fn test_oscillator_rejects_empty_and_nonpositive() {
        let (status, _) = post_json(
            test_router(),
            "/api/variational/oscillator",
            json!({"alphaArray": []}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = post_json(
            test_router(),
            "/api/variational/oscillator",
            json!({"alphaArray": [1.0, -0.5]}),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_helium_endpoint() {
        let body = json!({"ZArray": [1.0, 1.5, 2.0]});
        let (status, resp) = post_json(test_router(), "/api/variational/helium", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(resp["refEnergy"], -2.9037);
        assert_eq!(resp["minIndex"], 2);
        assert_eq!(floats(&resp["energies"])[1], -3.5625);
    }
}
