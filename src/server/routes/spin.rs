// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spin precession and angular-momentum coupling endpoints.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::numerics::linspace;
use crate::operators::rng_from_seed;
use crate::server::wire::run_blocking;
use crate::server::ServerState;
use crate::spin::{spin_dynamics, spin_orbit_spectrum, two_spin_coupling};
use crate::validation::{validate_array, validate_len, validate_scalar, validate_time_samples};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/dynamics", post(dynamics))
        .route("/coupling", post(coupling))
        .route("/spin-orbit", post(spin_orbit))
}

#[derive(Debug, Deserialize)]
pub struct SpinDynamicsRequest {
    #[serde(rename = "Bx")]
    pub bx: f64,
    #[serde(rename = "By")]
    pub by: f64,
    #[serde(rename = "Bz")]
    pub bz: f64,
    pub theta0: f64,
    pub phi0: f64,
    #[serde(rename = "tMax")]
    pub t_max: f64,
    #[serde(rename = "nSteps")]
    pub n_steps: usize,
}

#[derive(Debug, Serialize)]
pub struct SpinDynamicsResponse {
    pub t: Vec<f64>,
    pub sx: Vec<f64>,
    pub sy: Vec<f64>,
    pub sz: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct CouplingRequest {
    pub j1: f64,
    pub j2: f64,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CouplingResponse {
    pub product_basis: Vec<[f64; 2]>,
    pub cg_coeffs: Vec<f64>,
    #[serde(rename = "totalJ")]
    pub total_j: Vec<f64>,
    pub eigenvalues: Vec<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOrbitRequest {
    pub l: f64,
    pub s: f64,
    pub lambda_array: Vec<f64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpinOrbitResponse {
    pub lambda_array: Vec<f64>,
    pub energies_per_level: Vec<[f64; 2]>,
}

async fn dynamics(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SpinDynamicsRequest>,
) -> Result<Json<SpinDynamicsResponse>> {
    validate_time_samples("nSteps", req.n_steps, &state.config.validation)?;
    for (field, value) in [
        ("Bx", req.bx),
        ("By", req.by),
        ("Bz", req.bz),
        ("theta0", req.theta0),
        ("phi0", req.phi0),
        ("tMax", req.t_max),
    ] {
        validate_scalar(field, value)?;
    }
    debug!(b = ?[req.bx, req.by, req.bz], n_steps = req.n_steps, "Spin dynamics request");

    run_blocking(move || -> Result<SpinDynamicsResponse> {
        let t = linspace(0.0, req.t_max, req.n_steps);
        let traj = spin_dynamics([req.bx, req.by, req.bz], req.theta0, req.phi0, &t)?;
        Ok(SpinDynamicsResponse {
            t: t.to_vec(),
            sx: traj.sx,
            sy: traj.sy,
            sz: traj.sz,
        })
    })
    .await
    .map(Json)
}

async fn coupling(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<CouplingRequest>,
) -> Result<Json<CouplingResponse>> {
    validate_scalar("j1", req.j1)?;
    validate_scalar("j2", req.j2)?;
    // saturating casts: negative j is rejected by the coupling itself
    let product_dim = ((2.0 * req.j1 + 1.0) * (2.0 * req.j2 + 1.0)).max(0.0) as usize;
    validate_len("productBasis", product_dim, &state.config.validation)?;

    let mut rng = rng_from_seed(req.seed);
    let c = two_spin_coupling(req.j1, req.j2, &mut rng)?;
    Ok(Json(CouplingResponse {
        product_basis: c.product_basis,
        cg_coeffs: c.cg_coeffs,
        total_j: c.total_j,
        eigenvalues: c.eigenvalues,
    }))
}

async fn spin_orbit(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SpinOrbitRequest>,
) -> Result<Json<SpinOrbitResponse>> {
    validate_scalar("l", req.l)?;
    validate_scalar("s", req.s)?;
    validate_array("lambdaArray", &req.lambda_array, &state.config.validation)?;

    let energies_per_level = spin_orbit_spectrum(req.l, req.s, &req.lambda_array);
    Ok(Json(SpinOrbitResponse {
        lambda_array: req.lambda_array,
        energies_per_level,
    }))
}
