// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Grid spectrum and stationary-state evolution endpoints.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::numerics::linspace;
use crate::schrodinger::{
    density_frames, solve_spectrum, Grid, InitialState, Potential, PotentialParams,
    EVOLUTION_BASIS_SIZE,
};
use crate::server::wire::{rows, run_blocking};
use crate::server::ServerState;
use crate::validation::{validate_grid_request, validate_scalar, validate_time_samples};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/spectrum", post(spectrum))
        .route("/time-evolution", post(time_evolution))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpectrumRequest {
    pub potential_type: String,
    #[serde(default)]
    pub params: PotentialParams,
    pub x_min: f64,
    pub x_max: f64,
    pub n_points: usize,
    pub n_levels: usize,
}

#[derive(Debug, Serialize)]
pub struct SpectrumResponse {
    pub x: Vec<f64>,
    #[serde(rename = "V")]
    pub v: Vec<f64>,
    pub energies: Vec<f64>,
    pub eigenfuncs: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEvolutionRequest {
    pub potential_type: String,
    #[serde(default)]
    pub params: PotentialParams,
    pub x_min: f64,
    pub x_max: f64,
    pub n_points: usize,
    #[serde(default)]
    pub psi0: InitialState,
    pub t_max: f64,
    pub n_frames: usize,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEvolutionResponse {
    pub x: Vec<f64>,
    pub t: Vec<f64>,
    pub density_frames: Vec<Vec<f64>>,
}

async fn spectrum(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SpectrumRequest>,
) -> Result<Json<SpectrumResponse>> {
    validate_grid_request(req.n_points, Some(req.n_levels), &state.config.validation)?;
    debug!(
        potential = %req.potential_type,
        n_points = req.n_points,
        n_levels = req.n_levels,
        "Spectrum request"
    );

    run_blocking(move || -> Result<SpectrumResponse> {
        let grid = Grid::new(req.x_min, req.x_max, req.n_points)?;
        let v = Potential::from_request(&req.potential_type, &req.params).sample(grid.points());
        let spectrum = solve_spectrum(&grid, &v, req.n_levels)?;
        Ok(SpectrumResponse {
            x: grid.points().to_vec(),
            v: v.to_vec(),
            energies: spectrum.energies.to_vec(),
            eigenfuncs: rows(&spectrum.eigenfuncs),
        })
    })
    .await
    .map(Json)
}

async fn time_evolution(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<TimeEvolutionRequest>,
) -> Result<Json<TimeEvolutionResponse>> {
    let config = &state.config.validation;
    validate_grid_request(req.n_points, None, config)?;
    validate_time_samples("nFrames", req.n_frames, config)?;
    validate_scalar("tMax", req.t_max)?;
    debug!(
        potential = %req.potential_type,
        n_points = req.n_points,
        n_frames = req.n_frames,
        "Time-evolution request"
    );

    run_blocking(move || -> Result<TimeEvolutionResponse> {
        let grid = Grid::new(req.x_min, req.x_max, req.n_points)?;
        let v = Potential::from_request(&req.potential_type, &req.params).sample(grid.points());
        let basis = EVOLUTION_BASIS_SIZE.min(grid.len());
        let spectrum = solve_spectrum(&grid, &v, basis)?;
        let t = linspace(0.0, req.t_max, req.n_frames);
        let frames = density_frames(&spectrum, &req.psi0, &t)?;
        Ok(TimeEvolutionResponse {
            x: grid.points().to_vec(),
            t: t.to_vec(),
            density_frames: frames.into_iter().map(|f| f.to_vec()).collect(),
        })
    })
    .await
    .map(Json)
}
