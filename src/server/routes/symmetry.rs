// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Rotation, parity and time-reversal endpoints.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::server::wire::{rows, run_blocking, split_matrix, split_vector};
use crate::server::ServerState;
use crate::symmetry::{parity_spectrum, rotation_eigenvalues, rotation_operator, time_reversal};
use crate::validation::{complex_vector, square_matrix, validate_matrix_dim, validate_scalar};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/rotation", post(rotation))
        .route("/parity", post(parity))
        .route("/time-reversal", post(reverse_time))
}

#[derive(Debug, Deserialize)]
pub struct RotationRequest {
    pub angle: f64,
    pub axis: String,
    #[serde(rename = "N")]
    pub n: usize,
}

#[derive(Debug, Serialize)]
pub struct RotationResponse {
    pub operator_real: Vec<Vec<f64>>,
    pub operator_imag: Vec<Vec<f64>>,
    pub eigenvalues: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct ParityRequest {
    #[serde(rename = "N")]
    pub n: usize,
}

#[derive(Debug, Serialize)]
pub struct ParityResponse {
    pub operator: Vec<Vec<f64>>,
    pub eigenvalues: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct TimeReversalRequest {
    #[serde(rename = "H")]
    pub h: Vec<Vec<f64>>,
    #[serde(rename = "H_imag", default)]
    pub h_imag: Option<Vec<Vec<f64>>>,
    pub psi: Vec<f64>,
    #[serde(default)]
    pub psi_imag: Option<Vec<f64>>,
}

#[derive(Debug, Serialize)]
pub struct TimeReversalResponse {
    pub psi_reversed_real: Vec<f64>,
    pub psi_reversed_imag: Vec<f64>,
    #[serde(rename = "isTimeReversalInvariant")]
    pub is_time_reversal_invariant: bool,
}

async fn rotation(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<RotationRequest>,
) -> Result<Json<RotationResponse>> {
    validate_matrix_dim("N", req.n, &state.config.validation)?;
    validate_scalar("angle", req.angle)?;
    debug!(axis = %req.axis, n = req.n, "Rotation request");

    let r = rotation_operator(req.angle, &req.axis, req.n);
    let (operator_real, operator_imag) = split_matrix(&r);
    Ok(Json(RotationResponse {
        operator_real,
        operator_imag,
        eigenvalues: rotation_eigenvalues(&r),
    }))
}

async fn parity(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ParityRequest>,
) -> Result<Json<ParityResponse>> {
    validate_matrix_dim("N", req.n, &state.config.validation)?;

    run_blocking(move || -> Result<ParityResponse> {
        let (p, eigenvalues) = parity_spectrum(req.n)?;
        Ok(ParityResponse {
            operator: rows(&p),
            eigenvalues,
        })
    })
    .await
    .map(Json)
}

async fn reverse_time(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<TimeReversalRequest>,
) -> Result<Json<TimeReversalResponse>> {
    let h = square_matrix("H", &req.h, req.h_imag.as_deref(), &state.config.validation)?;
    let psi = complex_vector("psi", &req.psi, req.psi_imag.as_deref())?;

    let out = time_reversal(&h, &psi)?;
    let (psi_reversed_real, psi_reversed_imag) = split_vector(&out.psi_reversed);
    Ok(Json(TimeReversalResponse {
        psi_reversed_real,
        psi_reversed_imag,
        is_time_reversal_invariant: out.invariant,
    }))
}
