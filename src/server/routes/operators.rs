// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Operator lab endpoints.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::Result;
use crate::operators::{
    basis_change, generate_operator, generate_state, observable_analysis, rng_from_seed,
    ObservableKind, StateKind,
};
use crate::server::wire::{run_blocking, split_matrix, split_vector};
use crate::server::ServerState;
use crate::validation::{complex_matrix, complex_vector, validate_matrix_dim};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/observable", post(observable))
        .route("/basis-change", post(change_basis))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservableRequest {
    #[serde(rename = "N")]
    pub n: usize,
    pub operator_type: String,
    pub state_type: String,
    #[serde(default)]
    pub seed: Option<u64>,
}

#[derive(Debug, Serialize)]
pub struct ObservableResponse {
    pub matrix_real: Vec<Vec<f64>>,
    pub matrix_imag: Vec<Vec<f64>>,
    pub eigenvalues: Vec<f64>,
    pub eigenvectors_real: Vec<Vec<f64>>,
    pub eigenvectors_imag: Vec<Vec<f64>>,
    pub probabilities: Vec<f64>,
}

#[derive(Debug, Deserialize)]
pub struct BasisChangeRequest {
    pub state: Vec<f64>,
    #[serde(default)]
    pub state_imag: Option<Vec<f64>>,
    #[serde(rename = "U")]
    pub u: Vec<Vec<f64>>,
    #[serde(rename = "U_imag", default)]
    pub u_imag: Option<Vec<Vec<f64>>>,
}

#[derive(Debug, Serialize)]
pub struct BasisChangeResponse {
    #[serde(rename = "newState_real")]
    pub new_state_real: Vec<f64>,
    #[serde(rename = "newState_imag")]
    pub new_state_imag: Vec<f64>,
    #[serde(rename = "probabilitiesInvariant")]
    pub probabilities_invariant: bool,
}

async fn observable(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<ObservableRequest>,
) -> Result<Json<ObservableResponse>> {
    validate_matrix_dim("N", req.n, &state.config.validation)?;
    let operator_kind = ObservableKind::from_name(&req.operator_type);
    let state_kind = StateKind::from_name(&req.state_type);
    debug!(
        n = req.n,
        operator = ?operator_kind,
        state = ?state_kind,
        seeded = req.seed.is_some(),
        "Observable request"
    );

    run_blocking(move || -> Result<ObservableResponse> {
        let mut rng = rng_from_seed(req.seed);
        let a = generate_operator(operator_kind, req.n, &mut rng);
        let psi = generate_state(state_kind, req.n, &mut rng);
        let analysis = observable_analysis(&a, &psi)?;

        let (matrix_real, matrix_imag) = split_matrix(&a);
        let (eigenvectors_real, eigenvectors_imag) = split_matrix(&analysis.eigenvectors);
        Ok(ObservableResponse {
            matrix_real,
            matrix_imag,
            eigenvalues: analysis.eigenvalues.to_vec(),
            eigenvectors_real,
            eigenvectors_imag,
            probabilities: analysis.probabilities.to_vec(),
        })
    })
    .await
    .map(Json)
}

async fn change_basis(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<BasisChangeRequest>,
) -> Result<Json<BasisChangeResponse>> {
    let config = &state.config.validation;
    let psi = complex_vector("state", &req.state, req.state_imag.as_deref())?;
    let u = complex_matrix("U", &req.u, req.u_imag.as_deref())?;
    validate_matrix_dim("U", u.nrows().max(u.ncols()), config)?;

    let out = basis_change(&psi, &u)?;
    let (new_state_real, new_state_imag) = split_vector(&out.new_state);
    Ok(Json(BasisChangeResponse {
        new_state_real,
        new_state_imag,
        probabilities_invariant: out.probabilities_invariant,
    }))
}
