// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Schrödinger, Heisenberg and Ehrenfest endpoints for explicit Hamiltonians.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dynamics::{ehrenfest, evolve_state, heisenberg_operator};
use crate::error::{Result, ValidationError};
use crate::numerics::linspace;
use crate::server::wire::{run_blocking, split_matrix, split_vector};
use crate::server::ServerState;
use crate::validation::{
    complex_vector, square_matrix, validate_len, validate_scalar, validate_time_samples,
};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new()
        .route("/schrodinger", post(schrodinger))
        .route("/heisenberg", post(heisenberg))
        .route("/ehrenfest", post(ehrenfest_expectations))
}

#[derive(Debug, Deserialize)]
pub struct SchrodingerRequest {
    #[serde(rename = "H")]
    pub h: Vec<Vec<f64>>,
    #[serde(rename = "H_imag", default)]
    pub h_imag: Option<Vec<Vec<f64>>>,
    pub psi0: Vec<f64>,
    #[serde(default)]
    pub psi0_imag: Option<Vec<f64>>,
    #[serde(rename = "tMax")]
    pub t_max: f64,
    #[serde(rename = "nSteps")]
    pub n_steps: usize,
}

#[derive(Debug, Serialize)]
pub struct SchrodingerResponse {
    pub t: Vec<f64>,
    pub frames_real: Vec<Vec<f64>>,
    pub frames_imag: Vec<Vec<f64>>,
    pub probabilities: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct HeisenbergRequest {
    #[serde(rename = "A")]
    pub a: Vec<Vec<f64>>,
    #[serde(rename = "A_imag", default)]
    pub a_imag: Option<Vec<Vec<f64>>>,
    #[serde(rename = "H")]
    pub h: Vec<Vec<f64>>,
    #[serde(rename = "H_imag", default)]
    pub h_imag: Option<Vec<Vec<f64>>>,
    pub t: f64,
}

#[derive(Debug, Serialize)]
pub struct HeisenbergResponse {
    #[serde(rename = "A_t_real")]
    pub a_t_real: Vec<Vec<f64>>,
    #[serde(rename = "A_t_imag")]
    pub a_t_imag: Vec<Vec<f64>>,
}

#[derive(Debug, Deserialize)]
pub struct EhrenfestRequest {
    #[serde(rename = "H")]
    pub h: Vec<Vec<f64>>,
    #[serde(rename = "H_imag", default)]
    pub h_imag: Option<Vec<Vec<f64>>>,
    pub psi0: Vec<f64>,
    #[serde(default)]
    pub psi0_imag: Option<Vec<f64>>,
    pub observables: BTreeMap<String, Vec<Vec<f64>>>,
    #[serde(default)]
    pub observables_imag: BTreeMap<String, Vec<Vec<f64>>>,
    #[serde(rename = "tMax")]
    pub t_max: f64,
    #[serde(rename = "nSteps")]
    pub n_steps: usize,
}

#[derive(Debug, Serialize)]
pub struct EhrenfestResponse {
    pub t: Vec<f64>,
    pub expectations: BTreeMap<String, Vec<f64>>,
}

async fn schrodinger(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<SchrodingerRequest>,
) -> Result<Json<SchrodingerResponse>> {
    let config = &state.config.validation;
    let h = square_matrix("H", &req.h, req.h_imag.as_deref(), config)?;
    let psi0 = complex_vector("psi0", &req.psi0, req.psi0_imag.as_deref())?;
    validate_time_samples("nSteps", req.n_steps, config)?;
    validate_scalar("tMax", req.t_max)?;
    debug!(dim = h.nrows(), n_steps = req.n_steps, "Schrödinger evolution request");

    run_blocking(move || -> Result<SchrodingerResponse> {
        let t = linspace(0.0, req.t_max, req.n_steps);
        let trajectory = evolve_state(&h, &psi0, &t)?;

        let mut resp = SchrodingerResponse {
            t: t.to_vec(),
            frames_real: Vec::with_capacity(trajectory.len()),
            frames_imag: Vec::with_capacity(trajectory.len()),
            probabilities: Vec::with_capacity(trajectory.len()),
        };
        for frame in trajectory {
            let (re, im) = split_vector(&frame.state);
            resp.frames_real.push(re);
            resp.frames_imag.push(im);
            resp.probabilities.push(frame.probabilities.to_vec());
        }
        Ok(resp)
    })
    .await
    .map(Json)
}

async fn heisenberg(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<HeisenbergRequest>,
) -> Result<Json<HeisenbergResponse>> {
    let config = &state.config.validation;
    let a = square_matrix("A", &req.a, req.a_imag.as_deref(), config)?;
    let h = square_matrix("H", &req.h, req.h_imag.as_deref(), config)?;
    validate_scalar("t", req.t)?;
    debug!(dim = h.nrows(), t = req.t, "Heisenberg request");

    run_blocking(move || -> Result<HeisenbergResponse> {
        let (a_t_real, a_t_imag) = split_matrix(&heisenberg_operator(&a, &h, req.t)?);
        Ok(HeisenbergResponse { a_t_real, a_t_imag })
    })
    .await
    .map(Json)
}

async fn ehrenfest_expectations(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<EhrenfestRequest>,
) -> Result<Json<EhrenfestResponse>> {
    let config = &state.config.validation;
    let h = square_matrix("H", &req.h, req.h_imag.as_deref(), config)?;
    let psi0 = complex_vector("psi0", &req.psi0, req.psi0_imag.as_deref())?;
    validate_time_samples("nSteps", req.n_steps, config)?;
    validate_scalar("tMax", req.t_max)?;
    validate_len("observables", req.observables.len(), config)?;
    if let Some(name) = req
        .observables_imag
        .keys()
        .find(|name| !req.observables.contains_key(*name))
    {
        return Err(ValidationError::field(
            "observables_imag",
            format!("no real part given for observable '{}'", name),
        )
        .into());
    }

    let mut observables = BTreeMap::new();
    for (name, real) in &req.observables {
        let imag = req.observables_imag.get(name).map(Vec::as_slice);
        let field = format!("observables.{}", name);
        observables.insert(name.clone(), square_matrix(&field, real, imag, config)?);
    }
    debug!(
        dim = h.nrows(),
        observables = observables.len(),
        n_steps = req.n_steps,
        "Ehrenfest request"
    );

    run_blocking(move || -> Result<EhrenfestResponse> {
        let t = linspace(0.0, req.t_max, req.n_steps);
        let expectations = ehrenfest(&h, &psi0, &observables, &t)?;
        Ok(EhrenfestResponse {
            t: t.to_vec(),
            expectations,
        })
    })
    .await
    .map(Json)
}

#[cfg(test)]
mod tests {
    use crate::test_utils::{floats, post_json, test_router};
    use axum::http::StatusCode;
    use serde_json::json;

    #[tokio::test]
    async fn test_schrodinger_rabi() {
        let body = json!({
            "H": [[0.0, 1.0], [1.0, 0.0]],
            "psi0": [1.0, 0.0],
            "tMax": std::f64::consts::FRAC_PI_2,
            "nSteps": 3
        });
        let (status, resp) = post_json(test_router(), "/api/dynamics/schrodinger", body).await;
        assert_eq!(status, StatusCode::OK);
        let probs = resp["probabilities"].as_array().unwrap();
        assert_eq!(probs.len(), 3);
        let last = floats(&probs[2]);
        assert!((last[1] - 1.0).abs() < 1e-10);
        // U(π/2)|0⟩ = -i|1⟩
        let imag = floats(&resp["frames_imag"][2]);
        assert!((imag[1] + 1.0).abs() < 1e-10);
    }

    #[tokio::test]
    async fn test_schrodinger_complex_hamiltonian() {
        let body = json!({
            "H": [[0.0, 0.0], [0.0, 0.0]],
            "H_imag": [[0.0, -1.0], [1.0, 0.0]],
            "psi0": [1.0, 0.0],
            "tMax": 1.0,
            "nSteps": 4
        });
        let (status, resp) = post_json(test_router(), "/api/dynamics/schrodinger", body).await;
        assert_eq!(status, StatusCode::OK);
        for frame in resp["probabilities"].as_array().unwrap() {
            let p = floats(frame);
            assert!((p[0] + p[1] - 1.0).abs() < 1e-10);
        }
    }

    #[tokio::test]
    async fn test_schrodinger_shape_mismatch() {
        let body = json!({
            "H": [[0.0, 1.0], [1.0, 0.0]],
            "psi0": [1.0, 0.0, 0.0],
            "tMax": 1.0,
            "nSteps": 2
        });
        let (status, resp) = post_json(test_router(), "/api/dynamics/schrodinger", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(resp["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_schrodinger_ragged_hamiltonian() {
        let body = json!({
            "H": [[0.0, 1.0], [1.0]],
            "psi0": [1.0, 0.0],
            "tMax": 1.0,
            "nSteps": 2
        });
        let (status, _) = post_json(test_router(), "/api/dynamics/schrodinger", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_heisenberg_at_zero() {
        let body = json!({
            "A": [[1.0, 0.0], [0.0, -1.0]],
            "H": [[0.0, 1.0], [1.0, 0.0]],
            "t": 0.0
        });
        let (status, resp) = post_json(test_router(), "/api/dynamics/heisenberg", body).await;
        assert_eq!(status, StatusCode::OK);
        assert!((floats(&resp["A_t_real"][0])[0] - 1.0).abs() < 1e-14);
        assert!((floats(&resp["A_t_real"][1])[1] + 1.0).abs() < 1e-14);
        assert!(floats(&resp["A_t_imag"][0])[1].abs() < 1e-14);
    }

    #[tokio::test]
    async fn test_ehrenfest_two_observables() {
        let body = json!({
            "H": [[0.0, 1.0], [1.0, 0.0]],
            "psi0": [1.0, 0.0],
            "observables": {
                "sz": [[1.0, 0.0], [0.0, -1.0]],
                "sy": [[0.0, 0.0], [0.0, 0.0]]
            },
            "observables_imag": {
                "sy": [[0.0, -1.0], [1.0, 0.0]]
            },
            "tMax": 1.0,
            "nSteps": 5
        });
        let (status, resp) = post_json(test_router(), "/api/dynamics/ehrenfest", body).await;
        assert_eq!(status, StatusCode::OK);
        let t = floats(&resp["t"]);
        let sz = floats(&resp["expectations"]["sz"]);
        let sy = floats(&resp["expectations"]["sy"]);
        for k in 0..t.len() {
            // H = σx: ⟨σz⟩ = cos 2t, ⟨σy⟩ = -sin 2t
            assert!((sz[k] - (2.0 * t[k]).cos()).abs() < 1e-10);
            assert!((sy[k] + (2.0 * t[k]).sin()).abs() < 1e-10);
        }
    }

    #[tokio::test]
    async fn test_ehrenfest_orphan_imaginary_part() {
        let body = json!({
            "H": [[1.0]],
            "psi0": [1.0],
            "observables": {},
            "observables_imag": {"x": [[1.0]]},
            "tMax": 1.0,
            "nSteps": 2
        });
        let (status, _) = post_json(test_router(), "/api/dynamics/ehrenfest", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
