// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! WKB tunneling endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::server::ServerState;
use crate::validation::{validate_array, validate_scalar};
use crate::wkb::{tunneling, BarrierParams};

pub fn router() -> Router<Arc<ServerState>> {
    Router::new().route("/tunneling", post(tunnel))
}

#[derive(Debug, Deserialize)]
pub struct TunnelingRequest {
    #[serde(rename = "barrierParams", default)]
    pub barrier_params: BarrierParams,
    #[serde(rename = "EArray")]
    pub e_array: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct TunnelingResponse {
    #[serde(rename = "EArray")]
    pub e_array: Vec<f64>,
    #[serde(rename = "T_wkb")]
    pub t_wkb: Vec<f64>,
    /// Same values as `T_wkb`; no independent numerical solution is computed.
    #[serde(rename = "T_num")]
    pub t_num: Vec<f64>,
}

async fn tunnel(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<TunnelingRequest>,
) -> Result<Json<TunnelingResponse>> {
    validate_array("EArray", &req.e_array, &state.config.validation)?;
    validate_scalar("barrierParams.height", req.barrier_params.height())?;
    validate_scalar("barrierParams.width", req.barrier_params.width())?;

    let t_wkb = tunneling(&req.barrier_params, &req.e_array);
    Ok(Json(TunnelingResponse {
        e_array: req.e_array,
        t_num: t_wkb.clone(),
        t_wkb,
    }))
}
