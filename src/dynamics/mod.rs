// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Unitary time evolution with `U(t) = exp(-iHt)`.
//!
//! Every time sample recomputes its own propagator from scratch; no
//! incremental stepping is used, so each frame is as accurate as a single
//! matrix exponential.
//!
//! - [`evolve_state`]: Schrödinger picture, `ψ(t) = U(t) ψ0`
//! - [`heisenberg_operator`]: Heisenberg picture, `A(t) = U† A U`
//! - [`ehrenfest`]: expectation-value trajectories `⟨O⟩(t)`

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Result, ValidationError};
use crate::numerics::{dagger, expectation, probability_density, propagator};

/// One evolved sample.
#[derive(Debug, Clone)]
pub struct Frame {
    pub t: f64,
    pub state: Array1<Complex64>,
    pub probabilities: Array1<f64>,
}

/// Trajectory aligned index-for-index with the time grid.
pub type Trajectory = Vec<Frame>;

fn check_state(
    h: &Array2<Complex64>,
    psi0: &Array1<Complex64>,
) -> std::result::Result<(), ValidationError> {
    if h.nrows() != h.ncols() {
        return Err(ValidationError::shape(
            "H",
            format!(
                "Hamiltonian must be square, got {} x {}",
                h.nrows(),
                h.ncols()
            ),
        ));
    }
    if psi0.len() != h.nrows() {
        return Err(ValidationError::shape(
            "psi0",
            format!(
                "state has {} components but the Hamiltonian is {} x {}",
                psi0.len(),
                h.nrows(),
                h.ncols()
            ),
        ));
    }
    Ok(())
}

/// Evolve `psi0` under `h` to every time in `times`.
pub fn evolve_state(
    h: &Array2<Complex64>,
    psi0: &Array1<Complex64>,
    times: &Array1<f64>,
) -> Result<Trajectory> {
    check_state(h, psi0)?;

    times
        .iter()
        .map(|&t| -> Result<Frame> {
            let u = propagator(h, t)?;
            let state = u.dot(psi0);
            let probabilities = probability_density(&state);
            Ok(Frame {
                t,
                state,
                probabilities,
            })
        })
        .collect()
}

/// Heisenberg-picture operator `U(t)† A U(t)`.
pub fn heisenberg_operator(
    a: &Array2<Complex64>,
    h: &Array2<Complex64>,
    t: f64,
) -> Result<Array2<Complex64>> {
    if h.nrows() != h.ncols() {
        return Err(ValidationError::shape("H", "Hamiltonian must be square").into());
    }
    if a.dim() != h.dim() {
        return Err(ValidationError::shape(
            "A",
            format!(
                "operator is {} x {} but the Hamiltonian is {} x {}",
                a.nrows(),
                a.ncols(),
                h.nrows(),
                h.ncols()
            ),
        )
        .into());
    }
    let u = propagator(h, t)?;
    Ok(dagger(&u).dot(a).dot(&u))
}

/// Expectation values `Re⟨ψ(t)|O|ψ(t)⟩` for each named observable.
pub fn ehrenfest(
    h: &Array2<Complex64>,
    psi0: &Array1<Complex64>,
    observables: &BTreeMap<String, Array2<Complex64>>,
    times: &Array1<f64>,
) -> Result<BTreeMap<String, Vec<f64>>> {
    check_state(h, psi0)?;
    for (name, op) in observables {
        if op.dim() != h.dim() {
            return Err(ValidationError::shape(
                "observables",
                format!(
                    "observable '{}' is {} x {} but the Hamiltonian is {} x {}",
                    name,
                    op.nrows(),
                    op.ncols(),
                    h.nrows(),
                    h.ncols()
                ),
            )
            .into());
        }
    }

    let mut out: BTreeMap<String, Vec<f64>> = observables
        .keys()
        .map(|name| (name.clone(), Vec::with_capacity(times.len())))
        .collect();

    for &t in times.iter() {
        let psi_t = propagator(h, t)?.dot(psi0);
        for (name, op) in observables {
            if let Some(series) = out.get_mut(name) {
                series.push(expectation(op, &psi_t));
            }
        }
    }
    Ok(out)
}
