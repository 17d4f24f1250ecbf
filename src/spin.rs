// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Spin-1/2 precession and angular-momentum coupling.

use std::collections::BTreeMap;

use ndarray::{arr2, Array1, Array2};
use num_complex::Complex64;
use rand::Rng;

use crate::dynamics::ehrenfest;
use crate::error::{Result, ValidationError};

/// Spin-1/2 operators `(Sx, Sy, Sz) = σ/2`.
pub fn spin_matrices() -> [Array2<Complex64>; 3] {
    let z = Complex64::new(0.0, 0.0);
    let half = Complex64::new(0.5, 0.0);
    let i_half = Complex64::new(0.0, 0.5);

    [
        arr2(&[[z, half], [half, z]]),
        arr2(&[[z, -i_half], [i_half, z]]),
        arr2(&[[half, z], [z, -half]]),
    ]
}

/// Bloch-sphere state `cos(θ/2)|↑⟩ + e^{iφ} sin(θ/2)|↓⟩`.
pub fn bloch_state(theta: f64, phi: f64) -> Array1<Complex64> {
    let (s, c) = (theta / 2.0).sin_cos();
    Array1::from(vec![
        Complex64::new(c, 0.0),
        Complex64::from_polar(s, phi),
    ])
}

/// `⟨Sx⟩, ⟨Sy⟩, ⟨Sz⟩` sampled on a time grid.
#[derive(Debug, Clone, Default)]
pub struct SpinTrajectory {
    pub sx: Vec<f64>,
    pub sy: Vec<f64>,
    pub sz: Vec<f64>,
}

/// Precession of a spin-1/2 in field `b` under `H = -(B · S)`.
pub fn spin_dynamics(b: [f64; 3], theta0: f64, phi0: f64, times: &Array1<f64>) -> Result<SpinTrajectory> {
    let [sx, sy, sz] = spin_matrices();
    let h = (&sx * Complex64::new(-b[0], 0.0))
        + (&sy * Complex64::new(-b[1], 0.0))
        + (&sz * Complex64::new(-b[2], 0.0));
    let psi0 = bloch_state(theta0, phi0);

    let mut observables = BTreeMap::new();
    observables.insert("sx".to_string(), sx);
    observables.insert("sy".to_string(), sy);
    observables.insert("sz".to_string(), sz);

    let mut series = ehrenfest(&h, &psi0, &observables, times)?;
    Ok(SpinTrajectory {
        sx: series.remove("sx").unwrap_or_default(),
        sy: series.remove("sy").unwrap_or_default(),
        sz: series.remove("sz").unwrap_or_default(),
    })
}

/// Product basis and total-J content of two coupled angular momenta.
#[derive(Debug, Clone)]
pub struct Coupling {
    /// `(m1, m2)` pairs, `m1` descending outer, `m2` descending inner.
    pub product_basis: Vec<[f64; 2]>,
    /// One coefficient per product state; unit L2 norm.
    pub cg_coeffs: Vec<f64>,
    /// `|j1-j2|, ..., j1+j2`.
    pub total_j: Vec<f64>,
    /// `J(J+1)` for each total J.
    pub eigenvalues: Vec<f64>,
}

fn check_angular_momentum(field: &str, j: f64) -> std::result::Result<(), ValidationError> {
    let twice = 2.0 * j;
    if !j.is_finite() || j < 0.0 || (twice - twice.round()).abs() > 1e-9 {
        return Err(ValidationError::field(
            field,
            format!("must be a non-negative integer or half-integer, got {}", j),
        ));
    }
    Ok(())
}

/// Descending projections `j, j-1, ..., -j`.
fn projections(j: f64) -> impl Iterator<Item = f64> {
    let count = (2.0 * j).round() as usize + 1;
    (0..count).map(move |k| j - k as f64)
}

/// Couple `j1` and `j2`.
///
/// The coefficient vector is a random normalized placeholder rather than true
/// Clebsch-Gordan coefficients; `rng` controls reproducibility.
pub fn two_spin_coupling<R: Rng + ?Sized>(j1: f64, j2: f64, rng: &mut R) -> Result<Coupling> {
    check_angular_momentum("j1", j1)?;
    check_angular_momentum("j2", j2)?;

    let product_basis: Vec<[f64; 2]> = projections(j1)
        .flat_map(|m1| projections(j2).map(move |m2| [m1, m2]))
        .collect();

    let raw: Vec<f64> = (0..product_basis.len()).map(|_| rng.gen::<f64>()).collect();
    let norm = raw.iter().map(|c| c * c).sum::<f64>().sqrt();
    let cg_coeffs = if norm > 0.0 {
        raw.iter().map(|c| c / norm).collect()
    } else {
        raw
    };

    let j_min = (j1 - j2).abs();
    let count = (j1 + j2 - j_min).round() as usize + 1;
    let total_j: Vec<f64> = (0..count).map(|k| j_min + k as f64).collect();
    let eigenvalues = total_j.iter().map(|j| j * (j + 1.0)).collect();

    Ok(Coupling {
        product_basis,
        cg_coeffs,
        total_j,
        eigenvalues,
    })
}

/// Spin-orbit splitting `E_j = λ/2 [j(j+1) - l(l+1) - s(s+1)]` for
/// `j = |l-s|` and `j = l+s`, per coupling strength.
pub fn spin_orbit_spectrum(l: f64, s: f64, lambdas: &[f64]) -> Vec<[f64; 2]> {
    let j_minus = (l - s).abs();
    let j_plus = l + s;
    let base = l * (l + 1.0) + s * (s + 1.0);
    lambdas
        .iter()
        .map(|&lam| {
            [
                0.5 * lam * (j_minus * (j_minus + 1.0) - base),
                0.5 * lam * (j_plus * (j_plus + 1.0) - base),
            ]
        })
        .collect()
}
