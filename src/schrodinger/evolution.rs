// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Time evolution in the energy eigenbasis of a grid Hamiltonian.
//!
//! A state `ψ(x, 0) = Σ_k c_k φ_k(x)` evolves as
//! `ψ(x, t) = Σ_k c_k e^{-i E_k t} φ_k(x)`, which is `exp(-iHt)` applied
//! exactly in the truncated basis.

use ndarray::Array1;
use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use super::spectrum::Spectrum;
use crate::error::ValidationError;

/// Number of eigenstates used as the evolution basis (capped by grid size).
pub const EVOLUTION_BASIS_SIZE: usize = 20;

/// Initial state for grid time evolution.
///
/// Either a single eigenstate index `n` (default 0) or explicit real
/// expansion coefficients over the lowest eigenstates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InitialState {
    #[serde(default)]
    pub n: Option<usize>,
    #[serde(default)]
    pub coefficients: Option<Vec<f64>>,
}

impl InitialState {
    /// Expansion coefficients over a basis of `basis_size` eigenstates.
    pub fn coefficients(&self, basis_size: usize) -> Result<Vec<f64>, ValidationError> {
        if let Some(coeffs) = &self.coefficients {
            if coeffs.is_empty() || coeffs.len() > basis_size {
                return Err(ValidationError::field(
                    "psi0.coefficients",
                    format!(
                        "expected between 1 and {} coefficients, got {}",
                        basis_size,
                        coeffs.len()
                    ),
                ));
            }
            let mut out = coeffs.clone();
            out.resize(basis_size, 0.0);
            return Ok(out);
        }

        let n = self.n.unwrap_or(0);
        if n >= basis_size {
            return Err(ValidationError::field(
                "psi0.n",
                format!("level {} is outside the {} computed levels", n, basis_size),
            ));
        }
        let mut out = vec![0.0; basis_size];
        out[n] = 1.0;
        Ok(out)
    }
}

/// Probability density `|ψ(x, t)|²` at every requested time.
pub fn density_frames(
    spectrum: &Spectrum,
    initial: &InitialState,
    times: &Array1<f64>,
) -> Result<Vec<Array1<f64>>, ValidationError> {
    let coeffs = initial.coefficients(spectrum.len())?;
    let n_points = spectrum.eigenfuncs.ncols();

    let frames = times
        .iter()
        .map(|&t| {
            let mut psi = Array1::<Complex64>::zeros(n_points);
            for (k, &c) in coeffs.iter().enumerate() {
                if c == 0.0 {
                    continue;
                }
                let phase = Complex64::new(0.0, -spectrum.energies[k] * t).exp() * c;
                psi.zip_mut_with(&spectrum.eigenfuncs.row(k), |p, &phi| *p += phase * phi);
            }
            psi.mapv(|z| z.norm_sqr())
        })
        .collect();

    Ok(frames)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerics::linspace;
    use crate::schrodinger::{solve_spectrum, Grid, Potential, PotentialParams};
    use approx::assert_abs_diff_eq;

    fn harmonic_spectrum() -> (Grid, Spectrum) {
        let grid = Grid::new(-8.0, 8.0, 400).unwrap();
        let v = Potential::from_request("harmonic", &PotentialParams::default())
            .sample(grid.points());
        let spectrum = solve_spectrum(&grid, &v, EVOLUTION_BASIS_SIZE).unwrap();
        (grid, spectrum)
    }

    #[test]
    fn test_stationary_state_density_constant() {
        let (_, spectrum) = harmonic_spectrum();
        let times = linspace(0.0, 5.0, 6);
        let frames = density_frames(&spectrum, &InitialState { n: Some(2), coefficients: None }, &times)
            .unwrap();
        assert_eq!(frames.len(), 6);
        for frame in &frames[1..] {
            for (a, b) in frame.iter().zip(frames[0].iter()) {
                assert_abs_diff_eq!(a, b, epsilon = 1e-12);
            }
        }
    }

    #[test]
    fn test_superposition_conserves_probability() {
        let (grid, spectrum) = harmonic_spectrum();
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let initial = InitialState {
            n: None,
            coefficients: Some(vec![h, h]),
        };
        let times = linspace(0.0, 3.0, 7);
        let frames = density_frames(&spectrum, &initial, &times).unwrap();
        for frame in &frames {
            assert_abs_diff_eq!(frame.sum() * grid.dx(), 1.0, epsilon = 1e-6);
        }
        // The two-level superposition sloshes, so the density changes.
        let diff: f64 = frames[0]
            .iter()
            .zip(frames[2].iter())
            .map(|(a, b)| (a - b).abs())
            .sum();
        assert!(diff > 1e-3);
    }

    #[test]
    fn test_initial_state_validation() {
        let state = InitialState {
            n: Some(25),
            coefficients: None,
        };
        assert!(state.coefficients(20).is_err());

        let too_many = InitialState {
            n: None,
            coefficients: Some(vec![1.0; 21]),
        };
        assert!(too_many.coefficients(20).is_err());

        assert_eq!(InitialState::default().coefficients(3).unwrap(), vec![1.0, 0.0, 0.0]);
    }
}
