// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Bound states of the finite-difference Hamiltonian.
//!
//! With ħ = m = 1 the second-order discretization of `-½ d²/dx² + V(x)` is
//! the symmetric tridiagonal matrix
//!
//! ```text
//! H_ii     = 1/dx² + V(x_i)
//! H_i,i±1  = -½ / dx²
//! ```
//!
//! Eigenvectors come back with unit 2-norm and are rescaled by `1/sqrt(dx)`
//! so that `Σ |ψ_i|² dx = 1` approximates the continuum normalization.

use ndarray::{Array1, Array2};
use tracing::debug;

use super::grid::Grid;
use crate::error::{Result, ValidationError};
use crate::numerics::lowest_eigenpairs;

/// Lowest bound states on a grid, ascending by energy.
#[derive(Debug, Clone)]
pub struct Spectrum {
    /// Energies, non-decreasing.
    pub energies: Array1<f64>,
    /// Eigenfunctions sampled on the grid, one per row.
    pub eigenfuncs: Array2<f64>,
}

impl Spectrum {
    pub fn len(&self) -> usize {
        self.energies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.energies.is_empty()
    }
}

/// Diagonal and off-diagonal of the discretized Hamiltonian.
pub fn hamiltonian_bands(grid: &Grid, potential: &Array1<f64>) -> (Vec<f64>, Vec<f64>) {
    let inv_dx2 = 1.0 / (grid.dx() * grid.dx());
    let diagonal = potential.iter().map(|v| inv_dx2 + v).collect();
    let off_diag = vec![-0.5 * inv_dx2; grid.len() - 1];
    (diagonal, off_diag)
}

/// Solve for the lowest `n_levels` bound states.
///
/// # Errors
/// Validation error when `n_levels` is 0 or exceeds the grid size or the
/// potential length differs from the grid; numerical error when the
/// eigensolver fails.
pub fn solve_spectrum(grid: &Grid, potential: &Array1<f64>, n_levels: usize) -> Result<Spectrum> {
    if potential.len() != grid.len() {
        return Err(ValidationError::shape(
            "V",
            format!(
                "potential has {} samples but the grid has {}",
                potential.len(),
                grid.len()
            ),
        )
        .into());
    }
    if n_levels == 0 || n_levels > grid.len() {
        return Err(ValidationError::field(
            "nLevels",
            format!("must be between 1 and nPoints ({}), got {}", grid.len(), n_levels),
        )
        .into());
    }

    let (diagonal, off_diag) = hamiltonian_bands(grid, potential);
    let eig = lowest_eigenpairs(&diagonal, &off_diag, n_levels)?;

    let scale = 1.0 / grid.dx().sqrt();
    let eigenfuncs = eig.vectors * scale;

    debug!(
        n_points = grid.len(),
        n_levels,
        ground_energy = eig.values[0],
        "Solved grid spectrum"
    );

    Ok(Spectrum {
        energies: eig.values,
        eigenfuncs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schrodinger::potential::{Potential, PotentialParams};
    use approx::assert_abs_diff_eq;
    use std::f64::consts::PI;

    fn spectrum_for(kind: &str, x_min: f64, x_max: f64, n: usize, levels: usize) -> (Grid, Spectrum) {
        let grid = Grid::new(x_min, x_max, n).unwrap();
        let v = Potential::from_request(kind, &PotentialParams::default()).sample(grid.points());
        let spectrum = solve_spectrum(&grid, &v, levels).unwrap();
        (grid, spectrum)
    }

    #[test]
    fn test_harmonic_ground_state_energy() {
        let (_, spectrum) = spectrum_for("harmonic", -10.0, 10.0, 2000, 3);
        assert!((spectrum.energies[0] - 0.5).abs() / 0.5 < 0.02);
        assert!((spectrum.energies[1] - 1.5).abs() / 1.5 < 0.02);
        assert!((spectrum.energies[2] - 2.5).abs() / 2.5 < 0.02);
    }

    #[test]
    fn test_eigenfunctions_normalized() {
        let (grid, spectrum) = spectrum_for("square_well", -3.0, 3.0, 600, 5);
        for row in spectrum.eigenfuncs.rows() {
            let norm: f64 = row.iter().map(|v| v * v).sum::<f64>() * grid.dx();
            assert_abs_diff_eq!(norm, 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_energies_ascending() {
        let (_, spectrum) = spectrum_for("barrier", -5.0, 5.0, 400, 10);
        for k in 1..spectrum.len() {
            assert!(spectrum.energies[k] >= spectrum.energies[k - 1]);
        }
    }

    #[test]
    fn test_unknown_potential_matches_zero_potential() {
        let grid = Grid::new(-2.0, 2.0, 120).unwrap();
        let unknown = Potential::from_request("unknown_string", &PotentialParams::default())
            .sample(grid.points());
        let zeros = Array1::zeros(grid.len());
        let a = solve_spectrum(&grid, &unknown, 4).unwrap();
        let b = solve_spectrum(&grid, &zeros, 4).unwrap();
        assert_eq!(a.energies, b.energies);
        assert_eq!(a.eigenfuncs, b.eigenfuncs);
    }

    #[test]
    fn test_free_particle_in_box_levels() {
        // Zero potential with hard walls just beyond the grid: E_n ≈ n²π²/(2L²), L = (N+1) dx
        let (grid, spectrum) = spectrum_for("free", 0.0, 1.0, 400, 3);
        let length = grid.dx() * (grid.len() + 1) as f64;
        for n in 1..=3 {
            let exact = (n as f64 * PI / length).powi(2) / 2.0;
            assert!((spectrum.energies[n - 1] - exact).abs() / exact < 1e-3);
        }
    }

    #[test]
    fn test_level_count_validation() {
        let grid = Grid::new(-1.0, 1.0, 10).unwrap();
        let v = Array1::zeros(10);
        assert!(solve_spectrum(&grid, &v, 0).is_err());
        assert!(solve_spectrum(&grid, &v, 11).is_err());
        assert!(solve_spectrum(&grid, &v, 10).is_ok());
        assert!(solve_spectrum(&grid, &Array1::zeros(9), 1).is_err());
    }
}
