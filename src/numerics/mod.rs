// Copyright 2026 QM Playground Contributors
// SPDX-License-Identifier: Apache-2.0

//! Numerical kernels shared by the physics modules.
//!
//! Everything here is pure Rust on `ndarray` + `num-complex` (plus `nalgebra`
//! for dense Hermitian problems); no system BLAS/LAPACK is required.
//!
//! - [`matrix_exp`] / [`propagator`]: scaling-and-squaring + Padé(13)
//! - [`lowest_eigenpairs`]: symmetric tridiagonal eigensolver (Sturm
//!   bisection + inverse iteration)
//! - [`eigh`]: dense Hermitian eigensolver (`nalgebra::SymmetricEigen`)
//! - [`linspace`], [`dagger`], [`expectation`]: small helpers

pub mod expm;
pub mod hermitian;
pub mod tridiag;

pub use expm::{matrix_exp, propagator};
pub use hermitian::{eigh, HermitianEigen};
pub use tridiag::{lowest_eigenpairs, TridiagEigen};

use ndarray::{Array1, Array2};
use num_complex::Complex64;

/// `n` evenly spaced samples over `[start, stop]`, both endpoints included.
///
/// `n == 1` yields `[start]`; the last sample is exactly `stop`.
pub fn linspace(start: f64, stop: f64, n: usize) -> Array1<f64> {
    match n {
        0 => Array1::zeros(0),
        1 => Array1::from_elem(1, start),
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out = Array1::from_shape_fn(n, |i| start + step * i as f64);
            out[n - 1] = stop;
            out
        }
    }
}

/// Conjugate transpose.
pub fn dagger(m: &Array2<Complex64>) -> Array2<Complex64> {
    m.t().mapv(|z| z.conj())
}

/// Real part of `⟨ψ|O|ψ⟩`; the imaginary part is discarded.
pub fn expectation(op: &Array2<Complex64>, psi: &Array1<Complex64>) -> f64 {
    let o_psi = op.dot(psi);
    psi.iter()
        .zip(o_psi.iter())
        .map(|(a, b)| a.conj() * b)
        .sum::<Complex64>()
        .re
}

/// Elementwise `|ψ_i|²`.
pub fn probability_density(psi: &Array1<Complex64>) -> Array1<f64> {
    psi.mapv(|z| z.norm_sqr())
}

/// `Σ |ψ_i|²`.
pub fn norm_sqr(psi: &Array1<Complex64>) -> f64 {
    psi.iter().map(|z| z.norm_sqr()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_linspace_endpoints() {
        let x = linspace(-1.0, 1.0, 5);
        assert_eq!(x.to_vec(), vec![-1.0, -0.5, 0.0, 0.5, 1.0]);

        let t = linspace(0.0, 0.3, 4);
        assert_eq!(t[3], 0.3);
        assert_abs_diff_eq!(t[1], 0.1, epsilon = 1e-15);
    }

    #[test]
    fn test_linspace_degenerate_counts() {
        assert_eq!(linspace(2.0, 5.0, 0).len(), 0);
        assert_eq!(linspace(2.0, 5.0, 1).to_vec(), vec![2.0]);
    }

    #[test]
    fn test_expectation_of_sigma_z() {
        let mut sz = Array2::zeros((2, 2));
        sz[[0, 0]] = Complex64::new(1.0, 0.0);
        sz[[1, 1]] = Complex64::new(-1.0, 0.0);
        let h = std::f64::consts::FRAC_1_SQRT_2;
        let psi = Array1::from(vec![Complex64::new(h, 0.0), Complex64::new(0.0, h)]);
        assert_abs_diff_eq!(expectation(&sz, &psi), 0.0, epsilon = 1e-15);
        assert_abs_diff_eq!(norm_sqr(&psi), 1.0, epsilon = 1e-15);
    }

    #[test]
    fn test_dagger() {
        let mut m = Array2::zeros((2, 2));
        m[[0, 1]] = Complex64::new(1.0, 2.0);
        let d = dagger(&m);
        assert_eq!(d[[1, 0]], Complex64::new(1.0, -2.0));
        assert_eq!(d[[0, 1]], Complex64::new(0.0, 0.0));
    }
}
